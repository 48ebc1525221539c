use clap::Parser;
use lloggs::{LoggingArgs, PreArgs, WorkerGuard};
use miette::{miette, Result};
use tracing::debug;

/// Drive an 8x8 bicolor LED matrix over I2C
///
/// Made for Adafruit's bicolor LED square pixel matrix with I2C backpack (HT16K33), connected to a
/// Raspberry Pi or any other Linux machine with an I2C bus.
#[derive(Debug, Clone, Parser)]
#[command(
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
pub struct Args {
	#[command(flatten)]
	pub logging: LoggingArgs,

	#[command(flatten)]
	pub device: DeviceArgs,

	/// What to do
	#[command(subcommand)]
	pub action: crate::actions::Action,
}

/// Where the matrix is and how to set it up.
#[derive(Debug, Clone, Parser)]
pub struct DeviceArgs {
	/// I2C address of the matrix.
	///
	/// Hexadecimal with a 0x prefix, or decimal. The backpack answers on 0x70 unless its address
	/// jumpers are bridged, which add 1, 2, and 4.
	#[arg(
		long,
		default_value = "0x70",
		value_parser = parse_address,
		env = "BICOLOR_MATRIX_ADDRESS",
		global = true,
	)]
	pub address: u8,

	/// I2C bus number.
	///
	/// This is the N in /dev/i2c-N. On a Raspberry Pi, the header pins are bus 1.
	#[arg(long, default_value = "1", env = "BICOLOR_MATRIX_BUS", global = true)]
	pub bus: u8,

	/// Rotation, in quarter turns clockwise.
	///
	/// Values above 3 wrap around.
	#[arg(long, default_value = "0", global = true)]
	pub rotation: u8,

	/// Brightness, from 0 to 15.
	///
	/// Values above 15 are clamped.
	#[arg(long, default_value = "15", global = true)]
	pub brightness: u8,
}

fn parse_address(input: &str) -> std::result::Result<u8, String> {
	let input = input.trim();
	let parsed = match input
		.strip_prefix("0x")
		.or_else(|| input.strip_prefix("0X"))
	{
		Some(hex) => u8::from_str_radix(hex, 16),
		None => input.parse(),
	};

	match parsed {
		Ok(address) if address <= 0x7F => Ok(address),
		Ok(address) => Err(format!("{address:#04x} is not a 7-bit I2C address")),
		Err(err) => Err(format!("invalid address: {err}")),
	}
}

pub fn get_args() -> Result<(Args, WorkerGuard)> {
	let log_guard = PreArgs::parse().setup().map_err(|err| miette!("{err}"))?;

	debug!("parsing arguments");
	let args = Args::parse();

	let log_guard = match log_guard {
		Some(g) => g,
		None => args
			.logging
			.setup(|v| match v {
				0 => "info",
				1 => "info,bicolor_matrix=debug,rpi_bicolor_matrix_driver=debug",
				2 => "debug",
				3 => "debug,bicolor_matrix=trace,rpi_bicolor_matrix_driver=trace",
				_ => "trace",
			})
			.map_err(|err| miette!("{err}"))?,
	};

	debug!(?args, "got arguments");
	Ok((args, log_guard))
}

#[test]
fn verify_cli() {
	use clap::CommandFactory;
	Args::command().debug_assert()
}
