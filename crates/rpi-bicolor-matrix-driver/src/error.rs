use std::io;

/// Error type for driver operations.
///
/// Only the bus can fail. Bad input to the drawing methods (coordinates off the matrix, unknown
/// characters, out-of-range brightness) is normalised instead of being reported.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum Error {
	/// The bus device node could not be opened.
	#[error("failed to open I2C bus {bus}")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("check that I2C is enabled and that you can access /dev/i2c-*"))
	)]
	BusOpen {
		/// Bus number, as in `/dev/i2c-{bus}`.
		bus: u8,
		#[source]
		source: io::Error,
	},

	/// The target address could not be bound on an open bus.
	#[error("failed to select I2C address {address:#04x}")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("check the address jumpers on the backpack, or run i2cdetect"))
	)]
	AddressSelect {
		/// 7-bit device address.
		address: u8,
		#[source]
		source: io::Error,
	},

	/// A transfer to the device failed.
	#[error("failed to write to the matrix")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("the device may have been disconnected, or the connection closed"))
	)]
	BusWrite(#[source] io::Error),
}

/// Convenience type for Results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
