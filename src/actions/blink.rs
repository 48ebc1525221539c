use clap::{Parser, ValueEnum};
use miette::{Result, WrapErr};
use rpi_bicolor_matrix_driver::BlinkRate;

use crate::actions::Context;

/// Make the whole display blink, or stop it blinking.
#[derive(Debug, Clone, Parser)]
pub struct BlinkArgs {
	/// Blink frequency
	pub rate: Blink,
}

pub fn run(ctx: Context<BlinkArgs>) -> Result<()> {
	let mut matrix = ctx.connect()?;
	matrix
		.set_blink_rate(ctx.args_top.rate.into())
		.wrap_err("matrix: set_blink_rate")?;
	matrix.free();
	Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Blink {
	Off,
	#[value(name = "2hz")]
	TwoHz,
	#[value(name = "1hz")]
	OneHz,
	#[value(name = "half", alias = "0.5hz")]
	HalfHz,
}

impl From<Blink> for BlinkRate {
	fn from(blink: Blink) -> Self {
		match blink {
			Blink::Off => Self::Off,
			Blink::TwoHz => Self::TwoHz,
			Blink::OneHz => Self::OneHz,
			Blink::HalfHz => Self::HalfHz,
		}
	}
}
