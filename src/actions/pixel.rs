use clap::Parser;
use miette::{Result, WrapErr};
use tracing::warn;

use crate::actions::{colour::Colour, Context};

/// Light a single pixel.
///
/// The rest of the display is cleared. Coordinates go from 0 to 7, with (0, 0) at the top left
/// before rotation; anything else is ignored.
#[derive(Debug, Clone, Parser)]
pub struct PixelArgs {
	/// Column
	#[arg(allow_negative_numbers = true)]
	pub x: i16,

	/// Row
	#[arg(allow_negative_numbers = true)]
	pub y: i16,

	/// Colour to use
	#[arg(default_value = "red")]
	pub colour: Colour,
}

pub fn run(ctx: Context<PixelArgs>) -> Result<()> {
	let PixelArgs { x, y, colour } = ctx.args_top;
	if !(0..8).contains(&x) || !(0..8).contains(&y) {
		warn!(x, y, "pixel is off the matrix, nothing will be drawn");
	}

	let mut matrix = ctx.connect()?;
	matrix.draw_pixel(x, y, colour.into());
	matrix.write_display().wrap_err("matrix: write_display")?;
	matrix.free();
	Ok(())
}
