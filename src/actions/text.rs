use clap::Parser;
use miette::{Result, WrapErr};

use crate::actions::{colour::Colour, Context};

/// Show one character.
///
/// Characters are 5 pixels wide, drawn from the left edge. Only printable ASCII has glyphs;
/// anything else shows as blank.
#[derive(Debug, Clone, Parser)]
pub struct TextArgs {
	/// Character to show
	pub character: char,

	/// Font colour
	#[arg(long, alias = "fg", default_value = "red")]
	pub font: Colour,

	/// Background colour
	///
	/// Pixels of the glyph's 5x8 cell that aren't part of the character are set to this.
	#[arg(long, alias = "bg", default_value = "off")]
	pub background: Colour,
}

pub fn run(ctx: Context<TextArgs>) -> Result<()> {
	let TextArgs {
		character,
		font,
		background,
	} = ctx.args_top;

	let mut matrix = ctx.connect()?;
	matrix.draw_char(character, font.into(), background.into());
	matrix.write_display().wrap_err("matrix: write_display")?;
	matrix.free();
	Ok(())
}
