use clap::Parser;
use miette::{Result, WrapErr};

use crate::actions::Context;

/// Turn every pixel off.
#[derive(Debug, Clone, Parser)]
pub struct ClearArgs {}

pub fn run(ctx: Context<ClearArgs>) -> Result<()> {
	let mut matrix = ctx.connect()?;
	matrix.clear();
	matrix.write_display().wrap_err("matrix: write_display")?;
	matrix.free();
	Ok(())
}
