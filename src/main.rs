#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(target_os = "linux")]
fn main() -> miette::Result<()> {
	let (args, _guard) = bicolor_matrix::args()?;
	bicolor_matrix::run(args)
}

#[cfg(not(target_os = "linux"))]
fn main() -> miette::Result<()> {
	Err(miette::miette!("bicolor-matrix needs the Linux I2C interface"))
}
