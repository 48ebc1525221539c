use miette::{Result, WrapErr};
use rpi_bicolor_matrix_driver::I2cMatrix;
use tracing::{info, instrument};

use crate::args::DeviceArgs;

#[derive(Clone, Debug)]
pub struct Context<A = ()> {
	pub device: DeviceArgs,
	pub args_top: A,
}

impl Context {
	pub fn new(device: DeviceArgs) -> Self {
		Self {
			device,
			args_top: (),
		}
	}
}

impl<A> Context<A> {
	pub fn with_top<C>(self, args_top: C) -> Context<C> {
		Context::<C> {
			device: self.device,
			args_top,
		}
	}

	pub fn take_top(self) -> (A, Context<()>) {
		(
			self.args_top,
			Context::<()> {
				device: self.device,
				args_top: (),
			},
		)
	}

	/// Connect to the matrix and run the init sequence with the configured rotation and
	/// brightness.
	#[instrument(level = "debug", skip(self))]
	pub fn connect(&self) -> Result<I2cMatrix> {
		let DeviceArgs {
			address,
			bus,
			rotation,
			brightness,
		} = self.device;

		let mut matrix = I2cMatrix::connect(address, bus)
			.wrap_err(format!("matrix: connect(bus={bus}, address={address:#04x})"))?;
		matrix.begin().wrap_err("matrix: begin")?;
		matrix.set_rotation(rotation);
		matrix
			.set_brightness(brightness)
			.wrap_err("matrix: set_brightness")?;

		info!(bus, address=%format!("{address:#04x}"), "matrix ready");
		Ok(matrix)
	}
}
