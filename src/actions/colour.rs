use clap::ValueEnum;
use rpi_bicolor_matrix_driver as driver;

/// LED colour, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum Colour {
	Off,
	Red,
	Yellow,
	Green,
}

impl From<Colour> for driver::Colour {
	fn from(colour: Colour) -> Self {
		match colour {
			Colour::Off => Self::Off,
			Colour::Red => Self::Red,
			Colour::Yellow => Self::Yellow,
			Colour::Green => Self::Green,
		}
	}
}
