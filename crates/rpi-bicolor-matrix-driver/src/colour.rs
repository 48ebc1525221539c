/// Colour of a single LED.
///
/// Each LED has a red and a green element; lighting both shows yellow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Colour {
	#[default]
	Off = 0,
	Red = 1,
	Yellow = 2,
	Green = 3,
}

impl Colour {
	/// Build from the state of the red and green elements.
	pub const fn from_planes(red: bool, green: bool) -> Self {
		match (red, green) {
			(false, false) => Self::Off,
			(true, false) => Self::Red,
			(true, true) => Self::Yellow,
			(false, true) => Self::Green,
		}
	}

	/// Whether the red element is lit.
	pub const fn red(self) -> bool {
		matches!(self, Self::Red | Self::Yellow)
	}

	/// Whether the green element is lit.
	pub const fn green(self) -> bool {
		matches!(self, Self::Green | Self::Yellow)
	}
}

/// Blink frequency of the whole display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlinkRate {
	#[default]
	Off = 0,
	TwoHz = 1,
	OneHz = 2,
	HalfHz = 3,
}

impl BlinkRate {
	/// Convert from the numeric code. Anything unknown means no blinking.
	pub const fn from_code(code: u8) -> Self {
		match code {
			1 => Self::TwoHz,
			2 => Self::OneHz,
			3 => Self::HalfHz,
			_ => Self::Off,
		}
	}

	pub const fn code(self) -> u8 {
		self as u8
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_colour_planes() {
		for colour in [Colour::Off, Colour::Red, Colour::Yellow, Colour::Green] {
			assert_eq!(Colour::from_planes(colour.red(), colour.green()), colour);
		}
		assert!(Colour::Yellow.red() && Colour::Yellow.green());
		assert!(!Colour::Off.red() && !Colour::Off.green());
	}

	#[test]
	fn test_colour_codes() {
		assert_eq!(Colour::Off as u8, 0);
		assert_eq!(Colour::Red as u8, 1);
		assert_eq!(Colour::Yellow as u8, 2);
		assert_eq!(Colour::Green as u8, 3);
	}

	#[test]
	fn test_unknown_blink_rate_is_off() {
		assert_eq!(BlinkRate::from_code(2), BlinkRate::OneHz);
		assert_eq!(BlinkRate::from_code(4), BlinkRate::Off);
		assert_eq!(BlinkRate::from_code(255), BlinkRate::Off);
	}
}
