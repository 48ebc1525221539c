//! HT16K33 command bytes and display RAM layout.
//!
//! Everything that ties the driver to the HT16K33 lives here. A port to another controller with an
//! addressable row/colour protocol should only need this module replaced.
//!
//! See [the datasheet][HT16K33] for the command set.
//!
//! [HT16K33]: https://cdn-shop.adafruit.com/datasheets/ht16K33v110.pdf

/// Number of rows (and columns) on the matrix.
pub const SIZE: u8 = 8;

/// Number of buffer rows, one `u16` each.
pub const ROWS: usize = SIZE as usize;

/// System setup register (S).
///
/// Low bit turns the internal oscillator on (1) or puts the chip on standby (0).
pub const SYSTEM_SETUP: u8 = 0x20;
pub const OSCILLATOR_ON: u8 = 0x01;

/// Display setup register (D).
///
/// Bit 0 turns the display on, bits 1-2 select the blink frequency.
pub const DISPLAY_SETUP: u8 = 0x80;
pub const DISPLAY_ON: u8 = 0x01;

/// Dimming set register.
///
/// Low nibble is the duty cycle, 1/16 to 16/16.
pub const BRIGHTNESS: u8 = 0xE0;
pub const MAX_BRIGHTNESS: u8 = 15;

/// Display RAM start address, for writes that begin at row 0.
pub const DISPLAY_RAM: u8 = 0x00;

/// Bit offset of the red plane within a buffer row.
pub const RED_OFFSET: u8 = 0;

/// Bit offset of the green plane within a buffer row.
pub const GREEN_OFFSET: u8 = 8;

/// Length of a full display write: address byte, then two bytes per row.
pub const FRAME_LEN: usize = 1 + ROWS * 2;

/// Command to start the oscillator.
pub const fn oscillator_on() -> u8 {
	SYSTEM_SETUP | OSCILLATOR_ON
}

/// Command to turn the display on with the given 2-bit blink code.
pub const fn display_on(blink: u8) -> u8 {
	DISPLAY_SETUP | DISPLAY_ON | ((blink & 0b11) << 1)
}

/// Command to set the brightness, clamped to [`MAX_BRIGHTNESS`].
pub const fn brightness(level: u8) -> u8 {
	BRIGHTNESS
		| if level > MAX_BRIGHTNESS {
			MAX_BRIGHTNESS
		} else {
			level
		}
}

/// Serialise the buffer rows into a display RAM write.
///
/// Each row goes out low byte (red plane) first, then high byte (green plane).
pub fn frame(rows: &[u16; ROWS]) -> [u8; FRAME_LEN] {
	let mut frame = [0; FRAME_LEN];
	frame[0] = DISPLAY_RAM;
	for (chunk, row) in frame[1..].chunks_exact_mut(2).zip(rows) {
		chunk.copy_from_slice(&row.to_le_bytes());
	}
	frame
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_command_bytes() {
		assert_eq!(oscillator_on(), 0x21);
		assert_eq!(display_on(0), 0x81);
		assert_eq!(display_on(1), 0x83);
		assert_eq!(display_on(2), 0x85);
		assert_eq!(display_on(3), 0x87);
		assert_eq!(brightness(0), 0xE0);
		assert_eq!(brightness(15), 0xEF);
		assert_eq!(brightness(200), 0xEF);
	}

	#[test]
	fn test_frame_layout() {
		let rows = [0x0102, 0, 0, 0, 0, 0, 0, 0xFF00];
		let frame = frame(&rows);
		assert_eq!(frame.len(), 17);
		assert_eq!(frame[0], 0x00);
		assert_eq!(&frame[1..3], &[0x02, 0x01]);
		assert_eq!(&frame[15..17], &[0x00, 0xFF]);
	}
}
