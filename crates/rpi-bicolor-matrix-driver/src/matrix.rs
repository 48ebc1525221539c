use tracing::{debug, instrument, trace};

use crate::{
	bus::{Connection, Transport},
	chip::{self, FRAME_LEN, GREEN_OFFSET, MAX_BRIGHTNESS, RED_OFFSET, ROWS, SIZE},
	colour::{BlinkRate, Colour},
	error::Result,
};

/// Driver for one 8x8 bicolor matrix.
///
/// Drawing only changes the in-memory display buffer; nothing is shown until
/// [`write_display()`](Self::write_display) is called. Control commands (brightness, blink) go to
/// the device immediately.
///
/// The matrix does no locking. To draw from several threads, wrap it in a mutex and hold the lock
/// for the whole draw-then-write sequence.
#[derive(Debug)]
pub struct Matrix<T: Transport> {
	rows: [u16; ROWS],
	rotation: u8,
	brightness: u8,
	blink_rate: BlinkRate,
	connection: Connection<T>,
}

impl<T: Transport> Matrix<T> {
	/// Connect to the matrix at `address` on bus number `bus`.
	///
	/// This only opens the bus. Call [`begin()`](Self::begin) before drawing.
	pub fn connect(address: u8, bus: u8) -> Result<Self> {
		Connection::connect(address, bus).map(Self::new)
	}

	/// Wrap an existing connection. The display buffer starts out blank.
	pub fn new(connection: Connection<T>) -> Self {
		Self {
			rows: [0; ROWS],
			rotation: 0,
			brightness: MAX_BRIGHTNESS,
			blink_rate: BlinkRate::Off,
			connection,
		}
	}

	/// Perform the init sequence: start the oscillator, turn the display on without blinking, and
	/// set full brightness.
	#[instrument(level = "debug", skip(self))]
	pub fn begin(&mut self) -> Result<()> {
		self.connection.raw_write(&[chip::oscillator_on()])?;
		self.set_blink_rate(BlinkRate::Off)?;
		self.set_brightness(MAX_BRIGHTNESS)?;
		Ok(())
	}

	/// Set the brightness, from 0 (dimmest, but not off) to 15.
	///
	/// Higher values are clamped to 15.
	#[instrument(level = "trace", skip(self))]
	pub fn set_brightness(&mut self, level: u8) -> Result<()> {
		let level = level.min(MAX_BRIGHTNESS);
		self.connection.raw_write(&[chip::brightness(level)])?;
		self.brightness = level;
		Ok(())
	}

	/// Set the blink rate. This also turns the display on.
	#[instrument(level = "trace", skip(self))]
	pub fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<()> {
		self.connection
			.raw_write(&[chip::display_on(rate.code())])?;
		self.blink_rate = rate;
		Ok(())
	}

	/// Clear the display buffer.
	///
	/// Call [`write_display()`](Self::write_display) to apply.
	#[instrument(level = "trace", skip(self))]
	pub fn clear(&mut self) {
		self.rows = [0; ROWS];
	}

	/// Set a pixel in the display buffer.
	///
	/// Coordinates are logical: the current rotation is applied first. Pixels that fall outside
	/// the matrix are ignored.
	pub fn draw_pixel(&mut self, x: i16, y: i16, colour: Colour) {
		let Some((column, row)) = self.locate(x, y) else {
			trace!(x, y, "pixel out of bounds, ignoring");
			return;
		};

		let red = 1_u16 << (column + RED_OFFSET);
		let green = 1_u16 << (column + GREEN_OFFSET);
		let cell = &mut self.rows[row];
		match colour {
			Colour::Off => *cell &= !(red | green),
			Colour::Red => *cell = (*cell | red) & !green,
			Colour::Green => *cell = (*cell | green) & !red,
			Colour::Yellow => *cell |= red | green,
		}
	}

	/// Set the rotation, in quarter turns. Values above 3 wrap around.
	///
	/// This only affects pixels drawn afterwards. To rotate the current image, clear the buffer,
	/// set the rotation, then draw it again.
	pub fn set_rotation(&mut self, rotation: u8) {
		self.rotation = rotation % 4;
		trace!(rotation = self.rotation, "set rotation");
	}

	/// Write the display buffer to the matrix.
	#[instrument(level = "trace", skip(self))]
	pub fn write_display(&mut self) -> Result<()> {
		let frame = self.frame();
		self.connection.raw_write(&frame)
	}

	/// Close the connection to the matrix, if it's still open.
	///
	/// The buffer is kept, but further hardware operations will fail. Dropping the matrix does
	/// this too.
	#[instrument(level = "debug", skip(self))]
	pub fn free(&mut self) {
		if self.connection.is_open() {
			debug!("releasing matrix");
		}
		self.connection.close();
	}

	/// The display buffer, one `u16` per physical row.
	///
	/// Bit `x` of a row is the red element of column `x`, bit `x + 8` is the green one.
	pub fn rows(&self) -> &[u16; ROWS] {
		&self.rows
	}

	/// Colour of the pixel at physical (unrotated) coordinates, or `None` if off the matrix.
	pub fn pixel(&self, column: u8, row: u8) -> Option<Colour> {
		if column >= SIZE || row >= SIZE {
			return None;
		}

		let cell = self.rows[usize::from(row)];
		Some(Colour::from_planes(
			cell & (1 << (column + RED_OFFSET)) != 0,
			cell & (1 << (column + GREEN_OFFSET)) != 0,
		))
	}

	/// The bytes [`write_display()`](Self::write_display) sends.
	pub fn frame(&self) -> [u8; FRAME_LEN] {
		chip::frame(&self.rows)
	}

	pub fn rotation(&self) -> u8 {
		self.rotation
	}

	/// Last brightness written.
	pub fn brightness(&self) -> u8 {
		self.brightness
	}

	/// Last blink rate written.
	pub fn blink_rate(&self) -> BlinkRate {
		self.blink_rate
	}

	pub fn connection(&self) -> &Connection<T> {
		&self.connection
	}

	/// Map logical coordinates to a physical (column, row), applying rotation.
	fn locate(&self, x: i16, y: i16) -> Option<(u8, usize)> {
		// widen first so flipping i16::MIN can't overflow
		let (x, y) = (i32::from(x), i32::from(y));
		let last = i32::from(SIZE) - 1;
		let (x, y) = match self.rotation {
			1 => (last - y, x),
			2 => (last - x, last - y),
			3 => (y, last - x),
			_ => (x, y),
		};

		let column = u8::try_from(x).ok().filter(|&c| c < SIZE)?;
		let row = u8::try_from(y).ok().filter(|&r| r < SIZE)?;
		Some((column, usize::from(row)))
	}
}
