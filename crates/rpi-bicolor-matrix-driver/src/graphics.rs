use std::convert::Infallible;

use embedded_graphics::{
	draw_target::DrawTarget,
	geometry::{OriginDimensions, Size},
	pixelcolor::PixelColor,
	Pixel,
};

use crate::{bus::Transport, chip::SIZE, colour::Colour};

impl PixelColor for Colour {
	type Raw = ();
}

impl<T: Transport> OriginDimensions for crate::Matrix<T> {
	fn size(&self) -> Size {
		Size::new(SIZE.into(), SIZE.into())
	}
}

/// Drawing goes into the display buffer only, so it can't fail. Pixels off the matrix are
/// dropped, and rotation applies.
impl<T: Transport> DrawTarget for crate::Matrix<T> {
	type Color = Colour;
	type Error = Infallible;

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = Pixel<Self::Color>>,
	{
		for Pixel(coord, colour) in pixels {
			let (Ok(x), Ok(y)) = (i16::try_from(coord.x), i16::try_from(coord.y)) else {
				continue;
			};

			self.draw_pixel(x, y, colour);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use embedded_graphics::{geometry::Point, Drawable};

	use super::*;
	use crate::testing::matrix;

	#[test]
	fn test_size() {
		let (m, _log) = matrix();
		assert_eq!(m.size(), Size::new(8, 8));
	}

	#[test]
	fn test_draw_iter_uses_buffer() {
		let (mut m, log) = matrix();
		Pixel(Point::new(3, 1), Colour::Green).draw(&mut m).unwrap();
		Pixel(Point::new(9, 1), Colour::Red).draw(&mut m).unwrap();
		Pixel(Point::new(-40_000, 1), Colour::Red).draw(&mut m).unwrap();
		assert_eq!(m.pixel(3, 1), Some(Colour::Green));
		assert_eq!(m.rows().iter().filter(|&&row| row != 0).count(), 1);
		assert!(log.writes().is_empty());
	}

	#[test]
	fn test_draw_target_clear() {
		let (mut m, _log) = matrix();
		DrawTarget::clear(&mut m, Colour::Yellow).unwrap();
		assert!(m.rows().iter().all(|&row| row == 0xFFFF));
	}
}
