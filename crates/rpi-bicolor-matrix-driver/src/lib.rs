#![deny(rust_2018_idioms)]

//! A Raspberry Pi driver for 8x8 bicolor LED matrices on an HT16K33 I2C backpack.
//!
//! This crate drives an [Adafruit Bicolor LED Square Pixel Matrix][matrix] over the Linux I2C
//! character device (`/dev/i2c-N`). Each pixel can be off, red, green, or yellow (both lit).
//!
//! Drawing happens in an in-memory buffer, which is sent to the matrix on
//! [`Matrix::write_display()`]. Besides single pixels, the driver can draw one 5x8 ASCII
//! character at a time, and implements [`embedded_graphics`]' `DrawTarget`.
//!
//! [matrix]: https://www.adafruit.com/product/902
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> rpi_bicolor_matrix_driver::Result<()> {
//! use rpi_bicolor_matrix_driver::{Colour, I2cMatrix};
//!
//! let mut matrix = I2cMatrix::connect(0x70, 1)?;
//! matrix.begin()?;
//!
//! matrix.draw_character(b'A', Colour::Red, Colour::Off);
//! matrix.draw_pixel(7, 7, Colour::Yellow);
//! matrix.write_display()?;
//! # Ok(()) }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```

#[doc(inline)]
pub use bus::{Connection, Transport};

#[doc(inline)]
pub use colour::{BlinkRate, Colour};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use glyph::{glyph, Glyph};

#[doc(inline)]
pub use matrix::Matrix;

/// A matrix on the Linux I2C bus.
#[cfg(target_os = "linux")]
pub type I2cMatrix = Matrix<rppal::i2c::I2c>;

mod bus;
pub mod chip;
mod colour;
mod error;
pub mod glyph;
mod graphics;
mod matrix;

#[cfg(test)]
mod testing;
