use std::{
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	thread::sleep,
	time::{Duration, Instant},
};

use clap::Parser;
use itertools::Itertools;
use miette::{IntoDiagnostic, Result, WrapErr};
use rpi_bicolor_matrix_driver::{
	glyph::{FIRST_CODE, LAST_CODE},
	Colour, Matrix, Transport,
};
use tracing::{debug, info};

use crate::actions::Context;

/// Cycle through every pixel and every character.
///
/// Each round fills the display pixel by pixel in red, then yellow, then green, then erases it
/// the same way. Then it shows every printable ASCII character, dark on a red background.
///
/// Runs until interrupted with Ctrl-C, at which point the display is cleared before exiting.
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
	/// How long to wait after each pixel.
	///
	/// Syntax is a number followed by a unit, such as "100ms" or "1s".
	#[arg(long, default_value = "100ms")]
	pub pixel_delay: humantime::Duration,

	/// How long to show each character.
	#[arg(long, default_value = "1s")]
	pub char_delay: humantime::Duration,

	/// Stop after one round instead of looping.
	#[arg(long)]
	pub once: bool,
}

const SWEEP: [Colour; 4] = [Colour::Red, Colour::Yellow, Colour::Green, Colour::Off];

/// Longest stretch between checks for Ctrl-C while waiting.
const POLL: Duration = Duration::from_millis(50);

pub fn run(ctx: Context<DemoArgs>) -> Result<()> {
	let running = Arc::new(AtomicBool::new(true));
	let r = running.clone();

	ctrlc::set_handler(move || {
		r.store(false, Ordering::SeqCst);
	})
	.into_diagnostic()
	.wrap_err("ctrlc: set_handler")?;

	let pixel_delay: Duration = *ctx.args_top.pixel_delay.as_ref();
	let char_delay: Duration = *ctx.args_top.char_delay.as_ref();
	let mut matrix = ctx.connect()?;

	let mut round = 0_u64;
	'demo: loop {
		round += 1;
		debug!(round, "starting round");
		matrix.clear();

		for colour in SWEEP {
			for (y, x) in (0..8).cartesian_product(0..8) {
				matrix.draw_pixel(x, y, colour);
				matrix.write_display().wrap_err("matrix: write_display")?;
				if !wait(&running, pixel_delay) {
					break 'demo;
				}
			}
		}

		for code in FIRST_CODE..=LAST_CODE {
			matrix.draw_character(code, Colour::Off, Colour::Red);
			matrix.write_display().wrap_err("matrix: write_display")?;
			if !wait(&running, char_delay) {
				break 'demo;
			}
		}

		if ctx.args_top.once {
			break;
		}
	}

	if running.load(Ordering::SeqCst) {
		info!("demo finished, clearing display");
	} else {
		info!("ctrl-c received, clearing display");
	}

	shut_down(&mut matrix)
}

/// Blank the display and release the bus.
fn shut_down<T: Transport>(matrix: &mut Matrix<T>) -> Result<()> {
	matrix.clear();
	let written = matrix.write_display().wrap_err("matrix: write_display");
	matrix.free();
	written
}

/// Wait for `delay`, then report whether the demo should keep going.
///
/// Returns early as soon as `running` is cleared.
fn wait(running: &AtomicBool, delay: Duration) -> bool {
	let deadline = Instant::now() + delay;
	loop {
		if !running.load(Ordering::SeqCst) {
			return false;
		}

		let now = Instant::now();
		if now >= deadline {
			return true;
		}

		sleep(POLL.min(deadline - now));
	}
}

#[cfg(test)]
mod tests {
	use std::{
		cell::{Cell, RefCell},
		io,
		rc::Rc,
	};

	use rpi_bicolor_matrix_driver::{chip::FRAME_LEN, Connection};

	use super::*;

	#[derive(Debug, Default, Clone)]
	struct Log {
		writes: Rc<RefCell<Vec<Vec<u8>>>>,
		closes: Rc<Cell<usize>>,
	}

	#[derive(Debug)]
	struct Recorder(Log);

	impl Transport for Recorder {
		fn open(_bus: u8) -> io::Result<Self> {
			Ok(Self(Log::default()))
		}

		fn bind_address(&mut self, _address: u8) -> io::Result<()> {
			Ok(())
		}

		fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
			self.0.writes.borrow_mut().push(bytes.to_vec());
			Ok(())
		}
	}

	impl Drop for Recorder {
		fn drop(&mut self) {
			self.0.closes.set(self.0.closes.get() + 1);
		}
	}

	fn matrix() -> (Matrix<Recorder>, Log) {
		let log = Log::default();
		let connection = Connection::with_transport(Recorder(log.clone()), 0x70, 1);
		(Matrix::new(connection), log)
	}

	#[test]
	fn test_shut_down_blanks_and_releases() {
		let (mut matrix, log) = matrix();
		matrix.draw_character(b'A', Colour::Green, Colour::Red);
		matrix.write_display().unwrap();

		shut_down(&mut matrix).unwrap();

		let writes = log.writes.borrow().clone();
		assert_eq!(writes.len(), 2);
		assert_eq!(writes.last().unwrap(), &vec![0_u8; FRAME_LEN]);
		assert_eq!(log.closes.get(), 1);
		assert!(!matrix.connection().is_open());

		drop(matrix);
		assert_eq!(log.closes.get(), 1);
	}

	#[test]
	fn test_shut_down_after_free_still_releases_once() {
		let (mut matrix, log) = matrix();
		matrix.free();

		assert!(shut_down(&mut matrix).is_err());
		assert!(log.writes.borrow().is_empty());
		assert_eq!(log.closes.get(), 1);
	}

	#[test]
	fn test_wait_returns_early_when_interrupted() {
		let running = AtomicBool::new(false);
		let start = Instant::now();
		assert!(!wait(&running, Duration::from_secs(10)));
		assert!(start.elapsed() < Duration::from_secs(1));
	}

	#[test]
	fn test_wait_runs_out_the_delay() {
		let running = AtomicBool::new(true);
		let start = Instant::now();
		assert!(wait(&running, Duration::from_millis(120)));
		assert!(start.elapsed() >= Duration::from_millis(120));
	}
}
