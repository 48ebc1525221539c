//! In-memory transports for tests.

use std::{
	cell::{Cell, RefCell},
	io,
	rc::Rc,
};

use crate::{bus::Transport, Connection, Matrix};

/// Shared view of everything a [`Recorder`] saw.
#[derive(Debug, Default, Clone)]
pub(crate) struct Log {
	writes: Rc<RefCell<Vec<Vec<u8>>>>,
	closes: Rc<Cell<usize>>,
}

impl Log {
	pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
		self.writes.borrow().clone()
	}

	pub(crate) fn closes(&self) -> usize {
		self.closes.get()
	}
}

/// Transport that records writes and counts how many times it was released.
#[derive(Debug)]
pub(crate) struct Recorder {
	log: Log,
	fail: bool,
}

impl Recorder {
	pub(crate) fn new() -> (Self, Log) {
		let log = Log::default();
		(
			Self {
				log: log.clone(),
				fail: false,
			},
			log,
		)
	}

	pub(crate) fn failing() -> (Self, Log) {
		let (mut recorder, log) = Self::new();
		recorder.fail = true;
		(recorder, log)
	}
}

impl Transport for Recorder {
	fn open(_bus: u8) -> io::Result<Self> {
		Ok(Self::new().0)
	}

	fn bind_address(&mut self, _address: u8) -> io::Result<()> {
		Ok(())
	}

	fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
		if self.fail {
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "no ack"));
		}

		self.log.writes.borrow_mut().push(bytes.to_vec());
		Ok(())
	}
}

impl Drop for Recorder {
	fn drop(&mut self) {
		self.log.closes.set(self.log.closes.get() + 1);
	}
}

/// Transport whose bus never opens.
#[derive(Debug)]
pub(crate) struct Unplugged;

impl Transport for Unplugged {
	fn open(_bus: u8) -> io::Result<Self> {
		Err(io::Error::new(io::ErrorKind::NotFound, "no such device"))
	}

	fn bind_address(&mut self, _address: u8) -> io::Result<()> {
		unreachable!("never opened")
	}

	fn write(&mut self, _bytes: &[u8]) -> io::Result<()> {
		unreachable!("never opened")
	}
}

/// Transport that opens but refuses every address.
#[derive(Debug)]
pub(crate) struct Unbindable;

impl Transport for Unbindable {
	fn open(_bus: u8) -> io::Result<Self> {
		Ok(Self)
	}

	fn bind_address(&mut self, _address: u8) -> io::Result<()> {
		Err(io::Error::new(io::ErrorKind::AddrNotAvailable, "device busy"))
	}

	fn write(&mut self, _bytes: &[u8]) -> io::Result<()> {
		unreachable!("never bound")
	}
}

/// A matrix on a fresh [`Recorder`].
pub(crate) fn matrix() -> (Matrix<Recorder>, Log) {
	let (recorder, log) = Recorder::new();
	(
		Matrix::new(Connection::with_transport(recorder, 0x70, 1)),
		log,
	)
}
