use std::io;

use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};

/// A byte-oriented, address-selectable write channel.
///
/// Dropping the transport releases the underlying handle. On Linux this is implemented for
/// [`rppal::i2c::I2c`], which talks to `/dev/i2c-{bus}`.
pub trait Transport: Sized {
	/// Open the bus with the given number.
	fn open(bus: u8) -> io::Result<Self>;

	/// Select the device that subsequent transfers go to.
	fn bind_address(&mut self, address: u8) -> io::Result<()>;

	/// Write all of `bytes` to the selected device in one transfer.
	fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

#[cfg(target_os = "linux")]
impl Transport for rppal::i2c::I2c {
	fn open(bus: u8) -> io::Result<Self> {
		Self::with_bus(bus).map_err(into_io)
	}

	fn bind_address(&mut self, address: u8) -> io::Result<()> {
		self.set_slave_address(address.into()).map_err(into_io)
	}

	fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
		let written = rppal::i2c::I2c::write(self, bytes).map_err(into_io)?;
		if written != bytes.len() {
			return Err(io::Error::new(
				io::ErrorKind::WriteZero,
				format!("short write: {written} of {} bytes", bytes.len()),
			));
		}

		Ok(())
	}
}

#[cfg(target_os = "linux")]
fn into_io(err: rppal::i2c::Error) -> io::Error {
	match err {
		rppal::i2c::Error::Io(err) => err,
		other => io::Error::other(other),
	}
}

/// An open session to one device on the bus.
///
/// The connection owns its transport. Closing it (explicitly, or by dropping it) releases the
/// transport exactly once; closing again is a no-op.
#[derive(Debug)]
pub struct Connection<T: Transport> {
	transport: Option<T>,
	address: u8,
	bus: u8,
}

impl<T: Transport> Connection<T> {
	/// Open bus number `bus` and select the device at `address`.
	#[instrument(level = "debug")]
	pub fn connect(address: u8, bus: u8) -> Result<Self> {
		let mut transport = T::open(bus).map_err(|source| Error::BusOpen { bus, source })?;
		transport
			.bind_address(address)
			.map_err(|source| Error::AddressSelect { address, source })?;

		debug!(bus, address=%format!("{address:#04x}"), "connected to I2C device");
		Ok(Self::with_transport(transport, address, bus))
	}

	/// Wrap a transport that is already open and bound to `address`.
	pub fn with_transport(transport: T, address: u8, bus: u8) -> Self {
		Self {
			transport: Some(transport),
			address,
			bus,
		}
	}

	/// Release the transport.
	///
	/// This is a no-op if the connection is already closed.
	#[instrument(level = "debug", skip(self))]
	pub fn close(&mut self) {
		if let Some(transport) = self.transport.take() {
			drop(transport);
			debug!(bus = self.bus, "closed I2C connection");
		} else {
			trace!("connection already closed");
		}
	}

	/// Write some bytes to the device.
	#[instrument(level = "trace", skip(self, bytes))]
	pub fn raw_write(&mut self, bytes: &[u8]) -> Result<()> {
		let Some(transport) = self.transport.as_mut() else {
			return Err(Error::BusWrite(io::Error::new(
				io::ErrorKind::NotConnected,
				"connection is closed",
			)));
		};

		trace!(length = bytes.len(), data=%format!("{bytes:02X?}"), "writing bytes to I2C");
		transport.write(bytes).map_err(Error::BusWrite)
	}

	/// Whether the transport is still held.
	pub fn is_open(&self) -> bool {
		self.transport.is_some()
	}

	/// The 7-bit device address.
	pub fn address(&self) -> u8 {
		self.address
	}

	/// The bus number.
	pub fn bus(&self) -> u8 {
		self.bus
	}
}

impl<T: Transport> Drop for Connection<T> {
	fn drop(&mut self) {
		self.close();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Recorder, Unbindable, Unplugged};

	#[test]
	fn test_connect_binds_address() {
		let conn = Connection::<Recorder>::connect(0x70, 1).unwrap();
		assert!(conn.is_open());
		assert_eq!(conn.address(), 0x70);
		assert_eq!(conn.bus(), 1);
	}

	#[test]
	fn test_connect_open_failure() {
		let err = Connection::<Unplugged>::connect(0x70, 3).unwrap_err();
		assert!(matches!(err, Error::BusOpen { bus: 3, .. }));
	}

	#[test]
	fn test_connect_address_failure() {
		let err = Connection::<Unbindable>::connect(0x71, 1).unwrap_err();
		assert!(matches!(err, Error::AddressSelect { address: 0x71, .. }));
	}

	#[test]
	fn test_raw_write_passes_bytes_through() {
		let (recorder, log) = Recorder::new();
		let mut conn = Connection::with_transport(recorder, 0x70, 1);
		conn.raw_write(&[0x21]).unwrap();
		conn.raw_write(&[0xE0, 0x01]).unwrap();
		assert_eq!(log.writes(), vec![vec![0x21], vec![0xE0, 0x01]]);
	}

	#[test]
	fn test_raw_write_failure() {
		let (recorder, _log) = Recorder::failing();
		let mut conn = Connection::with_transport(recorder, 0x70, 1);
		let err = conn.raw_write(&[0x21]).unwrap_err();
		assert!(matches!(err, Error::BusWrite(_)));
	}

	#[test]
	fn test_raw_write_after_close() {
		let (recorder, log) = Recorder::new();
		let mut conn = Connection::with_transport(recorder, 0x70, 1);
		conn.close();
		let err = conn.raw_write(&[0x21]).unwrap_err();
		match err {
			Error::BusWrite(source) => assert_eq!(source.kind(), io::ErrorKind::NotConnected),
			other => panic!("expected BusWrite, got {other:?}"),
		}
		assert!(log.writes().is_empty());
	}

	#[test]
	fn test_close_twice() {
		let (recorder, log) = Recorder::new();
		let mut conn = Connection::with_transport(recorder, 0x70, 1);
		conn.close();
		conn.close();
		assert!(!conn.is_open());
		drop(conn);
		assert_eq!(log.closes(), 1);
	}

	#[test]
	fn test_drop_closes() {
		let (recorder, log) = Recorder::new();
		let conn = Connection::with_transport(recorder, 0x70, 1);
		drop(conn);
		assert_eq!(log.closes(), 1);
	}
}
