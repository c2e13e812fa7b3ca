//! Serial link with the exchange lock and deadline-bounded reads
//!
//! An OI exchange is write-then-read with nothing framing the response, so
//! the caller must hold the line for the whole exchange. [`SerialLink`] wraps
//! the transport in one mutex and [`SerialLink::lock`] hands out an RAII
//! guard carrying every I/O operation, which keeps acquisition and release
//! paired on every path, early returns included.

use crate::error::{Error, Result};
use crate::protocol::constants::{TIMEOUT_PER_BYTE_MS, baud_rate_for};
use crate::transport::{SerialTransport, Transport};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Cloneable handle to the shared serial line
///
/// Clones refer to the same line and the same lock, so any number of threads
/// may hold handles; their exchanges serialize through [`SerialLink::lock`].
#[derive(Clone)]
pub struct SerialLink {
    transport: Arc<Mutex<Option<Box<dyn Transport>>>>,
}

impl SerialLink {
    /// Create a closed link
    pub fn new() -> Self {
        Self {
            transport: Arc::new(Mutex::new(None)),
        }
    }

    /// Open the underlying serial port
    ///
    /// # Arguments
    /// * `path` - Serial port path (e.g., "/dev/ttyUSB0")
    /// * `baud_rate` - Line rate (the Create powers on at 57600)
    pub fn open(&self, path: &str, baud_rate: u32) -> Result<()> {
        let transport = SerialTransport::open(path, baud_rate)?;
        *self.transport.lock() = Some(Box::new(transport));
        Ok(())
    }

    /// Attach an already-open transport (tests attach a mock here)
    pub fn attach(&self, transport: Box<dyn Transport>) {
        *self.transport.lock() = Some(transport);
    }

    /// Close the link, dropping the transport
    pub fn close(&self) {
        if self.transport.lock().take().is_some() {
            log::info!("Link: closed");
        }
    }

    /// Whether a transport is attached
    pub fn is_open(&self) -> bool {
        self.transport.lock().is_some()
    }

    /// Acquire the exchange lock
    ///
    /// Blocks until no other thread holds the line. A multi-step
    /// write-then-read sequence done through one guard cannot interleave
    /// with another thread's bytes.
    pub fn lock(&self) -> LinkGuard<'_> {
        LinkGuard {
            transport: self.transport.lock(),
        }
    }
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to the line for one atomic exchange
pub struct LinkGuard<'a> {
    transport: MutexGuard<'a, Option<Box<dyn Transport>>>,
}

impl LinkGuard<'_> {
    fn transport(&mut self) -> Result<&mut Box<dyn Transport>> {
        self.transport.as_mut().ok_or(Error::NotConnected)
    }

    /// Write all bytes in a single transport call, then flush
    ///
    /// A partial write is [`Error::ShortWrite`]; nothing is retried.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        log::trace!("Link: TX {:02X?}", data);
        let transport = self.transport()?;
        let written = transport.write(data)?;
        if written != data.len() {
            return Err(Error::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        transport.flush()
    }

    /// Write a single byte
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(&[byte])
    }

    /// Best-effort read, `Ok(0)` when the poll window passes with no data
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let n = self.transport()?.read(buffer)?;
        if n > 0 {
            log::trace!("Link: RX {:02X?}", &buffer[..n]);
        }
        Ok(n)
    }

    /// Read a single byte, `None` on timeout or error
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    /// Read until `buffer` is full or the deadline passes
    ///
    /// # Arguments
    /// * `buffer` - Filled completely on success; a timeout leaves the
    ///   partial prefix in place and returns [`Error::Timeout`]
    /// * `timeout` - Deadline for the whole read; `None` uses 7 ms per
    ///   expected byte
    pub fn blocking_read(&mut self, buffer: &mut [u8], timeout: Option<Duration>) -> Result<()> {
        let timeout = timeout
            .unwrap_or_else(|| Duration::from_millis(buffer.len() as u64 * TIMEOUT_PER_BYTE_MS));
        let deadline = Instant::now() + timeout;
        let mut filled = 0;

        while filled < buffer.len() {
            let n = self.read(&mut buffer[filled..])?;
            filled += n;
            if filled == buffer.len() {
                break;
            }
            if Instant::now() >= deadline {
                log::warn!(
                    "Link: blocking read timed out with {}/{} bytes",
                    filled,
                    buffer.len()
                );
                return Err(Error::Timeout);
            }
            if n == 0 {
                thread::sleep(Duration::from_millis(1));
            }
        }
        Ok(())
    }

    /// Retune the local line to an OI baud code
    pub fn set_baud_rate(&mut self, code: u8) -> Result<()> {
        let rate = baud_rate_for(code).ok_or(Error::UnsupportedBaud(code))?;
        self.transport()?.set_baud_rate(rate)
    }

    /// Bytes waiting in the receive buffer
    pub fn available(&mut self) -> Result<usize> {
        self.transport()?.available()
    }
}
