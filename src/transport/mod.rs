//! Transport layer for serial I/O abstraction
//!
//! All platform-specific code lives behind [`Transport`]; the rest of the
//! crate only sees byte reads and writes. [`MockTransport`] backs the test
//! suites without hardware.

use crate::error::Result;

mod serial;
pub use serial::SerialTransport;

mod mock;
pub use mock::MockTransport;

/// Transport trait for Create communication
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read
    ///
    /// A poll timeout with no data is `Ok(0)`, not an error.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write data from buffer, returns number of bytes accepted
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;

    /// Reconfigure the line rate
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;

    /// Check if data is available to read
    fn available(&mut self) -> Result<usize> {
        Ok(0) // Default implementation
    }
}
