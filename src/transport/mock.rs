//! Mock transport for testing

use super::Transport;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock transport for hardware-free tests
///
/// Clones share the same buffers, so a test can keep one handle for
/// injecting robot responses and inspecting written bytes while the driver
/// owns the other.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

struct MockTransportInner {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
    baud_rate: Option<u32>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner {
                read_buffer: VecDeque::new(),
                write_buffer: Vec::new(),
                baud_rate: None,
            })),
        }
    }

    /// Inject data to be read
    pub fn inject_read(&self, data: &[u8]) {
        let mut inner = self.inner.lock();
        inner.read_buffer.extend(data);
    }

    /// Get all written data
    pub fn get_written(&self) -> Vec<u8> {
        let inner = self.inner.lock();
        inner.write_buffer.clone()
    }

    /// Drain and return all written data
    pub fn take_written(&self) -> Vec<u8> {
        let mut inner = self.inner.lock();
        std::mem::take(&mut inner.write_buffer)
    }

    /// Clear written data
    pub fn clear_written(&self) {
        let mut inner = self.inner.lock();
        inner.write_buffer.clear();
    }

    /// Clear read buffer
    pub fn clear_read(&self) {
        let mut inner = self.inner.lock();
        inner.read_buffer.clear();
    }

    /// Last baud rate set through the transport, if any
    pub fn baud_rate(&self) -> Option<u32> {
        self.inner.lock().baud_rate
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.inner.lock();
        let available = inner.read_buffer.len().min(buffer.len());

        for item in buffer.iter_mut().take(available) {
            // Length checked above, pop cannot fail
            if let Some(byte) = inner.read_buffer.pop_front() {
                *item = byte;
            }
        }

        Ok(available)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock();
        inner.write_buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        self.inner.lock().baud_rate = Some(baud);
        Ok(())
    }

    fn available(&mut self) -> Result<usize> {
        let inner = self.inner.lock();
        Ok(inner.read_buffer.len())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
