//! Byte buffer for staging Open Interface command sequences

/// Growable buffer of raw OI command bytes
///
/// Callers append opcode and payload bytes, then hand the buffer to
/// [`Create::send`](crate::Create::send) for dispatch in a single guarded
/// write, so a multi-command sequence cannot be split by another thread's
/// traffic.
///
/// # Example
/// ```
/// use create_io::CreateScript;
/// use create_io::protocol::constants::OP_DRIVE_DIRECT;
///
/// let mut script = CreateScript::new();
/// script.append_byte(OP_DRIVE_DIRECT);
/// script.append(&[0x00, 0xC8, 0x00, 0xC8]);
/// assert_eq!(script.size(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateScript {
    bytes: Vec<u8>,
}

impl CreateScript {
    /// Create an empty script
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a script from existing command bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Append a single byte
    pub fn append_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append a byte slice
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Append another script's bytes
    pub fn append_script(&mut self, other: &CreateScript) {
        self.bytes.extend_from_slice(&other.bytes);
    }

    /// Remove `len` bytes starting at `index`
    ///
    /// An out-of-range index or zero `len` is a no-op; a range overrunning
    /// the tail removes only the in-range portion.
    pub fn remove(&mut self, index: usize, len: usize) {
        if index >= self.bytes.len() || len == 0 {
            return;
        }
        let end = (index + len).min(self.bytes.len());
        self.bytes.drain(index..end);
    }

    /// Remove the single byte at `index` (no-op when out of range)
    pub fn remove_byte(&mut self, index: usize) {
        self.remove(index, 1);
    }

    /// Byte at `index`, `None` when out of range
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// The staged bytes in append order
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of staged bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes are staged
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Discard all staged bytes
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
