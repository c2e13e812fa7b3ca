//! Error types for the Create driver

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Create driver error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Link is not open
    #[error("Not connected")]
    NotConnected,

    /// Connection sequence failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Transport accepted fewer bytes than requested
    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes the transport accepted
        written: usize,
        /// Bytes requested
        expected: usize,
    },

    /// Blocking read deadline expired before the buffer filled
    #[error("Read timeout")]
    Timeout,

    /// Baud code outside the OI 0..=11 table
    #[error("Unsupported baud code: {0}")]
    UnsupportedBaud(u8),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}
