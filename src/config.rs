//! Configuration for the Create driver
//!
//! Loads connection and refresh parameters from a TOML file. Everything here
//! can also be set directly when constructing the driver in code.

use crate::error::Result;
use crate::protocol::constants::{BAUD_CODE_DEFAULT, DEFAULT_REFRESH_RATE_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Driver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateConfig {
    /// Serial port the Create is attached to
    pub device: String,
    /// OI baud code for the link (10 = 57600, the power-on rate)
    pub baud_code: u8,
    /// Sensor cache lifetime in milliseconds; 0 refetches on every access
    pub refresh_rate_ms: u64,
    /// Propagate refresh failures from packet accessors instead of serving
    /// the stale cache
    pub strict_refresh: bool,
}

impl CreateConfig {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// - `path`: Path to TOML configuration file
    ///
    /// # Example
    /// ```no_run
    /// use create_io::CreateConfig;
    ///
    /// let config = CreateConfig::from_file("create.toml")?;
    /// # Ok::<(), create_io::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: CreateConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for a Create on a USB serial adapter
    pub fn usb_defaults() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            baud_code: BAUD_CODE_DEFAULT,
            refresh_rate_ms: DEFAULT_REFRESH_RATE_MS,
            strict_refresh: false,
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self::usb_defaults()
    }
}
