//! Controller-board battery voltage
//!
//! Distinct from the robot's battery pack (packet group 3): this is the
//! battery of the attached controller board, published by whatever platform
//! layer owns that hardware. A process-wide initialize-once source stands in
//! for the original shared-memory accessor; with no source installed the
//! reading is zero, not an error.

use std::sync::OnceLock;

/// Source of the controller's raw battery voltage
pub trait VoltageSource: Send + Sync {
    /// Raw voltage reading, `None` when the backing store is unavailable
    fn raw_voltage(&self) -> Option<u16>;
}

static SOURCE: OnceLock<Box<dyn VoltageSource>> = OnceLock::new();

/// Install the process-wide voltage source
///
/// Only the first install wins; a later call hands the rejected source back.
pub fn install_source(source: Box<dyn VoltageSource>) -> Result<(), Box<dyn VoltageSource>> {
    SOURCE.set(source)
}

/// Raw controller battery voltage, zero when unavailable
pub fn battery_voltage() -> u16 {
    SOURCE.get().and_then(|s| s.raw_voltage()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(u16);

    impl VoltageSource for FixedSource {
        fn raw_voltage(&self) -> Option<u16> {
            Some(self.0)
        }
    }

    // One test owns the global source so ordering stays deterministic
    #[test]
    fn test_zero_without_source_then_installed_value() {
        assert_eq!(battery_voltage(), 0);
        assert!(install_source(Box::new(FixedSource(818))).is_ok());
        assert_eq!(battery_voltage(), 818);
        assert!(install_source(Box::new(FixedSource(1))).is_err());
    }
}
