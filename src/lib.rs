//! create-io - Host-side driver for the iRobot Create Open Interface
//!
//! This library manages the serial link to an iRobot Create, frames Open
//! Interface commands byte-exactly, and serves sensor readings out of a
//! refresh-rate-gated cache so repeated reads stay cheap.
//!
//! All I/O is blocking and serialized through one exchange lock; there is no
//! background thread and no reconnection logic. Motion helpers that promise
//! a distance or an angle are timed on the host rather than closed over the
//! robot's coarse odometry deltas.
//!
//! ## Quick start
//!
//! ```no_run
//! use create_io::{Create, CreateConfig};
//!
//! # fn main() -> create_io::Result<()> {
//! let mut create = Create::new(CreateConfig::usb_defaults());
//! create.connect()?;
//! create.set_safe_mode()?;
//!
//! create.move_distance(500, 200)?; // Half a meter forward
//! create.turn(90, 150)?; // Quarter turn left
//! println!("Battery: {} mV", create.battery_voltage());
//! # Ok(())
//! # }
//! ```

pub mod battery;
pub mod config;
pub mod create;
pub mod error;
pub mod link;
pub mod protocol;
pub mod script;
pub mod sensors;
pub mod state;
pub mod transport;

// Re-export commonly used types
pub use config::CreateConfig;
pub use create::{Create, Mode};
pub use error::{Error, Result};
pub use link::{LinkGuard, SerialLink};
pub use script::CreateScript;
pub use state::{CreateState, Snapshot};
