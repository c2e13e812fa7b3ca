//! Drive a 0.5 m square using the blocking motion primitives
//!
//! Sequence:
//! 1. Connect and enter Safe mode
//! 2. Four times: forward 500 mm, turn left 90°
//! 3. Report the accumulated odometry
//! 4. Disconnect
//!
//! Run against a robot on a serial port:
//! ```sh
//! RUST_LOG=info cargo run --example drive_square -- /dev/ttyUSB0
//! ```

use create_io::{Create, CreateConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());

    log::info!("=== Create Square Drive ===");

    // === 1. Connect ===
    log::info!("1. Connecting on {}...", device);
    let mut config = CreateConfig::usb_defaults();
    config.device = device;

    let mut create = Create::new(config);
    create.connect()?;
    create.set_safe_mode()?;
    log::info!("   ✓ Connected, mode {:?}", create.mode());

    create.set_distance(0);
    create.set_angle(0);

    // === 2. Drive the square ===
    for side in 1..=4 {
        log::info!("2. Side {}: forward 500 mm...", side);
        create.move_distance(500, 200)?;
        log::info!("   ✓ Turning left 90°...");
        create.turn(90, 150)?;
    }

    // === 3. Report odometry ===
    let state = create.state()?;
    log::info!(
        "3. Accumulated odometry: {} mm traveled, {}° turned",
        state.distance,
        state.angle
    );

    // === 4. Disconnect ===
    log::info!("4. Disconnecting...");
    create.disconnect();
    log::info!("=== Done ===");

    Ok(())
}
