//! Print the Create's sensors once a second
//!
//! Each line reads a dozen individual sensors, but the packet cache
//! turns that into at most three requests per refresh window. The Power
//! LED shades from green to red as the battery drains.
//!
//! Run against a robot on a serial port:
//! ```sh
//! RUST_LOG=info cargo run --example sensor_watch -- /dev/ttyUSB0 30
//! ```

use create_io::{Create, CreateConfig, sensors};
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    let seconds: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);

    log::info!("=== Create Sensor Watch ({}s) ===", seconds);

    let mut config = CreateConfig::usb_defaults();
    config.device = device;
    config.refresh_rate_ms = 100;

    let mut create = Create::new(config);
    create.connect()?;
    log::info!("   ✓ Connected, mode {:?}", create.mode());

    for _ in 0..seconds {
        let charge = create.battery_charge();
        let capacity = create.battery_capacity().max(1);

        log::info!(
            "bump L/R {}/{}  wall {} ({})  cliff {}{}{}{}  play {}  battery {} mV ({}/{} mAh)",
            create.bump_left() as u8,
            create.bump_right() as u8,
            create.wall() as u8,
            create.read(sensors::WALL_SIGNAL),
            create.cliff_left() as u8,
            create.cliff_front_left() as u8,
            create.cliff_front_right() as u8,
            create.cliff_right() as u8,
            create.play_button() as u8,
            create.battery_voltage(),
            charge,
            capacity,
        );

        // Power LED: green when full, red when empty
        let fraction = (charge.min(capacity) as u32 * 255) / capacity as u32;
        create.set_leds(false, false, 255 - fraction as u8, 255)?;

        thread::sleep(Duration::from_secs(1));
    }

    create.disconnect();
    log::info!("=== Done ===");

    Ok(())
}
