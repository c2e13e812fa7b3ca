//! Create Driver Behaviour Tests
//!
//! Mock-transport tests exercising the full driver without hardware:
//! - Connect / mode / disconnect state machine and the bytes it emits
//! - Refresh-rate gating of the sensor packet cache
//! - Byte-exact big-endian drive command framing
//! - Exchange-lock atomicity across threads
//! - Time-based blocking motion primitives
//!
//! Run with: `cargo test --test create_driver`

use create_io::error::Result;
use create_io::transport::{MockTransport, Transport};
use create_io::{Create, CreateConfig, CreateScript, Error, Mode, SerialLink, sensors};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// Helpers
// ============================================================================

/// Connected driver over a fresh mock, start byte already drained
fn connected_driver(refresh_ms: u64) -> (Create, MockTransport) {
    let mut config = CreateConfig::usb_defaults();
    config.refresh_rate_ms = refresh_ms;

    let mut create = Create::new(config);
    let mock = MockTransport::new();
    create.connect_with(Box::new(mock.clone())).unwrap();
    mock.clear_written();
    (create, mock)
}

/// Group 1 response with the given bumps byte
fn packet1(bumps: u8) -> [u8; 9] {
    let mut bytes = [0u8; 9];
    bytes[0] = bumps;
    bytes
}

/// Group 2 response with the given odometry deltas
fn packet2(distance: i16, angle: i16) -> [u8; 6] {
    let mut bytes = [0u8; 6];
    bytes[2..4].copy_from_slice(&distance.to_be_bytes());
    bytes[4..6].copy_from_slice(&angle.to_be_bytes());
    bytes
}

/// Group 3 response with the given voltage and charge
fn packet3(voltage_mv: u16, charge_mah: u16) -> [u8; 10] {
    let mut bytes = [0u8; 10];
    bytes[1..3].copy_from_slice(&voltage_mv.to_be_bytes());
    bytes[6..8].copy_from_slice(&charge_mah.to_be_bytes());
    bytes
}

/// Transport whose writes always fail
struct BrokenTransport;

impl Transport for BrokenTransport {
    fn read(&mut self, _buffer: &mut [u8]) -> Result<usize> {
        Ok(0)
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "wire gone",
        )))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_baud_rate(&mut self, _baud: u32) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Connection and mode machine
// ============================================================================

#[test]
fn test_connect_emits_start_and_enters_passive() {
    let mut create = Create::new(CreateConfig::usb_defaults());
    assert_eq!(create.mode(), Mode::Off);

    let mock = MockTransport::new();
    create.connect_with(Box::new(mock.clone())).unwrap();

    assert_eq!(create.mode(), Mode::Passive);
    assert!(create.is_connected());
    assert_eq!(mock.get_written(), vec![128]);
}

#[test]
fn test_mode_transitions_and_opcodes() {
    let (mut create, mock) = connected_driver(500);

    create.set_full_mode().unwrap();
    assert_eq!(create.mode(), Mode::Full);
    assert_eq!(mock.take_written(), vec![132]);

    create.set_safe_mode().unwrap();
    assert_eq!(create.mode(), Mode::Safe);
    assert_eq!(mock.take_written(), vec![131]);

    create.set_passive_mode().unwrap();
    assert_eq!(create.mode(), Mode::Passive);
    assert_eq!(mock.take_written(), vec![128]);

    create.disconnect();
    assert_eq!(create.mode(), Mode::Off);
    assert!(!create.is_connected());
    // Streaming paused on the way out
    assert_eq!(mock.take_written(), vec![150, 0]);
}

#[test]
fn test_connect_failure_leaves_driver_off() {
    let mut create = Create::new(CreateConfig::usb_defaults());
    let result = create.connect_with(Box::new(BrokenTransport));

    assert!(matches!(result, Err(Error::ConnectionFailed(_))));
    assert_eq!(create.mode(), Mode::Off);
    assert!(!create.is_connected());
}

#[test]
fn test_mode_command_fails_when_disconnected() {
    let mut create = Create::new(CreateConfig::usb_defaults());
    assert!(matches!(
        create.set_safe_mode(),
        Err(Error::NotConnected)
    ));
    assert_eq!(create.mode(), Mode::Off);
}

#[test]
fn test_set_baud_rate_validates_before_writing() {
    let (mut create, mock) = connected_driver(500);

    assert!(matches!(
        create.set_baud_rate(12),
        Err(Error::UnsupportedBaud(12))
    ));
    // A rejected code never reaches the wire
    assert!(mock.get_written().is_empty());

    create.set_baud_rate(11).unwrap();
    assert_eq!(mock.get_written(), vec![129, 11]);
    assert_eq!(mock.baud_rate(), Some(115_200));
}

// ============================================================================
// Refresh gating
// ============================================================================

#[test]
fn test_cache_answers_within_refresh_window() {
    let (mut create, mock) = connected_driver(500);

    mock.inject_read(&packet1(0x01));
    assert!(create.bump_right());
    assert_eq!(mock.get_written(), vec![142, 1]);

    // Second access inside the window: same data, nothing new on the wire
    assert!(create.bump_right());
    assert_eq!(mock.get_written(), vec![142, 1]);
}

#[test]
fn test_stale_cache_refetches_exactly_once() {
    let (mut create, mock) = connected_driver(30);

    mock.inject_read(&packet1(0x01));
    assert!(create.bump_right());

    thread::sleep(Duration::from_millis(45));

    mock.inject_read(&packet1(0x00));
    assert!(!create.bump_right());
    assert_eq!(mock.get_written(), vec![142, 1, 142, 1]);
}

#[test]
fn test_zero_refresh_rate_fetches_every_access() {
    let (mut create, mock) = connected_driver(0);

    mock.inject_read(&packet1(0x02));
    mock.inject_read(&packet1(0x02));
    assert!(create.bump_left());
    assert!(create.bump_left());

    assert_eq!(mock.get_written(), vec![142, 1, 142, 1]);
}

#[test]
fn test_failed_refresh_serves_stale_value_and_retries() {
    let (mut create, mock) = connected_driver(0);

    mock.inject_read(&packet1(0x01));
    assert!(create.bump_right());

    // No response this time: the blocking read times out and the previous
    // reading answers
    assert!(create.bump_right());
    assert_eq!(mock.get_written(), vec![142, 1, 142, 1]);

    // The stamp did not advance on failure, so the next access tries again
    mock.inject_read(&packet1(0x00));
    assert!(!create.bump_right());
    assert_eq!(mock.get_written(), vec![142, 1, 142, 1, 142, 1]);
}

#[test]
fn test_strict_mode_propagates_refresh_failure() {
    let mut config = CreateConfig::usb_defaults();
    config.refresh_rate_ms = 0;
    config.strict_refresh = true;

    let mut create = Create::new(config);
    let mock = MockTransport::new();
    create.connect_with(Box::new(mock.clone())).unwrap();

    assert!(matches!(create.sensor_packet3(), Err(Error::Timeout)));
}

#[test]
fn test_default_mode_serves_stale_packet_on_failure() {
    let (mut create, _mock) = connected_driver(0);

    // Never-fetched cache still yields a (zeroed) reading
    let packet = create.sensor_packet3().unwrap();
    assert_eq!(packet.voltage, 0);
}

// ============================================================================
// Sensor decode through the driver
// ============================================================================

#[test]
fn test_battery_fields_decode_big_endian() {
    let (mut create, mock) = connected_driver(500);

    mock.inject_read(&packet3(16_800, 2075));
    assert_eq!(create.battery_voltage(), 16_800);
    // Same packet group, served from cache
    assert_eq!(create.battery_charge(), 2075);
    assert_eq!(mock.get_written(), vec![142, 3]);
}

#[test]
fn test_generic_sensor_read() {
    let (mut create, mock) = connected_driver(500);

    mock.inject_read(&packet3(14_400, 900));
    assert_eq!(create.read(sensors::BATTERY_CHARGE), 900);
    assert_eq!(create.read(sensors::BATTERY_VOLTAGE), 14_400);
    assert_eq!(mock.get_written(), vec![142, 3]);
}

#[test]
fn test_distance_accumulates_packet2_deltas() {
    let (mut create, mock) = connected_driver(0);

    mock.inject_read(&packet2(300, 45));
    assert_eq!(create.distance(), 300);

    mock.inject_read(&packet2(-200, -45));
    assert_eq!(create.distance(), 100);
    assert_eq!(mock.get_written(), vec![142, 2, 142, 2]);

    create.set_distance(0);
    mock.inject_read(&packet2(25, 0));
    assert_eq!(create.distance(), 25);
}

// ============================================================================
// Drive command framing
// ============================================================================

#[test]
fn test_drive_frame_is_big_endian() {
    let (mut create, mock) = connected_driver(500);

    create.drive(300, -1).unwrap();
    assert_eq!(mock.get_written(), vec![137, 0x01, 0x2C, 0xFF, 0xFF]);
}

#[test]
fn test_drive_direct_orders_right_wheel_first() {
    let (mut create, mock) = connected_driver(500);

    create.drive_direct(100, 200).unwrap();
    assert_eq!(mock.get_written(), vec![145, 0x00, 0xC8, 0x00, 0x64]);
}

#[test]
fn test_drive_straight_matches_drive_direct() {
    let (mut create, mock) = connected_driver(500);

    create.drive_straight(-200).unwrap();
    let straight = mock.take_written();

    create.drive_direct(-200, -200).unwrap();
    assert_eq!(straight, mock.take_written());
    assert_eq!(straight, vec![145, 0xFF, 0x38, 0xFF, 0x38]);
}

#[test]
fn test_spin_commands_opposite_wheels() {
    let (mut create, mock) = connected_driver(500);

    create.spin_counter_clockwise(150).unwrap();
    assert_eq!(mock.take_written(), vec![145, 0x00, 0x96, 0xFF, 0x6A]);
    assert_eq!(create.angular_velocity(), 300);

    create.spin_clockwise(150).unwrap();
    assert_eq!(mock.take_written(), vec![145, 0xFF, 0x6A, 0x00, 0x96]);
    assert_eq!(create.angular_velocity(), -300);
}

#[test]
fn test_send_dispatches_script_in_one_write() {
    let (mut create, mock) = connected_driver(500);

    let mut script = CreateScript::new();
    script.append(&[139, 0x0A, 0, 255]);
    script.append(&[145, 0, 50, 0, 50]);
    create.send(&script).unwrap();

    assert_eq!(mock.get_written(), script.data());
}

#[test]
fn test_send_staged_clears_buffer() {
    let (mut create, mock) = connected_driver(500);

    create.stage(&CreateScript::from_bytes(&[128, 131]));
    create.send_staged().unwrap();

    assert_eq!(mock.get_written(), vec![128, 131]);
    assert!(create.staged().is_empty());
}

#[test]
fn test_stop_discards_staged_bytes_and_zeroes_wheels() {
    let (mut create, mock) = connected_driver(500);

    create.stage(&CreateScript::from_bytes(&[139, 10, 0, 255]));
    create.stop().unwrap();

    assert!(create.staged().is_empty());
    // The staged bytes never reach the wire, only the zero-velocity frame
    assert_eq!(mock.get_written(), vec![145, 0, 0, 0, 0]);
}

// ============================================================================
// Blocking motion
// ============================================================================

#[test]
fn test_turn_blocks_for_computed_time_then_stops() {
    let (mut create, mock) = connected_driver(500);

    // Packet 2 is force-updated on both edges of the motion
    mock.inject_read(&packet2(0, 0));
    mock.inject_read(&packet2(0, 0));

    // 30° at 200 mm/s: 0.5236 rad * 129 mm / 200 mm/s = 0.338 s
    let start = Instant::now();
    create.turn(30, 200).unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(330), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(700), "blocked too long: {elapsed:?}");

    assert_eq!(
        mock.get_written(),
        vec![
            142, 2, // Pre-motion odometry consume
            145, 0x00, 0xC8, 0xFF, 0x38, // Spin CCW at 200
            145, 0, 0, 0, 0, // Stop
            142, 2, // Post-motion odometry consume
        ]
    );
}

#[test]
fn test_move_distance_blocks_then_stops() {
    let (mut create, mock) = connected_driver(500);

    mock.inject_read(&packet2(0, 0));
    mock.inject_read(&packet2(0, 0));

    // 100 mm at 400 mm/s: 0.25 s
    let start = Instant::now();
    create.move_distance(100, 400).unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(250), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(600), "blocked too long: {elapsed:?}");

    assert_eq!(
        mock.get_written(),
        vec![
            142, 2,
            145, 0x01, 0x90, 0x01, 0x90, // Both wheels at 400
            145, 0, 0, 0, 0,
            142, 2,
        ]
    );
}

#[test]
fn test_zero_speed_motion_is_rejected() {
    let (mut create, mock) = connected_driver(500);

    assert!(matches!(
        create.turn(90, 0),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        create.move_distance(100, 0),
        Err(Error::InvalidParameter(_))
    ));
    assert!(mock.get_written().is_empty());
}

// ============================================================================
// Exchange-lock atomicity
// ============================================================================

#[test]
fn test_exchanges_do_not_interleave_across_threads() {
    let link = SerialLink::new();
    let mock = MockTransport::new();
    link.attach(Box::new(mock.clone()));

    const ROUNDS: usize = 25;
    let patterns: [[u8; 4]; 2] = [[0xA1, 0xA2, 0xA3, 0xA4], [0xB1, 0xB2, 0xB3, 0xB4]];

    let mut handles = Vec::new();
    for pattern in patterns {
        let link = link.clone();
        let mock = mock.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..ROUNDS {
                let mut guard = link.lock();
                // Byte-at-a-time with yields: any hole in the lock would
                // shuffle these on the wire
                for byte in pattern {
                    guard.write(&[byte]).unwrap();
                    thread::sleep(Duration::from_micros(100));
                }
                // Finish the exchange with a read while still holding the line
                mock.inject_read(&pattern[..2]);
                let mut reply = [0u8; 2];
                guard.blocking_read(&mut reply, None).unwrap();
                assert_eq!(reply, [pattern[0], pattern[1]]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let written = mock.get_written();
    assert_eq!(written.len(), ROUNDS * 2 * 4);

    let mut counts = [0usize; 2];
    for chunk in written.chunks_exact(4) {
        match patterns.iter().position(|p| p.as_slice() == chunk) {
            Some(i) => counts[i] += 1,
            None => panic!("interleaved exchange on the wire: {:02X?}", chunk),
        }
    }
    assert_eq!(counts, [ROUNDS, ROUNDS]);
}
