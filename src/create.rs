//! Create driver: connection lifecycle, motion, and cached sensor access

use crate::config::CreateConfig;
use crate::error::{Error, Result};
use crate::link::SerialLink;
use crate::protocol::constants::*;
use crate::protocol::{Packet1, Packet2, Packet3, Packet4, Packet5, PacketGroup};
use crate::script::CreateScript;
use crate::sensors::{self, Sensor};
use crate::state::{CreateState, Snapshot};
use crate::transport::Transport;

use std::thread;
use std::time::{Duration, Instant};

/// Open Interface mode the driver believes the robot is in
///
/// Transitions happen only when a mode command is issued; the tracked value
/// is never inferred from sensor data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Off,
    Passive,
    Safe,
    Full,
}

/// Driver for an iRobot Create over its serial Open Interface
///
/// Owns the serial link, the cached sensor snapshot with its per-group
/// freshness stamps, and the derived motion state. Sensor accessors refresh
/// their packet group when the cache is older than the refresh rate and
/// otherwise answer from cache; a failed refresh keeps serving the previous
/// reading rather than failing the accessor.
///
/// # Examples
///
/// ## Bump-and-turn roaming
///
/// ```no_run
/// use create_io::{Create, CreateConfig};
///
/// # fn main() -> create_io::Result<()> {
/// let mut create = Create::new(CreateConfig::usb_defaults());
/// create.connect()?;
/// create.set_safe_mode()?;
///
/// loop {
///     create.drive_straight(200)?;
///     if create.bump_left() || create.bump_right() {
///         create.stop()?;
///         create.turn(120, 150)?;
///     }
/// }
/// # }
/// ```
///
/// ## Battery monitoring
///
/// ```no_run
/// use create_io::{Create, CreateConfig};
///
/// # fn main() -> create_io::Result<()> {
/// let mut create = Create::new(CreateConfig::usb_defaults());
/// create.connect()?;
///
/// let charge = create.battery_charge();
/// let capacity = create.battery_capacity();
/// if capacity > 0 {
///     println!("Battery: {}%", charge as u32 * 100 / capacity as u32);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Create {
    /// Shared serial line with the exchange lock
    link: SerialLink,

    /// Connection parameters
    config: CreateConfig,

    /// Tracked OI mode
    mode: Mode,

    /// Cache lifetime for sensor packet groups
    refresh_rate: Duration,

    /// Propagate refresh failures from packet accessors
    strict_refresh: bool,

    /// Cached packets and derived state
    snapshot: Snapshot,

    /// Per-group fetch stamps, `None` until first fetch
    stamps: [Option<Instant>; 5],

    /// Staged-but-unsent command bytes
    script: CreateScript,
}

impl Create {
    // === Constructors ===

    /// Create an unconnected driver
    pub fn new(config: CreateConfig) -> Self {
        let refresh_rate = Duration::from_millis(config.refresh_rate_ms);
        let strict_refresh = config.strict_refresh;
        Self {
            link: SerialLink::new(),
            config,
            mode: Mode::Off,
            refresh_rate,
            strict_refresh,
            snapshot: Snapshot::new(),
            stamps: [None; 5],
            script: CreateScript::new(),
        }
    }

    // === Connection ===

    /// Open the serial port and start the Open Interface
    ///
    /// Opens the configured device at the configured baud code, issues the
    /// OI Start command, and tracks Passive mode. On any failure the link is
    /// closed again and the mode stays Off; nothing is retried.
    pub fn connect(&mut self) -> Result<()> {
        if self.link.is_open() {
            return Ok(());
        }

        let code = self.config.baud_code;
        let rate = baud_rate_for(code).ok_or(Error::UnsupportedBaud(code))?;
        log::info!("Create: Connecting to {} at {} baud", self.config.device, rate);

        self.link.open(&self.config.device, rate)?;
        self.start_open_interface()
    }

    /// Start the Open Interface over an already-open transport
    ///
    /// Runs the same start sequence as [`Create::connect`]; tests attach a
    /// [`MockTransport`](crate::transport::MockTransport) here.
    pub fn connect_with(&mut self, transport: Box<dyn Transport>) -> Result<()> {
        self.link.attach(transport);
        self.start_open_interface()
    }

    fn start_open_interface(&mut self) -> Result<()> {
        let started = self.link.lock().write_byte(OP_START);
        if let Err(e) = started {
            self.link.close();
            self.mode = Mode::Off;
            return Err(Error::ConnectionFailed(e.to_string()));
        }

        self.mode = Mode::Passive;
        log::info!("Create: Connected, OI started (passive mode)");
        Ok(())
    }

    /// Stop streaming, close the link, and track Off
    ///
    /// Safe to call at any time; a second call is a no-op.
    pub fn disconnect(&mut self) {
        if self.link.is_open() {
            // Best effort: the robot may already be unplugged
            let _ = self.link.lock().write(&[OP_PAUSE_RESUME_STREAM, 0]);
            self.link.close();
            log::info!("Create: Disconnected");
        }
        self.mode = Mode::Off;
    }

    /// Whether the link is open
    pub fn is_connected(&self) -> bool {
        self.link.is_open()
    }

    /// Shared handle to the serial line, for raw guarded exchanges
    pub fn link(&self) -> &SerialLink {
        &self.link
    }

    // === Mode control ===

    /// Tracked OI mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Enter Passive mode (issues OI Start)
    pub fn set_passive_mode(&mut self) -> Result<()> {
        self.write_mode_opcode(OP_START, Mode::Passive)
    }

    /// Enter Safe mode
    pub fn set_safe_mode(&mut self) -> Result<()> {
        self.write_mode_opcode(OP_SAFE, Mode::Safe)
    }

    /// Enter Full mode
    pub fn set_full_mode(&mut self) -> Result<()> {
        self.write_mode_opcode(OP_FULL, Mode::Full)
    }

    /// Switch to the given mode; `Mode::Off` disconnects
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        match mode {
            Mode::Off => {
                self.disconnect();
                Ok(())
            }
            Mode::Passive => self.set_passive_mode(),
            Mode::Safe => self.set_safe_mode(),
            Mode::Full => self.set_full_mode(),
        }
    }

    fn write_mode_opcode(&mut self, opcode: u8, mode: Mode) -> Result<()> {
        self.link.lock().write_byte(opcode)?;
        self.mode = mode;
        log::debug!("Create: Mode set to {:?}", mode);
        Ok(())
    }

    /// Change the line rate on both ends
    ///
    /// Writes the OI Baud command, waits the settle time the OI requires,
    /// then retunes the local line. The code must be in the 0..=11 table.
    pub fn set_baud_rate(&mut self, code: u8) -> Result<()> {
        baud_rate_for(code).ok_or(Error::UnsupportedBaud(code))?;

        let mut guard = self.link.lock();
        guard.write(&[OP_BAUD, code])?;
        thread::sleep(Duration::from_millis(BAUD_SETTLE_MS));
        guard.set_baud_rate(code)?;
        drop(guard);

        log::info!("Create: Baud code changed to {}", code);
        Ok(())
    }

    // === Script dispatch ===

    /// Write a script's bytes to the robot in one guarded call
    ///
    /// The whole buffer goes out under the exchange lock, so another
    /// thread's traffic cannot split a multi-command sequence.
    pub fn send(&mut self, script: &CreateScript) -> Result<()> {
        if script.is_empty() {
            return Ok(());
        }
        self.link.lock().write(script.data())?;
        log::debug!("Create: Sent {} byte script", script.size());
        Ok(())
    }

    /// Append a script to the staged buffer without sending
    pub fn stage(&mut self, script: &CreateScript) {
        self.script.append_script(script);
    }

    /// The staged-but-unsent bytes
    pub fn staged(&self) -> &CreateScript {
        &self.script
    }

    /// Send the staged buffer, clearing it on success
    ///
    /// On failure the staged bytes remain for the caller to retry or
    /// [`flush`](Create::flush).
    pub fn send_staged(&mut self) -> Result<()> {
        if self.script.is_empty() {
            return Ok(());
        }
        self.link.lock().write(self.script.data())?;
        log::debug!("Create: Sent {} staged bytes", self.script.size());
        self.script.clear();
        Ok(())
    }

    /// Discard staged-but-unsent bytes without sending them
    pub fn flush(&mut self) {
        if !self.script.is_empty() {
            log::debug!("Create: Discarding {} staged bytes", self.script.size());
            self.script.clear();
        }
    }

    // === Motion ===

    /// Drive along an arc
    ///
    /// # Arguments
    /// * `velocity` - Center velocity in mm/s, -500..=500
    /// * `radius` - Turn radius in mm, positive left; see the special
    ///   radii in [`protocol::constants`](crate::protocol::constants)
    pub fn drive(&mut self, velocity: i16, radius: i16) -> Result<()> {
        let mut frame = [OP_DRIVE, 0, 0, 0, 0];
        frame[1..3].copy_from_slice(&velocity.to_be_bytes());
        frame[3..5].copy_from_slice(&radius.to_be_bytes());
        self.link.lock().write(&frame)?;

        self.snapshot.state.record_command(velocity, velocity, radius);
        log::debug!("Create: drive velocity={} radius={}", velocity, radius);
        Ok(())
    }

    /// Drive the wheels independently
    ///
    /// # Arguments
    /// * `left` - Left wheel velocity in mm/s, -500..=500
    /// * `right` - Right wheel velocity in mm/s, -500..=500
    pub fn drive_direct(&mut self, left: i16, right: i16) -> Result<()> {
        // The OI wants the right wheel first
        let mut frame = [OP_DRIVE_DIRECT, 0, 0, 0, 0];
        frame[1..3].copy_from_slice(&right.to_be_bytes());
        frame[3..5].copy_from_slice(&left.to_be_bytes());
        self.link.lock().write(&frame)?;

        self.snapshot.state.record_command(left, right, RADIUS_STRAIGHT);
        log::debug!("Create: drive_direct left={} right={}", left, right);
        Ok(())
    }

    /// Drive both wheels at the same velocity
    pub fn drive_straight(&mut self, speed: i16) -> Result<()> {
        self.drive_direct(speed, speed)
    }

    /// Rotate in place, positive speed counter-clockwise (non-blocking)
    pub fn spin(&mut self, speed: i16) -> Result<()> {
        self.drive_direct(speed.saturating_neg(), speed)
    }

    /// Rotate clockwise in place (non-blocking)
    pub fn spin_clockwise(&mut self, speed: i16) -> Result<()> {
        self.spin(speed.saturating_neg())
    }

    /// Rotate counter-clockwise in place (non-blocking)
    pub fn spin_counter_clockwise(&mut self, speed: i16) -> Result<()> {
        self.spin(speed)
    }

    /// Wheel velocity differential from the last commands, positive
    /// counter-clockwise; commanded, not measured
    pub fn angular_velocity(&self) -> i16 {
        let state = &self.snapshot.state;
        state.right_velocity.saturating_sub(state.left_velocity)
    }

    /// Discard staged bytes, then command zero velocity
    pub fn stop(&mut self) -> Result<()> {
        self.flush();
        self.drive_direct(0, 0)
    }

    /// Turn in place by an angle, blocking until done
    ///
    /// Spins at `speed`, sleeps for the time the turn should take at that
    /// wheel speed, then stops. Open-loop on purpose: the onboard angle
    /// deltas are too coarse to close the loop on, so the host times the
    /// turn instead. Packet 2 is force-updated on both edges to keep the
    /// accumulators from overflowing on the robot.
    ///
    /// # Arguments
    /// * `angle` - Degrees, positive counter-clockwise
    /// * `speed` - Wheel speed in mm/s, 1..=500
    pub fn turn(&mut self, angle: i16, speed: u16) -> Result<()> {
        let speed = checked_speed(speed)?;
        let duration = turn_duration(angle, speed);

        let _ = self.update_packet(PacketGroup::Two, true);
        self.spin(if angle >= 0 { speed } else { -speed })?;
        log::info!("Create: Turning {}° at {} mm/s (~{:?})", angle, speed, duration);
        thread::sleep(duration);
        self.stop()?;
        let _ = self.update_packet(PacketGroup::Two, true);
        Ok(())
    }

    /// Drive straight a given distance, blocking until done
    ///
    /// Same open-loop pattern as [`Create::turn`]: command, timed sleep,
    /// stop.
    ///
    /// # Arguments
    /// * `millimeters` - Distance, negative drives backward
    /// * `speed` - Wheel speed in mm/s, 1..=500
    pub fn move_distance(&mut self, millimeters: i16, speed: u16) -> Result<()> {
        let speed = checked_speed(speed)?;
        let duration = travel_duration(millimeters, speed);

        let _ = self.update_packet(PacketGroup::Two, true);
        self.drive_straight(if millimeters >= 0 { speed } else { -speed })?;
        log::info!(
            "Create: Moving {} mm at {} mm/s (~{:?})",
            millimeters,
            speed,
            duration
        );
        thread::sleep(duration);
        self.stop()?;
        let _ = self.update_packet(PacketGroup::Two, true);
        Ok(())
    }

    // === LEDs ===

    /// Set the Advance and Play LEDs and the Power LED color
    ///
    /// # Arguments
    /// * `advance` / `play` - On/off state of the two green LEDs
    /// * `color` - Power LED color, 0 green through 255 red
    /// * `brightness` - Power LED intensity, 0 off through 255 full
    pub fn set_leds(&mut self, advance: bool, play: bool, color: u8, brightness: u8) -> Result<()> {
        let mut bits = 0u8;
        if advance {
            bits |= LED_ADVANCE;
        }
        if play {
            bits |= LED_PLAY;
        }
        self.link.lock().write(&[OP_LEDS, bits, color, brightness])
    }

    // === Sensor refresh ===

    /// Cache lifetime in milliseconds
    pub fn refresh_rate(&self) -> u64 {
        self.config.refresh_rate_ms
    }

    /// Set the cache lifetime in milliseconds
    ///
    /// Zero makes every sensor access refetch. No lower bound is enforced;
    /// very small values put constant request traffic on the line.
    pub fn set_refresh_rate(&mut self, milliseconds: u64) {
        self.config.refresh_rate_ms = milliseconds;
        self.refresh_rate = Duration::from_millis(milliseconds);
    }

    /// Whether a group's cache is older than the refresh rate
    fn needs_refresh(&self, group: PacketGroup) -> bool {
        match self.stamps[group.index()] {
            Some(stamp) => stamp.elapsed() > self.refresh_rate,
            None => true,
        }
    }

    /// Fetch a packet group if its cache is stale (or `force` is set)
    ///
    /// Returns whether a fetch was attempted-and-succeeded. A failed fetch
    /// leaves the cached packet and its stamp untouched, so the stale data
    /// keeps serving and the next access retries.
    pub fn update_packet(&mut self, group: PacketGroup, force: bool) -> Result<bool> {
        if !force && !self.needs_refresh(group) {
            return Ok(false);
        }

        match self.fetch_packet(group) {
            Ok(()) => {
                self.stamps[group.index()] = Some(Instant::now());
                Ok(true)
            }
            Err(e) => {
                log::warn!(
                    "Create: {:?} packet refresh failed ({}), serving cached data",
                    group,
                    e
                );
                Err(e)
            }
        }
    }

    /// Refresh the derived motion state (consumes packet 2 per policy)
    pub fn update_state(&mut self) -> Result<bool> {
        self.update_packet(PacketGroup::Two, false)
    }

    fn fetch_packet(&mut self, group: PacketGroup) -> Result<()> {
        match group {
            PacketGroup::One => {
                let mut buf = [0u8; Packet1::SIZE];
                self.exchange(group, &mut buf)?;
                self.snapshot.packet1 = Packet1::decode(&buf);
            }
            PacketGroup::Two => {
                let mut buf = [0u8; Packet2::SIZE];
                self.exchange(group, &mut buf)?;
                let packet = Packet2::decode(&buf);
                // The robot clears its accumulators on read; fold the deltas
                // into the running totals before they are lost
                self.snapshot.state.accumulate(packet.distance, packet.angle);
                self.snapshot.packet2 = packet;
            }
            PacketGroup::Three => {
                let mut buf = [0u8; Packet3::SIZE];
                self.exchange(group, &mut buf)?;
                self.snapshot.packet3 = Packet3::decode(&buf);
            }
            PacketGroup::Four => {
                let mut buf = [0u8; Packet4::SIZE];
                self.exchange(group, &mut buf)?;
                self.snapshot.packet4 = Packet4::decode(&buf);
            }
            PacketGroup::Five => {
                let mut buf = [0u8; Packet5::SIZE];
                self.exchange(group, &mut buf)?;
                self.snapshot.packet5 = Packet5::decode(&buf);
            }
        }
        Ok(())
    }

    /// Request-and-read one packet group under a single lock acquisition
    fn exchange(&mut self, group: PacketGroup, buf: &mut [u8]) -> Result<()> {
        let mut guard = self.link.lock();
        guard.write(&[OP_SENSORS, group.request_id()])?;
        guard.blocking_read(buf, None)
    }

    /// Policy-gated refresh for the packet accessors
    fn refresh(&mut self, group: PacketGroup) -> Result<()> {
        match self.update_packet(group, false) {
            Ok(_) => Ok(()),
            Err(e) if self.strict_refresh => Err(e),
            Err(_) => Ok(()), // Stale cache keeps serving; already logged
        }
    }

    // === Packet accessors ===

    /// Bumper, wheel drop, cliff, and wall packet, refreshed per policy
    pub fn sensor_packet1(&mut self) -> Result<&Packet1> {
        self.refresh(PacketGroup::One)?;
        Ok(&self.snapshot.packet1)
    }

    /// Button, IR, and odometry-delta packet, refreshed per policy
    pub fn sensor_packet2(&mut self) -> Result<&Packet2> {
        self.refresh(PacketGroup::Two)?;
        Ok(&self.snapshot.packet2)
    }

    /// Battery telemetry packet, refreshed per policy
    pub fn sensor_packet3(&mut self) -> Result<&Packet3> {
        self.refresh(PacketGroup::Three)?;
        Ok(&self.snapshot.packet3)
    }

    /// Signal-strength packet, refreshed per policy
    pub fn sensor_packet4(&mut self) -> Result<&Packet4> {
        self.refresh(PacketGroup::Four)?;
        Ok(&self.snapshot.packet4)
    }

    /// Mode and requested-velocity packet, refreshed per policy
    pub fn sensor_packet5(&mut self) -> Result<&Packet5> {
        self.refresh(PacketGroup::Five)?;
        Ok(&self.snapshot.packet5)
    }

    /// Derived motion state, refreshed per policy
    pub fn state(&mut self) -> Result<&CreateState> {
        self.refresh(PacketGroup::Two)?;
        Ok(&self.snapshot.state)
    }

    /// The cached snapshot as-is, no refresh
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Reset the accumulated travel distance
    pub fn set_distance(&mut self, millimeters: i32) {
        self.snapshot.state.distance = millimeters;
    }

    /// Reset the accumulated rotation angle
    pub fn set_angle(&mut self, degrees: i32) {
        self.snapshot.state.angle = degrees;
    }

    // === Typed sensor reads ===

    /// Refresh a sensor's packet group per policy, then read it
    ///
    /// Always returns a reading; if the refresh fails the previous cached
    /// value answers.
    pub fn read<T>(&mut self, sensor: Sensor<T>) -> T {
        let _ = self.update_packet(sensor.group(), false);
        sensor.value(&self.snapshot)
    }

    // === Sensor accessors ===

    pub fn play_button(&mut self) -> bool {
        self.read(sensors::PLAY_BUTTON)
    }

    pub fn advance_button(&mut self) -> bool {
        self.read(sensors::ADVANCE_BUTTON)
    }

    pub fn wall(&mut self) -> bool {
        self.read(sensors::WALL)
    }

    pub fn bump_left(&mut self) -> bool {
        self.read(sensors::BUMP_LEFT)
    }

    pub fn bump_right(&mut self) -> bool {
        self.read(sensors::BUMP_RIGHT)
    }

    pub fn wheel_drop_left(&mut self) -> bool {
        self.read(sensors::WHEEL_DROP_LEFT)
    }

    pub fn wheel_drop_right(&mut self) -> bool {
        self.read(sensors::WHEEL_DROP_RIGHT)
    }

    pub fn wheel_drop_caster(&mut self) -> bool {
        self.read(sensors::WHEEL_DROP_CASTER)
    }

    pub fn cliff_left(&mut self) -> bool {
        self.read(sensors::CLIFF_LEFT)
    }

    pub fn cliff_front_left(&mut self) -> bool {
        self.read(sensors::CLIFF_FRONT_LEFT)
    }

    pub fn cliff_front_right(&mut self) -> bool {
        self.read(sensors::CLIFF_FRONT_RIGHT)
    }

    pub fn cliff_right(&mut self) -> bool {
        self.read(sensors::CLIFF_RIGHT)
    }

    pub fn virtual_wall(&mut self) -> bool {
        self.read(sensors::VIRTUAL_WALL)
    }

    pub fn ir(&mut self) -> u8 {
        self.read(sensors::IR)
    }

    /// Accumulated travel in mm since connect (or [`Create::set_distance`])
    pub fn distance(&mut self) -> i32 {
        self.read(sensors::DISTANCE)
    }

    /// Accumulated rotation in degrees since connect (or [`Create::set_angle`])
    pub fn angle(&mut self) -> i32 {
        self.read(sensors::ANGLE)
    }

    pub fn charging_state(&mut self) -> u8 {
        self.read(sensors::CHARGING_STATE)
    }

    /// Robot battery voltage in mV
    pub fn battery_voltage(&mut self) -> u16 {
        self.read(sensors::BATTERY_VOLTAGE)
    }

    /// Robot battery current in mA, negative while discharging
    pub fn battery_current(&mut self) -> i16 {
        self.read(sensors::BATTERY_CURRENT)
    }

    pub fn battery_temperature(&mut self) -> i8 {
        self.read(sensors::BATTERY_TEMPERATURE)
    }

    pub fn battery_charge(&mut self) -> u16 {
        self.read(sensors::BATTERY_CHARGE)
    }

    pub fn battery_capacity(&mut self) -> u16 {
        self.read(sensors::BATTERY_CAPACITY)
    }

    pub fn wall_signal(&mut self) -> u16 {
        self.read(sensors::WALL_SIGNAL)
    }

    pub fn cliff_left_signal(&mut self) -> u16 {
        self.read(sensors::CLIFF_LEFT_SIGNAL)
    }

    pub fn cliff_front_left_signal(&mut self) -> u16 {
        self.read(sensors::CLIFF_FRONT_LEFT_SIGNAL)
    }

    pub fn cliff_front_right_signal(&mut self) -> u16 {
        self.read(sensors::CLIFF_FRONT_RIGHT_SIGNAL)
    }

    pub fn cliff_right_signal(&mut self) -> u16 {
        self.read(sensors::CLIFF_RIGHT_SIGNAL)
    }

    pub fn cargo_bay_digital_inputs(&mut self) -> u8 {
        self.read(sensors::CARGO_BAY_DIGITAL_INPUTS)
    }

    pub fn user_analog_input(&mut self) -> u16 {
        self.read(sensors::USER_ANALOG_INPUT)
    }
}

impl Drop for Create {
    fn drop(&mut self) {
        if self.link.is_open() {
            log::info!("Create: Shutting down");
            if let Err(e) = self.stop() {
                log::error!("Create: Failed to stop motors: {}", e);
            }
            self.disconnect();
        }
    }
}

/// Clamp a commanded speed into the OI drive range, rejecting zero
fn checked_speed(speed: u16) -> Result<i16> {
    if speed == 0 {
        return Err(Error::InvalidParameter(
            "speed must be at least 1 mm/s".to_string(),
        ));
    }
    Ok(speed.min(VELOCITY_MAX_MM_S as u16) as i16)
}

/// Time to rotate `angle` degrees in place at wheel speed `speed`
///
/// Each wheel traces an arc of radius half the axle length, so the arc
/// length per wheel is `deg2rad(angle) * axle / 2`.
fn turn_duration(angle: i16, speed: i16) -> Duration {
    let arc_mm = (angle.unsigned_abs() as f64).to_radians() * AXLE_LENGTH_MM / 2.0;
    Duration::from_secs_f64(arc_mm / speed as f64)
}

/// Time to travel `millimeters` straight at `speed`
fn travel_duration(millimeters: i16, speed: i16) -> Duration {
    Duration::from_secs_f64(millimeters.unsigned_abs() as f64 / speed as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_duration_formula() {
        // 90° at 100 mm/s: 1.5708 rad * 129 mm / 100 mm/s
        let d = turn_duration(90, 100);
        assert!((d.as_secs_f64() - 2.0263).abs() < 0.01);
        // Direction does not change the magnitude
        assert_eq!(turn_duration(-90, 100), d);
    }

    #[test]
    fn test_travel_duration_formula() {
        assert_eq!(travel_duration(500, 250), Duration::from_secs(2));
        assert_eq!(travel_duration(-500, 250), Duration::from_secs(2));
    }

    #[test]
    fn test_checked_speed() {
        assert!(checked_speed(0).is_err());
        assert_eq!(checked_speed(200).unwrap(), 200);
        // Values past the OI range clamp instead of wrapping negative
        assert_eq!(checked_speed(40_000).unwrap(), VELOCITY_MAX_MM_S);
    }

    #[test]
    fn test_stage_and_flush_without_connection() {
        let mut create = Create::new(CreateConfig::usb_defaults());
        create.stage(&CreateScript::from_bytes(&[139, 0, 0, 255]));
        assert_eq!(create.staged().size(), 4);

        create.flush();
        assert!(create.staged().is_empty());
    }

    #[test]
    fn test_new_driver_is_off() {
        let create = Create::new(CreateConfig::usb_defaults());
        assert_eq!(create.mode(), Mode::Off);
        assert!(!create.is_connected());
        assert_eq!(create.refresh_rate(), 10);
    }

    #[test]
    fn test_refresh_rate_round_trips_exactly() {
        let mut create = Create::new(CreateConfig::usb_defaults());
        assert_eq!(create.refresh_rate(), 10);

        create.set_refresh_rate(250);
        assert_eq!(create.refresh_rate(), 250);

        // The full u64 range reports back without narrowing
        create.set_refresh_rate(u64::MAX);
        assert_eq!(create.refresh_rate(), u64::MAX);

        create.set_refresh_rate(0);
        assert_eq!(create.refresh_rate(), 0);
    }
}
