//! Constants for the iRobot Create Open Interface

// Command opcodes
pub const OP_START: u8 = 128; // Enters Passive mode, required before any other command
pub const OP_BAUD: u8 = 129; // Followed by one baud code byte
pub const OP_CONTROL: u8 = 130; // Legacy alias for Safe
pub const OP_SAFE: u8 = 131;
pub const OP_FULL: u8 = 132;
pub const OP_SPOT: u8 = 134; // Demo: spot cover
pub const OP_COVER: u8 = 135; // Demo: cover
pub const OP_DEMO: u8 = 136; // Followed by one demo number byte
pub const OP_DRIVE: u8 = 137; // velocity(2) + radius(2), big-endian
pub const OP_LOW_SIDE_DRIVERS: u8 = 138;
pub const OP_LEDS: u8 = 139; // led bits(1) + power color(1) + power intensity(1)
pub const OP_SONG: u8 = 140;
pub const OP_PLAY_SONG: u8 = 141;
pub const OP_SENSORS: u8 = 142; // Followed by one packet id byte
pub const OP_COVER_AND_DOCK: u8 = 143;
pub const OP_PWM_LOW_SIDE_DRIVERS: u8 = 144;
pub const OP_DRIVE_DIRECT: u8 = 145; // right(2) + left(2), big-endian
pub const OP_DIGITAL_OUTPUTS: u8 = 147;
pub const OP_STREAM: u8 = 148;
pub const OP_QUERY_LIST: u8 = 149;
pub const OP_PAUSE_RESUME_STREAM: u8 = 150; // Followed by 0 (pause) or 1 (resume)
pub const OP_SCRIPT: u8 = 152; // length(1) + opcodes, stored on the robot
pub const OP_PLAY_SCRIPT: u8 = 153;
pub const OP_SHOW_SCRIPT: u8 = 154;
pub const OP_WAIT_TIME: u8 = 155;
pub const OP_WAIT_DISTANCE: u8 = 156;
pub const OP_WAIT_ANGLE: u8 = 157;
pub const OP_WAIT_EVENT: u8 = 158;

// Drive command limits and special radii
pub const VELOCITY_MAX_MM_S: i16 = 500;
pub const RADIUS_MAX_MM: i16 = 2000;
pub const RADIUS_STRAIGHT: i16 = i16::MIN; // 0x8000
pub const RADIUS_SPIN_CW: i16 = -1;
pub const RADIUS_SPIN_CCW: i16 = 1;

// LED bit masks (first payload byte of OP_LEDS)
pub const LED_ADVANCE: u8 = 0x08;
pub const LED_PLAY: u8 = 0x02;

// Buttons byte bit masks (packet group 2)
pub const BUTTON_PLAY: u8 = 0x01;
pub const BUTTON_ADVANCE: u8 = 0x04;

// Bumps-and-wheel-drops byte bit masks (packet group 1)
pub const BUMP_RIGHT: u8 = 0x01;
pub const BUMP_LEFT: u8 = 0x02;
pub const WHEEL_DROP_RIGHT: u8 = 0x04;
pub const WHEEL_DROP_LEFT: u8 = 0x08;
pub const WHEEL_DROP_CASTER: u8 = 0x10;

// Charging state values (packet group 3)
pub const CHARGE_STATE_NOT_CHARGING: u8 = 0;
pub const CHARGE_STATE_RECONDITIONING: u8 = 1;
pub const CHARGE_STATE_FULL_CHARGING: u8 = 2;
pub const CHARGE_STATE_TRICKLE_CHARGING: u8 = 3;
pub const CHARGE_STATE_WAITING: u8 = 4;
pub const CHARGE_STATE_FAULT: u8 = 5;

// IR byte value when no signal is seen
pub const IR_NONE: u8 = 255;

// Baud codes accepted by OP_BAUD, indexed by code
pub const BAUD_RATES: [u32; 12] = [
    300, 600, 1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 115200,
];
pub const BAUD_CODE_DEFAULT: u8 = 10; // 57600, the power-on rate

// Robot geometry
pub const AXLE_LENGTH_MM: f64 = 258.0; // Wheel-to-wheel distance

// Timing constants
pub const BAUD_SETTLE_MS: u64 = 100; // Required pause after a baud change
pub const TIMEOUT_PER_BYTE_MS: u64 = 7; // Blocking-read budget per expected byte
pub const DEFAULT_REFRESH_RATE_MS: u64 = 10;

/// Line rate for an OI baud code, `None` outside the 0..=11 table.
pub fn baud_rate_for(code: u8) -> Option<u32> {
    BAUD_RATES.get(code as usize).copied()
}
