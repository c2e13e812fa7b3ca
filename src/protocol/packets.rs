//! Sensor packet groups 1-5: wire layout and decode
//!
//! Each group is a fixed-size response to `[OP_SENSORS, id]`. Fields appear
//! in wire order; multi-byte values arrive big-endian, high byte first.

/// Identifies one of the five cached sensor packet groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketGroup {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl PacketGroup {
    /// All groups, in request-id order
    pub const ALL: [PacketGroup; 5] = [
        PacketGroup::One,
        PacketGroup::Two,
        PacketGroup::Three,
        PacketGroup::Four,
        PacketGroup::Five,
    ];

    /// Packet id byte sent after `OP_SENSORS`
    pub fn request_id(self) -> u8 {
        match self {
            PacketGroup::One => 1,
            PacketGroup::Two => 2,
            PacketGroup::Three => 3,
            PacketGroup::Four => 4,
            PacketGroup::Five => 5,
        }
    }

    /// Response size in bytes
    pub fn size(self) -> usize {
        match self {
            PacketGroup::One => Packet1::SIZE,
            PacketGroup::Two => Packet2::SIZE,
            PacketGroup::Three => Packet3::SIZE,
            PacketGroup::Four => Packet4::SIZE,
            PacketGroup::Five => Packet5::SIZE,
        }
    }

    /// Freshness stamp slot for this group
    pub(crate) fn index(self) -> usize {
        match self {
            PacketGroup::One => 0,
            PacketGroup::Two => 1,
            PacketGroup::Three => 2,
            PacketGroup::Four => 3,
            PacketGroup::Five => 4,
        }
    }
}

fn be_u16(hi: u8, lo: u8) -> u16 {
    u16::from_be_bytes([hi, lo])
}

fn be_i16(hi: u8, lo: u8) -> i16 {
    i16::from_be_bytes([hi, lo])
}

/// Group 1: bumpers, wheel drops, cliffs, wall, overcurrents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packet1 {
    pub bumps_and_wheel_drops: u8,
    pub wall: u8,
    pub cliff_left: u8,
    pub cliff_front_left: u8,
    pub cliff_front_right: u8,
    pub cliff_right: u8,
    pub virtual_wall: u8,
    pub cargo_bay_digital_inputs: u8,
    pub low_side_driver_and_wheel_overcurrents: u8,
}

impl Packet1 {
    pub const SIZE: usize = 9;

    pub fn decode(b: &[u8; Self::SIZE]) -> Self {
        Self {
            bumps_and_wheel_drops: b[0],
            wall: b[1],
            cliff_left: b[2],
            cliff_front_left: b[3],
            cliff_front_right: b[4],
            cliff_right: b[5],
            virtual_wall: b[6],
            cargo_bay_digital_inputs: b[7],
            low_side_driver_and_wheel_overcurrents: b[8],
        }
    }
}

/// Group 2: IR byte, buttons, distance and angle deltas
///
/// `distance` (mm) and `angle` (degrees) are deltas since the previous read
/// of this group; the robot clears its internal accumulators on each read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packet2 {
    pub ir: u8,
    pub buttons: u8,
    pub distance: i16,
    pub angle: i16,
}

impl Packet2 {
    pub const SIZE: usize = 6;

    pub fn decode(b: &[u8; Self::SIZE]) -> Self {
        Self {
            ir: b[0],
            buttons: b[1],
            distance: be_i16(b[2], b[3]),
            angle: be_i16(b[4], b[5]),
        }
    }
}

/// Group 3: charging and battery telemetry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packet3 {
    pub charging_state: u8,
    /// Battery voltage in mV
    pub voltage: u16,
    /// Battery current in mA, negative while discharging
    pub current: i16,
    /// Battery temperature in degrees Celsius
    pub battery_temperature: i8,
    /// Remaining charge in mAh
    pub battery_charge: u16,
    /// Estimated capacity in mAh
    pub battery_capacity: u16,
}

impl Packet3 {
    pub const SIZE: usize = 10;

    pub fn decode(b: &[u8; Self::SIZE]) -> Self {
        Self {
            charging_state: b[0],
            voltage: be_u16(b[1], b[2]),
            current: be_i16(b[3], b[4]),
            battery_temperature: b[5] as i8,
            battery_charge: be_u16(b[6], b[7]),
            battery_capacity: be_u16(b[8], b[9]),
        }
    }
}

/// Group 4: raw signal strengths and cargo bay I/O
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packet4 {
    pub wall_signal: u16,
    pub cliff_left_signal: u16,
    pub cliff_front_left_signal: u16,
    pub cliff_front_right_signal: u16,
    pub cliff_right_signal: u16,
    pub user_digital_inputs: u8,
    pub user_analog_input: u16,
    pub charging_sources_available: u8,
}

impl Packet4 {
    pub const SIZE: usize = 14;

    pub fn decode(b: &[u8; Self::SIZE]) -> Self {
        Self {
            wall_signal: be_u16(b[0], b[1]),
            cliff_left_signal: be_u16(b[2], b[3]),
            cliff_front_left_signal: be_u16(b[4], b[5]),
            cliff_front_right_signal: be_u16(b[6], b[7]),
            cliff_right_signal: be_u16(b[8], b[9]),
            user_digital_inputs: b[10],
            user_analog_input: be_u16(b[11], b[12]),
            charging_sources_available: b[13],
        }
    }
}

/// Group 5: OI mode, song state, and requested velocities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packet5 {
    pub mode: u8,
    pub song_number: u8,
    pub song_playing: u8,
    pub number_of_stream_packets: u8,
    pub velocity: i16,
    pub radius: i16,
    pub right_velocity: i16,
    pub left_velocity: i16,
}

impl Packet5 {
    pub const SIZE: usize = 12;

    pub fn decode(b: &[u8; Self::SIZE]) -> Self {
        Self {
            mode: b[0],
            song_number: b[1],
            song_playing: b[2],
            number_of_stream_packets: b[3],
            velocity: be_i16(b[4], b[5]),
            radius: be_i16(b[6], b[7]),
            right_velocity: be_i16(b[8], b[9]),
            left_velocity: be_i16(b[10], b[11]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_pair_decode() {
        // High byte first: 0x01 0x2C is 300
        let p = Packet2::decode(&[0, 0, 0x01, 0x2C, 0x00, 0x00]);
        assert_eq!(p.distance, 300);
    }

    #[test]
    fn test_negative_delta_decode() {
        // 0xFF 0x38 is -200 as a signed 16-bit value
        let p = Packet2::decode(&[0, 0, 0xFF, 0x38, 0xFF, 0xFF]);
        assert_eq!(p.distance, -200);
        assert_eq!(p.angle, -1);
    }

    #[test]
    fn test_packet1_field_order() {
        let p = Packet1::decode(&[0x1F, 1, 0, 1, 0, 1, 0, 0xAA, 0x03]);
        assert_eq!(p.bumps_and_wheel_drops, 0x1F);
        assert_eq!(p.wall, 1);
        assert_eq!(p.cliff_left, 0);
        assert_eq!(p.cliff_front_left, 1);
        assert_eq!(p.cliff_right, 1);
        assert_eq!(p.cargo_bay_digital_inputs, 0xAA);
        assert_eq!(p.low_side_driver_and_wheel_overcurrents, 0x03);
    }

    #[test]
    fn test_packet3_battery_fields() {
        // 16.8V pack at -432mA, 24C, 2075/2700 mAh
        let p = Packet3::decode(&[2, 0x41, 0xA0, 0xFE, 0x50, 24, 0x08, 0x1B, 0x0A, 0x8C]);
        assert_eq!(p.charging_state, 2);
        assert_eq!(p.voltage, 16800);
        assert_eq!(p.current, -432);
        assert_eq!(p.battery_temperature, 24);
        assert_eq!(p.battery_charge, 2075);
        assert_eq!(p.battery_capacity, 2700);
    }

    #[test]
    fn test_packet5_velocities() {
        let p = Packet5::decode(&[3, 0, 0, 0, 0x00, 0xC8, 0x80, 0x00, 0x00, 0x64, 0xFF, 0x9C]);
        assert_eq!(p.mode, 3);
        assert_eq!(p.velocity, 200);
        assert_eq!(p.radius, i16::MIN);
        assert_eq!(p.right_velocity, 100);
        assert_eq!(p.left_velocity, -100);
    }

    #[test]
    fn test_group_sizes() {
        assert_eq!(PacketGroup::One.size(), 9);
        assert_eq!(PacketGroup::Two.size(), 6);
        assert_eq!(PacketGroup::Three.size(), 10);
        assert_eq!(PacketGroup::Four.size(), 14);
        assert_eq!(PacketGroup::Five.size(), 12);
    }
}
