//! Typed views over the cached sensor snapshot
//!
//! One generic handle replaces a class-per-sensor design: a [`Sensor`]
//! names the packet group it depends on plus a pure read function over
//! [`Snapshot`]. Handles are `const`, carry no state, and never touch the
//! wire; [`Create::read`](crate::Create::read) refreshes the group first and
//! then applies the read.

use crate::protocol::PacketGroup;
use crate::protocol::constants as oi;
use crate::state::Snapshot;

/// A typed, read-only view of one value in the cached snapshot
#[derive(Clone, Copy)]
pub struct Sensor<T: 'static> {
    name: &'static str,
    group: PacketGroup,
    read: fn(&Snapshot) -> T,
}

impl<T> Sensor<T> {
    /// Diagnostic name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Packet group this sensor depends on
    pub fn group(&self) -> PacketGroup {
        self.group
    }

    /// Read from a snapshot, no I/O involved
    pub fn value(&self, snapshot: &Snapshot) -> T {
        (self.read)(snapshot)
    }
}

impl<T> std::fmt::Debug for Sensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensor")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish()
    }
}

// Group 1: bumpers, wheel drops, cliffs, wall

pub const BUMP_LEFT: Sensor<bool> = Sensor {
    name: "bump_left",
    group: PacketGroup::One,
    read: |s| s.packet1.bumps_and_wheel_drops & oi::BUMP_LEFT != 0,
};

pub const BUMP_RIGHT: Sensor<bool> = Sensor {
    name: "bump_right",
    group: PacketGroup::One,
    read: |s| s.packet1.bumps_and_wheel_drops & oi::BUMP_RIGHT != 0,
};

pub const WHEEL_DROP_LEFT: Sensor<bool> = Sensor {
    name: "wheel_drop_left",
    group: PacketGroup::One,
    read: |s| s.packet1.bumps_and_wheel_drops & oi::WHEEL_DROP_LEFT != 0,
};

pub const WHEEL_DROP_RIGHT: Sensor<bool> = Sensor {
    name: "wheel_drop_right",
    group: PacketGroup::One,
    read: |s| s.packet1.bumps_and_wheel_drops & oi::WHEEL_DROP_RIGHT != 0,
};

pub const WHEEL_DROP_CASTER: Sensor<bool> = Sensor {
    name: "wheel_drop_caster",
    group: PacketGroup::One,
    read: |s| s.packet1.bumps_and_wheel_drops & oi::WHEEL_DROP_CASTER != 0,
};

pub const WALL: Sensor<bool> = Sensor {
    name: "wall",
    group: PacketGroup::One,
    read: |s| s.packet1.wall != 0,
};

pub const CLIFF_LEFT: Sensor<bool> = Sensor {
    name: "cliff_left",
    group: PacketGroup::One,
    read: |s| s.packet1.cliff_left != 0,
};

pub const CLIFF_FRONT_LEFT: Sensor<bool> = Sensor {
    name: "cliff_front_left",
    group: PacketGroup::One,
    read: |s| s.packet1.cliff_front_left != 0,
};

pub const CLIFF_FRONT_RIGHT: Sensor<bool> = Sensor {
    name: "cliff_front_right",
    group: PacketGroup::One,
    read: |s| s.packet1.cliff_front_right != 0,
};

pub const CLIFF_RIGHT: Sensor<bool> = Sensor {
    name: "cliff_right",
    group: PacketGroup::One,
    read: |s| s.packet1.cliff_right != 0,
};

pub const VIRTUAL_WALL: Sensor<bool> = Sensor {
    name: "virtual_wall",
    group: PacketGroup::One,
    read: |s| s.packet1.virtual_wall != 0,
};

pub const CARGO_BAY_DIGITAL_INPUTS: Sensor<u8> = Sensor {
    name: "cargo_bay_digital_inputs",
    group: PacketGroup::One,
    read: |s| s.packet1.cargo_bay_digital_inputs,
};

pub const OVERCURRENTS: Sensor<u8> = Sensor {
    name: "overcurrents",
    group: PacketGroup::One,
    read: |s| s.packet1.low_side_driver_and_wheel_overcurrents,
};

// Group 2: buttons, IR, accumulated odometry

pub const PLAY_BUTTON: Sensor<bool> = Sensor {
    name: "play_button",
    group: PacketGroup::Two,
    read: |s| s.packet2.buttons & oi::BUTTON_PLAY != 0,
};

pub const ADVANCE_BUTTON: Sensor<bool> = Sensor {
    name: "advance_button",
    group: PacketGroup::Two,
    read: |s| s.packet2.buttons & oi::BUTTON_ADVANCE != 0,
};

pub const IR: Sensor<u8> = Sensor {
    name: "ir",
    group: PacketGroup::Two,
    read: |s| s.packet2.ir,
};

/// Host-accumulated travel in mm, not the raw per-read delta
pub const DISTANCE: Sensor<i32> = Sensor {
    name: "distance",
    group: PacketGroup::Two,
    read: |s| s.state.distance,
};

/// Host-accumulated rotation in degrees, not the raw per-read delta
pub const ANGLE: Sensor<i32> = Sensor {
    name: "angle",
    group: PacketGroup::Two,
    read: |s| s.state.angle,
};

// Group 3: battery

pub const CHARGING_STATE: Sensor<u8> = Sensor {
    name: "charging_state",
    group: PacketGroup::Three,
    read: |s| s.packet3.charging_state,
};

pub const BATTERY_VOLTAGE: Sensor<u16> = Sensor {
    name: "battery_voltage",
    group: PacketGroup::Three,
    read: |s| s.packet3.voltage,
};

pub const BATTERY_CURRENT: Sensor<i16> = Sensor {
    name: "battery_current",
    group: PacketGroup::Three,
    read: |s| s.packet3.current,
};

pub const BATTERY_TEMPERATURE: Sensor<i8> = Sensor {
    name: "battery_temperature",
    group: PacketGroup::Three,
    read: |s| s.packet3.battery_temperature,
};

pub const BATTERY_CHARGE: Sensor<u16> = Sensor {
    name: "battery_charge",
    group: PacketGroup::Three,
    read: |s| s.packet3.battery_charge,
};

pub const BATTERY_CAPACITY: Sensor<u16> = Sensor {
    name: "battery_capacity",
    group: PacketGroup::Three,
    read: |s| s.packet3.battery_capacity,
};

// Group 4: raw signal strengths, cargo bay analog input

pub const WALL_SIGNAL: Sensor<u16> = Sensor {
    name: "wall_signal",
    group: PacketGroup::Four,
    read: |s| s.packet4.wall_signal,
};

pub const CLIFF_LEFT_SIGNAL: Sensor<u16> = Sensor {
    name: "cliff_left_signal",
    group: PacketGroup::Four,
    read: |s| s.packet4.cliff_left_signal,
};

pub const CLIFF_FRONT_LEFT_SIGNAL: Sensor<u16> = Sensor {
    name: "cliff_front_left_signal",
    group: PacketGroup::Four,
    read: |s| s.packet4.cliff_front_left_signal,
};

pub const CLIFF_FRONT_RIGHT_SIGNAL: Sensor<u16> = Sensor {
    name: "cliff_front_right_signal",
    group: PacketGroup::Four,
    read: |s| s.packet4.cliff_front_right_signal,
};

pub const CLIFF_RIGHT_SIGNAL: Sensor<u16> = Sensor {
    name: "cliff_right_signal",
    group: PacketGroup::Four,
    read: |s| s.packet4.cliff_right_signal,
};

pub const USER_DIGITAL_INPUTS: Sensor<u8> = Sensor {
    name: "user_digital_inputs",
    group: PacketGroup::Four,
    read: |s| s.packet4.user_digital_inputs,
};

pub const USER_ANALOG_INPUT: Sensor<u16> = Sensor {
    name: "user_analog_input",
    group: PacketGroup::Four,
    read: |s| s.packet4.user_analog_input,
};

pub const CHARGING_SOURCES: Sensor<u8> = Sensor {
    name: "charging_sources",
    group: PacketGroup::Four,
    read: |s| s.packet4.charging_sources_available,
};

// Group 5: OI mode, song state, requested velocities

pub const OI_MODE: Sensor<u8> = Sensor {
    name: "oi_mode",
    group: PacketGroup::Five,
    read: |s| s.packet5.mode,
};

pub const SONG_NUMBER: Sensor<u8> = Sensor {
    name: "song_number",
    group: PacketGroup::Five,
    read: |s| s.packet5.song_number,
};

pub const SONG_PLAYING: Sensor<bool> = Sensor {
    name: "song_playing",
    group: PacketGroup::Five,
    read: |s| s.packet5.song_playing != 0,
};

pub const STREAM_PACKET_COUNT: Sensor<u8> = Sensor {
    name: "stream_packet_count",
    group: PacketGroup::Five,
    read: |s| s.packet5.number_of_stream_packets,
};

pub const REQUESTED_VELOCITY: Sensor<i16> = Sensor {
    name: "requested_velocity",
    group: PacketGroup::Five,
    read: |s| s.packet5.velocity,
};

pub const REQUESTED_RADIUS: Sensor<i16> = Sensor {
    name: "requested_radius",
    group: PacketGroup::Five,
    read: |s| s.packet5.radius,
};

pub const REQUESTED_RIGHT_VELOCITY: Sensor<i16> = Sensor {
    name: "requested_right_velocity",
    group: PacketGroup::Five,
    read: |s| s.packet5.right_velocity,
};

pub const REQUESTED_LEFT_VELOCITY: Sensor<i16> = Sensor {
    name: "requested_left_velocity",
    group: PacketGroup::Five,
    read: |s| s.packet5.left_velocity,
};
