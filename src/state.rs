//! Cached sensor data and derived motion state

use crate::protocol::{Packet1, Packet2, Packet3, Packet4, Packet5};
use std::time::Instant;

/// Derived motion state accumulated on the host
///
/// The robot reports distance and angle as deltas since the previous
/// packet 2 read, so the host owns the running totals. Velocities and radius
/// are the last commanded values, not measurements.
#[derive(Debug, Clone, Copy)]
pub struct CreateState {
    /// When this state last changed
    pub timestamp: Instant,
    /// Accumulated travel in mm
    pub distance: i32,
    /// Accumulated rotation in degrees, positive counter-clockwise
    pub angle: i32,
    /// Last commanded turn radius in mm
    pub radius: i16,
    /// Last commanded left wheel velocity in mm/s
    pub left_velocity: i16,
    /// Last commanded right wheel velocity in mm/s
    pub right_velocity: i16,
}

impl CreateState {
    pub fn new() -> Self {
        Self {
            timestamp: Instant::now(),
            distance: 0,
            angle: 0,
            radius: 0,
            left_velocity: 0,
            right_velocity: 0,
        }
    }

    /// Fold one packet 2 delta pair into the accumulators
    pub(crate) fn accumulate(&mut self, delta_distance: i16, delta_angle: i16) {
        self.distance += delta_distance as i32;
        self.angle += delta_angle as i32;
        self.timestamp = Instant::now();
    }

    /// Record the wheel targets of a movement command
    pub(crate) fn record_command(&mut self, left: i16, right: i16, radius: i16) {
        self.left_velocity = left;
        self.right_velocity = right;
        self.radius = radius;
        self.timestamp = Instant::now();
    }
}

impl Default for CreateState {
    fn default() -> Self {
        Self::new()
    }
}

/// The driver's cached view of the robot
///
/// One instance lives inside [`Create`](crate::Create); typed sensors read
/// from here and never from the wire.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub state: CreateState,
    pub packet1: Packet1,
    pub packet2: Packet2,
    pub packet3: Packet3,
    pub packet4: Packet4,
    pub packet5: Packet5,
}

impl Snapshot {
    pub fn new() -> Self {
        Self {
            state: CreateState::new(),
            packet1: Packet1::default(),
            packet2: Packet2::default(),
            packet3: Packet3::default(),
            packet4: Packet4::default(),
            packet5: Packet5::default(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}
