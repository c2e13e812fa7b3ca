//! Open Interface wire protocol: opcodes, baud codes, and sensor packets

pub mod constants;

mod packets;
pub use packets::{Packet1, Packet2, Packet3, Packet4, Packet5, PacketGroup};
