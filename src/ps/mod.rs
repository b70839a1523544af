//! Program stream packet framing.
//!
//! # References
//!
//! - [MPEG program stream](https://en.wikipedia.org/wiki/MPEG_program_stream)
pub use self::packet::PsPacket;
pub use self::reader::{PsPacketReader, ReadPsPacket};

mod packet;
mod reader;
