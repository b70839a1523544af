//! Packetized elementary stream.
//!
//! # References
//!
//! - [Packetized elementary stream](https://en.wikipedia.org/wiki/Packetized_elementary_stream)
//! - [System header](http://stnsoft.com/DVD/sys_hdr.html)
pub use self::decoder::PesPacketDecoder;
pub use self::packet::{mpeg_version_name, PesPacket, SubstreamPacket};
pub use self::reader::{PesPacketReader, ReadPesPacket};

mod decoder;
mod extension;
mod pack;
mod packet;
mod reader;
mod sequence;
mod system;
