use crate::es::StreamId;
use crate::field::{self, Field};
use crate::time::Timestamp;

/// A decoded program stream packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PesPacket {
    /// Start code following the `0x000001` prefix.
    pub stream_id: StreamId,

    /// Decoded fields, starting with `prefix` and `start_code`.
    pub fields: Vec<Field>,

    /// Sub-stream carried by a private stream 1 packet.
    pub substream: Option<SubstreamPacket>,

    /// Number of bits consumed from the input.
    pub bit_len: u64,
}
impl PesPacket {
    /// Returns the field at `path` (e.g., `"extension/pts_dts/pts"`).
    pub fn field(&self, path: &str) -> Option<&Field> {
        field::find_path(&self.fields, path)
    }

    /// Returns the system clock reference base of a pack header.
    pub fn scr(&self) -> Option<Timestamp> {
        self.timestamp("scr")
    }

    /// Returns the presentation timestamp.
    pub fn pts(&self) -> Option<Timestamp> {
        self.timestamp("extension/pts_dts/pts")
    }

    /// Returns the decoding timestamp.
    pub fn dts(&self) -> Option<Timestamp> {
        self.timestamp("extension/pts_dts/dts")
    }

    fn timestamp(&self, path: &str) -> Option<Timestamp> {
        self.field(path)
            .and_then(Field::as_u64)
            .and_then(|n| Timestamp::new(n).ok())
    }
}

/// Payload of a private stream 1 packet, tagged with its sub-stream number.
///
/// The number identifies the downstream codec stream (e.g., `0x80..=0x87` for AC-3 on DVDs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstreamPacket {
    /// Sub-stream identifier.
    pub number: u8,

    /// Sub-stream bytes.
    pub payload: Vec<u8>,
}

/// Returns the MPEG version named by the leading marker bits of a pack header.
pub fn mpeg_version_name(value: u64) -> Option<&'static str> {
    match value {
        0b01 => Some("MPEG2"),
        0b10 => Some("MPEG1"),
        _ => None,
    }
}
