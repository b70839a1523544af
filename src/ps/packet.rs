use crate::es::StreamId;

/// A raw program stream packet, starting with `00 00 01 <stream_id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsPacket {
    /// Start code of the packet.
    pub stream_id: StreamId,

    /// Packet bytes, including the start code prefix.
    pub bytes: Vec<u8>,
}
