use std::env;

use crate::es::{self, PacketKind, StreamId};
use crate::field::{Field, FieldReader};
use crate::ps::PsPacket;
use crate::{ErrorKind, Result};

use super::packet::{PesPacket, SubstreamPacket};
use super::{extension, pack, sequence, system};

const PS_STRICT_MARKER_BITS: &str = "PS_STRICT_MARKER_BITS";
const PACKET_START_CODE_PREFIX: [u8; 3] = [0x00, 0x00, 0x01];

/// PES packet decoder.
///
/// Decoding is a pure function of the input bytes and the decoder settings.
#[derive(Debug, Default, Clone)]
pub struct PesPacketDecoder {
    strict_markers: bool,
}
impl PesPacketDecoder {
    /// Makes a new `PesPacketDecoder` instance.
    ///
    /// Marker bits are validated if the `PS_STRICT_MARKER_BITS` environment
    /// variable is `true`.
    pub fn new() -> Self {
        let strict_markers = env::var(PS_STRICT_MARKER_BITS)
            .unwrap_or("false".into())
            .to_lowercase()
            == "true";
        PesPacketDecoder { strict_markers }
    }

    /// Enables or disables validation of marker bits and constant fields.
    pub fn with_strict_markers(mut self, strict_markers: bool) -> Self {
        self.strict_markers = strict_markers;
        self
    }

    /// Returns `true` if marker bits are validated.
    pub fn strict_markers(&self) -> bool {
        self.strict_markers
    }

    /// Decodes the packet at the start of `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> Result<PesPacket> {
        let mut fields = Vec::new();
        let (stream_id, substream, bit_len) = track!(self.decode_fields(bytes, &mut fields))?;
        Ok(PesPacket {
            stream_id,
            fields,
            substream,
            bit_len,
        })
    }

    /// Decodes the packet at the start of `bytes`, appending its fields to `fields`.
    ///
    /// If decoding fails part way, `fields` keeps what was decoded before
    /// the failure. Nothing is appended when the prefix is not `0x000001`.
    pub fn decode_into(
        &self,
        bytes: &[u8],
        fields: &mut Vec<Field>,
    ) -> Result<Option<SubstreamPacket>> {
        track!(self.decode_fields(bytes, fields)).map(|(_, substream, _)| substream)
    }

    /// Decodes a packet framed by `PsPacketReader`.
    pub fn process_ps_packet(&self, ps_packet: &PsPacket) -> Result<PesPacket> {
        track!(self.decode(&ps_packet.bytes))
    }

    fn decode_fields(
        &self,
        bytes: &[u8],
        fields: &mut Vec<Field>,
    ) -> Result<(StreamId, Option<SubstreamPacket>, u64)> {
        // A short input whose bytes already differ from the prefix is a
        // mismatch; a short but matching one is truncated.
        let head = &bytes[..bytes.len().min(PACKET_START_CODE_PREFIX.len())];
        track_assert_eq!(
            head,
            &PACKET_START_CODE_PREFIX[..head.len()],
            ErrorKind::FormatMismatch,
            "Unexpected packet start code prefix"
        );

        let mut r = FieldReader::new(bytes, self.strict_markers);
        track!(r.field_u("prefix", 24))?;

        let result = decode_body(&mut r);
        let bit_len = r.bits().position();
        fields.extend(r.into_fields());
        let (stream_id, substream) = track!(result)?;
        Ok((stream_id, substream, bit_len))
    }
}

fn decode_body(r: &mut FieldReader) -> Result<(StreamId, Option<SubstreamPacket>)> {
    let stream_id = StreamId::new(track!(r.field_u_sym("start_code", 8, es::symbol))? as u8);
    let substream = match stream_id.kind() {
        PacketKind::SequenceHeader => {
            track!(sequence::decode(r))?;
            None
        }
        PacketKind::PackHeader => {
            track!(pack::decode(r))?;
            None
        }
        PacketKind::SystemHeader => {
            track!(system::decode(r))?;
            None
        }
        _ if stream_id.has_length() => track!(decode_framed(r, stream_id))?,
        _ => None,
    };
    Ok((stream_id, substream))
}

/// Decodes `length` and the body it frames.
fn decode_framed(r: &mut FieldReader, stream_id: StreamId) -> Result<Option<SubstreamPacket>> {
    let length = track!(r.field_u("length", 16))?;
    track!(r.framed(length * 8, |r| {
        if stream_id.has_pes_extension() {
            track!(extension::decode(r))?;
        }
        if stream_id.is_private_stream_1() {
            track!(r.field_struct("data", |r| {
                let number = track!(r.field_u("substream", 8))? as u8;
                let bits = r.bits_left();
                let payload = track!(r.field_raw("data", bits))?;
                Ok(Some(SubstreamPacket { number, payload }))
            }))
        } else {
            let bits = r.bits_left();
            track!(r.field_raw("stream_data", bits))?;
            Ok(None)
        }
    }))
}
