use crate::ps::ReadPsPacket;
use crate::Result;

use super::{PesPacket, PesPacketDecoder};

/// The `ReadPesPacket` trait allows for reading decoded packets from a source.
pub trait ReadPesPacket {
    /// Reads a PES packet.
    ///
    /// If the end of the stream is reached, it will return `Ok(None)`.
    fn read_pes_packet(&mut self) -> Result<Option<PesPacket>>;
}

/// PES packet reader.
///
/// Packets that fail to decode are dropped; reading resumes at the next packet.
#[derive(Debug)]
pub struct PesPacketReader<R> {
    ps_packet_reader: R,
    pes_decoder: PesPacketDecoder,
}
impl<R: ReadPsPacket> PesPacketReader<R> {
    /// Makes a new `PesPacketReader` instance.
    pub fn new(ps_packet_reader: R) -> Self {
        Self::with_decoder(ps_packet_reader, PesPacketDecoder::new())
    }

    /// Makes a new `PesPacketReader` instance that uses `pes_decoder`.
    pub fn with_decoder(ps_packet_reader: R, pes_decoder: PesPacketDecoder) -> Self {
        PesPacketReader {
            ps_packet_reader,
            pes_decoder,
        }
    }

    /// Returns a reference to the underlaying PS packet reader.
    pub fn ps_packet_reader(&self) -> &R {
        &self.ps_packet_reader
    }

    /// Converts `PesPacketReader` into the underlaying PS packet reader.
    pub fn into_ps_packet_reader(self) -> R {
        self.ps_packet_reader
    }
}
impl<R: ReadPsPacket> ReadPesPacket for PesPacketReader<R> {
    fn read_pes_packet(&mut self) -> Result<Option<PesPacket>> {
        while let Some(ps_packet) = track!(self.ps_packet_reader.read_ps_packet())? {
            match self.pes_decoder.process_ps_packet(&ps_packet) {
                Ok(packet) => return Ok(Some(packet)),
                Err(e) => {
                    log::trace!("Dropped packet: stream_id={}, {}", ps_packet.stream_id, e);
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::ps::PsPacketReader;

    use super::*;

    #[test]
    fn undecodable_packets_are_skipped() {
        let stream = [
            // system header cut short by the end of its declared length
            0x00, 0x00, 0x01, 0xBB, 0x00, 0x01, 0x80,
            // private stream 1 carrying sub-stream 0x80
            0x00, 0x00, 0x01, 0xBD, 0x00, 0x05, 0x80, 0x00, 0x00, 0x80, 0xAA,
        ];
        let decoder = PesPacketDecoder::default();
        let mut reader = PesPacketReader::with_decoder(PsPacketReader::new(&stream[..]), decoder);

        let packet = track_try_unwrap!(reader.read_pes_packet()).unwrap();
        assert!(packet.stream_id.is_private_stream_1());
        let substream = packet.substream.unwrap();
        assert_eq!(substream.number, 0x80);
        assert_eq!(substream.payload, vec![0xAA]);
        assert!(track_try_unwrap!(reader.read_pes_packet()).is_none());
    }
}
