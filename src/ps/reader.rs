use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

use crate::es::{PacketKind, StreamId};
use crate::Result;

use super::PsPacket;

const READ_CHUNK_SIZE: usize = 4096;
const MPEG1_PACK_HEADER_SIZE: usize = 12;
const MPEG2_PACK_HEADER_SIZE: usize = 14;

/// The `ReadPsPacket` trait allows for reading raw program stream packets from a source.
pub trait ReadPsPacket {
    /// Reads a packet.
    ///
    /// If the end of the stream is reached, it will return `Ok(None)`.
    fn read_ps_packet(&mut self) -> Result<Option<PsPacket>>;

    /// Peeks at the next packet without pulling it off the stream.
    fn peek_ps_packet(&mut self) -> Result<Option<&PsPacket>>;
}

/// Program stream packet reader.
///
/// Packet boundaries are taken from the declared lengths: pack headers are
/// 12 bytes (MPEG-1) or 14 bytes plus stuffing (MPEG-2), codes from `0xBB`
/// up carry a 16-bit length, and any other packet extends to the next
/// `00 00 01` prefix.
#[derive(Debug)]
pub struct PsPacketReader<R> {
    peeked_packet: Option<PsPacket>,
    stream: R,
    buf: Vec<u8>,
    eos: bool,
}
impl<R: Read> PsPacketReader<R> {
    /// Makes a new `PsPacketReader` instance.
    pub fn new(stream: R) -> Self {
        PsPacketReader {
            peeked_packet: None,
            stream,
            buf: Vec::new(),
            eos: false,
        }
    }

    /// Returns a reference to the underlaying byte stream.
    pub fn stream(&self) -> &R {
        &self.stream
    }

    /// Converts `PsPacketReader` into the underlaying byte stream `R`.
    pub fn into_stream(self) -> R {
        self.stream
    }

    fn read_next_packet(&mut self) -> Result<Option<PsPacket>> {
        if !track!(self.sync())? {
            return Ok(None);
        }
        track!(self.fill(4))?;
        if self.buf.len() < 4 {
            log::debug!("Dropped {} trailing bytes", self.buf.len());
            self.buf.clear();
            return Ok(None);
        }

        let stream_id = StreamId::new(self.buf[3]);
        let expected = track!(self.packet_size(stream_id))?;
        let size = expected.min(self.buf.len());
        if size < expected {
            log::debug!(
                "Truncated packet: stream_id={}, expected={}, actual={}",
                stream_id,
                expected,
                size
            );
        }
        let bytes = self.buf.drain(..size).collect();
        Ok(Some(PsPacket { stream_id, bytes }))
    }

    fn packet_size(&mut self, stream_id: StreamId) -> Result<usize> {
        match stream_id.kind() {
            PacketKind::PackHeader => {
                track!(self.fill(MPEG2_PACK_HEADER_SIZE))?;
                if self.buf.len() <= 4 || self.buf[4] >> 6 != 0b01 {
                    Ok(MPEG1_PACK_HEADER_SIZE)
                } else if self.buf.len() < MPEG2_PACK_HEADER_SIZE {
                    Ok(MPEG2_PACK_HEADER_SIZE)
                } else {
                    let stuffing = usize::from(self.buf[MPEG2_PACK_HEADER_SIZE - 1] & 0b111);
                    Ok(MPEG2_PACK_HEADER_SIZE + stuffing)
                }
            }
            PacketKind::VideoEscape | PacketKind::SequenceHeader => {
                let mut from = 4;
                loop {
                    if let Some(i) = find_prefix(&self.buf, from) {
                        return Ok(i);
                    }
                    if self.eos {
                        return Ok(self.buf.len());
                    }
                    from = self.buf.len().saturating_sub(2).max(4);
                    let wanted = self.buf.len() + 1;
                    track!(self.fill(wanted))?;
                }
            }
            _ => {
                track!(self.fill(6))?;
                if self.buf.len() < 6 {
                    Ok(6)
                } else {
                    Ok(6 + usize::from(BigEndian::read_u16(&self.buf[4..6])))
                }
            }
        }
    }

    /// Drops bytes preceding the next start code prefix.
    ///
    /// Returns `false` if the stream ends without another prefix.
    fn sync(&mut self) -> Result<bool> {
        let mut from = 0;
        loop {
            if let Some(i) = find_prefix(&self.buf, from) {
                if i > 0 {
                    log::debug!("Skipped {} bytes before start code prefix", i);
                    self.buf.drain(..i);
                }
                return Ok(true);
            }
            if self.eos {
                if !self.buf.is_empty() {
                    log::debug!("Dropped {} trailing bytes", self.buf.len());
                    self.buf.clear();
                }
                return Ok(false);
            }
            from = self.buf.len().saturating_sub(2);
            let wanted = self.buf.len() + 1;
            track!(self.fill(wanted))?;
        }
    }

    /// Reads from the stream until `buf` holds at least `size` bytes or the stream ends.
    fn fill(&mut self, size: usize) -> Result<()> {
        let mut chunk = [0; READ_CHUNK_SIZE];
        while self.buf.len() < size && !self.eos {
            let read_size = track_io!(self.stream.read(&mut chunk))?;
            if read_size == 0 {
                self.eos = true;
            } else {
                self.buf.extend_from_slice(&chunk[..read_size]);
            }
        }
        Ok(())
    }
}
impl<R: Read> ReadPsPacket for PsPacketReader<R> {
    fn read_ps_packet(&mut self) -> Result<Option<PsPacket>> {
        if let Some(packet) = self.peeked_packet.take() {
            return Ok(Some(packet));
        }
        track!(self.read_next_packet())
    }

    fn peek_ps_packet(&mut self) -> Result<Option<&PsPacket>> {
        if self.peeked_packet.is_none() {
            self.peeked_packet = track!(self.read_next_packet())?;
        }
        Ok(self.peeked_packet.as_ref())
    }
}

/// Returns the index of the first `00 00 01` at or after `from`.
fn find_prefix(buf: &[u8], from: usize) -> Option<usize> {
    if buf.len() < 3 {
        return None;
    }
    (from..buf.len() - 2).find(|&i| BigEndian::read_u24(&buf[i..]) == 1)
}
