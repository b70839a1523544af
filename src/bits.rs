//! Bit-level cursor over a byte buffer.
use std::io::{Cursor, SeekFrom};

use bitstream_io::{BigEndian, BitRead, BitReader as BitstreamReader};

use crate::{ErrorKind, Result};

/// MSB-first bit reader.
///
/// The reader never reads past its current limit. The limit is the end of
/// the buffer unless it has been narrowed by [`BitReader::enter_frame`].
#[derive(Debug)]
pub struct BitReader<'a> {
    bs: BitstreamReader<Cursor<&'a [u8]>, BigEndian>,
    pos: u64,
    limit: u64,
}
impl<'a> BitReader<'a> {
    /// Makes a new `BitReader` instance positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            bs: BitstreamReader::new(Cursor::new(data)),
            pos: 0,
            limit: data.len() as u64 * 8,
        }
    }

    /// Returns the current position in bits from the start of the buffer.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Returns the number of bits that can still be read.
    pub fn bits_left(&self) -> u64 {
        self.limit - self.pos
    }

    /// Reads an unsigned value of `bits` width (at most 64).
    pub fn read_bits(&mut self, bits: u32) -> Result<u64> {
        track_assert!(bits <= 64, ErrorKind::Other, "Too wide read: {} bits", bits);
        track!(self.ensure(u64::from(bits)))?;
        if bits == 0 {
            return Ok(0);
        }
        let value = track_io!(self.bs.read_var::<u64>(bits))?;
        self.pos += u64::from(bits);
        Ok(value)
    }

    /// Reads the next `bits` bits without consuming them.
    pub fn peek_bits(&mut self, bits: u32) -> Result<u64> {
        let start = self.pos;
        let value = track!(self.read_bits(bits))?;
        track!(self.seek(start))?;
        Ok(value)
    }

    /// Reads `bits` bits as raw bytes.
    ///
    /// The bits are left-aligned; if `bits` is not a multiple of eight the
    /// low bits of the last byte are zero.
    pub fn read_raw(&mut self, bits: u64) -> Result<Vec<u8>> {
        track!(self.ensure(bits))?;
        let mut bytes = vec![0; (bits / 8) as usize];
        track_io!(self.bs.read_bytes(&mut bytes))?;
        self.pos += (bits / 8) * 8;

        let tail = (bits % 8) as u32;
        if tail != 0 {
            let last = track_io!(self.bs.read_var::<u8>(tail))?;
            self.pos += u64::from(tail);
            bytes.push(last << (8 - tail));
        }
        Ok(bytes)
    }

    /// Narrows the limit to the next `bits` bits.
    ///
    /// The returned `Frame` must be passed to [`BitReader::leave_frame`].
    pub fn enter_frame(&mut self, bits: u64) -> Result<Frame> {
        track!(self.ensure(bits))?;
        let frame = Frame {
            end: self.pos + bits,
            outer_limit: self.limit,
        };
        self.limit = frame.end;
        Ok(frame)
    }

    /// Moves to the end of `frame`, skipping whatever was left unread, and
    /// restores the limit that was in effect before the frame.
    pub fn leave_frame(&mut self, frame: Frame) -> Result<()> {
        if self.pos < frame.end {
            log::trace!("Dropped {} unread bits of framed region", frame.end - self.pos);
        }
        self.limit = frame.outer_limit;
        track!(self.seek(frame.end))
    }

    /// Runs `f` inside a region of exactly `bits` bits starting at the
    /// current position.
    ///
    /// `f` cannot read beyond the region. Whatever `f` leaves unread is
    /// skipped, so the cursor always ends up at the end of the region, even
    /// when `f` fails.
    pub fn framed<F, T>(&mut self, bits: u64, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let frame = track!(self.enter_frame(bits))?;
        let result = f(self);
        track!(self.leave_frame(frame))?;
        result
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        track_io!(self.bs.seek_bits(SeekFrom::Start(pos)))?;
        self.pos = pos;
        Ok(())
    }

    fn ensure(&self, bits: u64) -> Result<()> {
        track_assert!(
            bits <= self.bits_left(),
            ErrorKind::TruncatedInput,
            "Need {} bits but only {} left (position={})",
            bits,
            self.bits_left(),
            self.pos
        );
        Ok(())
    }
}

/// A region opened by [`BitReader::enter_frame`].
#[derive(Debug)]
#[must_use]
pub struct Frame {
    end: u64,
    outer_limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_unaligned_fields() {
        let data = [0b1010_1100, 0b0101_1111, 0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(track_try_unwrap!(reader.read_bits(3)), 0b101);
        assert_eq!(track_try_unwrap!(reader.read_bits(7)), 0b0_1100_01);
        assert_eq!(track_try_unwrap!(reader.peek_bits(2)), 0b01);
        assert_eq!(reader.position(), 10);
        assert_eq!(track_try_unwrap!(reader.read_bits(14)), 0b01_1111_1111_1111);
        assert_eq!(reader.bits_left(), 0);
    }

    #[test]
    fn read_past_end_is_truncated_input() {
        let data = [0xAB];
        let mut reader = BitReader::new(&data);
        let e = reader.read_bits(9).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::TruncatedInput);
        assert_eq!(reader.position(), 0);
        assert_eq!(track_try_unwrap!(reader.read_bits(8)), 0xAB);
    }

    #[test]
    fn raw_bytes_keep_alignment() {
        let data = [0x0F, 0xF0, 0xAA];
        let mut reader = BitReader::new(&data);
        track_try_unwrap!(reader.read_bits(4));
        assert_eq!(track_try_unwrap!(reader.read_raw(8)), vec![0xFF]);
        assert_eq!(track_try_unwrap!(reader.read_raw(4)), vec![0x00]);
        assert_eq!(track_try_unwrap!(reader.read_raw(7)), vec![0xAA]);
        assert_eq!(reader.position(), 23);
    }

    #[test]
    fn framed_region_clamps_and_skips() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let mut reader = BitReader::new(&data);
        let value = track_try_unwrap!(reader.framed(16, |r| r.read_bits(4)));
        assert_eq!(value, 0x1);
        assert_eq!(reader.position(), 16);
        assert_eq!(track_try_unwrap!(reader.read_bits(8)), 0x56);
    }

    #[test]
    fn framed_region_failure_still_advances() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let mut reader = BitReader::new(&data);
        let e = reader.framed(8, |r| r.read_bits(16)).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::TruncatedInput);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.bits_left(), 24);
        assert_eq!(track_try_unwrap!(reader.read_bits(8)), 0x34);
    }

    #[test]
    fn framed_region_larger_than_input() {
        let data = [0x12];
        let mut reader = BitReader::new(&data);
        let e = reader.framed(16, |_| Ok(())).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::TruncatedInput);
        assert_eq!(reader.position(), 0);
    }
}
