//! Clock references and timestamps.
use crate::{ErrorKind, Result};

const FRAG1_BITS: u32 = 15;
const FRAG2_BITS: u32 = 15;
const FRAG0_BITS: u32 = 3;

/// Reassembles a 33-bit clock value from its three on-wire fragments.
///
/// `frag0` holds bits 32..30, `frag1` bits 29..15 and `frag2` bits 14..0.
/// Bits above each fragment's width are ignored.
pub fn combine(frag0: u64, frag1: u64, frag2: u64) -> u64 {
    let frag0 = frag0 & ((1 << FRAG0_BITS) - 1);
    let frag1 = frag1 & ((1 << FRAG1_BITS) - 1);
    let frag2 = frag2 & ((1 << FRAG2_BITS) - 1);
    (frag0 << (FRAG1_BITS + FRAG2_BITS)) | (frag1 << FRAG2_BITS) | frag2
}

/// Timestamp type for PTS/DTS (and the base of SCR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(u64);
impl Timestamp {
    /// 90 kHz.
    pub const RESOLUTION: u64 = 90_000;

    /// Maximum timestamp value.
    pub const MAX: u64 = (1 << 33) - 1;

    /// Makes a new `Timestamp` instance.
    ///
    /// # Errors
    ///
    /// If `n` exceeds `Timestamp::MAX`, it will return an `ErrorKind::FormatMismatch` error.
    pub fn new(n: u64) -> Result<Self> {
        track_assert!(
            n <= Self::MAX,
            ErrorKind::FormatMismatch,
            "Too large value: {}",
            n
        );
        Ok(Timestamp(n))
    }

    /// Makes a new `Timestamp` instance from on-wire fragments.
    pub fn from_fragments(frag0: u64, frag1: u64, frag2: u64) -> Self {
        Timestamp(combine(frag0, frag1, frag2))
    }

    /// Returns the value of the timestamp.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the timestamp in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / Self::RESOLUTION as f64
    }
}
