use crate::field::FieldReader;
use crate::time::Timestamp;
use crate::{ErrorKind, Result};

use super::packet::mpeg_version_name;

const MPEG2_MARKER: u64 = 0b01;
const MPEG1_MARKER: u64 = 0b0010;

/// Decodes the body of a pack header (start code `0xBA`).
///
/// The layout is chosen by the first two bits: `01` is MPEG-2, anything
/// else is MPEG-1.
pub(super) fn decode(r: &mut FieldReader) -> Result<()> {
    if track!(r.peek_bits(2))? == MPEG2_MARKER {
        log::debug!("MPEG-2 pack header");
        track!(decode_mpeg2(r))
    } else {
        log::debug!("MPEG-1 pack header");
        track!(decode_mpeg1(r))
    }
}

fn decode_mpeg2(r: &mut FieldReader) -> Result<()> {
    track!(r.field_u_sym("marker_bits0", 2, mpeg_version_name))?;
    let scr = track!(read_scr(r))?;
    track!(r.field_marker("marker_bits3", 1, 1))?;
    track!(r.field_u("scr_ext", 9))?;
    track!(r.field_marker("marker_bits4", 1, 1))?;
    r.field_value("scr", scr.as_u64());
    track!(r.field_u("mux_rate", 22))?;
    track!(r.field_marker("marker_bits5", 1, 1))?;
    track!(r.field_marker("marker_bits6", 1, 1))?;
    track!(r.field_u("reserved", 5))?;
    let pack_stuffing_length = track!(r.field_u("pack_stuffing_length", 3))?;
    if pack_stuffing_length > 0 {
        track!(r.field_raw("stuffing", pack_stuffing_length * 8))?;
    }
    Ok(())
}

fn decode_mpeg1(r: &mut FieldReader) -> Result<()> {
    let marker = track!(r.field_u_sym("marker_bits0", 4, mpeg_version_name))?;
    if r.strict_markers() {
        track_assert_eq!(marker, MPEG1_MARKER, ErrorKind::FormatMismatch, "field=marker_bits0");
    }
    let scr = track!(read_scr(r))?;
    r.field_value("scr", scr.as_u64());
    track!(r.field_marker("marker_bits3", 2, 0b11))?;
    track!(r.field_u("mux_rate", 22))?;
    track!(r.field_marker("marker_bits4", 1, 1))?;
    Ok(())
}

/// Reads `system_clock0`, `marker_bits1`, `system_clock1`, `marker_bits2`
/// and `system_clock2`, returning the reassembled SCR base.
fn read_scr(r: &mut FieldReader) -> Result<Timestamp> {
    let scr0 = track!(r.field_u("system_clock0", 3))?;
    track!(r.field_marker("marker_bits1", 1, 1))?;
    let scr1 = track!(r.field_u("system_clock1", 15))?;
    track!(r.field_marker("marker_bits2", 1, 1))?;
    let scr2 = track!(r.field_u("system_clock2", 15))?;
    Ok(Timestamp::from_fragments(scr0, scr1, scr2))
}
