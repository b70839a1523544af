use crate::field::FieldReader;
use crate::Result;

/// Decodes the body of a system header (start code `0xBB`).
///
/// `length` is recorded but does not bound the stream bound entries; the
/// entry list ends at the first entry whose leading bit is `0`.
pub(super) fn decode(r: &mut FieldReader) -> Result<()> {
    track!(r.field_u("length", 16))?;
    track!(r.field_marker("skip0", 1, 1))?;
    track!(r.field_u("rate_bound", 22))?;
    track!(r.field_marker("skip1", 1, 1))?;
    track!(r.field_u("audio_bound", 6))?;
    track!(r.field_u("fixed_flag", 1))?;
    track!(r.field_u("csps_flag", 1))?;
    track!(r.field_u("system_audio_lock_flag", 1))?;
    track!(r.field_u("system_video_lock_flag", 1))?;
    track!(r.field_marker("skip2", 1, 1))?;
    track!(r.field_u("video_bound", 5))?;
    track!(r.field_u("packet_rate_restriction_flag", 1))?;
    track!(r.field_u("reserved", 7))?;
    track!(r.field_array("stream_bound_entries", |r| {
        r.while_peek_bit(|r| {
            r.field_struct("stream_bound_entry", |r| {
                track!(r.field_u("stream_id", 8))?;
                track!(r.field_marker("skip0", 2, 0b11))?;
                track!(r.field_u("pstd_buffer_bound_scale", 1))?;
                track!(r.field_u("pstd_buffer_size_bound", 13))?;
                Ok(())
            })
        })
    }))?;
    Ok(())
}
