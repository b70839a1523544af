use crate::field::FieldReader;
use crate::Result;

/// Size of a quantizer matrix in bits (64 entries of 8 bits).
const QUANTIZER_MATRIX_BITS: u64 = 8 * 64;

/// Decodes the body of a video sequence header (start code `0xB3`).
pub(super) fn decode(r: &mut FieldReader) -> Result<()> {
    track!(r.field_u("horizontal_size", 12))?;
    track!(r.field_u("vertical_size", 12))?;
    track!(r.field_u("aspect_ratio", 4))?;
    track!(r.field_u("frame_rate_code", 4))?;
    // Raw value. The actual rate is `bit_rate * 400` bits/s (rounded up),
    // `0x3FFFF` meaning variable bit rate.
    track!(r.field_u("bit_rate", 18))?;
    track!(r.field_marker("marker_bit", 1, 1))?;
    track!(r.field_u("vbv_buf_size", 10))?;
    track!(r.field_u("constrained_parameters_flag", 1))?;
    if track!(r.field_bool("load_intra_quantizer_matrix"))? {
        track!(r.field_raw("intra_quantizer_matrix", QUANTIZER_MATRIX_BITS))?;
    }
    if track!(r.field_bool("load_non_intra_quantizer_matrix"))? {
        track!(r.field_raw("non_intra_quantizer_matrix", QUANTIZER_MATRIX_BITS))?;
    }
    Ok(())
}
