use crate::field::FieldReader;
use crate::time::Timestamp;
use crate::Result;

const PTS_ONLY: u64 = 0b10;
const PTS_AND_DTS: u64 = 0b11;

/// Field names of one 40-bit timestamp block.
struct TimestampFields {
    prefix: &'static str,
    prefix_value: u64,
    fragments: [&'static str; 3],
    markers: [&'static str; 3],
    value: &'static str,
}

const PTS_ONLY_FIELDS: TimestampFields = TimestampFields {
    prefix: "const0010",
    prefix_value: 0b0010,
    fragments: ["pts0", "pts1", "pts2"],
    markers: ["marker_bit0", "marker_bit1", "marker_bit2"],
    value: "pts",
};
const PTS_FIELDS: TimestampFields = TimestampFields {
    prefix: "const0011",
    prefix_value: 0b0011,
    ..PTS_ONLY_FIELDS
};
const DTS_FIELDS: TimestampFields = TimestampFields {
    prefix: "const0001",
    prefix_value: 0b0001,
    fragments: ["dts0", "dts1", "dts2"],
    markers: ["marker_bit3", "marker_bit4", "marker_bit5"],
    value: "dts",
};

/// Decodes the PES extension header (flags, optional PTS/DTS, ES rate and
/// trick mode) followed by `header_data`.
///
/// `header_data` spans `header_data_length` bytes starting right after
/// the structured fields, so the optional fields are accounted for twice.
pub(super) fn decode(r: &mut FieldReader) -> Result<()> {
    let header_data_bits = track!(r.field_struct("extension", |r| {
        track!(r.field_marker("skip0", 2, 0b10))?;
        track!(r.field_u("scramble_control", 2))?;
        track!(r.field_u("priority", 1))?;
        track!(r.field_u("data_alignment_indicator", 1))?;
        track!(r.field_u("copyright", 1))?;
        track!(r.field_u("original", 1))?;
        let pts_dts_flags = track!(r.field_u("pts_dts_flags", 2))?;
        track!(r.field_u("escr_flag", 1))?;
        let es_rate_flag = track!(r.field_u("es_rate_flag", 1))?;
        let dsm_trick_mode_flag = track!(r.field_u("dsm_trick_mode_flag", 1))?;
        track!(r.field_u("additional_copy_info_flag", 1))?;
        track!(r.field_u("pes_crc_flag", 1))?;
        track!(r.field_u("pes_ext_flag", 1))?;
        let header_data_bits = track!(r.field_u("header_data_length", 8))? * 8;

        match pts_dts_flags {
            PTS_ONLY => track!(r.field_struct("pts_dts", |r| {
                read_timestamp(r, &PTS_ONLY_FIELDS)
            }))?,
            PTS_AND_DTS => track!(r.field_struct("pts_dts", |r| {
                track!(read_timestamp(r, &PTS_FIELDS))?;
                track!(read_timestamp(r, &DTS_FIELDS))
            }))?,
            _ => {}
        }

        if es_rate_flag == 1 {
            track!(r.field_struct("es_rate", |r| {
                track!(r.field_marker("marker_bit0", 1, 1))?;
                track!(r.field_u("es_rate", 22))?;
                track!(r.field_marker("marker_bit1", 1, 1))?;
                Ok(())
            }))?;
        }

        if dsm_trick_mode_flag == 1 {
            // TODO: split into trick_mode_control and its mode specific fields
            track!(r.field_u("dsm_trick_mode", 8))?;
        }
        Ok(header_data_bits)
    }))?;
    track!(r.field_raw("header_data", header_data_bits))?;
    Ok(())
}

fn read_timestamp(r: &mut FieldReader, names: &TimestampFields) -> Result<()> {
    track!(r.field_marker(names.prefix, 4, names.prefix_value))?;
    let frag0 = track!(r.field_u(names.fragments[0], 3))?;
    track!(r.field_marker(names.markers[0], 1, 1))?;
    let frag1 = track!(r.field_u(names.fragments[1], 15))?;
    track!(r.field_marker(names.markers[1], 1, 1))?;
    let frag2 = track!(r.field_u(names.fragments[2], 15))?;
    track!(r.field_marker(names.markers[2], 1, 1))?;
    let timestamp = Timestamp::from_fragments(frag0, frag1, frag2);
    r.field_value(names.value, timestamp.as_u64());
    Ok(())
}
