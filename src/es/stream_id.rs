use std::fmt;

/// Symbolic names of start codes and stream ids (inclusive ranges).
const NAMES: &[(u8, u8, &str)] = &[
    (0x00, 0x00, "picture"),
    (0x01, 0xAF, "slice"),
    (0xB0, 0xB1, "reserved"),
    (0xB2, 0xB2, "user_data"),
    (0xB3, 0xB3, "sequence_header"),
    (0xB4, 0xB4, "sequence_error"),
    (0xB5, 0xB5, "extension"),
    (0xB6, 0xB6, "reserved"),
    (0xB7, 0xB7, "sequence_end"),
    (0xB8, 0xB8, "group_of_pictures"),
    (0xB9, 0xB9, "program_end"),
    (0xBA, 0xBA, "pack_header"),
    (0xBB, 0xBB, "system_header"),
    (0xBC, 0xBC, "program_stream_map"),
    (0xBD, 0xBD, "private_stream1"),
    (0xBE, 0xBE, "padding_stream"),
    (0xBF, 0xBF, "private_stream2"),
    (0xC0, 0xDF, "audio_stream"),
    (0xE0, 0xEF, "video_stream"),
    (0xF0, 0xF0, "ecm_stream"),
    (0xF1, 0xF1, "emm_stream"),
    (0xF2, 0xF2, "itu_t_rec_h_222_0"),
    (0xF3, 0xF3, "iso_iec_13522_stream"),
    (0xF4, 0xF4, "itu_t_rec_h_222_1_type_a"),
    (0xF5, 0xF5, "itu_t_rec_h_222_1_type_b"),
    (0xF6, 0xF6, "itu_t_rec_h_222_1_type_c"),
    (0xF7, 0xF7, "itu_t_rec_h_222_1_type_d"),
    (0xF8, 0xF8, "itu_t_rec_h_222_1_type_e"),
    (0xF9, 0xF9, "ancillary_stream"),
    (0xFA, 0xFE, "reserved"),
    (0xFF, 0xFF, "program_stream_directory"),
];

/// Coarse classification of a start code, used to pick a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// Video start codes (picture, slice, GOP, ...) other than the sequence header.
    VideoEscape,
    /// `0xB3`
    SequenceHeader,
    /// `0xBA`
    PackHeader,
    /// `0xBB`
    SystemHeader,
    /// `0xBC`
    ProgramStreamMap,
    /// `0xBD`
    PrivateStream1,
    /// `0xBE`
    PaddingStream,
    /// `0xBF`
    PrivateStream2,
    /// `0xC0..=0xDF`
    AudioStream,
    /// `0xE0..=0xEF`
    VideoStream,
    /// `0xFF`
    ProgramStreamDirectory,

    /// ECM/EMM, H.222 and ancillary streams, and reserved ids `0xFA..=0xFE`.
    Other,
}

/// Stream identifier (the start code following the `0x000001` prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(u8);
impl StreamId {
    /// Start code of video sequence headers.
    pub const SEQUENCE_HEADER: u8 = 0xB3;

    /// Start code of pack headers.
    pub const PACK_HEADER: u8 = 0xBA;

    /// Start code of system headers.
    pub const SYSTEM_HEADER: u8 = 0xBB;

    /// Identifier of private stream 1.
    pub const PRIVATE_STREAM_1: u8 = 0xBD;

    /// Minimum value of the identifiers for audio streams.
    pub const AUDIO_MIN: u8 = 0xC0;

    /// Maximum value of the identifiers for audio streams.
    pub const AUDIO_MAX: u8 = 0xDF;

    /// Minimum value of the identifiers for video streams.
    pub const VIDEO_MIN: u8 = 0xE0;

    /// Maximum value of the identifiers for video streams.
    pub const VIDEO_MAX: u8 = 0xEF;

    /// Makes a new `StreamId` instance.
    pub fn new(id: u8) -> Self {
        StreamId(id)
    }

    /// Returns the value of the identifier.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns the symbolic name of the identifier.
    pub fn symbol(&self) -> &'static str {
        symbol(u64::from(self.0)).unwrap_or("reserved")
    }

    /// Classifies the identifier.
    pub fn kind(&self) -> PacketKind {
        match self.0 {
            Self::SEQUENCE_HEADER => PacketKind::SequenceHeader,
            0x00..=0xB9 => PacketKind::VideoEscape,
            Self::PACK_HEADER => PacketKind::PackHeader,
            Self::SYSTEM_HEADER => PacketKind::SystemHeader,
            0xBC => PacketKind::ProgramStreamMap,
            Self::PRIVATE_STREAM_1 => PacketKind::PrivateStream1,
            0xBE => PacketKind::PaddingStream,
            0xBF => PacketKind::PrivateStream2,
            Self::AUDIO_MIN..=Self::AUDIO_MAX => PacketKind::AudioStream,
            Self::VIDEO_MIN..=Self::VIDEO_MAX => PacketKind::VideoStream,
            0xFF => PacketKind::ProgramStreamDirectory,
            0xF0..=0xFE => PacketKind::Other,
        }
    }

    /// Returns `true` if it is an audio identifier, otherwise `false`.
    pub fn is_audio(&self) -> bool {
        Self::AUDIO_MIN <= self.0 && self.0 <= Self::AUDIO_MAX
    }

    /// Returns `true` if it is a video identifier, otherwise `false`.
    pub fn is_video(&self) -> bool {
        Self::VIDEO_MIN <= self.0 && self.0 <= Self::VIDEO_MAX
    }

    /// Returns `true` if it is the private stream 1 identifier, otherwise `false`.
    pub fn is_private_stream_1(&self) -> bool {
        self.0 == Self::PRIVATE_STREAM_1
    }

    /// Returns `true` if packets of this stream carry a 16-bit length
    /// followed by a length-framed body.
    pub fn has_length(&self) -> bool {
        self.0 >= Self::PRIVATE_STREAM_1
    }

    /// Returns `true` if packets of this stream start with the PES extension header.
    pub fn has_pes_extension(&self) -> bool {
        self.is_private_stream_1() || self.is_audio() || self.is_video()
    }
}
impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02x} ({})", self.0, self.symbol())
    }
}

/// Looks up the symbolic name of a start code value.
pub(crate) fn symbol(value: u64) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|&&(lo, hi, _)| u64::from(lo) <= value && value <= u64::from(hi))
        .map(|&(_, _, name)| name)
}
