//! Elementary stream identifiers.
pub use self::stream_id::{PacketKind, StreamId};

pub(crate) use self::stream_id::symbol;

mod stream_id;
