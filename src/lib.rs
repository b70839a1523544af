//! A decoder for MPEG-1/MPEG-2 program stream packets.
//!
//! Each packet (`00 00 01 <start_code> ...`) is decoded bit by bit into a
//! labeled field tree. Private stream 1 packets additionally yield the
//! embedded sub-stream payload so that it can be handed to a codec.
//!
//! # References
//!
//! - [MPEG program stream](https://en.wikipedia.org/wiki/MPEG_program_stream)
//! - [MPEG headers quick reference](http://dvdnav.mplayerhq.hu/dvdinfo/mpeghdrs.html)
#![warn(missing_docs)]
#[macro_use]
extern crate trackable;

pub use crate::error::{Error, ErrorKind};

macro_rules! track_io {
    ($expr:expr) => {
        $expr.map_err(|e: ::std::io::Error| {
            use trackable::error::ErrorKindExt;
            track!($crate::Error::from($crate::ErrorKind::Other.cause(e)))
        })
    };
}

pub mod bits;
pub mod es;
pub mod field;
pub mod pes;
pub mod ps;
pub mod time;

mod error;

/// This crate specific `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
