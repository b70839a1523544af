use trackable::error::{ErrorKind as TrackableErrorKind, TrackableError};

/// This crate specific `Error` type.
#[derive(Debug, Clone)]
pub struct Error(TrackableError<ErrorKind>);
derive_traits_for_trackable_error_newtype!(Error, ErrorKind);

/// Possible error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field did not have its mandatory value (e.g., the `0x000001` prefix).
    FormatMismatch,

    /// Fewer bits remain than a field declares.
    TruncatedInput,

    /// Other errors (e.g., I/O failures of the underlying stream).
    Other,
}
impl TrackableErrorKind for ErrorKind {}
