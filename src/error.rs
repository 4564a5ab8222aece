use thiserror::Error;

/// Decode failures surfaced to callers.
///
/// Errors are terminal: no recovery or resynchronization is attempted, and
/// whatever output was produced before the failure point is observable but
/// not contractually valid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuffError {
    #[error("unexpected end of input")]
    TruncatedInput,

    #[error("reserved block type")]
    InvalidBlockType,

    #[error("stored block LEN/NLEN mismatch")]
    InvalidStoredBlock,

    #[error("malformed Huffman code lengths")]
    InvalidTable,

    #[error("invalid Huffman code")]
    InvalidCode,

    #[error("code length repeat with no previous length")]
    InvalidRepeat,

    #[error("back-reference distance exceeds output")]
    InvalidDistance,
}

pub type PuffResult<T> = Result<T, PuffError>;
