//! Header/body split of a SID file.
//!
//! The player data starts right after the fixed-size header. The header is
//! carried through untouched; nothing in it is parsed or validated.
use crate::binutil::{ParseError, read_slice};

/// Size of the SID header region copied through verbatim.
pub const SID_HEADER_LEN: usize = 0x7E;

/// Borrow the header and body of a SID file.
///
/// Returns `ParseError::HeaderTooShort` when `file` ends inside the header.
pub fn split_sid(file: &[u8]) -> Result<(&[u8], &[u8]), ParseError> {
    let header = read_slice(file, 0, SID_HEADER_LEN)
        .map_err(|_| ParseError::HeaderTooShort("SID header".into()))?;
    Ok((header, &file[SID_HEADER_LEN..]))
}

/// File offset of body position `body_offset`.
pub fn file_offset(body_offset: usize) -> usize {
    body_offset + SID_HEADER_LEN
}
