//! Utilities used by the scanners and the retuner: parse error type and
//! bounds-checked byte readers/writers.
use std::fmt;

/// Error type returned by the byte helpers in this module.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An attempted read was outside the available buffer range.
    ///
    /// - `offset` is the index that was attempted to be accessed.
    /// - `needed` is the number of bytes required for the operation.
    /// - `available` is the current buffer length.
    /// - `context` is an optional string describing the logical location
    ///   (for example `"table_entry"`) where the access was attempted.
    OffsetOutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
        context: Option<String>,
    },

    /// A header was shorter than the minimum required length.
    ///
    /// The contained `String` identifies which header was too short
    /// (for example: "SID header").
    HeaderTooShort(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::OffsetOutOfRange {
                offset,
                needed,
                available,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(
                        f,
                        "offset out of range at {}: 0x{:X} (needed {} bytes, available {})",
                        ctx, offset, needed, available
                    )
                } else {
                    write!(
                        f,
                        "offset out of range: 0x{:X} (needed {} bytes, available {})",
                        offset, needed, available
                    )
                }
            }
            ParseError::HeaderTooShort(name) => write!(f, "header too short: {}", name),
        }
    }
}

impl std::error::Error for ParseError {}

/// Read a single byte from `bytes` at `off`.
///
/// Returns `Err(ParseError::OffsetOutOfRange)` when `off` is out of bounds.
pub fn read_u8_at(bytes: &[u8], off: usize) -> Result<u8, ParseError> {
    bytes
        .get(off)
        .copied()
        .ok_or(ParseError::OffsetOutOfRange {
            offset: off,
            needed: 1,
            available: bytes.len(),
            context: None,
        })
}

/// Read a 16-bit value whose low byte lives at `lo` and high byte at `hi`.
///
/// The two positions may be adjacent (little-endian word) or far apart
/// (split low/high byte streams).
pub fn read_u16_split_at(bytes: &[u8], lo: usize, hi: usize) -> Result<u16, ParseError> {
    let low = read_u8_at(bytes, lo)?;
    let high = read_u8_at(bytes, hi)?;
    Ok(u16::from_le_bytes([low, high]))
}

/// Read a 16-bit little-endian unsigned integer from `bytes` at `off`.
pub fn read_u16_le_at(bytes: &[u8], off: usize) -> Result<u16, ParseError> {
    if bytes.len() < off.saturating_add(2) {
        return Err(ParseError::OffsetOutOfRange {
            offset: off,
            needed: 2,
            available: bytes.len(),
            context: None,
        });
    }
    Ok(u16::from_le_bytes([bytes[off], bytes[off + 1]]))
}

/// Return a borrowed slice of length `len` starting at `off` from `bytes`.
pub fn read_slice(bytes: &[u8], off: usize, len: usize) -> Result<&[u8], ParseError> {
    if bytes.len() < off.saturating_add(len) {
        return Err(ParseError::OffsetOutOfRange {
            offset: off,
            needed: len,
            // Report the remaining number of bytes from `off` to the end of the buffer.
            available: bytes.len().saturating_sub(off),
            context: Some("read_slice".into()),
        });
    }
    Ok(&bytes[off..off + len])
}

/// Write a single byte `v` into `buf` at `off` when `off` is inside `buf`.
///
/// Returns `false` (and leaves `buf` untouched) when `off` is past the end.
pub fn write_u8_within(buf: &mut [u8], off: usize, v: u8) -> bool {
    match buf.get_mut(off) {
        Some(slot) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Apply a signed displacement to an offset. `None` when the result would
/// be negative or overflow.
pub fn displace(off: usize, delta: isize) -> Option<usize> {
    off.checked_add_signed(delta)
}
