//! Compile-time size limits of the wire format.
//!
//! Every cursor and length in this crate fits in a `u8` (payloads, positions) or a `u16`
//! (container counts). The constants below are the thresholds the encoder uses to choose
//! between compact and explicit encodings, and the ceiling the decoder enforces.

/// Maximum length of a single message in bytes.
pub const MAX_MESSAGE_SIZE: usize = u8::MAX as usize;

/// Largest unsigned integer stored inside the tag byte (positive fixint).
pub const FIXINT_MAX: u32 = 0x7f;

/// Longest string encoded with a single-byte tag (fixstr).
pub const FIXSTR_MAX_LEN: usize = 31;

/// Largest map/array count encoded with a single-byte tag (fixmap / fixarray).
pub const FIXCOLLECTION_MAX_LEN: u8 = 15;

/// Longest string or binary payload the format supports (str8 / bin8).
pub const STR8_MAX_LEN: usize = u8::MAX as usize;
