use core::fmt;

/// Why an operation was rejected.
///
/// Navigation and accessors never produce one; they report failure as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input is longer than the 255-byte message ceiling.
    MessageTooLarge,
    /// The encoder buffer has too little room left for the value.
    InsufficientCapacity,
    /// A string or binary payload is longer than 255 bytes.
    LengthUnsupported,
}

/// A codec error with a stable code and a byte offset.
///
/// For encoder errors `offset` is the write position at the time of the failed call;
/// nothing was written at or after it by that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgPackError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset where the error was detected.
    pub offset: usize,
}

impl MsgPackError {
    /// Construct an error with `code` at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }

    /// Returns true iff the failure was caused by a full output buffer.
    ///
    /// Callers that can retry with a larger buffer use this to tell capacity exhaustion
    /// apart from values that can never be encoded.
    #[inline]
    #[must_use]
    pub const fn is_capacity(self) -> bool {
        matches!(self.code, ErrorCode::InsufficientCapacity)
    }
}

impl fmt::Display for MsgPackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::MessageTooLarge => "message exceeds 255 bytes",
            ErrorCode::InsufficientCapacity => "insufficient buffer capacity",
            ErrorCode::LengthUnsupported => "payload length exceeds 255 bytes",
        };

        write!(f, "msgpack failed at {}: {msg}", self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MsgPackError {}
