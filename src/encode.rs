use crate::limits::{FIXCOLLECTION_MAX_LEN, FIXINT_MAX, FIXSTR_MAX_LEN, STR8_MAX_LEN};
use crate::wire;
use crate::{ErrorCode, MsgPackError};

/// Append-only encoder writing into a caller-provided buffer.
///
/// Each `add_*` call either writes the complete encoding of one value and advances, or
/// writes nothing and returns an error; a failed call never leaves a partial value
/// behind. Capacity is the buffer length, capped at 255 bytes.
///
/// The encoder does not check structure. After [`Encoder::add_array`] the caller must
/// append exactly `count` elements, and after [`Encoder::add_map`] exactly `count`
/// key/value pairs.
#[derive(Debug)]
pub struct Encoder<'a> {
    buf: &'a mut [u8],
    position: u8,
}

impl<'a> Encoder<'a> {
    /// Create an encoder that writes from the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Usable buffer size.
    #[must_use]
    pub fn capacity(&self) -> u8 {
        u8::try_from(self.buf.len()).unwrap_or(u8::MAX)
    }

    /// Return the number of bytes written so far.
    ///
    /// This says nothing about whether the containers written so far are complete.
    #[must_use]
    pub const fn message_size(&self) -> u8 {
        self.position
    }

    /// Bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        usize::from(self.capacity() - self.position)
    }

    /// Borrow the bytes emitted so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.position)]
    }

    /// Consume the encoder and return the bytes emitted.
    #[must_use]
    pub fn finish(self) -> &'a [u8] {
        let len = usize::from(self.position);
        let buf: &'a [u8] = self.buf;
        &buf[..len]
    }

    /// Compute the SHA-256 digest of the bytes emitted so far.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut h = Sha256::new();
        h.update(self.as_bytes());
        let out = h.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(out.as_slice());
        digest
    }

    fn emit(&mut self, head: &[u8], payload: &[u8]) -> Result<(), MsgPackError> {
        let start = usize::from(self.position);
        let need = head.len() + payload.len();
        if need > self.remaining() {
            return Err(MsgPackError::new(ErrorCode::InsufficientCapacity, start));
        }
        let end = start + need;
        let next = u8::try_from(end)
            .map_err(|_| MsgPackError::new(ErrorCode::InsufficientCapacity, start))?;
        let dst = self
            .buf
            .get_mut(start..end)
            .ok_or_else(|| MsgPackError::new(ErrorCode::InsufficientCapacity, start))?;

        let (h, p) = dst.split_at_mut(head.len());
        h.copy_from_slice(head);
        p.copy_from_slice(payload);
        self.position = next;
        Ok(())
    }

    /// Encode `nil`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCapacity` if the buffer is full.
    pub fn add_nil(&mut self) -> Result<(), MsgPackError> {
        self.emit(&[wire::NIL], &[])
    }

    /// Encode a boolean.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCapacity` if the buffer is full.
    pub fn add_bool(&mut self, v: bool) -> Result<(), MsgPackError> {
        self.emit(&[if v { wire::TRUE } else { wire::FALSE }], &[])
    }

    /// Encode an unsigned integer using the smallest form that holds it.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCapacity` if the encoding does not fit.
    pub fn add_uint(&mut self, v: u32) -> Result<(), MsgPackError> {
        if let Ok(v8) = u8::try_from(v) {
            if v <= FIXINT_MAX {
                return self.emit(&[v8], &[]);
            }
            return self.emit(&[wire::UINT8, v8], &[]);
        }
        if let Ok(v16) = u16::try_from(v) {
            let [hi, lo] = v16.to_be_bytes();
            return self.emit(&[wire::UINT16, hi, lo], &[]);
        }
        let [b0, b1, b2, b3] = v.to_be_bytes();
        self.emit(&[wire::UINT32, b0, b1, b2, b3], &[])
    }

    /// Encode a string. Length is measured in UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `LengthUnsupported` for strings longer than 255 bytes and
    /// `InsufficientCapacity` if the encoding does not fit.
    pub fn add_str(&mut self, s: &str) -> Result<(), MsgPackError> {
        let b = s.as_bytes();
        let len = self.payload_len(b)?;
        if b.len() <= FIXSTR_MAX_LEN {
            return self.emit(&[wire::FIXSTR | len], b);
        }
        self.emit(&[wire::STR8, len], b)
    }

    /// Encode a binary payload.
    ///
    /// # Errors
    ///
    /// Returns `LengthUnsupported` for payloads longer than 255 bytes and
    /// `InsufficientCapacity` if the encoding does not fit.
    pub fn add_binary(&mut self, data: &[u8]) -> Result<(), MsgPackError> {
        let len = self.payload_len(data)?;
        self.emit(&[wire::BIN8, len], data)
    }

    /// Begin a map of `count` key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCapacity` if the header does not fit.
    pub fn add_map(&mut self, count: u8) -> Result<(), MsgPackError> {
        self.container_header(count, wire::FIXMAP, wire::MAP16)
    }

    /// Begin an array of `count` elements.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCapacity` if the header does not fit.
    pub fn add_array(&mut self, count: u8) -> Result<(), MsgPackError> {
        self.container_header(count, wire::FIXARRAY, wire::ARRAY16)
    }

    fn payload_len(&self, payload: &[u8]) -> Result<u8, MsgPackError> {
        let unsupported = || MsgPackError::new(ErrorCode::LengthUnsupported, usize::from(self.position));
        if payload.len() > STR8_MAX_LEN {
            return Err(unsupported());
        }
        u8::try_from(payload.len()).map_err(|_| unsupported())
    }

    fn container_header(&mut self, count: u8, compact: u8, explicit: u8) -> Result<(), MsgPackError> {
        if count <= FIXCOLLECTION_MAX_LEN {
            return self.emit(&[compact | count], &[]);
        }
        let [hi, lo] = u16::from(count).to_be_bytes();
        self.emit(&[explicit, hi, lo], &[])
    }
}
