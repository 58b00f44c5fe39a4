//! Typed accessors for the element at a cursor.
//!
//! Every accessor decodes the header again and checks the payload against the message
//! size using the header's own declared length before reading anything. A type mismatch
//! returns `None` and leaves the cursor's validity alone, so the caller can try a
//! different accessor at the same position.

use crate::decoder::Decoder;
use crate::header::{Header, Tag};
use crate::sink::ByteSink;
use crate::source::ByteSource;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

impl<'a, S: ByteSource + ?Sized> Decoder<'a, S> {
    /// Header of the element at the cursor if its payload lies inside the message.
    #[inline]
    fn bounded_header(&self, tag: Tag) -> Option<Header> {
        let h = self.header()?;
        if h.tag != tag || h.payload_end(self.position) > usize::from(self.size) {
            return None;
        }
        Some(h)
    }

    /// Header of a string or binary element whose payload lies inside the message.
    #[inline]
    pub(crate) fn str_header(&self) -> Option<Header> {
        self.bounded_header(Tag::Str)
    }

    /// Offset of payload byte `i` of the element described by `h`.
    #[inline]
    fn payload_offset(&self, h: Header, i: usize) -> Option<u8> {
        u8::try_from(h.body_start(self.position) + i).ok()
    }

    #[inline]
    fn read_array<const N: usize>(&self, offset: u8) -> Option<[u8; N]> {
        let mut out = [0u8; N];
        if self.source.read(offset, &mut out) {
            Some(out)
        } else {
            None
        }
    }

    /// Returns whether the element is `nil`; `None` if it cannot be decoded.
    #[must_use]
    pub fn is_nil(&self) -> Option<bool> {
        self.header().map(|h| h.tag == Tag::Nil)
    }

    /// Decodes the element as a boolean.
    #[must_use]
    pub fn get_bool(&self) -> Option<bool> {
        match self.header()?.tag {
            Tag::True => Some(true),
            Tag::False => Some(false),
            _ => None,
        }
    }

    /// Decodes the element as an unsigned integer of up to 32 bits.
    #[must_use]
    pub fn get_u32(&self) -> Option<u32> {
        let h = self.bounded_header(Tag::UInt)?;
        match h.count {
            0 => Some(u32::from(self.source.read_u8(self.position)? & 0x7f)),
            1 => Some(u32::from(self.source.read_u8(self.payload_offset(h, 0)?)?)),
            2 => {
                let b = self.read_array::<2>(self.payload_offset(h, 0)?)?;
                Some(u32::from(u16::from_be_bytes(b)))
            }
            4 => {
                let b = self.read_array::<4>(self.payload_offset(h, 0)?)?;
                Some(u32::from_be_bytes(b))
            }
            _ => None,
        }
    }

    /// Decodes the element as a `u16`; `None` if the value does not fit.
    #[must_use]
    pub fn get_u16(&self) -> Option<u16> {
        self.get_u32().and_then(|v| u16::try_from(v).ok())
    }

    /// Decodes the element as a `u8`; `None` if the value does not fit.
    #[must_use]
    pub fn get_u8(&self) -> Option<u8> {
        self.get_u32().and_then(|v| u8::try_from(v).ok())
    }

    /// Compares the string at the cursor with `s` without copying it out.
    ///
    /// Returns `Some(true)` only for equal length and content. A string that is a strict
    /// prefix of `s`, or the other way round, is `Some(false)`. `None` means the element
    /// is not a readable string.
    #[must_use]
    pub fn compare_string(&self, s: &str) -> Option<bool> {
        self.compare_bytes(s.as_bytes())
    }

    /// [`Decoder::compare_string`] over raw bytes.
    #[must_use]
    pub fn compare_bytes(&self, s: &[u8]) -> Option<bool> {
        let h = self.str_header()?;
        if usize::from(h.count) != s.len() {
            return Some(false);
        }
        for (i, &expected) in s.iter().enumerate() {
            if self.source.read_u8(self.payload_offset(h, i)?)? != expected {
                return Some(false);
            }
        }
        Some(true)
    }

    /// Copies the string at the cursor into `out` and NUL-terminates it.
    ///
    /// At most `out.len() - 1` payload bytes fit. On any failure `out[0]` is set to `0`
    /// so the buffer always holds a terminated string. Returns the payload length.
    pub fn get_string(&self, out: &mut [u8]) -> Option<usize> {
        let cap = out.len().checked_sub(1)?;
        match self.get_binary(&mut out[..cap]) {
            Some(n) => {
                out[n] = 0;
                Some(n)
            }
            None => {
                out[0] = 0;
                None
            }
        }
    }

    /// Copies the payload at the cursor into the front of `out`.
    ///
    /// Fails if the payload is longer than `out`. Returns the payload length.
    pub fn get_binary(&self, out: &mut [u8]) -> Option<usize> {
        let h = self.str_header()?;
        let len = usize::from(h.count);
        let dst = out.get_mut(..len)?;
        if self.source.read(self.payload_offset(h, 0)?, dst) {
            Some(len)
        } else {
            None
        }
    }

    /// Streams the payload at the cursor into `sink`, one byte at a time.
    ///
    /// Returns `None` as soon as the sink refuses a byte; bytes it already accepted
    /// stay delivered. Returns the payload length on success.
    pub fn get_binary_into<K: ByteSink + ?Sized>(&self, sink: &mut K) -> Option<usize> {
        let h = self.str_header()?;
        let len = usize::from(h.count);
        for i in 0..len {
            let b = self.source.read_u8(self.payload_offset(h, i)?)?;
            if !sink.write(b) {
                return None;
            }
        }
        Some(len)
    }

    /// Copies the payload at the cursor into a new vector.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    #[must_use]
    pub fn get_binary_vec(&self) -> Option<Vec<u8>> {
        let h = self.str_header()?;
        let mut out = Vec::new();
        out.try_reserve_exact(usize::from(h.count)).ok()?;
        self.get_binary_into(&mut out)?;
        Some(out)
    }

    /// Number of elements of the array at the cursor.
    #[must_use]
    pub fn get_array_size(&self) -> Option<u16> {
        let h = self.header()?;
        (h.tag == Tag::Array).then_some(h.count)
    }

    /// Number of key/value pairs of the map at the cursor.
    #[must_use]
    pub fn get_map_size(&self) -> Option<u16> {
        let h = self.header()?;
        (h.tag == Tag::Map).then_some(h.count)
    }
}

impl<'a> Decoder<'a, [u8]> {
    /// Borrows the payload at the cursor straight from the message.
    #[must_use]
    pub fn get_bytes(&self) -> Option<&'a [u8]> {
        let h = self.str_header()?;
        let src: &'a [u8] = self.source;
        src.get(h.body_start(self.position)..h.payload_end(self.position))
    }

    /// Borrows the payload at the cursor as UTF-8 text.
    #[must_use]
    pub fn get_str(&self) -> Option<&'a str> {
        crate::utf8::to_str(self.get_bytes()?)
    }

    /// Compute the SHA-256 digest of the whole message.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let src: &'a [u8] = self.source;
        let msg = src.get(..usize::from(self.size)).unwrap_or(src);
        let mut h = Sha256::new();
        h.update(msg);
        let out = h.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(out.as_slice());
        digest
    }
}
