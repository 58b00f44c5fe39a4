//! Byte sources the decoder reads messages from.

/// Random-access supplier of message bytes.
///
/// The decoder only ever asks for ranges inside the message size it was constructed
/// with, so a source backed by storage of at least that size never sees an
/// out-of-range request. Implementations still bounds-check and report `false` when a
/// range cannot be served; the decoder treats that exactly like a truncated message.
pub trait ByteSource {
    /// Fill `out` with the bytes at `offset..offset + out.len()`.
    ///
    /// Returns `false` (leaving `out` unspecified) if the range cannot be read.
    fn read(&self, offset: u8, out: &mut [u8]) -> bool;

    /// Read the single byte at `offset`.
    #[inline]
    fn read_u8(&self, offset: u8) -> Option<u8> {
        let mut b = [0u8; 1];
        if self.read(offset, &mut b) {
            Some(b[0])
        } else {
            None
        }
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn read(&self, offset: u8, out: &mut [u8]) -> bool {
        let start = usize::from(offset);
        let Some(end) = start.checked_add(out.len()) else {
            return false;
        };
        match self.get(start..end) {
            Some(src) => {
                out.copy_from_slice(src);
                true
            }
            None => false,
        }
    }

    #[inline]
    fn read_u8(&self, offset: u8) -> Option<u8> {
        self.get(usize::from(offset)).copied()
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    #[inline]
    fn read(&self, offset: u8, out: &mut [u8]) -> bool {
        self.as_slice().read(offset, out)
    }

    #[inline]
    fn read_u8(&self, offset: u8) -> Option<u8> {
        self.as_slice().read_u8(offset)
    }
}
