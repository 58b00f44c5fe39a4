//! Byte sinks for streaming binary payloads out of a message.

/// Consumer of decoded payload bytes, one byte at a time.
///
/// Returning `false` refuses the byte and aborts the read. Bytes accepted before the
/// refusal stay with the sink; the decoder does not roll anything back.
pub trait ByteSink {
    /// Consume one byte, returning `false` to stop the read.
    fn write(&mut self, byte: u8) -> bool;
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline]
    fn write(&mut self, byte: u8) -> bool {
        (**self).write(byte)
    }
}

#[cfg(feature = "alloc")]
impl ByteSink for alloc::vec::Vec<u8> {
    #[inline]
    fn write(&mut self, byte: u8) -> bool {
        if self.try_reserve(1).is_err() {
            return false;
        }
        self.push(byte);
        true
    }
}

/// A sink that fills a borrowed slice and refuses bytes once it is full.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`; writing starts at its first byte.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Number of bytes accepted so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no byte has been accepted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The accepted bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl ByteSink for SliceSink<'_> {
    fn write(&mut self, byte: u8) -> bool {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                true
            }
            None => false,
        }
    }
}
