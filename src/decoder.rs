//! Cursor-based navigation over an encoded message.
//!
//! A [`Decoder`] is a small `Copy` value: a borrowed byte source, the message size, a
//! position and a sticky validity flag. Navigation moves the position without building
//! any tree. Descending by key or index ([`Decoder::access`], [`Decoder::access_index`])
//! copies the cursor and moves the copy, so the receiver is never changed.
//!
//! Failures poison the cursor: once invalid, every navigation step is a no-op and every
//! accessor returns `None` until [`Decoder::reset`].

use core::fmt;

use crate::header::{self, Header, Kind, Tag};
use crate::limits::MAX_MESSAGE_SIZE;
use crate::source::ByteSource;
use crate::{ErrorCode, MsgPackError};

/// A path element for navigating inside a message.
///
/// The navigator supports map keys (strings) and array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathElem<'p> {
    /// Select the value stored under a string key of a map.
    Key(&'p str),
    /// Select an element of an array.
    Index(u8),
}

impl<'p> From<&'p str> for PathElem<'p> {
    fn from(key: &'p str) -> Self {
        Self::Key(key)
    }
}

impl From<u8> for PathElem<'_> {
    fn from(index: u8) -> Self {
        Self::Index(index)
    }
}

/// A read cursor into a message of at most 255 bytes.
///
/// `S` is the byte source; it defaults to a plain memory slice. The source is borrowed
/// for the cursor's whole lifetime and is never written to, so any number of cursors may
/// read the same message at once.
pub struct Decoder<'a, S: ?Sized = [u8]> {
    pub(crate) source: &'a S,
    pub(crate) size: u8,
    pub(crate) position: u8,
    pub(crate) valid: bool,
}

impl<S: ?Sized> Clone for Decoder<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Decoder<'_, S> {}

impl<S: ?Sized> fmt::Debug for Decoder<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("size", &self.size)
            .field("position", &self.position)
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

impl<'a> Decoder<'a, [u8]> {
    /// Construct a decoder over an in-memory message.
    ///
    /// # Errors
    ///
    /// Returns `MessageTooLarge` if `bytes` is longer than 255 bytes.
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self, MsgPackError> {
        let size = u8::try_from(bytes.len())
            .map_err(|_| MsgPackError::new(ErrorCode::MessageTooLarge, MAX_MESSAGE_SIZE))?;
        Ok(Self::new(bytes, size))
    }
}

impl<'a, S: ByteSource + ?Sized> Decoder<'a, S> {
    /// Construct a decoder over the first `size` bytes of `source`, positioned on the
    /// root element.
    #[must_use]
    pub const fn new(source: &'a S, size: u8) -> Self {
        Self {
            source,
            size,
            position: 0,
            valid: true,
        }
    }

    /// The byte source this cursor reads from.
    #[must_use]
    pub const fn source(&self) -> &'a S {
        self.source
    }

    /// Message size in bytes.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Offset of the element the cursor is on.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Return to the root element and clear the invalid flag.
    ///
    /// This is the only way to recover a poisoned cursor.
    pub fn reset(&mut self) {
        self.position = 0;
        self.valid = true;
    }

    /// Check that the cursor is usable and points at a decodable element.
    ///
    /// Surviving earlier seeks does not guarantee this: length fields can still be
    /// inconsistent. An undecodable element poisons the cursor.
    pub fn is_valid(&mut self) -> bool {
        if self.header().is_none() {
            self.valid = false;
        }
        self.valid
    }

    /// Kind of the element at the cursor, or `None` if it cannot be decoded.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        self.header().map(Header::kind)
    }

    #[inline]
    pub(crate) fn header(&self) -> Option<Header> {
        if !self.valid {
            return None;
        }
        header::decode(self.source, self.size, self.position)
    }

    #[inline]
    fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Move to `offset`, clamped to the message end.
    #[inline]
    fn move_to(&mut self, offset: usize) {
        let clamped = offset.min(usize::from(self.size));
        self.position = u8::try_from(clamped).unwrap_or(self.size);
    }

    /// Step over the element at the cursor, including everything nested in it.
    ///
    /// Containers are walked with a single counter of elements still to skip, so stack
    /// use is constant regardless of nesting. Every iteration consumes at least one byte
    /// or poisons the cursor, which bounds the loop by the message size.
    ///
    /// Landing on or past the message end after a scalar poisons the cursor, as does any
    /// undecodable header on the way.
    pub fn skip_element(&mut self) {
        let mut pending: u32 = 1;
        while pending > 0 {
            let Some(h) = self.header() else {
                self.invalidate();
                return;
            };
            pending -= 1;

            match h.tag {
                Tag::Map => {
                    self.move_to(h.body_start(self.position));
                    pending = pending.saturating_add(2 * u32::from(h.count));
                }
                Tag::Array => {
                    self.move_to(h.body_start(self.position));
                    pending = pending.saturating_add(u32::from(h.count));
                }
                _ => {
                    let end = h.payload_end(self.position);
                    self.move_to(end);
                    if end >= usize::from(self.size) {
                        self.invalidate();
                        return;
                    }
                }
            }
        }
    }

    /// Move onto element `index` of the array at the cursor.
    ///
    /// Poisons the cursor if it is not on an array or `index` is out of range.
    pub fn seek_index(&mut self, index: u8) {
        let Some(h) = self.header() else {
            self.invalidate();
            return;
        };
        if h.tag != Tag::Array || u16::from(index) >= h.count {
            self.invalidate();
            return;
        }

        self.move_to(h.body_start(self.position));
        for _ in 0..index {
            self.skip_element();
            if !self.valid {
                return;
            }
        }
    }

    /// Move onto the value stored under `key` in the map at the cursor.
    ///
    /// Keys are compared byte for byte; the first match wins. Poisons the cursor if it
    /// is not on a map, a key cannot be decoded as a string, or no key matches.
    pub fn seek_key(&mut self, key: &str) {
        self.seek_key_bytes(key.as_bytes());
    }

    /// [`Decoder::seek_key`] for keys that are not UTF-8.
    pub fn seek_key_bytes(&mut self, key: &[u8]) {
        let Some(h) = self.header() else {
            self.invalidate();
            return;
        };
        if h.tag != Tag::Map {
            self.invalidate();
            return;
        }

        self.move_to(h.body_start(self.position));
        for _ in 0..h.count {
            match self.compare_bytes(key) {
                None => {
                    self.invalidate();
                    return;
                }
                Some(true) => {
                    self.skip_element();
                    return;
                }
                Some(false) => {
                    self.skip_element();
                    self.skip_element();
                }
            }
        }
        self.invalidate();
    }

    /// Move onto the key of entry `index` of the map at the cursor.
    ///
    /// Poisons the cursor if it is not on a map or `index` is out of range.
    pub fn seek_entry(&mut self, index: u8) {
        let Some(h) = self.header() else {
            self.invalidate();
            return;
        };
        if h.tag != Tag::Map || u16::from(index) >= h.count {
            self.invalidate();
            return;
        }

        self.move_to(h.body_start(self.position));
        for _ in 0..index {
            self.skip_element();
            self.skip_element();
            if !self.valid {
                return;
            }
        }
    }

    /// Returns a cursor on the value stored under `key`; `self` is unchanged.
    #[must_use]
    pub fn access(&self, key: &str) -> Self {
        let mut child = *self;
        child.seek_key(key);
        child
    }

    /// Returns a cursor on array element `index`; `self` is unchanged.
    #[must_use]
    pub fn access_index(&self, index: u8) -> Self {
        let mut child = *self;
        child.seek_index(index);
        child
    }

    /// Returns `(key, value)` cursors for map entry `index`; `self` is unchanged.
    ///
    /// Both cursors are invalid if the map or index is wrong or the key is not a string.
    #[must_use]
    pub fn entry(&self, index: u8) -> (Self, Self) {
        let mut key = *self;
        key.seek_entry(index);
        if key.str_header().is_none() {
            key.invalidate();
        }
        let mut value = key;
        value.skip_element();
        (key, value)
    }

    /// Follow `path` from the cursor and return the resulting cursor.
    ///
    /// Stops descending at the first failing step; the returned cursor is then invalid.
    #[must_use]
    pub fn at(&self, path: &[PathElem<'_>]) -> Self {
        let mut cur = *self;
        for pe in path {
            if !cur.valid {
                break;
            }
            match *pe {
                PathElem::Key(k) => cur.seek_key(k),
                PathElem::Index(i) => cur.seek_index(i),
            }
        }
        cur
    }
}
