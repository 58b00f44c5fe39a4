//! Header grammar of the supported MessagePack subset.
//!
//! A header is recomputed from the tag byte(s) whenever it is needed and never
//! stored. Anything the grammar does not recognise, or a multi-byte header that would
//! extend past the message end, decodes to `None`.

use crate::source::ByteSource;
use crate::wire;

/// The element kinds this crate can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `nil`.
    Nil,
    /// `true` or `false`.
    Bool,
    /// Unsigned integer (positive fixint, uint8, uint16, uint32).
    UInt,
    /// Signed integer tag (negative fixint, int8, int16, int32).
    ///
    /// These can be skipped over but not read as a value.
    Int,
    /// String or binary payload (fixstr, str8, bin8).
    Str,
    /// Array (fixarray, array16).
    Array,
    /// Map (fixmap, map16).
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Nil,
    False,
    True,
    UInt,
    Int,
    Str,
    Array,
    Map,
}

/// Decoded element header.
///
/// `count` is the number of trailing magnitude bytes for integers, the payload length
/// for strings, and the element (array) or pair (map) count for containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub tag: Tag,
    pub header_size: u8,
    pub count: u16,
}

impl Header {
    #[inline]
    const fn new(tag: Tag, header_size: u8, count: u16) -> Self {
        Self {
            tag,
            header_size,
            count,
        }
    }

    #[inline]
    const fn compact(tag: Tag, count: u8) -> Self {
        Self::new(tag, 1, count as u16)
    }

    pub const fn kind(self) -> Kind {
        match self.tag {
            Tag::Nil => Kind::Nil,
            Tag::False | Tag::True => Kind::Bool,
            Tag::UInt => Kind::UInt,
            Tag::Int => Kind::Int,
            Tag::Str => Kind::Str,
            Tag::Array => Kind::Array,
            Tag::Map => Kind::Map,
        }
    }

    /// Offset one past the end of this element's inline payload.
    ///
    /// Meaningless for containers, whose `count` is not a byte length.
    #[inline]
    pub const fn payload_end(self, position: u8) -> usize {
        position as usize + self.header_size as usize + self.count as usize
    }

    /// Offset of the first payload byte (or first child element).
    #[inline]
    pub const fn body_start(self, position: u8) -> usize {
        position as usize + self.header_size as usize
    }
}

/// Classify the element starting at `position` in a message of `size` bytes.
pub(crate) fn decode<S: ByteSource + ?Sized>(source: &S, size: u8, position: u8) -> Option<Header> {
    if position >= size {
        return None;
    }
    let remaining = size - position;
    let b = source.read_u8(position)?;

    if b & 0x80 == 0 {
        return Some(Header::compact(Tag::UInt, 0));
    }
    if b & 0xe0 == 0xe0 {
        return Some(Header::compact(Tag::Int, 0));
    }
    if b & 0xe0 == wire::FIXSTR {
        return Some(Header::compact(Tag::Str, b & 0x1f));
    }
    match b & 0xf0 {
        wire::FIXARRAY => return Some(Header::compact(Tag::Array, b & 0x0f)),
        wire::FIXMAP => return Some(Header::compact(Tag::Map, b & 0x0f)),
        _ => {}
    }

    match b {
        wire::NIL => Some(Header::compact(Tag::Nil, 0)),
        wire::FALSE => Some(Header::compact(Tag::False, 0)),
        wire::TRUE => Some(Header::compact(Tag::True, 0)),

        wire::UINT8 => Some(Header::compact(Tag::UInt, 1)),
        wire::UINT16 => Some(Header::compact(Tag::UInt, 2)),
        wire::UINT32 => Some(Header::compact(Tag::UInt, 4)),

        wire::INT8 => Some(Header::compact(Tag::Int, 1)),
        wire::INT16 => Some(Header::compact(Tag::Int, 2)),
        wire::INT32 => Some(Header::compact(Tag::Int, 4)),

        wire::STR8 | wire::BIN8 => {
            if remaining < 2 {
                return None;
            }
            // position < size <= 255, so position + 1 cannot overflow.
            let len = source.read_u8(position + 1)?;
            Some(Header::new(Tag::Str, 2, u16::from(len)))
        }
        wire::ARRAY16 | wire::MAP16 => {
            if remaining < 3 {
                return None;
            }
            let mut count = [0u8; 2];
            if !source.read(position + 1, &mut count) {
                return None;
            }
            let tag = if b == wire::ARRAY16 {
                Tag::Array
            } else {
                Tag::Map
            };
            Some(Header::new(tag, 3, u16::from_be_bytes(count)))
        }

        _ => None,
    }
}
