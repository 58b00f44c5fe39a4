//! # zc-msgpack
//!
//! Zero-copy, allocation-free codec for a compact MessagePack subset, built for
//! memory-constrained links where a whole message fits in 255 bytes.
//!
//! ## Design principles
//!
//! - **Navigate, don't parse.**
//!   A [`Decoder`] is a cursor (position + validity flag) over borrowed bytes. Values are
//!   looked up by map key or array index by skipping over everything else; no tree is
//!   ever built.
//! - **Poison instead of panic.**
//!   Any malformed header, failed seek, or truncated payload marks the cursor invalid.
//!   An invalid cursor ignores further navigation and every accessor returns `None`
//!   until [`Decoder::reset`].
//! - **Check before every read.**
//!   Accessors decode the header again and bounds-check the payload against the message
//!   size on each call, so no input, however truncated, can cause an out-of-bounds read.
//! - **All-or-nothing appends.**
//!   [`Encoder`] checks remaining capacity before writing each value and never leaves a
//!   partial encoding behind.
//!
//! ## Supported wire format
//!
//! - `nil`, `true`, `false`
//! - unsigned integers up to 32 bits (positive fixint, uint8, uint16, uint32)
//! - signed integer tags (negative fixint, int8, int16, int32) are recognised and skipped,
//!   but cannot be read as values
//! - strings and binary up to 255 bytes (fixstr, str8, bin8)
//! - arrays and maps (fixarray/array16, fixmap/map16)
//!
//! 64-bit integers, floats and extension types are not supported. Multi-byte fields are
//! big-endian.
//!
//! ```
//! use zc_msgpack::{Decoder, Encoder};
//!
//! let mut buf = [0u8; 32];
//! let mut enc = Encoder::new(&mut buf);
//! enc.add_map(2).unwrap();
//! enc.add_str("id").unwrap();
//! enc.add_uint(300).unwrap();
//! enc.add_str("tags").unwrap();
//! enc.add_array(1).unwrap();
//! enc.add_str("hot").unwrap();
//! let msg = enc.finish();
//!
//! let root = Decoder::from_slice(msg).unwrap();
//! assert_eq!(root.access("id").get_u16(), Some(300));
//! assert_eq!(root.access("tags").access_index(0).get_str(), Some("hot"));
//! assert_eq!(root.access("missing").get_u32(), None);
//! ```
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`MsgPackError`].
//! - `alloc` *(default)*: `Vec<u8>` as a [`ByteSink`] and [`Decoder::get_binary_vec`].
//! - `sha2` *(default)*: SHA-256 digests of encoded messages.
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation for [`Decoder::get_str`].
//! - `unsafe-utf8`: skips UTF-8 validation in [`Decoder::get_str`] for trusted producers.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code by default. Enabling the `unsafe-utf8` feature allows
//! unchecked UTF-8 conversion of string payloads.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and never allocates unless `alloc` APIs are used.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "unsafe-utf8"), forbid(unsafe_code))]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod access;
mod decoder;
mod encode;
mod error;
mod header;
pub mod limits;
mod sink;
mod source;
pub(crate) mod utf8;
mod wire;

pub use crate::decoder::{Decoder, PathElem};
pub use crate::encode::Encoder;
pub use crate::error::{ErrorCode, MsgPackError};
pub use crate::header::Kind;
pub use crate::limits::MAX_MESSAGE_SIZE;
pub use crate::sink::{ByteSink, SliceSink};
pub use crate::source::ByteSource;

/// Construct a path slice for [`Decoder::at`].
///
/// String literals become map keys, `u8` values become array indices.
#[macro_export]
macro_rules! path {
    ($($seg:expr),* $(,)?) => {
        &[$($crate::__path_elem!($seg)),*]
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __path_elem {
    ($seg:expr) => {
        $crate::PathElem::from($seg)
    };
}
