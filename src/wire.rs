//! Tag bytes of the supported MessagePack subset.

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const BIN8: u8 = 0xc4;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;

pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;

pub const STR8: u8 = 0xd9;
pub const ARRAY16: u8 = 0xdc;
pub const MAP16: u8 = 0xde;

/// Prefix of a compact string; the low five bits carry the length.
pub const FIXSTR: u8 = 0xa0;
/// Prefix of a compact array; the low four bits carry the count.
pub const FIXARRAY: u8 = 0x90;
/// Prefix of a compact map; the low four bits carry the pair count.
pub const FIXMAP: u8 = 0x80;
