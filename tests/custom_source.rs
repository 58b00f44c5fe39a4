use std::cell::Cell;

use zc_msgpack::{ByteSource, Decoder, Encoder};

/// A source that serves bytes from a backing store and records the highest offset
/// it was asked for, like a serial EEPROM read one byte range at a time.
struct Recording<'a> {
    store: &'a [u8],
    reads: Cell<usize>,
    high_water: Cell<usize>,
}

impl<'a> Recording<'a> {
    fn new(store: &'a [u8]) -> Self {
        Self {
            store,
            reads: Cell::new(0),
            high_water: Cell::new(0),
        }
    }
}

impl ByteSource for Recording<'_> {
    fn read(&self, offset: u8, out: &mut [u8]) -> bool {
        self.reads.set(self.reads.get() + 1);
        let start = usize::from(offset);
        let end = start + out.len();
        self.high_water.set(self.high_water.get().max(end));
        match self.store.get(start..end) {
            Some(src) => {
                out.copy_from_slice(src);
                true
            }
            None => false,
        }
    }
}

/// A source whose storage is shorter than the message size it claims.
struct Short;

impl ByteSource for Short {
    fn read(&self, offset: u8, out: &mut [u8]) -> bool {
        let data = [0x82, 0xa1, b'a'];
        let start = usize::from(offset);
        match data.get(start..start + out.len()) {
            Some(src) => {
                out.copy_from_slice(src);
                true
            }
            None => false,
        }
    }
}

fn sample(buf: &mut [u8]) -> usize {
    let mut enc = Encoder::new(buf);
    enc.add_map(2).unwrap();
    enc.add_str("temp").unwrap();
    enc.add_uint(2_150).unwrap();
    enc.add_str("tags").unwrap();
    enc.add_array(2).unwrap();
    enc.add_str("indoor").unwrap();
    enc.add_bool(true).unwrap();
    usize::from(enc.message_size())
}

#[test]
fn navigates_through_custom_source() {
    let mut buf = [0u8; 64];
    let n = sample(&mut buf);
    let src = Recording::new(&buf);
    let root = Decoder::new(&src, u8::try_from(n).unwrap());

    assert_eq!(root.access("temp").get_u16(), Some(2_150));
    assert_eq!(root.access("tags").access_index(1).get_bool(), Some(true));
    assert_eq!(root.access("tags").access_index(0).compare_string("indoor"), Some(true));

    let mut out = [0u8; 8];
    assert_eq!(root.access("tags").access_index(0).get_string(&mut out), Some(6));
    assert_eq!(&out[..7], b"indoor\0");

    assert!(src.reads.get() > 0);
    assert!(src.high_water.get() <= n);
}

#[test]
fn reads_stay_inside_declared_size() {
    let mut buf = [0u8; 64];
    let n = sample(&mut buf);

    for size in 0..=n {
        let src = Recording::new(&buf);
        let root = Decoder::new(&src, u8::try_from(size).unwrap());
        let _ = root.access("temp").get_u32();
        let _ = root.access("tags").access_index(1).get_bool();
        let mut out = [0u8; 16];
        let _ = root.access("tags").access_index(0).get_string(&mut out);
        assert!(src.high_water.get() <= size, "size {size}");
    }
}

#[test]
fn failing_source_reads_as_truncation() {
    // Claims 5 bytes, can only serve 3.
    let src = Short;
    let mut root = Decoder::new(&src, 5);
    assert_eq!(root.get_map_size(), Some(2));
    assert_eq!(root.access("a").get_u8(), None);
    assert_eq!(root.access("a").kind(), None);
    assert!(root.is_valid());
}

#[test]
fn array_backed_source() {
    let store = [0x93u8, 0x01, 0x02, 0x03];
    let root = Decoder::new(&store, 4);
    assert_eq!(root.access_index(2).get_u8(), Some(3));
}
