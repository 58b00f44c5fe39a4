#![no_main]

use libfuzzer_sys::fuzz_target;

use zc_msgpack::{Decoder, Kind, SliceSink};

fn touch(d: &Decoder<'_>) {
    let mut out = [0u8; 64];
    let _ = d.kind();
    let _ = d.is_nil();
    let _ = d.get_bool();
    let _ = d.get_u32();
    let _ = d.get_str();
    let _ = d.get_string(&mut out);
    let _ = d.get_binary_into(&mut SliceSink::new(&mut out));
    let _ = d.compare_string("key");
}

fuzz_target!(|data: &[u8]| {
    // The first byte picks the declared size so truncations get explored too.
    let Some((&size, rest)) = data.split_first() else {
        return;
    };
    let rest = &rest[..rest.len().min(255)];
    let root = Decoder::new(rest, size);
    touch(&root);

    match root.kind() {
        Some(Kind::Array) => {
            for i in 0..8u8 {
                let item = root.access_index(i);
                touch(&item);
                touch(&item.access_index(0));
            }
        }
        Some(Kind::Map) => {
            for i in 0..8u8 {
                let (k, v) = root.entry(i);
                touch(&k);
                touch(&v);
                if let Some(key) = k.get_bytes() {
                    let mut by_key = root;
                    by_key.seek_key_bytes(key);
                    touch(&by_key);
                }
            }
        }
        _ => {}
    }

    let mut skipped = root;
    skipped.skip_element();
    assert!(skipped.position() <= skipped.size());
});
