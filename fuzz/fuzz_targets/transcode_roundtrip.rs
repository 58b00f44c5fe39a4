#![no_main]

use libfuzzer_sys::fuzz_target;

use zc_msgpack::{Decoder, Encoder, Kind};

/// Re-encodes the element at `d` in its smallest form. `None` if any part of it cannot
/// be read back or re-encoded.
fn transcode(d: Decoder<'_>, enc: &mut Encoder<'_>) -> Option<()> {
    match d.kind()? {
        Kind::Nil => enc.add_nil().ok(),
        Kind::Bool => enc.add_bool(d.get_bool()?).ok(),
        Kind::UInt => enc.add_uint(d.get_u32()?).ok(),
        Kind::Int => None,
        Kind::Str => match d.get_str() {
            Some(s) => enc.add_str(s).ok(),
            None => enc.add_binary(d.get_bytes()?).ok(),
        },
        Kind::Array => {
            let n = u8::try_from(d.get_array_size()?).ok()?;
            enc.add_array(n).ok()?;
            (0..n).try_for_each(|i| transcode(d.access_index(i), enc))
        }
        Kind::Map => {
            let n = u8::try_from(d.get_map_size()?).ok()?;
            enc.add_map(n).ok()?;
            (0..n).try_for_each(|i| {
                let (k, v) = d.entry(i);
                enc.add_str(k.get_str()?).ok()?;
                transcode(v, enc)
            })
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(root) = Decoder::from_slice(data) else {
        return;
    };

    let mut first = [0u8; 255];
    let mut enc = Encoder::new(&mut first);
    if transcode(root, &mut enc).is_none() {
        return;
    }
    // Not necessarily shorter: a fixstr holding invalid UTF-8 comes back as bin8.
    let once = enc.finish();

    let mut second = [0u8; 255];
    let mut enc = Encoder::new(&mut second);
    transcode(Decoder::from_slice(once).expect("fits"), &mut enc).expect("re-transcode");
    assert_eq!(enc.finish(), once);
});
