use zc_msgpack::{ByteSink, Decoder, Encoder, SliceSink};

const THIRTY_ONE: &str = "1234567890123456789012345678901";

fn encode_str(buf: &mut [u8], s: &str) -> usize {
    let mut enc = Encoder::new(buf);
    enc.add_str(s).unwrap();
    usize::from(enc.message_size())
}

/// Accepts `limit` bytes, then refuses everything.
struct Refusing {
    got: Vec<u8>,
    limit: usize,
}

impl ByteSink for Refusing {
    fn write(&mut self, byte: u8) -> bool {
        if self.got.len() == self.limit {
            return false;
        }
        self.got.push(byte);
        true
    }
}

#[test]
fn compare_string_is_exact() {
    let mut buf = [0u8; 64];
    let n = encode_str(&mut buf, THIRTY_ONE);
    assert_eq!(n, 32);
    let d = Decoder::from_slice(&buf[..n]).unwrap();

    assert_eq!(d.compare_string(THIRTY_ONE), Some(true));
    assert_eq!(d.compare_string("1234567890123456789012345678901 "), Some(false));
    assert_eq!(d.compare_string("123456789012345678901234567890"), Some(false));
    assert_eq!(d.compare_string("1234567890123456789012345678902"), Some(false));
    assert_eq!(d.compare_string(""), Some(false));

    let with_space = format!("{THIRTY_ONE} ");
    let n = encode_str(&mut buf, &with_space);
    assert_eq!(n, 34);
    assert_eq!(buf[0], 0xd9);
    let d = Decoder::from_slice(&buf[..n]).unwrap();
    assert_eq!(d.compare_string(&with_space), Some(true));
    assert_eq!(d.compare_string(THIRTY_ONE), Some(false));
}

#[test]
fn compare_binary_payloads() {
    let bytes = [0xc4, 0x03, 0x00, 0xff, 0x10];
    let d = Decoder::from_slice(&bytes).unwrap();
    assert_eq!(d.compare_bytes(&[0x00, 0xff, 0x10]), Some(true));
    assert_eq!(d.compare_bytes(&[0x00, 0xff]), Some(false));
}

#[test]
fn empty_string() {
    let bytes = [0xa0];
    let d = Decoder::from_slice(&bytes).unwrap();
    assert_eq!(d.compare_string(""), Some(true));
    assert_eq!(d.get_str(), Some(""));

    let mut out = [0xffu8; 1];
    assert_eq!(d.get_string(&mut out), Some(0));
    assert_eq!(out, [0]);
}

#[test]
fn get_string_reserves_terminator() {
    let bytes = [0xa3, b'a', b'b', b'c'];
    let d = Decoder::from_slice(&bytes).unwrap();

    let mut exact = [0xffu8; 4];
    assert_eq!(d.get_string(&mut exact), Some(3));
    assert_eq!(&exact, b"abc\0");

    // Three payload bytes do not fit next to a terminator in three bytes.
    let mut short = [0xffu8; 3];
    assert_eq!(d.get_string(&mut short), None);
    assert_eq!(short[0], 0);

    let mut none: [u8; 0] = [];
    assert_eq!(d.get_string(&mut none), None);
}

#[test]
fn get_binary_copies_exact_length() {
    let bytes = [0xc4, 0x02, 0xde, 0xad];
    let d = Decoder::from_slice(&bytes).unwrap();

    let mut out = [0u8; 4];
    assert_eq!(d.get_binary(&mut out), Some(2));
    assert_eq!(out, [0xde, 0xad, 0, 0]);

    let mut tight = [0u8; 2];
    assert_eq!(d.get_binary(&mut tight), Some(2));

    let mut small = [0u8; 1];
    assert_eq!(d.get_binary(&mut small), None);
    assert_eq!(small, [0]);
}

#[test]
fn truncated_payload_is_rejected() {
    // str8 of length 4 with only two bytes present.
    let bytes = [0xd9, 0x04, b'a', b'b'];
    let d = Decoder::from_slice(&bytes).unwrap();
    let mut out = [0u8; 8];
    assert_eq!(d.get_binary(&mut out), None);
    assert_eq!(d.compare_string("ab"), None);
    assert_eq!(d.get_bytes(), None);
    let mut spill = [0u8; 8];
    assert_eq!(d.get_binary_into(&mut SliceSink::new(&mut spill)), None);
}

#[cfg(feature = "alloc")]
#[test]
fn stream_into_vec() {
    let mut buf = [0u8; 64];
    let n = encode_str(&mut buf, "stream me");
    let d = Decoder::from_slice(&buf[..n]).unwrap();

    let mut out: Vec<u8> = Vec::new();
    assert_eq!(d.get_binary_into(&mut out), Some(9));
    assert_eq!(out, b"stream me");

    assert_eq!(d.get_binary_vec().as_deref(), Some(&b"stream me"[..]));
}

#[test]
fn stream_stops_at_refusal_without_rollback() {
    let bytes = [0xa5, b'h', b'e', b'l', b'l', b'o'];
    let d = Decoder::from_slice(&bytes).unwrap();

    let mut sink = Refusing {
        got: Vec::new(),
        limit: 3,
    };
    assert_eq!(d.get_binary_into(&mut sink), None);
    assert_eq!(sink.got, b"hel");

    let mut sink = Refusing {
        got: Vec::new(),
        limit: 5,
    };
    assert_eq!(d.get_binary_into(&mut sink), Some(5));
    assert_eq!(sink.got, b"hello");
}

#[test]
fn stream_into_slice_sink() {
    let bytes = [0xa4, b'r', b'u', b's', b't'];
    let d = Decoder::from_slice(&bytes).unwrap();

    let mut storage = [0u8; 2];
    let mut sink = SliceSink::new(&mut storage);
    assert_eq!(d.get_binary_into(&mut sink), None);
    assert_eq!(sink.as_bytes(), b"ru");

    let mut storage = [0u8; 8];
    let mut sink = SliceSink::new(&mut storage);
    assert_eq!(d.get_binary_into(&mut sink), Some(4));
    assert_eq!(sink.len(), 4);
    assert_eq!(sink.as_bytes(), b"rust");
}

#[test]
fn multibyte_text_is_measured_in_bytes() {
    let text = "Grüße, 世界";
    let mut buf = [0u8; 64];
    let n = encode_str(&mut buf, text);
    assert_eq!(n, 1 + text.len());
    assert_eq!(buf[0], 0xa0 | 15);

    let d = Decoder::from_slice(&buf[..n]).unwrap();
    assert_eq!(d.get_str(), Some(text));
    assert_eq!(d.compare_string(text), Some(true));
}

#[test]
fn longest_string() {
    let s = "x".repeat(253);
    let mut buf = [0u8; 255];
    let n = encode_str(&mut buf, &s);
    assert_eq!(n, 255);

    let d = Decoder::from_slice(&buf).unwrap();
    assert_eq!(d.get_str(), Some(s.as_str()));
    let mut out = [0u8; 254];
    assert_eq!(d.get_string(&mut out), Some(253));
    assert_eq!(out[253], 0);
}

#[cfg(feature = "sha2")]
#[test]
fn digests_agree() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf);
    enc.add_array(2).unwrap();
    enc.add_str("id").unwrap();
    enc.add_uint(9).unwrap();
    let enc_digest = enc.sha256();
    let msg = enc.finish();

    let d = Decoder::from_slice(msg).unwrap();
    assert_eq!(d.sha256(), enc_digest);
    assert_ne!(enc_digest, [0u8; 32]);
}
