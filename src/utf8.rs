#[cfg(all(feature = "simdutf8", not(feature = "unsafe-utf8")))]
use simdutf8::basic as simd_utf8;

/// Returns a `&str` view of a string payload.
///
/// With `unsafe-utf8` the bytes are trusted as produced by a well-behaved encoder and
/// validation is skipped.
#[inline]
pub fn to_str(bytes: &[u8]) -> Option<&str> {
    #[cfg(feature = "unsafe-utf8")]
    {
        // Safety: the `unsafe-utf8` feature is an explicit opt-in that payloads are UTF-8.
        Some(unsafe { core::str::from_utf8_unchecked(bytes) })
    }

    #[cfg(all(feature = "simdutf8", not(feature = "unsafe-utf8")))]
    {
        simd_utf8::from_utf8(bytes).ok()
    }

    #[cfg(not(any(feature = "simdutf8", feature = "unsafe-utf8")))]
    {
        core::str::from_utf8(bytes).ok()
    }
}
