//! Hand-built records and reference sequences.
//!
//! The byte builders here bypass the codec entirely so tests can produce
//! inputs the encoder would never emit: negative lengths, short payloads,
//! trailing garbage.

use tally_core::Buffer;

/// Encode just a length prefix.
pub fn record_header(len: i32) -> Vec<u8> {
    len.to_le_bytes().to_vec()
}

/// A length prefix followed by `payload`, with no consistency check
/// between the two.
pub fn raw_record(len: i32, payload: &[i32]) -> Vec<u8> {
    let mut bytes = record_header(len);
    for v in payload {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Naive Fibonacci reference computed in `i64` and truncated to 32 bits.
///
/// # Panics
///
/// Panics if `n` exceeds the buffer length limit.
pub fn fibonacci_reference(n: usize) -> Buffer {
    let mut out = Vec::with_capacity(n);
    let (mut a, mut b) = (1i64, 1i64);
    for _ in 0..n {
        out.push(a as i32);
        let next = (a + b) & 0xFFFF_FFFF;
        a = b;
        b = next;
    }
    Buffer::from_vec(out).expect("reference length fits in a buffer")
}
