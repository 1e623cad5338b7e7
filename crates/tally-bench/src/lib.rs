//! Benchmark inputs and shared helpers for tally.
//!
//! - [`sample_buffer`]: deterministic, non-trivial payloads of any length
//! - [`render_listing`]: the human-readable listing printed by the examples

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write as _;

use tally_core::{Buffer, Result};

/// Record sizes used across the codec benchmarks.
pub const BENCH_LENGTHS: [usize; 3] = [16, 4_096, 262_144];

/// A buffer of `len` elements whose bytes are all distinct-ish, so codec
/// benchmarks cannot be flattered by runs of zeros.
pub fn sample_buffer(len: usize) -> Result<Buffer> {
    let mut buf = Buffer::allocate(len)?;
    for (i, v) in buf.as_mut_slice().iter_mut().enumerate() {
        *v = (i as i32).wrapping_mul(0x9E37_79B1_u32 as i32) ^ ((i >> 3) as i32);
    }
    Ok(buf)
}

/// `First N <label> numbers:` followed by the values separated by spaces.
pub fn render_listing(label: &str, values: &Buffer) -> String {
    let mut out = format!("First {} {label} numbers:\n", values.len());
    for v in values.iter() {
        let _ = write!(out, "{v} ");
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_buffer_is_deterministic() {
        assert_eq!(sample_buffer(64).unwrap(), sample_buffer(64).unwrap());
        assert_eq!(sample_buffer(64).unwrap().len(), 64);
    }

    #[test]
    fn listing_format() {
        let fib = tally_core::fibonacci(5).unwrap();
        assert_eq!(
            render_listing("Fibonacci", &fib),
            "First 5 Fibonacci numbers:\n1 1 2 3 5 \n"
        );
    }
}
