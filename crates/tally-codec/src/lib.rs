//! Binary record format for tally integer sequences.
//!
//! Translates a [`Buffer`](tally_core::Buffer) to and from bytes. The
//! codec works over any `Read`/`Write`, so tests use `Vec<u8>` and `&[u8]`
//! while the store hands it a file.
//!
//! # Format
//!
//! ```text
//! [LENGTH i32 LE] [ELEMENT 0 i32 LE] [ELEMENT 1 i32 LE] ... [ELEMENT N-1 i32 LE]
//! ```
//!
//! There is no magic, version byte, checksum, padding, or terminator. A
//! reader must know the schema out-of-band.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;

pub use codec::{
    decode_exact, decode_from_slice, decode_record, decode_record_with, encode_record,
    encode_to_vec, encoded_len,
};
pub use config::CodecConfig;

/// Width of the length prefix in bytes.
pub const LEN_PREFIX_BYTES: usize = 4;

/// Width of one stored element in bytes.
pub const ELEMENT_BYTES: usize = 4;
