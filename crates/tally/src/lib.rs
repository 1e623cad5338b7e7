//! Tally: length-prefixed integer records with explicit ownership.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all tally sub-crates. For most users, adding `tally` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("fibonacci.bin");
//!
//! // Generate, persist, and read back the first ten Fibonacci numbers.
//! let fib = fibonacci(10).unwrap();
//! save(&fib, &path).unwrap();
//! let loaded = load(&path).unwrap();
//! assert_eq!(loaded, [1, 1, 2, 3, 5, 8, 13, 21, 34, 55]);
//!
//! // The same record, encoded in memory.
//! let bytes = encode_to_vec(&loaded).unwrap();
//! assert_eq!(bytes.len(), 4 + 10 * 4);
//! assert_eq!(decode_from_slice(&bytes).unwrap(), fib);
//!
//! // A 3x4 matrix of independently allocated rows.
//! let mut m = Matrix::allocate(3, 4).unwrap();
//! m.set(1, 2, 7);
//! assert_eq!(m.get(1, 2), 7);
//! m.release();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tally-core` | `Buffer`, sequence generators, `TallyError` |
//! | [`arena`] | `tally-arena` | `Matrix` of independently owned rows |
//! | [`codec`] | `tally-codec` | Binary record encode/decode, `CodecConfig` |
//! | [`store`] | `tally-store` | File save/load, `StoreConfig`, `WriteMode` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Buffers, generators, and errors (`tally-core`).
pub use tally_core as types;

/// Jagged matrices (`tally-arena`).
pub use tally_arena as arena;

/// Binary record codec (`tally-codec`).
pub use tally_codec as codec;

/// File persistence (`tally-store`).
pub use tally_store as store;

/// Common imports for typical tally usage.
pub mod prelude {
    // Core types
    pub use tally_core::{fibonacci, recurrence, Buffer, ErrorKind, TallyError};

    // Matrix
    pub use tally_arena::Matrix;

    // Codec
    pub use tally_codec::{decode_from_slice, decode_record, encode_record, encode_to_vec};

    // Store
    pub use tally_store::{load, save, Store, StoreConfig, WriteMode};
}
