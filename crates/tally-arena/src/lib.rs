//! Jagged matrices with arena-like ownership of their rows.
//!
//! A [`Matrix`] owns one index vector and `N` row [`Buffer`]s that were
//! each allocated separately. Allocation is all-or-nothing: if any row
//! cannot be allocated, the rows obtained so far and the index are
//! released before the error reaches the caller.
//!
//! ```text
//! Matrix
//! ├── index: Vec<Buffer>   (allocated first, released last)
//! │   ├── row 0: Buffer    (col_count zeroed i32)
//! │   ├── row 1: Buffer
//! │   └── ...
//! ```
//!
//! [`Buffer`]: tally_core::Buffer

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod matrix;

pub use matrix::{Matrix, Rows};
