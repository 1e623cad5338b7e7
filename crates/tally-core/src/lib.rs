//! Core types for tally integer records.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the owned [`Buffer`] that every other crate passes around, the
//! sequence generators that fill one, and the [`TallyError`] taxonomy
//! shared by the codec and the on-disk store.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod sequence;

pub use buffer::Buffer;
pub use error::{ErrorKind, Result, TallyError};
pub use sequence::{fibonacci, recurrence};

/// Largest element count a single record can hold.
///
/// The persisted length prefix is a signed 32-bit integer, so any buffer
/// longer than this could not be written back out.
pub const MAX_RECORD_LEN: usize = i32::MAX as usize;
