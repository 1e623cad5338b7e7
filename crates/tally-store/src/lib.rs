//! File-backed persistence for tally records.
//!
//! [`save`] and [`load`] move one [`Buffer`](tally_core::Buffer) to and
//! from a file using the `tally-codec` format. Every file handle is an
//! owned value, so it is closed on every exit path including errors.
//!
//! Saves are all-or-nothing by default: the record is written to a
//! sibling temp file and renamed over the target, so a failed save leaves
//! the previous record in place. See [`WriteMode`] for the alternative.
//!
//! There is no locking. Concurrent saves or loads on the same path must be
//! serialised by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod store;

pub use config::{StoreConfig, WriteMode};
pub use store::{load, save, Store};
