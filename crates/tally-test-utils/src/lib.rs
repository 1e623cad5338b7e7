//! Test utilities for tally development.
//!
//! Provides a [`TrackingAllocator`] that can be installed as the global
//! allocator of a test binary to count allocations and inject failures,
//! plus byte-level [`fixtures`] for hand-built (and deliberately broken)
//! records.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod fixtures;

pub use alloc::{track, AllocStats, TrackingAllocator};
pub use fixtures::{fibonacci_reference, raw_record, record_header};
