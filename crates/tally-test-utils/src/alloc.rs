//! Allocation-tracking global allocator.
//!
//! Install once per test binary:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: tally_test_utils::TrackingAllocator = tally_test_utils::TrackingAllocator;
//! ```
//!
//! and wrap the code under test in [`track`]. Only allocations made on the
//! calling thread while inside `track` are counted, so the test harness's
//! own threads do not disturb the numbers.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

/// Counters collected by one [`track`] scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful allocations.
    pub allocations: usize,
    /// Deallocations.
    pub deallocations: usize,
    /// Allocation requests refused by fault injection.
    pub failures: usize,
    /// Bytes allocated minus bytes freed inside the scope.
    pub live_bytes: isize,
}

impl AllocStats {
    /// Allocations made in the scope that were not freed in it.
    pub fn live_allocations(&self) -> isize {
        self.allocations as isize - self.deallocations as isize
    }
}

#[derive(Clone, Copy)]
struct TrackState {
    armed: bool,
    /// Number of allocations allowed before every further request fails.
    fail_after: usize,
    stats: AllocStats,
}

impl TrackState {
    const IDLE: Self = Self {
        armed: false,
        fail_after: usize::MAX,
        stats: AllocStats {
            allocations: 0,
            deallocations: 0,
            failures: 0,
            live_bytes: 0,
        },
    };
}

thread_local! {
    static STATE: Cell<TrackState> = const { Cell::new(TrackState::IDLE) };
}

/// Global allocator that forwards to [`System`] and records per-thread
/// statistics while a [`track`] scope is active.
pub struct TrackingAllocator;

// SAFETY: every request is forwarded unchanged to `System`, or refused by
// returning null, which `GlobalAlloc` permits. The bookkeeping touches only
// a const-initialised thread-local `Cell` and never allocates.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let refuse = STATE
            .try_with(|cell| {
                let mut state = cell.get();
                if !state.armed {
                    return false;
                }
                if state.stats.allocations >= state.fail_after {
                    state.stats.failures += 1;
                    cell.set(state);
                    return true;
                }
                state.stats.allocations += 1;
                state.stats.live_bytes += layout.size() as isize;
                cell.set(state);
                false
            })
            .unwrap_or(false);
        if refuse {
            return ptr::null_mut();
        }
        // SAFETY: `layout` comes straight from the caller, who upholds
        // `GlobalAlloc::alloc`'s contract.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = STATE.try_with(|cell| {
            let mut state = cell.get();
            if state.armed {
                state.stats.deallocations += 1;
                state.stats.live_bytes -= layout.size() as isize;
                cell.set(state);
            }
        });
        // SAFETY: `ptr` was returned by `System.alloc` with this `layout`.
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// Run `f` with allocation tracking enabled on the current thread.
///
/// With `fail_after = Some(n)`, the first `n` allocations succeed and every
/// later one fails. Returns `f`'s result with the counters for the scope.
/// Only meaningful when [`TrackingAllocator`] is the global allocator.
pub fn track<R>(fail_after: Option<usize>, f: impl FnOnce() -> R) -> (R, AllocStats) {
    STATE.with(|cell| {
        cell.set(TrackState {
            armed: true,
            fail_after: fail_after.unwrap_or(usize::MAX),
            stats: AllocStats::default(),
        })
    });
    let result = f();
    let stats = STATE.with(|cell| {
        let state = cell.get();
        cell.set(TrackState::IDLE);
        state.stats
    });
    (result, stats)
}
