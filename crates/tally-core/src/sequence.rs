//! Deterministic two-term recurrences written into fresh buffers.

use crate::buffer::Buffer;
use crate::error::{Result, TallyError};

/// The first `n` Fibonacci numbers, starting `1, 1, 2, 3, ...`.
///
/// Values wrap at 32 bits, matching the width of the stored format.
///
/// # Examples
///
/// ```
/// let fib = tally_core::fibonacci(10).unwrap();
/// assert_eq!(fib, [1, 1, 2, 3, 5, 8, 13, 21, 34, 55]);
/// ```
pub fn fibonacci(n: usize) -> Result<Buffer> {
    recurrence(n, 1, 1)
}

/// The first `n` terms of `a[i] = a[i-1] + a[i-2]` seeded with
/// `a[0] = first` and `a[1] = second`.
///
/// `n == 0` is rejected before anything is allocated.
pub fn recurrence(n: usize, first: i32, second: i32) -> Result<Buffer> {
    if n == 0 {
        return Err(TallyError::invalid("sequence length must be positive"));
    }
    let mut buf = Buffer::allocate(n)?;
    let terms = buf.as_mut_slice();
    terms[0] = first;
    if n == 1 {
        return Ok(buf);
    }
    terms[1] = second;
    for i in 2..n {
        terms[i] = terms[i - 1].wrapping_add(terms[i - 2]);
    }
    Ok(buf)
}
