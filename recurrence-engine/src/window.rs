//! Bottom-up evaluation over a sliding window.

use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::engine::RecurrenceEngine;
use crate::error::RecurrenceError;
use crate::params::RecurrenceParameters;
use crate::value::RecurrenceValue;

/// A value of the window, tagged with the row (`m` index) it belongs to.
#[derive(Debug, Clone, Copy)]
struct Slot<V> {
    row: u64,
    value: V,
}

/// Transient cache for one evaluation, addressed by `(i, j)` pairs.
///
/// Entry `(i, j)` lives at offset `i - j`. Row `j` overwrites row `j - 1` in
/// place: `(i - 1, j - 1)` sits at the same offset as `(i, j)` and is read
/// before being replaced, `(i - 1, j)` sits one offset lower and was written
/// earlier in the same row.
#[derive(Debug)]
struct WindowCache<V> {
    slots: Vec<Option<Slot<V>>>,
}

impl<V: Copy> WindowCache<V> {
    fn with_width(width: usize) -> Self {
        Self {
            slots: vec![None; width],
        }
    }

    /// Value at `(i, j)` if it is still inside the window.
    fn get(&self, i: u64, j: u64) -> Option<V> {
        let offset = usize::try_from(i.checked_sub(j)?).ok()?;
        self.slots
            .get(offset)
            .copied()
            .flatten()
            .filter(|slot| slot.row == j)
            .map(|slot| slot.value)
    }

    fn insert(&mut self, offset: usize, row: u64, value: V) {
        self.slots[offset] = Some(Slot { row, value });
    }
}

/// Evaluates `A(n, m)` row by row, keeping only the band of values the result
/// depends on.
///
/// For a request `(n, m)` every dependency `(i, j)` satisfies `j <= m` and
/// `i - j < w` with `w = n - m + 1`, so row `j` only materializes columns
/// `i` in `[j, min(n - 1, j + w - 1)]`. Storage is `w` values for the whole
/// call, and nothing survives it.
///
/// Values outside the band are never computed: the engine answers exactly the
/// requested pair and cannot serve later queries for other pairs from the same
/// run. Use [`MemoizedRecursiveEngine`] when many related pairs are needed.
///
/// [`MemoizedRecursiveEngine`]: crate::MemoizedRecursiveEngine
///
/// # Example
///
/// ```rust
/// use recurrence_engine::WindowedIterativeEngine;
///
/// let engine = WindowedIterativeEngine::<u64>::new();
/// assert_eq!(engine.evaluate(5, 3).unwrap(), 25);
/// assert_eq!(engine.evaluate(1, 1).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WindowedIterativeEngine<V> {
    _phantom: PhantomData<V>,
}

impl<V> WindowedIterativeEngine<V> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<V> Default for WindowedIterativeEngine<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: RecurrenceValue> WindowedIterativeEngine<V> {
    /// Evaluates `A(n, m)`.
    ///
    /// # Panics
    ///
    /// Panics if a dependency is missing from the window, which would mean the
    /// band bounds are wrong; it cannot happen for validated input.
    pub fn evaluate(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        let params = RecurrenceParameters::new(n, m)?;
        if params.is_base_case() {
            return Ok(V::one());
        }
        let overflow = || RecurrenceError::overflow::<V>(params);
        if params.exceeds_width(V::bits()) {
            return Err(overflow());
        }

        let (n, m) = (params.n(), params.m());
        let w = params.window_width();
        // exceeds_width bounds w by the bit width of V
        let mut window = WindowCache::with_width(w as usize);
        debug!(n, m, w, "windowed evaluation");

        for j in 1..=m {
            // i runs from j while i <= n - 1 and i - j < w
            let columns = (n - j).min(w) as usize;
            for offset in 0..columns {
                let i = j + offset as u64;
                let value = if i == j || j == 1 {
                    V::one()
                } else {
                    let a = window.get(i - 1, j - 1).expect("window holds (i-1, j-1)");
                    let b = window.get(i - 1, j).expect("window holds (i-1, j)");
                    V::step(a, j, b).ok_or_else(overflow)?
                };
                window.insert(offset, j, value);
            }
            trace!(row = j, columns, "window row filled");
        }

        let a = window.get(n - 1, m - 1).expect("window holds (n-1, m-1)");
        let b = window.get(n - 1, m).expect("window holds (n-1, m)");
        V::step(a, m, b).ok_or_else(overflow)
    }
}

impl<V: RecurrenceValue> RecurrenceEngine<V> for WindowedIterativeEngine<V> {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn evaluate(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        WindowedIterativeEngine::evaluate(self, n, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Constraint;

    #[test]
    fn test_known_values() {
        let engine = WindowedIterativeEngine::<u64>::new();

        assert_eq!(engine.evaluate(1, 1).unwrap(), 1);
        assert_eq!(engine.evaluate(3, 2).unwrap(), 3);
        assert_eq!(engine.evaluate(4, 2).unwrap(), 7);
        assert_eq!(engine.evaluate(5, 2).unwrap(), 15);
        assert_eq!(engine.evaluate(5, 3).unwrap(), 25);
        assert_eq!(engine.evaluate(5, 4).unwrap(), 10);
        assert_eq!(engine.evaluate(10, 4).unwrap(), 34105);
        assert_eq!(engine.evaluate(20, 10).unwrap(), 5917584964655);
    }

    #[test]
    fn test_base_cases() {
        let engine = WindowedIterativeEngine::<u32>::new();
        for n in 1..=50 {
            assert_eq!(engine.evaluate(n, 1).unwrap(), 1);
            assert_eq!(engine.evaluate(n, n).unwrap(), 1);
        }
    }

    #[test]
    fn test_narrow_window_with_large_n() {
        // A(n, n-1) = n(n-1)/2 with a window of width 2
        let engine = WindowedIterativeEngine::<u64>::new();
        assert_eq!(engine.evaluate(2_000, 1_999).unwrap(), 1_999_000);
    }

    #[test]
    fn test_invalid_input() {
        let engine = WindowedIterativeEngine::<u64>::new();
        let constraint = |n, m| engine.evaluate(n, m).unwrap_err().constraint();

        assert_eq!(constraint(0, 1), Some(Constraint::NLessThanOne));
        assert_eq!(constraint(3, 0), Some(Constraint::MLessThanOne));
        assert_eq!(constraint(2, 5), Some(Constraint::NLessThanM));
    }

    #[test]
    fn test_overflow_is_reported() {
        let engine = WindowedIterativeEngine::<u8>::new();

        assert_eq!(engine.evaluate(9, 2).unwrap(), 255);
        assert_eq!(
            engine.evaluate(10, 2).unwrap_err(),
            RecurrenceError::Overflow { n: 10, m: 2, bits: 8 }
        );
        assert_eq!(
            engine.evaluate(7, 4).unwrap_err(),
            RecurrenceError::Overflow { n: 7, m: 4, bits: 8 }
        );
    }

    #[test]
    fn test_window_cache_row_tags() {
        let mut window = WindowCache::<u64>::with_width(3);
        window.insert(0, 1, 1);
        window.insert(1, 1, 1);
        assert_eq!(window.get(2, 1), Some(1));

        // Row 2 replaces offset 0; (1, 1) at offset 0 is gone, (2, 1) remains
        window.insert(0, 2, 1);
        assert_eq!(window.get(1, 1), None);
        assert_eq!(window.get(2, 2), Some(1));
        assert_eq!(window.get(2, 1), Some(1));

        // Outside the band
        assert_eq!(window.get(5, 1), None);
        assert_eq!(window.get(1, 2), None);
    }
}
