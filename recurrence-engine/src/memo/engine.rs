//! Top-down memoized evaluation.

use std::marker::PhantomData;

use tracing::{debug, trace};

use super::backend::{DashMapBackend, MemoBackend};
use crate::engine::RecurrenceEngine;
use crate::error::RecurrenceError;
use crate::params::RecurrenceParameters;
use crate::value::RecurrenceValue;

/// Remaining stack below which the descent switches to a fresh segment.
const RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated during deep descents.
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// Evaluates `A(n, m)` by recursive descent over a persistent memo cache.
///
/// Every non-base pair `(n, m)` resolved by any call is cached for the lifetime
/// of the engine, so calls that share sub-problems compute each pair exactly
/// once: `O(n * m)` work and storage in the worst case. Base cases
/// (`m = 1` or `n = m`) are never cached.
///
/// The cache is private to the instance. The engine is `Send + Sync`; share one
/// instance between threads with a reference or an `Arc`. Threads racing on the
/// same missing pair may both compute it, and the first insert wins.
///
/// # Type Parameters
///
/// - `V`: Value type (an unsigned primitive integer)
/// - `B`: Backend storage type (must implement `MemoBackend<V>`)
///
/// # Recursion Depth
///
/// Recursion depth grows with `n`, so narrow requests such as `A(n, n - 1)`
/// recurse hundreds of thousands of levels deep. The descent grows the stack
/// on demand in heap-allocated segments instead of overflowing the calling
/// thread's stack. Memory still scales with the depth; the
/// [`WindowedIterativeEngine`] evaluates the same pair in `O(w)` space.
///
/// [`WindowedIterativeEngine`]: crate::WindowedIterativeEngine
///
/// # Example
///
/// ```rust
/// use recurrence_engine::MemoizedRecursiveEngine;
///
/// let engine = MemoizedRecursiveEngine::<u64>::new();
/// assert_eq!(engine.evaluate(5, 3).unwrap(), 25);
/// // (5, 3), (4, 3), (4, 2) and (3, 2) are cached; base cases are not
/// assert_eq!(engine.cache_len(), 4);
/// ```
pub struct MemoizedRecursiveEngine<V, B = DashMapBackend<V>>
where
    B: MemoBackend<V>,
{
    backend: B,
    _phantom: PhantomData<V>,
}

impl<V: RecurrenceValue> MemoizedRecursiveEngine<V> {
    /// Creates an engine with an empty DashMap-backed cache.
    pub fn new() -> Self {
        Self::with_backend(DashMapBackend::new())
    }
}

impl<V: RecurrenceValue> Default for MemoizedRecursiveEngine<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, B> MemoizedRecursiveEngine<V, B>
where
    V: RecurrenceValue,
    B: MemoBackend<V>,
{
    /// Creates an engine over the given cache backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            _phantom: PhantomData,
        }
    }

    /// Evaluates `A(n, m)`.
    ///
    /// Invalid input is rejected before the cache is touched. Overflow of `V`
    /// is reported as [`RecurrenceError::Overflow`] for the requested pair;
    /// values computed before the overflow stay cached.
    pub fn evaluate(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        let params = RecurrenceParameters::new(n, m)?;
        if params.is_base_case() {
            return Ok(V::one());
        }
        if params.exceeds_width(V::bits()) {
            return Err(RecurrenceError::overflow::<V>(params));
        }

        debug!(n, m, cached = self.backend.len(), "memoized evaluation");
        self.resolve(params)
            .ok_or_else(|| RecurrenceError::overflow::<V>(params))
    }

    /// Returns the cached value of `A(n, m)` without computing anything.
    ///
    /// Base cases and invalid pairs are never cached and return `None`.
    pub fn cached(&self, n: i64, m: i64) -> Option<V> {
        let params = RecurrenceParameters::new(n, m).ok()?;
        self.backend.get(&params)
    }

    /// Number of pairs held in the cache.
    pub fn cache_len(&self) -> usize {
        self.backend.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolves a validated pair; `None` means `V` overflowed on the way.
    fn resolve(&self, params: RecurrenceParameters) -> Option<V> {
        if params.is_base_case() {
            return Some(V::one());
        }

        // Fast path: check if already computed (no lock held afterwards)
        if let Some(value) = self.backend.get(&params) {
            return Some(value);
        }

        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
            let (shifted, same_column) = params.predecessors();
            let a = self.resolve(shifted)?;
            let b = self.resolve(same_column)?;
            let value = V::step(a, params.m(), b)?;

            trace!(n = params.n(), m = params.m(), %value, "memo store");
            Some(self.backend.get_or_insert(params, value))
        })
    }
}

impl<V, B> RecurrenceEngine<V> for MemoizedRecursiveEngine<V, B>
where
    V: RecurrenceValue,
    B: MemoBackend<V>,
{
    fn name(&self) -> &'static str {
        "recursive"
    }

    fn evaluate(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        MemoizedRecursiveEngine::evaluate(self, n, m)
    }
}
