//! Common engine interface and the two-engine facade.

use crate::error::RecurrenceError;
use crate::memo::{DashMapBackend, MemoBackend, MemoizedRecursiveEngine};
use crate::value::RecurrenceValue;
use crate::window::WindowedIterativeEngine;

/// An evaluator of `A(n, m)`.
///
/// Both engines implement this trait with identical semantics, so a harness can
/// run them side by side and compare results.
pub trait RecurrenceEngine<V> {
    /// Short engine name for reports.
    fn name(&self) -> &'static str;

    /// Evaluates `A(n, m)`, rejecting input outside `n >= m >= 1`.
    fn evaluate(&self, n: i64, m: i64) -> Result<V, RecurrenceError>;
}

/// Owns one memoized engine and one windowed engine.
///
/// The memo cache lives as long as the `Recurrence`; create one per isolated
/// context (for example, one per test).
///
/// # Example
///
/// ```rust
/// use recurrence_engine::Recurrence;
///
/// let recurrence = Recurrence::<u64>::new();
/// assert_eq!(recurrence.evaluate_recursive(5, 2).unwrap(), 15);
/// assert_eq!(recurrence.evaluate_iterative(5, 2).unwrap(), 15);
/// ```
pub struct Recurrence<V, B = DashMapBackend<V>>
where
    B: MemoBackend<V>,
{
    recursive: MemoizedRecursiveEngine<V, B>,
    iterative: WindowedIterativeEngine<V>,
}

impl<V: RecurrenceValue> Recurrence<V> {
    pub fn new() -> Self {
        Self::with_backend(DashMapBackend::new())
    }
}

impl<V: RecurrenceValue> Default for Recurrence<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, B> Recurrence<V, B>
where
    V: RecurrenceValue,
    B: MemoBackend<V>,
{
    /// Creates a facade whose memoized engine uses the given cache backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            recursive: MemoizedRecursiveEngine::with_backend(backend),
            iterative: WindowedIterativeEngine::new(),
        }
    }

    /// Evaluates `A(n, m)` with the memoized recursive engine.
    pub fn evaluate_recursive(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        self.recursive.evaluate(n, m)
    }

    /// Evaluates `A(n, m)` with the windowed iterative engine.
    pub fn evaluate_iterative(&self, n: i64, m: i64) -> Result<V, RecurrenceError> {
        self.iterative.evaluate(n, m)
    }

    pub fn recursive(&self) -> &MemoizedRecursiveEngine<V, B> {
        &self.recursive
    }

    pub fn iterative(&self) -> &WindowedIterativeEngine<V> {
        &self.iterative
    }
}
