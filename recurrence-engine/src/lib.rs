//! Recurrence Engine
//!
//! Evaluates the recurrence
//!
//! ```text
//! A(n, 1) = 1
//! A(n, n) = 1
//! A(n, m) = A(n-1, m-1) + m * A(n-1, m)      for n > m > 1
//! ```
//!
//! defined for `n >= m >= 1` (the Stirling numbers of the second kind), with
//! two independent algorithms that agree on every valid input:
//!
//! - [`MemoizedRecursiveEngine`]: top-down recursion over a cache that persists
//!   for the lifetime of the engine
//! - [`WindowedIterativeEngine`]: bottom-up iteration that keeps only the
//!   diagonal band of width `n - m + 1` the result depends on
//!
//! Both validate input first ([`validate`]) and evaluate into any unsigned
//! primitive integer with checked arithmetic, reporting overflow instead of
//! wrapping.
//!
//! # Quick Example
//!
//! ```
//! use recurrence_engine::{Constraint, Recurrence};
//!
//! let recurrence = Recurrence::<u64>::new();
//!
//! assert_eq!(recurrence.evaluate_recursive(5, 3).unwrap(), 25);
//! assert_eq!(recurrence.evaluate_iterative(5, 3).unwrap(), 25);
//!
//! let err = recurrence.evaluate_iterative(2, 5).unwrap_err();
//! assert_eq!(err.constraint(), Some(Constraint::NLessThanM));
//! ```

mod engine;
mod error;
pub mod memo;
mod params;
mod value;
mod window;

// Re-export public API
pub use engine::{Recurrence, RecurrenceEngine};
pub use error::{Constraint, RecurrenceError};
pub use memo::MemoizedRecursiveEngine;
pub use params::{RecurrenceParameters, validate};
pub use value::RecurrenceValue;
pub use window::WindowedIterativeEngine;
