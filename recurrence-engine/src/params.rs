//! Input validation and the validated request type

use crate::error::{Constraint, RecurrenceError};

/// Checks the domain constraints `n >= 1`, `m >= 1` and `n >= m`, in that order.
///
/// Returns the first violated constraint as an `InvalidArgument` error.
///
/// # Example
///
/// ```
/// use recurrence_engine::{validate, Constraint};
///
/// assert!(validate(4, 2).is_ok());
/// assert_eq!(validate(2, 5).unwrap_err().constraint(), Some(Constraint::NLessThanM));
/// ```
pub fn validate(n: i64, m: i64) -> Result<(), RecurrenceError> {
    let constraint = if n < 1 {
        Constraint::NLessThanOne
    } else if m < 1 {
        Constraint::MLessThanOne
    } else if n < m {
        Constraint::NLessThanM
    } else {
        return Ok(());
    };
    Err(RecurrenceError::InvalidArgument { n, m, constraint })
}

/// A validated request `(n, m)` with `n >= m >= 1`.
///
/// Used as the key of both engine caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecurrenceParameters {
    n: u64,
    m: u64,
}

impl RecurrenceParameters {
    /// Validates `(n, m)` and wraps it.
    pub fn new(n: i64, m: i64) -> Result<Self, RecurrenceError> {
        validate(n, m)?;
        Ok(Self {
            n: n.unsigned_abs(),
            m: m.unsigned_abs(),
        })
    }

    /// Wraps a pair derived from an already validated one.
    pub(crate) fn from_validated(n: u64, m: u64) -> Self {
        debug_assert!(n >= m && m >= 1, "({n}, {m}) is outside n >= m >= 1");
        Self { n, m }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn m(&self) -> u64 {
        self.m
    }

    /// `A(n, 1) = A(n, n) = 1`
    pub fn is_base_case(&self) -> bool {
        self.m == 1 || self.n == self.m
    }

    /// Width `w = n - m + 1` of the diagonal band holding every dependency of `A(n, m)`.
    pub fn window_width(&self) -> u64 {
        self.n - self.m + 1
    }

    /// The pairs `(n-1, m-1)` and `(n-1, m)` that `A(n, m)` is built from.
    ///
    /// Only meaningful when `self` is not a base case.
    pub(crate) fn predecessors(&self) -> (Self, Self) {
        (
            Self::from_validated(self.n - 1, self.m - 1),
            Self::from_validated(self.n - 1, self.m),
        )
    }

    /// Whether `A(n, m)` provably exceeds a `bits`-wide integer.
    ///
    /// For `n > m > 1`, following `(n-1, m-1)` down to column 2 gives
    /// `A(n, m) >= A(w + 1, 2) = 2^w - 1`.
    pub(crate) fn exceeds_width(&self, bits: u32) -> bool {
        !self.is_base_case() && self.window_width() > u64::from(bits)
    }
}
