//! Error types for the recurrence engines

use thiserror::Error;

use crate::params::RecurrenceParameters;
use crate::value::RecurrenceValue;

/// Domain constraint violated by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Constraint {
    /// `n` must be greater or equal to 1
    #[error("n < 1")]
    NLessThanOne,
    /// `m` must be greater or equal to 1
    #[error("m < 1")]
    MLessThanOne,
    /// `n` must be greater or equal to `m`
    #[error("n < m")]
    NLessThanM,
}

/// Error type for recurrence evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// The request lies outside `n >= m >= 1`
    #[error("Invalid argument for A({n}, {m}): {constraint}")]
    InvalidArgument {
        n: i64,
        m: i64,
        constraint: Constraint,
    },
    /// The value does not fit the integer width the engine evaluates into
    #[error("A({n}, {m}) overflows a {bits}-bit integer")]
    Overflow { n: u64, m: u64, bits: u32 },
}

impl RecurrenceError {
    /// Returns the violated constraint for `InvalidArgument` errors
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            RecurrenceError::InvalidArgument { constraint, .. } => Some(*constraint),
            RecurrenceError::Overflow { .. } => None,
        }
    }

    pub(crate) fn overflow<V: RecurrenceValue>(params: RecurrenceParameters) -> Self {
        RecurrenceError::Overflow {
            n: params.n(),
            m: params.m(),
            bits: V::bits(),
        }
    }
}
