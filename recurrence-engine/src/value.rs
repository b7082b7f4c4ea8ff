//! Integer types the engines evaluate into

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{NumCast, PrimInt, Unsigned};

/// An unsigned primitive integer usable as the value type of an engine.
///
/// All arithmetic is checked; the width of the type bounds the largest value
/// an engine can produce.
pub trait RecurrenceValue:
    PrimInt + Unsigned + Hash + Debug + Display + Send + Sync + 'static
{
    /// Width of the type in bits.
    fn bits() -> u32 {
        Self::max_value().count_ones()
    }

    /// Computes `a + factor * b`, or `None` on overflow.
    fn step(a: Self, factor: u64, b: Self) -> Option<Self> {
        let factor = <Self as NumCast>::from(factor)?;
        factor.checked_mul(&b)?.checked_add(&a)
    }
}

// Blanket implementation: every unsigned primitive integer qualifies
impl<T> RecurrenceValue for T where
    T: PrimInt + Unsigned + Hash + Debug + Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits() {
        assert_eq!(<u8 as RecurrenceValue>::bits(), 8);
        assert_eq!(<u32 as RecurrenceValue>::bits(), 32);
        assert_eq!(<u128 as RecurrenceValue>::bits(), 128);
    }

    #[test]
    fn test_step_checked() {
        assert_eq!(u64::step(1, 2, 3), Some(7));
        assert_eq!(u8::step(15, 16, 15), Some(255));
        assert_eq!(u8::step(16, 16, 15), None);
        assert_eq!(u8::step(0, 18, 15), None);
        // multiplier itself does not fit the value type
        assert_eq!(u8::step(0, 256, 1), None);
    }
}
