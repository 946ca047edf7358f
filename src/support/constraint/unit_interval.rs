//! Unit interval constraints for saturations and relative humidities.

use std::cmp::Ordering;

use super::{Constraint, ConstraintError};

/// Supplies the interval ends 0 and 1.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

fn compare<T: UnitBounds>(value: &T) -> Result<(Ordering, Ordering), ConstraintError> {
    match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
        (Some(low), Some(high)) => Ok((low, high)),
        _ => Err(ConstraintError::NotANumber),
    }
}

/// `0 ≤ x ≤ 1`, as for a degree of saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match compare(value)? {
            (Ordering::Less, _) => Err(ConstraintError::BelowMinimum),
            (_, Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

/// `0 < x ≤ 1`, as for relative humidity.
///
/// Zero relative humidity would need an infinitely negative potential.
///
/// ```
/// use twine_hygrothermal::support::constraint::{Constraint, UnitIntervalLowerOpen};
///
/// assert!(UnitIntervalLowerOpen::check(&0.5).is_ok());
/// assert!(UnitIntervalLowerOpen::check(&1.0).is_ok());
/// assert!(UnitIntervalLowerOpen::check(&0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIntervalLowerOpen;

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match compare(value)? {
            (Ordering::Less | Ordering::Equal, _) => Err(ConstraintError::BelowMinimum),
            (_, Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_interval_keeps_both_ends() {
        assert!(UnitInterval::check(&0.0).is_ok());
        assert!(UnitInterval::check(&1.0).is_ok());
        assert_eq!(
            UnitInterval::check(&-0.01),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitInterval::check(&f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn lower_open_interval_excludes_zero() {
        assert_eq!(
            UnitIntervalLowerOpen::check(&0.0),
            Err(ConstraintError::BelowMinimum)
        );
        assert!(UnitIntervalLowerOpen::check(&1.0e-12).is_ok());
        assert_eq!(
            UnitIntervalLowerOpen::check(&1.5),
            Err(ConstraintError::AboveMaximum)
        );
    }
}
