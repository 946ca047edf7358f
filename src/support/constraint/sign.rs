//! Sign constraints: strictly positive, non-negative, and non-positive.

use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Greater than zero.
///
/// Spacings, time steps, capacities, and retention scales.
///
/// ```
/// use twine_hygrothermal::support::constraint::{Constraint, StrictlyPositive};
/// use uom::si::{f64::Length, length::meter};
///
/// assert!(StrictlyPositive::check(&Length::new::<meter>(0.1)).is_ok());
/// assert!(StrictlyPositive::check(&0.0).is_err());
/// assert!(StrictlyPositive::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Zero or greater.
///
/// Transport coefficients of fixed-value materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            Some(_) => Ok(()),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Zero or less.
///
/// Moisture chemical potentials: zero is saturation and drier states are
/// more negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositive;

impl<T: PartialOrd + Zero> Constraint<T> for NonPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Err(ConstraintError::Positive),
            Some(_) => Ok(()),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Time, time::second};

    #[test]
    fn time_steps_must_be_strictly_positive() {
        assert!(StrictlyPositive::check(&Time::new::<second>(1000.0)).is_ok());
        assert_eq!(
            StrictlyPositive::check(&Time::new::<second>(0.0)),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::check(&-1.0),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn coefficients_may_be_zero() {
        assert!(NonNegative::check(&0.0).is_ok());
        assert!(NonNegative::check(&2.0e-7).is_ok());
        assert_eq!(NonNegative::check(&-1.0e-9), Err(ConstraintError::Negative));
        assert_eq!(
            NonNegative::check(&f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn potentials_may_not_be_positive() {
        assert!(NonPositive::check(&-1.0e6).is_ok());
        assert!(NonPositive::check(&0.0).is_ok());
        assert_eq!(NonPositive::check(&5.0), Err(ConstraintError::Positive));
        assert_eq!(
            NonPositive::check(&f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }
}
