//! Numeric constraints checked once and carried in the type.
//!
//! Physical inputs to the hygrothermal models carry sign and range
//! requirements: cell spacings and time steps are strictly positive, moisture
//! potentials are never positive, relative humidity lives in `(0, 1]`.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: Greater than zero
//! - [`NonNegative`]: Zero or greater
//! - [`NonPositive`]: Zero or less
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//! - [`UnitIntervalLowerOpen`]: Lower-open unit interval `0 < x ≤ 1`
//!
//! Inputs that must keep a guarantee are stored as [`Constrained<T, C>`],
//! for example the time step of a scenario. Code that only needs a yes/no
//! answer calls [`Constraint::check`] on the marker directly.

mod sign;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use sign::{NonNegative, NonPositive, StrictlyPositive};
pub use unit_interval::{UnitBounds, UnitInterval, UnitIntervalLowerOpen};

/// A numeric requirement on values of type `T`.
pub trait Constraint<T> {
    /// Checks `value` against the requirement.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// How a value violates a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be positive")]
    Positive,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_hygrothermal::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Time, time::second};
///
/// let dt = Constrained::<Time, StrictlyPositive>::new(Time::new::<second>(60.0)).unwrap();
/// assert_eq!(dt.into_inner().get::<second>(), 60.0);
///
/// assert!(Constrained::<Time, StrictlyPositive>::new(Time::new::<second>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Wraps `value` after checking it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] from `C::check`.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Returns the checked value.
    pub fn into_inner(self) -> T {
        self.value
    }
}
