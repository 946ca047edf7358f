//! Hygrothermal property models for porous building materials.
//!
//! Everything in this module works in SI base units on plain `f64` values:
//! kelvin for temperature, J/kg for moisture chemical potential, pascal for
//! vapor pressure, and m³/m³ for volumetric moisture content.
//! These functions sit on the hot path of the wall solver, which evaluates
//! them at every node on every step.
//!
//! - [`retention`]: van Genuchten–Mualem moisture retention and relative conductivity.
//! - [`vapor`]: saturation vapor pressure, relative humidity, and their derivatives.
//! - [`dew_point`]: dew point temperature for a given vapor pressure.
//! - [`material`]: material property records dispatched by material kind.

mod error;

pub mod dew_point;
pub mod material;
pub mod retention;
pub mod vapor;

use crate::support::constraint::{Constraint, NonPositive};

pub use error::PropertyError;

/// Largest positive potential, J/kg, still treated as saturation.
///
/// Explicit updates near saturation can overshoot zero by rounding error;
/// potentials in `(0, POTENTIAL_TOLERANCE]` evaluate as exactly zero.
pub const POTENTIAL_TOLERANCE: f64 = 1.0e-6;

/// Validates a potential and snaps tolerable positive values to zero.
pub(crate) fn checked_potential(potential: f64) -> Result<f64, PropertyError> {
    if !potential.is_finite() || NonPositive::check(&(potential - POTENTIAL_TOLERANCE)).is_err() {
        return Err(PropertyError::out_of_domain(format!(
            "moisture potential must be non-positive: {potential} J/kg"
        )));
    }
    Ok(potential.min(0.0))
}
