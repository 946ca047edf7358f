//! Dew point temperature of humid air.
//!
//! The dew point is the temperature at which a given vapor pressure equals the
//! saturation vapor pressure. The saturation correlation has no closed-form
//! inverse, so the temperature is found by bisection over
//! [`VALID_TEMPERATURE`].

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use super::{
    PropertyError,
    vapor::{VALID_TEMPERATURE, saturation_vapor_pressure},
};

/// Errors that can occur while computing a dew point.
#[derive(Debug, Error)]
pub enum DewPointError {
    /// The vapor pressure is not reachable within the valid temperature range.
    #[error("vapor pressure outside the saturation range: {vapor_pressure:?}")]
    OutOfRange { vapor_pressure: Pressure },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("dew point solve hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Remaining saturation pressure residual.
        residual: Pressure,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Returns the dew point temperature for the given vapor pressure.
///
/// # Errors
///
/// Returns [`DewPointError::OutOfRange`] if the vapor pressure lies outside
/// the saturation pressures spanned by [`VALID_TEMPERATURE`], or a solver
/// error if bisection fails to converge.
///
/// # Example
///
/// ```
/// use twine_hygrothermal::support::hygro::dew_point::dew_point;
/// use uom::si::{f64::Pressure, pressure::pascal, thermodynamic_temperature::kelvin};
///
/// // Saturation pressure at 20 °C is about 2339 Pa.
/// let t = dew_point(Pressure::new::<pascal>(2338.8)).unwrap();
/// assert!((t.get::<kelvin>() - 293.15).abs() < 0.01);
/// ```
pub fn dew_point(vapor_pressure: Pressure) -> Result<ThermodynamicTemperature, DewPointError> {
    let target = vapor_pressure.get::<pascal>();
    let (t_min, t_max) = (*VALID_TEMPERATURE.start(), *VALID_TEMPERATURE.end());

    let reachable = saturation_vapor_pressure(t_min)
        .and_then(|low| Ok((low, saturation_vapor_pressure(t_max)?)))
        .is_ok_and(|(low, high)| (low..=high).contains(&target));
    if !reachable {
        return Err(DewPointError::OutOfRange { vapor_pressure });
    }

    let config = bisection::Config {
        max_iters: 100,
        x_abs_tol: 1e-9,
        x_rel_tol: 0.0,
        residual_tol: 1e-9 * target.max(1.0),
    };

    let solution = bisection::solve(
        &SaturationModel,
        &DewPointProblem { target },
        [t_min, t_max],
        &config,
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(DewPointError::MaxIters {
            residual: Pressure::new::<pascal>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.temperature)
}

/// Saturation state at a trial temperature.
#[derive(Debug, Clone, Copy)]
struct SaturationPoint {
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
}

/// Evaluates the saturation correlation as a Twine model.
struct SaturationModel;

impl Model for SaturationModel {
    type Input = ThermodynamicTemperature;
    type Output = SaturationPoint;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let pressure = saturation_vapor_pressure(input.get::<kelvin>())?;
        Ok(SaturationPoint {
            temperature: *input,
            pressure: Pressure::new::<pascal>(pressure),
        })
    }
}

/// Residual `P_vs(T) − P_v`, in pascal.
struct DewPointProblem {
    target: f64,
}

impl EquationProblem<1> for DewPointProblem {
    type Input = ThermodynamicTemperature;
    type Output = SaturationPoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.pressure.get::<pascal>() - self.target])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::hygro::vapor::vapor_pressure;

    #[test]
    fn recovers_saturation_temperature() {
        for t in [263.15, 283.15, 303.15] {
            let pvs = saturation_vapor_pressure(t).unwrap();
            let dew = dew_point(Pressure::new::<pascal>(pvs)).unwrap();
            assert_relative_eq!(dew.get::<kelvin>(), t, epsilon = 1e-6);
        }
    }

    #[test]
    fn unsaturated_air_has_lower_dew_point() {
        let t = 293.15;
        let pv = vapor_pressure(t, -50_000.0).unwrap();
        let dew = dew_point(Pressure::new::<pascal>(pv)).unwrap();
        assert!(dew.get::<kelvin>() < t);
    }

    #[test]
    fn rejects_unreachable_pressure() {
        assert!(matches!(
            dew_point(Pressure::new::<pascal>(1.0e7)),
            Err(DewPointError::OutOfRange { .. })
        ));
        assert!(matches!(
            dew_point(Pressure::new::<pascal>(-5.0)),
            Err(DewPointError::OutOfRange { .. })
        ));
    }
}
