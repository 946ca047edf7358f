//! Water vapor pressure and relative humidity in terms of moisture potential.
//!
//! The moisture chemical potential `μ` and relative humidity `φ_rh` are linked
//! by Kelvin's equation:
//!
//! ```text
//! φ_rh = exp(μ / (R_v·T))
//! ```
//!
//! so the vapor pressure in local equilibrium with the pore water is
//! `P_v = φ_rh · P_vs(T)`.
//!
//! Saturation vapor pressure uses the Wexler–Hyland correlation over liquid
//! water. Its temperature slope uses the Goff–Gratch form, which agrees with
//! the numerical slope of Wexler–Hyland to well under one percent across the
//! valid range.

use std::ops::RangeInclusive;

use crate::support::constraint::{Constraint, UnitIntervalLowerOpen};

use super::{PropertyError, checked_potential};

/// Specific gas constant of water vapor, J/(kg·K).
pub const WATER_VAPOR_GAS_CONSTANT: f64 = 8316.96 / 18.016;

/// Temperatures, in kelvin, over which the saturation correlation is accepted.
pub const VALID_TEMPERATURE: RangeInclusive<f64> = 223.15..=373.15;

/// Triple point reference temperature used by the Goff–Gratch slope, K.
const T_TRIPLE: f64 = 273.16;

/// Saturation vapor pressure over liquid water, Pa.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if the temperature is outside
/// [`VALID_TEMPERATURE`] or not finite.
pub fn saturation_vapor_pressure(temperature: f64) -> Result<f64, PropertyError> {
    let t = checked_temperature(temperature)?;
    let ln_pvs = -5800.2206 / t + 1.391_499_3 - 4.864_023_9e-2 * t + 4.176_476_8e-5 * t * t
        - 1.445_209_3e-8 * t * t * t
        + 6.545_967_3 * t.ln();
    Ok(ln_pvs.exp())
}

/// Temperature slope of the saturation vapor pressure, Pa/K.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if the temperature is outside
/// [`VALID_TEMPERATURE`] or not finite.
pub fn saturation_vapor_pressure_slope(temperature: f64) -> Result<f64, PropertyError> {
    let t = checked_temperature(temperature)?;
    let ln10 = std::f64::consts::LN_10;

    let d_log10 = 10.795_74 * T_TRIPLE / (t * t) - 5.028 / t / ln10
        + 1.504_75e-4 * 8.2969 / T_TRIPLE * ln10 * 10f64.powf(-8.2969 * (t / T_TRIPLE - 1.0))
        + 0.428_73e-3 * 4.769_55 * T_TRIPLE / (t * t)
            * ln10
            * 10f64.powf(4.769_55 * (1.0 - T_TRIPLE / t));

    Ok(saturation_vapor_pressure(t)? * d_log10 * ln10)
}

/// Relative humidity in equilibrium with the given potential.
///
/// Lies in `(0, 1]` and is exactly 1 at zero potential.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] for a non-physical temperature or a
/// potential above [`POTENTIAL_TOLERANCE`](super::POTENTIAL_TOLERANCE).
pub fn relative_humidity(temperature: f64, potential: f64) -> Result<f64, PropertyError> {
    let t = checked_temperature(temperature)?;
    let mu = checked_potential(potential)?;
    Ok((mu / (WATER_VAPOR_GAS_CONSTANT * t)).exp())
}

/// Vapor pressure in equilibrium with the given potential, Pa.
///
/// # Errors
///
/// See [`relative_humidity`] and [`saturation_vapor_pressure`].
pub fn vapor_pressure(temperature: f64, potential: f64) -> Result<f64, PropertyError> {
    Ok(relative_humidity(temperature, potential)? * saturation_vapor_pressure(temperature)?)
}

/// Potential in equilibrium with the given relative humidity, J/kg.
///
/// Inverse of [`relative_humidity`]: `μ = R_v·T·ln(φ_rh)`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if the relative humidity is not in
/// `(0, 1]` or the temperature is not physical.
pub fn potential_from_relative_humidity(
    temperature: f64,
    relative_humidity: f64,
) -> Result<f64, PropertyError> {
    let t = checked_temperature(temperature)?;
    if UnitIntervalLowerOpen::check(&relative_humidity).is_err() {
        return Err(PropertyError::out_of_domain(format!(
            "relative humidity must be in (0, 1]: {relative_humidity}"
        )));
    }
    Ok(WATER_VAPOR_GAS_CONSTANT * t * relative_humidity.ln())
}

/// Partial derivative of vapor pressure with respect to potential, Pa/(J/kg).
///
/// `∂P_v/∂μ = P_v / (R_v·T)`.
///
/// # Errors
///
/// See [`vapor_pressure`].
pub fn vapor_pressure_potential_derivative(
    temperature: f64,
    potential: f64,
) -> Result<f64, PropertyError> {
    Ok(vapor_pressure(temperature, potential)? / (WATER_VAPOR_GAS_CONSTANT * temperature))
}

/// Partial derivative of vapor pressure with respect to temperature at
/// constant potential, Pa/K.
///
/// `∂P_v/∂T = φ_rh · (dP_vs/dT − P_vs·μ/(R_v·T²))`.
///
/// # Errors
///
/// See [`vapor_pressure`].
pub fn vapor_pressure_temperature_derivative(
    temperature: f64,
    potential: f64,
) -> Result<f64, PropertyError> {
    let rh = relative_humidity(temperature, potential)?;
    let pvs = saturation_vapor_pressure(temperature)?;
    let slope = saturation_vapor_pressure_slope(temperature)?;
    let mu = potential.min(0.0);
    Ok(rh * (slope - pvs * mu / (WATER_VAPOR_GAS_CONSTANT * temperature * temperature)))
}

/// Latent heat of vaporization of water, J/kg.
///
/// Linear in temperature about the triple point:
/// `(597.5 − 0.559·(T − 273.16)) kcal/kg`.
#[must_use]
pub fn latent_heat(temperature: f64) -> f64 {
    (597.5 - 0.559 * (temperature - T_TRIPLE)) * 4186.05
}

fn checked_temperature(temperature: f64) -> Result<f64, PropertyError> {
    if VALID_TEMPERATURE.contains(&temperature) {
        Ok(temperature)
    } else {
        Err(PropertyError::out_of_domain(format!(
            "temperature outside saturation correlation range: {temperature} K"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn saturation_pressure_reference_points() {
        // Steam table values: 611.2 Pa at 0 °C, 2339 Pa at 20 °C, 101.4 kPa at 100 °C.
        assert_relative_eq!(saturation_vapor_pressure(273.15).unwrap(), 611.2, max_relative = 1e-3);
        assert_relative_eq!(saturation_vapor_pressure(293.15).unwrap(), 2339.0, max_relative = 1e-3);
        assert_relative_eq!(
            saturation_vapor_pressure(373.15).unwrap(),
            101_418.0,
            max_relative = 1e-3
        );
    }

    #[test]
    fn saturation_pressure_rejects_out_of_range() {
        assert!(saturation_vapor_pressure(150.0).is_err());
        assert!(saturation_vapor_pressure(400.0).is_err());
        assert!(saturation_vapor_pressure(f64::NAN).is_err());
    }

    #[test]
    fn slope_agrees_with_numerical_derivative() {
        for t in [250.0, 273.15, 283.15, 293.15, 320.0, 350.0] {
            let h = 1e-3;
            let numeric = (saturation_vapor_pressure(t + h).unwrap()
                - saturation_vapor_pressure(t - h).unwrap())
                / (2.0 * h);
            let slope = saturation_vapor_pressure_slope(t).unwrap();
            assert!(slope > 0.0);
            assert_relative_eq!(slope, numeric, max_relative = 5e-3);
        }
    }

    #[test]
    fn relative_humidity_is_one_at_saturation() {
        assert_eq!(relative_humidity(283.15, 0.0).unwrap(), 1.0);
        assert_eq!(
            vapor_pressure(283.15, 0.0).unwrap(),
            saturation_vapor_pressure(283.15).unwrap()
        );
    }

    #[test]
    fn relative_humidity_in_unit_interval() {
        for mu in [-1.0e6, -1.0e4, -1000.0, -1.0, -1.0e-9] {
            let rh = relative_humidity(293.15, mu).unwrap();
            assert!(rh > 0.0 && rh <= 1.0, "rh = {rh} at {mu}");
        }
        assert!(relative_humidity(293.15, 10.0).is_err());
    }

    #[test]
    fn potential_round_trips_through_relative_humidity() {
        let t = 288.15;
        let mu = potential_from_relative_humidity(t, 0.8).unwrap();
        assert!(mu < 0.0);
        assert_relative_eq!(relative_humidity(t, mu).unwrap(), 0.8, max_relative = 1e-12);
        assert!(potential_from_relative_humidity(t, 0.0).is_err());
        assert!(potential_from_relative_humidity(t, 1.2).is_err());
    }

    #[test]
    fn partial_derivatives_match_finite_differences() {
        let (t, mu) = (285.0, -2000.0);
        let h_mu = 1e-2;
        let numeric_mu =
            (vapor_pressure(t, mu + h_mu).unwrap() - vapor_pressure(t, mu - h_mu).unwrap()) / (2.0 * h_mu);
        assert_relative_eq!(
            vapor_pressure_potential_derivative(t, mu).unwrap(),
            numeric_mu,
            max_relative = 1e-6
        );

        let h_t = 1e-3;
        let numeric_t =
            (vapor_pressure(t + h_t, mu).unwrap() - vapor_pressure(t - h_t, mu).unwrap()) / (2.0 * h_t);
        assert_relative_eq!(
            vapor_pressure_temperature_derivative(t, mu).unwrap(),
            numeric_t,
            max_relative = 5e-3
        );
    }

    #[test]
    fn latent_heat_at_triple_point() {
        assert_relative_eq!(latent_heat(273.16), 597.5 * 4186.05);
        assert!(latent_heat(300.0) < latent_heat(273.16));
    }
}
