//! Van Genuchten–Mualem moisture retention model.
//!
//! Relates moisture chemical potential `μ` (J/kg, non-positive) to the degree
//! of saturation `S` of a porous material:
//!
//! ```text
//! S(μ) = (1 + (−α·μ)^n)^(−m),   m = 1 − 1/n
//! ```
//!
//! and predicts the relative liquid conductivity with Mualem's pore model:
//!
//! ```text
//! K_r(S) = S^l · (1 − (1 − S^(1/m))^m)²
//! ```
//!
//! Residual moisture content is taken as zero, so the volumetric moisture
//! content is `φ = φ_max · S`.
//!
//! Reference: M. Th. van Genuchten, "A closed-form equation for predicting the
//! hydraulic conductivity of unsaturated soils", Soil Sci. Soc. Am. J. 44,
//! pp. 892–898, 1980.

use thiserror::Error;

use crate::support::constraint::{Constraint, StrictlyPositive, UnitIntervalLowerOpen};

use super::{PropertyError, checked_potential};

/// Errors from constructing a [`VanGenuchten`] model with invalid parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RetentionParametersError {
    #[error("maximum moisture content must be in (0, 1]: {phi_max}")]
    MaxMoistureContent { phi_max: f64 },
    #[error("alpha must be strictly positive: {alpha}")]
    Alpha { alpha: f64 },
    #[error("shape parameter n must be greater than 1: {n}")]
    ShapeN { n: f64 },
    #[error("pore connectivity exponent must be finite: {l}")]
    PoreConnectivity { l: f64 },
}

/// Van Genuchten retention curve with Mualem relative conductivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanGenuchten {
    phi_max: f64,
    alpha: f64,
    n: f64,
    m: f64,
    l: f64,
}

impl VanGenuchten {
    /// Creates a retention model.
    ///
    /// - `phi_max`: saturated volumetric moisture content, m³/m³.
    /// - `alpha`: inverse potential scale, kg/J.
    /// - `n`: shape parameter, greater than one. `m` is derived as `1 − 1/n`.
    /// - `l`: pore connectivity exponent used by the conductivity model.
    ///
    /// # Errors
    ///
    /// Returns a [`RetentionParametersError`] naming the first invalid parameter.
    pub fn new(phi_max: f64, alpha: f64, n: f64, l: f64) -> Result<Self, RetentionParametersError> {
        if UnitIntervalLowerOpen::check(&phi_max).is_err() {
            return Err(RetentionParametersError::MaxMoistureContent { phi_max });
        }
        if StrictlyPositive::check(&alpha).is_err() || !alpha.is_finite() {
            return Err(RetentionParametersError::Alpha { alpha });
        }
        if !(n > 1.0 && n.is_finite()) {
            return Err(RetentionParametersError::ShapeN { n });
        }
        if !l.is_finite() {
            return Err(RetentionParametersError::PoreConnectivity { l });
        }

        Ok(Self {
            phi_max,
            alpha,
            n,
            m: 1.0 - 1.0 / n,
            l,
        })
    }

    /// Creates a retention model without validating its parameters.
    ///
    /// Only for parameter sets known to satisfy [`VanGenuchten::new`].
    pub(crate) fn new_unchecked(phi_max: f64, alpha: f64, n: f64, l: f64) -> Self {
        debug_assert!(Self::new(phi_max, alpha, n, l).is_ok());
        Self {
            phi_max,
            alpha,
            n,
            m: 1.0 - 1.0 / n,
            l,
        }
    }

    /// Saturated volumetric moisture content.
    #[must_use]
    pub fn max_moisture_content(&self) -> f64 {
        self.phi_max
    }

    /// Degree of saturation `S ∈ [0, 1]` at the given potential.
    ///
    /// Returns exactly 1 at `potential = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] for positive potentials beyond
    /// [`POTENTIAL_TOLERANCE`](super::POTENTIAL_TOLERANCE) or non-finite potentials.
    pub fn saturation(&self, potential: f64) -> Result<f64, PropertyError> {
        let potential = checked_potential(potential)?;
        if potential == 0.0 {
            return Ok(1.0);
        }
        Ok((1.0 + (-self.alpha * potential).powf(self.n)).powf(-self.m))
    }

    /// Volumetric moisture content `φ = φ_max · S(μ)`.
    ///
    /// # Errors
    ///
    /// See [`VanGenuchten::saturation`].
    pub fn moisture_content(&self, potential: f64) -> Result<f64, PropertyError> {
        Ok(self.phi_max * self.saturation(potential)?)
    }

    /// Potential that produces the given moisture content.
    ///
    /// This is the exact algebraic inverse of [`VanGenuchten::moisture_content`].
    /// Moisture contents at or above `φ_max` map to zero potential.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the moisture content is not
    /// strictly positive, since a fully dry state has no finite potential.
    pub fn potential_from_moisture_content(&self, moisture_content: f64) -> Result<f64, PropertyError> {
        if StrictlyPositive::check(&moisture_content).is_err() || !moisture_content.is_finite() {
            return Err(PropertyError::out_of_domain(format!(
                "moisture content must be positive and finite: {moisture_content}"
            )));
        }
        if moisture_content >= self.phi_max {
            return Ok(0.0);
        }

        let saturation = moisture_content / self.phi_max;
        let potential = -(saturation.powf(-1.0 / self.m) - 1.0).powf(1.0 / self.n) / self.alpha;
        if potential.is_finite() {
            Ok(potential)
        } else {
            Err(PropertyError::Calculation {
                context: format!("inverse retention overflowed at moisture content {moisture_content}"),
            })
        }
    }

    /// Magnitude of `dφ/dμ`, m³/m³ per J/kg.
    ///
    /// Uses the closed form
    /// `α·m·φ_max/(1 − m) · S^(1/m) · (1 − S^(1/m))^m`,
    /// which vanishes at saturation.
    ///
    /// # Errors
    ///
    /// See [`VanGenuchten::saturation`].
    pub fn moisture_capacity(&self, potential: f64) -> Result<f64, PropertyError> {
        let s_pow = self.saturation(potential)?.powf(1.0 / self.m);
        let slope =
            self.alpha * self.m * self.phi_max / (1.0 - self.m) * s_pow * (1.0 - s_pow).powf(self.m);
        Ok(slope.abs())
    }

    /// Mualem relative liquid conductivity `K_r ∈ [0, 1]`.
    ///
    /// # Errors
    ///
    /// See [`VanGenuchten::saturation`].
    pub fn relative_conductivity(&self, potential: f64) -> Result<f64, PropertyError> {
        let saturation = self.saturation(potential)?;
        Ok(self.relative_conductivity_at_saturation(saturation))
    }

    /// Mualem relative liquid conductivity as a function of saturation.
    ///
    /// The saturation is clamped to `[0, 1]`.
    #[must_use]
    pub fn relative_conductivity_at_saturation(&self, saturation: f64) -> f64 {
        let saturation = saturation.clamp(0.0, 1.0);
        let tail = 1.0 - (1.0 - saturation.powf(1.0 / self.m)).powf(self.m);
        saturation.powf(self.l) * tail * tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::support::{constraint::UnitInterval, hygro::POTENTIAL_TOLERANCE};

    fn sandstone() -> VanGenuchten {
        VanGenuchten::new(0.23, 10.0 / 98.0, 2.0, 0.5).unwrap()
    }

    #[test]
    fn saturated_at_zero_potential() {
        let vg = sandstone();
        assert_eq!(vg.saturation(0.0).unwrap(), 1.0);
        assert_eq!(vg.moisture_content(0.0).unwrap(), 0.23);
        assert_eq!(vg.relative_conductivity(0.0).unwrap(), 1.0);
        assert_eq!(vg.moisture_capacity(0.0).unwrap(), 0.0);
    }

    #[test]
    fn tolerates_tiny_positive_potential() {
        let vg = sandstone();
        assert_eq!(vg.saturation(0.5 * POTENTIAL_TOLERANCE).unwrap(), 1.0);
        assert!(matches!(
            vg.saturation(1.0),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(vg.saturation(f64::NAN).is_err());
    }

    #[test]
    fn known_value() {
        // With n = 2 the curve reduces to S = 1 / sqrt(1 + (α·μ)²).
        let vg = sandstone();
        let alpha_mu: f64 = 10.0 / 98.0 * 1000.0;
        let expected = 1.0 / (1.0 + alpha_mu * alpha_mu).sqrt();
        assert_relative_eq!(vg.saturation(-1000.0).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn capacity_matches_finite_difference() {
        let vg = sandstone();
        let mu = -150.0;
        let h = 1e-3;
        let numeric =
            (vg.moisture_content(mu + h).unwrap() - vg.moisture_content(mu - h).unwrap()) / (2.0 * h);
        assert_relative_eq!(vg.moisture_capacity(mu).unwrap(), numeric, max_relative = 1e-6);
    }

    #[test]
    fn inverse_edge_cases() {
        let vg = sandstone();
        assert_eq!(vg.potential_from_moisture_content(0.23).unwrap(), 0.0);
        assert_eq!(vg.potential_from_moisture_content(0.30).unwrap(), 0.0);
        assert!(vg.potential_from_moisture_content(0.0).is_err());
        assert!(vg.potential_from_moisture_content(-0.1).is_err());
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            VanGenuchten::new(0.0, 0.1, 2.0, 0.5),
            Err(RetentionParametersError::MaxMoistureContent { phi_max: 0.0 })
        );
        assert_eq!(
            VanGenuchten::new(0.2, -0.1, 2.0, 0.5),
            Err(RetentionParametersError::Alpha { alpha: -0.1 })
        );
        assert_eq!(
            VanGenuchten::new(0.2, 0.1, 1.0, 0.5),
            Err(RetentionParametersError::ShapeN { n: 1.0 })
        );
    }

    proptest! {
        #[test]
        fn inverse_round_trip(exponent in 0.0f64..6.0) {
            let vg = sandstone();
            let potential = -(10f64.powf(exponent));
            let phi = vg.moisture_content(potential).unwrap();
            let recovered = vg.potential_from_moisture_content(phi).unwrap();
            prop_assert!(((recovered - potential) / potential).abs() < 1e-6);
        }

        #[test]
        fn saturation_within_unit_interval(potential in -1.0e7f64..=0.0) {
            let s = sandstone().saturation(potential).unwrap();
            prop_assert!(UnitInterval::check(&s).is_ok());
        }

        #[test]
        fn monotone_toward_saturation(a in -1.0e6f64..=0.0, b in -1.0e6f64..=0.0) {
            let vg = sandstone();
            let (drier, wetter) = if a <= b { (a, b) } else { (b, a) };
            let slack = 1.0 + 1e-12;
            prop_assert!(
                vg.moisture_content(drier).unwrap() <= vg.moisture_content(wetter).unwrap() * slack
            );
            prop_assert!(
                vg.relative_conductivity(drier).unwrap()
                    <= vg.relative_conductivity(wetter).unwrap() * slack
            );
        }
    }
}
