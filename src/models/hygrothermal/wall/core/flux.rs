//! Heat and moisture fluxes across mesh edges.
//!
//! All differences are taken as `value[i + 1] − value[i]` across edge `i`.
//! A positive flux on edge `i` carries energy or moisture from node `i + 1`
//! into node `i`, so node `i` gains `flux[i] − flux[i − 1]`.
//!
//! Flux functions are total: non-finite inputs propagate as `NaN` or `Inf`
//! and are caught by the integrator's divergence check.

use uom::si::{f64::HeatTransfer, heat_transfer::watt_per_square_meter_kelvin};

use crate::support::hygro::vapor::latent_heat;

use super::mesh::{Edge, EdgeKind};

/// Standard gravity, m/s².
pub const GRAVITY: f64 = 9.80665;

/// Specific heat of air used by the Lewis relation, J/(kg·K).
const AIR_SPECIFIC_HEAT: f64 = 1005.0;

/// Density of air used by the Lewis relation, kg/m³.
const AIR_DENSITY: f64 = 1.205;

/// Gas constant of water vapor used by the Lewis relation, J/(kg·K).
const LEWIS_VAPOR_GAS_CONSTANT: f64 = 8314.41 / 18.02;

/// Reference air temperature of the Lewis relation, K.
const LEWIS_REFERENCE_TEMPERATURE: f64 = 293.15;

/// Transfer coefficients between a material surface and the adjacent air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransfer {
    /// Total heat transfer coefficient, W/(m²·K).
    pub heat: f64,
    /// Vapor transfer coefficient, kg/(m²·s·Pa).
    pub vapor: f64,
}

impl SurfaceTransfer {
    /// Derives both coefficients from convective and radiative heat transfer.
    ///
    /// Heat transfer uses the sum of both parts. Vapor transfer follows from
    /// the convective part through the Lewis analogy.
    #[must_use]
    pub fn lewis(convective: HeatTransfer, radiative: HeatTransfer) -> Self {
        let convective = convective.get::<watt_per_square_meter_kelvin>();
        let radiative = radiative.get::<watt_per_square_meter_kelvin>();
        Self {
            heat: convective + radiative,
            vapor: convective
                / (AIR_SPECIFIC_HEAT
                    * AIR_DENSITY
                    * LEWIS_VAPOR_GAS_CONSTANT
                    * LEWIS_REFERENCE_TEMPERATURE),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.heat, self.vapor]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

impl Default for SurfaceTransfer {
    /// Still indoor air: 4.9 W/(m²·K) convective, 4.4 W/(m²·K) radiative.
    fn default() -> Self {
        Self::lewis(
            HeatTransfer::new::<watt_per_square_meter_kelvin>(4.9),
            HeatTransfer::new::<watt_per_square_meter_kelvin>(4.4),
        )
    }
}

/// Driving force used for vapor transport inside materials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VaporFluxForm {
    /// Vapor conductivity times the vapor pressure gradient.
    #[default]
    Pressure,
    /// Potential and temperature gradients, with coefficients derived from
    /// the vapor pressure partial derivatives.
    Potential,
}

/// Conduction across a material edge, W/m².
#[must_use]
pub fn bulk_heat_flux(conductivity: f64, temperature_difference: f64, dx2: f64) -> f64 {
    conductivity * temperature_difference / dx2
}

/// Heat transfer between a surface and air, W/m².
#[must_use]
pub fn surface_heat_flux(coefficient: f64, temperature_difference: f64) -> f64 {
    coefficient * temperature_difference
}

/// Vapor diffusion driven by a vapor pressure difference, kg/(m²·s).
#[must_use]
pub fn bulk_vapor_flux(conductivity: f64, pressure_difference: f64, dx2: f64) -> f64 {
    conductivity * pressure_difference / dx2
}

/// Vapor transfer between a surface and air, kg/(m²·s).
#[must_use]
pub fn surface_vapor_flux(coefficient: f64, pressure_difference: f64) -> f64 {
    coefficient * pressure_difference
}

/// Vapor diffusion written in potential and temperature gradients, kg/(m²·s).
///
/// `potential_conductivity` is `λ'ₚ·∂Pᵥ/∂μ` and `temperature_conductivity`
/// is `λ'ₚ·∂Pᵥ/∂T`, both averaged onto the edge.
#[must_use]
pub fn bulk_vapor_flux_potential(
    potential_conductivity: f64,
    temperature_conductivity: f64,
    difference: &EdgeDifference,
    dx2: f64,
    nx: f64,
) -> f64 {
    potential_conductivity * (difference.potential / dx2 - nx * GRAVITY)
        + temperature_conductivity * difference.temperature / dx2
}

/// Liquid flow driven by the potential gradient and gravity, kg/(m²·s).
#[must_use]
pub fn bulk_liquid_flux(conductivity: f64, potential_difference: f64, dx2: f64, nx: f64) -> f64 {
    conductivity * (potential_difference / dx2 - nx * GRAVITY)
}

/// Transport coefficients averaged onto one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeConductivity {
    /// W/(m·K).
    pub heat: f64,
    /// kg/(m·s·Pa).
    pub vapor: f64,
    /// kg/(m·s) per J/kg/m.
    pub liquid: f64,
    /// Vapor conductivity with respect to potential; only used by
    /// [`VaporFluxForm::Potential`].
    pub vapor_potential: f64,
    /// Vapor conductivity with respect to temperature; only used by
    /// [`VaporFluxForm::Potential`].
    pub vapor_temperature: f64,
}

/// Differences across one edge, `value[i + 1] − value[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeDifference {
    pub temperature: f64,
    pub potential: f64,
    pub vapor_pressure: f64,
}

/// Fluxes across one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeFlux {
    /// Sensible heat, W/m².
    pub heat: f64,
    /// Latent heat carried by the vapor flux, W/m².
    pub latent: f64,
    /// Vapor, kg/(m²·s).
    pub vapor: f64,
    /// Liquid water, kg/(m²·s).
    pub liquid: f64,
}

impl EdgeFlux {
    /// Total energy flux, W/m².
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.heat + self.latent
    }

    /// Total moisture flux, kg/(m²·s).
    #[must_use]
    pub fn moisture(&self) -> f64 {
        self.vapor + self.liquid
    }
}

/// Computes all fluxes across an edge.
///
/// `mean_temperature` is the edge temperature at which latent heat is
/// evaluated. Surface edges use their transfer coefficients and carry no
/// liquid water.
#[must_use]
pub fn edge_flux(
    edge: &Edge,
    dx2: f64,
    conductivity: &EdgeConductivity,
    difference: &EdgeDifference,
    mean_temperature: f64,
    form: VaporFluxForm,
) -> EdgeFlux {
    let (heat, vapor, liquid) = match edge.kind {
        EdgeKind::Surface(transfer) => (
            surface_heat_flux(transfer.heat, difference.temperature),
            surface_vapor_flux(transfer.vapor, difference.vapor_pressure),
            0.0,
        ),
        EdgeKind::Bulk => {
            let vapor = match form {
                VaporFluxForm::Pressure => {
                    bulk_vapor_flux(conductivity.vapor, difference.vapor_pressure, dx2)
                }
                VaporFluxForm::Potential => bulk_vapor_flux_potential(
                    conductivity.vapor_potential,
                    conductivity.vapor_temperature,
                    difference,
                    dx2,
                    edge.nx,
                ),
            };
            (
                bulk_heat_flux(conductivity.heat, difference.temperature, dx2),
                vapor,
                bulk_liquid_flux(conductivity.liquid, difference.potential, dx2, edge.nx),
            )
        }
    };

    EdgeFlux {
        heat,
        latent: vapor * latent_heat(mean_temperature),
        vapor,
        liquid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn conductivity() -> EdgeConductivity {
        EdgeConductivity {
            heat: 1.2,
            vapor: 2.0e-10,
            liquid: 1.0e-9,
            vapor_potential: 3.0e-12,
            vapor_temperature: 4.0e-11,
        }
    }

    fn difference() -> EdgeDifference {
        EdgeDifference {
            temperature: 0.5,
            potential: 20.0,
            vapor_pressure: 10.0,
        }
    }

    #[test]
    fn positive_difference_gives_positive_flux() {
        let flux = edge_flux(
            &Edge::bulk(),
            0.1,
            &conductivity(),
            &difference(),
            283.15,
            VaporFluxForm::Pressure,
        );
        assert!(flux.heat > 0.0);
        assert_relative_eq!(flux.heat, 1.2 * 0.5 / 0.1);
        assert_relative_eq!(flux.vapor, 2.0e-10 * 10.0 / 0.1);
        assert_relative_eq!(flux.liquid, 1.0e-9 * 20.0 / 0.1);
        assert_relative_eq!(flux.latent, flux.vapor * latent_heat(283.15));
        assert_relative_eq!(flux.energy(), flux.heat + flux.latent);
        assert_relative_eq!(flux.moisture(), flux.vapor + flux.liquid);
    }

    #[test]
    fn surface_and_bulk_branches_differ() {
        let transfer = SurfaceTransfer::default();
        let surface = edge_flux(
            &Edge::surface(transfer),
            0.1,
            &conductivity(),
            &difference(),
            283.15,
            VaporFluxForm::Pressure,
        );
        let bulk = edge_flux(
            &Edge::bulk(),
            0.1,
            &conductivity(),
            &difference(),
            283.15,
            VaporFluxForm::Pressure,
        );

        assert_relative_eq!(surface.heat, 9.3 * 0.5);
        assert_relative_eq!(surface.vapor, transfer.vapor * 10.0);
        assert_eq!(surface.liquid, 0.0);
        assert!(surface.heat > 0.0 && bulk.heat > 0.0);
        assert!((surface.heat - bulk.heat).abs() > 1.0);
        assert!(surface.vapor != bulk.vapor);
    }

    #[test]
    fn lewis_relation_reference_value() {
        let transfer = SurfaceTransfer::default();
        assert_relative_eq!(transfer.heat, 9.3);
        assert_relative_eq!(
            transfer.vapor,
            4.9 / (1005.0 * 1.205 * (8314.41 / 18.02) * 293.15)
        );
        assert!(transfer.is_valid());
    }

    #[test]
    fn gravity_drives_liquid_on_inclined_edges() {
        let flat = bulk_liquid_flux(1.0e-9, 0.0, 0.1, 0.0);
        let vertical = bulk_liquid_flux(1.0e-9, 0.0, 0.1, 1.0);
        assert_eq!(flat, 0.0);
        assert_relative_eq!(vertical, -1.0e-9 * GRAVITY);
    }

    #[test]
    fn potential_form_combines_both_gradients() {
        let flux = edge_flux(
            &Edge::bulk(),
            0.1,
            &conductivity(),
            &difference(),
            283.15,
            VaporFluxForm::Potential,
        );
        assert_relative_eq!(flux.vapor, 3.0e-12 * 20.0 / 0.1 + 4.0e-11 * 0.5 / 0.1);
    }

    #[test]
    fn non_finite_inputs_propagate() {
        let mut conductivity = conductivity();
        conductivity.heat = f64::NAN;
        let flux = edge_flux(
            &Edge::bulk(),
            0.1,
            &conductivity,
            &difference(),
            283.15,
            VaporFluxForm::Pressure,
        );
        assert!(flux.heat.is_nan());
    }
}
