use thiserror::Error;
use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    hygro::{PropertyError, retention::VanGenuchten},
};

use super::MaterialModel;

/// Fraction of the dry vapor conductivity lost at full saturation.
const VAPOR_BLOCKING: f64 = 0.9;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SandstoneParametersError {
    #[error("invalid heat conductivity: {0:?}")]
    HeatConductivity(ThermalConductivity),
    #[error("invalid bulk density: {0:?}")]
    BulkDensity(MassDensity),
    #[error("invalid specific heat: {0:?}")]
    SpecificHeat(SpecificHeatCapacity),
    #[error("invalid latent heat reference: {0:?}")]
    LatentHeatRef(SpecificHeatCapacity),
    #[error("invalid water density: {0:?}")]
    WaterDensity(MassDensity),
    #[error("invalid saturated liquid conductivity: {0}")]
    SaturatedConductivity(f64),
    #[error("invalid dry vapor conductivity: {0}")]
    VaporConductivity(f64),
}

/// Parameters of a retention-backed sandstone material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandstoneParameters {
    pub heat_conductivity: ThermalConductivity,
    pub bulk_density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
    /// Heat stored per unit mass of retained moisture and kelvin.
    pub latent_heat_ref: SpecificHeatCapacity,
    pub water_density: MassDensity,
    /// Liquid conductivity at saturation, kg/(m·s) per J/kg/m.
    pub saturated_conductivity: f64,
    /// Vapor conductivity of the dry material, kg/(m·s·Pa).
    pub vapor_conductivity: f64,
    pub retention: VanGenuchten,
}

/// Sandstone-type porous stone.
///
/// Moisture storage and liquid transport follow a [`VanGenuchten`] curve;
/// vapor conductivity falls linearly with saturation as pores fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sandstone {
    heat_conductivity: f64,
    bulk_density: f64,
    specific_heat: f64,
    latent_heat_ref: f64,
    water_density: f64,
    saturated_conductivity: f64,
    vapor_conductivity: f64,
    retention: VanGenuchten,
}

impl Sandstone {
    /// Creates a sandstone from its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SandstoneParametersError`] naming the first parameter that is
    /// not strictly positive and finite.
    pub fn new(parameters: SandstoneParameters) -> Result<Self, SandstoneParametersError> {
        let SandstoneParameters {
            heat_conductivity,
            bulk_density,
            specific_heat,
            latent_heat_ref,
            water_density,
            saturated_conductivity,
            vapor_conductivity,
            retention,
        } = parameters;

        let positive = |value: f64| StrictlyPositive::check(&value).is_ok() && value.is_finite();

        if !positive(heat_conductivity.value) {
            return Err(SandstoneParametersError::HeatConductivity(heat_conductivity));
        }
        if !positive(bulk_density.value) {
            return Err(SandstoneParametersError::BulkDensity(bulk_density));
        }
        if !positive(specific_heat.value) {
            return Err(SandstoneParametersError::SpecificHeat(specific_heat));
        }
        if !positive(latent_heat_ref.value) {
            return Err(SandstoneParametersError::LatentHeatRef(latent_heat_ref));
        }
        if !positive(water_density.value) {
            return Err(SandstoneParametersError::WaterDensity(water_density));
        }
        if !positive(saturated_conductivity) {
            return Err(SandstoneParametersError::SaturatedConductivity(
                saturated_conductivity,
            ));
        }
        if !positive(vapor_conductivity) {
            return Err(SandstoneParametersError::VaporConductivity(vapor_conductivity));
        }

        Ok(Self {
            heat_conductivity: heat_conductivity.value,
            bulk_density: bulk_density.value,
            specific_heat: specific_heat.value,
            latent_heat_ref: latent_heat_ref.value,
            water_density: water_density.value,
            saturated_conductivity,
            vapor_conductivity,
            retention,
        })
    }

    /// Bentheimer sandstone.
    ///
    /// Reference: V. Voronina, L. Pel, K. Kopinga, "The influence of osmotic
    /// pressure on poulticing treatments for heritage objects", Materials and
    /// Structures 46, pp. 221–231, 2013.
    #[must_use]
    pub fn bentheimer() -> Self {
        Self {
            heat_conductivity: 1.2,
            bulk_density: 1479.25,
            specific_heat: 750.0,
            latent_heat_ref: 4186.05,
            water_density: 1000.0,
            saturated_conductivity: 2.0e-7,
            vapor_conductivity: 2.0e-10,
            retention: Self::bentheimer_retention(),
        }
    }

    /// Parameters of [`Sandstone::bentheimer`], for building variants.
    #[must_use]
    pub fn bentheimer_parameters() -> SandstoneParameters {
        SandstoneParameters {
            heat_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(1.2),
            bulk_density: MassDensity::new::<kilogram_per_cubic_meter>(1479.25),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(750.0),
            latent_heat_ref: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4186.05),
            water_density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
            saturated_conductivity: 2.0e-7,
            vapor_conductivity: 2.0e-10,
            retention: Self::bentheimer_retention(),
        }
    }

    fn bentheimer_retention() -> VanGenuchten {
        VanGenuchten::new_unchecked(0.23, 10.0 / 98.0, 2.0, 0.5)
    }

    /// The retention curve of this material.
    #[must_use]
    pub fn retention(&self) -> &VanGenuchten {
        &self.retention
    }
}

impl MaterialModel for Sandstone {
    fn heat_conductivity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.heat_conductivity)
    }

    fn heat_capacity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        let phi = self.moisture_content(temperature, potential)?;
        Ok(self.bulk_density * self.specific_heat + self.bulk_density * phi * self.latent_heat_ref)
    }

    fn moisture_capacity(&self, _temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        Ok(self.water_density * self.retention.moisture_capacity(potential)?)
    }

    fn liquid_conductivity(&self, _temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        Ok(self.saturated_conductivity * self.retention.relative_conductivity(potential)?)
    }

    fn vapor_conductivity(&self, _temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        let saturation = self.retention.saturation(potential)?.clamp(0.0, 1.0);
        Ok(self.vapor_conductivity * (1.0 - VAPOR_BLOCKING * saturation))
    }

    fn moisture_content(&self, _temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.retention.moisture_content(potential)
    }

    fn potential_from_moisture_content(
        &self,
        _temperature: f64,
        moisture_content: f64,
    ) -> Result<f64, PropertyError> {
        self.retention.potential_from_moisture_content(moisture_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn preset_matches_parameters() {
        let from_parameters = Sandstone::new(Sandstone::bentheimer_parameters()).unwrap();
        assert_eq!(from_parameters, Sandstone::bentheimer());
    }

    #[test]
    fn heat_capacity_includes_moisture() {
        let stone = Sandstone::bentheimer();
        let dry = 1479.25 * 750.0;

        let wet = stone.heat_capacity(283.15, 0.0).unwrap();
        assert_relative_eq!(wet, dry + 1479.25 * 0.23 * 4186.05);

        let damp = stone.heat_capacity(283.15, -1000.0).unwrap();
        assert!(damp > dry && damp < wet);
    }

    #[test]
    fn vapor_conductivity_blends_with_saturation() {
        let stone = Sandstone::bentheimer();
        assert_relative_eq!(stone.vapor_conductivity(283.15, 0.0).unwrap(), 2.0e-11);
        let very_dry = stone.vapor_conductivity(283.15, -1.0e8).unwrap();
        assert!(very_dry > 0.0 && very_dry <= 2.0e-10);
        assert_relative_eq!(very_dry, 2.0e-10, max_relative = 1e-4);
    }

    #[test]
    fn moisture_capacity_scales_retention_slope() {
        let stone = Sandstone::bentheimer();
        let slope = stone.retention().moisture_capacity(-1000.0).unwrap();
        assert_relative_eq!(stone.moisture_capacity(283.15, -1000.0).unwrap(), 1000.0 * slope);
        assert_eq!(stone.moisture_capacity(283.15, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn liquid_conductivity_saturates_at_ksat() {
        let stone = Sandstone::bentheimer();
        assert_relative_eq!(stone.liquid_conductivity(283.15, 0.0).unwrap(), 2.0e-7);
        assert!(stone.liquid_conductivity(283.15, -1000.0).unwrap() < 2.0e-7);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let mut parameters = Sandstone::bentheimer_parameters();
        parameters.saturated_conductivity = 0.0;
        assert_eq!(
            Sandstone::new(parameters),
            Err(SandstoneParametersError::SaturatedConductivity(0.0))
        );

        let mut parameters = Sandstone::bentheimer_parameters();
        parameters.latent_heat_ref = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(-1.0);
        assert_eq!(
            Sandstone::new(parameters),
            Err(SandstoneParametersError::LatentHeatRef(
                parameters.latent_heat_ref
            ))
        );
    }
}
