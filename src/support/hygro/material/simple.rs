use thiserror::Error;

use crate::support::{
    constraint::{Constraint, NonNegative, StrictlyPositive},
    hygro::PropertyError,
};

use super::{MaterialModel, MaterialProperties};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SimpleMaterialError {
    #[error("{name} must be non-negative and finite: {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must be strictly positive and finite: {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// A material with constant hygrothermal properties.
///
/// Suitable for air layers and for simplified materials whose moisture
/// behaviour does not matter to the result. Its moisture content is fixed,
/// so it has no retention curve to invert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleMaterial {
    properties: MaterialProperties,
    moisture_content: f64,
}

impl SimpleMaterial {
    /// Creates a material with the given constant properties, in the units of
    /// [`MaterialProperties`], and zero moisture content.
    ///
    /// # Errors
    ///
    /// Capacities must be strictly positive; conductivities must be
    /// non-negative. All values must be finite.
    pub fn new(
        heat_conductivity: f64,
        heat_capacity: f64,
        moisture_capacity: f64,
        liquid_conductivity: f64,
        vapor_conductivity: f64,
    ) -> Result<Self, SimpleMaterialError> {
        for (name, value) in [
            ("heat conductivity", heat_conductivity),
            ("liquid conductivity", liquid_conductivity),
            ("vapor conductivity", vapor_conductivity),
        ] {
            if NonNegative::check(&value).is_err() || !value.is_finite() {
                return Err(SimpleMaterialError::Negative { name, value });
            }
        }
        for (name, value) in [
            ("heat capacity", heat_capacity),
            ("moisture capacity", moisture_capacity),
        ] {
            if StrictlyPositive::check(&value).is_err() || !value.is_finite() {
                return Err(SimpleMaterialError::NotPositive { name, value });
            }
        }

        Ok(Self {
            properties: MaterialProperties {
                heat_conductivity,
                heat_capacity,
                moisture_capacity,
                liquid_conductivity,
                vapor_conductivity,
            },
            moisture_content: 0.0,
        })
    }

    /// Returns the material with a fixed moisture content, m³/m³.
    ///
    /// # Errors
    ///
    /// The moisture content must be non-negative and finite.
    pub fn with_moisture_content(mut self, moisture_content: f64) -> Result<Self, SimpleMaterialError> {
        if NonNegative::check(&moisture_content).is_err() || !moisture_content.is_finite() {
            return Err(SimpleMaterialError::Negative {
                name: "moisture content",
                value: moisture_content,
            });
        }
        self.moisture_content = moisture_content;
        Ok(self)
    }
}

impl MaterialModel for SimpleMaterial {
    fn heat_conductivity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.properties.heat_conductivity)
    }

    fn heat_capacity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.properties.heat_capacity)
    }

    fn moisture_capacity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.properties.moisture_capacity)
    }

    fn liquid_conductivity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.properties.liquid_conductivity)
    }

    fn vapor_conductivity(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.properties.vapor_conductivity)
    }

    fn moisture_content(&self, _temperature: f64, _potential: f64) -> Result<f64, PropertyError> {
        Ok(self.moisture_content)
    }

    fn potential_from_moisture_content(
        &self,
        _temperature: f64,
        moisture_content: f64,
    ) -> Result<f64, PropertyError> {
        Err(PropertyError::out_of_domain(format!(
            "material with fixed moisture content cannot reach {moisture_content}"
        )))
    }

    fn properties(&self, _temperature: f64, _potential: f64) -> Result<MaterialProperties, PropertyError> {
        Ok(self.properties)
    }
}
