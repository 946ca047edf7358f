//! Hygrothermal material properties.
//!
//! Every property is a function of `(temperature, potential)`, even where a
//! particular material ignores one of the arguments. This keeps the
//! interface stable when a temperature-dependent variant is added.
//!
//! Materials form a closed set of kinds ([`Material`]), each with its own
//! parameter bundle. A wall refers to materials through a [`MaterialLibrary`],
//! which maps [`MaterialId`]s to materials and is immutable once built.

mod sandstone;
mod simple;

use std::collections::BTreeMap;

use thiserror::Error;

pub use sandstone::{Sandstone, SandstoneParameters, SandstoneParametersError};
pub use simple::{SimpleMaterial, SimpleMaterialError};

use super::PropertyError;

/// Transport and storage properties of a material at one state.
///
/// All values are in SI units:
///
/// | Field | Unit |
/// |-------|------|
/// | `heat_conductivity` | W/(m·K) |
/// | `heat_capacity` | J/(m³·K) |
/// | `moisture_capacity` | kg/m³ per J/kg |
/// | `liquid_conductivity` | kg/(m·s) per J/kg/m |
/// | `vapor_conductivity` | kg/(m·s·Pa) |
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaterialProperties {
    pub heat_conductivity: f64,
    pub heat_capacity: f64,
    pub moisture_capacity: f64,
    pub liquid_conductivity: f64,
    pub vapor_conductivity: f64,
}

/// A porous material described by its hygrothermal property functions.
///
/// Temperatures are in kelvin and potentials in J/kg.
pub trait MaterialModel {
    /// Heat conductivity, W/(m·K).
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn heat_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Volumetric heat capacity including retained moisture, J/(m³·K).
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn heat_capacity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Moisture capacity with respect to potential, kg/m³ per J/kg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn moisture_capacity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Liquid moisture conductivity with respect to the potential gradient.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn liquid_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Vapor moisture conductivity with respect to the vapor pressure gradient.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn vapor_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Volumetric moisture content, m³/m³.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain.
    fn moisture_content(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError>;

    /// Potential that produces the given moisture content, J/kg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the moisture content cannot be reached.
    fn potential_from_moisture_content(
        &self,
        temperature: f64,
        moisture_content: f64,
    ) -> Result<f64, PropertyError>;

    /// Evaluates all transport and storage properties at once.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] encountered.
    fn properties(&self, temperature: f64, potential: f64) -> Result<MaterialProperties, PropertyError> {
        Ok(MaterialProperties {
            heat_conductivity: self.heat_conductivity(temperature, potential)?,
            heat_capacity: self.heat_capacity(temperature, potential)?,
            moisture_capacity: self.moisture_capacity(temperature, potential)?,
            liquid_conductivity: self.liquid_conductivity(temperature, potential)?,
            vapor_conductivity: self.vapor_conductivity(temperature, potential)?,
        })
    }
}

/// The closed set of supported material kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Constant properties, for air layers and simplified materials.
    Simple(SimpleMaterial),
    /// Sandstone-type material backed by a van Genuchten retention curve.
    Sandstone(Sandstone),
}

impl From<SimpleMaterial> for Material {
    fn from(material: SimpleMaterial) -> Self {
        Self::Simple(material)
    }
}

impl From<Sandstone> for Material {
    fn from(material: Sandstone) -> Self {
        Self::Sandstone(material)
    }
}

impl Material {
    fn model(&self) -> &dyn MaterialModel {
        match self {
            Self::Simple(material) => material,
            Self::Sandstone(material) => material,
        }
    }
}

impl MaterialModel for Material {
    fn heat_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().heat_conductivity(temperature, potential)
    }

    fn heat_capacity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().heat_capacity(temperature, potential)
    }

    fn moisture_capacity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().moisture_capacity(temperature, potential)
    }

    fn liquid_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().liquid_conductivity(temperature, potential)
    }

    fn vapor_conductivity(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().vapor_conductivity(temperature, potential)
    }

    fn moisture_content(&self, temperature: f64, potential: f64) -> Result<f64, PropertyError> {
        self.model().moisture_content(temperature, potential)
    }

    fn potential_from_moisture_content(
        &self,
        temperature: f64,
        moisture_content: f64,
    ) -> Result<f64, PropertyError> {
        self.model()
            .potential_from_moisture_content(temperature, moisture_content)
    }
}

/// Identifier under which a material is registered in a [`MaterialLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u32);

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from looking up material properties by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    #[error("unknown material {0}")]
    UnknownMaterial(MaterialId),
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Immutable mapping from material identifiers to materials.
///
/// # Example
///
/// ```
/// use twine_hygrothermal::support::hygro::material::{MaterialId, MaterialLibrary, Sandstone};
///
/// let library = MaterialLibrary::new().with(MaterialId(30), Sandstone::bentheimer());
/// let props = library.properties(MaterialId(30), 283.15, -1000.0).unwrap();
/// assert!(props.moisture_capacity > 0.0);
/// assert!(library.properties(MaterialId(7), 283.15, -1000.0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: BTreeMap<MaterialId, Material>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the library with `material` registered under `id`.
    ///
    /// Registering an identifier twice replaces the earlier material.
    #[must_use]
    pub fn with(mut self, id: MaterialId, material: impl Into<Material>) -> Self {
        self.materials.insert(id, material.into());
        self
    }

    /// Looks up a material.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownMaterial`] if `id` is not registered.
    pub fn get(&self, id: MaterialId) -> Result<&Material, MaterialError> {
        self.materials
            .get(&id)
            .ok_or(MaterialError::UnknownMaterial(id))
    }

    /// Evaluates the properties of material `id` at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownMaterial`] for unregistered identifiers
    /// and [`MaterialError::Property`] if evaluation fails.
    pub fn properties(
        &self,
        id: MaterialId,
        temperature: f64,
        potential: f64,
    ) -> Result<MaterialProperties, MaterialError> {
        Ok(self.get(id)?.properties(temperature, potential)?)
    }

    /// Number of registered materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if no materials are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
