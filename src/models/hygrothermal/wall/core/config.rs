//! Scenario and solver configuration.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, ThermodynamicTemperature, Time},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    hygro::{POTENTIAL_TOLERANCE, PropertyError, vapor},
    units::ChemicalPotential,
};

use super::{averaging::InterfaceAveraging, flux::VaporFluxForm};

/// Temperature and moisture potential at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HygroState {
    pub temperature: ThermodynamicTemperature,
    pub potential: ChemicalPotential,
}

impl HygroState {
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, potential: ChemicalPotential) -> Self {
        Self {
            temperature,
            potential,
        }
    }

    /// Creates the state in equilibrium with air at the given relative humidity.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the relative humidity is not
    /// in `(0, 1]` or the temperature is outside the valid range.
    pub fn from_relative_humidity(
        temperature: ThermodynamicTemperature,
        relative_humidity: f64,
    ) -> Result<Self, PropertyError> {
        let potential =
            vapor::potential_from_relative_humidity(temperature.get::<kelvin>(), relative_humidity)?;
        Ok(Self::new(
            temperature,
            ChemicalPotential::new::<joule_per_kilogram>(potential),
        ))
    }

    /// Vapor pressure in equilibrium with this state.
    ///
    /// # Errors
    ///
    /// See [`vapor::vapor_pressure`].
    pub fn vapor_pressure(&self) -> Result<Pressure, PropertyError> {
        let (t, p) = self.si();
        Ok(Pressure::new::<pascal>(vapor::vapor_pressure(t, p)?))
    }

    /// Temperature in kelvin and potential in J/kg.
    pub(crate) fn si(&self) -> (f64, f64) {
        (
            self.temperature.get::<kelvin>(),
            self.potential.get::<joule_per_kilogram>(),
        )
    }
}

/// Fixed conditions of the ambient air on either side of the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    /// Air at node 0.
    pub low: HygroState,
    /// Air at the last node.
    pub high: HygroState,
}

/// Starting fields of the material nodes.
///
/// Ambient nodes always start at their boundary values.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    /// The same state at every node.
    Uniform(HygroState),

    /// A uniform temperature and volumetric moisture content, m³/m³.
    ///
    /// Each node's potential follows from its material's retention curve.
    UniformMoistureContent {
        temperature: ThermodynamicTemperature,
        moisture_content: f64,
    },

    /// Explicit per-node values, one entry per mesh node.
    ///
    /// Entries at the ambient nodes are replaced by the boundary values.
    Profile {
        temperature: Vec<ThermodynamicTemperature>,
        potential: Vec<ChemicalPotential>,
    },
}

/// One simulation run of a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub initial: InitialCondition,
    pub boundaries: Boundaries,
    pub time_step: Constrained<Time, StrictlyPositive>,
    /// Number of steps taken by a full run.
    pub steps: usize,
}

/// Response to an explicit time step that exceeds the stability limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StabilityPolicy {
    /// Log a warning and run anyway.
    #[default]
    Warn,
    /// Refuse to start the run.
    Reject,
}

/// Numerical settings of the wall solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub averaging: InterfaceAveraging,
    pub vapor_flux: VaporFluxForm,

    /// Largest positive potential, J/kg, accepted after a step.
    pub potential_tolerance: f64,

    /// Heat or moisture capacities at or below this value end the run.
    pub min_capacity: f64,

    pub stability: StabilityPolicy,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            averaging: InterfaceAveraging::default(),
            vapor_flux: VaporFluxForm::default(),
            potential_tolerance: POTENTIAL_TOLERANCE,
            min_capacity: 1.0e-15,
            stability: StabilityPolicy::default(),
        }
    }
}
