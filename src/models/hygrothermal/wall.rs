//! Coupled heat and moisture transport through a layered porous wall.
//!
//! [`HygrothermalWall`] is the [`twine_core::Model`] adapter: it holds the
//! static description of a wall and runs a [`Scenario`] to completion.
//! Use [`Integrator`] directly to step manually, observe or stop a run, or
//! keep the partial history of a run that fails.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_hygrothermal::{
//!     models::hygrothermal::wall::{
//!         Boundaries, HygroState, HygrothermalWall, InitialCondition, Mesh, Scenario,
//!         SolverOptions, SurfaceTransfer,
//!     },
//!     support::{
//!         constraint::Constrained,
//!         hygro::material::{MaterialId, MaterialLibrary, Sandstone},
//!     },
//! };
//! use uom::si::{
//!     f64::{Length, ThermodynamicTemperature, Time},
//!     length::meter,
//!     thermodynamic_temperature::kelvin,
//!     time::hour,
//! };
//!
//! let stone = MaterialId(30);
//! let wall = HygrothermalWall::new(
//!     Mesh::uniform(19, Length::new::<meter>(0.1), stone, [SurfaceTransfer::default(); 2])?,
//!     MaterialLibrary::new().with(stone, Sandstone::bentheimer()),
//!     SolverOptions::default(),
//! )?;
//!
//! let air = |t: f64, rh: f64| HygroState::from_relative_humidity(ThermodynamicTemperature::new::<kelvin>(t), rh);
//! let scenario = Scenario {
//!     initial: InitialCondition::Uniform(air(283.15, 0.99)?),
//!     boundaries: Boundaries { low: air(283.15, 0.99)?, high: air(293.15, 0.6)? },
//!     time_step: Constrained::new(Time::new::<hour>(0.25))?,
//!     steps: 96,
//! };
//!
//! let results = wall.call(&scenario)?;
//! assert_eq!(results.history.len(), 96);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

pub use self::core::{
    Action, Boundaries, ConfigurationError, Edge, EdgeConductivity, EdgeDifference, EdgeFlux,
    EdgeKind, FieldQuantity, GRAVITY, History, HygroState, InitialCondition, Integrator,
    InterfaceAveraging, Layer, Mesh, NodeKind, Results, RunStatus, STABILITY_LIMIT, Scenario,
    SimulationError, Snapshot, SolverOptions, StabilityEstimate, StabilityPolicy, StepEvent,
    SurfaceCondensation, SurfaceTransfer, VaporFluxForm, bulk_heat_flux, bulk_liquid_flux,
    bulk_vapor_flux, bulk_vapor_flux_potential, edge_flux, surface_heat_flux, surface_vapor_flux,
};

use twine_core::Model;

use crate::support::hygro::material::{MaterialId, MaterialLibrary};

/// A wall described by its mesh, materials, and solver settings.
#[derive(Debug, Clone)]
pub struct HygrothermalWall {
    mesh: Mesh,
    materials: MaterialLibrary,
    options: SolverOptions,
}

impl HygrothermalWall {
    /// Creates a wall model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownMaterial`] if a mesh node refers to
    /// a material that is not in `materials`.
    pub fn new(
        mesh: Mesh,
        materials: MaterialLibrary,
        options: SolverOptions,
    ) -> Result<Self, ConfigurationError> {
        for (node, kind) in mesh.nodes().iter().enumerate() {
            if let NodeKind::Material(id) = *kind {
                check_material(&materials, node, id)?;
            }
        }
        Ok(Self {
            mesh,
            materials,
            options,
        })
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[must_use]
    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    #[must_use]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Prepares a run of `scenario` that the caller steps.
    ///
    /// # Errors
    ///
    /// See [`Integrator::new`].
    pub fn integrator(&self, scenario: &Scenario) -> Result<Integrator, ConfigurationError> {
        Integrator::new(&self.mesh, &self.materials, self.options, scenario)
    }
}

fn check_material(
    materials: &MaterialLibrary,
    node: usize,
    id: MaterialId,
) -> Result<(), ConfigurationError> {
    materials
        .get(id)
        .map(|_| ())
        .map_err(|_| ConfigurationError::UnknownMaterial { node, id })
}

impl Model for HygrothermalWall {
    type Input = Scenario;
    type Output = Results;
    type Error = SimulationError;

    /// Runs every step of the scenario.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut integrator = self.integrator(input)?;
        integrator.run()?;
        Ok(integrator.into_results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::meter};

    use super::core::test_support::{library, reference_mesh, reference_scenario, time_step};

    #[test]
    fn model_runs_scenario_to_completion() {
        let wall =
            HygrothermalWall::new(reference_mesh(), library(), SolverOptions::default()).unwrap();

        let results = wall.call(&reference_scenario(10)).unwrap();
        assert_eq!(results.history.len(), 10);
        assert_eq!(results.final_state().step, 10);

        // The high side is warmer and wetter than the wall, whose surface
        // stays below the dew point of that air early in the run.
        assert_eq!(
            results.surface_condensation().unwrap(),
            SurfaceCondensation {
                low: false,
                high: true
            }
        );
    }

    #[test]
    fn unknown_material_is_rejected_up_front() {
        let mesh = Mesh::uniform(
            4,
            Length::new::<meter>(0.05),
            MaterialId(2),
            [SurfaceTransfer::default(); 2],
        )
        .unwrap();

        assert_eq!(
            HygrothermalWall::new(mesh, library(), SolverOptions::default()).unwrap_err(),
            ConfigurationError::UnknownMaterial {
                node: 1,
                id: MaterialId(2)
            }
        );
    }

    #[test]
    fn configuration_errors_surface_through_the_model() {
        let wall =
            HygrothermalWall::new(reference_mesh(), library(), SolverOptions::default()).unwrap();
        let mut scenario = reference_scenario(10);
        scenario.time_step = time_step(f64::INFINITY);

        assert!(matches!(
            wall.call(&scenario),
            Err(SimulationError::Configuration(
                ConfigurationError::NonFiniteTimeStep { .. }
            ))
        ));
    }
}
