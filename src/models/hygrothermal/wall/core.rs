//! Finite-volume solver for coupled heat and moisture transport in a wall.
//!
//! The wall is a line of control volumes between two ambient nodes. Heat
//! moves by conduction and with the latent heat of vapor; moisture moves as
//! vapor and as liquid. Material properties depend on the local temperature
//! and moisture potential, so the system is nonlinear and is marched
//! explicitly in time.

mod averaging;
mod config;
mod error;
mod flux;
mod integrate;
mod mesh;
mod results;
mod series;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use averaging::InterfaceAveraging;
pub use config::{
    Boundaries, HygroState, InitialCondition, Scenario, SolverOptions, StabilityPolicy,
};
pub use error::{ConfigurationError, FieldQuantity, SimulationError};
pub use flux::{
    EdgeConductivity, EdgeDifference, EdgeFlux, GRAVITY, SurfaceTransfer, VaporFluxForm,
    bulk_heat_flux, bulk_liquid_flux, bulk_vapor_flux, bulk_vapor_flux_potential, edge_flux,
    surface_heat_flux, surface_vapor_flux,
};
pub use integrate::{
    Action, Integrator, RunStatus, STABILITY_LIMIT, StabilityEstimate, StepEvent,
};
pub use mesh::{Edge, EdgeKind, Layer, Mesh, NodeKind};
pub use results::{Results, SurfaceCondensation};
pub use state::{History, Snapshot};
