use std::fmt;

use thiserror::Error;

use crate::support::hygro::{PropertyError, material::MaterialId};

/// A nodal field or coefficient that a check can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldQuantity {
    Temperature,
    Potential,
    HeatCapacity,
    MoistureCapacity,
}

impl fmt::Display for FieldQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Temperature => "temperature",
            Self::Potential => "potential",
            Self::HeatCapacity => "heat capacity",
            Self::MoistureCapacity => "moisture capacity",
        })
    }
}

/// Errors detected while building a wall or starting a simulation.
///
/// These are raised before any stepping takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("node {node} refers to unknown material {id}")]
    UnknownMaterial { node: usize, id: MaterialId },

    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("a wall needs at least 3 nodes, got {nodes}")]
    TooFewNodes { nodes: usize },

    #[error("spacing at node {node} must be positive and finite: {value} m")]
    NonPositiveSpacing { node: usize, value: f64 },

    #[error("layer {layer} must have at least one cell")]
    EmptyLayer { layer: usize },

    #[error("boundary node {node} must be ambient")]
    BoundaryNotAmbient { node: usize },

    #[error("interior node {node} must be a material node")]
    InteriorNotMaterial { node: usize },

    #[error("outer edge {edge} must be a surface edge")]
    OuterEdgeNotSurface { edge: usize },

    #[error("surface transfer coefficients on edge {edge} must be non-negative and finite")]
    InvalidSurfaceTransfer { edge: usize },

    #[error("direction cosine of edge {edge} must be in [-1, 1]: {nx}")]
    InvalidInclination { edge: usize, nx: f64 },

    #[error("time step must be finite: {dt} s")]
    NonFiniteTimeStep { dt: f64 },

    #[error("{quantity} is {value} at node {node} in the initial state")]
    ZeroCapacity {
        node: usize,
        quantity: FieldQuantity,
        value: f64,
    },

    #[error("invalid initial state at node {node}")]
    InvalidInitialState {
        node: usize,
        #[source]
        source: PropertyError,
    },

    #[error("time step is unstable for {quantity}: stability number {number} exceeds {limit}")]
    UnstableTimeStep {
        quantity: FieldQuantity,
        number: f64,
        limit: f64,
    },
}

/// Errors that can end a simulation run.
///
/// A run that fails keeps the history of every completed step; see
/// [`Integrator::history`](super::Integrator::history).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The wall or scenario was rejected before stepping.
    #[error("invalid configuration")]
    Configuration(#[from] ConfigurationError),

    /// A step produced a state the explicit scheme cannot continue from.
    ///
    /// `nodes` and `values` are aligned and list every offending node.
    #[error("numerical divergence at step {step}: {quantity} at nodes {nodes:?}")]
    NumericalDivergence {
        step: usize,
        quantity: FieldQuantity,
        nodes: Vec<usize>,
        values: Vec<f64>,
    },

    /// A property model rejected the state of a node.
    #[error("property evaluation failed at step {step}, node {node}")]
    Domain {
        step: usize,
        node: usize,
        #[source]
        source: PropertyError,
    },
}
