//! Explicit time integration of coupled heat and moisture transport.
//!
//! Each step evaluates material properties at the current state, averages
//! them onto edges, computes edge fluxes, and updates every material node
//! from its net inflow:
//!
//! ```text
//! T[i] += (q[i] − q[i−1]) · dt / (C[i] · dx[i])
//! μ[i] += (j[i] − j[i−1]) · dt / (Cμ[i] · dx[i])
//! ```
//!
//! Ambient nodes are never updated. A step is committed only after the new
//! state passes the divergence checks.

use std::ops::Range;

use uom::si::{
    available_energy::joule_per_kilogram, f64::Time, length::meter,
    thermodynamic_temperature::kelvin, time::second,
};

use crate::support::hygro::{
    PropertyError,
    material::{Material, MaterialLibrary, MaterialModel, MaterialProperties},
    vapor,
};

use super::{
    ConfigurationError, FieldQuantity, SimulationError,
    config::{InitialCondition, Scenario, SolverOptions, StabilityPolicy},
    flux::{EdgeConductivity, EdgeDifference, EdgeFlux, VaporFluxForm, edge_flux},
    mesh::{EdgeKind, Mesh, NodeKind},
    results::Results,
    series::{diff, edge_mean, node_balance},
    state::{History, Snapshot},
};

/// Largest stability number for which the explicit update does not oscillate.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Explicit-scheme stability numbers at the initial state.
///
/// Each is the largest `dt / (C·dx) · Σ g` over the material nodes, where
/// `g` are the conductances of the node's two edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StabilityEstimate {
    pub heat: f64,
    pub moisture: f64,
}

/// Observer response after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run after the current step.
    Stop,
}

/// Passed to the observer after every completed step.
#[derive(Debug)]
pub struct StepEvent<'a> {
    pub snapshot: &'a Snapshot,
    /// Steps left in the run.
    pub remaining: usize,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All steps of the scenario completed.
    Completed { steps: usize },
    /// The observer stopped the run after `step`.
    Stopped { step: usize },
}

/// Properties evaluated at every node for one step.
struct Evaluation {
    properties: Vec<MaterialProperties>,
    vapor_potential: Vec<f64>,
    vapor_temperature: Vec<f64>,
}

/// Marches a wall through a scenario.
///
/// The integrator owns the field state and the history of every step.
/// When a step fails, the state is left at the last completed step and the
/// history stays available.
#[derive(Debug, Clone)]
pub struct Integrator {
    mesh: Mesh,
    materials: Vec<Option<Material>>,
    options: SolverOptions,
    dt: f64,
    steps: usize,
    stability: StabilityEstimate,
    history: History,
}

impl Integrator {
    /// Prepares a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the time step is not finite, a
    /// node refers to a material missing from `library`, the initial state is
    /// invalid or has a vanishing capacity, or the time step is unstable under
    /// [`StabilityPolicy::Reject`].
    pub fn new(
        mesh: &Mesh,
        library: &MaterialLibrary,
        options: SolverOptions,
        scenario: &Scenario,
    ) -> Result<Self, ConfigurationError> {
        let dt = scenario.time_step.into_inner().get::<second>();
        if !dt.is_finite() {
            return Err(ConfigurationError::NonFiniteTimeStep { dt });
        }

        let materials = resolve_materials(mesh, library)?;
        let (temperature, potential) = initial_fields(mesh, &materials, scenario)?;
        let invalid_state =
            |(node, source): (usize, PropertyError)| ConfigurationError::InvalidInitialState {
                node,
                source,
            };
        let initial =
            snapshot(0, dt, &materials, temperature, potential).map_err(invalid_state)?;

        log::debug!(
            "wall mesh: {} nodes, {} m of material",
            mesh.node_count(),
            mesh.thickness().get::<meter>()
        );

        let mut integrator = Self {
            mesh: mesh.clone(),
            materials,
            options,
            dt,
            steps: scenario.steps,
            stability: StabilityEstimate::default(),
            history: History::new(initial),
        };

        let evaluation = integrator.evaluate().map_err(invalid_state)?;
        for (quantity, capacity) in capacities(&evaluation.properties) {
            if let Some(node) = integrator
                .interior()
                .find(|&node| capacity[node].is_nan() || capacity[node] <= options.min_capacity)
            {
                return Err(ConfigurationError::ZeroCapacity {
                    node,
                    quantity,
                    value: capacity[node],
                });
            }
        }

        integrator.stability = integrator
            .stability_estimate(&evaluation.properties)
            .map_err(invalid_state)?;
        integrator.check_stability()?;

        Ok(integrator)
    }

    /// Advances the state by one time step and records it.
    ///
    /// Steps may continue past the scenario's step count.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Domain`] if a property model rejects the
    /// current state, or [`SimulationError::NumericalDivergence`] if a
    /// capacity vanishes or the new state is non-finite or over-saturated.
    /// The state is unchanged on error.
    pub fn step(&mut self) -> Result<&Snapshot, SimulationError> {
        let step = self.history.len() + 1;
        let domain = |(node, source): (usize, PropertyError)| SimulationError::Domain {
            step,
            node,
            source,
        };

        let evaluation = self.evaluate().map_err(domain)?;
        for (quantity, capacity) in capacities(&evaluation.properties) {
            let min_capacity = self.options.min_capacity;
            self.check_field(step, quantity, &capacity, |c| c > min_capacity)?;
        }

        let fluxes = self.fluxes(&evaluation);
        let energy: Vec<f64> = fluxes.iter().map(EdgeFlux::energy).collect();
        let moisture: Vec<f64> = fluxes.iter().map(EdgeFlux::moisture).collect();
        let heat_balance = node_balance(&energy);
        let moisture_balance = node_balance(&moisture);

        let current = self.history.latest();
        let mut temperature = current.temperature.clone();
        let mut potential = current.potential.clone();
        let spacing = self.mesh.spacing();
        for node in self.interior() {
            let properties = &evaluation.properties[node];
            temperature[node] +=
                heat_balance[node] / (properties.heat_capacity / self.dt * spacing[node]);
            potential[node] +=
                moisture_balance[node] / (properties.moisture_capacity / self.dt * spacing[node]);
        }

        let tolerance = self.options.potential_tolerance;
        self.check_field(step, FieldQuantity::Temperature, &temperature, f64::is_finite)?;
        self.check_field(step, FieldQuantity::Potential, &potential, |p| {
            p.is_finite() && p <= tolerance
        })?;
        for node in self.interior() {
            potential[node] = potential[node].min(0.0);
        }

        let snapshot =
            snapshot(step, self.dt, &self.materials, temperature, potential).map_err(domain)?;
        log::trace!("completed step {step} of {}", self.steps);
        self.history.steps.push(snapshot);

        Ok(self.history.latest())
    }

    /// Runs the remaining steps of the scenario.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Integrator::step`].
    pub fn run(&mut self) -> Result<RunStatus, SimulationError> {
        self.run_observed(|_| None)
    }

    /// Runs the remaining steps, calling `observer` after each one.
    ///
    /// The run ends early if the observer returns [`Action::Stop`]; a later
    /// call resumes where it left off.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Integrator::step`].
    pub fn run_observed<F>(&mut self, mut observer: F) -> Result<RunStatus, SimulationError>
    where
        F: FnMut(&StepEvent<'_>) -> Option<Action>,
    {
        log::info!(
            "running wall simulation: {} nodes, steps {}..{}, dt = {} s",
            self.mesh.node_count(),
            self.history.len(),
            self.steps,
            self.dt
        );

        while self.history.len() < self.steps {
            let remaining = self.steps - self.history.len() - 1;
            let snapshot = self.step()?;
            let event = StepEvent {
                snapshot,
                remaining,
            };
            if let Some(Action::Stop) = observer(&event) {
                let step = event.snapshot.step;
                log::info!("wall simulation stopped after step {step}");
                return Ok(RunStatus::Stopped { step });
            }
        }

        log::info!("wall simulation completed {} steps", self.history.len());
        Ok(RunStatus::Completed {
            steps: self.history.len(),
        })
    }

    /// Snapshots recorded so far.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The current state.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        self.history.latest()
    }

    /// Stability numbers at the initial state.
    #[must_use]
    pub fn stability(&self) -> StabilityEstimate {
        self.stability
    }

    /// Time step length.
    #[must_use]
    pub fn time_step(&self) -> Time {
        Time::new::<second>(self.dt)
    }

    #[must_use]
    pub fn into_results(self) -> Results {
        Results {
            history: self.history,
        }
    }

    fn interior(&self) -> Range<usize> {
        self.mesh.interior()
    }

    fn evaluate(&self) -> Result<Evaluation, (usize, PropertyError)> {
        let state = self.history.latest();
        let n = self.mesh.node_count();
        let potential_form = self.options.vapor_flux == VaporFluxForm::Potential;

        let mut evaluation = Evaluation {
            properties: Vec::with_capacity(n),
            vapor_potential: Vec::with_capacity(n),
            vapor_temperature: Vec::with_capacity(n),
        };

        for (node, material) in self.materials.iter().enumerate() {
            let (t, p) = (state.temperature[node], state.potential[node]);
            let at = |source: PropertyError| (node, source);

            let properties = match material {
                Some(material) => material.properties(t, p).map_err(at)?,
                None => MaterialProperties::default(),
            };
            let (dp_dmu, dp_dt) = if potential_form && material.is_some() {
                (
                    vapor::vapor_pressure_potential_derivative(t, p).map_err(at)?,
                    vapor::vapor_pressure_temperature_derivative(t, p).map_err(at)?,
                )
            } else {
                (0.0, 0.0)
            };

            evaluation
                .vapor_potential
                .push(properties.vapor_conductivity * dp_dmu);
            evaluation
                .vapor_temperature
                .push(properties.vapor_conductivity * dp_dt);
            evaluation.properties.push(properties);
        }

        Ok(evaluation)
    }

    fn averaged(
        &self,
        properties: &[MaterialProperties],
        select: impl Fn(&MaterialProperties) -> f64,
    ) -> Vec<f64> {
        let values: Vec<f64> = properties.iter().map(select).collect();
        self.options.averaging.edges(&values, self.mesh.spacing())
    }

    fn fluxes(&self, evaluation: &Evaluation) -> Vec<EdgeFlux> {
        let state = self.history.latest();
        let spacing = self.mesh.spacing();
        let averaging = self.options.averaging;

        let heat = self.averaged(&evaluation.properties, |p| p.heat_conductivity);
        let vapor = self.averaged(&evaluation.properties, |p| p.vapor_conductivity);
        let liquid = self.averaged(&evaluation.properties, |p| p.liquid_conductivity);
        let vapor_potential = averaging.edges(&evaluation.vapor_potential, spacing);
        let vapor_temperature = averaging.edges(&evaluation.vapor_temperature, spacing);

        let d_temperature = diff(&state.temperature);
        let d_potential = diff(&state.potential);
        let d_vapor_pressure = diff(&state.vapor_pressure);
        let mean_temperature = edge_mean(&state.temperature);

        self.mesh
            .edges()
            .iter()
            .zip(self.mesh.edge_spacing())
            .enumerate()
            .map(|(e, (edge, &dx2))| {
                edge_flux(
                    edge,
                    dx2,
                    &EdgeConductivity {
                        heat: heat[e],
                        vapor: vapor[e],
                        liquid: liquid[e],
                        vapor_potential: vapor_potential[e],
                        vapor_temperature: vapor_temperature[e],
                    },
                    &EdgeDifference {
                        temperature: d_temperature[e],
                        potential: d_potential[e],
                        vapor_pressure: d_vapor_pressure[e],
                    },
                    mean_temperature[e],
                    self.options.vapor_flux,
                )
            })
            .collect()
    }

    fn stability_estimate(
        &self,
        properties: &[MaterialProperties],
    ) -> Result<StabilityEstimate, (usize, PropertyError)> {
        let state = self.history.latest();
        let spacing = self.mesh.spacing();
        let edge_spacing = self.mesh.edge_spacing();
        let edges = self.mesh.edges();

        let heat_edges = self.averaged(properties, |p| p.heat_conductivity);
        let vapor_edges = self.averaged(properties, |p| p.vapor_conductivity);
        let liquid_edges = self.averaged(properties, |p| p.liquid_conductivity);

        let mut estimate = StabilityEstimate::default();
        for node in self.interior() {
            let dp_dmu =
                vapor::vapor_pressure_potential_derivative(state.temperature[node], state.potential[node])
                    .map_err(|source| (node, source))?;

            let (mut heat, mut moisture) = (0.0, 0.0);
            for e in [node - 1, node] {
                match edges[e].kind {
                    EdgeKind::Surface(transfer) => {
                        heat += transfer.heat;
                        moisture += transfer.vapor * dp_dmu;
                    }
                    EdgeKind::Bulk => {
                        heat += heat_edges[e] / edge_spacing[e];
                        moisture += (liquid_edges[e] + vapor_edges[e] * dp_dmu) / edge_spacing[e];
                    }
                }
            }

            let node_properties = &properties[node];
            estimate.heat = estimate
                .heat
                .max(self.dt / (node_properties.heat_capacity * spacing[node]) * heat);
            estimate.moisture = estimate
                .moisture
                .max(self.dt / (node_properties.moisture_capacity * spacing[node]) * moisture);
        }

        Ok(estimate)
    }

    fn check_stability(&self) -> Result<(), ConfigurationError> {
        let StabilityEstimate { heat, moisture } = self.stability;
        log::debug!("stability numbers: heat {heat:.3e}, moisture {moisture:.3e}");

        for (quantity, number) in [
            (FieldQuantity::Temperature, heat),
            (FieldQuantity::Potential, moisture),
        ] {
            if number <= STABILITY_LIMIT {
                continue;
            }
            match self.options.stability {
                StabilityPolicy::Warn => log::warn!(
                    "explicit time step may be unstable for {quantity}: \
                     stability number {number:.3} exceeds {STABILITY_LIMIT}"
                ),
                StabilityPolicy::Reject => {
                    return Err(ConfigurationError::UnstableTimeStep {
                        quantity,
                        number,
                        limit: STABILITY_LIMIT,
                    });
                }
            }
        }
        Ok(())
    }

    /// Fails with the material nodes whose values do not satisfy `valid`.
    fn check_field(
        &self,
        step: usize,
        quantity: FieldQuantity,
        field: &[f64],
        valid: impl Fn(f64) -> bool,
    ) -> Result<(), SimulationError> {
        let (nodes, values): (Vec<usize>, Vec<f64>) = self
            .interior()
            .filter(|&node| !valid(field[node]))
            .map(|node| (node, field[node]))
            .unzip();

        if nodes.is_empty() {
            return Ok(());
        }

        log::warn!("numerical divergence at step {step}: {quantity} at nodes {nodes:?}");
        Err(SimulationError::NumericalDivergence {
            step,
            quantity,
            nodes,
            values,
        })
    }
}

fn capacities(properties: &[MaterialProperties]) -> [(FieldQuantity, Vec<f64>); 2] {
    [
        (
            FieldQuantity::HeatCapacity,
            properties.iter().map(|p| p.heat_capacity).collect(),
        ),
        (
            FieldQuantity::MoistureCapacity,
            properties.iter().map(|p| p.moisture_capacity).collect(),
        ),
    ]
}

fn resolve_materials(
    mesh: &Mesh,
    library: &MaterialLibrary,
) -> Result<Vec<Option<Material>>, ConfigurationError> {
    mesh.nodes()
        .iter()
        .enumerate()
        .map(|(node, kind)| match kind {
            NodeKind::Ambient => Ok(None),
            NodeKind::Material(id) => library
                .get(*id)
                .map(|material| Some(material.clone()))
                .map_err(|_| ConfigurationError::UnknownMaterial { node, id: *id }),
        })
        .collect()
}

fn initial_fields(
    mesh: &Mesh,
    materials: &[Option<Material>],
    scenario: &Scenario,
) -> Result<(Vec<f64>, Vec<f64>), ConfigurationError> {
    let n = mesh.node_count();

    let (mut temperature, mut potential) = match &scenario.initial {
        InitialCondition::Uniform(state) => {
            let (t, p) = state.si();
            (vec![t; n], vec![p; n])
        }
        InitialCondition::UniformMoistureContent {
            temperature,
            moisture_content,
        } => {
            let t = temperature.get::<kelvin>();
            let mut potential = vec![0.0; n];
            for (node, material) in materials.iter().enumerate() {
                if let Some(material) = material {
                    potential[node] = material
                        .potential_from_moisture_content(t, *moisture_content)
                        .map_err(|source| ConfigurationError::InvalidInitialState { node, source })?;
                }
            }
            (vec![t; n], potential)
        }
        InitialCondition::Profile {
            temperature,
            potential,
        } => {
            for (what, actual) in [
                ("initial temperature profile", temperature.len()),
                ("initial potential profile", potential.len()),
            ] {
                if actual != n {
                    return Err(ConfigurationError::LengthMismatch {
                        what,
                        expected: n,
                        actual,
                    });
                }
            }
            (
                temperature.iter().map(|t| t.get::<kelvin>()).collect(),
                potential
                    .iter()
                    .map(|p| p.get::<joule_per_kilogram>())
                    .collect(),
            )
        }
    };

    for (node, boundary) in [(0, &scenario.boundaries.low), (n - 1, &scenario.boundaries.high)] {
        (temperature[node], potential[node]) = boundary.si();
    }

    Ok((temperature, potential))
}

/// Derives the reported fields from temperature and potential.
fn snapshot(
    step: usize,
    dt: f64,
    materials: &[Option<Material>],
    temperature: Vec<f64>,
    potential: Vec<f64>,
) -> Result<Snapshot, (usize, PropertyError)> {
    let n = temperature.len();
    let mut vapor_pressure = Vec::with_capacity(n);
    let mut relative_humidity = Vec::with_capacity(n);
    let mut moisture_content = Vec::with_capacity(n);

    for (node, material) in materials.iter().enumerate() {
        let (t, p) = (temperature[node], potential[node]);
        let at = |source: PropertyError| (node, source);

        let rh = vapor::relative_humidity(t, p).map_err(at)?;
        vapor_pressure.push(rh * vapor::saturation_vapor_pressure(t).map_err(at)?);
        relative_humidity.push(rh);
        moisture_content.push(match material {
            Some(material) => material.moisture_content(t, p).map_err(at)?,
            None => 0.0,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let time = Time::new::<second>(step as f64 * dt);

    Ok(Snapshot {
        step,
        time,
        temperature,
        potential,
        vapor_pressure,
        moisture_content,
        relative_humidity,
    })
}
