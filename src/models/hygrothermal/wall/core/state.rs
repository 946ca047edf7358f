//! Recorded field snapshots.

use uom::si::f64::Time;

/// Fields of every node after a step, in SI units.
///
/// Vectors are indexed by node and include the two ambient nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Steps completed; zero for the initial state.
    pub step: usize,
    /// Simulated time since the start of the run.
    pub time: Time,
    /// K.
    pub temperature: Vec<f64>,
    /// J/kg.
    pub potential: Vec<f64>,
    /// Pa.
    pub vapor_pressure: Vec<f64>,
    /// m³/m³; zero at ambient nodes.
    pub moisture_content: Vec<f64>,
    /// Fraction in `(0, 1]`.
    pub relative_humidity: Vec<f64>,
}

/// Every snapshot of a run, in step order.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub initial: Snapshot,
    /// One snapshot per completed step.
    pub steps: Vec<Snapshot>,
}

impl History {
    pub(crate) fn new(initial: Snapshot) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> &Snapshot {
        self.steps.last().unwrap_or(&self.initial)
    }

    /// All snapshots, starting with the initial state.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        std::iter::once(&self.initial).chain(&self.steps)
    }

    /// Number of completed steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step has completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
