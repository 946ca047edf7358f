//! Edge-centred transport coefficients from node-centred values.

/// How a nodal property is combined across an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterfaceAveraging {
    /// Distance-weighted harmonic mean.
    ///
    /// Treats each half cell as a resistance in series:
    ///
    /// ```text
    /// v_edge = (dx₀ + dx₁) / (dx₀/v₀ + dx₁/v₁)
    /// ```
    ///
    /// Equals `2·v₀·v₁/(v₀ + v₁)` at equal spacing and is zero if either
    /// side is zero.
    #[default]
    Harmonic,

    /// Distance-weighted arithmetic mean, `(v₀·dx₀ + v₁·dx₁) / (dx₀ + dx₁)`.
    ///
    /// Reproduces results of models that combine interface values this way.
    DistanceWeighted,
}

impl InterfaceAveraging {
    /// Combines the values of two adjacent nodes with spacings `dx0`, `dx1`.
    #[must_use]
    pub fn edge_value(self, v0: f64, dx0: f64, v1: f64, dx1: f64) -> f64 {
        match self {
            Self::Harmonic => {
                let denominator = dx0 * v1 + dx1 * v0;
                if denominator == 0.0 {
                    0.0
                } else {
                    v0 * v1 * (dx0 + dx1) / denominator
                }
            }
            Self::DistanceWeighted => (v0 * dx0 + v1 * dx1) / (dx0 + dx1),
        }
    }

    /// Averages node values onto edges; returns one value per edge.
    ///
    /// `values` and `spacing` must have the same length.
    #[must_use]
    pub fn edges(self, values: &[f64], spacing: &[f64]) -> Vec<f64> {
        debug_assert_eq!(values.len(), spacing.len());
        values
            .windows(2)
            .zip(spacing.windows(2))
            .map(|(v, dx)| self.edge_value(v[0], dx[0], v[1], dx[1]))
            .collect()
    }
}
