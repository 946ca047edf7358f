//! One-dimensional finite-volume mesh of a layered wall.
//!
//! A mesh of `n` nodes has `n − 1` edges; edge `i` joins nodes `i` and
//! `i + 1`. The first and last nodes stand for the ambient air on either
//! side of the wall and are joined to the wall by surface edges.

use std::ops::Range;

use uom::si::{f64::Length, length::meter};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    hygro::material::MaterialId,
};

use super::{ConfigurationError, flux::SurfaceTransfer};

/// What a mesh node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Ambient air with externally prescribed conditions.
    Ambient,
    /// A control volume of the given material.
    Material(MaterialId),
}

/// How transport across an edge is modelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeKind {
    /// Exchange with air through surface transfer coefficients.
    Surface(SurfaceTransfer),
    /// Conduction and diffusion through material.
    Bulk,
}

/// An edge between two adjacent nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    /// Direction cosine of the edge normal with the vertical.
    ///
    /// Zero for horizontal transport; gravity acts on liquid otherwise.
    pub nx: f64,
}

impl Edge {
    #[must_use]
    pub fn bulk() -> Self {
        Self {
            kind: EdgeKind::Bulk,
            nx: 0.0,
        }
    }

    #[must_use]
    pub fn surface(transfer: SurfaceTransfer) -> Self {
        Self {
            kind: EdgeKind::Surface(transfer),
            nx: 0.0,
        }
    }
}

/// A homogeneous layer of a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub thickness: Length,
    /// Number of equal control volumes across the layer.
    pub cells: usize,
    pub material: MaterialId,
}

/// Validated wall discretization.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    spacing: Vec<f64>,
    nodes: Vec<NodeKind>,
    edges: Vec<Edge>,
    edge_spacing: Vec<f64>,
}

impl Mesh {
    /// Creates a mesh from per-node spacing and kinds and per-edge settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if:
    /// - there are fewer than 3 nodes, or the lengths disagree;
    /// - a spacing is not positive and finite;
    /// - an outer node is not [`NodeKind::Ambient`] or an inner node is not a material;
    /// - an outer edge is not a surface edge (so no bulk edge touches air);
    /// - a surface coefficient is negative or a direction cosine is outside `[-1, 1]`.
    pub fn new(
        spacing: &[Length],
        nodes: Vec<NodeKind>,
        edges: Vec<Edge>,
    ) -> Result<Self, ConfigurationError> {
        let n = nodes.len();
        if n < 3 {
            return Err(ConfigurationError::TooFewNodes { nodes: n });
        }
        if spacing.len() != n {
            return Err(ConfigurationError::LengthMismatch {
                what: "spacing",
                expected: n,
                actual: spacing.len(),
            });
        }
        if edges.len() != n - 1 {
            return Err(ConfigurationError::LengthMismatch {
                what: "edges",
                expected: n - 1,
                actual: edges.len(),
            });
        }

        let spacing: Vec<f64> = spacing.iter().map(|dx| dx.get::<meter>()).collect();
        if let Some((node, &value)) = spacing
            .iter()
            .enumerate()
            .find(|(_, dx)| !dx.is_finite() || StrictlyPositive::check(*dx).is_err())
        {
            return Err(ConfigurationError::NonPositiveSpacing { node, value });
        }

        for (node, kind) in nodes.iter().enumerate() {
            let boundary = node == 0 || node == n - 1;
            match (boundary, kind) {
                (true, NodeKind::Material(_)) => {
                    return Err(ConfigurationError::BoundaryNotAmbient { node });
                }
                (false, NodeKind::Ambient) => {
                    return Err(ConfigurationError::InteriorNotMaterial { node });
                }
                _ => {}
            }
        }

        for (index, edge) in edges.iter().enumerate() {
            match edge.kind {
                EdgeKind::Bulk if index == 0 || index == n - 2 => {
                    return Err(ConfigurationError::OuterEdgeNotSurface { edge: index });
                }
                EdgeKind::Surface(transfer) if !transfer.is_valid() => {
                    return Err(ConfigurationError::InvalidSurfaceTransfer { edge: index });
                }
                _ => {}
            }
            if !(-1.0..=1.0).contains(&edge.nx) {
                return Err(ConfigurationError::InvalidInclination {
                    edge: index,
                    nx: edge.nx,
                });
            }
        }

        let edge_spacing = spacing
            .windows(2)
            .map(|dx| 0.5 * (dx[0] + dx[1]))
            .collect();

        Ok(Self {
            spacing,
            nodes,
            edges,
            edge_spacing,
        })
    }

    /// Creates a single-material wall of `cells` equal control volumes.
    ///
    /// # Errors
    ///
    /// See [`Mesh::new`].
    pub fn uniform(
        cells: usize,
        spacing: Length,
        material: MaterialId,
        surfaces: [SurfaceTransfer; 2],
    ) -> Result<Self, ConfigurationError> {
        let n = cells + 2;
        let mut nodes = vec![NodeKind::Material(material); n];
        nodes[0] = NodeKind::Ambient;
        nodes[n - 1] = NodeKind::Ambient;

        Self::new(&vec![spacing; n], nodes, outer_edges(n, surfaces))
    }

    /// Creates a wall from layers listed from the low side to the high side.
    ///
    /// Each layer is split into equal cells. Ambient nodes take the spacing of
    /// the material node next to them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyLayer`] for a layer without cells,
    /// or any error of [`Mesh::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use twine_hygrothermal::models::hygrothermal::wall::{Layer, Mesh, SurfaceTransfer};
    /// use twine_hygrothermal::support::hygro::material::MaterialId;
    /// use uom::si::{f64::Length, length::centimeter};
    ///
    /// let mesh = Mesh::layered(
    ///     &[
    ///         Layer { thickness: Length::new::<centimeter>(1.5), cells: 3, material: MaterialId(1) },
    ///         Layer { thickness: Length::new::<centimeter>(20.0), cells: 10, material: MaterialId(30) },
    ///     ],
    ///     [SurfaceTransfer::default(); 2],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(mesh.node_count(), 15);
    /// ```
    pub fn layered(
        layers: &[Layer],
        surfaces: [SurfaceTransfer; 2],
    ) -> Result<Self, ConfigurationError> {
        let mut spacing = Vec::new();
        let mut nodes = Vec::new();
        for (index, layer) in layers.iter().enumerate() {
            if layer.cells == 0 {
                return Err(ConfigurationError::EmptyLayer { layer: index });
            }
            #[allow(clippy::cast_precision_loss)]
            let dx = layer.thickness / layer.cells as f64;
            spacing.extend(std::iter::repeat_n(dx, layer.cells));
            nodes.extend(std::iter::repeat_n(
                NodeKind::Material(layer.material),
                layer.cells,
            ));
        }

        let (Some(&first), Some(&last)) = (spacing.first(), spacing.last()) else {
            return Err(ConfigurationError::TooFewNodes { nodes: 2 });
        };
        spacing.insert(0, first);
        spacing.push(last);
        nodes.insert(0, NodeKind::Ambient);
        nodes.push(NodeKind::Ambient);

        let n = nodes.len();
        Self::new(&spacing, nodes, outer_edges(n, surfaces))
    }

    /// Returns the mesh with every bulk edge tilted to direction cosine `nx`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidInclination`] for the first bulk
    /// edge if `nx` is outside `[-1, 1]`.
    pub fn with_inclination(mut self, nx: f64) -> Result<Self, ConfigurationError> {
        let bulk = self
            .edges
            .iter_mut()
            .enumerate()
            .filter(|(_, edge)| edge.kind == EdgeKind::Bulk);
        for (index, edge) in bulk {
            if !(-1.0..=1.0).contains(&nx) {
                return Err(ConfigurationError::InvalidInclination { edge: index, nx });
            }
            edge.nx = nx;
        }
        Ok(self)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Indices of the nodes updated by the integrator.
    #[must_use]
    pub fn interior(&self) -> Range<usize> {
        1..self.nodes.len() - 1
    }

    /// Control volume width of each node, m.
    #[must_use]
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Centre-to-centre distance across each edge, m.
    #[must_use]
    pub fn edge_spacing(&self) -> &[f64] {
        &self.edge_spacing
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeKind] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total width of the material nodes.
    #[must_use]
    pub fn thickness(&self) -> Length {
        Length::new::<meter>(self.spacing[self.interior()].iter().sum())
    }
}

fn outer_edges(nodes: usize, [low, high]: [SurfaceTransfer; 2]) -> Vec<Edge> {
    let mut edges = vec![Edge::bulk(); nodes.saturating_sub(1)];
    if let Some(first) = edges.first_mut() {
        *first = Edge::surface(low);
    }
    if let Some(last) = edges.last_mut() {
        *last = Edge::surface(high);
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::centimeter;

    fn surfaces() -> [SurfaceTransfer; 2] {
        [SurfaceTransfer::default(); 2]
    }

    #[test]
    fn uniform_mesh_layout() {
        let mesh = Mesh::uniform(
            19,
            Length::new::<meter>(0.1),
            MaterialId(30),
            surfaces(),
        )
        .unwrap();

        assert_eq!(mesh.node_count(), 21);
        assert_eq!(mesh.edges().len(), 20);
        assert_eq!(mesh.interior(), 1..20);
        assert_eq!(mesh.nodes()[0], NodeKind::Ambient);
        assert_eq!(mesh.nodes()[10], NodeKind::Material(MaterialId(30)));
        assert!(matches!(mesh.edges()[0].kind, EdgeKind::Surface(_)));
        assert!(matches!(mesh.edges()[19].kind, EdgeKind::Surface(_)));
        assert!(mesh.edges()[1..19].iter().all(|e| e.kind == EdgeKind::Bulk));
        assert!(mesh.edge_spacing().iter().all(|&dx2| dx2 == 0.1));
        assert_relative_eq!(mesh.thickness().get::<meter>(), 1.9, max_relative = 1e-12);
    }

    #[test]
    fn layered_mesh_spacing() {
        let mesh = Mesh::layered(
            &[
                Layer {
                    thickness: Length::new::<centimeter>(2.0),
                    cells: 2,
                    material: MaterialId(1),
                },
                Layer {
                    thickness: Length::new::<centimeter>(12.0),
                    cells: 3,
                    material: MaterialId(30),
                },
            ],
            surfaces(),
        )
        .unwrap();

        let spacing = mesh.spacing();
        assert_eq!(spacing.len(), 7);
        assert_relative_eq!(spacing[0], 0.01, max_relative = 1e-12);
        assert_relative_eq!(spacing[3], 0.04, max_relative = 1e-12);
        assert_relative_eq!(spacing[6], 0.04, max_relative = 1e-12);
        assert_relative_eq!(mesh.edge_spacing()[2], 0.025, max_relative = 1e-12);
        assert_eq!(mesh.nodes()[2], NodeKind::Material(MaterialId(1)));
        assert_eq!(mesh.nodes()[3], NodeKind::Material(MaterialId(30)));
    }

    #[test]
    fn rejects_invalid_layouts() {
        let dx = Length::new::<meter>(0.1);
        let material = NodeKind::Material(MaterialId(1));
        let surface = Edge::surface(SurfaceTransfer::default());

        assert_eq!(
            Mesh::new(&[dx; 2], vec![NodeKind::Ambient; 2], vec![surface]),
            Err(ConfigurationError::TooFewNodes { nodes: 2 })
        );
        assert_eq!(
            Mesh::new(
                &[dx; 3],
                vec![NodeKind::Ambient, material, NodeKind::Ambient],
                vec![surface]
            ),
            Err(ConfigurationError::LengthMismatch {
                what: "edges",
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Mesh::new(
                &[dx, Length::new::<meter>(0.0), dx],
                vec![NodeKind::Ambient, material, NodeKind::Ambient],
                vec![surface; 2]
            ),
            Err(ConfigurationError::NonPositiveSpacing {
                node: 1,
                value: 0.0
            })
        );
        assert_eq!(
            Mesh::new(&[dx; 3], vec![material; 3], vec![surface; 2]),
            Err(ConfigurationError::BoundaryNotAmbient { node: 0 })
        );
        assert_eq!(
            Mesh::new(&[dx; 3], vec![NodeKind::Ambient; 3], vec![surface; 2]),
            Err(ConfigurationError::InteriorNotMaterial { node: 1 })
        );
        assert_eq!(
            Mesh::new(
                &[dx; 3],
                vec![NodeKind::Ambient, material, NodeKind::Ambient],
                vec![surface, Edge::bulk()]
            ),
            Err(ConfigurationError::OuterEdgeNotSurface { edge: 1 })
        );

        let leaky = Edge::surface(SurfaceTransfer {
            heat: -1.0,
            vapor: 2.0e-8,
        });
        assert_eq!(
            Mesh::new(
                &[dx; 3],
                vec![NodeKind::Ambient, material, NodeKind::Ambient],
                vec![leaky, surface]
            ),
            Err(ConfigurationError::InvalidSurfaceTransfer { edge: 0 })
        );
    }

    #[test]
    fn inclination_applies_to_bulk_edges() {
        let mesh = Mesh::uniform(3, Length::new::<meter>(0.1), MaterialId(1), surfaces())
            .unwrap()
            .with_inclination(1.0)
            .unwrap();
        assert_eq!(mesh.edges()[0].nx, 0.0);
        assert_eq!(mesh.edges()[1].nx, 1.0);

        assert_eq!(
            mesh.with_inclination(1.5),
            Err(ConfigurationError::InvalidInclination { edge: 1, nx: 1.5 })
        );
    }

    #[test]
    fn rejects_empty_layers() {
        assert_eq!(
            Mesh::layered(
                &[Layer {
                    thickness: Length::new::<meter>(0.1),
                    cells: 0,
                    material: MaterialId(1),
                }],
                surfaces(),
            ),
            Err(ConfigurationError::EmptyLayer { layer: 0 })
        );
        assert_eq!(
            Mesh::layered(&[], surfaces()),
            Err(ConfigurationError::TooFewNodes { nodes: 2 })
        );
    }
}
