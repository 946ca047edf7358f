//! Shared fixtures for wall model tests.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Length, ThermodynamicTemperature, Time},
    length::meter,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    hygro::material::{MaterialId, MaterialLibrary, Sandstone, SimpleMaterial},
    units::ChemicalPotential,
};

use super::{Boundaries, HygroState, InitialCondition, Mesh, Scenario, SurfaceTransfer};

pub(crate) const SANDSTONE: MaterialId = MaterialId(30);
pub(crate) const PLASTER: MaterialId = MaterialId(1);

pub(crate) fn state(temperature: f64, potential: f64) -> HygroState {
    HygroState::new(
        ThermodynamicTemperature::new::<kelvin>(temperature),
        ChemicalPotential::new::<joule_per_kilogram>(potential),
    )
}

pub(crate) fn time_step(seconds: f64) -> Constrained<Time, StrictlyPositive> {
    Constrained::new(Time::new::<second>(seconds)).expect("positive time step")
}

pub(crate) fn library() -> MaterialLibrary {
    MaterialLibrary::new()
        .with(SANDSTONE, Sandstone::bentheimer())
        .with(
            PLASTER,
            SimpleMaterial::new(0.7, 1.4e6, 1.0e-3, 1.0e-10, 1.0e-11).expect("valid plaster"),
        )
}

/// 21 nodes: 19 sandstone cells of 0.1 m between two ambient nodes.
pub(crate) fn reference_mesh() -> Mesh {
    Mesh::uniform(
        19,
        Length::new::<meter>(0.1),
        SANDSTONE,
        [SurfaceTransfer::default(); 2],
    )
    .expect("valid mesh")
}

/// Wall at 283.15 K and −1000 J/kg, warmed and wetted from the high side.
pub(crate) fn reference_scenario(steps: usize) -> Scenario {
    Scenario {
        initial: InitialCondition::Uniform(state(283.15, -1000.0)),
        boundaries: Boundaries {
            low: state(283.15, -1000.0),
            high: state(285.15, -900.0),
        },
        time_step: time_step(1000.0),
        steps,
    }
}
