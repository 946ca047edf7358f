//! Extensions to [`uom`] for hygrothermal quantities.
//!
//! This crate uses [`uom`] for physical inputs at its public boundary
//! (temperatures, lengths, times, pressures).
//! Moisture chemical potential has no dedicated `uom` quantity, but it is an
//! energy per unit mass of water, so it shares the dimension of
//! [`AvailableEnergy`](uom::si::f64::AvailableEnergy):
//!
//! ```
//! use twine_hygrothermal::support::units::ChemicalPotential;
//! use uom::si::available_energy::joule_per_kilogram;
//!
//! let potential = ChemicalPotential::new::<joule_per_kilogram>(-1000.0);
//! assert_eq!(potential.get::<joule_per_kilogram>(), -1000.0);
//! ```

/// Moisture chemical potential, J/kg in SI.
///
/// Zero is free water; drier states are negative.
pub type ChemicalPotential = uom::si::f64::AvailableEnergy;
