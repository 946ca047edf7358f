//! # Twine Hygrothermal
//!
//! Coupled heat and moisture transport models for porous building
//! materials, built for [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Material, moisture, and unit utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful
//! on their own (retention curves, vapor pressure, dew points), but their APIs
//! are not stable. Breaking changes may occur as needed.
//!
//! Solver internals start in a model's `core` module and only move to
//! [`support`] once another model needs them.

pub mod models;
pub mod support;
