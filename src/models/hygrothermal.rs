//! Hygrothermal models.
//!
//! Models of combined heat and moisture transport through building
//! envelopes.

pub mod wall;
