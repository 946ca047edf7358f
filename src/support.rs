//! Supporting utilities used by models.
//!
//! These modules are public but unstable.

pub mod constraint;
pub mod hygro;
pub mod units;
