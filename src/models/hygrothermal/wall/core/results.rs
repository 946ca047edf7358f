//! Results of a completed wall simulation.

use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::hygro::dew_point::{DewPointError, dew_point};

use super::state::{History, Snapshot};

/// History of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub history: History,
}

/// Which wall surfaces are colder than the dew point of the adjacent air.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCondensation {
    pub low: bool,
    pub high: bool,
}

impl Results {
    /// Fields at the end of the run.
    #[must_use]
    pub fn final_state(&self) -> &Snapshot {
        self.history.latest()
    }

    /// Checks the outermost material nodes for condensation risk.
    ///
    /// A surface is at risk when its temperature is below the dew point of the
    /// ambient air it faces.
    ///
    /// # Errors
    ///
    /// Returns a [`DewPointError`] if an ambient vapor pressure has no dew
    /// point in the valid temperature range.
    pub fn surface_condensation(&self) -> Result<SurfaceCondensation, DewPointError> {
        let state = self.final_state();
        let last = state.temperature.len() - 1;

        let below_dew_point = |ambient: usize, surface: usize| {
            let dew = dew_point(Pressure::new::<pascal>(state.vapor_pressure[ambient]))?;
            Ok::<_, DewPointError>(
                ThermodynamicTemperature::new::<kelvin>(state.temperature[surface]) < dew,
            )
        };

        Ok(SurfaceCondensation {
            low: below_dew_point(0, 1)?,
            high: below_dew_point(last, last - 1)?,
        })
    }
}
