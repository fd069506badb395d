//! Run configuration: coil geometry, electrical inputs and solver settings.
//!
//! Defaults reproduce the reference ten-board coil discharged from a 10 mF bank
//! charged to 48 V.

use crate::constants::COPPER_OZ_THICKNESS_MM;
use crate::errors::{CoilSimError, Result};
use crate::math::{Scalar, State2};
use crate::simulation::TransientMethod;

/// Physical inputs describing the coil stack and its discharge circuit.
///
/// Geometry is in millimeters, resistance in ohms, capacitance in farads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalInputs {
    /// Total copper thickness of a trace (mm).
    pub copper_thickness_mm: Scalar,
    /// Trace width (mm).
    pub trace_width_mm: Scalar,
    /// Gap between adjacent traces (mm).
    pub trace_spacing_mm: Scalar,
    /// Number of windings connected in series.
    pub series_windings: u32,
    /// Capacitor bank capacitance (F).
    pub capacitance_f: Scalar,
    /// On-resistance of the discharge switch (Ω).
    pub switch_resistance_ohm: Scalar,
    /// Number of stacked boards.
    pub pcb_count: u32,
    /// Outer coil diameter (mm).
    pub outer_diameter_mm: Scalar,
    /// Inner coil diameter (mm).
    pub inner_diameter_mm: Scalar,
}

impl Default for PhysicalInputs {
    fn default() -> Self {
        Self {
            copper_thickness_mm: 2.0 * COPPER_OZ_THICKNESS_MM,
            trace_width_mm: 1.75,
            trace_spacing_mm: 0.25,
            series_windings: 2,
            capacitance_f: 10.0e-3,
            switch_resistance_ohm: 0.01,
            pcb_count: 10,
            outer_diameter_mm: 100.0,
            inner_diameter_mm: 20.0,
        }
    }
}

impl PhysicalInputs {
    /// Trace pitch `w + s` (mm).
    #[must_use]
    pub fn pitch_mm(&self) -> Scalar {
        self.trace_width_mm + self.trace_spacing_mm
    }

    /// Number of parallel winding groups formed by the board stack.
    ///
    /// Every board carries `series_windings` windings in series, so the stack
    /// resolves to `pcb_count` parallel paths.
    #[must_use]
    pub fn parallel_windings(&self) -> Scalar {
        let series = Scalar::from(self.series_windings);
        Scalar::from(self.pcb_count) * series / series
    }

    /// Continuous turn-count estimate `(d_out - d_in) / (2·(w + s))`.
    #[must_use]
    pub fn turn_estimate(&self) -> Scalar {
        (self.outer_diameter_mm - self.inner_diameter_mm) / (2.0 * self.pitch_mm())
    }

    /// Checks every input against its physical range.
    pub fn validate(&self) -> Result<()> {
        positive("copper_thickness_mm", self.copper_thickness_mm)?;
        positive("trace_width_mm", self.trace_width_mm)?;
        positive("capacitance_f", self.capacitance_f)?;
        positive("outer_diameter_mm", self.outer_diameter_mm)?;
        positive("inner_diameter_mm", self.inner_diameter_mm)?;
        non_negative("trace_spacing_mm", self.trace_spacing_mm)?;
        non_negative("switch_resistance_ohm", self.switch_resistance_ohm)?;

        if self.series_windings == 0 {
            return Err(CoilSimError::invalid("series_windings", "must be at least 1"));
        }
        if self.pcb_count == 0 {
            return Err(CoilSimError::invalid("pcb_count", "must be at least 1"));
        }
        if self.outer_diameter_mm <= self.inner_diameter_mm {
            return Err(CoilSimError::invalid(
                "outer_diameter_mm",
                format!(
                    "outer diameter {} mm must exceed inner diameter {} mm",
                    self.outer_diameter_mm, self.inner_diameter_mm
                ),
            ));
        }

        let turns = self.turn_estimate();
        if turns < 1.0 {
            return Err(CoilSimError::invalid(
                "trace_width_mm",
                format!(
                    "pitch {} mm leaves room for {turns:.3} turns; at least one is required",
                    self.pitch_mm()
                ),
            ));
        }
        Ok(())
    }
}

/// Time grid and initial conditions for the discharge transient.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    /// End of the simulated window (s); the grid starts at 0.
    pub horizon_s: Scalar,
    /// Number of samples on the grid, including both end points.
    pub samples: usize,
    /// Initial capacitor voltage (V).
    pub initial_voltage: Scalar,
    /// Initial loop current (A).
    pub initial_current: Scalar,
    /// Integration scheme.
    pub method: TransientMethod,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            horizon_s: 0.01,
            samples: 100_000,
            initial_voltage: 48.0,
            initial_current: 0.0,
            method: TransientMethod::MatrixExponential,
        }
    }
}

impl SimulationSettings {
    /// Initial state vector `[V0, I0]`.
    #[must_use]
    pub fn initial_state(&self) -> State2 {
        State2::new(self.initial_voltage, self.initial_current)
    }

    /// Checks the time grid and initial state.
    pub fn validate(&self) -> Result<()> {
        positive("horizon_s", self.horizon_s)?;
        if self.samples == 0 {
            return Err(CoilSimError::invalid("samples", "must be at least 1"));
        }
        if !self.initial_voltage.is_finite() {
            return Err(CoilSimError::invalid("initial_voltage", "must be finite"));
        }
        if !self.initial_current.is_finite() {
            return Err(CoilSimError::invalid("initial_current", "must be finite"));
        }
        Ok(())
    }
}

/// Complete configuration for one simulation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoilConfig {
    /// Coil and circuit inputs.
    pub coil: PhysicalInputs,
    /// Solver settings.
    pub simulation: SimulationSettings,
}

impl CoilConfig {
    /// Replaces the coil inputs.
    #[must_use]
    pub fn with_coil(mut self, coil: PhysicalInputs) -> Self {
        self.coil = coil;
        self
    }

    /// Replaces the solver settings.
    #[must_use]
    pub fn with_simulation(mut self, simulation: SimulationSettings) -> Self {
        self.simulation = simulation;
        self
    }

    /// Overrides the number of series windings.
    #[must_use]
    pub fn with_series_windings(mut self, n: u32) -> Self {
        self.coil.series_windings = n;
        self
    }

    /// Overrides the time grid.
    #[must_use]
    pub fn with_time_grid(mut self, horizon_s: Scalar, samples: usize) -> Self {
        self.simulation.horizon_s = horizon_s;
        self.simulation.samples = samples;
        self
    }

    /// Overrides the integration scheme.
    #[must_use]
    pub fn with_method(mut self, method: TransientMethod) -> Self {
        self.simulation.method = method;
        self
    }

    /// Validates coil and solver settings.
    pub fn validate(&self) -> Result<()> {
        self.coil.validate()?;
        self.simulation.validate()
    }

    /// Parses a JSON configuration; absent fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a JSON configuration from `reader`.
    #[cfg(feature = "serde")]
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

fn positive(parameter: &'static str, value: Scalar) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoilSimError::invalid(parameter, format!("must be finite and > 0, got {value}")))
    }
}

fn non_negative(parameter: &'static str, value: Scalar) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoilSimError::invalid(parameter, format!("must be finite and >= 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CoilConfig::default().validate().expect("reference config");
    }

    #[test]
    fn parallel_windings_equal_board_count() {
        let coil = PhysicalInputs::default();
        assert_eq!(coil.parallel_windings(), 10.0);
    }

    #[test]
    fn rejects_inverted_diameters() {
        let coil = PhysicalInputs {
            outer_diameter_mm: 20.0,
            inner_diameter_mm: 100.0,
            ..PhysicalInputs::default()
        };
        let err = coil.validate().unwrap_err();
        assert!(matches!(
            err,
            CoilSimError::InvalidInput { parameter: "outer_diameter_mm", .. }
        ));
    }

    #[test]
    fn rejects_too_coarse_pitch() {
        let coil = PhysicalInputs {
            trace_width_mm: 45.0,
            ..PhysicalInputs::default()
        };
        assert!(coil.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_capacitance() {
        let coil = PhysicalInputs {
            capacitance_f: 0.0,
            ..PhysicalInputs::default()
        };
        let err = coil.validate().unwrap_err();
        assert!(err.to_string().contains("capacitance_f"));
    }

    #[test]
    fn rejects_empty_time_grid() {
        let cfg = CoilConfig::default().with_time_grid(0.01, 0);
        assert!(cfg.validate().is_err());
        let cfg = CoilConfig::default().with_time_grid(-1.0, 10);
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_overrides_keep_defaults() {
        let cfg = CoilConfig::from_json_str(r#"{"coil": {"series_windings": 3}}"#)
            .expect("partial config");
        assert_eq!(cfg.coil.series_windings, 3);
        assert_eq!(cfg.coil.pcb_count, 10);
        assert_eq!(cfg.simulation.samples, 100_000);
    }
}
