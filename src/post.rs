//! Conversion of the raw model output into field and current waveforms.

use crate::constants::TESLA_TO_GAUSS;
use crate::fields::FieldCoupling;
use crate::math::{argmax_abs, max_abs, Scalar};
use crate::report::PlotSeries;
use crate::simulation::SimulationRun;

/// Seconds to milliseconds.
const MS_PER_S: Scalar = 1.0e3;

/// Field and current waveforms with their peak values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSummary {
    /// Sample times (ms).
    pub time_ms: Vec<Scalar>,
    /// Discharge-induced field, `-y(t)` (T).
    pub field_t: Vec<Scalar>,
    /// Coil current, `-y(t)/κ` (A).
    pub current_a: Vec<Scalar>,
    /// `max |y| · 10⁴` (G).
    pub peak_field_gauss: Scalar,
    /// Largest current magnitude (A).
    pub peak_current_a: Scalar,
    /// Time at which the field magnitude peaks (ms).
    pub peak_time_ms: Scalar,
}

impl ResultSummary {
    /// Builds the summary from a simulated run.
    #[must_use]
    pub fn from_run(run: &SimulationRun, coupling: &FieldCoupling) -> Self {
        Self::from_output(&run.times, &run.outputs, coupling)
    }

    /// Builds the summary from a time vector (s) and raw output series (T).
    #[must_use]
    pub fn from_output(times: &[Scalar], raw: &[Scalar], coupling: &FieldCoupling) -> Self {
        let field_t: Vec<Scalar> = raw.iter().map(|y| -y).collect();
        let current_a: Vec<Scalar> = field_t.iter().map(|b| coupling.current(*b)).collect();
        let peak_time_ms = argmax_abs(raw)
            .and_then(|idx| times.get(idx))
            .map_or(0.0, |t| t * MS_PER_S);

        Self {
            time_ms: times.iter().map(|t| t * MS_PER_S).collect(),
            peak_field_gauss: peak_field_gauss(raw),
            peak_current_a: max_abs(&current_a),
            peak_time_ms,
            field_t,
            current_a,
        }
    }

    /// The two series handed to the reporting collaborator: field, then current.
    #[must_use]
    pub fn plot_series(&self) -> [PlotSeries; 2] {
        [
            PlotSeries::new(
                "outputInitial",
                "Peak Magnetic Field Create in Through Coil",
                "Time [ms]",
                "Magnetic Field [T]",
                self.time_ms.clone(),
                self.field_t.clone(),
            ),
            PlotSeries::new(
                "outputNormalized",
                "Current Running Through Coil",
                "Time [ms]",
                "Current [A]",
                self.time_ms.clone(),
                self.current_a.clone(),
            ),
        ]
    }
}

/// Peak field magnitude in gauss for a raw output series in tesla.
#[must_use]
pub fn peak_field_gauss(raw: &[Scalar]) -> Scalar {
    max_abs(raw) * TESLA_TO_GAUSS
}
