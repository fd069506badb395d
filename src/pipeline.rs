//! One-shot discharge experiment: validate, derive, build, solve, post-process.

use log::info;

use crate::circuits::{Damping, SeriesRlc, StateSpace};
use crate::config::CoilConfig;
use crate::constants::frequency_from_angular;
use crate::errors::{CoilSimError, Result};
use crate::fields::FieldCoupling;
use crate::geometry::DerivedGeometry;
use crate::post::ResultSummary;
use crate::report::{Diagnostics, ReportSink};
use crate::simulation::{InitialResponse, SimulationRun};

/// Everything computed for one configuration.
#[derive(Debug, Clone)]
pub struct CoilDischarge {
    /// Configuration the run was produced from.
    pub config: CoilConfig,
    /// Derived turn count, trace length and lumped parameters.
    pub geometry: DerivedGeometry,
    /// Lumped loop.
    pub rlc: SeriesRlc,
    /// Current-to-field coupling.
    pub coupling: FieldCoupling,
    /// State-space model that was simulated.
    pub model: StateSpace,
    /// Raw solver output.
    pub run: SimulationRun,
    /// Field and current waveforms.
    pub summary: ResultSummary,
}

impl CoilDischarge {
    /// Runs the full pipeline for `config`.
    pub fn simulate(config: &CoilConfig) -> Result<Self> {
        config.validate()?;
        let inputs = &config.coil;
        let settings = &config.simulation;

        let geometry = DerivedGeometry::derive(inputs);
        if !(geometry.inductance_h.is_finite() && geometry.inductance_h > 0.0) {
            return Err(CoilSimError::NonPhysical(format!(
                "derived inductance {} H must be finite and positive",
                geometry.inductance_h
            )));
        }
        if !geometry.resistance_ohm.is_finite() {
            return Err(CoilSimError::NonPhysical(format!(
                "derived resistance {} Ω is not finite",
                geometry.resistance_ohm
            )));
        }

        let rlc = SeriesRlc::new(geometry.resistance_ohm, geometry.inductance_h, inputs.capacitance_f);
        let coupling = FieldCoupling::new(inputs, &geometry);
        let model = StateSpace::discharge(&rlc, &coupling);
        info!(
            "discharge loop is {:?} (ζ = {:.4}, f₀ = {:.4} Hz, stored energy {:.3} J)",
            rlc.damping(),
            rlc.damping_ratio(),
            frequency_from_angular(rlc.natural_angular_frequency()),
            rlc.stored_energy(settings.initial_voltage, settings.initial_current)
        );

        let run = InitialResponse::new(settings.method).simulate(
            &model,
            settings.initial_state(),
            settings.horizon_s,
            settings.samples,
        )?;
        let summary = ResultSummary::from_run(&run, &coupling);

        let discharge = Self {
            config: *config,
            geometry,
            rlc,
            coupling,
            model,
            run,
            summary,
        };
        for line in discharge.diagnostics().to_string().lines() {
            info!("{line}");
        }
        Ok(discharge)
    }

    /// Scalar diagnostics for console reporting.
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            inverse_sum: self.coupling.inverse_sum,
            inductance_uh: self.geometry.inductance_h * 1.0e6,
            capacitance_uf: self.config.coil.capacitance_f * 1.0e6,
            resistance_ohm: self.geometry.resistance_ohm,
            single_resistance_ohm: self.geometry.single_resistance_ohm,
            turns: self.geometry.turns,
            trace_length_mm: self.geometry.trace_length_mm,
            peak_field_gauss: self.summary.peak_field_gauss,
        }
    }

    /// Damping regime of the loop.
    #[must_use]
    pub fn damping(&self) -> Damping {
        self.rlc.damping()
    }

    /// Hands the field and current series to `sink`.
    pub fn report<S: ReportSink>(&self, mut sink: S) -> Result<()> {
        for series in self.summary.plot_series() {
            sink.emit(&series)?;
        }
        Ok(())
    }
}
