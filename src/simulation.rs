//! Zero-input transient response of the discharge model.

use std::io;
use std::io::Write;

use log::{debug, warn};

use crate::circuits::StateSpace;
use crate::math::{linspace, R2x2, Scalar, State2};

/// Step sizes beyond this fraction of the fastest time constant trigger a warning.
const COARSE_STEP_RATIO: Scalar = 0.5;

/// Allowed deviation of any grid step from the first one, relative to that step.
const GRID_UNIFORMITY_TOLERANCE: Scalar = 1.0e-6;

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised when the state or output stops being finite.
    #[error("non-finite response at sample {index} (t = {time:.6e} s)")]
    NonFinite {
        /// Sample index.
        index: usize,
        /// Sample time (s).
        time: Scalar,
    },
    /// Raised when the implicit step matrix cannot be inverted.
    #[error("trapezoidal step matrix is singular for dt = {0:.3e} s")]
    SingularStep(Scalar),
}

/// Integration schemes for the autonomous response.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransientMethod {
    /// Exact propagation with `exp(A·dt)` on a uniform grid.
    #[default]
    MatrixExponential,
    /// Second-order trapezoidal rule (A-stable, non-dissipative).
    Trapezoidal,
}

/// Sampled zero-input response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRun {
    /// Sample times (s).
    pub times: Vec<Scalar>,
    /// State `[V, I]` at each sample.
    pub states: Vec<State2>,
    /// Model output at each sample (T).
    pub outputs: Vec<Scalar>,
}

impl SimulationRun {
    /// Total captured samples.
    #[must_use]
    pub fn len(&self) -> usize { self.times.len() }

    /// True if no samples recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.times.is_empty() }

    /// Loop current at each sample (A).
    #[must_use]
    pub fn currents(&self) -> Vec<Scalar> {
        self.states.iter().map(|x| x[1]).collect()
    }
}

/// Solver for `x(t) = exp(A·t)·x0`, `y(t) = C·x(t)` on a uniform grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialResponse {
    method: TransientMethod,
}

impl InitialResponse {
    /// Creates a solver using `method`.
    #[must_use]
    pub fn new(method: TransientMethod) -> Self {
        Self { method }
    }

    /// Returns the configured method.
    #[must_use]
    pub fn method(&self) -> TransientMethod {
        self.method
    }

    /// Simulates `samples` points evenly spaced over `[0, horizon]`.
    pub fn simulate(
        &self,
        model: &StateSpace,
        x0: State2,
        horizon: Scalar,
        samples: usize,
    ) -> Result<SimulationRun, SimulationError> {
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(SimulationError::InvalidConfig(format!("horizon must be > 0, got {horizon}")));
        }
        if samples == 0 {
            return Err(SimulationError::InvalidConfig("at least one sample is required".into()));
        }
        self.simulate_on(model, x0, linspace(0.0, horizon, samples))
    }

    /// Simulates on a caller-provided grid.
    ///
    /// The grid must start at 0 (where `x0` applies) and be uniformly spaced;
    /// anything else is rejected with [`SimulationError::InvalidConfig`].
    pub fn simulate_on(
        &self,
        model: &StateSpace,
        x0: State2,
        times: Vec<Scalar>,
    ) -> Result<SimulationRun, SimulationError> {
        let dt = match times.as_slice() {
            [] => return Ok(SimulationRun::default()),
            [t0, ..] if *t0 != 0.0 => {
                return Err(SimulationError::InvalidConfig(format!(
                    "time grid must start at 0, got {t0}"
                )));
            }
            [_] => 0.0,
            [t0, t1, ..] => t1 - t0,
        };
        check_uniform(&times, dt)?;
        let step = self.step_matrix(model, dt)?;

        let rate = dt * model.spectral_radius();
        if rate > COARSE_STEP_RATIO {
            warn!(
                "time step {dt:.3e} s is coarse for the fastest mode (dt·|λ| = {rate:.2}); \
                 {:?} output may alias",
                self.method
            );
        }
        debug!("simulating {} samples with dt = {dt:.3e} s using {:?}", times.len(), self.method);

        let mut states = Vec::with_capacity(times.len());
        let mut outputs = Vec::with_capacity(times.len());
        let mut x = x0;
        for (index, &time) in times.iter().enumerate() {
            if index > 0 {
                x = step * x;
            }
            let y = model.output(&x);
            if !(x.iter().all(|v| v.is_finite()) && y.is_finite()) {
                return Err(SimulationError::NonFinite { index, time });
            }
            states.push(x);
            outputs.push(y);
        }

        Ok(SimulationRun { times, states, outputs })
    }

    fn step_matrix(&self, model: &StateSpace, dt: Scalar) -> Result<R2x2, SimulationError> {
        match self.method {
            TransientMethod::MatrixExponential => Ok(model.transition(dt)),
            TransientMethod::Trapezoidal => {
                let half = model.a * (0.5 * dt);
                let identity = R2x2::identity();
                let lhs = (identity - half)
                    .try_inverse()
                    .ok_or(SimulationError::SingularStep(dt))?;
                Ok(lhs * (identity + half))
            }
        }
    }
}

fn check_uniform(times: &[Scalar], dt: Scalar) -> Result<(), SimulationError> {
    if times.len() < 2 {
        return Ok(());
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimulationError::InvalidConfig(format!(
            "time grid must be strictly increasing, first step is {dt}"
        )));
    }
    for (index, pair) in times.windows(2).enumerate() {
        let step = pair[1] - pair[0];
        if (step - dt).abs() > GRID_UNIFORMITY_TOLERANCE * dt {
            return Err(SimulationError::InvalidConfig(format!(
                "time grid must be uniform: step {} is {step:.6e} s, expected {dt:.6e} s",
                index + 1
            )));
        }
    }
    Ok(())
}

/// Writes a CSV of the state trajectory (`time,voltage,current,output`).
pub fn write_state_csv<W: Write>(mut w: W, run: &SimulationRun) -> io::Result<()> {
    writeln!(w, "time,voltage,current,output")?;
    for ((time, x), y) in run.times.iter().zip(&run.states).zip(&run.outputs) {
        writeln!(w, "{:.16e},{:.16e},{:.16e},{:.16e}", time, x[0], x[1], y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::{Damping, SeriesRlc};
    use crate::fields::FieldCoupling;

    fn model(rlc: &SeriesRlc) -> StateSpace {
        StateSpace::discharge(rlc, &FieldCoupling::from_inverse_sum(1.0e3))
    }

    #[test]
    fn output_length_matches_time_grid() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.01, 1_000)
            .expect("simulate");
        assert_eq!(run.len(), 1_000);
        assert_eq!(run.outputs.len(), run.times.len());
        assert_eq!(run.states.len(), run.times.len());
        assert_eq!(run.times[0], 0.0);
        assert_relative_eq!(run.times[999], 0.01, epsilon = 1.0e-15);
    }

    #[test]
    fn single_sample_is_initial_output() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let m = model(&rlc);
        let x0 = State2::new(48.0, 3.0);
        let run = InitialResponse::default().simulate(&m, x0, 0.01, 1).expect("simulate");
        assert_eq!(run.len(), 1);
        assert_relative_eq!(run.outputs[0], m.output(&x0));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let m = model(&rlc);
        let solver = InitialResponse::default();
        let a = solver.simulate(&m, State2::new(48.0, 0.0), 0.01, 2_000).expect("first");
        let b = solver.simulate(&m, State2::new(48.0, 0.0), 0.01, 2_000).expect("second");
        assert_eq!(a, b);
    }

    #[test]
    fn matches_analytic_underdamped_current() {
        // I(t) = -(V0 / (ωd·L))·e^{-αt}·sin(ωd·t)
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        assert_eq!(rlc.damping(), Damping::Underdamped);
        let v0 = 48.0;
        let alpha = rlc.resistance / (2.0 * rlc.inductance);
        let wd = (1.0 / (rlc.inductance * rlc.capacitance) - alpha * alpha).sqrt();
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(v0, 0.0), 0.01, 5_001)
            .expect("simulate");
        for (t, i) in run.times.iter().zip(run.currents()).step_by(250) {
            let expected = -(v0 / (wd * rlc.inductance)) * (-alpha * t).exp() * (wd * t).sin();
            assert_relative_eq!(i, expected, epsilon = 1.0e-6, max_relative = 1.0e-6);
        }
    }

    #[test]
    fn trapezoidal_tracks_exponential_on_fine_grid() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let m = model(&rlc);
        let x0 = State2::new(48.0, 0.0);
        let exact = InitialResponse::new(TransientMethod::MatrixExponential)
            .simulate(&m, x0, 0.01, 20_001)
            .expect("exact");
        let trap = InitialResponse::new(TransientMethod::Trapezoidal)
            .simulate(&m, x0, 0.01, 20_001)
            .expect("trapezoidal");
        let peak = exact.outputs.iter().fold(0.0_f64, |acc, y| acc.max(y.abs()));
        for (a, b) in exact.outputs.iter().zip(&trap.outputs) {
            assert!((a - b).abs() <= 1.0e-4 * peak);
        }
    }

    #[test]
    fn overdamped_current_never_reverses() {
        let rlc = SeriesRlc::new(1.0, 1.0e-4, 1.0e-2);
        assert_eq!(rlc.damping(), Damping::Overdamped);
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.05, 5_000)
            .expect("simulate");
        assert!(run.currents().iter().all(|i| *i <= 0.0));
        let peak_idx = crate::math::argmax_abs(&run.outputs).expect("non-empty");
        let tail = &run.outputs[peak_idx..];
        assert!(tail.windows(2).all(|w| w[1].abs() <= w[0].abs() + 1.0e-15));
    }

    #[test]
    fn critically_damped_current_never_reverses() {
        // R = 2·√(L/C)
        let (l, c): (f64, f64) = (1.0e-4, 1.0e-2);
        let rlc = SeriesRlc::new(2.0 * (l / c).sqrt(), l, c);
        assert_eq!(rlc.damping(), Damping::CriticallyDamped);
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.02, 4_000)
            .expect("simulate");
        assert!(run.currents().iter().all(|i| *i <= 0.0));
        let peak_idx = crate::math::argmax_abs(&run.outputs).expect("non-empty");
        assert!(peak_idx > 0 && peak_idx < run.len() - 1);
        let tail = &run.outputs[peak_idx..];
        assert!(tail.windows(2).all(|w| w[1].abs() <= w[0].abs() + 1.0e-15));
    }

    #[test]
    fn rejects_grid_not_starting_at_zero() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let err = InitialResponse::default()
            .simulate_on(&model(&rlc), State2::new(48.0, 0.0), vec![1.0e-3, 2.0e-3])
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_non_uniform_grid() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let err = InitialResponse::default()
            .simulate_on(&model(&rlc), State2::new(48.0, 0.0), vec![0.0, 1.0e-4, 5.0e-3])
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn uniform_grid_matches_point_response() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let m = model(&rlc);
        let x0 = State2::new(48.0, 0.0);
        let times = linspace(0.0, 5.0e-3, 51);
        let run = InitialResponse::default()
            .simulate_on(&m, x0, times.clone())
            .expect("simulate");
        for (t, y) in times.iter().zip(&run.outputs) {
            assert_relative_eq!(*y, m.response_at(*t, &x0), epsilon = 1.0e-9, max_relative = 1.0e-9);
        }
    }

    #[test]
    fn underdamped_output_changes_sign_and_decays() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.02, 4_000)
            .expect("simulate");
        let has_positive = run.outputs.iter().any(|y| *y > 0.0);
        let has_negative = run.outputs.iter().any(|y| *y < 0.0);
        assert!(has_positive && has_negative);
        let half = run.len() / 2;
        let early = crate::math::max_abs(&run.outputs[..half]);
        let late = crate::math::max_abs(&run.outputs[half..]);
        assert!(late < early);
    }

    #[test]
    fn rejects_non_positive_horizon() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let err = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.0, 10)
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn reports_non_finite_state() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let err = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(Scalar::INFINITY, 0.0), 0.01, 10)
            .unwrap_err();
        assert!(matches!(err, SimulationError::NonFinite { index: 0, .. }));
    }

    #[test]
    fn state_csv_has_header_and_rows() {
        let rlc = SeriesRlc::new(0.15, 1.0e-4, 1.0e-2);
        let run = InitialResponse::default()
            .simulate(&model(&rlc), State2::new(48.0, 0.0), 0.01, 3)
            .expect("simulate");
        let mut buf = Vec::new();
        write_state_csv(&mut buf, &run).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("time,voltage,current,output"));
    }
}
