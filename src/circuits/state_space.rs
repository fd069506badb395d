use log::debug;

use crate::fields::FieldCoupling;
use crate::math::{R1x2, R2x2, Scalar, State2};

use super::rlc::SeriesRlc;

/// Continuous-time LTI model `ẋ = A·x + B·u`, `y = C·x + D·u`.
///
/// The state is `[capacitor voltage, loop current]`; the single output is the
/// centre field in tesla. The loop has no forcing input, so `B` and `D` are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSpace {
    /// State matrix.
    pub a: R2x2,
    /// Input matrix.
    pub b: State2,
    /// Output matrix.
    pub c: R1x2,
    /// Feedthrough.
    pub d: Scalar,
}

impl StateSpace {
    /// Assembles the discharge model of `rlc` observed through `coupling`.
    ///
    /// `dV/dt = I/C`, `dI/dt = -V/L - R·I/L`, `y = κ·I`.
    #[must_use]
    pub fn discharge(rlc: &SeriesRlc, coupling: &FieldCoupling) -> Self {
        let a = R2x2::new(
            0.0,
            1.0 / rlc.capacitance,
            -1.0 / rlc.inductance,
            -rlc.resistance / rlc.inductance,
        );
        let model = Self {
            a,
            b: State2::zeros(),
            c: R1x2::new(0.0, coupling.kappa),
            d: 0.0,
        };
        debug!("state matrix A = {:?}, output row C = {:?}", model.a, model.c);
        model
    }

    /// Output for state `x` with zero input.
    #[must_use]
    pub fn output(&self, x: &State2) -> Scalar {
        (self.c * x)[(0, 0)]
    }

    /// State transition matrix `exp(A·t)`.
    #[must_use]
    pub fn transition(&self, t: Scalar) -> R2x2 {
        (self.a * t).exp()
    }

    /// Zero-input output `C·exp(A·t)·x0` at a single instant.
    #[must_use]
    pub fn response_at(&self, t: Scalar, x0: &State2) -> Scalar {
        self.output(&(self.transition(t) * x0))
    }

    /// Largest eigenvalue magnitude of `A` (1/s), bounding the fastest time scale.
    #[must_use]
    pub fn spectral_radius(&self) -> Scalar {
        self.a
            .complex_eigenvalues()
            .iter()
            .fold(0.0, |acc: Scalar, ev| acc.max(ev.norm()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_model(r: Scalar) -> StateSpace {
        StateSpace::discharge(&SeriesRlc::new(r, 1.0, 1.0), &FieldCoupling::from_inverse_sum(1.0))
    }

    #[test]
    fn matrices_follow_series_rlc_equations() {
        let rlc = SeriesRlc::new(0.2, 2.0e-6, 1.0e-2);
        let coupling = FieldCoupling::from_inverse_sum(500.0);
        let m = StateSpace::discharge(&rlc, &coupling);
        assert_relative_eq!(m.a[(0, 0)], 0.0);
        assert_relative_eq!(m.a[(0, 1)], 100.0, max_relative = 1.0e-12);
        assert_relative_eq!(m.a[(1, 0)], -5.0e5, max_relative = 1.0e-12);
        assert_relative_eq!(m.a[(1, 1)], -1.0e5, max_relative = 1.0e-12);
        assert_eq!(m.b, State2::zeros());
        assert_relative_eq!(m.c[(0, 0)], 0.0);
        assert_relative_eq!(m.c[(0, 1)], coupling.kappa);
        assert_eq!(m.d, 0.0);
    }

    #[test]
    fn transition_at_zero_is_identity() {
        let m = unit_model(1.0);
        assert_relative_eq!(m.transition(0.0), R2x2::identity(), epsilon = 1.0e-14);
    }

    #[test]
    fn undamped_loop_oscillates_at_unit_frequency() {
        // R = 0, L = C = 1: V(t) = cos t, I(t) = -sin t
        let m = unit_model(0.0);
        let x0 = State2::new(1.0, 0.0);
        let kappa = m.c[(0, 1)];
        let t = std::f64::consts::FRAC_PI_2;
        assert_relative_eq!(m.response_at(t, &x0), -kappa, epsilon = 1.0e-9);
    }

    #[test]
    fn spectral_radius_matches_characteristic_roots() {
        let rlc = SeriesRlc::new(3.0, 1.0, 1.0);
        let m = StateSpace::discharge(&rlc, &FieldCoupling::from_inverse_sum(1.0));
        let expected = rlc
            .characteristic_roots()
            .iter()
            .fold(0.0, |acc: Scalar, r| acc.max(r.norm()));
        assert_relative_eq!(m.spectral_radius(), expected, max_relative = 1.0e-9);
    }
}
