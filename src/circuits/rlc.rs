use num_complex::Complex;

use crate::math::{CScalar, Scalar};

/// Relative tolerance used to classify a loop as critically damped.
const CRITICAL_TOLERANCE: Scalar = 1.0e-12;

/// Damping regime of a series RLC loop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    /// `R² < 4L/C`: decaying oscillation.
    Underdamped,
    /// `R² = 4L/C`: fastest non-oscillating decay.
    CriticallyDamped,
    /// `R² > 4L/C`: sum of two real exponentials.
    Overdamped,
}

/// Series resistor, inductor and capacitor closing a single loop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRlc {
    /// Loop resistance (Ω).
    pub resistance: Scalar,
    /// Loop inductance (H).
    pub inductance: Scalar,
    /// Capacitance (F).
    pub capacitance: Scalar,
}

impl SeriesRlc {
    /// Creates a series loop.
    #[must_use]
    pub const fn new(resistance: Scalar, inductance: Scalar, capacitance: Scalar) -> Self {
        Self {
            resistance,
            inductance,
            capacitance,
        }
    }

    /// Undamped natural angular frequency `1/√(LC)` (rad/s).
    #[must_use]
    pub fn natural_angular_frequency(&self) -> Scalar {
        1.0 / (self.inductance * self.capacitance).sqrt()
    }

    /// Damping ratio `ζ = (R/2)·√(C/L)`.
    #[must_use]
    pub fn damping_ratio(&self) -> Scalar {
        0.5 * self.resistance * (self.capacitance / self.inductance).sqrt()
    }

    /// Classifies the loop by comparing `R²` with `4L/C`.
    #[must_use]
    pub fn damping(&self) -> Damping {
        let r2 = self.resistance * self.resistance;
        let critical = 4.0 * self.inductance / self.capacitance;
        if (r2 - critical).abs() <= CRITICAL_TOLERANCE * critical {
            Damping::CriticallyDamped
        } else if r2 < critical {
            Damping::Underdamped
        } else {
            Damping::Overdamped
        }
    }

    /// Roots of `s² + (R/L)·s + 1/(LC) = 0`, which are the eigenvalues of the state matrix.
    #[must_use]
    pub fn characteristic_roots(&self) -> [CScalar; 2] {
        let alpha = self.resistance / (2.0 * self.inductance);
        let omega0_sq = 1.0 / (self.inductance * self.capacitance);
        let disc = alpha * alpha - omega0_sq;
        if disc >= 0.0 {
            let root = disc.sqrt();
            [Complex::new(-alpha + root, 0.0), Complex::new(-alpha - root, 0.0)]
        } else {
            let omega_d = (-disc).sqrt();
            [Complex::new(-alpha, omega_d), Complex::new(-alpha, -omega_d)]
        }
    }

    /// Impedance `R + j(ωL − 1/(ωC))` seen around the loop at `omega` (rad/s).
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> CScalar {
        if omega.abs() < Scalar::EPSILON {
            return Complex::new(self.resistance, Scalar::NEG_INFINITY);
        }
        let reactance = omega * self.inductance - 1.0 / (omega * self.capacitance);
        Complex::new(self.resistance, reactance)
    }

    /// Energy held in the capacitor and inductor for state `[V, I]` (J).
    #[must_use]
    pub fn stored_energy(&self, voltage: Scalar, current: Scalar) -> Scalar {
        0.5 * self.capacitance * voltage * voltage + 0.5 * self.inductance * current * current
    }
}
