use crate::config::PhysicalInputs;
use crate::constants::{square_loop_field_prefactor, MM_PER_M};
use crate::geometry::DerivedGeometry;
use crate::math::Scalar;

/// Linear map from loop current (A) to the centre field (T) of a nested square spiral.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCoupling {
    /// Sum of `n_series / a_i` over all turns, with `a_i` in meters (1/m).
    pub inverse_sum: Scalar,
    /// Tesla per ampere.
    pub kappa: Scalar,
}

impl FieldCoupling {
    /// Builds the coupling for the whole turns of `geometry`.
    #[must_use]
    pub fn new(inputs: &PhysicalInputs, geometry: &DerivedGeometry) -> Self {
        let inverse_sum = inverse_diameter_sum(
            inputs.outer_diameter_mm,
            inputs.pitch_mm(),
            geometry.turns,
            inputs.series_windings,
        );
        Self::from_inverse_sum(inverse_sum)
    }

    /// Wraps a precomputed inverse-diameter sum.
    #[must_use]
    pub fn from_inverse_sum(inverse_sum: Scalar) -> Self {
        Self {
            inverse_sum,
            kappa: square_loop_field_prefactor() * inverse_sum,
        }
    }

    /// Field (T) produced by `current` (A).
    #[must_use]
    pub fn field(&self, current: Scalar) -> Scalar {
        self.kappa * current
    }

    /// Current (A) that produces `field` (T).
    #[must_use]
    pub fn current(&self, field: Scalar) -> Scalar {
        field / self.kappa
    }
}

/// Sums `n_series / a_i` for square turns of side `a_i = d_out - 2·pitch·i`,
/// outermost (`i = 0`) to innermost (`i = turns - 1`). Sides are given in mm,
/// the result is in 1/m.
#[must_use]
pub fn inverse_diameter_sum(
    outer_diameter_mm: Scalar,
    pitch_mm: Scalar,
    turns: usize,
    series_windings: u32,
) -> Scalar {
    let series = Scalar::from(series_windings);
    let mut sum = 0.0;
    for i in 0..turns {
        let side_mm = outer_diameter_mm - 2.0 * pitch_mm * i as Scalar;
        sum += MM_PER_M * series / side_mm;
    }
    sum
}
