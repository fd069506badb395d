//! Geometry-to-circuit parameter derivation for stacked planar square spirals.

use log::debug;

use crate::config::PhysicalInputs;
use crate::constants::{COPPER_RESISTIVITY_OHM_MM, MM_PER_M, VACUUM_PERMEABILITY, WHEELER_K1, WHEELER_K2};
use crate::math::Scalar;

/// Turn count, trace length and lumped parameters derived from [`PhysicalInputs`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    /// Continuous turn-count estimate.
    pub turn_estimate: Scalar,
    /// Whole turns available for the per-turn field sum.
    pub turns: usize,
    /// Mean of outer and inner diameter (mm).
    pub average_diameter_mm: Scalar,
    /// Fill ratio `(d_out - d_in) / (d_out + d_in)`.
    pub fill_ratio: Scalar,
    /// Trace length of one winding (mm).
    pub trace_length_mm: Scalar,
    /// Inductance of one winding (H).
    pub single_inductance_h: Scalar,
    /// Inductance of the series stack (H).
    pub inductance_h: Scalar,
    /// Trace resistance of one winding (Ω).
    pub single_resistance_ohm: Scalar,
    /// Series/parallel stack resistance including the switch (Ω).
    pub resistance_ohm: Scalar,
}

impl DerivedGeometry {
    /// Derives geometry and lumped parameters. Performs no validation; call
    /// [`PhysicalInputs::validate`] first.
    #[must_use]
    pub fn derive(inputs: &PhysicalInputs) -> Self {
        let d_out = inputs.outer_diameter_mm;
        let d_in = inputs.inner_diameter_mm;

        let turn_estimate = inputs.turn_estimate();
        let turns = if turn_estimate > 0.0 { turn_estimate.floor() as usize } else { 0 };

        let average_diameter_mm = (d_out + d_in) / 2.0;
        let fill_ratio = (d_out - d_in) / (d_out + d_in);
        let trace_length_mm = trace_length(average_diameter_mm, turn_estimate);

        let single_inductance_h = wheeler_inductance(turn_estimate, average_diameter_mm, fill_ratio);
        let series = Scalar::from(inputs.series_windings);
        let inductance_h = single_inductance_h * series * series;

        let single_resistance_ohm = trace_resistance(
            trace_length_mm,
            inputs.trace_width_mm,
            inputs.copper_thickness_mm,
        );
        let resistance_ohm = single_resistance_ohm * series / inputs.parallel_windings()
            + inputs.switch_resistance_ohm;

        let derived = Self {
            turn_estimate,
            turns,
            average_diameter_mm,
            fill_ratio,
            trace_length_mm,
            single_inductance_h,
            inductance_h,
            single_resistance_ohm,
            resistance_ohm,
        };
        debug!("derived coil geometry: {derived:?}");
        derived
    }
}

/// Length of `N + 1` square loops of side `average_diameter_mm`.
#[must_use]
pub fn trace_length(average_diameter_mm: Scalar, turn_estimate: Scalar) -> Scalar {
    4.0 * average_diameter_mm * (turn_estimate + 1.0)
}

/// Modified Wheeler inductance (H) of a square spiral with `turns` turns.
///
/// `L = K1·μ₀·N²·d_avg / (1 + K2·ρ)` with `d_avg` converted from mm to m.
#[must_use]
pub fn wheeler_inductance(turns: Scalar, average_diameter_mm: Scalar, fill_ratio: Scalar) -> Scalar {
    WHEELER_K1 * VACUUM_PERMEABILITY * turns * turns * average_diameter_mm
        / (1.0 + WHEELER_K2 * fill_ratio)
        / MM_PER_M
}

/// DC resistance (Ω) of a rectangular copper trace.
#[must_use]
pub fn trace_resistance(length_mm: Scalar, width_mm: Scalar, thickness_mm: Scalar) -> Scalar {
    COPPER_RESISTIVITY_OHM_MM * length_mm / (width_mm * thickness_mm)
}
