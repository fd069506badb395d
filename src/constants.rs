//! Physical, material and empirical constants used by the coil model.
//!
//! ## Accuracy
//!
//! μ₀ is given to 12 significant figures (CODATA 2018). The empirical inductance
//! coefficients are calibration values for square planar spirals and are not
//! derived from first principles.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Mohan, Hershenson, Boyd & Lee (1999). Simple Accurate Expressions for Planar Spiral
//!   Inductances. IEEE JSSC 34(10). (modified Wheeler coefficients)

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: Scalar = 1.256_637_062_12e-6;

/// Resistivity of copper traces in ohm-millimeters (Ω·mm).
pub const COPPER_RESISTIVITY_OHM_MM: Scalar = 1.7e-5;

/// Modified Wheeler coefficient K1 for square spirals.
pub const WHEELER_K1: Scalar = 2.34;
/// Modified Wheeler coefficient K2 for square spirals.
pub const WHEELER_K2: Scalar = 2.75;

/// Thickness of one ounce of copper foil in millimeters.
pub const COPPER_OZ_THICKNESS_MM: Scalar = 0.0348;

/// Gauss per tesla.
pub const TESLA_TO_GAUSS: Scalar = 1.0e4;

/// Millimeters per meter.
pub const MM_PER_M: Scalar = 1.0e3;

/// Geometric prefactor of the on-axis field at the centre of a square loop,
/// `B = 8·√2·μ₀·I / (4π·a)` for side length `a`.
///
/// With the pre-2019 definition `μ₀ = 4π·10⁻⁷` this is exactly `8·√2·10⁻⁷`;
/// the CODATA μ₀ used here differs from that by about one part in 10¹⁰.
#[must_use]
pub fn square_loop_field_prefactor() -> Scalar {
    8.0 * Scalar::sqrt(2.0) * VACUUM_PERMEABILITY / (4.0 * PI)
}

/// Returns the linear frequency in hertz for an angular frequency `omega` (rad/s).
#[inline]
#[must_use]
pub fn frequency_from_angular(omega: Scalar) -> Scalar {
    omega / (2.0 * PI)
}
