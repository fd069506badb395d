//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Matrix1x2, Matrix2, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for characteristic roots and impedances.
pub type CScalar = num_complex::Complex<Scalar>;
/// Two-element state vector `[capacitor voltage, loop current]`.
pub type State2 = Vector2<Scalar>;
/// Two-by-two state matrix.
pub type R2x2 = Matrix2<Scalar>;
/// Single-output row matrix acting on a [`State2`].
pub type R1x2 = Matrix1x2<Scalar>;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Largest absolute value in `values`, or `0.0` for an empty slice.
#[must_use]
pub fn max_abs(values: &[Scalar]) -> Scalar {
    values.iter().fold(0.0, |acc: Scalar, v| acc.max(v.abs()))
}

/// Index of the sample with the largest absolute value.
#[must_use]
pub fn argmax_abs(values: &[Scalar]) -> Option<usize> {
    let mut best: Option<(usize, Scalar)> = None;
    for (idx, v) in values.iter().enumerate() {
        let a = v.abs();
        match best {
            Some((_, b)) if b >= a => {}
            _ => best = Some((idx, a)),
        }
    }
    best.map(|(idx, _)| idx)
}
