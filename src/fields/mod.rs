//! Magnetic field coupling between coil current and the field at the coil centre.

mod magnetic;

pub use magnetic::{inverse_diameter_sum, FieldCoupling};
