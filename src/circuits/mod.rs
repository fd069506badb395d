//! Lumped series RLC discharge loop and its state-space form.

/// Series RLC parameters and damping analysis.
pub mod rlc;
/// Linear state-space model of the discharge loop.
pub mod state_space;

pub use rlc::{Damping, SeriesRlc};
pub use state_space::StateSpace;
