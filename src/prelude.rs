//! Convenience re-exports for running coil discharge experiments.

pub use crate::circuits::{Damping, SeriesRlc, StateSpace};
pub use crate::config::{CoilConfig, PhysicalInputs, SimulationSettings};
pub use crate::constants::*;
pub use crate::errors::{CoilSimError, Result};
pub use crate::fields::{inverse_diameter_sum, FieldCoupling};
pub use crate::geometry::DerivedGeometry;
pub use crate::math::{linspace, Scalar, State2};
pub use crate::pipeline::CoilDischarge;
pub use crate::post::{peak_field_gauss, ResultSummary};
pub use crate::report::{CsvSink, Diagnostics, MemorySink, PlotSeries, ReportSink};
pub use crate::simulation::{
    write_state_csv, InitialResponse, SimulationError, SimulationRun, TransientMethod,
};
