#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical, material and empirical constants.
pub mod constants;
/// Shared numerical primitives (scalars, 2×2 state algebra, grids).
pub mod math;
/// Run configuration and input validation.
pub mod config;
/// Geometry-to-circuit parameter derivation.
pub mod geometry;
/// Current-to-field coupling of the nested turns.
pub mod fields;
/// Series RLC loop and its state-space model.
pub mod circuits;
/// Zero-input transient solver.
pub mod simulation;
/// Field/current waveforms and peak extraction.
pub mod post;
/// Reporting collaborator contract and diagnostics.
pub mod report;
/// End-to-end discharge experiment.
pub mod pipeline;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
