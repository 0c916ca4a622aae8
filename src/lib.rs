//! Supply-chain flow planning over a small directed network.
//!
//! The crate formulates a multi-commodity network-flow linear program for a
//! fixed factory / distribution-center / warehouse topology and delegates the
//! actual solving to an external LP solver through [`good_lp`]. Two planning
//! modes are supported: a single transportation-cost objective, and a
//! lexicographic bi-objective mode that additionally minimizes road
//! construction cost among all transport-cost-optimal plans.

// Declarative topology & parameters
pub mod config;

// Error taxonomy
pub mod error;

// Graph & parameter loader
pub mod network;

// Model builder & objective policy
pub mod model;

// Solver integration
pub mod solve;

// Solved-flow reporting
pub mod report;

// Plain-text model audit dump
pub mod export;

// Run context: build -> export -> solve -> report
pub mod run;

// Logging setup
pub mod telemetry;

pub use config::Config;
pub use error::PlanError;
pub use run::{OptimizationRun, RunOutcome};
