//! Request/response contract between model translation and external solvers.
//!
//! Solver engines (OR-Tools, PuLP, CVXPY) run out of process. This crate fixes
//! what is sent to them and what comes back.
//!
//! # Overview
//!
//! - [`SolverRequest`]: dense, JSON-serializable problem description
//! - [`SolverResponse`]: status and primal values returned by a backend
//! - [`SolverConfig`]: backend choice and tuning knobs
//! - [`SolverStatus`]: normalized status values
//! - [`SolverError`]: error types for solver operations
//! - [`Solve`]: trait implemented by backend adapters

mod config;
mod error;
mod request;
mod status;
mod traits;

pub use config::{SolverBackend, SolverConfig};
pub use error::SolverError;
pub use request::{ObjectiveSense, RowSpec, SolverRequest, SolverResponse, VariableSpec};
pub use status::SolverStatus;
pub use traits::Solve;
