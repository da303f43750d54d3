//! Solver configuration types.

use serde::{Deserialize, Serialize};

/// External solver library that should run the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    OrTools,
    Pulp,
    Cvxpy,
}

impl SolverBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverBackend::OrTools => "ortools",
            SolverBackend::Pulp => "pulp",
            SolverBackend::Cvxpy => "cvxpy",
        }
    }
}

impl std::str::FromStr for SolverBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "ortools" => Ok(SolverBackend::OrTools),
            "pulp" => Ok(SolverBackend::Pulp),
            "cvxpy" => Ok(SolverBackend::Cvxpy),
            other => Err(format!(
                "unknown solver backend '{other}' (expected ortools, pulp or cvxpy)"
            )),
        }
    }
}

impl std::fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration forwarded with every request.
///
/// `None` fields are omitted from the wire format and left to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<SolverBackend>,
    /// Time limit in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mip_gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presolve: Option<bool>,
}

impl SolverConfig {
    /// Create a configuration that leaves every setting to the backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend that should run the request.
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the relative MIP gap tolerance.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    /// Set the number of threads.
    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.backend.is_none()
            && self.time_limit.is_none()
            && self.mip_gap.is_none()
            && self.threads.is_none()
            && self.verbosity.is_none()
            && self.presolve.is_none()
    }

    /// Reject negative or non-finite numeric limits.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.time_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(format!("time_limit must be positive (got {limit})"));
            }
        }
        if let Some(gap) = self.mip_gap {
            if !gap.is_finite() || gap < 0.0 {
                return Err(format!("mip_gap must be non-negative (got {gap})"));
            }
        }
        Ok(())
    }
}
