//! Workload-wide performance metrics.
//!
//! Computes the two scalar averages reported for every run:
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Response | mean(first dispatch - arrival) |
//! | Avg Turnaround | mean(completion - arrival) |
//!
//! Simple arithmetic means over all jobs, no weighting.

use serde::{Deserialize, Serialize};

use crate::models::Job;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Aggregate performance of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Mean response time across all jobs (ticks).
    pub avg_response_time: f64,
    /// Mean turnaround time across all jobs (ticks).
    pub avg_turnaround_time: f64,
}

impl SimulationMetrics {
    /// Computes averages over a workload in terminal state.
    ///
    /// Errors with `EmptyWorkload` on an empty slice — never a silent
    /// division by zero.
    ///
    /// # Panics
    /// Panics if any job is not `Done`; aggregation before termination is
    /// engine drift, not an input problem.
    pub fn calculate(jobs: &[Job]) -> Result<Self, ValidationError> {
        if jobs.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyWorkload,
                "cannot aggregate metrics over an empty workload",
            ));
        }

        let mut total_response = 0u64;
        let mut total_turnaround = 0u64;
        for job in jobs {
            let response = job
                .response_time()
                .unwrap_or_else(|| panic!("job {} has no response time", job.index));
            let turnaround = job
                .turnaround_time()
                .unwrap_or_else(|| panic!("job {} has no turnaround time", job.index));
            total_response += response;
            total_turnaround += turnaround;
        }

        let count = jobs.len() as f64;
        Ok(Self {
            avg_response_time: total_response as f64 / count,
            avg_turnaround_time: total_turnaround as f64 / count,
        })
    }
}
