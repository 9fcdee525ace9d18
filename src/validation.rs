//! Input validation for simulation runs.
//!
//! Checks workload and configuration integrity before the clock starts.
//! Detects:
//! - Empty workloads
//! - Invalid jobs (zero size)
//! - Invalid Round-Robin quantum
//!
//! All checks run at the input boundary; nothing is rejected mid-run.

use std::fmt;

use crate::models::Job;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No jobs were supplied; the simulation cannot run.
    EmptyWorkload,
    /// A job description is unusable (non-positive size).
    InvalidJob,
    /// Round-Robin was configured with a quantum of zero.
    InvalidQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a workload before simulation.
///
/// Checks:
/// 1. The workload is non-empty.
/// 2. Every job has a positive size.
/// 3. Every job's `index` matches its position (jobs are addressed by
///    position throughout the engine).
///
/// Arrival times are unconstrained beyond the type (non-negative by
/// construction) and may be out of input order; the engine sorts admissions
/// itself.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();

    if jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "workload contains no jobs",
        ));
    }

    for (position, job) in jobs.iter().enumerate() {
        if job.size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!("job {} has zero size", job.index),
            ));
        }
        if job.index != position {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!("job index {} does not match position {}", job.index, position),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a Round-Robin quantum.
pub fn validate_quantum(quantum: crate::models::Time) -> ValidationResult {
    if quantum == 0 {
        Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Round-Robin quantum must be at least 1 tick",
        )])
    } else {
        Ok(())
    }
}
