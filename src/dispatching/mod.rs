//! Dispatch policies for the simulation engine.
//!
//! Provides the pluggable decision function every scheduling discipline
//! implements, and the configuration surface for selecting one.
//!
//! # Usage
//!
//! ```
//! use schedsim::dispatching::{DispatchPolicy, PolicyKind};
//!
//! let policy = PolicyKind::RoundRobin { quantum: 4 }.build().unwrap();
//! assert_eq!(policy.name(), "RR");
//! ```
//!
//! # Contract
//!
//! The driver owns admission order and the clock; a policy only decides
//! *which* ready job runs next and *for how long*. Policies never invent
//! their own idle handling — when nothing is ready the driver idle-skips
//! to the next arrival before asking again.

pub mod policies;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::models::{Job, Time};
use crate::validation::{validate_quantum, ValidationError};

pub use policies::{Fcfs, RoundRobin, Sjf, Stcf};

/// Default Round-Robin quantum, in ticks.
pub const DEFAULT_QUANTUM: Time = 50;

/// A dispatch decision: which job runs next and for how long.
///
/// `length` may be less than the job's remaining work, which is how
/// preemptive disciplines express preemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// Index of the chosen job.
    pub job: usize,
    /// Ticks to run before re-evaluating (>= 1).
    pub length: Time,
}

/// A scheduling discipline's decision function.
///
/// The driver feeds admissions through [`admit`](DispatchPolicy::admit) in
/// ascending `(arrival, index)` order, asks for the next slice with
/// [`select_slice`](DispatchPolicy::select_slice), and hands back unfinished
/// jobs through [`requeue`](DispatchPolicy::requeue) *after* admitting any
/// jobs that arrived during the slice. Ties are broken by lower index in
/// every discipline, which keeps runs deterministic.
pub trait DispatchPolicy: Debug {
    /// Policy name (e.g. "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Accepts a newly admitted (`Ready`) job into the policy's candidate set.
    ///
    /// Called once per job, in ascending `(arrival, index)` order.
    fn admit(&mut self, job: &Job);

    /// Chooses the next job and slice length.
    ///
    /// `next_arrival` is the earliest arrival still outside the candidate
    /// set (strictly after `clock`), used by preemptive disciplines to bound
    /// the slice. Returns `None` when the candidate set is empty.
    fn select_slice(&mut self, jobs: &[Job], clock: Time, next_arrival: Option<Time>)
        -> Option<Slice>;

    /// Returns an unfinished job to the candidate set after a partial slice.
    ///
    /// Returns `true` if the interruption counts as a context switch
    /// (Round-Robin requeues do; STCF preemptions do not).
    fn requeue(&mut self, job: &Job) -> bool;
}

/// Discipline selection, the engine's configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First (non-preemptive).
    Sjf,
    /// Shortest-Time-to-Completion-First (preemptive at arrivals).
    Stcf,
    /// Round-Robin with a fixed quantum.
    RoundRobin {
        /// Maximum contiguous slice per dispatch, in ticks (>= 1).
        quantum: Time,
    },
}

impl PolicyKind {
    /// Instantiates the policy, validating its configuration.
    pub fn build(self) -> Result<Box<dyn DispatchPolicy>, Vec<ValidationError>> {
        match self {
            PolicyKind::Fcfs => Ok(Box::new(Fcfs::new())),
            PolicyKind::Sjf => Ok(Box::new(Sjf::new())),
            PolicyKind::Stcf => Ok(Box::new(Stcf::new())),
            PolicyKind::RoundRobin { quantum } => {
                validate_quantum(quantum)?;
                Ok(Box::new(RoundRobin::new(quantum)))
            }
        }
    }

    /// Policy name without instantiating it.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::Sjf => "SJF",
            PolicyKind::Stcf => "STCF",
            PolicyKind::RoundRobin { .. } => "RR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_build_all_kinds() {
        assert_eq!(PolicyKind::Fcfs.build().unwrap().name(), "FCFS");
        assert_eq!(PolicyKind::Sjf.build().unwrap().name(), "SJF");
        assert_eq!(PolicyKind::Stcf.build().unwrap().name(), "STCF");
        let rr = PolicyKind::RoundRobin {
            quantum: DEFAULT_QUANTUM,
        };
        assert_eq!(rr.build().unwrap().name(), "RR");
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let errors = PolicyKind::RoundRobin { quantum: 0 }.build().unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PolicyKind::Fcfs.name(), "FCFS");
        assert_eq!(PolicyKind::RoundRobin { quantum: 1 }.name(), "RR");
    }
}
