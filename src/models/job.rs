//! Job model.
//!
//! A job is a single-burst unit of CPU work: it arrives at a fixed time,
//! needs a fixed amount of processing, and runs in one or more slices
//! depending on the dispatch discipline.
//!
//! # Time Representation
//! All times are logical ticks (`Time`) relative to the simulation epoch
//! (t=0). The clock never maps to wall-clock time.

use serde::{Deserialize, Serialize};

/// Logical simulation time, in ticks.
pub type Time = u64;

/// Lifecycle state of a job.
///
/// `Running` exists only within a dispatch decision; between decisions a
/// job is always `New`, `Ready`, or `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Known to the workload but not yet arrived.
    New,
    /// Arrived and eligible for dispatch.
    Ready,
    /// All requested CPU time delivered.
    Done,
}

/// A unit of work in the simulated workload.
///
/// `index`, `arrival`, and `size` describe the job and never change once
/// the simulation starts; the remaining fields are derived by the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Stable identity: position in input order.
    pub index: usize,
    /// Tick at which the job becomes known to the system.
    pub arrival: Time,
    /// Total CPU time required (ticks, > 0).
    pub size: Time,
    /// Work still owed, in `[0, size]`. Zero exactly when `Done`.
    pub remaining: Time,
    /// Current lifecycle state.
    pub state: JobState,
    /// Clock value at first dispatch. Set once, defines response time.
    pub start_first: Option<Time>,
    /// Clock value when `remaining` reached zero. Set once.
    pub finish: Option<Time>,
    /// Times the job was preempted and requeued. Round-Robin only;
    /// always 0 under the other disciplines.
    pub context_switches: u32,
}

impl Job {
    /// Creates a job in its pre-simulation state.
    pub fn new(index: usize, arrival: Time, size: Time) -> Self {
        Self {
            index,
            arrival,
            size,
            remaining: size,
            state: JobState::New,
            start_first: None,
            finish: None,
            context_switches: 0,
        }
    }

    /// Whether the job has received all of its CPU time.
    pub fn is_done(&self) -> bool {
        self.state == JobState::Done
    }

    /// Delay between arrival and first dispatch. `None` until first dispatch.
    pub fn response_time(&self) -> Option<Time> {
        self.start_first.map(|s| s - self.arrival)
    }

    /// Delay between arrival and completion. `None` until `Done`.
    pub fn turnaround_time(&self) -> Option<Time> {
        self.finish.map(|f| f - self.arrival)
    }

    /// Resets the simulation-derived fields, keeping identity intact.
    pub fn reset(&mut self) {
        self.remaining = self.size;
        self.state = JobState::New;
        self.start_first = None;
        self.finish = None;
        self.context_switches = 0;
    }
}
