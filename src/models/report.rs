//! Per-job outcome records and the full simulation report.

use serde::{Deserialize, Serialize};

use super::{Job, JobState, Time};
use crate::dispatching::PolicyKind;
use crate::engine::SimulationMetrics;

/// Flattened result row for one completed job.
///
/// This is the engine's output contract: everything a report adapter needs,
/// in input-index order, with the derived times already computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Position in input order.
    pub index: usize,
    /// Arrival tick.
    pub arrival: Time,
    /// Requested CPU time.
    pub size: Time,
    /// First-dispatch tick.
    pub start_first: Time,
    /// Completion tick.
    pub finish: Time,
    /// `start_first - arrival`.
    pub response_time: Time,
    /// `finish - arrival`.
    pub turnaround_time: Time,
    /// Terminal state. Always `Done` for a completed run.
    pub final_state: JobState,
    /// Preempt-and-requeue count (Round-Robin; 0 elsewhere).
    pub context_switches: u32,
}

impl JobOutcome {
    /// Builds the outcome row for a terminal job.
    ///
    /// # Panics
    /// Panics if the job is not `Done` — callers only read outcomes after
    /// the driver has terminated, so anything else is engine drift.
    pub fn from_job(job: &Job) -> Self {
        assert!(job.is_done(), "outcome requested for unfinished job {}", job.index);
        let start_first = job
            .start_first
            .unwrap_or_else(|| panic!("done job {} never dispatched", job.index));
        let finish = job
            .finish
            .unwrap_or_else(|| panic!("done job {} has no finish time", job.index));
        Self {
            index: job.index,
            arrival: job.arrival,
            size: job.size,
            start_first,
            finish,
            response_time: start_first - job.arrival,
            turnaround_time: finish - job.arrival,
            final_state: job.state,
            context_switches: job.context_switches,
        }
    }
}

/// Complete result of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// The discipline that produced this report.
    pub policy: PolicyKind,
    /// One outcome per job, in input-index order.
    pub outcomes: Vec<JobOutcome>,
    /// Workload-wide averages.
    pub metrics: SimulationMetrics,
}

impl SimulationReport {
    /// Number of jobs in the run.
    pub fn job_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Looks up the outcome for a job by its input index.
    pub fn outcome(&self, index: usize) -> Option<&JobOutcome> {
        self.outcomes.iter().find(|o| o.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_done_job() {
        let mut job = Job::new(2, 10, 5);
        job.remaining = 0;
        job.state = JobState::Done;
        job.start_first = Some(12);
        job.finish = Some(17);

        let outcome = JobOutcome::from_job(&job);
        assert_eq!(outcome.index, 2);
        assert_eq!(outcome.response_time, 2);
        assert_eq!(outcome.turnaround_time, 7);
        assert_eq!(outcome.final_state, JobState::Done);
        assert_eq!(outcome.context_switches, 0);
    }

    #[test]
    #[should_panic(expected = "unfinished job")]
    fn test_outcome_rejects_unfinished_job() {
        let job = Job::new(0, 0, 5);
        JobOutcome::from_job(&job);
    }

    #[test]
    fn test_outcome_serializes() {
        let mut job = Job::new(0, 0, 5);
        job.remaining = 0;
        job.state = JobState::Done;
        job.start_first = Some(0);
        job.finish = Some(5);

        let json = serde_json::to_string(&JobOutcome::from_job(&job)).unwrap();
        assert!(json.contains("\"turnaround_time\":5"));
    }
}
