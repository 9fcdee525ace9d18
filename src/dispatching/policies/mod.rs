//! Built-in scheduling disciplines.
//!
//! # Disciplines
//!
//! - **Non-preemptive**: FCFS, SJF — a selected job runs to completion.
//! - **Preemptive**: STCF (re-evaluated at every arrival), Round-Robin
//!   (fixed quantum, FIFO requeue).
//!
//! # Tie-break Convention
//! Whenever two jobs are equal under a discipline's primary key, the lower
//! index wins. SJF/STCF encode this by keying their heaps on
//! `(key, index)` tuples; FCFS and Round-Robin inherit it from the driver's
//! `(arrival, index)` admission order.
//!
//! # Reference
//! Arpaci-Dusseau & Arpaci-Dusseau, "Operating Systems: Three Easy Pieces",
//! Ch. 7: Scheduling

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use super::{DispatchPolicy, Slice};
use crate::models::{Job, Time};

// ======================== Non-preemptive ========================

/// First-Come-First-Served.
///
/// Runs ready jobs in arrival order, each to completion. The candidate
/// queue is a plain FIFO: the driver admits in ascending `(arrival, index)`
/// order, so front-of-queue is exactly the earliest arrival.
#[derive(Debug, Default)]
pub struct Fcfs {
    queue: VecDeque<usize>,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn admit(&mut self, job: &Job) {
        self.queue.push_back(job.index);
    }

    fn select_slice(
        &mut self,
        jobs: &[Job],
        _clock: Time,
        _next_arrival: Option<Time>,
    ) -> Option<Slice> {
        let index = self.queue.pop_front()?;
        Some(Slice {
            job: index,
            length: jobs[index].remaining,
        })
    }

    fn requeue(&mut self, job: &Job) -> bool {
        unreachable!("FCFS never preempts (job {})", job.index)
    }
}

/// Shortest-Job-First (non-preemptive).
///
/// Picks the ready job with the smallest total size and runs it to
/// completion, even if a shorter job arrives mid-run. Selection is a
/// min-heap keyed `(size, index)`; keys are immutable, so entries are
/// never stale.
#[derive(Debug, Default)]
pub struct Sjf {
    heap: BinaryHeap<Reverse<(Time, usize)>>,
}

impl Sjf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn admit(&mut self, job: &Job) {
        self.heap.push(Reverse((job.size, job.index)));
    }

    fn select_slice(
        &mut self,
        jobs: &[Job],
        _clock: Time,
        _next_arrival: Option<Time>,
    ) -> Option<Slice> {
        let Reverse((_, index)) = self.heap.pop()?;
        Some(Slice {
            job: index,
            length: jobs[index].remaining,
        })
    }

    fn requeue(&mut self, job: &Job) -> bool {
        unreachable!("SJF never preempts (job {})", job.index)
    }
}

// ======================== Preemptive ========================

/// Shortest-Time-to-Completion-First.
///
/// Picks the ready job with the least remaining work and runs it until it
/// finishes or the next arrival, whichever is sooner. The driver re-admits
/// arrivals landing exactly on the new clock value before the next
/// selection, so a same-tick arrival is always in the heap when it should
/// preempt.
///
/// The heap is keyed `(remaining, index)`. An entry is popped before its
/// job runs and a preempted job is reinserted with its updated remaining,
/// so the heap never holds a stale key.
#[derive(Debug, Default)]
pub struct Stcf {
    heap: BinaryHeap<Reverse<(Time, usize)>>,
}

impl Stcf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Stcf {
    fn name(&self) -> &'static str {
        "STCF"
    }

    fn admit(&mut self, job: &Job) {
        self.heap.push(Reverse((job.remaining, job.index)));
    }

    fn select_slice(
        &mut self,
        jobs: &[Job],
        clock: Time,
        next_arrival: Option<Time>,
    ) -> Option<Slice> {
        let Reverse((_, index)) = self.heap.pop()?;
        let remaining = jobs[index].remaining;

        // All arrivals at or before `clock` are admitted already, so any
        // future arrival is strictly ahead of the clock.
        let length = match next_arrival {
            Some(at) => {
                debug_assert!(at > clock, "unadmitted arrival at {at} behind clock {clock}");
                remaining.min(at - clock)
            }
            None => remaining,
        };

        Some(Slice { job: index, length })
    }

    fn requeue(&mut self, job: &Job) -> bool {
        self.heap.push(Reverse((job.remaining, job.index)));
        false // preemptions at arrivals are not counted as context switches
    }
}

/// Round-Robin with a fixed quantum.
///
/// Runs the front of a FIFO queue for at most one quantum, then requeues it
/// at the back. Jobs arriving during a quantum are admitted (and enqueued)
/// before the preempted job is requeued, so they take their turn first.
///
/// A requeue counts as a context switch only when another job is waiting;
/// a quantum expiring with an empty queue just continues the same job.
#[derive(Debug)]
pub struct RoundRobin {
    queue: VecDeque<usize>,
    quantum: Time,
}

impl RoundRobin {
    /// Creates the policy. The quantum must already be validated (>= 1).
    pub fn new(quantum: Time) -> Self {
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }

    /// Configured quantum, in ticks.
    pub fn quantum(&self) -> Time {
        self.quantum
    }
}

impl DispatchPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn admit(&mut self, job: &Job) {
        self.queue.push_back(job.index);
    }

    fn select_slice(
        &mut self,
        jobs: &[Job],
        _clock: Time,
        _next_arrival: Option<Time>,
    ) -> Option<Slice> {
        let index = self.queue.pop_front()?;
        Some(Slice {
            job: index,
            length: jobs[index].remaining.min(self.quantum),
        })
    }

    fn requeue(&mut self, job: &Job) -> bool {
        let switched_away = !self.queue.is_empty();
        self.queue.push_back(job.index);
        switched_away
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobState;

    fn make_jobs(specs: &[(Time, Time)]) -> Vec<Job> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, size))| {
                let mut job = Job::new(i, arrival, size);
                job.state = JobState::Ready;
                job
            })
            .collect()
    }

    fn admit_all(policy: &mut dyn DispatchPolicy, jobs: &[Job]) {
        // Driver admission order: ascending (arrival, index).
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by_key(|&i| (jobs[i].arrival, i));
        for i in order {
            policy.admit(&jobs[i]);
        }
    }

    #[test]
    fn test_fcfs_arrival_order() {
        let jobs = make_jobs(&[(5, 10), (0, 10), (3, 10)]);
        let mut policy = Fcfs::new();
        admit_all(&mut policy, &jobs);

        assert_eq!(policy.select_slice(&jobs, 5, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 15, None).unwrap().job, 2);
        assert_eq!(policy.select_slice(&jobs, 25, None).unwrap().job, 0);
        assert!(policy.select_slice(&jobs, 35, None).is_none());
    }

    #[test]
    fn test_fcfs_full_slice() {
        let jobs = make_jobs(&[(0, 42)]);
        let mut policy = Fcfs::new();
        admit_all(&mut policy, &jobs);

        let slice = policy.select_slice(&jobs, 0, Some(10)).unwrap();
        // Non-preemptive: future arrivals do not bound the slice.
        assert_eq!(slice.length, 42);
    }

    #[test]
    fn test_sjf_smallest_size() {
        let jobs = make_jobs(&[(0, 30), (0, 10), (0, 20)]);
        let mut policy = Sjf::new();
        admit_all(&mut policy, &jobs);

        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 2);
        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 0);
    }

    #[test]
    fn test_sjf_tie_breaks_by_index() {
        let jobs = make_jobs(&[(0, 10), (0, 10), (0, 10)]);
        let mut policy = Sjf::new();
        admit_all(&mut policy, &jobs);

        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 0);
        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 2);
    }

    #[test]
    fn test_stcf_bounds_slice_by_next_arrival() {
        let jobs = make_jobs(&[(0, 10)]);
        let mut policy = Stcf::new();
        admit_all(&mut policy, &jobs);

        let slice = policy.select_slice(&jobs, 0, Some(3)).unwrap();
        assert_eq!(slice.job, 0);
        assert_eq!(slice.length, 3);
    }

    #[test]
    fn test_stcf_runs_to_completion_without_arrivals() {
        let jobs = make_jobs(&[(0, 10)]);
        let mut policy = Stcf::new();
        admit_all(&mut policy, &jobs);

        let slice = policy.select_slice(&jobs, 0, None).unwrap();
        assert_eq!(slice.length, 10);
    }

    #[test]
    fn test_stcf_prefers_least_remaining_after_requeue() {
        let mut jobs = make_jobs(&[(0, 10), (0, 8)]);
        let mut policy = Stcf::new();
        // Job 1 admitted with remaining 8, runs 6, requeued with remaining 2.
        policy.admit(&jobs[0]);
        jobs[1].remaining = 2;
        assert!(!policy.requeue(&jobs[1]));

        assert_eq!(policy.select_slice(&jobs, 6, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 8, None).unwrap().job, 0);
    }

    #[test]
    fn test_rr_quantum_caps_slice() {
        let jobs = make_jobs(&[(0, 10), (0, 2)]);
        let mut policy = RoundRobin::new(4);
        admit_all(&mut policy, &jobs);

        assert_eq!(
            policy.select_slice(&jobs, 0, None).unwrap(),
            Slice { job: 0, length: 4 }
        );
        // Shorter than the quantum: slice is the full remaining work.
        assert_eq!(
            policy.select_slice(&jobs, 4, None).unwrap(),
            Slice { job: 1, length: 2 }
        );
    }

    #[test]
    fn test_rr_requeue_goes_to_back_and_counts() {
        let jobs = make_jobs(&[(0, 10), (0, 10)]);
        let mut policy = RoundRobin::new(4);
        admit_all(&mut policy, &jobs);

        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 0);
        assert!(policy.requeue(&jobs[0]));
        assert_eq!(policy.select_slice(&jobs, 4, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 8, None).unwrap().job, 0);
    }

    #[test]
    fn test_rr_lone_job_requeue_is_not_a_switch() {
        let jobs = make_jobs(&[(0, 10)]);
        let mut policy = RoundRobin::new(4);
        admit_all(&mut policy, &jobs);

        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 0);
        // Nothing else waiting: the job just keeps the CPU.
        assert!(!policy.requeue(&jobs[0]));
        assert_eq!(policy.select_slice(&jobs, 4, None).unwrap().job, 0);
    }

    #[test]
    fn test_rr_arrival_during_quantum_precedes_requeued_job() {
        let jobs = make_jobs(&[(0, 10), (3, 5)]);
        let mut policy = RoundRobin::new(4);
        policy.admit(&jobs[0]);

        assert_eq!(policy.select_slice(&jobs, 0, None).unwrap().job, 0);
        // Driver admits the arrival from the quantum before requeueing.
        policy.admit(&jobs[1]);
        policy.requeue(&jobs[0]);

        assert_eq!(policy.select_slice(&jobs, 4, None).unwrap().job, 1);
        assert_eq!(policy.select_slice(&jobs, 9, None).unwrap().job, 0);
    }

    #[test]
    fn test_empty_candidate_sets() {
        let jobs = make_jobs(&[]);
        assert!(Fcfs::new().select_slice(&jobs, 0, None).is_none());
        assert!(Sjf::new().select_slice(&jobs, 0, None).is_none());
        assert!(Stcf::new().select_slice(&jobs, 0, None).is_none());
        assert!(RoundRobin::new(1).select_slice(&jobs, 0, None).is_none());
    }
}
