//! Simulation driver.
//!
//! # Algorithm
//!
//! 1. Admit every job whose arrival is at or before the clock.
//! 2. If nothing is ready, jump the clock to the next arrival (idle-skip)
//!    and admit again; with no arrivals left, terminate.
//! 3. Ask the active policy for the next slice and apply it: stamp the
//!    first dispatch, advance the clock, decrement remaining work, then
//!    admit arrivals from the slice *before* requeueing a preempted job.
//! 4. Repeat until every job is done, then aggregate metrics.
//!
//! # Complexity
//! O(n log n) dispatch decisions for the heap-backed disciplines; the
//! per-step ready scan is O(n), a deliberate simplicity trade-off at the
//! intended workload scale (~1,500 jobs).

use log::{debug, trace};

use crate::dispatching::{DispatchPolicy, PolicyKind, Slice};
use crate::models::{Job, JobOutcome, JobState, SimulationReport, Time};
use crate::validation::{validate_workload, ValidationError};

use super::metrics::SimulationMetrics;
use super::ready::ReadySet;

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initializing,
    Running,
    Terminated,
}

/// One applied dispatch decision, for post-run inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Index of the job that ran.
    pub job: usize,
    /// Clock value when the slice began.
    pub start: Time,
    /// Ticks the slice ran for.
    pub length: Time,
}

/// A single simulation run: owns the workload, the clock, and the policy.
///
/// Each run is an independent value — no shared state, so comparing
/// policies side by side needs no synchronization. The run is a pure
/// function of its inputs and always terminates: remaining work is
/// strictly decreasing while the clock never moves backwards.
///
/// # Example
///
/// ```
/// use schedsim::engine::Simulation;
/// use schedsim::dispatching::PolicyKind;
/// use schedsim::models::Job;
///
/// let jobs = vec![Job::new(0, 0, 5), Job::new(1, 2, 3)];
/// let mut sim = Simulation::new(jobs, PolicyKind::Fcfs).unwrap();
/// let report = sim.run();
/// assert_eq!(report.outcomes[1].start_first, 5);
/// ```
#[derive(Debug)]
pub struct Simulation {
    jobs: Vec<Job>,
    ready: ReadySet,
    policy: Box<dyn DispatchPolicy>,
    kind: PolicyKind,
    clock: Time,
    phase: Phase,
    trace: Vec<Dispatch>,
}

impl Simulation {
    /// Validates the workload and configuration and prepares a run.
    ///
    /// All input rejection happens here — a constructed simulation cannot
    /// fail mid-run. Jobs are reset to `New` with full remaining work and
    /// the clock starts at 0.
    pub fn new(mut jobs: Vec<Job>, kind: PolicyKind) -> Result<Self, Vec<ValidationError>> {
        validate_workload(&jobs)?;
        let policy = kind.build()?;
        for job in &mut jobs {
            job.reset();
        }
        let ready = ReadySet::new(&jobs);
        Ok(Self {
            jobs,
            ready,
            policy,
            kind,
            clock: 0,
            phase: Phase::Initializing,
            trace: Vec::new(),
        })
    }

    /// Current clock value, in ticks.
    pub fn clock(&self) -> Time {
        self.clock
    }

    /// The jobs, in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Every dispatch decision applied so far, in order.
    pub fn trace(&self) -> &[Dispatch] {
        &self.trace
    }

    /// Runs the simulation to completion and returns the report.
    ///
    /// # Panics
    /// Panics if called after termination, or on an internal invariant
    /// violation (which would mean engine drift, not bad input).
    pub fn run(&mut self) -> SimulationReport {
        assert!(
            self.phase != Phase::Terminated,
            "simulation already terminated"
        );
        self.phase = Phase::Running;
        debug!(
            "starting {} run over {} jobs",
            self.policy.name(),
            self.jobs.len()
        );

        loop {
            self.admit();

            if !self.ready.has_ready(&self.jobs) {
                match self.ready.next_arrival(&self.jobs) {
                    Some(at) => {
                        // Idle-skip: jump straight to the next arrival,
                        // never unit-step through idle time.
                        debug_assert!(at > self.clock);
                        trace!("idle-skip {} -> {}", self.clock, at);
                        self.clock = at;
                        continue;
                    }
                    None => break,
                }
            }

            let next_arrival = self.ready.next_arrival(&self.jobs);
            let slice = self
                .policy
                .select_slice(&self.jobs, self.clock, next_arrival)
                .expect("policy produced no slice despite ready jobs");
            self.apply(slice);
        }

        self.terminate()
    }

    /// Feeds newly arrived jobs to the policy in `(arrival, index)` order.
    fn admit(&mut self) {
        for index in self.ready.admit(&mut self.jobs, self.clock) {
            trace!("t={} admit job {}", self.clock, index);
            self.policy.admit(&self.jobs[index]);
        }
    }

    /// Applies one dispatch decision.
    fn apply(&mut self, slice: Slice) {
        let Slice { job: index, length } = slice;
        let job = &mut self.jobs[index];
        assert_eq!(job.state, JobState::Ready, "dispatched job {index} not ready");
        assert!(
            length >= 1 && length <= job.remaining,
            "slice of {length} ticks for job {index} with {} remaining",
            job.remaining
        );

        if job.start_first.is_none() {
            job.start_first = Some(self.clock);
        }
        trace!(
            "t={} run job {} for {} ({} remaining before)",
            self.clock,
            index,
            length,
            job.remaining
        );

        self.trace.push(Dispatch {
            job: index,
            start: self.clock,
            length,
        });
        self.clock += length;
        self.jobs[index].remaining -= length;

        // Arrivals landing during (or exactly at the end of) the slice are
        // admitted now, so a preempted job requeues behind them and a
        // same-tick arrival is visible to the next selection.
        self.admit();

        if self.jobs[index].remaining == 0 {
            self.jobs[index].state = JobState::Done;
            self.jobs[index].finish = Some(self.clock);
            trace!("t={} job {} done", self.clock, index);
        } else if self.policy.requeue(&self.jobs[index]) {
            self.jobs[index].context_switches += 1;
        }
    }

    /// Checks exit invariants and builds the report.
    fn terminate(&mut self) -> SimulationReport {
        self.phase = Phase::Terminated;

        for job in &self.jobs {
            assert!(
                job.is_done() && job.remaining == 0,
                "terminated with job {} unfinished ({} remaining)",
                job.index,
                job.remaining
            );
            let finish = job.finish.expect("done job without finish time");
            assert!(
                finish >= job.arrival + job.size,
                "job {} finished at {} before arrival {} + size {}",
                job.index,
                finish,
                job.arrival,
                job.size
            );
        }

        // Conservation: every job received exactly the CPU time it asked for.
        for job in &self.jobs {
            let delivered: Time = self
                .trace
                .iter()
                .filter(|d| d.job == job.index)
                .map(|d| d.length)
                .sum();
            assert_eq!(
                delivered, job.size,
                "job {} received {delivered} ticks, requested {}",
                job.index, job.size
            );
        }

        let metrics =
            SimulationMetrics::calculate(&self.jobs).expect("workload validated non-empty");
        debug!(
            "{} run finished at t={}: avg response {:.2}, avg turnaround {:.2}",
            self.policy.name(),
            self.clock,
            metrics.avg_response_time,
            metrics.avg_turnaround_time
        );

        let outcomes: Vec<JobOutcome> = self.jobs.iter().map(JobOutcome::from_job).collect();
        SimulationReport {
            policy: self.kind,
            outcomes,
            metrics,
        }
    }
}

/// Validates, runs, and reports in one call.
pub fn simulate(jobs: Vec<Job>, kind: PolicyKind) -> Result<SimulationReport, Vec<ValidationError>> {
    Ok(Simulation::new(jobs, kind)?.run())
}
