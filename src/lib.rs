//! Discrete-event CPU scheduling simulator.
//!
//! Replays a workload of jobs — each an `(index, arrival, size)` record —
//! under a chosen dispatch discipline on a logical clock, and reports
//! per-job response and turnaround times plus their means.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `JobState`, `JobOutcome`,
//!   `SimulationReport`
//! - **`dispatching`**: The `DispatchPolicy` strategy and the four built-in
//!   disciplines — FCFS, SJF, STCF, Round-Robin
//! - **`engine`**: The simulation driver, ready-set admission, idle-skip,
//!   and metrics aggregation
//! - **`validation`**: Input integrity checks (empty workloads, zero-size
//!   jobs, zero quanta)
//! - **`workload`**: Seeded synthetic job population generation
//! - **`csv`**: Workload and report file adapters
//!
//! # Design
//!
//! The engine is single-threaded and synchronous: simulated time is a
//! logical counter, disciplines decide *order*, not concurrency. Every run
//! owns its jobs and clock, so simulations compose freely. All ties break
//! toward the lower job index, making every run deterministic.
//!
//! # Example
//!
//! ```
//! use schedsim::dispatching::PolicyKind;
//! use schedsim::engine::simulate;
//! use schedsim::models::Job;
//!
//! let jobs = vec![Job::new(0, 0, 10), Job::new(1, 3, 2)];
//! let report = simulate(jobs, PolicyKind::Stcf).unwrap();
//! assert_eq!(report.outcomes[1].turnaround_time, 2);
//! ```
//!
//! # References
//!
//! - Arpaci-Dusseau & Arpaci-Dusseau, "Operating Systems: Three Easy
//!   Pieces", Ch. 7-8
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod csv;
pub mod dispatching;
pub mod engine;
pub mod models;
pub mod validation;
pub mod workload;
