//! Simulation domain models.
//!
//! Provides the core data types shared by every dispatch discipline:
//! the `Job` record with its immutable description and mutable
//! simulation-derived fields, and the flattened outcome records the
//! engine hands to output adapters.

mod job;
mod report;

pub use job::{Job, JobState, Time};
pub use report::{JobOutcome, SimulationReport};
