//! Discrete-event simulation engine.
//!
//! The engine models time as a single monotonically non-decreasing logical
//! counter. It advances either by running a policy-chosen slice or by
//! jumping straight to the next arrival when nothing is ready (idle-skip).
//!
//! # Components
//!
//! - `ReadySet`: arrival admission and the idle-skip query.
//! - `Simulation`: the driver loop owning jobs, clock, and policy.
//! - `SimulationMetrics`: workload-wide averages once all jobs are done.

mod driver;
mod metrics;
mod ready;

pub use driver::{simulate, Dispatch, Simulation};
pub use metrics::SimulationMetrics;
pub use ready::ReadySet;
