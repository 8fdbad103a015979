//! Per-form validators.
//!
//! Each validator runs its fixed, ordered list of sub-checks against the
//! shared [`ErrorAccumulator`](crate::accumulator::ErrorAccumulator).

pub mod adverse_event;
pub mod eligibility;
pub mod pregnancy_status;
pub mod vaccination_detail;
pub mod vaccination_history;
