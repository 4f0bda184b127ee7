//! fortudo — a single-user day planner.
//!
//! A scheduled list (time-anchored tasks) and an unscheduled backlog
//! (priority-ordered), joined by a cascading reschedule engine: adding or
//! moving a task that overlaps others shifts them forward automatically,
//! subject to locks and completed-task barriers.

pub mod cli;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod services;
pub mod store;

pub use domain::{DomainError, DomainResult};
pub use services::{SchedulerOps, SkipChecks, SuggestionService};
pub use store::TaskStore;
