//! Application services: compose the engine with the store and the
//! clock, and translate raw caller input into `OperationResult`s.

pub mod scheduler_ops;
pub mod suggestion;

pub use scheduler_ops::{AddTaskInput, SchedulerOps, SkipChecks};
pub use suggestion::SuggestionService;
