//! CLI type definitions
//!
//! Clap command structures that define the CLI interface, one subcommand
//! per [`crate::services::SchedulerOps`] entry point.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fortudo")]
#[command(about = "A single-user day planner with a cascading reschedule engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task. With --start and --duration it joins the scheduled
    /// list; without --start it joins the unscheduled backlog.
    Add {
        /// Task description
        description: String,

        /// Start time, HH:MM 24-hour. Omit to add to the backlog instead.
        #[arg(long)]
        start: Option<String>,

        /// Duration in minutes. Required when --start is given.
        #[arg(long)]
        duration: Option<i64>,

        /// Lock the task against cascade shifts (scheduled tasks only)
        #[arg(long)]
        locked: bool,

        /// Priority for a backlog item: high, medium, low
        #[arg(long)]
        priority: Option<String>,

        /// Estimated duration in minutes for a backlog item
        #[arg(long)]
        est: Option<i64>,

        /// Automatically accept any confirmation the engine asks for
        #[arg(long)]
        yes: bool,

        /// Skip the running-task-adjustment check
        #[arg(long)]
        skip_adjust: bool,

        /// Skip the completed-task-truncation check
        #[arg(long)]
        skip_completed: bool,
    },

    /// List the scheduled tasks and the backlog
    List,

    /// Print the suggested next start time
    Suggest,

    /// Replace a scheduled task's description, start time, duration, and lock
    Update {
        /// Position in the task list (0-based, as shown by `list`); must
        /// refer to a scheduled task
        index: usize,

        /// New description
        description: String,

        /// New start time, HH:MM 24-hour
        start: String,

        /// New duration in minutes
        duration: i64,

        /// Lock the task against cascade shifts
        #[arg(long)]
        locked: bool,

        /// Automatically accept any confirmation the engine asks for
        #[arg(long)]
        yes: bool,

        /// Skip the running-task-adjustment check
        #[arg(long)]
        skip_adjust: bool,

        /// Skip the completed-task-truncation check
        #[arg(long)]
        skip_completed: bool,
    },

    /// Mark a task complete
    Complete {
        /// Position in the task list (0-based, as shown by `list`)
        index: usize,

        /// The current wall-clock time, HH:MM 24-hour, to detect a
        /// late completion. Omit to complete at the task's own end time.
        #[arg(long)]
        at: Option<String>,

        /// Automatically accept the late-completion cascade if offered
        #[arg(long)]
        yes: bool,
    },

    /// Toggle a scheduled task's lock
    Lock {
        /// Task id
        id: String,
    },

    /// Mark a task as being edited (excludes it from overlap detection)
    Edit {
        /// Task id
        id: String,
    },

    /// Clear a task's editing flag without changing anything else
    CancelEdit {
        /// Task id
        id: String,
    },

    /// Delete a task. Run twice to confirm: the first call arms the
    /// task's delete confirmation, the second (with --yes) removes it.
    Delete {
        /// Position in the task list (0-based, as shown by `list`)
        index: usize,

        /// Confirm the delete
        #[arg(long)]
        yes: bool,
    },

    /// Move a scheduled task to the unscheduled backlog
    Unschedule {
        /// Task id
        id: String,
    },

    /// Move a backlog item onto the scheduled list
    Schedule {
        /// Task id
        id: String,

        /// Start time, HH:MM 24-hour
        start: String,

        /// Duration in minutes
        duration: i64,

        /// Automatically accept any confirmation the engine asks for
        #[arg(long)]
        yes: bool,

        /// Skip the running-task-adjustment check
        #[arg(long)]
        skip_adjust: bool,

        /// Skip the completed-task-truncation check
        #[arg(long)]
        skip_completed: bool,
    },

    /// Delete every task, scheduled and backlog
    ClearAll,

    /// Delete every scheduled task, leaving the backlog untouched
    ClearScheduled,

    /// Delete every completed task
    ClearCompleted,
}
