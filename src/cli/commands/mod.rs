//! Command handlers: parse CLI args into domain calls and render results.

pub mod mutate;
pub mod query;

use anyhow::{anyhow, Result};

use crate::cli::display::render_operation_result;
use crate::cli::output::output;
use crate::cli::types::Commands;
use crate::domain::models::task::Priority;
use crate::domain::models::OperationResult;
use crate::domain::ports::Clock;
use crate::domain::time_math::Instant;
use crate::services::SchedulerOps;

fn parse_priority(s: &str) -> Result<Priority> {
    match s.to_lowercase().as_str() {
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        other => Err(anyhow!("'{other}' is not a valid priority (expected high, medium, or low)")),
    }
}

fn print_result(result: &OperationResult, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(result).unwrap_or_default());
    } else {
        println!("{}", render_operation_result(result));
    }
}

/// Dispatches a parsed command against the live store, printing the
/// result in either human or JSON form. `today` anchors any HH:MM time
/// the user supplies to the current local calendar date.
pub fn dispatch<C: Clock>(
    command: Commands,
    ops: &mut SchedulerOps<C>,
    today: &str,
    now: Instant,
    json: bool,
) -> Result<()> {
    match command {
        Commands::List => output(&query::build_list_output(ops), json),
        Commands::Suggest => output(&query::build_suggest_output(ops, now), json),
        Commands::Add {
            description,
            start,
            duration,
            locked,
            priority,
            est,
            yes,
            skip_adjust,
            skip_completed,
        } => {
            let result = mutate::add(
                ops,
                description,
                start,
                duration,
                locked,
                priority,
                est,
                yes,
                skip_adjust,
                skip_completed,
                today,
            )?;
            print_result(&result, json);
        }
        Commands::Update {
            index,
            description,
            start,
            duration,
            locked,
            yes,
            skip_adjust,
            skip_completed,
        } => {
            let result = mutate::update(ops, index, description, start, duration, locked, yes, skip_adjust, skip_completed, today)?;
            print_result(&result, json);
        }
        Commands::Complete { index, at, yes } => {
            let result = mutate::complete(ops, index, at, yes)?;
            print_result(&result, json);
        }
        Commands::Lock { id } => {
            let result = mutate::lock(ops, &id)?;
            print_result(&result, json);
        }
        Commands::Edit { id } => {
            let result = mutate::edit(ops, &id)?;
            print_result(&result, json);
        }
        Commands::CancelEdit { id } => {
            let result = mutate::cancel_edit(ops, &id)?;
            print_result(&result, json);
        }
        Commands::Delete { index, yes } => {
            let result = mutate::delete(ops, index, yes)?;
            print_result(&result, json);
        }
        Commands::Unschedule { id } => {
            let result = mutate::unschedule(ops, &id)?;
            print_result(&result, json);
        }
        Commands::Schedule {
            id,
            start,
            duration,
            yes,
            skip_adjust,
            skip_completed,
        } => {
            let result = mutate::schedule(ops, &id, start, duration, yes, skip_adjust, skip_completed, today)?;
            print_result(&result, json);
        }
        Commands::ClearAll => print_result(&mutate::clear_all(ops)?, json),
        Commands::ClearScheduled => print_result(&mutate::clear_scheduled(ops)?, json),
        Commands::ClearCompleted => print_result(&mutate::clear_completed(ops)?, json),
    }
    Ok(())
}
