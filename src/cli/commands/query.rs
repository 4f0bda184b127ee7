//! Read-only commands: `list`, `suggest`.

use serde::Serialize;

use crate::cli::display::{list_table, render_list};
use crate::cli::output::CommandOutput;
use crate::domain::models::task::Task;
use crate::domain::ports::Clock;
use crate::domain::time_math::{extract_date, extract_hhmm};
use crate::services::{SchedulerOps, SuggestionService};

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub index: usize,
    pub id: String,
    pub kind: String,
    pub description: String,
    pub detail: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub tasks: Vec<TaskRow>,
}

impl CommandOutput for ListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["#", "type", "description", "detail", "status", "id"]);
        for row in &self.tasks {
            table.add_row(vec![
                row.index.to_string(),
                row.kind.clone(),
                row.description.clone(),
                row.detail.clone(),
                row.status.clone(),
                short_id(&row.id),
            ]);
        }
        render_list("task", table, self.tasks.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub fn build_list_output<C: Clock>(ops: &SchedulerOps<C>) -> ListOutput {
    let tasks = ops
        .store()
        .get_all()
        .iter()
        .enumerate()
        .map(|(index, task)| match task {
            Task::Scheduled(s) => TaskRow {
                index,
                id: s.id.to_string(),
                kind: "scheduled".to_string(),
                description: s.description.clone(),
                detail: format!(
                    "{}-{}{}{}",
                    extract_hhmm(s.start_date_time),
                    extract_hhmm(s.end_date_time),
                    if extract_date(s.end_date_time) != extract_date(s.start_date_time) {
                        " (+1d)"
                    } else {
                        ""
                    },
                    if s.locked { " (locked)" } else { "" }
                ),
                status: format!("{:?}", s.status).to_lowercase(),
            },
            Task::Unscheduled(u) => TaskRow {
                index,
                id: u.id.to_string(),
                kind: "backlog".to_string(),
                description: u.description.clone(),
                detail: match u.est_duration {
                    Some(d) => format!("{:?}, ~{}m", u.priority, d.num_minutes()),
                    None => format!("{:?}", u.priority),
                },
                status: format!("{:?}", u.status).to_lowercase(),
            },
        })
        .collect();
    ListOutput { tasks }
}

#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub suggested_start: String,
}

impl CommandOutput for SuggestOutput {
    fn to_human(&self) -> String {
        format!("suggested start: {}", self.suggested_start)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn build_suggest_output<C: Clock>(ops: &SchedulerOps<C>, now: crate::domain::time_math::Instant) -> SuggestOutput {
    SuggestOutput {
        suggested_start: SuggestionService::get_suggested_start_time(ops.store(), now),
    }
}
