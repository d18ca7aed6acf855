use crate::app::ProjectTimerState;
use crate::domain::{format_duration, format_time, projected_finish};
use chrono::{DateTime, Local};

/// Marker shown next to the current project
pub const CURRENT_MARKER: &str = ">";

/// Render the project list, one line per project, followed by the default duration
pub fn render_project_list(state: &ProjectTimerState) -> String {
    if state.projects().is_empty() {
        return "No projects. Add one with `add <name>`.".to_string();
    }

    let width = state
        .projects()
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = state
        .projects()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if i == state.current_index() { CURRENT_MARKER } else { " " };
            let remaining = format_time(state.remaining(name).unwrap_or(0));
            let badge = if state.is_paused(name) { "  paused" } else { "" };
            format!(
                "{} {:>2}. {:<width$}  {}{}",
                marker,
                i + 1,
                name,
                remaining,
                badge,
                width = width
            )
        })
        .collect();

    lines.push(format!(
        "Default duration: {}",
        format_duration(state.default_duration())
    ));
    lines.join("\n")
}

/// One-line status for the current project, `None` when there are no projects
pub fn render_status(state: &ProjectTimerState, now: DateTime<Local>) -> Option<String> {
    let project = state.current_project()?;
    let remaining = state.current_remaining();

    let line = if state.is_current_paused() {
        format!("{}  {}  paused", project, format_time(remaining))
    } else {
        let finish = projected_finish(now, remaining);
        format!(
            "{}  {}  ends ~{}",
            project,
            format_time(remaining),
            finish.format("%H:%M")
        )
    };
    Some(line)
}
