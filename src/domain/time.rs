use super::error::StateError;
use chrono::{DateTime, Duration, Local};

/// Format a countdown as "HH:MM:SS"
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format a duration as "Xh Ym" or "Xm" for short durations
pub fn format_duration(seconds: u64) -> String {
    let total_mins = seconds / 60;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Convert an hours/minutes pair into seconds, rejecting non-positive totals
pub fn duration_from_parts(hours: i64, minutes: i64) -> Result<u64, StateError> {
    let total = hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60));
    if total <= 0 {
        return Err(StateError::NonPositiveDuration);
    }
    Ok(total as u64)
}

/// Wall-clock time at which a countdown started now would finish
pub fn projected_finish(now: DateTime<Local>, remaining: u64) -> DateTime<Local> {
    // chrono durations top out at i64::MAX milliseconds
    let secs = i64::try_from(remaining).unwrap_or(i64::MAX).min(i64::MAX / 1000);
    now.checked_add_signed(Duration::seconds(secs)).unwrap_or(now)
}
