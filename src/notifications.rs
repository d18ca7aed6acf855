/// Cross-platform notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// AppleScript run by `osascript`; the project name arrives as `item 1 of argv`
#[cfg(any(target_os = "macos", test))]
const NOTIFY_SCRIPT: [&str; 4] = [
    "on run argv",
    concat!(
        r#"display notification ("Time's up for: " & item 1 of argv)"#,
        r#" with title "Tima - Timer Ended" sound name "Glass""#,
    ),
    "end run",
    "--",
];

/// Build the `osascript` arguments. The project name is passed as a script
/// argument and never spliced into the script source.
#[cfg(any(target_os = "macos", test))]
fn osascript_args(project: &str) -> Vec<String> {
    let mut args = Vec::new();
    for line in &NOTIFY_SCRIPT[..3] {
        args.push("-e".to_string());
        args.push(line.to_string());
    }
    args.push(NOTIFY_SCRIPT[3].to_string());
    args.push(project.to_string());
    args
}

/// Send a notification when a project's countdown runs out
pub fn notify_timer_ended(project: &str) {
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = Command::new("osascript").args(osascript_args(project)).output() {
            tracing::debug!("Could not send notification: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = project;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_name_is_passed_as_argument() {
        let name = r#"\" & (do shell script "touch /tmp/x") --"#;
        let args = osascript_args(name);

        assert_eq!(args.last().map(String::as_str), Some(name));
        assert_eq!(args[args.len() - 2], "--");
        // Only the trailing argument carries the name
        assert!(args[..args.len() - 1].iter().all(|arg| !arg.contains("touch")));
        assert_eq!(args.iter().filter(|arg| *arg == "-e").count(), 3);
    }
}
