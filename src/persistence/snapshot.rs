use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default countdown for new projects (1 hour)
pub const DEFAULT_DURATION_SECS: u64 = 3600;

fn default_duration() -> i64 {
    DEFAULT_DURATION_SECS as i64
}

/// On-disk shape of the timer state (tima_projects.json)
///
/// Numbers are signed so a hand-edited file with a negative value still
/// parses; the state model clamps them when it adopts a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub current_index: i64,
    #[serde(default = "default_duration")]
    pub default_duration: i64,
    #[serde(default)]
    pub project_times: BTreeMap<String, i64>,
    #[serde(default)]
    pub project_paused: BTreeMap<String, bool>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            current_index: 0,
            default_duration: default_duration(),
            project_times: BTreeMap::new(),
            project_paused: BTreeMap::new(),
        }
    }
}

/// Load a snapshot from a JSON file, `None` if the file doesn't exist
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Option<StateSnapshot>> {
    let path = path.as_ref();
    let Some(content) = read_file(path)? else {
        return Ok(None);
    };
    let snapshot: StateSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Malformed state file: {}", path.display()))?;
    Ok(Some(snapshot))
}

/// Save a snapshot to a JSON file, replacing it atomically
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &StateSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_snapshot() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tima_projects.json");

        assert_eq!(load_snapshot(&path).unwrap(), None);
    }

    #[test]
    fn test_save_and_load_snapshot() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tima_projects.json");

        let mut snapshot = StateSnapshot::default();
        snapshot.projects = vec!["Write".to_string(), "Read".to_string()];
        snapshot.current_index = 1;
        snapshot.default_duration = 1500;
        snapshot.project_times.insert("Write".to_string(), 1200);
        snapshot.project_times.insert("Read".to_string(), 1500);
        snapshot.project_paused.insert("Write".to_string(), true);
        snapshot.project_paused.insert("Read".to_string(), false);

        save_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_field_names_on_disk() {
        let mut snapshot = StateSnapshot::default();
        snapshot.projects = vec!["A".to_string()];
        snapshot.project_times.insert("A".to_string(), 10);
        snapshot.project_paused.insert("A".to_string(), false);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["projects"][0], "A");
        assert_eq!(value["current_index"], 0);
        assert_eq!(value["default_duration"], 3600);
        assert_eq!(value["project_times"]["A"], 10);
        assert_eq!(value["project_paused"]["A"], false);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tima_projects.json");
        std::fs::write(&path, r#"{"projects": ["Only"]}"#).unwrap();

        let loaded = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.projects, vec!["Only".to_string()]);
        assert_eq!(loaded.current_index, 0);
        assert_eq!(loaded.default_duration, 3600);
        assert!(loaded.project_times.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tima_projects.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_snapshot(&path).is_err());
    }
}
