use super::files::atomic_write;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a project list: one name per line, trimmed, blank lines dropped.
/// A name repeated later in the list is ignored.
pub fn parse_project_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}

/// Render a project list as newline-joined names, in order
pub fn render_project_list(projects: &[String]) -> String {
    projects.join("\n")
}

/// Read a project list from a plain text file
pub fn read_project_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to import from {}", path.display()))?;
    Ok(parse_project_list(&content))
}

/// Write a project list to a plain text file
pub fn write_project_list<P: AsRef<Path>>(path: P, projects: &[String]) -> Result<()> {
    let path = path.as_ref();
    atomic_write(path, &render_project_list(projects))
        .with_context(|| format!("Failed to export to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_project_list() {
        assert_eq!(parse_project_list("X\n\nY\n"), vec!["X", "Y"]);
        assert_eq!(parse_project_list("  padded  \r\n\t\nnext"), vec!["padded", "next"]);
        assert!(parse_project_list("\n  \n").is_empty());
    }

    #[test]
    fn test_parse_project_list_drops_repeats() {
        assert_eq!(parse_project_list("A\nB\nA\n B"), vec!["A", "B"]);
    }

    #[test]
    fn test_render_project_list() {
        let projects = vec!["One".to_string(), "Two".to_string()];
        assert_eq!(render_project_list(&projects), "One\nTwo");
    }

    #[test]
    fn test_write_then_read_project_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("projects.txt");
        let projects = vec!["Alpha".to_string(), "Beta".to_string()];

        write_project_list(&path, &projects).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Alpha\nBeta");
        assert_eq!(read_project_list(&path).unwrap(), projects);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = read_project_list(temp_dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to import"));
    }
}
