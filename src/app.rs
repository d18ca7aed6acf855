use crate::config::StatePaths;
use crate::domain::{
    duration_from_parts, Direction, StateError, TickOutcome, TimerEndChoice, UndoAction, UndoStack,
};
use crate::persistence::{
    load_snapshot, read_project_list, save_snapshot, write_project_list, StateSnapshot,
    DEFAULT_DURATION_SECS,
};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Projects seeded when neither the state file nor the defaults file can be read
pub const SEED_PROJECTS: [&str; 3] = [
    "Develop new feature",
    "Review research papers",
    "Team meeting prep",
];

/// In-memory model of projects, their countdowns and pause flags.
///
/// Every name in `projects` has exactly one entry in `project_times` and
/// `project_paused`, and `current_index` stays inside the list whenever it
/// is non-empty. Each mutating call saves the full state to `paths.primary`.
pub struct ProjectTimerState {
    projects: Vec<String>,
    current_index: usize,
    default_duration: u64,
    project_times: HashMap<String, u64>,
    project_paused: HashMap<String, bool>,
    undo_stack: UndoStack,
    paths: StatePaths,
}

impl ProjectTimerState {
    /// Create a state holding `projects`, each at the default duration and unpaused.
    /// Blank and repeated names are dropped.
    pub fn new(projects: Vec<String>, default_duration: u64, paths: StatePaths) -> Self {
        let default_duration = if default_duration == 0 {
            DEFAULT_DURATION_SECS
        } else {
            default_duration
        };
        let mut state = Self {
            projects: Vec::new(),
            current_index: 0,
            default_duration,
            project_times: HashMap::new(),
            project_paused: HashMap::new(),
            undo_stack: UndoStack::new(),
            paths,
        };
        state.install_projects(projects);
        state
    }

    /// Load state from the per-user file, then the defaults file, then the seed projects.
    /// Unreadable or malformed files are logged and skipped.
    pub fn load(paths: StatePaths) -> Self {
        let candidates: Vec<_> = std::iter::once(paths.primary.clone())
            .chain(paths.defaults.clone())
            .collect();

        for path in candidates {
            match load_snapshot(&path) {
                Ok(Some(snapshot)) => {
                    info!("Loaded {} projects from {}", snapshot.projects.len(), path.display());
                    return Self::from_snapshot(snapshot, paths);
                }
                Ok(None) => debug!("No state file at {}", path.display()),
                Err(e) => warn!("Error loading from {}: {:#}", path.display(), e),
            }
        }

        info!("Starting with built-in projects");
        let seeds = SEED_PROJECTS.iter().map(|s| s.to_string()).collect();
        Self::new(seeds, DEFAULT_DURATION_SECS, paths)
    }

    /// Adopt a snapshot read from disk, repairing anything that breaks the invariants
    pub fn from_snapshot(snapshot: StateSnapshot, paths: StatePaths) -> Self {
        let default_duration = u64::try_from(snapshot.default_duration)
            .ok()
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_DURATION_SECS);

        let mut state = Self::new(Vec::new(), default_duration, paths);
        state.install_projects(snapshot.projects);

        for name in &state.projects {
            if let Some(&secs) = snapshot.project_times.get(name) {
                state.project_times.insert(name.clone(), secs.max(0) as u64);
            }
            if let Some(&paused) = snapshot.project_paused.get(name) {
                state.project_paused.insert(name.clone(), paused);
            }
        }

        state.current_index = usize::try_from(snapshot.current_index).unwrap_or(0);
        state.clamp_current_index();
        state
    }

    /// Capture the persisted shape of the state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            projects: self.projects.clone(),
            current_index: self.current_index as i64,
            default_duration: self.default_duration as i64,
            project_times: self
                .project_times
                .iter()
                .map(|(name, secs)| (name.clone(), *secs as i64))
                .collect(),
            project_paused: self
                .project_paused
                .iter()
                .map(|(name, paused)| (name.clone(), *paused))
                .collect(),
        }
    }

    /// Save state to disk. Failures are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            error!("Error saving to {}: {:#}", self.paths.primary.display(), e);
        }
    }

    /// Save state to disk, reporting failure
    pub fn try_save(&self) -> Result<()> {
        save_snapshot(&self.paths.primary, &self.snapshot())
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn default_duration(&self) -> u64 {
        self.default_duration
    }

    /// Number of edits that can currently be undone
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Name of the project the countdown applies to
    pub fn current_project(&self) -> Option<&str> {
        self.projects.get(self.current_index).map(String::as_str)
    }

    /// Remaining seconds for a project
    pub fn remaining(&self, name: &str) -> Option<u64> {
        self.project_times.get(name).copied()
    }

    pub fn is_paused(&self, name: &str) -> bool {
        self.project_paused.get(name).copied().unwrap_or(false)
    }

    /// Remaining seconds for the current project (0 when there are no projects)
    pub fn current_remaining(&self) -> u64 {
        self.current_project()
            .and_then(|name| self.remaining(name))
            .unwrap_or(0)
    }

    pub fn is_current_paused(&self) -> bool {
        self.current_project()
            .map(|name| self.is_paused(name))
            .unwrap_or(false)
    }

    /// Advance the current project's countdown by one second.
    ///
    /// A project already at zero is not decremented; the tick reports
    /// `TickOutcome::Ended` and the caller resolves it.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(name) = self.current_project().map(str::to_string) else {
            return TickOutcome::NoProject;
        };
        if self.is_paused(&name) {
            return TickOutcome::Paused;
        }

        let remaining = self.remaining(&name).unwrap_or(self.default_duration);
        if remaining == 0 {
            info!("Timer ended for {}", name);
            return TickOutcome::Ended { project: name };
        }

        let remaining = remaining - 1;
        self.project_times.insert(name, remaining);
        self.save();
        TickOutcome::Counted { remaining }
    }

    /// Add a project at the end of the list
    pub fn add(&mut self, name: &str) -> Result<(), StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::EmptyName);
        }
        if self.contains(name) {
            return Err(StateError::DuplicateName(name.to_string()));
        }

        self.projects.push(name.to_string());
        self.project_times.insert(name.to_string(), self.default_duration);
        self.project_paused.insert(name.to_string(), false);
        info!("Added project {}", name);
        self.save();
        Ok(())
    }

    /// Delete the project at `index`, remembering it for undo
    pub fn delete(&mut self, index: usize) -> Result<(), StateError> {
        self.check_index(index)?;

        let name = self.projects.remove(index);
        let remaining_seconds = self
            .project_times
            .remove(&name)
            .unwrap_or(self.default_duration);
        let paused = self.project_paused.remove(&name).unwrap_or(false);
        let was_current = index == self.current_index;

        self.undo_stack.push(UndoAction::Delete {
            index,
            name: name.clone(),
            remaining_seconds,
            paused,
            was_current,
        });

        // Keep pointing at the same project when an earlier one goes away
        if index < self.current_index {
            self.current_index -= 1;
        } else {
            self.clamp_current_index();
        }

        info!("Deleted project {}", name);
        self.save();
        Ok(())
    }

    /// Rename the project at `index`, carrying its time and pause state along
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<(), StateError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StateError::EmptyName);
        }
        self.check_index(index)?;

        let old_name = self.projects[index].clone();
        if new_name == old_name {
            return Err(StateError::SameName(old_name));
        }
        if self.contains(new_name) {
            return Err(StateError::DuplicateName(new_name.to_string()));
        }

        self.undo_stack.push(UndoAction::Rename {
            index,
            old_name: old_name.clone(),
            new_name: new_name.to_string(),
        });
        self.projects[index] = new_name.to_string();
        self.move_entries(&old_name, new_name);

        info!("Renamed project {} to {}", old_name, new_name);
        self.save();
        Ok(())
    }

    /// Flip the pause flag for the project at `index`, returning the new flag
    pub fn toggle_pause(&mut self, index: usize) -> Result<bool, StateError> {
        self.check_index(index)?;
        let name = self.projects[index].clone();
        let paused = !self.is_paused(&name);
        self.project_paused.insert(name, paused);
        self.save();
        Ok(paused)
    }

    pub fn toggle_current_pause(&mut self) -> Result<bool, StateError> {
        self.toggle_pause(self.current_index)
    }

    /// Put the project at `index` back to the default duration, unpaused
    pub fn reset(&mut self, index: usize) -> Result<(), StateError> {
        self.check_index(index)?;
        let name = self.projects[index].clone();
        self.project_times.insert(name.clone(), self.default_duration);
        self.project_paused.insert(name, false);
        self.save();
        Ok(())
    }

    pub fn reset_current(&mut self) -> Result<(), StateError> {
        self.reset(self.current_index)
    }

    /// Switch to the next project, wrapping around
    pub fn next_project(&mut self) {
        if self.projects.is_empty() {
            return;
        }
        let next = (self.current_index + 1) % self.projects.len();
        self.hand_off(next);
    }

    /// Switch to the previous project, wrapping around
    pub fn previous_project(&mut self) {
        if self.projects.is_empty() {
            return;
        }
        let len = self.projects.len();
        let previous = (self.current_index + len - 1) % len;
        self.hand_off(previous);
    }

    /// Resolve a timer that ran out: reset it, then stay or move on
    pub fn resolve_timer_end(&mut self, choice: TimerEndChoice) {
        if self.reset_current().is_err() {
            return;
        }
        if choice == TimerEndChoice::Advance {
            self.next_project();
        }
    }

    /// Move the project at `index` one place up or down, returning its new index
    pub fn move_project(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<usize, StateError> {
        self.check_index(index)?;
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|t| *t < self.projects.len()),
        };
        let Some(target) = target else {
            return Err(StateError::CannotMove {
                index,
                direction: direction.to_tag(),
            });
        };

        self.projects.swap(index, target);

        // Current index follows whichever project it pointed at
        if self.current_index == index {
            self.current_index = target;
        } else if self.current_index == target {
            self.current_index = index;
        }

        self.save();
        Ok(target)
    }

    /// Undo the most recent delete or rename, returning a confirmation message
    pub fn undo(&mut self) -> Result<String, StateError> {
        let action = self.undo_stack.pop().ok_or(StateError::NothingToUndo)?;

        let message = match action {
            UndoAction::Delete {
                index,
                name,
                remaining_seconds,
                paused,
                was_current,
            } => {
                if self.contains(&name) {
                    return Err(StateError::DuplicateName(name));
                }

                let was_empty = self.projects.is_empty();
                let insert_pos = index.min(self.projects.len());
                self.projects.insert(insert_pos, name.clone());
                self.project_times.insert(name.clone(), remaining_seconds);
                self.project_paused.insert(name.clone(), paused);

                if was_current || was_empty {
                    self.current_index = insert_pos;
                } else if insert_pos <= self.current_index {
                    self.current_index += 1;
                }
                self.clamp_current_index();

                format!("Restored: {}", name)
            }
            UndoAction::Rename {
                index,
                old_name,
                new_name,
            } => {
                let position = if self.projects.get(index) == Some(&new_name) {
                    Some(index)
                } else {
                    self.projects.iter().position(|p| *p == new_name)
                };
                let Some(position) = position else {
                    return Err(StateError::UndoTargetMissing(new_name));
                };
                if self.contains(&old_name) {
                    return Err(StateError::DuplicateName(old_name));
                }

                self.projects[position] = old_name.clone();
                self.move_entries(&new_name, &old_name);

                format!("Renamed back to: {}", old_name)
            }
        };

        info!("{}", message);
        self.save();
        Ok(message)
    }

    /// Set the duration given to new and reset projects
    pub fn set_default_duration(&mut self, hours: i64, minutes: i64) -> Result<(), StateError> {
        self.default_duration = duration_from_parts(hours, minutes)?;
        info!("Default duration set to {}s", self.default_duration);
        self.save();
        Ok(())
    }

    /// Replace the project list with names read from a text file (one per line).
    /// Returns the number of projects imported.
    pub fn import_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let projects = read_project_list(path.as_ref())?;
        if projects.is_empty() {
            return Err(StateError::EmptyImport.into());
        }

        self.install_projects(projects);
        self.current_index = 0;
        // Recorded indices refer to the list that was just replaced
        self.undo_stack.clear();

        info!(
            "Imported {} projects from {}",
            self.projects.len(),
            path.as_ref().display()
        );
        self.save();
        Ok(self.projects.len())
    }

    /// Write the project names to a text file, one per line
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.projects.is_empty() {
            return Err(StateError::NothingToExport.into());
        }
        write_project_list(path.as_ref(), &self.projects)?;
        info!(
            "Exported {} projects to {}",
            self.projects.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.projects.iter().any(|p| p == name)
    }

    fn check_index(&self, index: usize) -> Result<(), StateError> {
        if index < self.projects.len() {
            Ok(())
        } else {
            Err(StateError::IndexOutOfRange {
                index,
                len: self.projects.len(),
            })
        }
    }

    fn clamp_current_index(&mut self) {
        if self.projects.is_empty() {
            self.current_index = 0;
        } else if self.current_index >= self.projects.len() {
            self.current_index = self.projects.len() - 1;
        }
    }

    /// Replace the list wholesale; every project starts fresh
    fn install_projects(&mut self, projects: Vec<String>) {
        let mut seen = HashSet::new();
        self.projects = projects
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
        self.project_times = self
            .projects
            .iter()
            .map(|p| (p.clone(), self.default_duration))
            .collect();
        self.project_paused = self.projects.iter().map(|p| (p.clone(), false)).collect();
        self.clamp_current_index();
    }

    /// Re-key a project's time and pause entries
    fn move_entries(&mut self, from: &str, to: &str) {
        let secs = self.project_times.remove(from).unwrap_or(self.default_duration);
        let paused = self.project_paused.remove(from).unwrap_or(false);
        self.project_times.insert(to.to_string(), secs);
        self.project_paused.insert(to.to_string(), paused);
    }

    /// Pause the outgoing project and start the one at `index`
    fn hand_off(&mut self, index: usize) {
        if let Some(outgoing) = self.current_project().map(str::to_string) {
            self.project_paused.insert(outgoing, true);
        }
        self.current_index = index;
        if let Some(incoming) = self.current_project().map(str::to_string) {
            debug!("Switched to {}", incoming);
            self.project_paused.insert(incoming, false);
        }
        self.save();
    }
}
