use thiserror::Error;

/// Validation failures surfaced by `ProjectTimerState` operations.
///
/// None of these leave the state partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("project name cannot be empty")]
    EmptyName,
    #[error("a project named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("project is already named \"{0}\"")]
    SameName(String),
    #[error("no project at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("duration must be greater than zero")]
    NonPositiveDuration,
    #[error("no projects found in import file")]
    EmptyImport,
    #[error("no projects to export")]
    NothingToExport,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("cannot undo rename: project \"{0}\" no longer exists")]
    UndoTargetMissing(String),
    #[error("cannot move project {direction} from index {index}")]
    CannotMove { index: usize, direction: &'static str },
}
