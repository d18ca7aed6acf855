pub mod enums;
pub mod error;
pub mod time;
pub mod undo;

pub use enums::{Direction, TickOutcome, TimerEndChoice};
pub use error::StateError;
pub use time::{duration_from_parts, format_duration, format_time, projected_finish};
pub use undo::{UndoAction, UndoStack};
