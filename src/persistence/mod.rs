pub mod files;
pub mod snapshot;
pub mod transfer;

pub use files::{bundled_defaults_file, user_state_file};
pub use snapshot::{load_snapshot, save_snapshot, StateSnapshot, DEFAULT_DURATION_SECS};
pub use transfer::{read_project_list, write_project_list};
