/// Result of advancing the current project's countdown by one second
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// There are no projects to count down
    NoProject,
    /// The current project is paused, nothing changed
    Paused,
    /// One second was taken off the current project
    Counted { remaining: u64 },
    /// The current project was already at zero; the caller decides what happens next
    Ended { project: String },
}

/// What to do once the current project's timer has run out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEndChoice {
    /// Reset the project and keep counting it down
    Stay,
    /// Reset the project and hand over to the next one
    Advance,
}

impl TimerEndChoice {
    /// Parse a choice from user input like "stay" or "next"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "stay" | "s" | "no" | "n" => Some(Self::Stay),
            "advance" | "next" | "a" | "yes" | "y" => Some(Self::Advance),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Stay => "stay",
            Self::Advance => "advance",
        }
    }
}

/// Direction for reordering a project within the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Parse direction from "up"/"down"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
