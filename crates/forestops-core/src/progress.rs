use std::fmt;

use serde::{Deserialize, Serialize};

use crate::list::StatusCycle;

/// Pending → In Progress → Completed → Pending. Shared by work orders, field
/// tasks and emergency tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Progress {
    pub const ALL: &[Progress] = &[Progress::Pending, Progress::InProgress, Progress::Completed];

    pub fn display_name(&self) -> &'static str {
        match self {
            Progress::Pending => "Pending",
            Progress::InProgress => "In Progress",
            Progress::Completed => "Completed",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.display_name() == s)
    }

    /// Natural order: Pending first.
    pub fn rank(&self) -> u8 {
        match self {
            Progress::Pending => 1,
            Progress::InProgress => 2,
            Progress::Completed => 3,
        }
    }

    /// Triage order used by emergency work: active tasks first.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Progress::InProgress => 1,
            Progress::Pending => 2,
            Progress::Completed => 3,
        }
    }
}

impl StatusCycle for Progress {
    const CYCLE: &'static [Self] = Progress::ALL;

    fn label(&self) -> &'static str {
        self.display_name()
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_returns_after_three_steps() {
        for start in Progress::ALL {
            let mut s = *start;
            for _ in 0..Progress::CYCLE.len() {
                s = s.next();
            }
            assert_eq!(s, *start);
        }
        assert_eq!(Progress::Completed.next(), Progress::Pending);
    }

    #[test]
    fn serializes_with_display_names() {
        let json = serde_json::to_string(&Progress::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        assert_eq!(Progress::parse_str("Completed"), Some(Progress::Completed));
    }
}
