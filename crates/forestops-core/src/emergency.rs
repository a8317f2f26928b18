use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Patch, Record, SortKey};
use crate::priority::Priority;
use crate::progress::Progress;
use crate::validate::{self, FILL_ALL_FIELDS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyTask {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: Progress,
    pub estimated_time: String,
    pub location: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencySort {
    Priority,
    Status,
}

impl SortKey for EmergencySort {
    const ALL: &'static [Self] = &[EmergencySort::Priority, EmergencySort::Status];

    fn label(&self) -> &'static str {
        match self {
            EmergencySort::Priority => "Priority",
            EmergencySort::Status => "Status",
        }
    }
}

impl Record for EmergencyTask {
    type Status = Progress;
    type Key = EmergencySort;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.location, &self.assigned_to]
    }

    fn compare(&self, other: &Self, key: EmergencySort) -> Ordering {
        match key {
            EmergencySort::Priority => self.priority.rank().cmp(&other.priority.rank()),
            EmergencySort::Status => self.status.urgency_rank().cmp(&other.status.urgency_rank()),
        }
    }

    fn status(&self) -> Option<Progress> {
        Some(self.status)
    }

    fn set_status(&mut self, status: Progress) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEmergencyTask {
    pub title: String,
    pub priority: Priority,
    pub estimated_time: String,
    pub location: String,
    pub assigned_to: String,
}

impl Draft<EmergencyTask> for NewEmergencyTask {
    fn build(self) -> Result<EmergencyTask, ForestError> {
        Ok(EmergencyTask {
            id: String::new(),
            title: validate::required(&self.title, FILL_ALL_FIELDS)?,
            priority: self.priority,
            status: Progress::Pending,
            estimated_time: validate::required(&self.estimated_time, FILL_ALL_FIELDS)?,
            location: validate::required(&self.location, FILL_ALL_FIELDS)?,
            assigned_to: validate::required(&self.assigned_to, FILL_ALL_FIELDS)?,
        })
    }
}

/// Edits reachable from the task detail's quick actions.
#[derive(Debug, Clone, PartialEq)]
pub enum EmergencyAction {
    Complete,
    Escalate,
    CyclePriority,
    Reassign(String),
}

impl Patch<EmergencyTask> for EmergencyAction {
    fn apply_to(&self, task: &mut EmergencyTask) -> Result<(), ForestError> {
        match self {
            EmergencyAction::Complete => task.status = Progress::Completed,
            EmergencyAction::Escalate => task.priority = Priority::High,
            EmergencyAction::CyclePriority => task.priority = task.priority.escalated(),
            EmergencyAction::Reassign(team) => {
                task.assigned_to = validate::required(team, FILL_ALL_FIELDS)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{project, ListQuery};

    fn task(title: &str, location: &str, team: &str, status: Progress) -> EmergencyTask {
        let mut t = NewEmergencyTask {
            title: title.into(),
            priority: Priority::Medium,
            estimated_time: "1 hour".into(),
            location: location.into(),
            assigned_to: team.into(),
        }
        .build()
        .unwrap();
        t.status = status;
        t
    }

    #[test]
    fn search_spans_location_and_assignee() {
        let tasks = vec![
            task("Wildfire", "Sector A", "Team Alpha", Progress::Pending),
            task("Flood", "Sector B", "Team Beta", Progress::Pending),
        ];
        let by_team = project(&tasks, &ListQuery::new().search("beta"));
        assert_eq!(by_team.len(), 1);
        assert_eq!(by_team[0].title, "Flood");
        let by_place = project(&tasks, &ListQuery::new().search("sector a"));
        assert_eq!(by_place[0].title, "Wildfire");
    }

    #[test]
    fn status_sort_puts_active_first() {
        let tasks = vec![
            task("a", "x", "t", Progress::Completed),
            task("b", "x", "t", Progress::Pending),
            task("c", "x", "t", Progress::InProgress),
        ];
        let sorted = project(&tasks, &ListQuery::new().sort_by(EmergencySort::Status));
        let titles: Vec<_> = sorted.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn quick_actions() {
        let mut t = task("Storm", "Sector D", "Team Delta", Progress::Pending);
        EmergencyAction::Escalate.apply_to(&mut t).unwrap();
        assert_eq!(t.priority, Priority::High);
        EmergencyAction::Complete.apply_to(&mut t).unwrap();
        assert_eq!(t.status, Progress::Completed);
        EmergencyAction::Reassign("Team Omega".into())
            .apply_to(&mut t)
            .unwrap();
        assert_eq!(t.assigned_to, "Team Omega");
        assert!(EmergencyAction::Reassign(" ".into()).apply_to(&mut t).is_err());
    }

    #[test]
    fn estimated_time_required() {
        let err = NewEmergencyTask {
            title: "Rescue".into(),
            location: "Ridge".into(),
            assigned_to: "Team".into(),
            ..Default::default()
        }
        .build();
        assert_eq!(err, Err(ForestError::invalid(FILL_ALL_FIELDS)));
    }
}
