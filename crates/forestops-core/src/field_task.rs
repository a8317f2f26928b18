use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Patch, Record, SortKey};
use crate::priority::Priority;
use crate::progress::Progress;
use crate::validate::{self, FILL_ALL_FIELDS};

/// A unit of work on a field operative's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Progress,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTaskSort {
    Priority,
    Status,
}

impl SortKey for FieldTaskSort {
    const ALL: &'static [Self] = &[FieldTaskSort::Priority, FieldTaskSort::Status];

    fn label(&self) -> &'static str {
        match self {
            FieldTaskSort::Priority => "Priority",
            FieldTaskSort::Status => "Status",
        }
    }
}

impl Record for FieldTask {
    type Status = Progress;
    type Key = FieldTaskSort;

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
        vec![&self.title]
    }

    fn compare(&self, other: &Self, key: FieldTaskSort) -> Ordering {
        match key {
            FieldTaskSort::Priority => self.priority.rank().cmp(&other.priority.rank()),
            FieldTaskSort::Status => self.status.rank().cmp(&other.status.rank()),
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
pub struct NewFieldTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Draft<FieldTask> for NewFieldTask {
    fn build(self) -> Result<FieldTask, ForestError> {
        Ok(FieldTask {
            id: String::new(),
            title: validate::required(&self.title, FILL_ALL_FIELDS)?,
            description: validate::required(&self.description, FILL_ALL_FIELDS)?,
            status: Progress::Pending,
            priority: self.priority,
        })
    }
}

/// Edit from the task detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTaskEdit {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl FieldTaskEdit {
    pub fn from_task(task: &FieldTask) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
        }
    }
}

impl Patch<FieldTask> for FieldTaskEdit {
    fn apply_to(&self, task: &mut FieldTask) -> Result<(), ForestError> {
        task.title = validate::required(&self.title, FILL_ALL_FIELDS)?;
        task.description = validate::required(&self.description, FILL_ALL_FIELDS)?;
        task.priority = self.priority;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> FieldTask {
        NewFieldTask {
            title: "Mark Trail".into(),
            description: "Paint blazes".into(),
            priority: Priority::Low,
        }
        .build()
        .unwrap()
    }

    #[test]
    fn new_tasks_start_pending() {
        assert_eq!(task().status, Progress::Pending);
    }

    #[test]
    fn description_is_required() {
        let err = NewFieldTask {
            title: "Mark Trail".into(),
            ..Default::default()
        }
        .build();
        assert_eq!(err, Err(ForestError::invalid(FILL_ALL_FIELDS)));
    }

    #[test]
    fn edit_replaces_named_fields() {
        let mut t = task();
        let mut edit = FieldTaskEdit::from_task(&t);
        edit.priority = Priority::High;
        edit.title = "Mark North Trail".into();
        edit.apply_to(&mut t).unwrap();
        assert_eq!(t.title, "Mark North Trail");
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.description, "Paint blazes");
    }

    #[test]
    fn status_sort_uses_natural_order() {
        let mut a = task();
        let mut b = task();
        a.status = Progress::Completed;
        b.status = Progress::InProgress;
        assert_eq!(a.compare(&b, FieldTaskSort::Status), Ordering::Greater);
    }
}
