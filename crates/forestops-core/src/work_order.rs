use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Record, SortKey};
use crate::priority::Priority;
use crate::progress::Progress;
use crate::validate::{self, FILL_ALL_FIELDS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    pub status: Progress,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderSort {
    DueDate,
    Priority,
}

impl SortKey for WorkOrderSort {
    const ALL: &'static [Self] = &[WorkOrderSort::DueDate, WorkOrderSort::Priority];

    fn label(&self) -> &'static str {
        match self {
            WorkOrderSort::DueDate => "Due Date",
            WorkOrderSort::Priority => "Priority",
        }
    }
}

impl Record for WorkOrder {
    type Status = Progress;
    type Key = WorkOrderSort;

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

    fn compare(&self, other: &Self, key: WorkOrderSort) -> Ordering {
        match key {
            WorkOrderSort::DueDate => self.due_date.cmp(&other.due_date),
            WorkOrderSort::Priority => self.priority.rank().cmp(&other.priority.rank()),
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
pub struct NewWorkOrder {
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub assigned_to: String,
}

impl Draft<WorkOrder> for NewWorkOrder {
    fn build(self) -> Result<WorkOrder, ForestError> {
        let title = validate::required(&self.title, FILL_ALL_FIELDS)?;
        let due = validate::required(&self.due_date, FILL_ALL_FIELDS)?;
        let assigned_to = validate::required(&self.assigned_to, FILL_ALL_FIELDS)?;
        Ok(WorkOrder {
            id: String::new(),
            title,
            status: Progress::Pending,
            due_date: validate::parse_date(&due)?,
            priority: self.priority,
            assigned_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewWorkOrder {
        NewWorkOrder {
            title: "Trail Clearing".into(),
            due_date: "2023-07-01".into(),
            priority: Priority::High,
            assigned_to: "John Doe".into(),
        }
    }

    #[test]
    fn draft_builds_pending_order() {
        let wo = draft().build().unwrap();
        assert_eq!(wo.status, Progress::Pending);
        assert_eq!(wo.due_date, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let blanks: [fn(&mut NewWorkOrder); 3] = [
            |d| d.title.clear(),
            |d| d.due_date = "  ".into(),
            |d| d.assigned_to.clear(),
        ];
        for blank in blanks {
            let mut d = draft();
            blank(&mut d);
            assert_eq!(d.build(), Err(ForestError::invalid(FILL_ALL_FIELDS)));
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut d = draft();
        d.due_date = "next week".into();
        assert!(d.build().unwrap_err().is_validation());
    }

    #[test]
    fn detail_json_uses_camel_case() {
        let wo = draft().build().unwrap();
        let json = serde_json::to_string_pretty(&wo).unwrap();
        assert!(json.contains("\"dueDate\": \"2023-07-01\""));
        assert!(json.contains("\"status\": \"Pending\""));
    }
}
