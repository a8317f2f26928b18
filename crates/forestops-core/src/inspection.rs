use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Record, SortKey, StatusCycle};
use crate::priority::Priority;
use crate::validate::{self, FILL_ALL_FIELDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl InspectionStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            InspectionStatus::Scheduled => "Scheduled",
            InspectionStatus::InProgress => "In Progress",
            InspectionStatus::Completed => "Completed",
        }
    }
}

impl StatusCycle for InspectionStatus {
    const CYCLE: &'static [Self] = &[
        InspectionStatus::Scheduled,
        InspectionStatus::InProgress,
        InspectionStatus::Completed,
    ];

    fn label(&self) -> &'static str {
        self.display_name()
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub status: InspectionStatus,
    pub priority: Priority,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionSort {
    Date,
    Priority,
}

impl SortKey for InspectionSort {
    const ALL: &'static [Self] = &[InspectionSort::Date, InspectionSort::Priority];

    fn label(&self) -> &'static str {
        match self {
            InspectionSort::Date => "Date",
            InspectionSort::Priority => "Priority",
        }
    }
}

impl Record for Inspection {
    type Status = InspectionStatus;
    type Key = InspectionSort;

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

    fn compare(&self, other: &Self, key: InspectionSort) -> Ordering {
        match key {
            InspectionSort::Date => self.date.cmp(&other.date),
            InspectionSort::Priority => self.priority.rank().cmp(&other.priority.rank()),
        }
    }

    fn status(&self) -> Option<InspectionStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: InspectionStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInspection {
    pub title: String,
    pub date: String,
    pub priority: Priority,
    pub assigned_to: String,
}

impl Draft<Inspection> for NewInspection {
    fn build(self) -> Result<Inspection, ForestError> {
        let title = validate::required(&self.title, FILL_ALL_FIELDS)?;
        let date = validate::required(&self.date, FILL_ALL_FIELDS)?;
        let assigned_to = validate::required(&self.assigned_to, FILL_ALL_FIELDS)?;
        Ok(Inspection {
            id: String::new(),
            title,
            date: validate::parse_date(&date)?,
            status: InspectionStatus::Scheduled,
            priority: self.priority,
            assigned_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_inspections_are_scheduled() {
        let insp = NewInspection {
            title: "Canopy Survey".into(),
            date: "2023-10-02".into(),
            priority: Priority::Low,
            assigned_to: "Jane Smith".into(),
        }
        .build()
        .unwrap();
        assert_eq!(insp.status, InspectionStatus::Scheduled);
        assert_eq!(insp.priority, Priority::Low);
    }

    #[test]
    fn missing_assignee_rejected() {
        let err = NewInspection {
            title: "Canopy Survey".into(),
            date: "2023-10-02".into(),
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, ForestError::invalid(FILL_ALL_FIELDS));
    }

    #[test]
    fn status_cycle() {
        assert_eq!(InspectionStatus::Scheduled.next(), InspectionStatus::InProgress);
        assert_eq!(InspectionStatus::Completed.next(), InspectionStatus::Scheduled);
    }
}
