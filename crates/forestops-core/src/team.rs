use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Patch, Record, SortKey, StatusCycle};
use crate::validate::{self, FILL_REQUIRED_FIELDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamStatus {
    Available,
    #[serde(rename = "On Task")]
    OnTask,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl TeamStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            TeamStatus::Available => "Available",
            TeamStatus::OnTask => "On Task",
            TeamStatus::OnLeave => "On Leave",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            TeamStatus::Available => 1,
            TeamStatus::OnTask => 2,
            TeamStatus::OnLeave => 3,
        }
    }
}

impl StatusCycle for TeamStatus {
    const CYCLE: &'static [Self] = &[TeamStatus::Available, TeamStatus::OnTask, TeamStatus::OnLeave];

    fn label(&self) -> &'static str {
        self.display_name()
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: TeamStatus,
    pub skills: Vec<String>,
}

impl TeamMember {
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }
}

/// Comma-separated skills, trimmed, empties dropped.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// The team screen's role tabs. Roles are free text, so this matches exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    FieldOperative,
    GisSpecialist,
}

impl RoleFilter {
    pub fn label(&self) -> &'static str {
        match self {
            RoleFilter::All => "All",
            RoleFilter::FieldOperative => "Field Operative",
            RoleFilter::GisSpecialist => "GIS Specialist",
        }
    }

    pub fn admits(&self, member: &TeamMember) -> bool {
        match self {
            RoleFilter::All => true,
            _ => member.role == self.label(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            RoleFilter::All => RoleFilter::FieldOperative,
            RoleFilter::FieldOperative => RoleFilter::GisSpecialist,
            RoleFilter::GisSpecialist => RoleFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSort {
    Name,
    Status,
}

impl SortKey for TeamSort {
    const ALL: &'static [Self] = &[TeamSort::Name, TeamSort::Status];

    fn label(&self) -> &'static str {
        match self {
            TeamSort::Name => "Name",
            TeamSort::Status => "Status",
        }
    }
}

impl Record for TeamMember {
    type Status = TeamStatus;
    type Key = TeamSort;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn compare(&self, other: &Self, key: TeamSort) -> Ordering {
        match key {
            TeamSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            TeamSort::Status => self.status.rank().cmp(&other.status.rank()),
        }
    }

    fn status(&self) -> Option<TeamStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: TeamStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub skills: String,
}

impl Draft<TeamMember> for NewTeamMember {
    fn build(self) -> Result<TeamMember, ForestError> {
        Ok(TeamMember {
            id: String::new(),
            name: validate::required(&self.name, FILL_REQUIRED_FIELDS)?,
            role: validate::required(&self.role, FILL_REQUIRED_FIELDS)?,
            status: TeamStatus::Available,
            skills: parse_skills(&self.skills),
        })
    }
}

/// Set from the assign modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assign(pub TeamStatus);

impl Patch<TeamMember> for Assign {
    fn apply_to(&self, member: &mut TeamMember) -> Result<(), ForestError> {
        member.status = self.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(parse_skills("A, B,C"), vec!["A", "B", "C"]);
        assert_eq!(parse_skills(" , Mapping ,,"), vec!["Mapping"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn new_member_is_available() {
        let m = NewTeamMember {
            name: "Ana Ruiz".into(),
            role: "GIS Specialist".into(),
            skills: "Mapping, Drones".into(),
        }
        .build()
        .unwrap();
        assert_eq!(m.status, TeamStatus::Available);
        assert_eq!(m.skills_line(), "Mapping, Drones");
        assert!(RoleFilter::GisSpecialist.admits(&m));
        assert!(!RoleFilter::FieldOperative.admits(&m));
    }

    #[test]
    fn role_is_required_skills_are_not() {
        let err = NewTeamMember {
            name: "Ana Ruiz".into(),
            ..Default::default()
        }
        .build();
        assert_eq!(err, Err(ForestError::invalid(FILL_REQUIRED_FIELDS)));
    }

    #[test]
    fn role_filter_cycles() {
        let mut f = RoleFilter::All;
        for _ in 0..3 {
            f = f.next();
        }
        assert_eq!(f, RoleFilter::All);
    }
}
