use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::priority::Priority;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionKind {
    #[serde(rename = "Tree Health")]
    TreeHealth,
    #[serde(rename = "Pest Control")]
    PestControl,
    #[serde(rename = "Fire Hazard")]
    FireHazard,
    #[serde(rename = "Soil Quality")]
    SoilQuality,
}

impl InspectionKind {
    pub const ALL: &[InspectionKind] = &[
        InspectionKind::TreeHealth,
        InspectionKind::PestControl,
        InspectionKind::FireHazard,
        InspectionKind::SoilQuality,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            InspectionKind::TreeHealth => "Tree Health",
            InspectionKind::PestControl => "Pest Control",
            InspectionKind::FireHazard => "Fire Hazard",
            InspectionKind::SoilQuality => "Soil Quality",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.display_name() == s)
    }
}

impl fmt::Display for InspectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A submitted field inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub location: String,
    pub inspection_type: InspectionKind,
    pub notes: String,
    pub severity: Priority,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    pub location: String,
    pub kind: InspectionKind,
    pub notes: String,
    pub severity: Priority,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            location: String::new(),
            kind: InspectionKind::TreeHealth,
            notes: String::new(),
            severity: Priority::Low,
        }
    }
}

impl ReportForm {
    /// Location is the only required field; notes may be empty.
    pub fn submit(&self, at: DateTime<Utc>) -> Result<InspectionReport, ForestError> {
        Ok(InspectionReport {
            location: validate::required(&self.location, "Please enter a location")?,
            inspection_type: self.kind,
            notes: self.notes.trim().to_string(),
            severity: self.severity,
            submitted_at: at,
        })
    }
}
