//! Literal records each screen starts from when it is opened.

use chrono::NaiveDate;

use crate::data_file::DataFile;
use crate::emergency::EmergencyTask;
use crate::field_task::FieldTask;
use crate::inspection::{Inspection, InspectionStatus};
use crate::map::{Coordinate, MapMarker};
use crate::priority::Priority;
use crate::progress::Progress;
use crate::resource::Resource;
use crate::team::{TeamMember, TeamStatus};
use crate::user::{AccountStatus, UserAccount};
use crate::work_order::WorkOrder;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn work_orders() -> Vec<WorkOrder> {
    let row = |id: &str, title: &str, status, due, priority, who: &str| WorkOrder {
        id: id.into(),
        title: title.into(),
        status,
        due_date: due,
        priority,
        assigned_to: who.into(),
    };
    vec![
        row("1", "Tree Pruning", Progress::Pending, date(2023, 6, 15), Priority::High, "John Doe"),
        row("2", "Pest Control", Progress::InProgress, date(2023, 6, 20), Priority::Medium, "Jane Smith"),
        row("3", "Reforestation", Progress::Completed, date(2023, 6, 10), Priority::Low, "Mike Johnson"),
        row("4", "Soil Analysis", Progress::Pending, date(2023, 6, 25), Priority::High, "Sarah Williams"),
        row("5", "Fire Break Maintenance", Progress::InProgress, date(2023, 6, 18), Priority::Medium, "Chris Brown"),
    ]
}

pub fn inspections() -> Vec<Inspection> {
    let row = |id: &str, title: &str, on, status, priority, who: &str| Inspection {
        id: id.into(),
        title: title.into(),
        date: on,
        status,
        priority,
        assigned_to: who.into(),
    };
    vec![
        row("1", "Annual Tree Health Check", date(2023, 7, 15), InspectionStatus::Scheduled, Priority::High, "John Doe"),
        row("2", "Quarterly Soil Quality Assessment", date(2023, 8, 1), InspectionStatus::InProgress, Priority::Medium, "Jane Smith"),
        row("3", "Monthly Fire Risk Evaluation", date(2023, 6, 30), InspectionStatus::Completed, Priority::High, "Mike Johnson"),
        row("4", "Bi-annual Wildlife Population Survey", date(2023, 9, 15), InspectionStatus::Scheduled, Priority::Medium, "Sarah Williams"),
        row("5", "Annual Pest Control Inspection", date(2023, 7, 30), InspectionStatus::Scheduled, Priority::Low, "Chris Brown"),
    ]
}

pub fn field_tasks() -> Vec<FieldTask> {
    let row = |id: &str, title: &str, status, priority, description: &str| FieldTask {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        status,
        priority,
    };
    vec![
        row(
            "1",
            "Inspect Oak Trees in Sector A",
            Progress::Pending,
            Priority::High,
            "Conduct a thorough inspection of oak trees for signs of disease or pest infestation.",
        ),
        row(
            "2",
            "Collect Soil Samples from Sector B",
            Progress::InProgress,
            Priority::Medium,
            "Gather soil samples from various locations in Sector B for laboratory analysis.",
        ),
        row(
            "3",
            "Update GIS Data for New Plantings",
            Progress::Completed,
            Priority::Low,
            "Input data for newly planted trees into the GIS system, including species and location.",
        ),
        row(
            "4",
            "Assess Fire Risk in Sector C",
            Progress::Pending,
            Priority::High,
            "Evaluate current fire risk levels in Sector C and update the fire management plan accordingly.",
        ),
        row(
            "5",
            "Maintain Trail Markers",
            Progress::InProgress,
            Priority::Medium,
            "Check and replace damaged or faded trail markers throughout the forest.",
        ),
    ]
}

pub fn emergency_tasks() -> Vec<EmergencyTask> {
    let row = |id: &str, title: &str, priority, status, eta: &str, place: &str, team: &str| {
        EmergencyTask {
            id: id.into(),
            title: title.into(),
            priority,
            status,
            estimated_time: eta.into(),
            location: place.into(),
            assigned_to: team.into(),
        }
    };
    vec![
        row("1", "Wildfire Containment in Sector A", Priority::High, Progress::InProgress, "2 hours", "Sector A", "Team Alpha"),
        row("2", "Flood Risk Assessment in Sector B", Priority::Medium, Progress::Pending, "1 hour", "Sector B", "Team Beta"),
        row("3", "Landslide Evacuation in Sector C", Priority::High, Progress::Completed, "3 hours", "Sector C", "Team Gamma"),
        row("4", "Storm Damage Survey in Sector D", Priority::Low, Progress::Pending, "2 hours", "Sector D", "Team Delta"),
        row("5", "Wildlife Rescue Operation in Sector E", Priority::Medium, Progress::InProgress, "4 hours", "Sector E", "Team Epsilon"),
    ]
}

pub fn resources() -> Vec<Resource> {
    let row = |id: &str, name: &str, available, total, location: &str| Resource {
        id: id.into(),
        name: name.into(),
        available,
        total,
        location: location.into(),
    };
    vec![
        row("1", "Fire Trucks", 5, 8, "Station A"),
        row("2", "Ambulances", 3, 4, "Station B"),
        row("3", "Helicopters", 1, 2, "Helipad C"),
        row("4", "Emergency Personnel", 25, 30, "HQ"),
        row("5", "Water Pumps", 10, 15, "Warehouse D"),
    ]
}

pub fn team() -> Vec<TeamMember> {
    let row = |id: &str, name: &str, role: &str, status, skills: [&str; 2]| TeamMember {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        status,
        skills: skills.iter().map(|s| s.to_string()).collect(),
    };
    vec![
        row("1", "John Doe", "Field Operative", TeamStatus::Available, ["Tree Inspection", "Soil Analysis"]),
        row("2", "Jane Smith", "GIS Specialist", TeamStatus::OnTask, ["Mapping", "Data Analysis"]),
        row("3", "Mike Johnson", "Field Operative", TeamStatus::Available, ["Pest Control", "Fire Management"]),
        row("4", "Sarah Williams", "Emergency Response", TeamStatus::OnTask, ["First Aid", "Evacuation Planning"]),
        row("5", "Chris Brown", "Field Operative", TeamStatus::OnLeave, ["Reforestation", "Wildlife Management"]),
    ]
}

pub fn users() -> Vec<UserAccount> {
    let row = |id: &str, name: &str, role: &str, status| UserAccount {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        status,
    };
    vec![
        row("1", "John Doe", "Forestry Manager", AccountStatus::Active),
        row("2", "Jane Smith", "Field Operative", AccountStatus::Active),
        row("3", "Mike Johnson", "GIS Specialist", AccountStatus::Inactive),
        row("4", "Sarah Williams", "Emergency Response Coordinator", AccountStatus::Active),
        row("5", "Chris Brown", "Administrator", AccountStatus::Active),
    ]
}

pub fn data_files() -> Vec<DataFile> {
    let row = |id: &str, name: &str, kind: &str, size: &str, on| DataFile {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        size: size.into(),
        last_updated: on,
    };
    vec![
        row("1", "Tree Inventory", "CSV", "2.5 MB", date(2023, 6, 10)),
        row("2", "Soil Analysis Results", "PDF", "1.8 MB", date(2023, 6, 12)),
        row("3", "Wildlife Survey", "XLSX", "3.2 MB", date(2023, 6, 15)),
        row("4", "Fire Risk Map", "PNG", "5.1 MB", date(2023, 6, 18)),
        row("5", "Pest Control Report", "DOCX", "1.5 MB", date(2023, 6, 20)),
    ]
}

pub fn map_markers() -> Vec<MapMarker> {
    let row = |id: &str, title: &str, description: &str, lat, lon| MapMarker {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        coordinate: Coordinate::new(lat, lon),
    };
    vec![
        row("1", "Sector A", "Oak Tree Inspection", 37.78825, -122.4324),
        row("2", "Sector B", "Soil Sample Collection", 37.78925, -122.4344),
        row("3", "Sector C", "Fire Risk Assessment", 37.79025, -122.4364),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Record;

    fn ids_unique<T: Record>(records: &[T]) -> bool {
        let mut ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == records.len()
    }

    #[test]
    fn seeds_have_unique_ids() {
        assert!(ids_unique(&work_orders()));
        assert!(ids_unique(&inspections()));
        assert!(ids_unique(&field_tasks()));
        assert!(ids_unique(&emergency_tasks()));
        assert!(ids_unique(&resources()));
        assert!(ids_unique(&team()));
        assert!(ids_unique(&users()));
        assert!(ids_unique(&data_files()));
        assert!(ids_unique(&map_markers()));
    }

    #[test]
    fn seeded_resources_respect_capacity() {
        assert!(resources().iter().all(|r| r.available <= r.total));
    }

    #[test]
    fn seeded_dates_are_real() {
        assert!(work_orders().iter().all(|w| w.due_date.to_string().starts_with("2023-")));
        assert!(data_files().iter().all(|f| f.last_updated.to_string().starts_with("2023-06")));
    }
}
