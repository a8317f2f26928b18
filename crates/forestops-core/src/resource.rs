use std::cmp::Ordering;
use std::convert::Infallible;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Patch, Record, SortKey};
use crate::validate::{self, FILL_ALL_FIELDS};

pub const INVALID_TOTAL: &str = "Please enter a valid positive number for total resources.";
pub const INVALID_AVAILABLE: &str = "Please enter a valid number within the total range.";

/// Deployable equipment or personnel held at one location.
///
/// `available` never exceeds `total`; every constructor and patch in this
/// module keeps that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub available: u32,
    pub total: u32,
    pub location: String,
}

impl Resource {
    /// Simulated consumption: each tick takes zero or one unit, never below zero.
    pub fn drain<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let used = rng.gen_range(0..=1);
        self.available = self.available.saturating_sub(used);
    }

    pub fn usage_history(&self) -> &'static [UsageEntry] {
        USAGE_HISTORY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageAction {
    Deployed,
    Returned,
    Maintenance,
}

impl UsageAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            UsageAction::Deployed => "Deployed",
            UsageAction::Returned => "Returned",
            UsageAction::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageEntry {
    pub date: (i32, u32, u32),
    pub action: UsageAction,
    pub quantity: u32,
}

impl UsageEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.date;
        NaiveDate::from_ymd_opt(y, m, d)
    }
}

const USAGE_HISTORY: &[UsageEntry] = &[
    UsageEntry {
        date: (2023, 6, 20),
        action: UsageAction::Deployed,
        quantity: 2,
    },
    UsageEntry {
        date: (2023, 6, 19),
        action: UsageAction::Returned,
        quantity: 1,
    },
    UsageEntry {
        date: (2023, 6, 18),
        action: UsageAction::Maintenance,
        quantity: 1,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSort {
    Name,
    Available,
}

impl SortKey for ResourceSort {
    const ALL: &'static [Self] = &[ResourceSort::Name, ResourceSort::Available];

    fn label(&self) -> &'static str {
        match self {
            ResourceSort::Name => "Name",
            ResourceSort::Available => "Available",
        }
    }
}

impl Record for Resource {
    type Status = Infallible;
    type Key = ResourceSort;

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
        vec![&self.name, &self.location]
    }

    fn compare(&self, other: &Self, key: ResourceSort) -> Ordering {
        match key {
            ResourceSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            ResourceSort::Available => self.available.cmp(&other.available),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub total: String,
    pub location: String,
}

impl Draft<Resource> for NewResource {
    fn build(self) -> Result<Resource, ForestError> {
        let name = validate::required(&self.name, FILL_ALL_FIELDS)?;
        let total = validate::required(&self.total, FILL_ALL_FIELDS)?;
        let location = validate::required(&self.location, FILL_ALL_FIELDS)?;
        let total: u32 = match total.parse() {
            Ok(n) if n > 0 => n,
            _ => return Err(ForestError::invalid(INVALID_TOTAL)),
        };
        Ok(Resource {
            id: String::new(),
            name,
            available: total,
            total,
            location,
        })
    }
}

/// New `available` count, entered as text in the inline editor.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAvailable(pub String);

impl Patch<Resource> for SetAvailable {
    fn apply_to(&self, resource: &mut Resource) -> Result<(), ForestError> {
        match self.0.trim().parse::<u32>() {
            Ok(n) if n <= resource.total => {
                resource.available = n;
                Ok(())
            }
            _ => Err(ForestError::invalid(INVALID_AVAILABLE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn trucks() -> Resource {
        Resource {
            id: "1".into(),
            name: "Fire Trucks".into(),
            available: 5,
            total: 8,
            location: "Station A".into(),
        }
    }

    #[test]
    fn available_is_bounded_by_total() {
        let mut r = trucks();
        SetAvailable("8".into()).apply_to(&mut r).unwrap();
        assert_eq!(r.available, 8);

        let mut r = trucks();
        assert_eq!(
            SetAvailable("9".into()).apply_to(&mut r),
            Err(ForestError::invalid(INVALID_AVAILABLE))
        );
        assert_eq!(r, trucks());
        assert!(SetAvailable("-1".into()).apply_to(&mut r).is_err());
        assert!(SetAvailable("many".into()).apply_to(&mut r).is_err());
    }

    #[test]
    fn new_resource_starts_fully_available() {
        let r = NewResource {
            name: "Chainsaws".into(),
            total: "12".into(),
            location: "Depot".into(),
        }
        .build()
        .unwrap();
        assert_eq!((r.available, r.total), (12, 12));
    }

    #[test]
    fn total_must_be_positive_integer() {
        for total in ["0", "-3", "2.5", "ten"] {
            let err = NewResource {
                name: "Chainsaws".into(),
                total: total.into(),
                location: "Depot".into(),
            }
            .build();
            assert_eq!(err, Err(ForestError::invalid(INVALID_TOTAL)), "{total}");
        }
    }

    #[test]
    fn drain_never_goes_negative() {
        let mut r = trucks();
        r.available = 0;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            r.drain(&mut rng);
        }
        assert_eq!(r.available, 0);
    }

    #[test]
    fn drain_takes_at_most_one() {
        let mut r = trucks();
        let mut rng = rand::thread_rng();
        r.drain(&mut rng);
        assert!(r.available == 4 || r.available == 5);
    }

    #[test]
    fn history_is_fixed() {
        let h = trucks().usage_history();
        assert_eq!(h.len(), 3);
        assert_eq!(h[0].action, UsageAction::Deployed);
        assert_eq!(h[0].quantity, 2);
        assert_eq!(h[2].date().unwrap().to_string(), "2023-06-18");
    }
}
