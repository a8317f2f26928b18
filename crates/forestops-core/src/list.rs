//! The filter/sort projection shared by every list screen.
//!
//! A screen owns an ordered collection of records; what it displays is
//! `project(records, query)`, a fresh vector. The backing collection is never
//! reordered by a query.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;

use crate::error::ForestError;

/// A fixed, circular sequence of status values.
pub trait StatusCycle: Copy + PartialEq + fmt::Debug + 'static {
    const CYCLE: &'static [Self];

    fn label(&self) -> &'static str;

    /// The value after `self`, wrapping to the start.
    fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|s| *s == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }
}

/// Records without a status use `Infallible`: the filter is always `All`.
impl StatusCycle for Infallible {
    const CYCLE: &'static [Self] = &[];

    fn label(&self) -> &'static str {
        match *self {}
    }
}

pub trait SortKey: Copy + PartialEq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
}

pub trait Record: Clone {
    type Status: StatusCycle;
    type Key: SortKey;

    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);

    /// Human-facing name used in notices ("Deleted: ...").
    fn label(&self) -> &str;

    /// Fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    fn compare(&self, other: &Self, key: Self::Key) -> Ordering;

    fn status(&self) -> Option<Self::Status> {
        None
    }

    fn set_status(&mut self, _status: Self::Status) {}

    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Form input that turns into a record (without an id yet).
pub trait Draft<T> {
    fn build(self) -> Result<T, ForestError>;
}

/// A partial update. Implementations may reject the change; callers apply it
/// to a copy so a rejected patch leaves the stored record untouched.
pub trait Patch<T> {
    fn apply_to(&self, record: &mut T) -> Result<(), ForestError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: StatusCycle> StatusFilter<S> {
    pub fn admits(&self, status: Option<S>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(*wanted),
        }
    }

    /// All → first status → ... → last status → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => S::CYCLE
                .first()
                .map(|s| StatusFilter::Only(*s))
                .unwrap_or(StatusFilter::All),
            StatusFilter::Only(current) => {
                let idx = S::CYCLE.iter().position(|s| *s == current).unwrap_or(0);
                S::CYCLE
                    .get(idx + 1)
                    .map(|s| StatusFilter::Only(*s))
                    .unwrap_or(StatusFilter::All)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(s) => s.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S, K> {
    pub search: String,
    pub status: StatusFilter<S>,
    pub sort: Option<K>,
    pub direction: SortDirection,
}

impl<S, K> Default for ListQuery<S, K> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<S, K> ListQuery<S, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn only(mut self, status: S) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn sort_by(mut self, key: K) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }
}

/// Filter by search text and status, then stable-sort by the query's key.
pub fn project<T: Record>(records: &[T], query: &ListQuery<T::Status, T::Key>) -> Vec<T> {
    let needle = query.search.to_lowercase();
    let mut visible: Vec<T> = records
        .iter()
        .filter(|r| r.matches(&needle))
        .filter(|r| query.status.admits(r.status()))
        .cloned()
        .collect();

    if let Some(key) = query.sort {
        visible.sort_by(|a, b| query.direction.apply(a.compare(b, key)));
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Light {
        Red,
        Green,
    }

    impl StatusCycle for Light {
        const CYCLE: &'static [Self] = &[Light::Red, Light::Green];

        fn label(&self) -> &'static str {
            match self {
                Light::Red => "Red",
                Light::Green => "Green",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum ByName {
        Name,
    }

    impl SortKey for ByName {
        const ALL: &'static [Self] = &[ByName::Name];

        fn label(&self) -> &'static str {
            "Name"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
        light: Light,
    }

    impl Record for Item {
        type Status = Light;
        type Key = ByName;

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

        fn compare(&self, other: &Self, _key: ByName) -> Ordering {
            self.name.cmp(&other.name)
        }

        fn status(&self) -> Option<Light> {
            Some(self.light)
        }
    }

    fn item(id: &str, name: &str, light: Light) -> Item {
        Item {
            id: id.into(),
            name: name.into(),
            light,
        }
    }

    fn items() -> Vec<Item> {
        vec![
            item("1", "Cedar", Light::Red),
            item("2", "alder", Light::Green),
            item("3", "Birch", Light::Red),
        ]
    }

    #[test]
    fn empty_query_keeps_insertion_order() {
        let out = project(&items(), &ListQuery::new());
        let ids: Vec<_> = out.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let out = project(&items(), &ListQuery::new().search("ALD"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "alder");
    }

    #[test]
    fn search_is_not_trimmed() {
        assert!(project(&items(), &ListQuery::new().search("alder ")).is_empty());
        assert_eq!(project(&items(), &ListQuery::new().search(" ")).len(), 0);
    }

    #[test]
    fn status_filter_and_sort() {
        let q = ListQuery::new().only(Light::Red).sort_by(ByName::Name);
        let out = project(&items(), &q);
        let names: Vec<_> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Birch", "Cedar"]);

        let q = q.descending();
        let out = project(&items(), &q);
        let names: Vec<_> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cedar", "Birch"]);
    }

    #[test]
    fn projection_is_idempotent_and_does_not_mutate() {
        let records = items();
        let q = ListQuery::new().sort_by(ByName::Name);
        let first = project(&records, &q);
        let second = project(&records, &q);
        assert_eq!(first, second);
        assert_eq!(records, items());
    }

    #[test]
    fn status_cycle_wraps() {
        assert_eq!(Light::Red.next(), Light::Green);
        assert_eq!(Light::Green.next(), Light::Red);
    }

    #[test]
    fn filter_cycles_through_all() {
        let f: StatusFilter<Light> = StatusFilter::All;
        let f = f.next();
        assert_eq!(f, StatusFilter::Only(Light::Red));
        let f = f.next();
        assert_eq!(f, StatusFilter::Only(Light::Green));
        assert_eq!(f.next(), StatusFilter::All);
    }

    #[test]
    fn statusless_filter_stays_all() {
        let f: StatusFilter<Infallible> = StatusFilter::All;
        assert_eq!(f.next(), StatusFilter::All);
        assert!(f.admits(None));
    }
}
