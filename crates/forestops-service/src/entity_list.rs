use std::marker::PhantomData;

use forestops_core::list::StatusCycle;
use forestops_core::{project, Draft, ListQuery, Patch, Record};
use tracing::{debug, info};

use crate::{MemoryRepository, Repository, ServiceError};

/// The list/filter/sort/mutate operations every record screen shares.
///
/// Ids are handed out from a counter that starts above the largest numeric
/// seed id and only ever grows, so a new record never reuses the id of a
/// live or deleted one.
pub struct EntityList<T, R = MemoryRepository<T>> {
    kind: &'static str,
    repo: R,
    next_id: u64,
    _record: PhantomData<T>,
}

impl<T: Record> EntityList<T> {
    pub fn seeded(kind: &'static str, records: Vec<T>) -> Self {
        Self::with_repository(kind, MemoryRepository::new(records))
    }
}

impl<T: Record, R: Repository<T>> EntityList<T, R> {
    pub fn with_repository(kind: &'static str, repo: R) -> Self {
        let next_id = repo
            .all()
            .iter()
            .filter_map(|r| r.id().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            kind,
            repo,
            next_id,
            _record: PhantomData,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn records(&self) -> &[T] {
        self.repo.all()
    }

    pub fn len(&self) -> usize {
        self.repo.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.all().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.repo.get(id)
    }

    /// The visible projection for a query. Never touches the backing order.
    pub fn list(&self, query: &ListQuery<T::Status, T::Key>) -> Vec<T> {
        project(self.repo.all(), query)
    }

    /// Advance a record's status one step. Absent ids and records without
    /// a status are left alone and return `None`.
    pub fn cycle_status(&mut self, id: &str) -> Option<T::Status> {
        let record = self.repo.get_mut(id)?;
        let next = record.status()?.next();
        record.set_status(next);
        info!(kind = self.kind, id, status = next.label(), "status changed");
        Some(next)
    }

    pub fn add<D: Draft<T>>(&mut self, draft: D) -> Result<T, ServiceError> {
        let mut record = draft.build()?;
        record.assign_id(self.next_id.to_string());
        self.next_id += 1;
        info!(kind = self.kind, id = record.id(), label = record.label(), "record added");
        self.repo.push(record.clone());
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let removed = self.repo.remove(id);
        match &removed {
            Some(r) => info!(kind = self.kind, id, label = r.label(), "record removed"),
            None => debug!(kind = self.kind, id, "remove: no such record"),
        }
        removed
    }

    /// Apply a patch. A rejected patch leaves the stored record as it was.
    pub fn edit<P: Patch<T>>(&mut self, id: &str, patch: &P) -> Result<T, ServiceError> {
        let kind = self.kind;
        let stored = self
            .repo
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("{kind} {id}")))?;
        let mut updated = stored.clone();
        patch.apply_to(&mut updated)?;
        *stored = updated.clone();
        info!(kind, id, "record edited");
        Ok(updated)
    }

    /// Mutate every record in place, e.g. for a simulated refresh tick.
    pub fn update_each(&mut self, mut f: impl FnMut(&mut T)) {
        self.repo.for_each_mut(&mut f);
        debug!(kind = self.kind, count = self.len(), "bulk update");
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use forestops_core::list::{SortDirection, SortKey, StatusFilter};
    use forestops_core::priority::Priority;
    use forestops_core::progress::Progress;
    use forestops_core::resource::{NewResource, SetAvailable};
    use forestops_core::team::NewTeamMember;
    use forestops_core::work_order::{NewWorkOrder, WorkOrderSort};
    use forestops_core::{seed, Resource, WorkOrder};

    use super::*;

    fn orders() -> EntityList<WorkOrder> {
        EntityList::seeded("work order", seed::work_orders())
    }

    fn order_draft(title: &str, priority: Priority) -> NewWorkOrder {
        NewWorkOrder {
            title: title.into(),
            due_date: "2023-07-01".into(),
            priority,
            assigned_to: "Crew".into(),
        }
    }

    #[test]
    fn empty_search_sorted_returns_everything_in_key_order() {
        let list = orders();
        let query = ListQuery::new().sort_by(WorkOrderSort::DueDate);
        let out = list.list(&query);
        assert_eq!(out.len(), list.len());
        assert!(out.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        // backing order untouched
        assert_eq!(list.records()[0].title, "Tree Pruning");
    }

    fn assert_every_key_sorts<T: Record>(kind: &'static str, records: Vec<T>) {
        let list = EntityList::seeded(kind, records);
        for key in <T::Key as SortKey>::ALL {
            let out = list.list(&ListQuery::new().sort_by(*key));
            assert_eq!(out.len(), list.len(), "{kind} by {}", key.label());
            assert!(
                out.windows(2)
                    .all(|w| w[0].compare(&w[1], *key) != Ordering::Greater),
                "{kind} not ordered by {}",
                key.label()
            );
        }
    }

    #[test]
    fn every_sort_key_orders_every_seed_list() {
        assert_every_key_sorts("work order", seed::work_orders());
        assert_every_key_sorts("inspection", seed::inspections());
        assert_every_key_sorts("field task", seed::field_tasks());
        assert_every_key_sorts("emergency task", seed::emergency_tasks());
        assert_every_key_sorts("resource", seed::resources());
        assert_every_key_sorts("team member", seed::team());
        assert_every_key_sorts("user", seed::users());
        assert_every_key_sorts("data file", seed::data_files());
        assert_every_key_sorts("map marker", seed::map_markers());
    }

    #[test]
    fn trailing_space_in_search_is_significant() {
        let list = orders();
        assert!(list.list(&ListQuery::new().search("pruning ")).is_empty());
        assert_eq!(list.list(&ListQuery::new().search("pruning")).len(), 1);
    }

    #[test]
    fn pending_by_priority_is_high_medium_low() {
        let mut list = orders();
        list.add(order_draft("Trail Survey", Priority::Low)).unwrap();
        list.add(order_draft("Culvert Check", Priority::Medium)).unwrap();
        let query = ListQuery {
            search: String::new(),
            status: StatusFilter::Only(Progress::Pending),
            sort: Some(WorkOrderSort::Priority),
            direction: SortDirection::Ascending,
        };
        let out = list.list(&query);
        assert!(out.iter().all(|w| w.status == Progress::Pending));
        let priorities: Vec<_> = out.iter().map(|w| w.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::High, Priority::Medium, Priority::Low]
        );
        // ties keep insertion order
        assert_eq!(out[0].title, "Tree Pruning");
        assert_eq!(out[1].title, "Soil Analysis");
    }

    #[test]
    fn cycle_status_round_trips() {
        let mut list = orders();
        let before = list.get("2").unwrap().status;
        for _ in 0..Progress::CYCLE.len() {
            list.cycle_status("2");
        }
        assert_eq!(list.get("2").unwrap().status, before);
        assert_eq!(list.cycle_status("99"), None);
    }

    #[test]
    fn invalid_add_leaves_list_unchanged() {
        let mut list = orders();
        let err = list.add(order_draft("", Priority::High)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(list.len(), 5);

        let mut team = EntityList::seeded("team member", seed::team());
        assert!(team
            .add(NewTeamMember {
                name: "Ana".into(),
                role: " ".into(),
                skills: "Mapping".into(),
            })
            .is_err());
        assert_eq!(team.len(), 5);
    }

    #[test]
    fn ids_never_collide_after_delete() {
        let mut list = orders();
        let first = list.add(order_draft("A", Priority::Low)).unwrap();
        assert_eq!(first.id, "6");
        list.remove("3").unwrap();
        list.remove(&first.id).unwrap();
        let second = list.add(order_draft("B", Priority::Low)).unwrap();
        assert_eq!(second.id, "7");
        let ids: Vec<_> = list.records().iter().map(|r| r.id.clone()).collect();
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(ids.len(), dedup.len());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut list = orders();
        assert!(list.remove("42").is_none());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn resource_edit_is_bounded_and_atomic() {
        let mut list: EntityList<Resource> = EntityList::seeded("resource", seed::resources());
        let updated = list.edit("1", &SetAvailable("8".into())).unwrap();
        assert_eq!(updated.available, 8);

        let mut list: EntityList<Resource> = EntityList::seeded("resource", seed::resources());
        let err = list.edit("1", &SetAvailable("9".into())).unwrap_err();
        assert!(err.is_validation());
        let r = list.get("1").unwrap();
        assert_eq!((r.available, r.total), (5, 8));

        assert!(matches!(
            list.edit("77", &SetAvailable("1".into())),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn resources_have_no_status_to_cycle() {
        let mut list: EntityList<Resource> = EntityList::seeded("resource", seed::resources());
        assert_eq!(list.cycle_status("1"), None);
        let added = list
            .add(NewResource {
                name: "Drones".into(),
                total: "4".into(),
                location: "Hangar".into(),
            })
            .unwrap();
        assert_eq!(added.available, 4);
    }

    #[test]
    fn update_each_touches_every_record() {
        let mut list: EntityList<Resource> = EntityList::seeded("resource", seed::resources());
        list.update_each(|r| r.available = 0);
        assert!(list.records().iter().all(|r| r.available == 0));
    }
}
