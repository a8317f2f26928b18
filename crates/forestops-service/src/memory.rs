use forestops_core::Record;

use crate::Repository;

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository<T> {
    records: Vec<T>,
}

impl<T> MemoryRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn all(&self) -> &[T] {
        &self.records
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    fn push(&mut self, record: T) {
        self.records.push(record);
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(idx))
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut T)) {
        self.records.iter_mut().for_each(f);
    }
}
