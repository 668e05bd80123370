use super::RecordStore;
use crate::error::{DataTableError, Result};
use crate::model::{Record, RecordFields, RecordId};
use tracing::debug;

/// In-memory record storage. Does NOT persist data.
///
/// Records are kept in a `Vec` so insertion order is the natural order.
/// Ids come from a counter that only moves forward.
#[derive(Debug)]
pub struct InMemoryStore {
    records: Vec<Record>,
    next_id: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DataTableError::NotFound(id))
    }
}

impl RecordStore for InMemoryStore {
    fn create(&mut self, fields: RecordFields) -> Record {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        let record = Record::new(id, fields);
        self.records.push(record.clone());
        debug!(%id, name = %record.name, "record created");
        record
    }

    fn get(&self, id: RecordId) -> Result<Record> {
        let pos = self.position(id)?;
        Ok(self.records[pos].clone())
    }

    fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<Record> {
        let pos = self.position(id)?;
        let record = &mut self.records[pos];
        record.replace(fields);
        debug!(%id, "record updated");
        Ok(record.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<()> {
        let pos = self.position(id)?;
        self.records.remove(pos);
        debug!(%id, "record deleted");
        Ok(())
    }

    fn list(&self) -> Vec<Record> {
        self.records.clone()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::parse_date;

    pub fn fields(name: &str, date: &str, value: f64) -> RecordFields {
        let date = parse_date(date).expect("fixture date must be YYYY-MM-DD");
        RecordFields::new(name, date, value).expect("fixture fields must be valid")
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Bob (2024-01-05, 10) then Amy (2024-02-01, 5).
        pub fn with_bob_and_amy(self) -> Self {
            self.with_record("Bob", "2024-01-05", 10.0)
                .with_record("Amy", "2024-02-01", 5.0)
        }

        pub fn with_record(mut self, name: &str, date: &str, value: f64) -> Self {
            self.store.create(fields(name, date, value));
            self
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Record {}", i + 1);
                let date = format!("2024-01-{:02}", (i % 28) + 1);
                self.store.create(fields(&name, &date, i as f64));
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{fields, StoreFixture};
    use super::*;

    fn names(store: &InMemoryStore) -> Vec<String> {
        store.list().into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_create_appends_with_fresh_ids() {
        let mut store = InMemoryStore::new();
        let a = store.create(fields("Bob", "2024-01-05", 10.0));
        let b = store.create(fields("Amy", "2024-02-01", 5.0));

        assert_ne!(a.id, b.id);
        let listed = store.list();
        assert_eq!(listed, vec![a, b]);
        assert_eq!(listed[0].date_text(), "2024-01-05");
        assert_eq!(listed[0].value, 10.0);
    }

    #[test]
    fn test_ids_are_never_reused_after_delete() {
        let mut store = InMemoryStore::new();
        let a = store.create(fields("A", "2024-01-01", 1.0));
        store.delete(a.id).unwrap();
        let b = store.create(fields("B", "2024-01-01", 1.0));
        assert!(b.id > a.id);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = StoreFixture::new()
            .with_record("A", "2024-01-01", 1.0)
            .with_record("B", "2024-01-02", 2.0)
            .with_record("C", "2024-01-03", 3.0)
            .store;
        let target = store.list()[1].id;

        let updated = store
            .update(target, fields("Bee", "2023-12-31", 20.0))
            .unwrap();

        assert_eq!(updated.id, target);
        assert_eq!(names(&store), vec!["A", "Bee", "C"]);
        let listed = store.list();
        assert_eq!(listed[1].date_text(), "2023-12-31");
        assert_eq!(listed[1].value, 20.0);
        assert_eq!(listed[0].value, 1.0);
        assert_eq!(listed[2].value, 3.0);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = InMemoryStore::new();
        let err = store
            .update(RecordId(42), fields("A", "2024-01-01", 1.0))
            .unwrap_err();
        assert!(matches!(err, DataTableError::NotFound(RecordId(42))));
    }

    #[test]
    fn test_second_delete_is_not_found() {
        let mut store = StoreFixture::new().with_bob_and_amy().store;
        let bob = store.list()[0].id;

        store.delete(bob).unwrap();
        assert_eq!(names(&store), vec!["Amy"]);
        assert!(matches!(
            store.delete(bob),
            Err(DataTableError::NotFound(id)) if id == bob
        ));
        assert!(store.get(bob).is_err());
    }
}
