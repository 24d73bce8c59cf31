//! # Record Store
//!
//! [`RecordStore`] is the in-memory collection every desk works against. It is
//! generic over [`Record`], which tells the store three things about a type:
//! its key, the values that must stay unique, and how to apply a field-level
//! update.
//!
//! ## Guarantees
//!
//! - **Uniqueness**: `create` and `update` reject any value that collides with
//!   another record's value for the same field. A record never collides with
//!   itself, so re-saving a field with its current value is allowed.
//! - **Atomicity**: `update` applies the change to a copy and commits only when
//!   the copy passes the uniqueness check. A rejected operation leaves the
//!   store exactly as it was.
//! - **Ordering**: [`StoreOrder::ByKey`] stores re-sort after every mutation;
//!   [`StoreOrder::Insertion`] stores keep insertion order.
//! - **Undo**: `delete` hands back a [`Removed`] record together with the
//!   position it held; passing it to `restore` puts it back in that position.
//!
//! ## Persistence
//!
//! The store knows nothing about files. [`crate::persist`] loads records into a store
//! at startup and writes [`RecordStore::records`] back on save.

use crate::error::{RegdeskError, Result};
use std::fmt::{Debug, Display};
use tracing::{debug, warn};

/// A persisted business entity the store can manage.
pub trait Record: Clone + Debug {
    type Key: Clone + Ord + Display + Debug;
    type Field: Copy + Eq + Display + Debug;

    /// Human name used in messages ("student", "customer", ...).
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    /// Values that must be unique across the store, tagged by field.
    fn unique_values(&self) -> Vec<(Self::Field, String)>;

    /// Applies a single field change. Implementations recompute any derived
    /// values that depend on `field`.
    fn set_field(&mut self, field: Self::Field, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrder {
    Insertion,
    ByKey,
}

/// A record taken out of a store and the position it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<R> {
    pub position: usize,
    pub record: R,
}

#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    order: StoreOrder,
}

impl<R: Record> RecordStore<R> {
    pub fn new(order: StoreOrder) -> Self {
        Self {
            records: Vec::new(),
            order,
        }
    }

    /// Builds a store from loaded records. Records that collide with one
    /// already accepted are dropped and logged.
    pub fn from_records(records: Vec<R>, order: StoreOrder) -> Self {
        let mut store = Self::new(order);
        for record in records {
            let key = record.key();
            if let Err(e) = store.create(record) {
                warn!(kind = R::KIND, %key, error = %e, "dropping loaded record");
            }
        }
        store
    }

    pub fn create(&mut self, record: R) -> Result<&R> {
        if let Some((field, value)) = self.find_collision(&record, None) {
            return Err(RegdeskError::duplicate(field, value));
        }
        let key = record.key();
        debug!(kind = R::KIND, %key, "creating record");
        self.records.push(record);
        self.reorder();
        self.retrieve(&key)
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.records.iter().find(|r| r.key() == *key)
    }

    pub fn retrieve(&self, key: &R::Key) -> Result<&R> {
        self.get(key)
            .ok_or_else(|| RegdeskError::not_found(R::KIND, key))
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.get(key).is_some()
    }

    /// Records matching `predicate`, in store order.
    pub fn retrieve_where<P>(&self, predicate: P) -> Vec<&R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Changes one field of the record at `key`, returning the previous
    /// version of the record.
    pub fn update(&mut self, key: &R::Key, field: R::Field, value: &str) -> Result<R> {
        let pos = self.position(key)?;
        let mut candidate = self.records[pos].clone();
        candidate.set_field(field, value)?;

        if let Some((field, value)) = self.find_collision(&candidate, Some(key)) {
            return Err(RegdeskError::duplicate(field, value));
        }

        debug!(kind = R::KIND, %key, %field, "updating record");
        let previous = std::mem::replace(&mut self.records[pos], candidate);
        self.reorder();
        Ok(previous)
    }

    pub fn delete(&mut self, key: &R::Key) -> Result<Removed<R>> {
        let position = self.position(key)?;
        debug!(kind = R::KIND, %key, position, "deleting record");
        Ok(Removed {
            position,
            record: self.records.remove(position),
        })
    }

    /// Puts a deleted record back where it was. Uniqueness is checked as for
    /// `create`; a position past the end appends.
    pub fn restore(&mut self, removed: Removed<R>) -> Result<&R> {
        let Removed { position, record } = removed;
        if let Some((field, value)) = self.find_collision(&record, None) {
            return Err(RegdeskError::duplicate(field, value));
        }
        let key = record.key();
        debug!(kind = R::KIND, %key, position, "restoring record");
        let position = position.min(self.records.len());
        self.records.insert(position, record);
        self.reorder();
        self.retrieve(&key)
    }

    /// Whether `value` is free for `field`, ignoring the record at `except`.
    pub fn is_unique(&self, field: R::Field, value: &str, except: Option<&R::Key>) -> bool {
        !self
            .records
            .iter()
            .filter(|r| except.map_or(true, |k| r.key() != *k))
            .any(|r| {
                r.unique_values()
                    .iter()
                    .any(|(f, v)| *f == field && v == value)
            })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, key: &R::Key) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.key() == *key)
            .ok_or_else(|| RegdeskError::not_found(R::KIND, key))
    }

    fn find_collision(&self, candidate: &R, except: Option<&R::Key>) -> Option<(R::Field, String)> {
        candidate
            .unique_values()
            .into_iter()
            .find(|(field, value)| !self.is_unique(*field, value, except))
    }

    fn reorder(&mut self) {
        if self.order == StoreOrder::ByKey {
            self.records.sort_by_key(|r| r.key());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Registration, RegistrationField};

    fn reg(id: &str, email: &str, phone: &str) -> Registration {
        Registration::new(id, "An Nguyen", email, phone, "1")
    }

    fn sample_store() -> RecordStore<Registration> {
        let mut store = RecordStore::new(StoreOrder::ByKey);
        store
            .create(reg("SE000002", "b@fpt.edu.vn", "0201111111"))
            .unwrap();
        store
            .create(reg("SE000001", "a@fpt.edu.vn", "0202222222"))
            .unwrap();
        store
    }

    #[test]
    fn create_then_retrieve_returns_equal_record() {
        let mut store = RecordStore::new(StoreOrder::ByKey);
        let record = reg("SE123456", "an@fpt.edu.vn", "0321234567");
        store.create(record.clone()).unwrap();
        assert_eq!(store.retrieve(&"SE123456".to_string()).unwrap(), &record);
    }

    #[test]
    fn by_key_store_stays_sorted() {
        let store = sample_store();
        let ids: Vec<_> = store.records().iter().map(|r| r.student_id()).collect();
        assert_eq!(ids, vec!["SE000001", "SE000002"]);
    }

    #[test]
    fn insertion_store_keeps_insertion_order() {
        let mut store = RecordStore::new(StoreOrder::Insertion);
        store.create(reg("SE000002", "b@x.com", "0201111111")).unwrap();
        store.create(reg("SE000001", "a@x.com", "0202222222")).unwrap();
        let ids: Vec<_> = store.records().iter().map(|r| r.student_id()).collect();
        assert_eq!(ids, vec!["SE000002", "SE000001"]);
    }

    #[test]
    fn duplicate_on_any_unique_field_is_rejected() {
        let mut store = sample_store();

        let same_id = reg("SE000001", "new@fpt.edu.vn", "0209999999");
        let same_email = reg("SE000003", "a@fpt.edu.vn", "0209999999");
        let same_phone = reg("SE000003", "new@fpt.edu.vn", "0202222222");

        for candidate in [same_id, same_email, same_phone] {
            let err = store.create(candidate).unwrap_err();
            assert!(matches!(err, RegdeskError::DuplicateField { .. }));
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn retrieve_missing_is_not_found() {
        let store = sample_store();
        let err = store.retrieve(&"SE999999".to_string()).unwrap_err();
        assert!(matches!(err, RegdeskError::NotFound { .. }));
    }

    #[test]
    fn delete_then_restore_restores_contents() {
        let mut store = sample_store();
        let before = store.records().to_vec();

        let removed = store.delete(&"SE000001".to_string()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(removed.position, 0);

        store.restore(removed).unwrap();
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn restore_keeps_insertion_position() {
        let mut store = RecordStore::new(StoreOrder::Insertion);
        store.create(reg("SE000003", "c@x.com", "0203333333")).unwrap();
        store.create(reg("SE000001", "a@x.com", "0201111111")).unwrap();
        store.create(reg("SE000002", "b@x.com", "0202222222")).unwrap();
        let before = store.records().to_vec();

        for key in ["SE000003", "SE000001", "SE000002"] {
            let removed = store.delete(&key.to_string()).unwrap();
            store.restore(removed).unwrap();
            assert_eq!(store.records(), before.as_slice());
        }
    }

    #[test]
    fn restore_rejects_value_taken_since_delete() {
        let mut store = sample_store();
        let removed = store.delete(&"SE000001".to_string()).unwrap();
        store.create(reg("SE000009", "a@fpt.edu.vn", "0209999999")).unwrap();

        let err = store.restore(removed).unwrap_err();
        assert!(matches!(err, RegdeskError::DuplicateField { .. }));
        assert!(!store.contains(&"SE000001".to_string()));
    }

    #[test]
    fn restore_past_the_end_appends() {
        let mut store = RecordStore::new(StoreOrder::Insertion);
        store.create(reg("SE000002", "b@x.com", "0202222222")).unwrap();
        let removed = Removed {
            position: 7,
            record: reg("SE000001", "a@x.com", "0201111111"),
        };
        store.restore(removed).unwrap();
        let ids: Vec<_> = store.records().iter().map(|r| r.student_id()).collect();
        assert_eq!(ids, vec!["SE000002", "SE000001"]);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = sample_store();
        assert!(store.delete(&"SE999999".to_string()).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_rejects_collision_and_leaves_target_unchanged() {
        let mut store = sample_store();
        let key = "SE000002".to_string();
        let before = store.retrieve(&key).unwrap().clone();

        let err = store
            .update(&key, RegistrationField::Email, "a@fpt.edu.vn")
            .unwrap_err();
        assert!(matches!(err, RegdeskError::DuplicateField { .. }));
        assert_eq!(store.retrieve(&key).unwrap(), &before);
    }

    #[test]
    fn update_to_own_value_is_allowed() {
        let mut store = sample_store();
        let key = "SE000002".to_string();
        store
            .update(&key, RegistrationField::Phone, "0201111111")
            .unwrap();
    }

    #[test]
    fn update_returns_previous_version() {
        let mut store = sample_store();
        let key = "SE000001".to_string();
        let previous = store
            .update(&key, RegistrationField::Name, "Binh Tran")
            .unwrap();
        assert_eq!(previous.name(), "An Nguyen");
        assert_eq!(store.retrieve(&key).unwrap().name(), "Binh Tran");
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut store = sample_store();
        let err = store
            .update(&"SE999999".to_string(), RegistrationField::Name, "Binh")
            .unwrap_err();
        assert!(matches!(err, RegdeskError::NotFound { .. }));
    }

    #[test]
    fn retrieve_where_follows_store_order() {
        let store = sample_store();
        let hits = store.retrieve_where(|r| r.name() == "An Nguyen");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].student_id(), "SE000001");
    }

    #[test]
    fn from_records_drops_collisions() {
        let records = vec![
            reg("SE000001", "a@x.com", "0201111111"),
            reg("SE000001", "b@x.com", "0202222222"),
        ];
        let store = RecordStore::from_records(records, StoreOrder::ByKey);
        assert_eq!(store.len(), 1);
    }
}
