//! Append-only record log with lookup by identifier.

use std::collections::{HashMap, HashSet};

use garun_core::error::CoreError;
use tokio::sync::{RwLock, RwLockWriteGuard};

/// A stored record with a unique identifier.
pub trait Record: Clone + Send + Sync {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug)]
struct Inner<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

/// Insertion-ordered records. Records are never removed; they can be
/// updated in place by identifier.
#[derive(Debug)]
pub struct RecordLog<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> Default for RecordLog<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }
}

impl<T: Record> RecordLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Fails with `Conflict` if the identifier is taken.
    pub async fn append(&self, record: T) -> Result<T, CoreError> {
        let mut inner = self.inner.write().await;
        insert(&mut inner, record.clone())?;
        Ok(record)
    }

    /// Append several records atomically: either all are stored or none.
    pub async fn append_all(&self, records: Vec<T>) -> Result<Vec<T>, CoreError> {
        self.writer().await.push_all(records)
    }

    /// Hold the write lock across several steps.
    ///
    /// Callers that lock more than one log must always take them in the same
    /// order.
    pub async fn writer(&self) -> LogWriter<'_, T> {
        LogWriter {
            inner: self.inner.write().await,
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Option<T> {
        let inner = self.inner.read().await;
        inner.index.get(id).map(|&pos| inner.records[pos].clone())
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.records.clone()
    }

    /// Records matching `predicate`, in insertion order.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let inner = self.inner.read().await;
        inner
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Apply `update` to the record with `id` and return the updated copy.
    ///
    /// The closure works on a copy. If it changes the identifier the stored
    /// record is left as it was.
    pub async fn update_by_id(
        &self,
        id: &str,
        update: impl FnOnce(&mut T),
    ) -> Result<T, CoreError> {
        let mut inner = self.inner.write().await;
        let pos = *inner.index.get(id).ok_or_else(|| CoreError::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        })?;
        let mut record = inner.records[pos].clone();
        update(&mut record);
        if record.id() != id {
            return Err(CoreError::Internal(format!(
                "{} update changed its identifier",
                T::ENTITY
            )));
        }
        inner.records[pos] = record.clone();
        Ok(record)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Exclusive access to a [`RecordLog`] while the guard is alive.
pub struct LogWriter<'a, T> {
    inner: RwLockWriteGuard<'a, Inner<T>>,
}

impl<T: Record> LogWriter<'_, T> {
    /// Fails with `Conflict` if any identifier is already stored or repeats
    /// within `records`.
    pub fn check_vacant(&self, records: &[T]) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for record in records {
            if self.inner.index.contains_key(record.id()) || !seen.insert(record.id()) {
                return Err(duplicate::<T>(record.id()));
            }
        }
        Ok(())
    }

    /// Store every record, or none of them if an identifier clashes.
    pub fn push_all(&mut self, records: Vec<T>) -> Result<Vec<T>, CoreError> {
        self.check_vacant(&records)?;
        for record in &records {
            insert(&mut self.inner, record.clone())?;
        }
        Ok(records)
    }
}

fn insert<T: Record>(inner: &mut Inner<T>, record: T) -> Result<(), CoreError> {
    if inner.index.contains_key(record.id()) {
        return Err(duplicate::<T>(record.id()));
    }
    inner
        .index
        .insert(record.id().to_string(), inner.records.len());
    inner.records.push(record);
    Ok(())
}

fn duplicate<T: Record>(id: &str) -> CoreError {
    CoreError::Conflict(format!("{} with id {id} already exists", T::ENTITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        const ENTITY: &'static str = "Note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn append_and_lookup() {
        let log = RecordLog::new();
        log.append(note("a", "first")).await.unwrap();
        log.append(note("b", "second")).await.unwrap();

        assert_eq!(log.len().await, 2);
        assert_eq!(log.find_by_id("b").await, Some(note("b", "second")));
        assert_eq!(log.find_by_id("c").await, None);
        let ids: Vec<_> = log.list().await.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn duplicate_ids_conflict() {
        let log = RecordLog::new();
        log.append(note("a", "first")).await.unwrap();
        assert_matches!(log.append(note("a", "again")).await, Err(CoreError::Conflict(_)));

        let batch = vec![note("x", "1"), note("x", "2")];
        assert_matches!(log.append_all(batch).await, Err(CoreError::Conflict(_)));
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn update_in_place() {
        let log = RecordLog::new();
        log.append(note("a", "first")).await.unwrap();

        let updated = log
            .update_by_id("a", |n| n.text = "edited".into())
            .await
            .unwrap();
        assert_eq!(updated.text, "edited");
        assert_eq!(log.find_by_id("a").await.unwrap().text, "edited");

        assert_matches!(
            log.update_by_id("zz", |_| {}).await,
            Err(CoreError::NotFound { entity: "Note", .. })
        );
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let log = RecordLog::new();
        log.append(note("a", "first")).await.unwrap();

        let result = log
            .update_by_id("a", |n| {
                n.id = "b".into();
                n.text = "edited".into();
            })
            .await;
        assert_matches!(result, Err(CoreError::Internal(_)));

        assert_eq!(log.find_by_id("a").await, Some(note("a", "first")));
        assert_eq!(log.find_by_id("b").await, None);
        assert_eq!(log.list().await, vec![note("a", "first")]);
    }

    #[tokio::test]
    async fn writer_checks_before_storing() {
        let log = RecordLog::new();
        log.append(note("a", "first")).await.unwrap();

        let mut writer = log.writer().await;
        assert_matches!(
            writer.check_vacant(&[note("b", "1"), note("a", "2")]),
            Err(CoreError::Conflict(_))
        );
        writer.check_vacant(&[note("b", "1")]).unwrap();
        writer.push_all(vec![note("b", "1")]).unwrap();
        drop(writer);

        assert_eq!(log.len().await, 2);
    }

    #[tokio::test]
    async fn filter_keeps_order() {
        let log = RecordLog::new();
        log.append_all(vec![note("a", "x"), note("b", "y"), note("c", "x")])
            .await
            .unwrap();
        let xs: Vec<_> = log.filter(|n| n.text == "x").await;
        assert_eq!(xs, vec![note("a", "x"), note("c", "x")]);
    }
}
