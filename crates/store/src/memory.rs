use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Entry, EntryId, Pageable, Project, ProjectId, Result, StoreError,
    store::{EntryStore, ProjectStore},
};

/// Records of one table plus the last id handed out.
#[derive(Debug)]
struct Table<K, V> {
    records: BTreeMap<K, V>,
    last_id: i64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<K, V> Table<K, V> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory project store for tests and database-less runs.
///
/// Clones share the same records, like clones of a connection pool.
#[derive(Clone, Default)]
pub struct InMemoryProjectStore {
    table: Arc<RwLock<Table<ProjectId, Project>>>,
}

impl InMemoryProjectStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored projects.
    pub async fn project_count(&self) -> usize {
        self.table.read().await.records.len()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn save(&self, project: Project) -> Result<Project> {
        let mut table = self.table.write().await;

        let id = match project.id {
            Some(id) => {
                if !table.records.contains_key(&id) {
                    return Err(StoreError::RecordNotFound {
                        table: "project",
                        id: id.as_i64(),
                    });
                }
                id
            }
            None => ProjectId::new(table.next_id()),
        };

        let stored = project.with_id(id);
        table.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>> {
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: ProjectId) -> Result<bool> {
        Ok(self.table.read().await.records.contains_key(&id))
    }

    async fn delete(&self, project: &Project) -> Result<()> {
        if let Some(id) = project.id {
            self.table.write().await.records.remove(&id);
        }
        Ok(())
    }

    async fn find_all(&self, pageable: Pageable) -> Result<Vec<Project>> {
        let table = self.table.read().await;
        Ok(pageable.apply(table.records.values().cloned()))
    }
}

/// In-memory entry store for tests and database-less runs.
#[derive(Clone, Default)]
pub struct InMemoryEntryStore {
    table: Arc<RwLock<Table<EntryId, Entry>>>,
}

impl InMemoryEntryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries across all projects.
    pub async fn entry_count(&self) -> usize {
        self.table.read().await.records.len()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn save(&self, entry: Entry) -> Result<Entry> {
        let mut table = self.table.write().await;

        let id = match entry.id {
            Some(id) => {
                if !table.records.contains_key(&id) {
                    return Err(StoreError::RecordNotFound {
                        table: "project_entry",
                        id: id.as_i64(),
                    });
                }
                id
            }
            None => EntryId::new(table.next_id()),
        };

        let stored = entry.with_id(id);
        table.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>> {
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    async fn find_by_id_and_project_id(
        &self,
        id: EntryId,
        project_id: ProjectId,
    ) -> Result<Option<Entry>> {
        let table = self.table.read().await;
        Ok(table
            .records
            .get(&id)
            .filter(|e| e.project_id == project_id)
            .cloned())
    }

    async fn exists_by_id(&self, id: EntryId) -> Result<bool> {
        Ok(self.table.read().await.records.contains_key(&id))
    }

    async fn delete(&self, entry: &Entry) -> Result<()> {
        if let Some(id) = entry.id {
            self.table.write().await.records.remove(&id);
        }
        Ok(())
    }

    async fn find_by_project_id(
        &self,
        project_id: ProjectId,
        pageable: Pageable,
    ) -> Result<Vec<Entry>> {
        let table = self.table.read().await;
        let entries = table
            .records
            .values()
            .filter(|e| e.project_id == project_id)
            .cloned();
        Ok(pageable.apply(entries))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(name: &str) -> Project {
        Project::new(name, date(2020, 8, 19), Some(date(2020, 9, 19)))
    }

    fn entry(project_id: ProjectId, day: u32) -> Entry {
        Entry::new(project_id, date(2020, 8, day), Decimal::new(150, 2), None)
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryProjectStore::new();

        let first = store.save(project("A")).await.unwrap();
        let second = store.save(project("B")).await.unwrap();

        assert_eq!(first.id, Some(ProjectId::new(1)));
        assert_eq!(second.id, Some(ProjectId::new(2)));
        assert_eq!(store.project_count().await, 2);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_record() {
        let store = InMemoryProjectStore::new();
        let saved = store.save(project("A")).await.unwrap();

        let mut renamed = saved.clone();
        renamed.name = "Renamed".to_string();
        store.save(renamed).await.unwrap();

        let found = store.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert_eq!(store.project_count().await, 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_fails() {
        let store = InMemoryProjectStore::new();

        let result = store.save(project("A").with_id(ProjectId::new(99))).await;

        assert!(matches!(
            result,
            Err(StoreError::RecordNotFound { table: "project", id: 99 })
        ));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryProjectStore::new();
        let saved = store.save(project("A")).await.unwrap();
        store.delete(&saved).await.unwrap();

        let next = store.save(project("B")).await.unwrap();

        assert_eq!(next.id, Some(ProjectId::new(2)));
        assert!(!store.exists_by_id(ProjectId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_pages_in_id_order() {
        let store = InMemoryProjectStore::new();
        for name in ["A", "B", "C", "D", "E"] {
            store.save(project(name)).await.unwrap();
        }

        let page = store.find_all(Pageable::of(1, 2)).await.unwrap();

        let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[tokio::test]
    async fn find_by_id_and_project_id_requires_matching_project() {
        let store = InMemoryEntryStore::new();
        let saved = store.save(entry(ProjectId::new(1), 20)).await.unwrap();
        let id = saved.id.unwrap();

        let same = store
            .find_by_id_and_project_id(id, ProjectId::new(1))
            .await
            .unwrap();
        let other = store
            .find_by_id_and_project_id(id, ProjectId::new(2))
            .await
            .unwrap();

        assert_eq!(same, Some(saved));
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn find_by_project_id_filters_then_pages() {
        let store = InMemoryEntryStore::new();
        for day in 1..=3 {
            store.save(entry(ProjectId::new(1), day)).await.unwrap();
            store.save(entry(ProjectId::new(2), day)).await.unwrap();
        }

        let all = store
            .find_by_project_id(ProjectId::new(1), Pageable::Unpaged)
            .await
            .unwrap();
        let first_page = store
            .find_by_project_id(ProjectId::new(1), Pageable::of(0, 2))
            .await
            .unwrap();

        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.project_id == ProjectId::new(1)));
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].date, date(2020, 8, 1));
    }

    #[tokio::test]
    async fn unknown_project_yields_empty_page() {
        let store = InMemoryEntryStore::new();

        let entries = store
            .find_by_project_id(ProjectId::new(42), Pageable::of(0, 10))
            .await
            .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn delete_entry_removes_only_that_entry() {
        let store = InMemoryEntryStore::new();
        let keep = store.save(entry(ProjectId::new(1), 1)).await.unwrap();
        let remove = store.save(entry(ProjectId::new(1), 2)).await.unwrap();

        store.delete(&remove).await.unwrap();

        assert_eq!(store.entry_count().await, 1);
        assert!(store.exists_by_id(keep.id.unwrap()).await.unwrap());
        assert!(store.find_by_id(remove.id.unwrap()).await.unwrap().is_none());
    }
}
