//! # Document Store
//!
//! `ListStore` over one typed `WorkspaceRecord` per workspace, held in memory and
//! optionally mirrored to a JSON file. All mutations go through a single async
//! mutex, so each one is atomic with respect to every other call on this store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::domain::error::StoreError;
use crate::domain::traits::ListStore;
use crate::domain::types::{AddOutcome, RemoveOutcome, WorkspaceRecord};

/// On-disk layout: workspace id -> record.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    workspaces: BTreeMap<String, WorkspaceRecord>,
}

pub struct DocumentStore {
    path: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl DocumentStore {
    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Opens (or starts) a JSON-backed store at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            "Opened list store at {} ({} workspaces)",
            path.display(),
            state.workspaces.len()
        );
        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
        })
    }

    /// Applies `apply` to the workspace record and persists it if anything changed.
    /// The in-memory state is only updated once the file write has completed, so a
    /// failed or abandoned write (the caller's deadline dropping this future) leaves
    /// the store exactly as it was.
    async fn mutate<T>(
        &self,
        workspace: &str,
        apply: impl FnOnce(&mut WorkspaceRecord) -> T,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.lock().await;
        let mut record = guard
            .workspaces
            .get(workspace)
            .cloned()
            .unwrap_or_else(|| WorkspaceRecord::new(workspace));

        let outcome = apply(&mut record);

        let changed = match guard.workspaces.get(workspace) {
            Some(existing) => existing != &record,
            None => !record.lists.is_empty(),
        };
        if !changed {
            return Ok(outcome);
        }

        if self.path.is_some() {
            let bytes = encode_with(&mut guard, workspace, &record)?;
            self.persist(bytes).await?;
        }
        guard.workspaces.insert(workspace.to_string(), record);
        Ok(outcome)
    }

    async fn persist(&self, bytes: Vec<u8>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

/// Serializes `state` as it would look with `record` committed, without
/// committing it. No await happens between the swap and the restore.
fn encode_with(
    state: &mut StoreState,
    workspace: &str,
    record: &WorkspaceRecord,
) -> Result<Vec<u8>, StoreError> {
    let previous = state
        .workspaces
        .insert(workspace.to_string(), record.clone());
    let encoded = serde_json::to_vec_pretty(&*state);
    match previous {
        Some(prev) => state.workspaces.insert(workspace.to_string(), prev),
        None => state.workspaces.remove(workspace),
    };
    Ok(encoded?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn decode(bytes: &[u8]) -> Result<StoreState, StoreError> {
    let state: StoreState = serde_json::from_slice(bytes)?;
    if let Some((key, record)) = state
        .workspaces
        .iter()
        .find(|(key, record)| **key != record.workspace)
    {
        return Err(StoreError::Corrupt(format!(
            "record under `{key}` claims workspace `{}`",
            record.workspace
        )));
    }
    Ok(state)
}

fn remove_all(items: &mut Vec<String>, item: &str) -> RemoveOutcome {
    let before = items.len();
    items.retain(|existing| existing != item);
    if items.len() < before {
        RemoveOutcome::Removed
    } else {
        RemoveOutcome::NotFound
    }
}

#[async_trait]
impl ListStore for DocumentStore {
    async fn add_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<AddOutcome, StoreError> {
        self.mutate(workspace, |record| match record.lists.get_mut(list) {
            Some(items) => {
                items.push(item.to_string());
                AddOutcome::Added
            }
            None => {
                record.lists.insert(list.to_string(), vec![item.to_string()]);
                AddOutcome::Created
            }
        })
        .await
    }

    async fn remove_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        self.mutate(workspace, |record| match record.lists.get_mut(list) {
            Some(items) => remove_all(items, item),
            None => RemoveOutcome::NotFound,
        })
        .await
    }

    async fn remove_at(
        &self,
        workspace: &str,
        list: &str,
        index: usize,
        expected: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        self.mutate(workspace, |record| {
            let Some(items) = record.lists.get_mut(list) else {
                return RemoveOutcome::NotFound;
            };
            if items.get(index).is_some_and(|current| current == expected) {
                items.remove(index);
                RemoveOutcome::Removed
            } else {
                remove_all(items, expected)
            }
        })
        .await
    }

    async fn remove_list(&self, workspace: &str, list: &str) -> Result<RemoveOutcome, StoreError> {
        self.mutate(workspace, |record| match record.lists.remove(list) {
            Some(_) => RemoveOutcome::Removed,
            None => RemoveOutcome::NotFound,
        })
        .await
    }

    async fn get_list(
        &self,
        workspace: &str,
        list: &str,
    ) -> Result<Option<Vec<String>>, StoreError> {
        let guard = self.state.lock().await;
        Ok(guard
            .workspaces
            .get(workspace)
            .and_then(|record| record.lists.get(list))
            .cloned())
    }

    async fn list_names(&self, workspace: &str) -> Result<Vec<String>, StoreError> {
        let guard = self.state.lock().await;
        Ok(guard
            .workspaces
            .get(workspace)
            .map(|record| record.lists.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if let Some(parent) = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::metadata(parent).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::Deadline;
    use std::sync::Arc;
    use std::time::Duration;

    const WS: &str = "!room:example.org";

    #[tokio::test]
    async fn test_add_creates_then_appends() {
        let store = DocumentStore::in_memory();
        assert_eq!(store.add_item(WS, "chores", "dishes").await.unwrap(), AddOutcome::Created);
        assert_eq!(store.add_item(WS, "chores", "laundry").await.unwrap(), AddOutcome::Added);
        assert_eq!(
            store.get_list(WS, "chores").await.unwrap(),
            Some(vec!["dishes".to_string(), "laundry".to_string()])
        );
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let store = DocumentStore::in_memory();
        store.add_item(WS, "l", "x").await.unwrap();
        store.add_item(WS, "l", "x").await.unwrap();
        assert_eq!(store.get_list(WS, "l").await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_item_removes_every_occurrence() {
        let store = DocumentStore::in_memory();
        for item in ["a", "b", "a", "c", "a"] {
            store.add_item(WS, "l", item).await.unwrap();
        }
        assert_eq!(store.remove_item(WS, "l", "a").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(
            store.get_list(WS, "l").await.unwrap(),
            Some(vec!["b".to_string(), "c".to_string()])
        );
    }

    #[tokio::test]
    async fn test_remove_missing_item_leaves_list_alone() {
        let store = DocumentStore::in_memory();
        store.add_item(WS, "l", "a").await.unwrap();
        assert_eq!(store.remove_item(WS, "l", "zzz").await.unwrap(), RemoveOutcome::NotFound);
        assert_eq!(store.remove_item(WS, "nope", "a").await.unwrap(), RemoveOutcome::NotFound);
        assert_eq!(store.get_list(WS, "l").await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_emptied_list_still_exists() {
        let store = DocumentStore::in_memory();
        store.add_item(WS, "l", "a").await.unwrap();
        store.remove_item(WS, "l", "a").await.unwrap();
        assert_eq!(store.get_list(WS, "l").await.unwrap(), Some(vec![]));
        assert_eq!(store.list_names(WS).await.unwrap(), vec!["l".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_list_deletes_name() {
        let store = DocumentStore::in_memory();
        store.add_item(WS, "l", "a").await.unwrap();
        assert_eq!(store.remove_list(WS, "l").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.get_list(WS, "l").await.unwrap(), None);
        assert_eq!(store.remove_list(WS, "l").await.unwrap(), RemoveOutcome::NotFound);
        assert!(store.list_names(WS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_workspace_reads_as_absent() {
        let store = DocumentStore::in_memory();
        assert_eq!(store.get_list("never", "l").await.unwrap(), None);
        assert!(store.list_names("never").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workspaces_are_isolated() {
        let store = DocumentStore::in_memory();
        store.add_item("a", "l", "x").await.unwrap();
        assert_eq!(store.get_list("b", "l").await.unwrap(), None);
        assert_eq!(store.add_item("b", "l", "y").await.unwrap(), AddOutcome::Created);
    }

    #[tokio::test]
    async fn test_remove_at_takes_only_that_position() {
        let store = DocumentStore::in_memory();
        for item in ["x", "y", "x"] {
            store.add_item(WS, "l", item).await.unwrap();
        }
        assert_eq!(store.remove_at(WS, "l", 2, "x").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(
            store.get_list(WS, "l").await.unwrap(),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[tokio::test]
    async fn test_remove_at_falls_back_to_value_when_shifted() {
        let store = DocumentStore::in_memory();
        for item in ["x", "y", "x"] {
            store.add_item(WS, "l", item).await.unwrap();
        }
        assert_eq!(store.remove_at(WS, "l", 1, "x").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.get_list(WS, "l").await.unwrap(), Some(vec!["y".to_string()]));
        assert_eq!(store.remove_at(WS, "l", 9, "q").await.unwrap(), RemoveOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_concurrent_adds_lose_nothing() {
        let store = std::sync::Arc::new(DocumentStore::in_memory());
        let mut handles = Vec::new();
        for n in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add_item(WS, "l", &n.to_string()).await
            }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == AddOutcome::Created {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.get_list(WS, "l").await.unwrap().unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("lists.json");

        let store = DocumentStore::open(&path).await.unwrap();
        store.add_item(WS, "prompts", "villain").await.unwrap();
        store.add_item(WS, "empty", "gone").await.unwrap();
        store.remove_item(WS, "empty", "gone").await.unwrap();
        drop(store);

        let reopened = DocumentStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_list(WS, "prompts").await.unwrap(),
            Some(vec!["villain".to_string()])
        );
        assert_eq!(reopened.get_list(WS, "empty").await.unwrap(), Some(vec![]));
        assert!(!tmp_path(&path).exists());
        reopened.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.json");
        std::fs::write(&path, r#"{"workspaces":{"a":{"workspace":"a","lists":{"l":[1,2]}}}}"#)
            .unwrap();
        assert!(matches!(
            DocumentStore::open(&path).await,
            Err(StoreError::Corrupt(_))
        ));

        std::fs::write(&path, r#"{"workspaces":{"a":{"workspace":"b","lists":{}}}}"#).unwrap();
        assert!(matches!(
            DocumentStore::open(&path).await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("lists.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let store = DocumentStore {
            path: Some(path),
            state: Mutex::new(StoreState::default()),
        };
        assert!(store.add_item(WS, "l", "a").await.is_err());
        assert_eq!(store.get_list(WS, "l").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_abandoned_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.json");
        let store = Arc::new(DocumentStore::open(&path).await.unwrap());
        store.add_item(WS, "kept", "a").await.unwrap();

        // A FIFO with no reader makes the temp-file write hang.
        let tmp = tmp_path(&path);
        let status = std::process::Command::new("mkfifo")
            .arg(&tmp)
            .status()
            .unwrap();
        assert!(status.success());

        let bounded = Deadline::new(store.clone(), Duration::from_millis(200));
        assert!(matches!(
            bounded.add_item(WS, "l", "x").await,
            Err(StoreError::Timeout { op: "add_item" })
        ));
        assert_eq!(store.get_list(WS, "l").await.unwrap(), None);
        assert_eq!(store.list_names(WS).await.unwrap(), vec!["kept".to_string()]);

        // Drain the FIFO so the blocked writer thread can finish.
        let mut reader = std::fs::File::open(&tmp).unwrap();
        let mut sink = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut sink).unwrap();
    }
}
