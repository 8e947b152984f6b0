//! # Domain Traits
//!
//! Abstract interfaces for the chat gateway and list persistence.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::error::StoreError;
use crate::domain::types::{AddOutcome, RemoveOutcome};

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room, returning its event id
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Per-workspace list persistence.
///
/// Every method is a single atomic unit against the backing store. Lists are
/// ordered and may hold duplicate values. A list that had all of its items
/// removed still exists until `remove_list` is called.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Append `item`, creating the workspace and list if needed.
    async fn add_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<AddOutcome, StoreError>;

    /// Remove every occurrence of `item` from the list.
    async fn remove_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<RemoveOutcome, StoreError>;

    /// Remove the single occurrence at `index` if it still holds `expected`.
    /// If the position no longer matches, behaves like `remove_item(expected)`.
    async fn remove_at(
        &self,
        workspace: &str,
        list: &str,
        index: usize,
        expected: &str,
    ) -> Result<RemoveOutcome, StoreError>;

    /// Delete the list name entirely.
    async fn remove_list(&self, workspace: &str, list: &str) -> Result<RemoveOutcome, StoreError>;

    /// Items of the list in stored order, `None` if the list does not exist.
    async fn get_list(&self, workspace: &str, list: &str)
    -> Result<Option<Vec<String>>, StoreError>;

    /// Sorted list names of the workspace; empty if it has none.
    async fn list_names(&self, workspace: &str) -> Result<Vec<String>, StoreError>;

    /// Cheap round trip used by the liveness monitor.
    async fn ping(&self) -> Result<(), StoreError>;
}
