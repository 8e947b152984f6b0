//! # List Manager
//!
//! Validated list operations over a `ListStore`. Multi-item commands are
//! processed in the given order, one store call per item; a failed item does
//! not stop the ones after it.

use std::sync::Arc;

use crate::domain::error::{ListError, StoreError, ValidationError};
use crate::domain::traits::ListStore;
use crate::domain::types::{AddOutcome, ItemReport, RemoveOutcome};

#[derive(Clone)]
pub struct ListManager {
    store: Arc<dyn ListStore>,
}

impl ListManager {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ListStore> {
        &self.store
    }

    /// Appends each item, creating the list on first write.
    pub async fn add_items(
        &self,
        workspace: &str,
        list: &str,
        items: &[String],
    ) -> Result<Vec<ItemReport<AddOutcome>>, ValidationError> {
        validate(list, items)?;

        let mut reports = Vec::with_capacity(items.len());
        for item in items {
            let result = self.store.add_item(workspace, list, item).await;
            if let Err(e) = &result {
                tracing::error!("Failed to add '{}' to {}/{}: {}", item, workspace, list, e);
            }
            reports.push(ItemReport {
                item: item.clone(),
                result,
            });
        }
        Ok(reports)
    }

    /// Removes every occurrence of each item value.
    pub async fn remove_items(
        &self,
        workspace: &str,
        list: &str,
        items: &[String],
    ) -> Result<Vec<ItemReport<RemoveOutcome>>, ValidationError> {
        validate(list, items)?;

        let mut reports = Vec::with_capacity(items.len());
        for item in items {
            let result = self.store.remove_item(workspace, list, item).await;
            if let Err(e) = &result {
                tracing::error!(
                    "Failed to remove '{}' from {}/{}: {}",
                    item,
                    workspace,
                    list,
                    e
                );
            }
            reports.push(ItemReport {
                item: item.clone(),
                result,
            });
        }
        Ok(reports)
    }

    pub async fn remove_list(&self, workspace: &str, list: &str) -> Result<RemoveOutcome, ListError> {
        require_list(list)?;
        self.store
            .remove_list(workspace, list)
            .await
            .inspect_err(|e| tracing::error!("Failed to remove list {}/{}: {}", workspace, list, e))
            .map_err(ListError::from)
    }

    /// `None` when the list does not exist, whether or not the workspace does.
    pub async fn get_list(
        &self,
        workspace: &str,
        list: &str,
    ) -> Result<Option<Vec<String>>, ListError> {
        require_list(list)?;
        self.store
            .get_list(workspace, list)
            .await
            .inspect_err(|e| tracing::error!("Failed to read list {}/{}: {}", workspace, list, e))
            .map_err(ListError::from)
    }

    pub async fn list_names(&self, workspace: &str) -> Result<Vec<String>, StoreError> {
        self.store
            .list_names(workspace)
            .await
            .inspect_err(|e| tracing::error!("Failed to read lists of {}: {}", workspace, e))
    }
}

fn require_list(list: &str) -> Result<(), ValidationError> {
    if list.is_empty() {
        return Err(ValidationError::MissingList);
    }
    Ok(())
}

fn validate(list: &str, items: &[String]) -> Result<(), ValidationError> {
    require_list(list)?;
    if items.is_empty() {
        return Err(ValidationError::MissingItems);
    }
    Ok(())
}
