//! # Deadline Wrapper
//!
//! Bounds every call on an inner `ListStore` by a fixed timeout. Expiry is
//! reported as `StoreError::Timeout`; the inner future is dropped, there is no retry.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::StoreError;
use crate::domain::traits::ListStore;
use crate::domain::types::{AddOutcome, RemoveOutcome};

pub struct Deadline {
    inner: Arc<dyn ListStore>,
    limit: Duration,
}

impl Deadline {
    pub fn new(inner: Arc<dyn ListStore>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout { op }),
        }
    }
}

#[async_trait]
impl ListStore for Deadline {
    async fn add_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<AddOutcome, StoreError> {
        self.bounded("add_item", self.inner.add_item(workspace, list, item))
            .await
    }

    async fn remove_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        self.bounded("remove_item", self.inner.remove_item(workspace, list, item))
            .await
    }

    async fn remove_at(
        &self,
        workspace: &str,
        list: &str,
        index: usize,
        expected: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        self.bounded(
            "remove_at",
            self.inner.remove_at(workspace, list, index, expected),
        )
        .await
    }

    async fn remove_list(&self, workspace: &str, list: &str) -> Result<RemoveOutcome, StoreError> {
        self.bounded("remove_list", self.inner.remove_list(workspace, list))
            .await
    }

    async fn get_list(
        &self,
        workspace: &str,
        list: &str,
    ) -> Result<Option<Vec<String>>, StoreError> {
        self.bounded("get_list", self.inner.get_list(workspace, list))
            .await
    }

    async fn list_names(&self, workspace: &str) -> Result<Vec<String>, StoreError> {
        self.bounded("list_names", self.inner.list_names(workspace))
            .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping", self.inner.ping()).await
    }
}
