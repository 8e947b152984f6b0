//! # Domain Types
//!
//! Outcomes returned by list operations, plus the typed workspace record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::StoreError;

/// Result of appending one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended to a list that already existed.
    Added,
    /// The list did not exist; it was created by this append.
    Created,
}

/// Result of a removal (item or whole list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Per-item result of a multi-item command.
#[derive(Debug)]
pub struct ItemReport<T> {
    pub item: String,
    pub result: Result<T, StoreError>,
}

/// What a pick produced.
#[derive(Debug)]
pub enum PickOutcome {
    Picked {
        item: String,
        /// Present only when removal was requested.
        removal: Option<Result<RemoveOutcome, StoreError>>,
    },
    EmptyList,
    NotFound,
}

/// Persisted shape of one workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub workspace: String,
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<String>>,
}

impl WorkspaceRecord {
    pub fn new(workspace: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            lists: BTreeMap::new(),
        }
    }
}
