//! # Pick Engine
//!
//! Uniform random selection from a list, optionally consuming the chosen item.
//!
//! Consumption removes the occurrence at the index that was drawn, provided it
//! still holds the chosen value when the removal runs. If a concurrent writer
//! shifted the list in between, the store falls back to removing the value the
//! same way `remove` does: every occurrence of it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::lists::ListManager;
use crate::domain::error::ListError;
use crate::domain::types::PickOutcome;

/// Source of indices for picking. Must return a value in `0..len` for `len > 0`.
pub trait IndexPicker: Send + Sync {
    fn pick_index(&self, len: usize) -> usize;
}

/// Process-wide entropy-seeded generator.
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPicker for RandomPicker {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

#[derive(Clone)]
pub struct PickEngine {
    lists: ListManager,
    picker: Arc<dyn IndexPicker>,
}

impl PickEngine {
    pub fn new(lists: ListManager, picker: Arc<dyn IndexPicker>) -> Self {
        Self { lists, picker }
    }

    pub async fn pick(
        &self,
        workspace: &str,
        list: &str,
        remove: bool,
    ) -> Result<PickOutcome, ListError> {
        let Some(items) = self.lists.get_list(workspace, list).await? else {
            return Ok(PickOutcome::NotFound);
        };
        if items.is_empty() {
            return Ok(PickOutcome::EmptyList);
        }

        let index = self.picker.pick_index(items.len()).min(items.len() - 1);
        let item = items[index].clone();
        tracing::debug!("Picked index {} of {} from {}/{}", index, items.len(), workspace, list);

        let removal = if remove {
            let result = self
                .lists
                .store()
                .remove_at(workspace, list, index, &item)
                .await;
            if let Err(e) = &result {
                tracing::error!(
                    "Failed to remove picked '{}' from {}/{}: {}",
                    item,
                    workspace,
                    list,
                    e
                );
            }
            Some(result)
        } else {
            None
        };

        Ok(PickOutcome::Picked { item, removal })
    }
}
