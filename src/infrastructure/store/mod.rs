//! # List Store Backends
//!
//! Implementations of `ListStore` and the factory that picks one from config.

mod deadline;
mod document;
#[cfg(feature = "redis")]
mod redis_store;

pub use deadline::Deadline;
pub use document::DocumentStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;

use std::sync::Arc;

use crate::domain::config::{StoreBackend, StoreConfig};
use crate::domain::error::StoreError;
use crate::domain::traits::ListStore;

/// Builds the configured backend, wrapped so every call is bounded by the query timeout.
pub async fn build(config: &StoreConfig) -> Result<Arc<dyn ListStore>, StoreError> {
    let inner: Arc<dyn ListStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory list store; lists will not survive a restart");
            Arc::new(DocumentStore::in_memory())
        }
        StoreBackend::File => Arc::new(DocumentStore::open(&config.path).await?),
        StoreBackend::Redis => connect_redis(config).await?,
    };
    Ok(Arc::new(Deadline::new(inner, config.query_timeout())))
}

#[cfg(feature = "redis")]
async fn connect_redis(config: &StoreConfig) -> Result<Arc<dyn ListStore>, StoreError> {
    let store = RedisStore::connect(&config.url, &config.key_prefix, config.connect_timeout()).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis(_config: &StoreConfig) -> Result<Arc<dyn ListStore>, StoreError> {
    Err(StoreError::Unavailable(
        "this build has no redis support (enable the `redis` feature)".to_string(),
    ))
}
