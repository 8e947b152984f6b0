//! # Redis Store
//!
//! `ListStore` on Redis. Per workspace there is one SET holding the list names
//! and one Redis LIST per name. The name set is what makes an emptied list
//! distinct from a deleted one, since Redis drops empty LIST keys by itself.
//!
//! Multi-key operations run as `MULTI`/`EXEC` pipelines or a Lua script, so each
//! call is atomic on the server and safe across any number of bot processes.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use std::time::Duration;

use crate::domain::error::StoreError;
use crate::domain::traits::ListStore;
use crate::domain::types::{AddOutcome, RemoveOutcome};

/// Items are single tokens of a space-split command, so a value holding a
/// space can never collide with a real item.
const TOMBSTONE: &str = "\u{0} picked \u{0}";

/// KEYS[1] = list key. ARGV = index, expected value, tombstone.
const REMOVE_AT_SCRIPT: &str = r#"
local current = redis.call('LINDEX', KEYS[1], ARGV[1])
if current == ARGV[2] then
    redis.call('LSET', KEYS[1], ARGV[1], ARGV[3])
    return redis.call('LREM', KEYS[1], 1, ARGV[3])
end
return redis.call('LREM', KEYS[1], 0, ARGV[2])
"#;

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    pub async fn connect(url: &str, prefix: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = tokio::time::timeout(timeout, client.get_connection_manager())
            .await
            .map_err(|_| StoreError::Timeout { op: "connect" })??;
        tracing::info!("Connected to redis list store (prefix `{prefix}`)");
        Ok(Self {
            conn,
            prefix: prefix.to_string(),
        })
    }

    fn names_key(&self, workspace: &str) -> String {
        names_key(&self.prefix, workspace)
    }

    fn list_key(&self, workspace: &str, list: &str) -> String {
        list_key(&self.prefix, workspace, list)
    }
}

/// Length-prefixing the workspace id keeps keys unambiguous even when
/// ids or list names contain `:`.
fn workspace_key(prefix: &str, workspace: &str) -> String {
    format!("{prefix}:ws:{}:{workspace}", workspace.len())
}

fn names_key(prefix: &str, workspace: &str) -> String {
    format!("{}:names", workspace_key(prefix, workspace))
}

fn list_key(prefix: &str, workspace: &str, list: &str) -> String {
    format!("{}:list:{list}", workspace_key(prefix, workspace))
}

#[async_trait]
impl ListStore for RedisStore {
    async fn add_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<AddOutcome, StoreError> {
        let mut conn = self.conn.clone();
        let (created, _len): (i64, i64) = redis::pipe()
            .atomic()
            .sadd(self.names_key(workspace), list)
            .rpush(self.list_key(workspace, list), item)
            .query_async(&mut conn)
            .await?;
        Ok(if created == 1 {
            AddOutcome::Created
        } else {
            AddOutcome::Added
        })
    }

    async fn remove_item(
        &self,
        workspace: &str,
        list: &str,
        item: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.lrem(self.list_key(workspace, list), 0, item).await?;
        Ok(if removed > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        })
    }

    async fn remove_at(
        &self,
        workspace: &str,
        list: &str,
        index: usize,
        expected: &str,
    ) -> Result<RemoveOutcome, StoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = Script::new(REMOVE_AT_SCRIPT)
            .key(self.list_key(workspace, list))
            .arg(index)
            .arg(expected)
            .arg(TOMBSTONE)
            .invoke_async(&mut conn)
            .await?;
        Ok(if removed > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        })
    }

    async fn remove_list(&self, workspace: &str, list: &str) -> Result<RemoveOutcome, StoreError> {
        let mut conn = self.conn.clone();
        let (existed, _deleted): (i64, i64) = redis::pipe()
            .atomic()
            .srem(self.names_key(workspace), list)
            .del(self.list_key(workspace, list))
            .query_async(&mut conn)
            .await?;
        Ok(if existed == 1 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        })
    }

    async fn get_list(
        &self,
        workspace: &str,
        list: &str,
    ) -> Result<Option<Vec<String>>, StoreError> {
        let mut conn = self.conn.clone();
        let (exists, items): (bool, Vec<String>) = redis::pipe()
            .atomic()
            .sismember(self.names_key(workspace), list)
            .lrange(self.list_key(workspace, list), 0, -1)
            .query_async(&mut conn)
            .await?;
        Ok(exists.then_some(items))
    }

    async fn list_names(&self, workspace: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let mut names: Vec<String> = conn.smembers(self.names_key(workspace)).await?;
        names.sort();
        Ok(names)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_keys_embed_workspace_length() {
        assert_eq!(workspace_key("lb", "!room:example.org"), "lb:ws:17:!room:example.org");
        assert_eq!(names_key("lb", "w"), "lb:ws:1:w:names");
        assert_eq!(list_key("lb", "w", "chores"), "lb:ws:1:w:list:chores");
    }

    #[test]
    fn test_keys_with_colons_do_not_collide() {
        // Without the length prefix both of these would be `lb:ws:x:list:y:list:z`.
        let nested_list = list_key("lb", "x", "y:list:z");
        let nested_workspace = list_key("lb", "x:list:y", "z");
        assert_ne!(nested_list, nested_workspace);

        // A list called `names` never shadows the name set.
        assert_ne!(list_key("lb", "w", "names"), names_key("lb", "w"));
    }

    /// Fresh key space per test so runs never see each other's data.
    async fn store() -> RedisStore {
        let prefix = format!("listbot-test-{}", rand::thread_rng().gen::<u64>());
        RedisStore::connect("redis://127.0.0.1/", &prefix, Duration::from_secs(2))
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "needs a redis server on 127.0.0.1"]
    async fn test_redis_add_reports_creation_and_keeps_duplicates() {
        let store = store().await;
        assert_eq!(store.add_item("w", "l", "x").await.unwrap(), AddOutcome::Created);
        assert_eq!(store.add_item("w", "l", "x").await.unwrap(), AddOutcome::Added);
        assert_eq!(
            store.get_list("w", "l").await.unwrap(),
            Some(vec!["x".to_string(), "x".to_string()])
        );
        store.remove_list("w", "l").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs a redis server on 127.0.0.1"]
    async fn test_redis_remove_takes_every_occurrence() {
        let store = store().await;
        for item in ["a", "b", "a"] {
            store.add_item("w", "l", item).await.unwrap();
        }
        assert_eq!(store.remove_item("w", "l", "a").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.remove_item("w", "l", "a").await.unwrap(), RemoveOutcome::NotFound);
        assert_eq!(store.get_list("w", "l").await.unwrap(), Some(vec!["b".to_string()]));
        store.remove_list("w", "l").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs a redis server on 127.0.0.1"]
    async fn test_redis_emptied_list_differs_from_removed() {
        let store = store().await;
        store.add_item("w", "l", "a").await.unwrap();
        store.remove_item("w", "l", "a").await.unwrap();
        assert_eq!(store.get_list("w", "l").await.unwrap(), Some(vec![]));
        assert_eq!(store.list_names("w").await.unwrap(), vec!["l".to_string()]);

        assert_eq!(store.remove_list("w", "l").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.get_list("w", "l").await.unwrap(), None);
        assert_eq!(store.remove_list("w", "l").await.unwrap(), RemoveOutcome::NotFound);
        assert!(store.list_names("w").await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "needs a redis server on 127.0.0.1"]
    async fn test_redis_remove_at_position_and_fallback() {
        let store = store().await;
        for item in ["x", "y", "x"] {
            store.add_item("w", "l", item).await.unwrap();
        }
        // Index still holds the value: only that occurrence goes.
        assert_eq!(store.remove_at("w", "l", 2, "x").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(
            store.get_list("w", "l").await.unwrap(),
            Some(vec!["x".to_string(), "y".to_string()])
        );

        // Shifted: falls back to removing the value everywhere.
        store.add_item("w", "l", "x").await.unwrap();
        assert_eq!(store.remove_at("w", "l", 1, "x").await.unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.get_list("w", "l").await.unwrap(), Some(vec!["y".to_string()]));
        assert_eq!(store.remove_at("w", "l", 7, "q").await.unwrap(), RemoveOutcome::NotFound);

        store.ping().await.unwrap();
        store.remove_list("w", "l").await.unwrap();
    }
}
