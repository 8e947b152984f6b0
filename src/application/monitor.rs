//! # Store Monitor
//!
//! Pings the list store on a fixed interval and reports the first failure.
//! It never touches in-flight commands; those fail through their own deadline.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::error::StoreError;
use crate::domain::traits::ListStore;

pub struct StoreMonitor {
    pub failures: mpsc::Receiver<StoreError>,
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl StoreMonitor {
    pub fn spawn(store: Arc<dyn ListStore>, interval: Duration, ping_timeout: Duration) -> Self {
        let (tx, failures) = mpsc::channel(1);
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            // `interval` panics on zero.
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            // The first tick completes immediately; skip it so startup is not pinged twice.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = stopped.changed() => break,
                    _ = ticker.tick() => {
                        let result = match tokio::time::timeout(ping_timeout, store.ping()).await {
                            Ok(result) => result,
                            Err(_) => Err(StoreError::Timeout { op: "ping" }),
                        };
                        if let Err(e) = result {
                            tracing::error!("List store ping failed: {}", e);
                            let _ = tx.send(e).await;
                            break;
                        }
                        tracing::trace!("List store ping ok");
                    }
                }
            }
        });

        Self {
            failures,
            stop,
            handle,
        }
    }

    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!("Store monitor task failed: {}", e);
        }
    }
}
