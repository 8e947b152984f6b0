#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix, List Store backends
//! - Application: Router, List Manager, Pick Engine, Store Monitor
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::lists::ListManager;
use crate::application::monitor::StoreMonitor;
use crate::application::pick::{PickEngine, RandomPicker};
use crate::application::router::CommandRouter;
use crate::domain::config::{AppConfig, StoreBackend};
use crate::infrastructure::matrix::MatrixService;
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(name = "listbot", version, about = "Shared, persistent lists for Matrix rooms")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Override the configured store backend
    #[arg(long, value_enum)]
    backend: Option<StoreBackend>,

    /// Directory for the session log
    #[arg(long, default_value = "data")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(backend) = cli.backend {
        config.store.backend = backend;
    }

    // 2. Logging Setup
    let _guard = init_logging(&cli.log_dir)?;
    tracing::info!("{}", logs::config_loaded(&cli.config.display().to_string()));

    // 3. List Store
    let store = infrastructure::store::build(&config.store)
        .await
        .context("Failed to open list store")?;

    let lists = ListManager::new(store.clone());
    let pick = PickEngine::new(lists.clone(), Arc::new(RandomPicker::new()));
    let router = CommandRouter::new(config.bot.prefix, lists, pick);

    // 4. Matrix Setup
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await
        .context("Matrix login failed")?;
    tracing::info!("{}", logs::logged_in(&matrix.username));

    if let Some(name) = &matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 5. Event Handlers
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();
        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }
            if original_msg.sender == room.own_user_id() {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            let body = text_content.body.clone();

            // One task per message; commands from any room run concurrently.
            tokio::spawn(async move {
                let chat = MatrixService::new(room);
                if let Err(e) = router.route(&chat, &body).await {
                    tracing::error!("Failed to route message: {}", e);
                }
            });
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::warn!(
                    "{}",
                    logs::invite_join_fail(room.room_id().as_str(), &e.to_string())
                );
            }
        }
    });

    // 6. Start Loops
    let mut monitor = StoreMonitor::spawn(
        store,
        config.store.ping_interval(),
        config.store.ping_timeout(),
    );

    tracing::info!("{}", logs::SYNC_LOOP_START);
    let sync_client = client.clone();
    let mut sync_handle =
        tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    tokio::select! {
        res = &mut sync_handle => match res {
            Ok(Ok(())) => tracing::info!("{}", logs::SYNC_LOOP_ENDED),
            Ok(Err(e)) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
            Err(e) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
        },
        Some(err) = monitor.failures.recv() => {
            tracing::error!("{}", logs::store_lost(&err.to_string()));
        }
        sig = tokio::signal::ctrl_c() => match sig {
            Ok(()) => tracing::info!("{}", logs::SHUTDOWN),
            Err(e) => tracing::error!("{}", logs::shutdown_fail(&e.to_string())),
        },
    }

    sync_handle.abort();
    monitor.shutdown().await;
    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if !log_dir.exists() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = log_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "session.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}
