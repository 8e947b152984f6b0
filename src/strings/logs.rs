//! Log lines emitted during startup and shutdown.

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const SYNC_LOOP_ENDED: &str = "Sync loop ended";

pub fn store_lost(err: &str) -> String {
    format!("Lost connection to list store: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("Received invite for room {room_id}")
}

pub fn invite_join_fail(room_id: &str, err: &str) -> String {
    format!("Failed to join room {room_id}: {err}")
}
