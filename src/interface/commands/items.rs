//! # Item Commands
//!
//! Handles `add` and `remove`.
//! Each item in the command gets its own line in the reply.

use crate::application::lists::ListManager;
use crate::domain::types::{AddOutcome, RemoveOutcome};
use crate::strings::{help, messages};

pub async fn handle_add(lists: &ListManager, prefix: char, workspace: &str, args: &[String]) -> String {
    let [list, items @ ..] = args else {
        return help::add_usage(prefix);
    };
    let Ok(reports) = lists.add_items(workspace, list, items).await else {
        tracing::debug!("Rejected add for {} with args {:?}", workspace, args);
        return help::add_usage(prefix);
    };

    reports
        .iter()
        .map(|report| match &report.result {
            Ok(AddOutcome::Added) => messages::added(&report.item, list),
            Ok(AddOutcome::Created) => messages::created_and_added(&report.item, list),
            Err(_) => messages::add_failed(&report.item),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle_remove(
    lists: &ListManager,
    prefix: char,
    workspace: &str,
    args: &[String],
) -> String {
    let [list, items @ ..] = args else {
        return help::remove_usage(prefix);
    };
    let Ok(reports) = lists.remove_items(workspace, list, items).await else {
        tracing::debug!("Rejected remove for {} with args {:?}", workspace, args);
        return help::remove_usage(prefix);
    };

    reports
        .iter()
        .map(|report| match &report.result {
            Ok(RemoveOutcome::Removed) => messages::item_removed(&report.item, list),
            Ok(RemoveOutcome::NotFound) => messages::item_not_found(&report.item, list),
            Err(_) => messages::remove_failed(&report.item),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
