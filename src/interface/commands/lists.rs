//! # List Commands
//!
//! Handles `removeList`, `list` and `lists`.

use crate::application::lists::ListManager;
use crate::domain::error::ListError;
use crate::domain::types::RemoveOutcome;
use crate::strings::{help, messages};

pub async fn handle_remove_list(
    lists: &ListManager,
    prefix: char,
    workspace: &str,
    args: &[String],
) -> String {
    let Some(list) = args.first() else {
        return help::remove_list_usage(prefix);
    };
    match lists.remove_list(workspace, list).await {
        Ok(RemoveOutcome::Removed) => messages::list_removed(list),
        Ok(RemoveOutcome::NotFound) => messages::list_not_found(list),
        Err(ListError::Invalid(_)) => help::remove_list_usage(prefix),
        Err(ListError::Store(_)) => messages::remove_list_failed(list),
    }
}

pub async fn handle_list(
    lists: &ListManager,
    prefix: char,
    workspace: &str,
    args: &[String],
) -> String {
    let Some(list) = args.first() else {
        return help::list_usage(prefix);
    };
    match lists.get_list(workspace, list).await {
        Ok(Some(items)) if items.is_empty() => messages::no_items(list),
        Ok(Some(items)) => messages::list_items(list, &items),
        Ok(None) => messages::list_not_found(list),
        Err(ListError::Invalid(_)) => help::list_usage(prefix),
        Err(ListError::Store(_)) => messages::get_list_failed(list),
    }
}

pub async fn handle_lists(lists: &ListManager, workspace: &str) -> String {
    match lists.list_names(workspace).await {
        Ok(names) if names.is_empty() => messages::NO_LISTS.to_string(),
        Ok(names) => messages::list_names(&names),
        Err(_) => messages::GET_LISTS_FAILED.to_string(),
    }
}
