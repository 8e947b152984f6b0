//! # Pick Command
//!
//! Handles `pick`. Any second argument asks for the chosen item to be removed.

use crate::application::pick::PickEngine;
use crate::domain::error::ListError;
use crate::domain::types::{PickOutcome, RemoveOutcome};
use crate::strings::{help, messages};

pub async fn handle_pick(engine: &PickEngine, prefix: char, workspace: &str, args: &[String]) -> String {
    let Some(list) = args.first() else {
        return help::pick_usage(prefix);
    };
    let remove = args.len() > 1;

    match engine.pick(workspace, list, remove).await {
        Ok(PickOutcome::Picked { item, removal }) => {
            let mut reply = messages::picked(&item, list);
            if let Some(result) = removal {
                reply.push('\n');
                reply.push_str(&match result {
                    Ok(RemoveOutcome::Removed) => messages::item_removed(&item, list),
                    Ok(RemoveOutcome::NotFound) => messages::item_not_found(&item, list),
                    Err(_) => messages::remove_failed(&item),
                });
            }
            reply
        }
        Ok(PickOutcome::EmptyList) => messages::no_items(list),
        Ok(PickOutcome::NotFound) => messages::list_not_found(list),
        Err(ListError::Invalid(_)) => help::pick_usage(prefix),
        Err(ListError::Store(_)) => messages::pick_failed(list),
    }
}
