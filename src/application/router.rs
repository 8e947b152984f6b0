//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It splits the message on single spaces, strips the prefix from the first token to
//! get the keyword, and sends back exactly one preformatted reply per command.

use anyhow::Result;

use crate::application::lists::ListManager;
use crate::application::pick::PickEngine;
use crate::domain::traits::ChatProvider;
use crate::interface::commands;
use crate::strings::messages;

/// Known command keywords. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    RemoveList,
    Pick,
    List,
    Lists,
}

impl Command {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "removeList" => Some(Self::RemoveList),
            "pick" => Some(Self::Pick),
            "list" => Some(Self::List),
            "lists" => Some(Self::Lists),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct CommandRouter {
    prefix: char,
    lists: ListManager,
    pick: PickEngine,
}

impl CommandRouter {
    pub fn new(prefix: char, lists: ListManager, pick: PickEngine) -> Self {
        Self {
            prefix,
            lists,
            pick,
        }
    }

    /// Handles one inbound message; non-command messages produce nothing.
    pub async fn route<C>(&self, chat: &C, message: &str) -> Result<()>
    where
        C: ChatProvider + ?Sized,
    {
        let workspace = chat.room_id();
        let Some(reply) = self.dispatch(&workspace, message).await else {
            return Ok(());
        };
        chat.send_message(&messages::preformatted(&reply))
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!(e))
    }

    /// Reply body for `message` in `workspace`, or `None` if it is not a command.
    pub async fn dispatch(&self, workspace: &str, message: &str) -> Option<String> {
        let body = message.strip_prefix(self.prefix)?;

        let mut tokens = body.split(' ');
        let keyword = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        tracing::debug!(
            "Router dispatching cmd='{}' args={:?} workspace='{}'",
            keyword,
            args,
            workspace
        );

        let p = self.prefix;
        let reply = match Command::from_keyword(keyword) {
            Some(Command::Add) => commands::items::handle_add(&self.lists, p, workspace, &args).await,
            Some(Command::Remove) => {
                commands::items::handle_remove(&self.lists, p, workspace, &args).await
            }
            Some(Command::RemoveList) => {
                commands::lists::handle_remove_list(&self.lists, p, workspace, &args).await
            }
            Some(Command::Pick) => commands::pick::handle_pick(&self.pick, p, workspace, &args).await,
            Some(Command::List) => {
                commands::lists::handle_list(&self.lists, p, workspace, &args).await
            }
            Some(Command::Lists) => commands::lists::handle_lists(&self.lists, workspace).await,
            None => commands::help::handle_help(p),
        };
        Some(reply)
    }
}
