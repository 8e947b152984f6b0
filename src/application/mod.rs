//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command routing, list operations, random picking and store monitoring.

pub mod lists;
pub mod monitor;
pub mod pick;
pub mod router;
