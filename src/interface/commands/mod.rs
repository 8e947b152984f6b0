//! # Command Handlers
//!
//! Contains specific handler functions for each supported command keyword.
//! These handlers are invoked by the Router and return the reply body.

pub mod help;
pub mod items;
pub mod lists;
pub mod pick;
