//! # Interface Layer
//!
//! Command handlers that turn parsed arguments into reply text.

pub mod commands;
