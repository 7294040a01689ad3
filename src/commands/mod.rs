//! Command handlers for the Garcom CLI

pub mod chat;
pub mod menu;
pub mod stats;
pub mod validate;
