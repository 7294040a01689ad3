//! Garcom - guided dining-suggestion assistant library
//!
//! This library drives a scripted conversation that helps a user pick a
//! dish: a static decision tree of questions, a session state machine over
//! it, and trait seams for the suggestion backend, dish catalog, and cart.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `flow`: static step table and pure navigation helpers
//! - `session`: conversation session state machine and transcript
//! - `providers`: backend trait seams and the HTTP client
//! - `menu`: dish types and the cart sink
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```
//! use garcom::flow::FlowTable;
//!
//! let table = FlowTable::builtin();
//! assert_eq!(table.initial_step().id, "start");
//! assert!(table.validate().is_empty());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod flow;
pub mod menu;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{GarcomError, Result};
pub use flow::{FlowTable, Step, StepOption};
pub use session::{GuidedSession, SessionPhase};
