//! Guided-suggestion flow: static step table and pure navigation

pub mod navigator;
pub mod table;

pub use navigator::FlowStats;
pub use table::{FlowTable, Step, StepOption, START_STEP_ID};
