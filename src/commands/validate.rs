//! Flow-table invariant check command

use crate::error::{GarcomError, Result};
use crate::flow::FlowTable;

/// Validates the built-in flow table
///
/// Prints each violation and fails when any are found, so CI can gate on
/// the authored table staying well-formed.
pub fn run_validate() -> Result<()> {
    let flow = FlowTable::builtin();
    let violations = flow.validate();
    if violations.is_empty() {
        println!("flow table OK: {} steps", flow.len());
        return Ok(());
    }
    for violation in &violations {
        eprintln!("violation: {}", violation);
    }
    Err(GarcomError::Navigation(format!(
        "flow table has {} violation(s)",
        violations.len()
    ))
    .into())
}
