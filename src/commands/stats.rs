//! Flow-table diagnostics command

use crate::error::Result;
use crate::flow::FlowTable;
use prettytable::{row, Table};

/// Prints aggregate statistics about the built-in flow table
pub fn run_stats(json: bool) -> Result<()> {
    let flow = FlowTable::builtin();
    let stats = flow.stats();

    if json {
        let value = serde_json::json!({
            "total_steps": stats.total_steps,
            "end_steps": stats.end_steps,
            "max_options": stats.max_options,
            "average_options": stats.average_options,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["total steps", stats.total_steps]);
    table.add_row(row!["end steps", stats.end_steps]);
    table.add_row(row!["max options", stats.max_options]);
    table.add_row(row!["average options", format!("{:.2}", stats.average_options)]);
    table.printstd();
    Ok(())
}
