//! The `mathquiz --list-operator` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mathquiz_core::StrategyRegistry;

/// Operator catalog of `registry` as a two-column table.
pub fn operator_table(registry: &StrategyRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Description"]);
    for (key, description) in registry.operators() {
        table.add_row(vec![Cell::new(key), Cell::new(description)]);
    }
    table
}

pub fn execute() -> Result<()> {
    let registry = StrategyRegistry::standard();
    println!("Available operators list:");
    println!("{}", operator_table(&registry));
    Ok(())
}
