//! The `mathquiz --version` command.

use anyhow::Result;

const RELEASE_YEAR: u16 = 2026;

pub fn version_line() -> String {
    format!(
        "current version: {} / author : {} ({RELEASE_YEAR})",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
    )
}

pub fn execute() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}
