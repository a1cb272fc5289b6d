//! The `mathquiz --init-config` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("mathquiz.toml");
    if path.exists() {
        println!("mathquiz.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG).context("failed to write mathquiz.toml")?;
    println!("Created mathquiz.toml");
    println!("\nSet `enabled = true` under [log] to record sessions.");
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathquiz configuration

[log]
enabled = false
clear_on_start = false
# file = "${HOME}/.local/state/mathquiz/quiz.log"
level = "info"

[quiz]
# "correct": problems answered correctly are not asked again in a session.
# "any": every answered problem is withheld.
reuse_policy = "correct"
max_regenerations = 1000
"#;
