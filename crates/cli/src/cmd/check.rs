use anyhow::Result;

use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    println!("admin: {}", config.oracle.admin);
    println!("defaultScore: {}", config.oracle.default_score);
    println!("editors: {}", config.oracle.editors.len());
    for editor in &config.oracle.editors {
        println!("  - {}", editor);
    }
    println!(
        "logging: {} ({})",
        config.logging.level, config.logging.format
    );
    Ok(())
}
