//! Validate configuration command.

use anyhow::Result;
use rulebook_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Paper mode: {}", config.broker.paper);
            println!("Default qty: {}", config.broker.default_qty);
            println!("Live series capacity: {}", config.engine.series_capacity);
            println!(
                "Run store: {} (keep {})",
                config.storage.path, config.storage.max_runs
            );
            println!("Strategy dir: {}", config.strategies.dir);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
