//! Print the resolved configuration.

use anyhow::Result;

use crate::config::{get_config_path, AppConfig};


/// Run the config command.
pub fn run(config: &AppConfig) -> Result<()> {
    let path = get_config_path();
    let origin = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("\x1b[1mConfig file:\x1b[0m {}{origin}", path.display());
    println!();
    print!("{}", config.to_toml());

    Ok(())
}
