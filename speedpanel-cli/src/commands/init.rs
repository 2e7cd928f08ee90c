//! Init command - write a default configuration file.

use speedpanel::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is left untouched unless `force` is set.
pub fn run(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file or use 'speedpanel config set' to customize SpeedPanel.");
    println!("Command-line arguments override config file values when specified.");
    Ok(())
}
