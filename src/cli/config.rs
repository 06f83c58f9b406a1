//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change a setting
    Set {
        /// currency_symbol, date_format, export_prefix or storage_layout
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> ExpenseResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            for (key, value) in settings.entries() {
                println!("  {:<16} {}", key, value);
            }
        }

        ConfigCommands::Set { key, value } => {
            settings.set_value(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
