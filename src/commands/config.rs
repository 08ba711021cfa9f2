//! Config subcommands handler

use anyhow::{bail, Context, Result};
use std::process::Command;

use docview::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", render(&config)?);
    Ok(())
}

/// Print the configuration file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;

    // Ensure config exists
    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!("Opening {} with {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor))?;
    if !status.success() {
        bail!("Editor exited with {}", status);
    }

    // Catch mistakes right away instead of on the next preview
    Config::load().context("Configuration is invalid after editing")?;
    Ok(())
}

/// Serialize a configuration the way `config show` prints it.
pub fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
