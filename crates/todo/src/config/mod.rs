//! Configuration module for the todo TUI.

use anyhow::{Context, Result, anyhow};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

/// Load and validate keybindings, falling back to defaults when no file exists.
pub fn load_keybindings(path: Option<&Path>) -> Result<KeyBindingsConfig> {
    match keybindings::load_config(path)? {
        Some(config) => {
            keybindings::validate_tui_config(&config.tui)?;
            info!("loaded keybindings configuration");
            Ok(config.tui.keybindings)
        }
        None => Ok(KeyBindingsConfig::default()),
    }
}

/// Initialize the configuration file with defaults.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => keybindings::default_config_path()
            .ok_or_else(|| anyhow!("could not determine the configuration directory"))?,
    };

    let written = write_default_config(&output_path, force, |path| {
        confirm_overwrite(path, &mut io::stdin().lock(), &mut io::stdout())
    })?;

    if written {
        println!("✓ Wrote configuration file: {}", output_path.display());
        println!();
        println!("Edit this file to customize keybindings.");
        println!("Restart todo to apply changes.");
    } else {
        println!("Aborted.");
    }
    Ok(())
}

fn write_default_config(
    path: &Path,
    force: bool,
    confirm: impl FnOnce(&Path) -> Result<bool>,
) -> Result<bool> {
    if path.exists() && !force && !confirm(path)? {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let content = keybindings::generate_default_config_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write configuration file: {}", path.display()))?;
    Ok(true)
}

fn confirm_overwrite(path: &Path, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "File already exists: {}\nOverwrite? [y/N]: ", path.display())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Path the configuration is read from when `--config` is not given.
pub fn config_location(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(keybindings::default_config_path)
}
