//! CLI entry point for the todo TUI.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod tui;

/// A keyboard-driven task list that lives in memory for one session.
#[derive(Parser, Debug)]
#[command(
    name = "todo",
    version,
    about = "todo: add, complete and delete tasks in the terminal (nothing is saved)"
)]
struct Cli {
    /// Keybindings config file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append tracing output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive terminal UI (default).
    Tui,

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default keybindings to the config file.
    Init {
        /// Destination path (defaults to the user config directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file without asking.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli {
        config,
        log_file,
        cmd,
    } = Cli::parse();
    let cmd = cmd.unwrap_or(Command::Tui);

    if let Some(path) = log_file.as_deref() {
        install_file_tracing(path)?;
    } else if should_install_tracing(&cmd) {
        install_tracing();
    }

    execute_command(config.as_deref(), cmd)
}

fn execute_command(config_path: Option<&Path>, command: Command) -> Result<()> {
    match command {
        Command::Tui => {
            let keybindings = config::load_keybindings(config_path)?;
            if let Some(path) = config::config_location(config_path) {
                info!(path = %path.display(), "configuration location");
            }
            tui::run(keybindings)
        }
        Command::Config {
            cmd: ConfigCommand::Init { output, force },
        } => config::init_config(output.as_deref().or(config_path), force),
    }
}

/// The UI owns the terminal, so stderr logging is only for the other commands.
const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui)
}

fn env_filter() -> EnvFilter {
    // RUST_LOG is honoured; INFO is always enabled.
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

fn install_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn install_file_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(Mutex::new(file))
        .compact()
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_launches_tui() {
        let cli = Cli::parse_from(["todo"]);
        assert!(cli.cmd.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_tui_command_with_globals() {
        let cli = Cli::parse_from(["todo", "tui", "--config", "keys.toml", "--log-file", "todo.log"]);
        assert!(matches!(cli.cmd, Some(Command::Tui)));
        assert_eq!(cli.config.as_deref(), Some(Path::new("keys.toml")));
        assert_eq!(cli.log_file.as_deref(), Some(Path::new("todo.log")));
    }

    #[test]
    fn parse_config_init_command() {
        let cli = Cli::parse_from(["todo", "config", "init", "--output", "out.toml", "--force"]);
        match cli.cmd {
            Some(Command::Config {
                cmd: ConfigCommand::Init { output, force },
            }) => {
                assert_eq!(output.as_deref(), Some(Path::new("out.toml")));
                assert!(force);
            }
            other => panic!("expected config init, got {other:?}"),
        }
    }

    #[test]
    fn skips_tracing_in_tui_mode() {
        assert!(!should_install_tracing(&Command::Tui));
    }

    #[test]
    fn installs_tracing_for_other_commands() {
        let cmd = Command::Config {
            cmd: ConfigCommand::Init {
                output: None,
                force: false,
            },
        };
        assert!(should_install_tracing(&cmd));
    }

    #[test]
    fn config_init_writes_to_explicit_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        execute_command(
            Some(path.as_path()),
            Command::Config {
                cmd: ConfigCommand::Init {
                    output: None,
                    force: true,
                },
            },
        )?;
        assert!(std::fs::read_to_string(&path)?.contains("[tui.keybindings.task_list]"));
        Ok(())
    }
}
