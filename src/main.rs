//! aiterm - drive one AI CLI session from the terminal
//!
//! Starts the selected tool, forwards stdin lines to it and echoes its output
//! until either side closes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use aiterm::{
    Config, ConfigLoader, TerminalConfig, TerminalManager, TerminalSnapshot, TerminalStatus,
    TerminalType,
};

#[derive(Parser)]
#[command(name = "aiterm")]
#[command(about = "Run AI command-line tools as managed terminal sessions")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to $AITERM_CONFIG, then the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an AI tool and bridge this terminal's stdin/stdout to it
    Run {
        /// Tool to launch (claude_code, gemini_cli, cursor, aider, codex, custom)
        terminal_type: TerminalType,

        /// Session name
        #[arg(short, long)]
        name: Option<String>,

        /// Skip the tool's confirmation prompts
        #[arg(long)]
        yolo: bool,

        /// Working directory for the tool
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Program to run for the custom type
        #[arg(long)]
        program: Option<String>,

        /// Print the final session snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Extra arguments passed to the tool
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Start the platform's default shell as a session
    Shell {
        /// Working directory for the shell
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Show the command a terminal type resolves to
    Which {
        terminal_type: TerminalType,

        /// Resolve with YOLO flags
        #[arg(long)]
        yolo: bool,
    },

    /// List the supported terminal types and whether their tools are installed
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ToolEntry {
    terminal_type: TerminalType,
    display_name: &'static str,
    command: Option<&'static str>,
    path: Option<PathBuf>,
    installed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;
    let manager = TerminalManager::with_config(config);

    match cli.command {
        Commands::Run {
            terminal_type,
            name,
            yolo,
            cwd,
            program,
            json,
            args,
        } => {
            let mut terminal = TerminalConfig::new(
                terminal_type,
                name.unwrap_or_else(|| terminal_type.as_str().to_string()),
            )
            .with_yolo_mode(yolo)
            .with_args(args);
            if let Some(dir) = cwd {
                terminal = terminal.with_working_dir(dir);
            }
            if let Some(program) = program {
                terminal = terminal.with_command(program);
            }
            run_session(&manager, terminal, json).await?;
        }
        Commands::Shell { cwd } => {
            let mut terminal = TerminalConfig::new(TerminalType::Custom, "shell");
            if let Some(dir) = cwd {
                terminal = terminal.with_working_dir(dir);
            }
            run_session(&manager, terminal, false).await?;
        }
        Commands::Which {
            terminal_type,
            yolo,
        } => {
            let terminal = TerminalConfig::new(terminal_type, "which").with_yolo_mode(yolo);
            let spec = manager.adapter().create_command(&terminal)?;
            println!("{}", spec);
        }
        Commands::List { json } => {
            let entries = tool_entries(&manager);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    let status = if entry.installed { "installed" } else { "missing" };
                    let path = entry
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(default shell)".to_string());
                    println!("{:<12} {:<10} {}", entry.terminal_type, status, path);
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path)
            .map_err(|e| anyhow::anyhow!(aiterm::handle_startup_error(&e))),
        None => ConfigLoader::load().map_err(|e| anyhow::anyhow!(aiterm::handle_startup_error(&e))),
    }
}

fn tool_entries(manager: &TerminalManager) -> Vec<ToolEntry> {
    let adapter = manager.adapter();
    TerminalType::ALL
        .iter()
        .map(|&terminal_type| {
            let command = terminal_type.command_name();
            ToolEntry {
                terminal_type,
                display_name: terminal_type.display_name(),
                command,
                path: command.map(|c| adapter.executable_path(c)),
                installed: command.map_or(true, |c| adapter.validate_command(c)),
            }
        })
        .collect()
}

/// Bridge stdin and stdout until the user closes input or the tool exits
async fn run_session(manager: &TerminalManager, terminal: TerminalConfig, json: bool) -> Result<()> {
    let name = terminal.name.clone();
    manager
        .start_terminal(terminal)
        .await
        .map_err(|e| anyhow::anyhow!(aiterm::handle_startup_error(&e)))?;
    let session = manager
        .get_terminal(&name)
        .await
        .context("session vanished after start")?;
    info!("Session '{}' started (pid {:?})", name, session.pid());

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let poll = Duration::from_millis(100);

    loop {
        tokio::select! {
            line = input.next_line() => {
                match line.context("failed to read stdin")? {
                    Some(line) => manager.send_command(&name, &line).await?,
                    None => {
                        debug!("stdin closed");
                        break;
                    }
                }
            }
            output = manager.read_output(&name, Some(poll)) => {
                match output {
                    Ok(Some(line)) => println!("{}", line),
                    Ok(None) => {
                        if session.has_exited().await {
                            debug!("Session '{}' process exited", name);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("{}", e);
                        break;
                    }
                }
            }
        }
    }

    // Drain whatever the tool printed before we tear it down
    while let Ok(Some(line)) = manager
        .read_output(&name, Some(Duration::from_millis(200)))
        .await
    {
        println!("{}", line);
    }

    if let Err(e) = manager.stop_terminal(&name).await {
        warn!("Failed to stop session '{}': {}", name, e);
    }

    write_summary(
        &mut std::io::stdout(),
        &mut std::io::stderr(),
        &session.snapshot(),
        json,
    )
}

/// Final session state: JSON on stdout, or a stderr note when the stop failed
fn write_summary(
    out: &mut impl Write,
    err: &mut impl Write,
    snapshot: &TerminalSnapshot,
    json: bool,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?;
    } else if snapshot.status != TerminalStatus::Stopped {
        writeln!(
            err,
            "session '{}' ended in state {}",
            snapshot.name, snapshot.status
        )?;
    }
    Ok(())
}
