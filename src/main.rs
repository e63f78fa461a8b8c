//! shortcut-dispatch - CLI entry point
//!
//! Hosts a [`ShortcutEngine`] and drives it with JSONL commands read from
//! stdin (see `stdin_commands`). Responses, dispatched actions and execution
//! results are written to stdout as JSON lines; logs go to stderr and the
//! JSONL log file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use shortcut_dispatch::config::{self, Config};
use shortcut_dispatch::dispatcher::CommandSurface;
use shortcut_dispatch::engine::ShortcutEngine;
use shortcut_dispatch::error::ResultExt;
use shortcut_dispatch::listener::Session;
use shortcut_dispatch::logging;
use shortcut_dispatch::shortcuts::ShortcutContext;
use shortcut_dispatch::stdin_commands::{CommandProcessor, Output};

/// Keyboard shortcut dispatch engine driven by JSONL commands on stdin
#[derive(Parser, Debug)]
#[command(name = "shortcut-dispatch")]
#[command(version)]
#[command(
    about = "Resolve key events against a shortcut registry and dispatch actions",
    long_about = None
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting context, e.g. list-view (overrides config)
    #[arg(long, value_parser = parse_context)]
    context: Option<ShortcutContext>,

    /// Start with this actor signed in
    #[arg(short, long)]
    actor: Option<String>,

    /// Start with shortcuts globally disabled (overrides config)
    #[arg(long)]
    disabled: bool,

    /// Log filter directive, e.g. debug (overrides config)
    #[arg(short, long)]
    log_filter: Option<String>,
}

fn parse_context(s: &str) -> Result<ShortcutContext, String> {
    ShortcutContext::parse(s).ok_or_else(|| {
        let known: Vec<&str> = ShortcutContext::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown context '{}' (expected one of: {})", s, known.join(", "))
    })
}

/// Command surface for the standalone host: each built-in is logged.
struct LoggingSurface;

impl LoggingSurface {
    fn run(&self, command: &str) -> Result<()> {
        info!(event_type = "built_in_command", command = command, "Built-in command invoked");
        Ok(())
    }
}

impl CommandSurface for LoggingSurface {
    fn open_search(&self) -> Result<()> {
        self.run("open_search")
    }
    fn create_entity_flow(&self) -> Result<()> {
        self.run("create_entity_flow")
    }
    fn show_info_panel(&self) -> Result<()> {
        self.run("show_info_panel")
    }
    fn show_help_overlay(&self) -> Result<()> {
        self.run("show_help_overlay")
    }
    fn close_active_overlay(&self) -> Result<()> {
        self.run("close_active_overlay")
    }
    fn navigate_to_list_root(&self) -> Result<()> {
        self.run("navigate_to_list_root")
    }
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if args.disabled || args.context.is_some() {
        let mut shortcuts = config.shortcuts.take().unwrap_or_default();
        if args.disabled {
            shortcuts.enabled = false;
        }
        if let Some(context) = args.context {
            shortcuts.initial_context = context;
        }
        config.shortcuts = Some(shortcuts);
    }
    if let Some(filter) = &args.log_filter {
        config.log_filter = Some(filter.clone());
    }
    config
}

fn write_outputs(out: &mut impl Write, outputs: &[Output]) -> Result<()> {
    for output in outputs {
        serde_json::to_writer(&mut *out, output).context("serializing output")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Resolve first so the configured filter applies, log the outcome once a
    // subscriber exists
    let (config, status) = config::resolve_config(args.config.as_deref());
    let config = apply_overrides(config, &args);
    let _guard = logging::init(config.get_log_filter());
    status.log();
    info!(
        enabled = config.shortcuts_enabled(),
        context = %config.initial_context(),
        "Loaded config"
    );

    let session = Arc::new(match &args.actor {
        Some(actor) => Session::signed_in(actor.clone()),
        None => Session::default(),
    });
    let engine = ShortcutEngine::from_config(&config, Arc::new(LoggingSurface), session.clone());
    let processor = CommandProcessor::new(&engine, session);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let outputs = processor.process_line(&line);
        if write_outputs(&mut out, &outputs).log_err().is_none() {
            // Stdout is gone (e.g. closed pipe); nothing more to report to
            break;
        }
    }

    info!(event_type = "app_lifecycle", action = "stopped", "stdin closed, exiting");
    Ok(())
}
