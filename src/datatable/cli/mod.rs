//! The terminal client: an interactive shell over [`DataTableApi`].
//!
//! - `setup.rs`: clap definitions for process flags and for each shell line
//! - `commands.rs`: dispatch of a parsed line to the API, writing to any `Write`
//! - `render.rs`: table, form, message and error rendering

mod commands;
mod render;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{dispatch, Flow, ShellContext};
use datatable::api::DataTableApi;
use datatable::config::DataTableConfig;
use datatable::store::memory::InMemoryStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use setup::{Cli, ShellLine};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "datatable> ";

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.config_template {
        print!("{}", DataTableConfig::template());
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = DataTableConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }
    info!(page_size = config.page_size, "starting shell");

    let mut api = DataTableApi::new(InMemoryStore::new()).with_page_size(config.page_size);
    let ctx = ShellContext {
        name_width: config.name_width,
    };

    if io::stdin().is_terminal() {
        run_prompt(&mut api, &ctx)
    } else {
        run_shell(&mut api, &ctx, io::stdin().lock(), &mut io::stdout().lock())
    }
}

/// Line-edited prompt with history for terminal sessions. Ctrl-C clears the
/// current line, Ctrl-D leaves.
fn run_prompt(api: &mut DataTableApi<InMemoryStore>, ctx: &ShellContext) -> Result<()> {
    let mut editor = DefaultEditor::new().context("starting line editor")?;
    let mut out = io::stdout();
    writeln!(out, "Type `help` for commands, `quit` to leave.")?;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor
                        .add_history_entry(line.as_str())
                        .context("recording history")?;
                }
                if run_line(api, ctx, &line, &mut out)? == Flow::Quit {
                    break;
                }
                out.flush()?;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("reading input"),
        }
    }
    out.flush()?;
    Ok(())
}

/// Reads script lines until EOF or `quit`. Bad lines are reported and
/// skipped; only I/O failures end the shell with an error.
fn run_shell<R: BufRead, W: Write>(
    api: &mut DataTableApi<InMemoryStore>,
    ctx: &ShellContext,
    input: R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("reading input")?;
        if run_line(api, ctx, &line, out)? == Flow::Quit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

/// Splits one line into shell words, parses and dispatches it.
fn run_line<W: Write>(
    api: &mut DataTableApi<InMemoryStore>,
    ctx: &ShellContext,
    line: &str,
    out: &mut W,
) -> Result<Flow> {
    let Some(words) = shlex::split(line) else {
        writeln!(out, "Error: unterminated quote or trailing backslash")?;
        return Ok(Flow::Continue);
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }
    debug!(?words, "shell line");

    let command = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            write!(out, "{}", e.render())?;
            return Ok(Flow::Continue);
        }
    };
    Ok(dispatch(api, command, ctx, out)?)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
