use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dyncalc::calculator::{
    AngleUnit, Keypad, Mode, Session, copy_to_clipboard, evaluate_expression,
};
use dyncalc::config::Config;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "dyncalc",
    version,
    about = "Basic and scientific calculator",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Calculator mode to start in
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Angle unit for trigonometric functions
    #[arg(long, value_enum)]
    angle: Option<AngleUnit>,

    /// Copy the result of `=` to the clipboard
    #[arg(long)]
    copy: bool,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Button labels to press, e.g. `5 + 3 =`. Reads stdin when omitted.
    keys: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single expression such as "2 + sin(pi/2)"
    Eval {
        expression: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    if let Err(e) = dyncalc::logging::init(log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let angle_unit = cli.angle.unwrap_or(config.angle_unit);
    let copy = cli.copy || config.copy_results;

    if let Some(Command::Eval { expression }) = cli.command {
        let result = evaluate_expression(&expression, angle_unit);
        if let Some(error) = result.error() {
            eprintln!("{}", error);
            return Ok(ExitCode::FAILURE);
        }
        println!("{}", result.display());
        if copy {
            copy_result(result.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut session = Session::new(cli.mode.unwrap_or(config.mode), angle_unit);
    debug!(mode = ?session.mode(), ?angle_unit, "session started");

    if !cli.keys.is_empty() {
        let display = press_all(&mut session, &cli.keys[..], copy);
        println!("{}", display);
        return Ok(ExitCode::SUCCESS);
    }

    run_interactive(&mut session, copy)?;
    Ok(ExitCode::SUCCESS)
}

/// Read key labels line by line from stdin until EOF or `quit`.
fn run_interactive(session: &mut Session, copy: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        let keys: Vec<&str> = trimmed.split_whitespace().collect();
        if keys.is_empty() {
            continue;
        }

        let display = press_all(session, &keys[..], copy);
        writeln!(stdout, "{}", display).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}

fn press_all<S: AsRef<str>>(session: &mut Session, keys: &[S], copy: bool) -> String {
    let mut display = String::new();
    for key in keys {
        display = session.handle_input(key.as_ref());
    }

    let ended_with_equals = keys.last().is_some_and(|k| k.as_ref().trim() == "=");
    if copy && ended_with_equals && !display.is_empty() && display != "Error" {
        copy_result(&display);
    }

    display
}

fn copy_result(text: &str) {
    if let Err(e) = copy_to_clipboard(text) {
        warn!("{:#}", e);
    }
}
