//! sheetforge - Drive a cell engine from commands, scripts or stdin

mod command;
mod config;
mod error;
mod format;
mod logging;
mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use crate::command::{parse_command, split_commands};
use crate::session::{Outcome, Session};

fn print_usage() {
    eprintln!("Usage: sheetforge [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SCRIPT]                  File of commands to run (default: read stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <CMDS>      Run ';'-separated commands and exit");
    eprintln!("  --config <FILE>           Load configuration from FILE");
    eprintln!("  --no-config               Ignore configuration files");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  create NAME VALUE   set NAME VALUE   get NAME   show NAME");
    eprintln!("  remove NAME   has NAME   count   list   reset   error");
}

/// Run one segment. Returns false if the command failed.
fn run_line(session: &Session, line: &str) -> bool {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            println!("#ERR {}", e);
            return false;
        }
    };
    match session.execute(&command) {
        Outcome::Done => true,
        Outcome::Output(text) => {
            println!("{}", text);
            true
        }
        Outcome::Advisory(message) => {
            eprintln!("warning: {}", message);
            true
        }
        Outcome::Failed(message) => {
            println!("#ERR {}", message);
            false
        }
    }
}

/// Run a batch, stopping at the first failure.
fn run_batch(session: &Session, input: &str) -> bool {
    split_commands(input)
        .into_iter()
        .all(|line| run_line(session, line))
}

/// Read commands from stdin until EOF, continuing past failures.
fn run_stdin(session: &Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        for segment in split_commands(&line) {
            run_line(session, segment);
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut script_path: Option<PathBuf> = None;
    let mut commands: Option<String> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut no_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a value");
                    std::process::exit(1);
                }
                commands = Some(args[i].to_string());
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => no_config = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if script_path.is_none() {
                    script_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    if commands.is_some() && script_path.is_some() {
        eprintln!("Error: --command and SCRIPT cannot be combined");
        std::process::exit(1);
    }

    let (config, mut warnings) = config::load_config(config_file.as_ref(), no_config);
    warnings.extend(logging::init_logging(config.log.filter.as_deref()));
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(config.engine, commands, script_path) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(
    engine: sheetforge_engine::EngineConfig,
    commands: Option<String>,
    script_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let session = Session::new(engine).context("creating engine")?;

    let batch = match (commands, script_path) {
        (Some(commands), _) => Some(commands),
        (None, Some(path)) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let ok = match batch {
        Some(input) => run_batch(&session, &input),
        None => {
            run_stdin(&session)?;
            true
        }
    };
    debug!(cells = session.engine().len(), ok, "finished");
    // Flush before a possible early exit.
    io::stdout().flush()?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
