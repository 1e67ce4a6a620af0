//! # flip7 CLI Library
//!
//! Command-line front end for the Flip 7 engine: interactive games with
//! human and computer seats, batch simulation of computer policies, and
//! configuration display.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and dispatches to a subcommand, writing to
//! the given streams and returning the process exit code.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = flip7_cli::run(
//!     ["flip7", "sim", "--games", "3", "--ai", "ev", "--ai", "hit", "--seed", "1"],
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Total Games: 3"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play one game; `--human NAME` and `--ai SPEC` seat players
//! - `sim`: Run many computer-only games and report win rates
//! - `cfg`: Display the resolved configuration and value sources
//! - `policies`: List the computer policy specs

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod human;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod names;
pub mod ui;
pub mod validation;

use cli::{Commands, Flip7Cli};
use commands::{
    handle_cfg_command, handle_play_command, handle_policies_command, handle_sim_command,
};
pub use error::CliError;
use human::Console;

const COMMANDS: &[&str] = &["play", "sim", "cfg", "policies"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a human quits
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match Flip7Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: flip7 <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: flip7 --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play(args) => handle_play_command(&args, out, err, Console::stdio()),
        Commands::Sim(args) => handle_sim_command(&args, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Policies => handle_policies_command(out),
    };
    exit_code_for(result, err)
}

/// Maps a command result to an exit code, reporting errors on `err`.
pub fn exit_code_for(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
