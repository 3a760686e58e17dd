//! Command line interface for distribution grid topology analysis.

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use gridlib::io;
use gridlib::topology;
use gridlib::types::EdgeId;
use gridlib::validation;

/// Print an error message and exit with the given code.
macro_rules! fatal_error {
    ($code:expr, $($arg:tt)*) => {{
        eprintln!("{} {}", "ERROR:".red().bold(), format!($($arg)*));
        std::process::exit($code);
    }};
}

mod commands;
use commands::Command;

#[derive(Parser, Debug)]
#[command(version, about = "Distribution grid topology analysis tool.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    args.command.run();
}
