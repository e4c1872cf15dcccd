mod error;
mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reference driver for the regexfsm compilation and simulation pipeline.
#[derive(Debug, Parser)]
#[command(name = "regexfsm", version, about)]
struct RegexFsmArgs {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile and simulate a single regex against one input word.
    Compile(CompileArgs),
    /// Run every line of a batch file as an independent job.
    Batch(BatchArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct CompileArgs {
    /// The regular expression to compile.
    pub(crate) regex: String,

    /// The input word to simulate. Defaults to the empty string.
    #[arg(short, long, default_value = "")]
    pub(crate) word: String,

    /// Restrict single-character literals to this set of characters.
    #[arg(short, long)]
    pub(crate) alphabet: Option<String>,

    /// Directory to write graph-description artifacts into.
    #[arg(short, long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub(crate) struct BatchArgs {
    /// Path to a batch input file (one `regex;w` or `regex w` job per line).
    pub(crate) file: PathBuf,

    /// Directory to write graph-description artifacts into, one subdirectory per line.
    #[arg(short, long)]
    pub(crate) out: Option<PathBuf>,
}

fn main() {
    let args = RegexFsmArgs::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Command::Compile(compile_args) => run::run_compile(compile_args),
        Command::Batch(batch_args) => run::run_batch(batch_args),
    };

    match result {
        Ok(all_accepted) => std::process::exit(if all_accepted { 0 } else { 1 }),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
