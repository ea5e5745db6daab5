#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wayfind")]
#[command(author, version, about = "Resolve module specifiers the way the bundler does", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve a specifier required from a module
    Resolve {
        /// Requesting module, relative to the project root or absolute
        from: PathBuf,

        /// Specifier as written in the require call
        name: String,

        /// Target platform (e.g. ios, android, web)
        #[arg(long, short)]
        platform: Option<String>,

        /// Do not consult the module map
        #[arg(long)]
        no_haste: bool,
    },

    /// Show the specifier after package redirects
    Redirect {
        /// Requesting module, relative to the project root or absolute
        from: PathBuf,

        /// Specifier as written in the require call
        name: String,
    },

    /// Print the path of the shared empty module
    EmptyModule,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Resolve {
            from,
            name,
            platform,
            no_haste,
        } => commands::resolve::run(&cwd, &from, &name, platform.as_deref(), !no_haste, cli.json),
        Commands::Redirect { from, name } => commands::redirect::run(&cwd, &from, &name, cli.json),
        Commands::EmptyModule => commands::empty_module::run(cli.json),
    }
}
