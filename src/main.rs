//! sp CLI entry point.

use clap::Parser;
use sp::cli::commands;
use sp::cli::{Cli, Commands};
use sp::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    // Completions need no config or network.
    if let Commands::Completions { shell } = &cli.command {
        return commands::completions::execute(shell);
    }

    let mut client = commands::open_client(cli.config.as_deref())?;

    match &cli.command {
        Commands::List(args) => commands::list::execute(&mut client, args, cli.json),
        Commands::Urls(args) => commands::urls::execute(&mut client, args, cli.json),
        Commands::Add(args) => commands::add::execute(&mut client, args, cli.json),
        Commands::Cleanup => commands::cleanup::execute(&mut client, cli.json),
        Commands::SetColor { color } => commands::color::execute(&mut client, color, cli.json),
        Commands::Completions { .. } => Ok(()),
    }
}
