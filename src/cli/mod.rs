//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Shells we can generate completions for.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// sp - Super Productivity tasks from the command line
#[derive(Parser, Debug)]
#[command(name = "sp", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: <config_dir>/super-productivity-cli/config.json)
    #[arg(long, global = true, env = "SP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logging, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List task titles, newest first
    #[command(visible_aliases = ["l", "get", "g"])]
    List(FilterArgs),

    /// List link attachments of matching tasks (path<TAB>task title)
    Urls(FilterArgs),

    /// Create one task per title
    Add(AddArgs),

    /// Remove every task with a generated (integer) id
    Cleanup,

    /// Set the TODAY tag theme color
    SetColor {
        /// Color value, e.g. "#ff0000"
        color: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Task selection flags shared by `list` and `urls`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only tasks in the project with this title (case-insensitive)
    #[arg(long)]
    pub project_title: Option<String>,

    /// Only tasks tagged TODAY
    #[arg(long)]
    pub today: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task titles, one task per title
    #[arg(required = true)]
    pub titles: Vec<String>,

    /// Project title to create the tasks in (default: the configured default project)
    #[arg(long)]
    pub project_title: Option<String>,

    /// Do not tag the new tasks TODAY
    #[arg(long)]
    pub no_today: bool,

    /// Skip titles that already exist among not-done tasks
    #[arg(long)]
    pub unique: bool,

    /// Time estimate in milliseconds
    #[arg(long, default_value_t = 0)]
    pub time_estimate: i64,

    /// Attach a link to each created task (repeatable)
    #[arg(long = "link", value_name = "URL")]
    pub links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_list_aliases() {
        for alias in ["list", "l", "get", "g"] {
            let cli = Cli::try_parse_from(["sp", alias, "--today"]).unwrap();
            match cli.command {
                Commands::List(args) => assert!(args.today),
                other => panic!("expected List, got {other:?}"),
            }
        }
    }

    #[test]
    fn add_collects_titles_and_links() {
        let cli = Cli::try_parse_from([
            "sp", "add", "Buy milk", "Call bank", "--unique", "--link", "http://x",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.titles, vec!["Buy milk", "Call bank"]);
                assert!(args.unique);
                assert!(!args.no_today);
                assert_eq!(args.links, vec!["http://x"]);
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn add_requires_a_title() {
        assert!(Cli::try_parse_from(["sp", "add"]).is_err());
    }

    #[test]
    fn global_config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["sp", "list", "--config", "/tmp/c.json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.json")));
    }
}
