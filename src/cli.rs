//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::chart::ViewMode;
use crate::core::profile::Profile;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  analysis-assistant                            Launch interactive TUI
  analysis-assistant -p \"Show revenue by quarter\" Single question, plain text answer
  analysis-assistant -p - --json                Read question from stdin, print JSON
  analysis-assistant -p \"...\" --view comparison Pick the chart projection
  analysis-assistant --profile news             Use the news assistant
  analysis-assistant config                     Show config paths and settings
  analysis-assistant history list               List saved conversations
  analysis-assistant history show <id>          Print a saved conversation
  analysis-assistant completions bash           Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal client for a financial and news analysis assistant",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single question then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Ask a single question and print the answer (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Chart projection for prompt mode (defaults to the chart kind's own view)
    #[arg(long, value_name = "MODE", help = "Chart view: grouped, individual, or comparison")]
    pub view: Option<ViewMode>,

    /// Print the normalized reply as JSON in prompt mode
    #[arg(long)]
    pub json: bool,

    /// Override ANALYSIS_API_BASE
    #[arg(long, value_name = "URL", global = true)]
    pub api_base: Option<String>,

    /// Override ANALYSIS_PROFILE (financial or news)
    #[arg(long, value_name = "PROFILE", global = true)]
    pub profile: Option<Profile>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show config paths and effective settings
    Config,
    /// Manage saved conversations
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List conversations, newest first
    List {
        /// Maximum number of conversations to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only show conversations whose title or id contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print a saved conversation
    Show { id: String },
    /// Delete a saved conversation
    Delete { id: String },
    /// Remove expired conversations and those beyond the configured maximum
    Prune,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the TUI will own the terminal.
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}
