//! # Analysis Assistant
//!
//! Terminal client for a financial and news analysis chat service: an
//! interactive TUI with chart projections, a single-question mode for
//! scripts, and saved conversation history.

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, HistorySubcommand};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = &args.command {
        let mut cmd = Args::command();
        cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        return Ok(());
    }

    let mut config = core::cli::load_config_or_exit();
    config.apply_overrides(args.api_base.as_deref(), args.profile);
    log::debug!("{} {} using {}", core::app::NAME, core::app::VERSION, config.api_base);

    match &args.command {
        Some(Commands::Config) => core::cli::run_config(&config),
        Some(Commands::History { subcommand }) => match subcommand {
            HistorySubcommand::List { limit, filter } => {
                core::cli::run_history_list(&config, *limit, filter.as_deref())
            }
            HistorySubcommand::Show { id } => core::cli::run_history_show(id),
            HistorySubcommand::Delete { id } => core::cli::run_history_delete(id),
            HistorySubcommand::Prune => core::cli::run_history_prune(&config),
        },
        Some(Commands::Completions { .. }) => {}
        None => match &args.prompt {
            Some(prompt) => run::run_single_prompt(prompt, &args, &config).await?,
            None => run::launch_tui(config).await?,
        },
    }
    Ok(())
}
