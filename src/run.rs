//! Application run modes: logger init, single prompt, TUI launch.

use std::io;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::api::{ChatClient, ChatReply};
use crate::core::chart::ViewMode;
use crate::core::config::Config;
use crate::core::plain;
use crate::core::session::ChatEntry;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui() {
        let log_path = core::paths::cache_dir().and_then(|d| {
            std::fs::create_dir_all(&d).ok()?;
            Some(d.join(format!("{}.log", core::app::NAME)))
        });
        if let Some(path) = log_path
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Read the question from the `-p` argument, or stdin when it is `-`.
fn read_prompt(prompt_arg: &str) -> io::Result<String> {
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    Ok(prompt.trim().to_string())
}

/// JSON shape printed by `--json`.
fn reply_json(reply: &ChatReply, view_mode: ViewMode) -> serde_json::Value {
    serde_json::json!({
        "response": reply.text,
        "sources": reply.sources,
        "chart": reply.chart,
        "viewMode": view_mode,
        "sessionId": reply.session_id,
    })
}

/// Run single prompt mode: send one question, print the rendered reply to stdout.
pub async fn run_single_prompt(
    prompt_arg: &str,
    args: &Args,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = read_prompt(prompt_arg)?;
    if prompt.is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    let client = ChatClient::new(config)?;
    let session_id = uuid::Uuid::new_v4().to_string();
    log::info!("Sending prompt to {}", client.chat_url());
    let reply = match client.send(&prompt, &session_id).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("Chat request failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut entry = ChatEntry::assistant(reply.clone());
    if let Some(view) = args.view {
        entry.view_mode = view;
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reply_json(&reply, entry.view_mode))?
        );
    } else {
        println!("{}", plain::render_reply(&entry, plain::DEFAULT_WIDTH));
    }
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
