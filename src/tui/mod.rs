//! TUI (Text User Interface) for chatting with the analysis assistant.

mod app;
mod chat_result;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::api::ChatClient;
use crate::core::config::Config;
use crate::core::history;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingChat};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Read the key following Esc within a short window. Terminals (Ghostty, etc.) send
/// Option+key as Esc+key; the second byte may arrive with delay.
fn drain_meta_key(app: &mut App) -> io::Result<Option<crossterm::event::KeyEvent>> {
    let step_ms = 25u64;
    let mut elapsed = 0u64;
    while elapsed < constants::ESC_SEQUENCE_DRAIN_MS {
        if event::poll(Duration::from_millis(step_ms))? {
            match event::read()? {
                Event::Key(next) => return Ok(Some(next)),
                Event::Mouse(m) => {
                    let _ = handlers::handle_mouse(m, app);
                    return Ok(None);
                }
                _ => {}
            }
        }
        elapsed += step_ms;
    }
    Ok(None)
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for async chat calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let client = ChatClient::new(&config).map_err(io::Error::other)?;
    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    match history::prune(&config) {
        Ok(0) => {}
        Ok(n) => log::info!("Pruned {} saved conversation(s) at startup", n),
        Err(e) => log::warn!("Failed to prune history: {}", e),
    }

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.profile, config.theme);
    let mut pending_chat: Option<PendingChat> = None;

    // Mouse wheel scrolls the message list
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    // Kitty keyboard protocol: Alt+key as single event with modifier (Ghostty, WezTerm, kitty, etc.)
    let _ = execute!(
        io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | crossterm::event::KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );

    loop {
        if let Some(ref chat) = pending_chat
            && let Ok(result) = chat.result_rx.try_recv()
        {
            chat_result::handle_chat_result(&mut app, result, config.as_ref());
            pending_chat = None;
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => {
                    let _ = handlers::handle_mouse(mouse, &mut app);
                }
                Event::Key(key) => {
                    let key_to_handle =
                        if handlers::would_esc_start_meta_sequence(&key, &app, &pending_chat) {
                            match drain_meta_key(&mut app)? {
                                Some(next) => {
                                    app.escape_pending = true;
                                    next
                                }
                                None => key,
                            }
                        } else {
                            key
                        };
                    let result = handlers::handle_key(
                        key_to_handle,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            config: &config,
                            client: &client,
                            pending_chat: &mut pending_chat,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        chat_result::cancel_pending(&mut app, &mut pending_chat);
                        chat_result::save_conversation_if_dirty(&mut app, config.as_ref());
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
