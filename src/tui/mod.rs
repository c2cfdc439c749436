pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::assessment::RiskResult;

/// Run the full-screen assessment. Returns the result when the user quits from the
/// results screen, None when they quit mid-assessment.
pub async fn run_tui(mut app: App) -> anyhow::Result<Option<RiskResult>> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e).context("Failed to draw terminal"));
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(app.finished_result());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    outcome
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Option cursor
            KeyCode::Char('j') | KeyCode::Down => app.next_option(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_option(),

            // Answering
            KeyCode::Char(' ') => app.select_option(),
            KeyCode::Enter => {
                if !app.is_complete() {
                    app.select_and_advance();
                }
            }

            // Question navigation
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => {
                if !app.is_complete() {
                    app.next_question();
                }
            }
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => app.previous_question(),

            KeyCode::Char('r') => app.restart(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
