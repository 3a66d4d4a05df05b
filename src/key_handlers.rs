use crate::app::{App, AppState};
use crate::overlay::OverlayInput;
use crate::render::LogSink;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE: u16 = 10;

pub fn handle_key(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match app.state {
        AppState::Watching => handle_watch_input(key, app),
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Quit => {}
    }
}

pub fn handle_watch_input(key: KeyEvent, app: &mut App) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.state = AppState::QuitConfirm;
        return;
    }

    if app.overlay.is_open() {
        match key.code {
            KeyCode::Esc => {
                app.handle_overlay(OverlayInput::Cancel);
            }
            KeyCode::Char('c') => {
                app.handle_overlay(OverlayInput::Close);
            }
            KeyCode::Up => app.log_view.scroll_up(1),
            KeyCode::Down => app.log_view.scroll_down(1),
            KeyCode::PageUp => app.log_view.scroll_up(PAGE),
            KeyCode::PageDown => app.log_view.scroll_down(PAGE),
            KeyCode::End => app.log_view.pin_to_end(),
            KeyCode::Char('q') => app.state = AppState::QuitConfirm,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char('v') => {
            app.handle_overlay(OverlayInput::Open);
        }
        KeyCode::Char('q') => app.state = AppState::QuitConfirm,
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Watching;
        }
        _ => {}
    }
}
