// src/ui.rs

pub mod dashboard;
pub mod footer;
pub mod header;
pub mod ledger_panel;
pub mod quit_confirm;
pub mod trigger;

use crate::api::{ChainSource, FeedClient};
use crate::app::{App, AppState};
use crate::config::get_config;
use crate::constants::UI_TICK_MS;
use crate::errors::{ChainwatchError, ChainwatchResult};
use crate::key_handlers::handle_key;
use crate::poll_loop::{PollScheduler, SchedulerEvent};
use crossterm::{
    event::{Event as CEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time;

/// Runs the terminal UI against the installed configuration until the user quits.
pub async fn run_ui() -> ChainwatchResult<()> {
    let config = get_config();
    let source = Arc::new(FeedClient::new(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, source.endpoint());
    app.log_view.mount();
    let res = run_app(&mut terminal, &mut app, source, config.poll_interval()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop. Poll results, key presses and UI ticks are handled one at a time, so a batch is
/// always rendered in full before the next key is looked at.
pub async fn run_app<B: Backend, C: ChainSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: Arc<C>,
    poll_interval: Duration,
) -> ChainwatchResult<()> {
    let mut scheduler = PollScheduler::new(source, poll_interval);
    let mut events = EventStream::new();
    let mut ui_tick = time::interval(Duration::from_millis(UI_TICK_MS));

    log::info!(
        "watching {} every {}ms",
        scheduler.source().endpoint(),
        poll_interval.as_millis()
    );

    let result = loop {
        if let Err(e) = terminal.draw(|f| draw(f, app)) {
            break Err(e.into());
        }

        tokio::select! {
            event = scheduler.next() => match event {
                SchedulerEvent::Due => {
                    if app.begin_poll() {
                        scheduler.spawn_fetch();
                    }
                }
                SchedulerEvent::Fetched(result) => {
                    app.apply_fetch(result, Instant::now());
                }
            },
            maybe_event = events.next() => match maybe_event {
                Some(Ok(CEvent::Key(key))) => handle_key(key, app),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    let message = format!("Failed to read input: {}", e);
                    break Err(ChainwatchError::terminal_error(message));
                }
                None => break Ok(()),
            },
            _ = ui_tick.tick() => app.on_tick(Instant::now()),
        }

        if app.state == AppState::Quit {
            break Ok(());
        }
    };

    scheduler.shutdown();
    log::info!("stopped after {} polls", app.poller.stats().cycles);
    result
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    header::draw_header(f, chunks[0], &app.endpoint);
    dashboard::draw_dashboard(f, chunks[1], app);
    if app.overlay.is_open() {
        ledger_panel::draw_ledger_panel(f, inset(chunks[1], 2, 1), &mut app.log_view);
    }
    app.status_indicator.render(f, chunks[2]);
    footer::draw_footer(f, chunks[3], app);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, centered_rect(50, 30, size));
    }
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{fixtures, ChainSnapshot};
    use crate::overlay::OverlayInput;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn closed_panel_shows_trigger_only() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::new(&Config::default(), "http://127.0.0.1:5000/chain");
        app.log_view.mount();

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("View Blockchain Ledger"));
        assert!(!text.contains("Close Overlay"));
    }

    #[test]
    fn open_panel_shows_new_blocks() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = App::new(&Config::default(), "http://127.0.0.1:5000/chain");
        app.log_view.mount();
        app.begin_poll();
        app.apply_fetch(Ok(ChainSnapshot::from_blocks(fixtures::chain(2))), Instant::now());
        app.handle_overlay(OverlayInput::Open);

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Close Overlay"));
        assert!(text.contains("NEW VOTE BLOCK #1"));
    }

    #[test]
    fn pinned_panel_shows_the_newest_block_after_many_wrapped_lines() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new(&Config::default(), "http://127.0.0.1:5000/chain");
        app.log_view.mount();
        app.begin_poll();
        app.apply_fetch(Ok(ChainSnapshot::from_blocks(fixtures::chain(40))), Instant::now());
        app.handle_overlay(OverlayInput::Open);

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("NEW VOTE BLOCK #39"), "newest block not on screen");
        assert!(text.contains("------"));
        assert!(!text.contains("NEW VOTE BLOCK #30"));
    }

    #[test]
    fn open_panel_hides_the_trigger() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new(&Config::default(), "http://127.0.0.1:5000/chain");
        app.log_view.mount();
        app.handle_overlay(OverlayInput::Open);

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        // The column between the panel's right border and the dashboard's.
        let buffer = terminal.backend().buffer();
        let edge = buffer.area.width - 2;
        for y in buffer.area.height - 6..buffer.area.height - 3 {
            assert_eq!(buffer[(edge, y)].symbol(), " ", "trigger border at row {y}");
        }
    }

    #[test]
    fn inset_never_underflows() {
        let tiny = Rect::new(0, 0, 3, 1);
        let r = inset(tiny, 2, 1);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
    }
}
