use crate::app::App;
use crate::ui::trigger::{draw_trigger, trigger_width};
use crate::utils::plural;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Background shown while the ledger panel is closed, with the trigger in the bottom-right corner.
pub fn draw_dashboard(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Watching ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let stats = app.poller.stats();
    let observed = app.poller.observed();
    let lines = vec![
        Line::from(vec![
            Span::styled("Source    ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.endpoint.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Observed  ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} block{}", observed, plural(observed))),
        ]),
        Line::from(vec![
            Span::styled("Polls     ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} ({} failed)", stats.cycles, stats.failures)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "New blocks are collected in the ledger panel. Press Enter to open it.",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        inner,
    );

    // The open panel covers the dashboard but not its bottom-right corner.
    if app.overlay.is_open() {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(trigger_width())])
        .split(rows[1]);
    draw_trigger(f, cols[1], app.log_view.is_notifying());
}
