use crate::constants::{STATUS_DOT, TRIGGER_LABEL};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const FLASH_BG: Color = Color::Rgb(0, 242, 234);

/// The affordance that opens the ledger panel. Lit while the new-activity flash is on.
pub fn draw_trigger(f: &mut Frame<'_>, area: Rect, lit: bool) {
    let (style, dot) = if lit {
        (
            Style::default()
                .fg(Color::Black)
                .bg(FLASH_BG)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Black).bg(FLASH_BG),
        )
    } else {
        (
            Style::default().fg(Color::White),
            Style::default().fg(Color::Green),
        )
    };

    let label = Line::from(vec![
        Span::styled(STATUS_DOT, dot),
        Span::raw(" "),
        Span::raw(TRIGGER_LABEL),
    ]);

    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style),
        );
    f.render_widget(button, area);
}

/// Width the trigger needs, borders and padding included.
pub fn trigger_width() -> u16 {
    (TRIGGER_LABEL.chars().count() + 6) as u16
}
