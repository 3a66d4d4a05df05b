use crate::constants::{APP_TITLE, CLOSE_LABEL};
use crate::log_view::LogView;
use crate::render::{Fragment, FragmentKind};
use crate::utils::format_clock;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

fn fragment_style(kind: FragmentKind) -> Style {
    if kind.is_hash() {
        return Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM);
    }
    match kind {
        FragmentKind::BatchHeader => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        FragmentKind::Genesis => Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD),
        FragmentKind::BlockLabel => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
        FragmentKind::LinkWarning => Style::default().fg(Color::Red),
        FragmentKind::BatchFooter => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::White),
    }
}

fn fragment_line(fragment: &Fragment) -> Line<'static> {
    if fragment.kind == FragmentKind::Spacer {
        return Line::default();
    }
    Line::from(vec![
        Span::styled(
            format!("[{}] ", format_clock(fragment.stamped_at)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(fragment.text.clone(), fragment_style(fragment.kind)),
    ])
}

/// Rows hidden above the viewport when the wrapped content is scrolled to its last line.
fn max_scroll(paragraph: &Paragraph, area: Rect) -> u16 {
    let rows = paragraph.line_count(area.width);
    rows.saturating_sub(area.height as usize).min(u16::MAX as usize) as u16
}

pub fn draw_ledger_panel(f: &mut Frame<'_>, area: Rect, view: &mut LogView) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(0, 242, 234)))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            format!(" {} ", APP_TITLE),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )))
        .title(
            Line::from(Span::styled(
                format!(" [c] {} ", CLOSE_LABEL),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines: Vec<Line<'static>> = view.entries().iter().map(fragment_line).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let scroll = view.offset(max_scroll(&paragraph, inner));

    f.render_widget(paragraph.scroll((scroll, 0)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn scroll_range_counts_wrapped_rows_exactly() {
        let area = Rect::new(0, 0, 10, 3);
        let fits = Paragraph::new(vec![Line::from("0123456789")]).wrap(Wrap { trim: false });
        assert_eq!(max_scroll(&fits, area), 0);

        // 1 + 3 + 1 rows in a 3-row viewport
        let wrapped = Paragraph::new(vec![
            Line::from("0123456789"),
            Line::from("x".repeat(25)),
            Line::from("tail"),
        ])
        .wrap(Wrap { trim: false });
        assert_eq!(max_scroll(&wrapped, area), 2);
    }

    #[test]
    fn hash_kinds_share_a_style() {
        assert_eq!(
            fragment_style(FragmentKind::Hash),
            fragment_style(FragmentKind::PreviousHash)
        );
        assert_ne!(
            fragment_style(FragmentKind::Hash),
            fragment_style(FragmentKind::Field)
        );
    }

    #[test]
    fn spacer_is_blank_and_others_are_stamped() {
        let at = NaiveTime::from_hms_opt(8, 1, 2).unwrap();
        let spacer = Fragment {
            kind: FragmentKind::Spacer,
            text: String::new(),
            stamped_at: at,
        };
        assert_eq!(fragment_line(&spacer).width(), 0);

        let hash = Fragment {
            kind: FragmentKind::Hash,
            text: "Hash: abc".into(),
            stamped_at: at,
        };
        let line = fragment_line(&hash);
        assert_eq!(line.spans[0].content, "[08:01:02] ");
        assert_eq!(line.spans[1].style, fragment_style(FragmentKind::Hash));
    }
}
