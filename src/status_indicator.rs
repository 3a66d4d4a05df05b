use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One-line poll status: a spinner while a fetch is out, then the latest summary or error.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    fetching: bool,
    status_text: String,
    is_error: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.status_text = error.into();
        self.is_error = true;
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let indicator = if self.fetching {
            spinner_frames[self.spinner_idx % spinner_frames.len()]
        } else {
            " "
        };

        let status_text = if !self.status_text.is_empty() {
            self.status_text.as_str()
        } else if self.fetching {
            "Polling ledger..."
        } else {
            "Waiting for first poll"
        };

        let status_color = if self.is_error {
            Color::Red
        } else if self.fetching {
            Color::DarkGray
        } else {
            Color::Gray
        };

        let status = Line::from(vec![
            Span::styled(indicator, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            Rect {
                height: area.height.min(1),
                ..area
            },
        );
    }
}
