use crate::render::{Fragment, LogSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    /// Follows the newest line.
    End,
    /// Fixed offset from the top, in visual lines.
    Line(u16),
}

/// The append-only ledger log shown in the overlay panel.
#[derive(Debug)]
pub struct LogView {
    entries: Vec<Fragment>,
    scroll: ScrollPosition,
    max_scroll: u16,
    mounted: bool,
    notification: bool,
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}

impl LogView {
    /// Creates an unmounted view. Nothing is rendered into it until [`mount`](Self::mount).
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            scroll: ScrollPosition::End,
            max_scroll: 0,
            mounted: false,
            notification: false,
        }
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn entries(&self) -> &[Fragment] {
        &self.entries
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn is_notifying(&self) -> bool {
        self.notification
    }

    /// Resolves the scroll position against the current viewport and remembers the bound
    /// for later manual scrolling.
    pub fn offset(&mut self, max_scroll: u16) -> u16 {
        self.max_scroll = max_scroll;
        match self.scroll {
            ScrollPosition::End => max_scroll,
            ScrollPosition::Line(line) => line.min(max_scroll),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let current = match self.scroll {
            ScrollPosition::End => self.max_scroll,
            ScrollPosition::Line(line) => line.min(self.max_scroll),
        };
        self.scroll = ScrollPosition::Line(current.saturating_sub(lines));
    }

    /// Scrolling back down to the bottom resumes following.
    pub fn scroll_down(&mut self, lines: u16) {
        if let ScrollPosition::Line(line) = self.scroll {
            let next = line.saturating_add(lines);
            self.scroll = if next >= self.max_scroll {
                ScrollPosition::End
            } else {
                ScrollPosition::Line(next)
            };
        }
    }
}

impl LogSink for LogView {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn append(&mut self, fragment: Fragment) {
        self.entries.push(fragment);
    }

    fn pin_to_end(&mut self) {
        self.scroll = ScrollPosition::End;
    }

    fn set_notification(&mut self, lit: bool) {
        self.notification = lit;
    }
}
