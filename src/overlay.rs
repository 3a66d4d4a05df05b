// src/overlay.rs

use crate::render::LogSink;
use std::time::{Duration, Instant};

/// Whether the ledger panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// User-driven inputs to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    /// The "View Blockchain Ledger" affordance was activated.
    Open,
    /// The explicit close action.
    Close,
    /// The cancellation key.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    PinToEnd,
}

/// Pure visibility transition for user inputs.
pub fn transition(state: Visibility, input: OverlayInput) -> (Visibility, Option<OverlayEffect>) {
    match (state, input) {
        (Visibility::Closed, OverlayInput::Open) => {
            (Visibility::Open, Some(OverlayEffect::PinToEnd))
        }
        (Visibility::Open, OverlayInput::Close | OverlayInput::Cancel) => {
            (Visibility::Closed, None)
        }
        (unchanged, _) => (unchanged, None),
    }
}

/// Owns the panel visibility and the new-activity flash.
#[derive(Debug)]
pub struct OverlayController {
    visibility: Visibility,
    flash_delay: Duration,
    lit_until: Option<Instant>,
    flashes: u64,
}

impl OverlayController {
    pub fn new(flash_delay: Duration) -> Self {
        Self {
            visibility: Visibility::Closed,
            flash_delay,
            lit_until: None,
            flashes: 0,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn is_flashing(&self) -> bool {
        self.lit_until.is_some()
    }

    /// Number of flashes emitted since start.
    pub fn flashes_emitted(&self) -> u64 {
        self.flashes
    }

    /// Applies a user input. Returns true if the visibility changed.
    pub fn handle<S: LogSink + ?Sized>(&mut self, input: OverlayInput, sink: &mut S) -> bool {
        let (next, effect) = transition(self.visibility, input);
        let changed = next != self.visibility;
        if changed {
            log::debug!("overlay {:?} -> {:?} on {:?}", self.visibility, next, input);
        }
        self.visibility = next;
        if let Some(OverlayEffect::PinToEnd) = effect {
            sink.pin_to_end();
        }
        changed
    }

    /// Reacts to a finished render. Flashes once per batch while closed and follows the tail
    /// while open.
    pub fn on_render<S: LogSink + ?Sized>(&mut self, did_render: bool, now: Instant, sink: &mut S) {
        if !did_render {
            return;
        }
        match self.visibility {
            Visibility::Closed => {
                self.lit_until = Some(now + self.flash_delay);
                self.flashes += 1;
                sink.set_notification(true);
            }
            Visibility::Open => sink.pin_to_end(),
        }
    }

    /// Clears the flash once its delay has passed.
    pub fn tick<S: LogSink + ?Sized>(&mut self, now: Instant, sink: &mut S) {
        if let Some(until) = self.lit_until {
            if now >= until {
                self.lit_until = None;
                sink.set_notification(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSink;

    const FLASH: Duration = Duration::from_millis(500);

    #[test]
    fn transition_table() {
        use OverlayInput as In;
        use Visibility::{Closed, Open};
        assert_eq!(transition(Closed, In::Open), (Open, Some(OverlayEffect::PinToEnd)));
        assert_eq!(transition(Open, In::Close), (Closed, None));
        assert_eq!(transition(Open, In::Cancel), (Closed, None));
        assert_eq!(transition(Closed, In::Close), (Closed, None));
        assert_eq!(transition(Closed, In::Cancel), (Closed, None));
        assert_eq!(transition(Open, In::Open), (Open, None));
    }

    #[test]
    fn opening_pins_to_end() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();

        assert!(overlay.handle(OverlayInput::Open, &mut sink));
        assert!(overlay.is_open());
        assert_eq!(sink.pins, 1);
    }

    #[test]
    fn close_is_idempotent() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();

        overlay.handle(OverlayInput::Open, &mut sink);
        assert!(overlay.handle(OverlayInput::Cancel, &mut sink));
        assert!(!overlay.handle(OverlayInput::Close, &mut sink));
        assert!(!overlay.handle(OverlayInput::Cancel, &mut sink));
        assert_eq!(overlay.visibility(), Visibility::Closed);
    }

    #[test]
    fn render_while_open_repins() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();
        overlay.handle(OverlayInput::Open, &mut sink);

        overlay.on_render(true, Instant::now(), &mut sink);

        assert_eq!(sink.pins, 2);
        assert!(sink.notifications.is_empty());
        assert_eq!(overlay.flashes_emitted(), 0);
    }

    #[test]
    fn render_while_closed_flashes_once_and_reverts() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        overlay.on_render(true, t0, &mut sink);
        assert_eq!(overlay.flashes_emitted(), 1);
        assert_eq!(sink.notifications, vec![true]);

        overlay.tick(t0 + Duration::from_millis(200), &mut sink);
        assert!(overlay.is_flashing());

        overlay.tick(t0 + FLASH, &mut sink);
        assert!(!overlay.is_flashing());
        assert_eq!(sink.notifications, vec![true, false]);
        assert_eq!(sink.pins, 0);
    }

    #[test]
    fn batch_mid_flash_does_not_stick() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        overlay.on_render(true, t0, &mut sink);
        overlay.on_render(true, t0 + Duration::from_millis(300), &mut sink);
        assert_eq!(overlay.flashes_emitted(), 2);

        overlay.tick(t0 + Duration::from_millis(600), &mut sink);
        assert!(overlay.is_flashing());
        overlay.tick(t0 + Duration::from_millis(800), &mut sink);
        assert!(!overlay.is_flashing());
        assert_eq!(sink.notifications.last(), Some(&false));
    }

    #[test]
    fn nothing_rendered_means_no_reaction() {
        let mut overlay = OverlayController::new(FLASH);
        let mut sink = RecordingSink::default();
        overlay.on_render(false, Instant::now(), &mut sink);
        assert!(sink.notifications.is_empty());
        assert_eq!(sink.pins, 0);
    }
}
