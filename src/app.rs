use crate::config::Config;
use crate::errors::ChainwatchResult;
use crate::log_view::LogView;
use crate::models::ChainSnapshot;
use crate::overlay::{OverlayController, OverlayInput};
use crate::poll_loop::{PollLoop, PollOutcome};
use crate::status_indicator::StatusIndicator;
use crate::utils::{format_clock, plural};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Watching,
    QuitConfirm,
    Quit,
}

/// Everything the event loop owns. Each piece has exactly one owner here, so no locking.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub endpoint: String,
    pub log_view: LogView,
    pub overlay: OverlayController,
    pub poller: PollLoop,
    pub status_indicator: StatusIndicator,
}

impl App {
    pub fn new(config: &Config, endpoint: impl Into<String>) -> App {
        App {
            state: AppState::Watching,
            endpoint: endpoint.into(),
            log_view: LogView::new(),
            overlay: OverlayController::new(config.flash_duration()),
            poller: PollLoop::new(),
            status_indicator: StatusIndicator::new(),
        }
    }

    pub fn handle_overlay(&mut self, input: OverlayInput) -> bool {
        self.overlay.handle(input, &mut self.log_view)
    }

    /// Starts a cycle if none is outstanding.
    pub fn begin_poll(&mut self) -> bool {
        let started = self.poller.try_begin();
        self.status_indicator.set_fetching(self.poller.is_fetching());
        started
    }

    pub fn apply_fetch(
        &mut self,
        result: ChainwatchResult<ChainSnapshot>,
        now: Instant,
    ) -> PollOutcome {
        let outcome = self
            .poller
            .complete(result, &mut self.log_view, &mut self.overlay, now);
        self.status_indicator.set_fetching(false);

        match &outcome {
            PollOutcome::Failed(e) => {
                self.status_indicator.set_error(format!("Poll failed: {}", e))
            }
            PollOutcome::Inconsistent => self
                .status_indicator
                .set_error("Ledger sent an inconsistent snapshot; waiting for the next one"),
            _ => {
                let summary = self.summary();
                self.status_indicator.set_status(summary);
            }
        }
        outcome
    }

    /// Expires the new-activity flash and advances the spinner.
    pub fn on_tick(&mut self, now: Instant) {
        self.overlay.tick(now, &mut self.log_view);
        self.status_indicator.update_spinner();
    }

    fn summary(&self) -> String {
        let observed = self.poller.observed();
        match self.poller.stats().last_success {
            Some(at) => format!(
                "{} block{} observed · last poll {}",
                observed,
                plural(observed),
                format_clock(at.time())
            ),
            None => format!("{} block{} observed", observed, plural(observed)),
        }
    }
}
