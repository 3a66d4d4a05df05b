// src/poll_loop.rs

use crate::api::ChainSource;
use crate::delta::DeltaTracker;
use crate::errors::{ChainwatchError, ChainwatchResult};
use crate::models::ChainSnapshot;
use crate::overlay::OverlayController;
use crate::render::{EntryRenderer, LogSink};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

/// What one poll cycle amounted to.
#[derive(Debug)]
pub enum PollOutcome {
    Rendered { entries: usize, observed: usize },
    Unchanged,
    /// The snapshot disagreed with itself; nothing was applied.
    Inconsistent,
    /// The log is not mounted yet; the same blocks are offered again next cycle.
    Deferred,
    Failed(ChainwatchError),
    /// A fetch was still outstanding.
    Skipped,
}

#[derive(Debug, Default, Clone)]
pub struct PollStats {
    pub cycles: u64,
    pub failures: u64,
    pub skipped: u64,
    pub last_success: Option<DateTime<Local>>,
    pub last_error: Option<String>,
}

/// Allows at most one fetch in flight.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: bool,
}

impl InFlightGuard {
    pub fn try_acquire(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn release(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// Fetch → delta → render → overlay, one cycle at a time.
#[derive(Debug, Default)]
pub struct PollLoop {
    tracker: DeltaTracker,
    renderer: EntryRenderer,
    guard: InFlightGuard,
    stats: PollStats,
}

impl PollLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> usize {
        self.tracker.observed()
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    pub fn is_fetching(&self) -> bool {
        self.guard.is_busy()
    }

    /// Claims the in-flight slot. Returns false if a fetch is already outstanding.
    pub fn try_begin(&mut self) -> bool {
        if self.guard.try_acquire() {
            return true;
        }
        self.stats.skipped += 1;
        log::debug!("previous fetch still in flight, skipping this tick");
        false
    }

    /// Applies the result of a fetch and frees the in-flight slot.
    pub fn complete<S: LogSink + ?Sized>(
        &mut self,
        result: ChainwatchResult<ChainSnapshot>,
        sink: &mut S,
        overlay: &mut OverlayController,
        now: Instant,
    ) -> PollOutcome {
        self.guard.release();
        self.stats.cycles += 1;

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if e.is_transient() {
                    log::warn!("poll failed: {}", e);
                } else {
                    log::error!("poll failed: {}", e);
                }
                self.stats.failures += 1;
                self.stats.last_error = Some(e.to_string());
                return PollOutcome::Failed(e);
            }
        };
        self.stats.last_success = Some(Local::now());
        self.stats.last_error = None;

        if !snapshot.is_consistent() {
            log::warn!(
                "inconsistent snapshot: length {} with {} blocks; skipping cycle",
                snapshot.length,
                snapshot.chain.len()
            );
            return PollOutcome::Inconsistent;
        }

        let delta = self.tracker.delta(&snapshot);
        if delta.is_empty() {
            return PollOutcome::Unchanged;
        }

        let did_render = self.renderer.render(delta.entries, delta.from, sink);
        overlay.on_render(did_render, now, sink);
        if !did_render {
            log::debug!("log view not mounted, holding {} blocks", delta.entries.len());
            return PollOutcome::Deferred;
        }

        self.tracker.commit(&delta);
        log::info!(
            "rendered {} new block(s), {} observed",
            delta.entries.len(),
            self.tracker.observed()
        );
        PollOutcome::Rendered {
            entries: delta.entries.len(),
            observed: self.tracker.observed(),
        }
    }

    /// One complete cycle against `source`, awaiting the fetch in place.
    pub async fn run_cycle<C: ChainSource, S: LogSink + ?Sized>(
        &mut self,
        source: &C,
        sink: &mut S,
        overlay: &mut OverlayController,
    ) -> PollOutcome {
        if !self.try_begin() {
            return PollOutcome::Skipped;
        }
        let result = source.fetch().await;
        self.complete(result, sink, overlay, Instant::now())
    }
}

#[derive(Debug)]
pub enum SchedulerEvent {
    /// The interval fired.
    Due,
    Fetched(ChainwatchResult<ChainSnapshot>),
}

/// Owns the polling timer and the background fetch task.
///
/// The first tick fires immediately. Missed ticks are skipped rather than bunched up.
pub struct PollScheduler<C: ChainSource> {
    source: Arc<C>,
    interval: Interval,
    results_tx: mpsc::Sender<ChainwatchResult<ChainSnapshot>>,
    results_rx: mpsc::Receiver<ChainwatchResult<ChainSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl<C: ChainSource> PollScheduler<C> {
    pub fn new(source: Arc<C>, period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (results_tx, results_rx) = mpsc::channel(4);
        Self {
            source,
            interval,
            results_tx,
            results_rx,
            task: None,
        }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Waits for the next tick or fetch result, whichever comes first.
    pub async fn next(&mut self) -> SchedulerEvent {
        tokio::select! {
            biased;
            Some(result) = self.results_rx.recv() => SchedulerEvent::Fetched(result),
            _ = self.interval.tick() => SchedulerEvent::Due,
        }
    }

    /// Starts a fetch in the background; its result arrives through [`next`](Self::next).
    pub fn spawn_fetch(&mut self) {
        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = tx.send(result).await;
        }));
    }

    /// Cancels any outstanding fetch.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<C: ChainSource> Drop for PollScheduler<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
