// src/lib.rs

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod delta;
pub mod errors;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod poll_loop;
pub mod render;
pub mod status_indicator;
pub mod ui;
pub mod utils;

pub use crate::api::{ChainSource, FeedClient};
pub use crate::app::{App, AppState};
pub use crate::delta::{compute_delta, Delta, DeltaTracker};
pub use crate::errors::{ChainwatchError, ChainwatchResult};
pub use crate::log_view::LogView;
pub use crate::models::{Block, ChainSnapshot};
pub use crate::overlay::{OverlayController, OverlayInput, Visibility};
pub use crate::poll_loop::{PollLoop, PollOutcome, PollScheduler};
pub use crate::render::{EntryRenderer, Fragment, FragmentKind, LogSink};
