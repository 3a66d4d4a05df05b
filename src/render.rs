// src/render.rs

use crate::constants::{FOOTER_RULE_WIDTH, GENESIS_LABEL};
use crate::models::Block;
use crate::utils::{display_value, plural};
use chrono::{Local, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    BatchHeader,
    Genesis,
    BlockLabel,
    Timestamp,
    Field,
    Hash,
    PreviousHash,
    LinkWarning,
    BatchFooter,
    Spacer,
}

impl FragmentKind {
    /// Hashes are opaque identifiers and get their own styling.
    pub fn is_hash(self) -> bool {
        matches!(self, FragmentKind::Hash | FragmentKind::PreviousHash)
    }
}

/// One line of the ledger log. Never edited once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
    pub stamped_at: NaiveTime,
}

/// Where rendered fragments go.
pub trait LogSink {
    /// A sink that is not mounted yet swallows nothing: rendering into it is skipped.
    fn is_mounted(&self) -> bool {
        true
    }

    fn append(&mut self, fragment: Fragment);

    /// Moves the scroll position to the newest line and keeps following it.
    fn pin_to_end(&mut self);

    /// Lights or clears the new-activity highlight on the open affordance.
    fn set_notification(&mut self, lit: bool);
}

fn local_clock() -> NaiveTime {
    Local::now().time()
}

/// Turns batches of new blocks into fragments.
#[derive(Debug)]
pub struct EntryRenderer {
    clock: fn() -> NaiveTime,
    last_hash: Option<(u64, String)>,
}

impl Default for EntryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryRenderer {
    pub fn new() -> Self {
        Self {
            clock: local_clock,
            last_hash: None,
        }
    }

    pub fn with_clock(clock: fn() -> NaiveTime) -> Self {
        Self {
            clock,
            last_hash: None,
        }
    }

    /// Appends one batch to `sink` and reports whether anything was appended.
    ///
    /// `observed_before` is the observed count prior to this batch; block 0 arriving while it
    /// is 0 is the genesis block and is labeled as such.
    pub fn render<S: LogSink + ?Sized>(
        &mut self,
        entries: &[Block],
        observed_before: usize,
        sink: &mut S,
    ) -> bool {
        if entries.is_empty() || !sink.is_mounted() {
            return false;
        }

        let now = (self.clock)();
        let mut push = |kind: FragmentKind, text: String| {
            sink.append(Fragment {
                kind,
                text,
                stamped_at: now,
            })
        };

        push(
            FragmentKind::BatchHeader,
            format!(
                ">>> {} new block{} on the ledger",
                entries.len(),
                plural(entries.len())
            ),
        );

        for block in entries {
            if observed_before == 0 && block.is_genesis() {
                push(FragmentKind::Genesis, GENESIS_LABEL.to_string());
            } else {
                push(FragmentKind::BlockLabel, format!("NEW VOTE BLOCK #{}", block.index));
                push(
                    FragmentKind::Timestamp,
                    format!("Timestamp: {}", display_value(&block.timestamp)),
                );
                for (key, value) in &block.payload {
                    push(FragmentKind::Field, format!("{key}: {}", display_value(value)));
                }
            }

            push(FragmentKind::Hash, format!("Hash: {}", block.hash));
            push(FragmentKind::PreviousHash, format!("Prev: {}", block.previous_hash));

            if let Some((prev_index, prev_hash)) = &self.last_hash {
                if *prev_index + 1 == block.index && *prev_hash != block.previous_hash {
                    log::warn!(
                        "block #{} does not link to block #{}: previous_hash {} != {}",
                        block.index,
                        prev_index,
                        block.previous_hash,
                        prev_hash
                    );
                    push(
                        FragmentKind::LinkWarning,
                        format!("!! previous_hash does not match block #{prev_index}"),
                    );
                }
            }
            self.last_hash = Some((block.index, block.hash.clone()));
        }

        push(FragmentKind::BatchFooter, "-".repeat(FOOTER_RULE_WIDTH));
        push(FragmentKind::Spacer, String::new());
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Headless sink that records everything it is told.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub fragments: Vec<Fragment>,
        pub pins: usize,
        pub notifications: Vec<bool>,
        pub unmounted: bool,
    }

    impl RecordingSink {
        pub fn count(&self, kind: FragmentKind) -> usize {
            self.fragments.iter().filter(|f| f.kind == kind).count()
        }

        pub fn texts(&self, kind: FragmentKind) -> Vec<&str> {
            self.fragments
                .iter()
                .filter(|f| f.kind == kind)
                .map(|f| f.text.as_str())
                .collect()
        }
    }

    impl LogSink for RecordingSink {
        fn is_mounted(&self) -> bool {
            !self.unmounted
        }

        fn append(&mut self, fragment: Fragment) {
            self.fragments.push(fragment);
        }

        fn pin_to_end(&mut self) {
            self.pins += 1;
        }

        fn set_notification(&mut self, lit: bool) {
            self.notifications.push(lit);
        }
    }
}
