// UI Constants
pub const APP_TITLE: &str = "Blockchain Ledger (Live)";
pub const TRIGGER_LABEL: &str = "View Blockchain Ledger";
pub const CLOSE_LABEL: &str = "Close Overlay";
pub const STATUS_DOT: &str = "●";
pub const GENESIS_LABEL: &str = "GENESIS BLOCK INITIALIZED";
pub const FOOTER_RULE_WIDTH: usize = 80;
pub const UI_TICK_MS: u64 = 100;

// Polling Constants
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHAIN_PATH: &str = "/chain";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_FLASH_MS: u64 = 500;
