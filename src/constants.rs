//! Constants used throughout the application
//!
//! This module centralizes magic strings, default values, and validation
//! bounds to improve maintainability and consistency.

// Remote API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TOKEN_ENV: &str = "LANEBOARD_API_TOKEN";

// Request timeout bounds (seconds)
pub const REQUEST_TIMEOUT_DEFAULT_SECS: u64 = 30;
pub const REQUEST_TIMEOUT_MIN_SECS: u64 = 1;
pub const REQUEST_TIMEOUT_MAX_SECS: u64 = 300;

// Synthetic lane used for items whose declared lane is unknown at load time.
// Nothing is dropped on the floor; such items stay visible here.
pub const SYNTHETIC_LANE_ID: &str = "unassigned";
pub const SYNTHETIC_LANE_NAME: &str = "Unassigned";

// Config messages
pub const CONFIG_GENERATED: &str = "Configuration file generated";

// Log messages
pub const LOG_FETCHED_PROJECT: &str = "Fetched project metadata";
pub const LOG_FETCHED_LANES: &str = "Fetched lane definitions";
pub const LOG_FETCHED_ITEMS: &str = "Fetched board items";
pub const LOG_BOARD_READY: &str = "Board initialized";
