//! Application-level configuration constants.

use log::LevelFilter;

// Resources
pub const EXP_TABLE_URL: &str = "1.csv";
pub const VISIT_COUNT_URL: &str = "/visit-count";
pub const VISIT_COUNT_TODAY_URL: &str = "/visit-count-today";

// Acceleration items
pub const ACCEL_HOURS_PER_ITEM: f64 = 2.0;
pub const MIN_ACCEL_COUNT: i32 = 0;
pub const MAX_DAILY_ACCEL: i32 = 10;
pub const MAX_STONE_ACCEL: i32 = 50;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

// UI behavior
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub const COUNTER_PLACEHOLDER: &str = "unavailable";
pub const FALLBACK_LOCALE: &str = "en-US";
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

// Default values for input fields
pub const DEFAULT_ACCEL_COUNT: &str = "0";
