use chrono::Utc;

pub const DAY_MS: i64 = 86_400_000;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
