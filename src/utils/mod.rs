// Utility functions
pub mod error;
pub mod validation;

pub use error::*;

/// Current time as Unix milliseconds, the timestamp format stored in every collection
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
