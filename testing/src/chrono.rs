//! A clock that stands still until told otherwise.
//!
//! Crates under test alias `chrono::Utc` to the `Utc` provided here so
//! that stored timestamps are predictable.

use chrono::{
    DateTime,
    TimeZone,
};
use std::cell::Cell;

pub const DEFAULT_TIMESTAMP: i64 = 1234567890;

thread_local! {
    static TIMESTAMP: Cell<i64> = const { Cell::new(DEFAULT_TIMESTAMP) };
}

/// Sets the timestamp returned by `Utc::now()` on the current thread.
pub fn set_timestamp(ts: i64) {
    TIMESTAMP.with(|cell| cell.set(ts));
}

pub struct Utc;

impl Utc {
    pub fn now() -> DateTime<chrono::Utc> {
        let ts = TIMESTAMP.with(Cell::get);
        chrono::Utc.timestamp_opt(ts, 0)
            .single()
            .expect("timestamp out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settable() {
        assert_eq!(Utc::now().timestamp(), DEFAULT_TIMESTAMP);
        set_timestamp(1500000000);
        assert_eq!(Utc::now().timestamp(), 1500000000);
        set_timestamp(DEFAULT_TIMESTAMP);
    }
}
