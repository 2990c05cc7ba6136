//! Conversion between Postgres `INTERVAL` and [`Duration`]
//!
//! Months count as 30 days. Negative intervals clamp to zero since recipe
//! times cannot be negative.

use sqlx::postgres::types::PgInterval;
use std::time::Duration;

const MICROS_PER_DAY: i64 = 86_400_000_000;
const DAYS_PER_MONTH: i64 = 30;

pub fn to_duration(interval: &PgInterval) -> Duration {
    let days = i64::from(interval.months) * DAYS_PER_MONTH + i64::from(interval.days);
    let micros = days
        .saturating_mul(MICROS_PER_DAY)
        .saturating_add(interval.microseconds);

    u64::try_from(micros)
        .map(Duration::from_micros)
        .unwrap_or(Duration::ZERO)
}

/// Encode as a pure microsecond interval, saturating at `i64::MAX` microseconds.
pub fn from_duration(duration: Duration) -> PgInterval {
    PgInterval {
        months: 0,
        days: 0,
        microseconds: i64::try_from(duration.as_micros()).unwrap_or(i64::MAX),
    }
}
