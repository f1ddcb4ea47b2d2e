//! Small numeric helpers shared by the dashboard aggregates.

use chrono::{Local, NaiveDateTime, TimeZone};

/// Arithmetic mean. Returns 0.0 if the slice is empty.
pub fn moyenne(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Formats with exactly one decimal, "0" when there is nothing to average.
///
/// Rounds half away from zero first; `{:.1}` alone would send 4.25 to "4.2".
pub fn format_one_decimal(values: &[f64]) -> String {
    if values.is_empty() {
        return "0".to_string();
    }
    format!("{:.1}", round1(moyenne(values)))
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days elapsed between two local wall-clock times, floored like a
/// millisecond division.
pub fn elapsed_days(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    elapsed_days_in(&Local, from, to)
}

/// Same as [`elapsed_days`], measured on the instants of `tz`, so a DST shift
/// between the two times counts for what it really lasted. Times that do not
/// exist in `tz` fall back to wall-clock arithmetic.
pub fn elapsed_days_in<Tz: TimeZone>(tz: &Tz, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let millis = match (
        tz.from_local_datetime(&from).earliest(),
        tz.from_local_datetime(&to).earliest(),
    ) {
        (Some(start), Some(end)) => (end - start).num_milliseconds(),
        _ => (to - from).num_milliseconds(),
    };
    millis.div_euclid(MILLIS_PER_DAY)
}
