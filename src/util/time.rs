use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// True iff both timestamps fall on the same local calendar date.
/// Time-of-day is ignored.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// First calendar day of the month containing `reference`.
pub fn start_of_month(reference: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month, so this cannot fail.
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap()
}

/// Weekday column index with an ISO week start: 0 = Monday … 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// Shift a date by `n` days (negative moves backward).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Last calendar day of the month before the one containing `reference`.
pub fn last_day_of_previous_month(reference: NaiveDate) -> NaiveDate {
    start_of_month(reference) - Duration::days(1)
}

/// Number of days in the month containing `reference`.
pub fn days_in_month(reference: NaiveDate) -> i64 {
    let first = start_of_month(reference);
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    };
    (next - first).num_days()
}
