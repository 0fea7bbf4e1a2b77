use chrono::{Datelike, NaiveDate};

use crate::model::item::Event;
use crate::util::time::{add_days, days_in_month, start_of_month, weekday_index};

/// Columns per week row, Monday through Sunday.
pub const GRID_COLUMNS: usize = 7;

/// One day slot in a month grid. Leading and trailing cells belong to the
/// neighboring months that complete the first and last week rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Calendar month number of this cell's own date, which differs from the
    /// reference month in overflow cells.
    pub month: u32,
    pub day: u32,
    pub in_reference_month: bool,
    /// Stored events whose start date falls on this calendar day.
    pub events: Vec<Event>,
}

/// Build the week-row grid for the month containing `reference`.
///
/// The first row starts on the Monday of the week containing day 1, so the
/// number of leading overflow cells equals day 1's weekday index. Rows are
/// emitted until the month's last day is covered, giving 4 to 6 rows, and
/// the last row is padded into the next month to a full week. Tasks never
/// appear on the grid; each cell carries the events starting that day.
pub fn build_month_grid(reference: NaiveDate, events: &[Event]) -> Vec<Vec<CalendarCell>> {
    let first = start_of_month(reference);
    let leading = weekday_index(first) as i64;
    let grid_start = add_days(first, -leading);
    let columns = GRID_COLUMNS as i64;
    // Ceiling division; leading and the month length are both non-negative
    let rows = (leading + days_in_month(reference) + columns - 1) / columns;

    (0..rows)
        .map(|row| {
            (0..GRID_COLUMNS as i64)
                .map(|column| {
                    let date = add_days(grid_start, row * GRID_COLUMNS as i64 + column);
                    cell_for(date, first, events)
                })
                .collect()
        })
        .collect()
}

fn cell_for(date: NaiveDate, first_of_month: NaiveDate, events: &[Event]) -> CalendarCell {
    let events_of_day = events
        .iter()
        .filter(|event| event.start_date.date() == date)
        .cloned()
        .collect();
    CalendarCell {
        date,
        month: date.month(),
        day: date.day(),
        in_reference_month: date.month() == first_of_month.month()
            && date.year() == first_of_month.year(),
        events: events_of_day,
    }
}
