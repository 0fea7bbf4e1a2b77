use chrono::Datelike;
use serde::Serialize;

use crate::model::item::{Event, Task};
use crate::sched::grid::CalendarCell;
use crate::sched::window::AgendaDay;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AgendaDayJson<'a> {
    pub offset: i64,
    pub date: String,
    pub is_today: bool,
    pub tasks: &'a [Task],
    pub events: &'a [Event],
}

#[derive(Serialize)]
pub struct AgendaJson<'a> {
    pub days: Vec<AgendaDayJson<'a>>,
}

#[derive(Serialize)]
pub struct CellJson<'a> {
    pub date: String,
    pub month: u32,
    pub day: u32,
    pub in_month: bool,
    pub events: &'a [Event],
}

#[derive(Serialize)]
pub struct MonthJson<'a> {
    pub month: String,
    pub rows: Vec<Vec<CellJson<'a>>>,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub tasks: &'a [Task],
    pub events: &'a [Event],
}

pub fn agenda_json<'a>(days: &'a [AgendaDay]) -> AgendaJson<'a> {
    AgendaJson {
        days: days
            .iter()
            .map(|day| AgendaDayJson {
                offset: day.offset,
                date: day.date.to_string(),
                is_today: day.is_today,
                tasks: &day.tasks,
                events: &day.events,
            })
            .collect(),
    }
}

pub fn month_json<'a>(label: String, grid: &'a [Vec<CalendarCell>]) -> MonthJson<'a> {
    MonthJson {
        month: label,
        rows: grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| CellJson {
                        date: cell.date.to_string(),
                        month: cell.month,
                        day: cell.day,
                        in_month: cell.in_reference_month,
                        events: &cell.events,
                    })
                    .collect()
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

const WEEKDAY_HEADER: &str = "  mon   tue   wed   thu   fri   sat   sun";

/// First eight bytes of an id, or the whole id when it is shorter. Ids are
/// opaque strings; documents written by other tools may carry short ones.
pub fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

pub fn render_task_line(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!(
        "  [{}] {}  {}  (due {})",
        mark,
        short_id(&task.id),
        task.title,
        task.end_date.date()
    )
}

pub fn render_event_line(event: &Event) -> String {
    let start = event.start_date.date();
    let end = event.end_date.date();
    let span = if start == end {
        start.to_string()
    } else {
        format!("{start} .. {end}")
    };
    format!("   *  {}  {}  ({span})", short_id(&event.id), event.title)
}

pub fn render_agenda(days: &[AgendaDay]) -> String {
    let mut out = String::new();
    for day in days {
        let marker = if day.is_today { "  <- today" } else { "" };
        out.push_str(&format!(
            "-- {} {}{}\n",
            day.date,
            day.date.weekday(),
            marker
        ));
        if day.is_empty() {
            out.push_str("      nothing scheduled\n");
            continue;
        }
        for task in &day.tasks {
            out.push_str(&render_task_line(task));
            out.push('\n');
        }
        for event in &day.events {
            out.push_str(&render_event_line(event));
            out.push('\n');
        }
    }
    out
}

pub fn render_month(label: &str, grid: &[Vec<CalendarCell>]) -> String {
    let mut out = format!("{label}\n{WEEKDAY_HEADER}\n");
    for row in grid {
        for cell in row {
            let marker = if cell.events.is_empty() { ' ' } else { '*' };
            if cell.in_reference_month {
                out.push_str(&format!("  {:>2}{} ", cell.day, marker));
            } else {
                // Overflow days render parenthesized
                out.push_str(&format!(" ({:>2}{})", cell.day, marker));
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_list(tasks: &[Task], events: &[Event]) -> String {
    let mut out = String::new();
    if !tasks.is_empty() {
        out.push_str("tasks:\n");
        for task in tasks {
            out.push_str(&render_task_line(task));
            out.push('\n');
        }
    }
    if !events.is_empty() {
        out.push_str("events:\n");
        for event in events {
            out.push_str(&render_event_line(event));
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("nothing stored\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::sched::grid::build_month_grid;
    use crate::sched::window::AgendaWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_on(d: NaiveDate, title: &str, completed: bool) -> Task {
        let start = d.and_hms_opt(9, 0, 0).unwrap();
        Task {
            id: "0123456789abcdef".into(),
            title: title.into(),
            description: String::new(),
            start_date: start,
            end_date: start,
            completed,
        }
    }

    #[test]
    fn agenda_marks_today_and_empty_days() {
        let today = date(2024, 3, 1);
        let tasks = vec![task_on(today, "Pay rent", false)];
        let window = AgendaWindow::new(today);
        let text = render_agenda(&window.days(&tasks, &[]));

        assert!(text.contains("-- 2024-03-01 Fri  <- today"));
        assert!(text.contains("[ ] 01234567  Pay rent"));
        assert!(text.contains("nothing scheduled"));
    }

    #[test]
    fn short_id_never_slices_past_the_end() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("t1"), "t1");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn completed_tasks_render_with_an_x() {
        let line = render_task_line(&task_on(date(2024, 3, 1), "Pay rent", true));
        assert!(line.starts_with("  [x]"));
    }

    #[test]
    fn month_render_parenthesizes_overflow_days() {
        let text = render_month("May 2024", &build_month_grid(date(2024, 5, 1), &[]));
        let first_data_row = text.lines().nth(2).unwrap();
        assert!(first_data_row.contains("(29 )"));
        assert!(first_data_row.contains("(30 )"));
        assert!(first_data_row.contains(" 1 "));
    }

    #[test]
    fn agenda_json_shape_is_stable() {
        let today = date(2024, 3, 1);
        let window = AgendaWindow::new(today);
        let days = window.days(&[], &[]);
        let value = serde_json::to_value(agenda_json(&days)).unwrap();
        assert_eq!(value["days"][0]["date"], "2024-03-01");
        assert_eq!(value["days"][0]["is_today"], true);
        assert_eq!(value["days"][0]["offset"], 0);
    }
}
