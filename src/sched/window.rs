use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::config::{AgendaConfig, FilterConfig};
use crate::model::item::{Event, Task};
use crate::util::time::add_days;

/// Days materialized when the window opens.
pub const INITIAL_DAYS_IN_VIEW: i64 = 20;
/// Days added per expand operation.
pub const EXPAND_STEP: i64 = 5;

/// A contiguous, signed-offset range of calendar days around "today",
/// expandable at either end and never shrinking.
///
/// The window itself is pure in-memory state; day entries are derived views
/// recomputed from the stored collections on every call to [`days`], never
/// mutated in place.
///
/// [`days`]: AgendaWindow::days
#[derive(Debug, Clone)]
pub struct AgendaWindow {
    today: NaiveDate,
    current_day_index: i64,
    days_in_view: i64,
    expand_step: i64,
    show_tasks: bool,
    show_events: bool,
}

/// One derived day entry of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay {
    /// Signed day offset from "today" (0 = today, negative = past).
    pub offset: i64,
    pub date: NaiveDate,
    /// Highlighting only; matching never depends on this.
    pub is_today: bool,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
}

impl AgendaDay {
    /// True when the day renders the "nothing scheduled" placeholder.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.events.is_empty()
    }

    /// Suggested start timestamp for creating a new item on this day.
    pub fn suggested_start(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

impl AgendaWindow {
    /// Open a window of [`INITIAL_DAYS_IN_VIEW`] days starting at today.
    pub fn new(today: NaiveDate) -> Self {
        AgendaWindow {
            today,
            current_day_index: 0,
            days_in_view: INITIAL_DAYS_IN_VIEW,
            expand_step: EXPAND_STEP,
            show_tasks: true,
            show_events: true,
        }
    }

    /// Open a window sized and filtered per configuration.
    pub fn with_config(today: NaiveDate, agenda: &AgendaConfig, filters: &FilterConfig) -> Self {
        AgendaWindow {
            today,
            current_day_index: 0,
            days_in_view: agenda.initial_days.max(1),
            expand_step: agenda.expand_step.max(1),
            show_tasks: filters.tasks,
            show_events: filters.events,
        }
    }

    /// Materialize earlier days: the start moves back by the step and the
    /// view grows by the same amount, so the forward boundary is unchanged.
    pub fn expand_backward(&mut self) {
        self.current_day_index -= self.expand_step;
        self.days_in_view += self.expand_step;
    }

    /// Materialize later days; the start is unchanged.
    pub fn expand_forward(&mut self) {
        self.days_in_view += self.expand_step;
    }

    /// Filters change which derived lists are non-empty, never the bounds.
    pub fn set_task_filter(&mut self, on: bool) {
        self.show_tasks = on;
    }

    pub fn set_event_filter(&mut self, on: bool) {
        self.show_events = on;
    }

    pub fn current_day_index(&self) -> i64 {
        self.current_day_index
    }

    pub fn days_in_view(&self) -> i64 {
        self.days_in_view
    }

    /// Derive the full run of day entries for the current bounds.
    pub fn days(&self, tasks: &[Task], events: &[Event]) -> Vec<AgendaDay> {
        (self.current_day_index..self.current_day_index + self.days_in_view)
            .map(|offset| self.day_at(offset, tasks, events))
            .collect()
    }

    fn day_at(&self, offset: i64, tasks: &[Task], events: &[Event]) -> AgendaDay {
        let date = add_days(self.today, offset);

        let tasks_of_day = if self.show_tasks {
            tasks
                .iter()
                .filter(|task| task.start_date.date() == date)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let events_of_day = if self.show_events {
            events
                .iter()
                .filter(|event| event_covers_day(event, date))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        AgendaDay {
            offset,
            date,
            is_today: offset == 0,
            tasks: tasks_of_day,
            events: events_of_day,
        }
    }
}

/// An event covers every calendar day from its start date through its end
/// date, both boundaries included.
pub fn event_covers_day(event: &Event, day: NaiveDate) -> bool {
    event.start_date.date() <= day && day <= event.end_date.date()
}
