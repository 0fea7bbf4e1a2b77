mod init;
pub use init::cmd_init;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::config_io;
use crate::io::data_dir::resolve_data_dir;
use crate::model::item::{Event, EventDraft, Item, ItemDraft, Task, TaskDraft};
use crate::ops::repository::Repository;
use crate::sched::grid::build_month_grid;
use crate::sched::window::AgendaWindow;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let override_root = cli.data_dir.as_deref();

    match cli.command {
        // Init runs before data-directory discovery
        Commands::Init(args) => cmd_init(args, override_root),
        command => {
            let repo = Repository::open(&resolve_data_dir(override_root)?);
            match command {
                Commands::Init(_) => unreachable!("handled above"),
                Commands::Add(args) => cmd_add(args, &repo, json),
                Commands::List(args) => cmd_list(args, &repo, json),
                Commands::Done(args) => cmd_done(args, &repo, json),
                Commands::Edit(args) => cmd_edit(args, &repo, json),
                Commands::Rm(args) => cmd_rm(args, &repo),
                Commands::Agenda(args) => cmd_agenda(args, &repo, json),
                Commands::Month(args) => cmd_month(args, &repo, json),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, repo: &Repository, json: bool) -> CmdResult {
    let start = match &args.start {
        Some(text) => parse_datetime(text)?,
        None => Local::now().naive_local(),
    };
    let end = match &args.end {
        Some(text) => parse_datetime(text)?,
        None => start,
    };
    if end < start {
        return Err("end date is before start date".into());
    }

    let draft = if args.event {
        ItemDraft::Event(EventDraft {
            title: args.title,
            description: args.desc,
            start_date: start,
            end_date: end,
        })
    } else {
        ItemDraft::Task(TaskDraft {
            title: args.title,
            description: args.desc,
            start_date: start,
            end_date: end,
            completed: false,
        })
    };

    let item = repo.add(draft)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&item_json(&item)?)?);
    } else {
        println!(
            "added {} {}  \"{}\"",
            kind_name(&item),
            output::short_id(item.id()),
            item.title()
        );
    }
    Ok(())
}

fn cmd_done(args: DoneArgs, repo: &Repository, json: bool) -> CmdResult {
    let mut task = find_task(repo, &args.id)?;
    task.completed = !task.completed;
    let completed = task.completed;
    let tasks = repo.update_task(task.clone())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        let verb = if completed { "completed" } else { "reopened" };
        println!(
            "{} task {}  \"{}\"",
            verb,
            output::short_id(&task.id),
            task.title
        );
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, repo: &Repository, json: bool) -> CmdResult {
    let item = require_item(repo, &args.id)?;
    let start = args.start.as_deref().map(parse_datetime).transpose()?;
    let end = args.end.as_deref().map(parse_datetime).transpose()?;

    let updated = match item {
        Item::Task(mut task) => {
            apply_edits(&mut task.title, &mut task.description, args.title, args.desc);
            task.start_date = start.unwrap_or(task.start_date);
            task.end_date = end.unwrap_or(task.end_date);
            if task.end_date < task.start_date {
                return Err("end date is before start date".into());
            }
            let edited = task.clone();
            repo.update_task(task)?;
            Item::Task(edited)
        }
        Item::Event(mut event) => {
            apply_edits(
                &mut event.title,
                &mut event.description,
                args.title,
                args.desc,
            );
            event.start_date = start.unwrap_or(event.start_date);
            event.end_date = end.unwrap_or(event.end_date);
            if event.end_date < event.start_date {
                return Err("end date is before start date".into());
            }
            let edited = event.clone();
            repo.update_event(event)?;
            Item::Event(edited)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&item_json(&updated)?)?);
    } else {
        println!(
            "updated {} {}  \"{}\"",
            kind_name(&updated),
            output::short_id(updated.id()),
            updated.title()
        );
    }
    Ok(())
}

fn cmd_rm(args: RmArgs, repo: &Repository) -> CmdResult {
    let item = require_item(repo, &args.id)?;
    match &item {
        Item::Task(task) => {
            repo.remove_task(task)?;
        }
        Item::Event(event) => {
            repo.remove_event(event)?;
        }
    }
    println!(
        "removed {} {}  \"{}\"",
        kind_name(&item),
        output::short_id(item.id()),
        item.title()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, repo: &Repository, json: bool) -> CmdResult {
    let only_tasks = args.tasks;
    let only_events = args.events;

    let tasks: Vec<Task> = if only_events {
        Vec::new()
    } else {
        repo.load_tasks()?
    };
    let events: Vec<Event> = if only_tasks {
        Vec::new()
    } else {
        repo.load_events()?
    };

    if json {
        let out = output::ListJson {
            tasks: &tasks,
            events: &events,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", output::render_list(&tasks, &events));
    }
    Ok(())
}

fn cmd_agenda(args: AgendaArgs, repo: &Repository, json: bool) -> CmdResult {
    let config = config_io::read_config(repo.data_dir())?;
    let mut window =
        AgendaWindow::with_config(Local::now().date_naive(), &config.agenda, &config.filters);
    if args.no_tasks {
        window.set_task_filter(false);
    }
    if args.no_events {
        window.set_event_filter(false);
    }
    for _ in 0..args.back {
        window.expand_backward();
    }
    for _ in 0..args.forward {
        window.expand_forward();
    }

    let tasks = repo.load_tasks()?;
    let events = repo.load_events()?;
    let days = window.days(&tasks, &events);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::agenda_json(&days))?
        );
    } else {
        print!("{}", output::render_agenda(&days));
    }
    Ok(())
}

fn cmd_month(args: MonthArgs, repo: &Repository, json: bool) -> CmdResult {
    let reference = match &args.month {
        Some(text) => parse_month(text)?,
        None => Local::now().date_naive(),
    };
    let events = repo.load_events()?;
    let grid = build_month_grid(reference, &events);
    let label = reference.format("%B %Y").to_string();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::month_json(label, &grid))?
        );
    } else {
        print!("{}", output::render_month(&label, &grid));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM[:SS]`.
fn parse_datetime(text: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(format!("invalid date '{text}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM)").into())
}

/// Parse `YYYY-MM` into the first day of that month.
fn parse_month(text: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
        .map_err(|_| format!("invalid month '{text}' (expected YYYY-MM)").into())
}

fn require_item(repo: &Repository, id: &str) -> Result<Item, Box<dyn std::error::Error>> {
    repo.find(id)?
        .ok_or_else(|| format!("no task or event with id '{id}'").into())
}

fn find_task(repo: &Repository, id: &str) -> Result<Task, Box<dyn std::error::Error>> {
    match require_item(repo, id)? {
        Item::Task(task) => Ok(task),
        Item::Event(event) => Err(format!(
            "'{}' is an event; events have no completed state",
            event.title
        )
        .into()),
    }
}

fn apply_edits(
    title: &mut String,
    description: &mut String,
    new_title: Option<String>,
    new_desc: Option<String>,
) {
    if let Some(t) = new_title {
        *title = t;
    }
    if let Some(d) = new_desc {
        *description = d;
    }
}

fn kind_name(item: &Item) -> &'static str {
    match item {
        Item::Task(_) => "task",
        Item::Event(_) => "event",
    }
}

fn item_json(item: &Item) -> Result<serde_json::Value, serde_json::Error> {
    let mut value = match item {
        Item::Task(task) => serde_json::to_value(task)?,
        Item::Event(event) => serde_json::to_value(event)?,
    };
    if let Some(object) = value.as_object_mut() {
        object.insert("kind".to_string(), kind_name(item).into());
    }
    Ok(value)
}
