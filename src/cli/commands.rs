use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dp", about = concat!("dayplan v", env!("CARGO_PKG_VERSION"), " - tasks and events, day by day"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace root
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a .dayplan data directory here
    Init(InitArgs),
    /// Add a task (or, with --event, an event)
    Add(AddArgs),
    /// List stored tasks and events
    List(ListArgs),
    /// Toggle a task's completed state
    Done(DoneArgs),
    /// Edit fields of an existing task or event
    Edit(EditArgs),
    /// Remove a task or event
    Rm(RmArgs),
    /// Show the scrolling day-by-day agenda
    Agenda(AgendaArgs),
    /// Show a month calendar grid
    Month(MonthArgs),
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if .dayplan/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Title of the new item
    pub title: String,
    /// Create an event instead of a task
    #[arg(long)]
    pub event: bool,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub desc: String,
    /// Start (YYYY-MM-DD or YYYY-MM-DDTHH:MM; default: now)
    #[arg(long)]
    pub start: Option<String>,
    /// End / due date (default: same as start)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task id (or unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item id (or unique prefix)
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Item id (or unique prefix)
    pub id: String,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks
    #[arg(long, conflicts_with = "events")]
    pub tasks: bool,
    /// Only events
    #[arg(long)]
    pub events: bool,
}

#[derive(Args)]
pub struct AgendaArgs {
    /// Expand the window backward this many times before rendering
    #[arg(long, default_value_t = 0)]
    pub back: u32,
    /// Expand the window forward this many times before rendering
    #[arg(long, default_value_t = 0)]
    pub forward: u32,
    /// Hide tasks regardless of the configured filter
    #[arg(long)]
    pub no_tasks: bool,
    /// Hide events regardless of the configured filter
    #[arg(long)]
    pub no_events: bool,
}

#[derive(Args)]
pub struct MonthArgs {
    /// Month to show as YYYY-MM (default: the current month)
    pub month: Option<String>,
}
