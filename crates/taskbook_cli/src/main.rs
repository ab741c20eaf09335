//! Command-line surface for the Taskbook core.
//!
//! # Responsibility
//! - Map add/list/edit/toggle/rm commands onto `taskbook_core` services.
//! - Resolve the database location and wire up core logging.
//!
//! # Invariants
//! - All mutations go through `TaskService`; the CLI never touches SQL.
//! - Failures print the error to stderr and exit nonzero.

use chrono::{Local, TimeZone};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use taskbook_core::db::open_db;
use taskbook_core::{
    default_log_level, init_logging, SqliteTaskRepository, Task, TaskFilter, TaskId, TaskService,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "taskbook.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "taskbook", version, about = "Local to-do list")]
struct Cli {
    /// Database file path. Defaults to the platform data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log directory. Defaults to a `logs` dir next to the database.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new task.
    Add {
        /// Task title (non-empty, at most 100 characters).
        title: String,
        /// Optional longer description (at most 500 characters).
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List tasks.
    List(ListArgs),
    /// Edit title and/or description of an existing task.
    Edit {
        /// Task id, or an unambiguous id prefix.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle completion of a task.
    Toggle {
        /// Task id, or an unambiguous id prefix.
        id: String,
    },
    /// Delete a task.
    Rm {
        /// Task id, or an unambiguous id prefix.
        id: String,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Show only tasks that are not completed.
    #[arg(long, conflicts_with = "completed")]
    active: bool,
    /// Show only completed tasks.
    #[arg(long, conflicts_with = "active")]
    completed: bool,
}

impl ListArgs {
    fn filter(&self) -> TaskFilter {
        if self.active {
            TaskFilter::Active
        } else if self.completed {
            TaskFilter::Completed
        } else {
            TaskFilter::All
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let db_path = resolve_db_path(cli.db)?;
    setup_logging(cli.log_level.as_deref(), cli.log_dir, &db_path);

    let conn = open_db(&db_path).map_err(|err| format!("cannot open database: {err}"))?;
    let repo =
        SqliteTaskRepository::try_new(&conn).map_err(|err| format!("storage rejected: {err}"))?;
    let service = TaskService::new(repo);

    match cli.command {
        Command::Add { title, description } => {
            let task = service
                .add_task(&title, &description)
                .map_err(|err| err.to_string())?;
            info!("event=cli_add module=cli status=ok id={}", task.id);
            println!("added {}", short_id(task.id));
        }
        Command::List(args) => {
            let tasks = service
                .list_tasks(args.filter())
                .map_err(|err| err.to_string())?;
            if tasks.is_empty() {
                println!("no tasks");
            }
            for task in &tasks {
                print_task(task);
            }
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                return Err("nothing to change: pass --title and/or --description".to_string());
            }
            let id = resolve_id(&service, &id)?;
            let current = service
                .get_task(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("task not found: {id}"))?;
            let updated = service
                .update_task(
                    id,
                    title.as_deref().unwrap_or(&current.title),
                    description.as_deref().unwrap_or(&current.description),
                )
                .map_err(|err| err.to_string())?;
            info!("event=cli_edit module=cli status=ok id={}", updated.id);
            println!("updated {}", short_id(updated.id));
        }
        Command::Toggle { id } => {
            let id = resolve_id(&service, &id)?;
            let task = service.toggle_task(id).map_err(|err| err.to_string())?;
            info!(
                "event=cli_toggle module=cli status=ok id={} completed={}",
                task.id, task.completed
            );
            println!(
                "{} is now {}",
                short_id(task.id),
                if task.completed { "done" } else { "open" }
            );
        }
        Command::Rm { id } => {
            let id = resolve_id(&service, &id)?;
            service.delete_task(id).map_err(|err| err.to_string())?;
            info!("event=cli_rm module=cli status=ok id={id}");
            println!("deleted {}", short_id(id));
        }
    }

    Ok(())
}

fn setup_logging(level: Option<&str>, log_dir: Option<PathBuf>, db_path: &std::path::Path) {
    let log_dir = log_dir.unwrap_or_else(|| {
        db_path
            .parent()
            .map_or_else(|| PathBuf::from("/tmp"), |parent| parent.join("logs"))
    });
    let level = level.unwrap_or_else(|| default_log_level());

    // Logging failures must not block task commands.
    if let Err(message) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {message}");
    }
}

fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::data_dir().ok_or("cannot determine platform data directory; pass --db")?;
    let app_dir = base.join("taskbook");
    std::fs::create_dir_all(&app_dir)
        .map_err(|err| format!("cannot create data directory `{}`: {err}", app_dir.display()))?;
    Ok(app_dir.join(DB_FILE_NAME))
}

/// Resolves an id argument that may be a full uuid or a prefix.
fn resolve_id<R: taskbook_core::TaskRepository>(
    service: &TaskService<R>,
    input: &str,
) -> Result<TaskId, String> {
    let input = input.trim();
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }
    if input.is_empty() {
        return Err("task id cannot be empty".to_string());
    }

    let tasks = service
        .list_tasks(TaskFilter::All)
        .map_err(|err| err.to_string())?;
    let matches: Vec<TaskId> = tasks
        .iter()
        .map(|task| task.id)
        .filter(|id| id.to_string().starts_with(&input.to_ascii_lowercase()))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no task matches id `{input}`")),
        [only] => Ok(*only),
        many => Err(format!("id `{input}` is ambiguous ({} matches)", many.len())),
    }
}

fn print_task(task: &Task) {
    let marker = if task.completed { "x" } else { " " };
    println!(
        "[{marker}] {}  {}  ({})",
        short_id(task.id),
        task.title,
        format_timestamp(task.created_at_ms)
    );
    if !task.description.is_empty() {
        println!("          {}", task.description);
    }
}

fn short_id(id: TaskId) -> String {
    id.to_string().chars().take(8).collect()
}

fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms) {
        chrono::LocalResult::Single(time) => time.format("%b %d, %Y %H:%M").to_string(),
        _ => format!("{epoch_ms}ms"),
    }
}
