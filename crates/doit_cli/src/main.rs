//! Terminal front end for the DoIt task list.
//!
//! # Responsibility
//! - Act as the display layer: start a session, forward one user intent,
//!   render the resulting list.
//! - Treat storage failures as fatal and exit non-zero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doit_core::db::open_db;
use doit_core::{
    init_logging, CoreConfig, ListChange, SqliteTaskRepository, Task, TaskListController,
    TaskListSession, TaskRepository,
};
use log::debug;
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "doit", version, about = "Local to-do list")]
struct Cli {
    /// JSON config file. Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level; only takes effect together with a log directory.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print the list as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

/// Indices refer to the displayed list, where 0 is the most recent task.
#[derive(Subcommand, Debug)]
enum Command {
    /// Show all tasks.
    List,
    /// Add a task.
    Add { text: String },
    /// Mark a task complete.
    Done { index: usize },
    /// Mark a task incomplete.
    Undo { index: usize },
    /// Replace a task's text.
    Edit { index: usize, text: String },
    /// Delete a task.
    Rm { index: usize },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    } else if log_level_ignored(&cli, &config) {
        eprintln!("warning: --log-level has no effect without --log-dir or a config log_dir");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = SqliteTaskRepository::try_new(&conn)?;

    let mut list = TaskListController::new(&store, config.list);
    let screen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&screen);
    list.subscribe(Box::new(move |change: ListChange, tasks: &[Task]| {
        debug!("event=list_change module=cli change={change:?} count={}", tasks.len());
        *sink.borrow_mut() = tasks.to_vec();
    }));

    let mut session = TaskListSession::new(list);
    session.start()?;
    apply(&mut session, cli.command.unwrap_or(Command::List))?;

    let tasks = screen.borrow();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*tasks)?);
    } else {
        render(&mut io::stdout().lock(), &tasks)?;
    }
    Ok(())
}

fn log_level_ignored(cli: &Cli, config: &CoreConfig) -> bool {
    cli.log_level.is_some() && config.log_dir.is_none()
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn apply<R: TaskRepository>(session: &mut TaskListSession<R>, command: Command) -> Result<()> {
    match command {
        Command::List => {}
        Command::Add { text } => {
            session.open_new_task();
            session.on_text_changed(text)?;
            session.save_editor()?;
        }
        Command::Done { index } => session.on_toggle(index, true)?,
        Command::Undo { index } => session.on_toggle(index, false)?,
        Command::Edit { index, text } => {
            session.on_swipe_right(index)?;
            session.on_text_changed(text)?;
            session.save_editor()?;
        }
        Command::Rm { index } => {
            session.on_swipe_left_confirmed(index)?;
        }
    }
    Ok(())
}

fn render(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks.");
    }
    for (index, task) in tasks.iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(out, "{index:>3}. [{mark}] {}", task.text)?;
    }
    Ok(())
}
