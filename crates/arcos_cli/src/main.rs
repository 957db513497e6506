//! CLI entry point for inspecting a dashboard database.
//!
//! # Responsibility
//! - Build the dashboard from environment configuration and print a
//!   deterministic board summary.
//! - `arcos search <query>` lists notes matching a title/tag query.

use arcos_core::db::open_db;
use arcos_core::{
    core_version, init_logging, CoreConfig, Dashboard, SqliteSlotRepository, KNOWN_COLUMNS,
};
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("arcos: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let dashboard = Dashboard::open(repo)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("search") => print_search(&dashboard, &args[1..].join(" ")),
        Some(other) => return Err(format!("unknown command `{other}`").into()),
        None => print_summary(&dashboard, &config),
    }
    Ok(())
}

fn print_summary(dashboard: &Dashboard<SqliteSlotRepository<'_>>, config: &CoreConfig) {
    println!("arcos core version={}", core_version());
    println!("database={}", config.db_path.display());

    for column in KNOWN_COLUMNS {
        let tasks: Vec<_> = dashboard.tasks.in_column(column).collect();
        println!("[{column}] {}", tasks.len());
        for task in tasks {
            let bounty = task
                .bounty
                .as_deref()
                .map(|value| format!(" ({value})"))
                .unwrap_or_default();
            println!("  - {}{bounty}", task.content);
        }
    }

    let other = dashboard
        .tasks
        .tasks()
        .iter()
        .filter(|task| !arcos_core::is_known_column(&task.column_id))
        .count();
    if other > 0 {
        println!("[other] {other}");
    }

    println!("notes={}", dashboard.notes.notes().len());
    let workspace = dashboard.workspace.metadata();
    if dashboard.workspace.has_data() {
        println!("workspace description={}", workspace.description);
    } else {
        println!("workspace (empty)");
    }
}

fn print_search(dashboard: &Dashboard<SqliteSlotRepository<'_>>, query: &str) {
    for note in dashboard.notes.search(query) {
        let tags = note.tags.join(", ");
        println!("{}  {}  [{tags}]", note.id, note.title);
    }
}
