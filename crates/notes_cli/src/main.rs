//! Command-line front end for `notes_core`.
//!
//! # Responsibility
//! - Exercise date conversion and status resolution from a shell.
//! - List tasks from the configured task service.
//! - Manage device-local notes in a SQLite file.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::{info, warn};
use notes_core::date::{format_localized, from_iso, parse_localized, to_iso};
use notes_core::{
    default_log_level, init_logging, open_db, resolve_status, CalendarDate, ClientConfig,
    HttpTaskAccess, LocalNote, LocalNoteStore, Locale, SqliteKvStore, TaskService, TaskSort,
};
use std::path::{Path, PathBuf};

/// notes - command-line client for the notes app core
#[derive(Parser, Debug)]
#[command(name = "notes", version, about = "Command-line client for the notes app core")]
struct Cli {
    /// Write logs to this absolute directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Display locale (overrides NOTES_LOCALE)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show core version
    Version,

    /// Convert a date between localized text and ISO-8601
    Convert {
        /// ISO date, localized date, or the no-deadline label
        text: String,
    },

    /// Resolve the display status of a task
    Status {
        /// Deadline as ISO-8601 or localized date
        #[arg(long)]
        deadline: Option<String>,

        /// Task is completed
        #[arg(long)]
        completed: bool,

        /// Evaluate on this ISO date instead of today
        #[arg(long)]
        today: Option<String>,
    },

    /// List tasks from the task service
    List {
        /// Server ordering: deadline | created
        #[arg(long)]
        sort: Option<TaskSort>,

        /// Task service root (overrides NOTES_API_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Manage device-local notes
    Local {
        /// SQLite database file
        #[arg(long, default_value = "notes.db")]
        db: PathBuf,

        #[command(subcommand)]
        action: LocalAction,
    },
}

impl Command {
    /// Stable name used in log events.
    fn name(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Convert { .. } => "convert",
            Self::Status { .. } => "status",
            Self::List { .. } => "list",
            Self::Local { action, .. } => match action {
                LocalAction::Add { .. } => "local_add",
                LocalAction::List => "local_list",
                LocalAction::Rm { .. } => "local_rm",
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum LocalAction {
    /// Add a note
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        body: String,
    },
    /// List notes
    List,
    /// Remove a note by id
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(default_log_level(), log_dir).context("failed to start logging")?;
    }

    let mut config = ClientConfig::from_env().context("invalid NOTES_* configuration")?;
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }

    let command = cli.command.name();
    info!("event=cli_command module=cli status=start command={command}");

    let result = run(cli.command, config).await;
    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={command}"),
        Err(err) => warn!("event=cli_command module=cli status=error command={command} error={err}"),
    }
    result
}

async fn run(command: Command, mut config: ClientConfig) -> Result<()> {
    match command {
        Command::Version => println!("notes_core version={}", notes_core::core_version()),
        Command::Convert { text } => convert(&text, config.locale)?,
        Command::Status {
            deadline,
            completed,
            today,
        } => {
            let deadline = match deadline {
                Some(raw) => from_iso(&raw).or_else(|_| parse_localized(&raw, config.locale))?,
                None => None,
            };
            let today = match today {
                Some(raw) => read_iso(&raw)?.context("--today needs a date")?,
                None => today_local(),
            };
            println!("{}", resolve_status(completed, deadline, today));
        }
        Command::List { sort, base_url } => {
            if let Some(base_url) = base_url {
                config.base_url = ClientConfig::new(&base_url)?.base_url;
            }
            list(config, sort).await?
        }
        Command::Local { db, action } => local(&db, action)?,
    }
    Ok(())
}

fn convert(text: &str, locale: Locale) -> Result<()> {
    if let Ok(date) = from_iso(text) {
        match date {
            Some(date) => println!("{}", format_localized(date, locale)),
            None => println!("{}", locale.no_deadline_label()),
        }
        return Ok(());
    }

    match parse_localized(text, locale)? {
        Some(date) => println!("{}", to_iso(date)),
        None => println!("-"),
    }
    Ok(())
}

async fn list(config: ClientConfig, sort: Option<TaskSort>) -> Result<()> {
    let access = HttpTaskAccess::new(&config)?;
    let mut service = TaskService::new(access, config.locale);
    service
        .load(sort)
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;

    for row in service.render(today_local()) {
        let id = row.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let priority = row.priority.map_or("-", |priority| priority.as_label());
        println!(
            "[{}] #{id} {} | {} | {} | {priority}",
            if row.checked { "x" } else { " " },
            row.title,
            row.deadline_label,
            row.status
        );
    }
    Ok(())
}

fn local(db: &Path, action: LocalAction) -> Result<()> {
    let conn = open_db(db).with_context(|| format!("cannot open `{}`", db.display()))?;
    let store = LocalNoteStore::new(SqliteKvStore::try_new(&conn)?);

    match action {
        LocalAction::Add { title, body } => {
            if title.trim().is_empty() {
                bail!("title must not be empty");
            }
            let note = LocalNote::new(title.trim(), body);
            store.save_note(&note)?;
            println!("{}", note.id);
        }
        LocalAction::List => {
            for note in store.load_notes()? {
                println!("{}\t{}\t{}", note.id, note.title, note.body);
            }
        }
        LocalAction::Rm { id } => {
            if !store.delete_note(&id)? {
                bail!("note `{id}` not found");
            }
        }
    }
    Ok(())
}

fn read_iso(raw: &str) -> Result<Option<CalendarDate>> {
    Ok(from_iso(raw)?)
}

fn today_local() -> CalendarDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn command_names_are_stable_for_log_events() {
        let cli = Cli::try_parse_from(["notes", "local", "--db", "x.db", "rm", "abc"]).unwrap();
        assert_eq!(cli.command.name(), "local_rm");

        let cli = Cli::try_parse_from(["notes", "list", "--sort", "created"]).unwrap();
        assert_eq!(cli.command.name(), "list");
    }
}
