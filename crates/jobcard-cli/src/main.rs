mod commands;
mod render;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use dotenvy::dotenv;

use jobcard::logging::{self, LogOptions};
use jobcard::JobField;

use commands::entry::CreateArgs;
use state::AppState;

#[derive(Parser)]
#[command(author, version, about = "Job card entry and ops board", long_about = None)]
struct Cli {
    /// Config file (defaults to $JOBCARD_CONFIG, then the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a machine by fleet number and show what the form would be filled with
    Lookup {
        fleet_number: String,
    },

    /// Enter and submit a new job card
    Create(Box<CreateArgs>),

    /// List all jobs
    List {
        /// Show every column, including contact details
        #[arg(long)]
        full: bool,
    },

    /// Show the ops board lanes
    Board,

    /// Edit cells of one job row and save the changes
    Edit {
        id: String,

        /// Cell assignment such as `mechanic=Jane` (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(JobField, String)>,
    },

    /// Change a job's status
    Status {
        id: String,
        /// created, allocated, in_progress or done
        status: String,
    },

    /// Copy a job's job book row to the clipboard
    Copy {
        id: String,

        /// Include contact name and phone
        #[arg(long)]
        full: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(JobField, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim().parse::<JobField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    logging::init(LogOptions {
        verbosity: cli.verbose,
        json: cli.log_json,
    });

    let state = AppState::load(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Command::Lookup { fleet_number } => commands::entry::lookup(&state, &fleet_number, json).await,
        Command::Create(args) => commands::entry::create(&state, *args, json).await,
        Command::List { full } => commands::jobs::list(&state, full, json).await,
        Command::Board => commands::jobs::board(&state, json).await,
        Command::Edit { id, set } => commands::jobs::edit(&state, &id, set, json).await,
        Command::Status { id, status } => commands::jobs::status(&state, &id, &status, json).await,
        Command::Copy { id, full } => commands::jobs::copy(&state, &id, full, json).await,
    }
}
