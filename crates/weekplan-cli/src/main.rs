mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{client::ClientSubcommand, label::LabelSubcommand, week::WeekSubcommand};
use std::path::PathBuf;
use weekplan_core::WeekKey;

#[derive(Parser)]
#[command(
    name = "weekplan",
    about = "Week-by-week client planning calendar: labels, week statuses, reminders",
    version,
    propagate_version = true
)]
struct Cli {
    /// Planner root (default: auto-detect from .weekplan/)
    #[arg(long, global = true, env = "WEEKPLAN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .weekplan/ with a default config and an empty document
    Init,

    /// Show the whole planning document
    Show,

    /// Manage clients of the content and music tables
    Client {
        #[command(subcommand)]
        subcommand: ClientSubcommand,
    },

    /// Manage status labels
    Label {
        #[command(subcommand)]
        subcommand: LabelSubcommand,
    },

    /// Read and edit one client's week statuses
    Week {
        #[command(subcommand)]
        subcommand: WeekSubcommand,
    },

    /// List the visible week window around the current week
    Weeks {
        /// Center week as YYYY-WW (default: current week)
        #[arg(long)]
        week: Option<WeekKey>,
        /// Weeks before the center (default: config past_weeks)
        #[arg(long)]
        past: Option<usize>,
        /// Weeks after the center (default: config future_weeks)
        #[arg(long)]
        future: Option<usize>,
    },

    /// List clients with no status for next week
    Remind {
        /// Current week as YYYY-WW (default: current week)
        #[arg(long)]
        week: Option<WeekKey>,
        /// Dismiss a client's reminder for the rest of today
        #[arg(long, value_name = "CLIENT_ID")]
        dismiss: Vec<String>,
    },

    /// Replace the document with a legacy realtime-database export
    Import {
        /// Path to the exported JSON file
        file: PathBuf,
        /// ISO year the legacy week numbers belong to
        #[arg(long)]
        year: i32,
        /// Overwrite a non-empty document
        #[arg(long)]
        force: bool,
    },

    /// Clear week colors no label carries any more
    Cleanup {
        /// Report what would be cleared without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve the planning API over HTTP
    Serve {
        /// Port to listen on (default: config port)
        #[arg(long)]
        port: Option<u16>,
        /// Open a browser once listening
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Show => cmd::show::run(&root, cli.json),
        Commands::Client { subcommand } => cmd::client::run(&root, subcommand, cli.json),
        Commands::Label { subcommand } => cmd::label::run(&root, subcommand, cli.json),
        Commands::Week { subcommand } => cmd::week::run(&root, subcommand, cli.json),
        Commands::Weeks { week, past, future } => {
            cmd::weeks::run(&root, week, past, future, cli.json)
        }
        Commands::Remind { week, dismiss } => cmd::remind::run(&root, week, &dismiss, cli.json),
        Commands::Import { file, year, force } => {
            cmd::import::run(&root, &file, year, force, cli.json)
        }
        Commands::Cleanup { dry_run } => cmd::cleanup::run(&root, dry_run, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
