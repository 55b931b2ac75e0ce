mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use parish_core::store::LIST_PAGE_SIZE;

use crate::commands::Session;

#[derive(Parser)]
#[command(name = "parish")]
#[command(about = "Upcoming birthdays, events and finances for your congregation")]
struct Cli {
    /// Records file to read instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Members whose birthday comes soonest
    Birthdays {
        /// How many to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Events from today onwards
    Events {
        /// How many to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Finances, events, birthdays and announcements at once
    Dashboard {
        /// How many birthdays and events to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List members, newest first
    Members {
        /// Filter by name, address or phone
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = LIST_PAGE_SIZE)]
        page_size: usize,
    },
    /// List announcements, newest first
    Announcements {
        /// Filter by title, content or description
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = LIST_PAGE_SIZE)]
        page_size: usize,
    },
    /// Show the config file location and effective settings
    Config,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let today = parse_today(cli.today.as_deref())?;
    let open = || Session::open(cli.file.clone(), today);

    match cli.command {
        Commands::Birthdays { limit } => commands::birthdays::run(&open()?, limit),
        Commands::Events { limit } => commands::events::run(&open()?, limit),
        Commands::Dashboard { limit, json } => commands::dashboard::run(&open()?, limit, json),
        Commands::Members {
            search,
            page,
            page_size,
        } => commands::members::run(&open()?, search, page, page_size),
        Commands::Announcements {
            search,
            page,
            page_size,
        } => commands::announcements::run(&open()?, search, page, page_size),
        Commands::Config => commands::config::run(),
    }
}

fn parse_today(today: Option<&str>) -> Result<Option<NaiveDate>> {
    today
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s)
            })
        })
        .transpose()
}
