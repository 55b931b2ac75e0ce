use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::dashboard::{Dashboard, DashboardSettings};

use super::Session;
use crate::render::Render;

pub fn run(session: &Session, limit: Option<usize>, json: bool) -> Result<()> {
    let settings = DashboardSettings {
        limit: session.limit(limit),
        ..session.settings
    };
    let dashboard = Dashboard::build(&session.store, session.today, &settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("{}", "💰 Finances".bold());
    println!("{}", dashboard.finance.render());
    println!();

    println!("{}", "📅 Upcoming events".bold());
    if dashboard.events.is_empty() {
        println!("  {}", "No upcoming events".dimmed());
    }
    for event in &dashboard.events {
        println!("{}", event.render());
    }
    println!();

    println!("{}", "🎂 Upcoming birthdays".bold());
    if dashboard.birthdays.is_empty() {
        println!("  {}", "No upcoming birthdays".dimmed());
    }
    for entry in &dashboard.birthdays {
        println!("{}", entry.render());
    }
    println!();

    println!("{}", "📢 Recent announcements".bold());
    if dashboard.announcements.is_empty() {
        println!("  {}", "No announcements yet".dimmed());
    }
    for announcement in &dashboard.announcements {
        println!("{}", announcement.render());
    }

    Ok(())
}
