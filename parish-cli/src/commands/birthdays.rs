use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::ranking::rank_upcoming;
use parish_core::store::{RecordSource, fetch_all};

use super::Session;
use crate::render::Render;

pub fn run(session: &Session, limit: Option<usize>) -> Result<()> {
    let members = fetch_all(session.settings.page_size, |page| session.store.members(page))?;
    let subjects: Vec<_> = members.iter().filter_map(|m| m.subject()).collect();

    let ranked = rank_upcoming(
        &subjects,
        session.today,
        session.limit(limit),
        &session.settings.rules,
    );

    if ranked.is_empty() {
        println!("{}", "No upcoming birthdays".dimmed());
        return Ok(());
    }

    println!("{}", "🎂 Upcoming birthdays".bold());
    for entry in &ranked {
        println!("{}", entry.render());
    }

    Ok(())
}
