use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::events::upcoming_events;
use parish_core::store::{RecordSource, fetch_all};

use super::Session;
use crate::render::Render;

pub fn run(session: &Session, limit: Option<usize>) -> Result<()> {
    let events = fetch_all(session.settings.page_size, |page| session.store.events(page))?;

    let upcoming = upcoming_events(
        &events,
        session.today,
        session.limit(limit),
        &session.settings.rules,
    );

    if upcoming.is_empty() {
        println!("{}", "No upcoming events".dimmed());
        return Ok(());
    }

    println!("{}", "📅 Upcoming events".bold());
    for event in &upcoming {
        println!("{}", event.render());
    }

    Ok(())
}
