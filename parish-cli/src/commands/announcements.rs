use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::store::{Page, RecordSource};

use super::Session;
use crate::render::render_announcement;

pub fn run(session: &Session, search: Option<String>, page: usize, page_size: usize) -> Result<()> {
    let mut request = Page::new(page, page_size);
    if let Some(query) = search {
        request = request.with_query(query);
    }

    let announcements = session.store.announcements(&request)?;

    if announcements.data.is_empty() {
        println!("{}", "No announcements".dimmed());
        return Ok(());
    }

    for announcement in &announcements.data {
        println!("{}", render_announcement(announcement, &session.settings.rules.zone));
    }

    if announcements.has_more {
        println!(
            "\n{}",
            format!("{} in total (next: --page {})", announcements.total, announcements.page + 1).dimmed()
        );
    }

    Ok(())
}
