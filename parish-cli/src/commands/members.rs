use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::store::{Page, RecordSource};

use super::Session;
use crate::render::render_member;

pub fn run(session: &Session, search: Option<String>, page: usize, page_size: usize) -> Result<()> {
    let mut request = Page::new(page, page_size);
    if let Some(query) = search {
        request = request.with_query(query);
    }

    let members = session.store.members(&request)?;

    if members.data.is_empty() {
        println!("{}", "No members found".dimmed());
        return Ok(());
    }

    for member in &members.data {
        println!("{}", render_member(member, &session.settings.rules.zone));
    }

    let shown_from = (members.page - 1) * members.page_size + 1;
    let shown_to = shown_from + members.data.len() - 1;
    let mut footer = format!("{}-{} of {}", shown_from, shown_to, members.total);
    if members.has_more {
        footer.push_str(&format!(" (next: --page {})", members.page + 1));
    }
    println!("\n{}", footer.dimmed());

    Ok(())
}
