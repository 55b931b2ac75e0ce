//! Terminal rendering for parish-core types.

use chrono_tz::Tz;
use owo_colors::OwoColorize;
use parish_core::dashboard::RecentAnnouncement;
use parish_core::display::{format_br, format_cents, format_date, relative_day};
use parish_core::events::UpcomingEvent;
use parish_core::ledger::LedgerSummary;
use parish_core::ranking::RankedEntry;
use parish_core::records::{Announcement, MemberRecord, Recurrence};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Color a relative day label by how close it is
fn render_relative(days_until: i64) -> String {
    let label = format!("{:<12}", relative_day(days_until));
    match days_until {
        0 => label.green().bold().to_string(),
        1..=7 => label.yellow().to_string(),
        _ => label.dimmed().to_string(),
    }
}

impl Render for RankedEntry {
    fn render(&self) -> String {
        format!(
            "  {} {} {}",
            render_relative(self.occurrence.days_until),
            self.label,
            format!("({})", format_date(&self.original)).dimmed()
        )
    }
}

impl Render for UpcomingEvent {
    fn render(&self) -> String {
        let time = match self.time {
            Some(t) => format!("{:>5}", t.format("%H:%M")),
            None => "     ".to_string(),
        };
        let yearly = match self.recurrence {
            Recurrence::Yearly => " ↻".dimmed().to_string(),
            Recurrence::Once => String::new(),
        };
        let attended = if self.attended {
            " ✓".green().to_string()
        } else {
            String::new()
        };

        format!(
            "  {} {} {} {}{}{}",
            render_relative(self.days_until),
            self.date.format("%d/%m/%Y").to_string().dimmed(),
            time,
            self.label(),
            yearly,
            attended
        )
    }
}

impl Render for LedgerSummary {
    fn render(&self) -> String {
        let balance = format_cents(self.balance);
        let balance = if self.balance >= 0 {
            balance.green().to_string()
        } else {
            balance.red().to_string()
        };

        format!(
            "  Balance: {}\n  {}",
            balance,
            format!(
                "Income: {} | Expenses: {}",
                format_cents(self.income),
                format_cents(self.expenses)
            )
            .dimmed()
        )
    }
}

impl Render for RecentAnnouncement {
    fn render(&self) -> String {
        if self.created.is_empty() {
            return format!("  {}", self.title);
        }
        format!("  {} {}", self.title, format!("(created {})", self.created).dimmed())
    }
}

/// One announcement row: id, title, creation day, then the first line of its text.
pub fn render_announcement(announcement: &Announcement, zone: &Tz) -> String {
    let id = announcement
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "-".to_string());
    let created = announcement
        .created_at
        .as_deref()
        .map(|raw| format_br(raw, zone))
        .unwrap_or_default();
    let summary = announcement
        .content
        .as_deref()
        .or(announcement.description.as_deref())
        .and_then(|text| text.lines().next())
        .unwrap_or("");

    format!(
        "  {} {:<10} {} {}",
        format!("{:>5}", id).dimmed(),
        created,
        announcement.title.bold(),
        summary.dimmed()
    )
}

/// Member rows need the zone to show stored timestamps as dates.
pub fn render_member(member: &MemberRecord, zone: &Tz) -> String {
    let id = member
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "-".to_string());
    let birthday = member
        .birth_date
        .as_deref()
        .map(|raw| format_br(raw, zone))
        .unwrap_or_default();
    let phone = member.phone.as_deref().unwrap_or("");

    format!(
        "  {} {:<30} {:<10} {}",
        format!("{:>5}", id).dimmed(),
        member.name,
        birthday,
        phone.dimmed()
    )
}
