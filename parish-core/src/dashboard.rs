//! The dashboard: upcoming birthdays, upcoming events, the finance card and
//! recent announcements.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::display::format_br;
use crate::events::{UpcomingEvent, upcoming_events};
use crate::ledger::{LedgerSummary, summarize};
use crate::ranking::{RankedEntry, Subject, rank_upcoming};
use crate::recurrence::RecurrenceRules;
use crate::store::{MAX_PAGE_SIZE, Page, RecordSource, fetch_all};

/// How many of the latest announcements the dashboard shows.
pub const RECENT_ANNOUNCEMENTS: usize = 10;

/// Knobs for building a dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    /// Entries per upcoming list
    pub limit: usize,
    /// Records requested at a time while reading a list
    pub page_size: usize,
    pub rules: RecurrenceRules,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            limit: 5,
            page_size: MAX_PAGE_SIZE,
            rules: RecurrenceRules::default(),
        }
    }
}

/// An announcement as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentAnnouncement {
    pub title: String,
    /// Creation date as `dd/mm/yyyy`, or as stored when unreadable; empty when unknown
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub birthdays: Vec<RankedEntry>,
    pub events: Vec<UpcomingEvent>,
    pub finance: LedgerSummary,
    pub announcements: Vec<RecentAnnouncement>,
}

impl Dashboard {
    /// Build every panel against the same `today`.
    ///
    /// Birthdays, events and the ledger are read in full, `page_size` records
    /// at a time. A panel whose records can't be read comes out empty; the
    /// others are still built.
    pub fn build(source: &impl RecordSource, today: NaiveDate, settings: &DashboardSettings) -> Self {
        let birthdays = match fetch_all(settings.page_size, |page| source.members(page)) {
            Ok(members) => {
                let subjects: Vec<Subject> = members.iter().filter_map(|m| m.subject()).collect();
                rank_upcoming(&subjects, today, settings.limit, &settings.rules)
            }
            Err(e) => {
                warn!(error = %e, "could not load members for birthdays");
                Vec::new()
            }
        };

        let events = match fetch_all(settings.page_size, |page| source.events(page)) {
            Ok(events) => upcoming_events(&events, today, settings.limit, &settings.rules),
            Err(e) => {
                warn!(error = %e, "could not load upcoming events");
                Vec::new()
            }
        };

        let finance = match fetch_all(settings.page_size, |page| source.ledger(page)) {
            Ok(entries) => summarize(&entries),
            Err(e) => {
                warn!(error = %e, "could not load ledger");
                LedgerSummary::default()
            }
        };

        let announcements = match source.announcements(&Page::new(1, RECENT_ANNOUNCEMENTS)) {
            Ok(latest) => latest
                .data
                .iter()
                .filter(|a| !a.title.trim().is_empty())
                .map(|a| RecentAnnouncement {
                    title: a.title.trim().to_string(),
                    created: a
                        .created_at
                        .as_deref()
                        .map(|raw| format_br(raw, &settings.rules.zone))
                        .unwrap_or_default(),
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "could not load announcements");
                Vec::new()
            }
        };

        Dashboard {
            today,
            birthdays,
            events,
            finance,
            announcements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParishError, ParishResult};
    use crate::records::{Announcement, EventRecord, LedgerEntry, MemberRecord, Records};
    use crate::store::Paginated;

    struct BrokenMembers(Records);

    impl RecordSource for BrokenMembers {
        fn members(&self, _page: &Page) -> ParishResult<Paginated<MemberRecord>> {
            Err(ParishError::Records("members table unavailable".into()))
        }

        fn events(&self, page: &Page) -> ParishResult<Paginated<EventRecord>> {
            self.0.events(page)
        }

        fn ledger(&self, page: &Page) -> ParishResult<Paginated<LedgerEntry>> {
            self.0.ledger(page)
        }

        fn announcements(&self, page: &Page) -> ParishResult<Paginated<Announcement>> {
            self.0.announcements(page)
        }
    }

    fn records() -> Records {
        toml::from_str(
            r#"
            [[members]]
            name = "Ana"
            birth_date = "1992-06-10"

            [[events]]
            title = "Culto"
            date = "2025-06-15"
            time = "19:00"

            [[ledger]]
            kind = "income"
            amount = 100

            [[announcements]]
            title = "Bazar"
            created_at = "2025-06-01T02:00:00Z"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn one_failing_panel_leaves_the_others() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let dashboard = Dashboard::build(&BrokenMembers(records()), today, &DashboardSettings::default());

        assert!(dashboard.birthdays.is_empty());
        assert_eq!(dashboard.events.len(), 1);
        assert_eq!(dashboard.finance.balance, 10_000);
        assert_eq!(dashboard.announcements.len(), 1);
    }

    #[test]
    fn announcements_show_title_and_created_day() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let settings = DashboardSettings {
            rules: RecurrenceRules {
                zone: chrono_tz::Tz::America__Sao_Paulo,
                ..RecurrenceRules::default()
            },
            ..DashboardSettings::default()
        };

        let dashboard = Dashboard::build(&records(), today, &settings);

        assert_eq!(
            dashboard.announcements,
            vec![RecentAnnouncement {
                title: "Bazar".into(),
                created: "01/06/2025".into(),
            }]
        );
    }

    #[test]
    fn only_the_latest_announcements_are_shown() {
        let records = Records {
            announcements: (1..=15)
                .map(|i| Announcement {
                    id: Some(i),
                    title: if i == 15 { " ".into() } else { format!("Aviso {i}") },
                    content: None,
                    description: None,
                    created_at: None,
                })
                .collect(),
            ..Records::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let dashboard = Dashboard::build(&records, today, &DashboardSettings::default());

        assert_eq!(dashboard.announcements.len(), RECENT_ANNOUNCEMENTS - 1);
        assert_eq!(dashboard.announcements[0].title, "Aviso 14");
        assert_eq!(dashboard.announcements[0].created, "");
    }

    #[test]
    fn upcoming_events_beyond_the_first_page_are_found() {
        // 120 past events fill the first page; the upcoming one sits on page two
        let mut records = Records::default();
        for i in 1..=120 {
            records.events.push(EventRecord {
                id: Some(i),
                title: format!("Past {i}"),
                date: Some("2024-01-01".into()),
                time: None,
                location: None,
                attended: true,
                recurrence: Default::default(),
            });
        }
        records.events.push(EventRecord {
            id: Some(500),
            title: "Culto".into(),
            date: Some("2025-06-15".into()),
            time: None,
            location: None,
            attended: false,
            recurrence: Default::default(),
        });
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let dashboard = Dashboard::build(&records, today, &DashboardSettings::default());

        assert_eq!(dashboard.events.len(), 1);
        assert_eq!(dashboard.events[0].title, "Culto");
    }
}
