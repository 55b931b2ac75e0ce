//! Access to stored records.
//!
//! The dashboard only needs paginated, optionally filtered lists. `Records`
//! serves them from memory; `FileStore` re-reads a TOML or JSON file on
//! every call, so edits to the file show up on the next load.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::date::{CalendarDate, RawDate, parse_calendar_date};
use crate::error::{ParishError, ParishResult};
use crate::records::{Announcement, EventRecord, LedgerEntry, MemberRecord, Records};

/// Largest page the list endpoints hand out.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size for interactive list views when none is asked for.
pub const LIST_PAGE_SIZE: usize = 10;

/// Which slice of a list to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    page: usize,
    page_size: usize,
    query: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, LIST_PAGE_SIZE)
    }
}

impl Page {
    /// `page` starts at 1; both values are clamped into range.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            query: None,
        }
    }

    /// Case-insensitive substring filter. Blank queries match everything.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into().trim().to_lowercase();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The following page, same size and query.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }
}

/// One page of results plus what's needed to ask for the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub has_more: bool,
}

/// Records that can be listed and searched.
pub trait Listed: Clone {
    /// Lists are ordered by this key, smallest first. Ties keep file order.
    type Key: Ord;

    fn list_key(&self) -> Self::Key;

    /// Whether this record matches a lowercased search needle.
    fn matches(&self, needle: &str) -> bool;
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Stored date used only for ordering. Zone-free text is read as written;
/// timestamps are read in UTC.
fn stored_date(raw: Option<&str>) -> Option<CalendarDate> {
    parse_calendar_date(RawDate::from_field(raw).as_ref(), &Utc).ok()
}

/// Members are listed newest first; records without an id come last.
impl Listed for MemberRecord {
    type Key = Reverse<Option<i64>>;

    fn list_key(&self) -> Self::Key {
        Reverse(self.id)
    }

    fn matches(&self, needle: &str) -> bool {
        contains(Some(&self.name), needle)
            || contains(self.address.as_deref(), needle)
            || contains(self.phone.as_deref(), needle)
    }
}

/// Events are listed by date, earliest first; undated events come last.
impl Listed for EventRecord {
    type Key = (bool, Option<CalendarDate>, Reverse<Option<i64>>);

    fn list_key(&self) -> Self::Key {
        let date = stored_date(self.date.as_deref());
        (date.is_none(), date, Reverse(self.id))
    }

    fn matches(&self, needle: &str) -> bool {
        contains(Some(&self.title), needle) || contains(self.location.as_deref(), needle)
    }
}

/// Ledger entries are listed by date, latest first; undated entries come last.
impl Listed for LedgerEntry {
    type Key = (bool, Reverse<Option<CalendarDate>>, Reverse<Option<i64>>);

    fn list_key(&self) -> Self::Key {
        let date = stored_date(self.date.as_deref());
        (date.is_none(), Reverse(date), Reverse(self.id))
    }

    fn matches(&self, needle: &str) -> bool {
        contains(self.description.as_deref(), needle)
    }
}

impl Listed for Announcement {
    type Key = Reverse<Option<i64>>;

    fn list_key(&self) -> Self::Key {
        Reverse(self.id)
    }

    fn matches(&self, needle: &str) -> bool {
        contains(Some(&self.title), needle)
            || contains(self.content.as_deref(), needle)
            || contains(self.description.as_deref(), needle)
    }
}

/// Filter, order, and slice `records` for `page`.
pub fn paginate<T: Listed>(records: &[T], page: &Page) -> Paginated<T> {
    let mut matching: Vec<&T> = records
        .iter()
        .filter(|r| page.query().is_none_or(|needle| r.matches(needle)))
        .collect();

    matching.sort_by_cached_key(|r| r.list_key());

    let total = matching.len();
    let skip = (page.page() - 1).saturating_mul(page.page_size());
    let data: Vec<T> = matching
        .into_iter()
        .skip(skip)
        .take(page.page_size())
        .cloned()
        .collect();

    Paginated {
        data,
        page: page.page(),
        page_size: page.page_size(),
        total,
        has_more: page.page().saturating_mul(page.page_size()) < total,
    }
}

/// Every record of a list, requested `page_size` at a time.
pub fn fetch_all<T>(
    page_size: usize,
    mut fetch: impl FnMut(&Page) -> ParishResult<Paginated<T>>,
) -> ParishResult<Vec<T>> {
    let mut records = Vec::new();
    let mut page = Page::new(1, page_size);

    loop {
        let batch = fetch(&page)?;
        let done = !batch.has_more || batch.data.is_empty();
        records.extend(batch.data);

        if done {
            debug!(pages = page.page(), records = records.len(), "fetched list");
            return Ok(records);
        }
        page = page.next();
    }
}

/// The data-access seam the dashboard reads through.
pub trait RecordSource {
    fn members(&self, page: &Page) -> ParishResult<Paginated<MemberRecord>>;
    fn events(&self, page: &Page) -> ParishResult<Paginated<EventRecord>>;
    fn ledger(&self, page: &Page) -> ParishResult<Paginated<LedgerEntry>>;
    fn announcements(&self, page: &Page) -> ParishResult<Paginated<Announcement>>;
}

impl RecordSource for Records {
    fn members(&self, page: &Page) -> ParishResult<Paginated<MemberRecord>> {
        Ok(paginate(&self.members, page))
    }

    fn events(&self, page: &Page) -> ParishResult<Paginated<EventRecord>> {
        Ok(paginate(&self.events, page))
    }

    fn ledger(&self, page: &Page) -> ParishResult<Paginated<LedgerEntry>> {
        Ok(paginate(&self.ledger, page))
    }

    fn announcements(&self, page: &Page) -> ParishResult<Paginated<Announcement>> {
        Ok(paginate(&self.announcements, page))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
}

/// Records kept in a single TOML or JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
}

impl FileStore {
    /// Open a records file. The format comes from the extension.
    pub fn open(path: impl Into<PathBuf>) -> ParishResult<Self> {
        let path = path.into();

        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => {
                return Err(ParishError::Config(format!(
                    "Records file must be .toml or .json: {}",
                    path.display()
                )));
            }
        };

        if !path.is_file() {
            return Err(ParishError::Records(format!(
                "No records file at {}",
                path.display()
            )));
        }

        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    pub fn load(&self) -> ParishResult<Records> {
        let content = std::fs::read_to_string(&self.path)?;

        let records: Records = match self.format {
            FileFormat::Toml => toml::from_str(&content)
                .map_err(|e| ParishError::Records(format!("{}: {e}", self.path.display())))?,
            FileFormat::Json => serde_json::from_str(&content)
                .map_err(|e| ParishError::Records(format!("{}: {e}", self.path.display())))?,
        };

        info!(
            path = %self.path.display(),
            members = records.members.len(),
            events = records.events.len(),
            ledger = records.ledger.len(),
            announcements = records.announcements.len(),
            "loaded records"
        );

        Ok(records)
    }
}

impl RecordSource for FileStore {
    fn members(&self, page: &Page) -> ParishResult<Paginated<MemberRecord>> {
        self.load()?.members(page)
    }

    fn events(&self, page: &Page) -> ParishResult<Paginated<EventRecord>> {
        self.load()?.events(page)
    }

    fn ledger(&self, page: &Page) -> ParishResult<Paginated<LedgerEntry>> {
        self.load()?.ledger(page)
    }

    fn announcements(&self, page: &Page) -> ParishResult<Paginated<Announcement>> {
        self.load()?.announcements(page)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn member(id: Option<i64>, name: &str) -> MemberRecord {
        MemberRecord {
            id,
            name: name.to_string(),
            birth_date: None,
            phone: None,
            address: None,
        }
    }

    fn names(page: &Paginated<MemberRecord>) -> Vec<&str> {
        page.data.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn page_bounds_are_clamped() {
        let page = Page::new(0, 500);
        assert_eq!(page.page(), 1);
        assert_eq!(page.page_size(), MAX_PAGE_SIZE);
        assert_eq!(Page::new(2, 0).page_size(), 1);
    }

    #[test]
    fn newest_first_and_unnumbered_last() {
        let members = vec![
            member(Some(1), "First"),
            member(None, "Loose"),
            member(Some(3), "Third"),
            member(Some(2), "Second"),
        ];

        let page = paginate(&members, &Page::new(1, 10));

        assert_eq!(names(&page), vec!["Third", "Second", "First", "Loose"]);
        assert_eq!(page.total, 4);
        assert!(!page.has_more);
    }

    #[test]
    fn slices_pages() {
        let members: Vec<_> = (1..=5).map(|i| member(Some(i), &format!("M{i}"))).collect();

        let first = paginate(&members, &Page::new(1, 2));
        let last = paginate(&members, &Page::new(3, 2));
        let beyond = paginate(&members, &Page::new(4, 2));

        assert_eq!(names(&first), vec!["M5", "M4"]);
        assert!(first.has_more);
        assert_eq!(names(&last), vec!["M1"]);
        assert!(!last.has_more);
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.total, 5);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut carla = member(Some(1), "Carla");
        carla.address = Some("Rua das Flores".into());
        let members = vec![carla, member(Some(2), "Florinda"), member(Some(3), "Bob")];

        let page = paginate(&members, &Page::new(1, 10).with_query("  FLOR "));

        assert_eq!(names(&page), vec!["Florinda", "Carla"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn blank_query_matches_everything() {
        assert_eq!(Page::new(1, 10).with_query("   ").query(), None);
    }

    fn event(id: i64, title: &str, date: Option<&str>) -> EventRecord {
        EventRecord {
            id: Some(id),
            title: title.to_string(),
            date: date.map(str::to_string),
            time: None,
            location: None,
            attended: false,
            recurrence: Default::default(),
        }
    }

    #[test]
    fn events_are_listed_earliest_first_across_pages() {
        // Newest ids carry the latest dates, so id order would be reversed
        let mut events: Vec<EventRecord> = (1..=150)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Days::new(i as u64);
                event(i, &format!("E{i}"), Some(&date.format("%Y-%m-%d").to_string()))
            })
            .collect();
        events.push(event(151, "Undated", None));
        events.push(event(152, "Timestamped", Some("2024-12-31T12:00:00.000Z")));

        let first = paginate(&events, &Page::new(1, 100));
        let second = paginate(&events, &Page::new(2, 100));

        assert_eq!(first.data[0].title, "Timestamped");
        assert_eq!(first.data[1].title, "E1");
        assert!(first.has_more);
        assert_eq!(second.data.last().unwrap().title, "Undated");
        assert_eq!(second.data[second.data.len() - 2].title, "E150");
    }

    #[test]
    fn ledger_is_listed_latest_first() {
        let entry = |id: i64, date: Option<&str>| LedgerEntry {
            id: Some(id),
            description: None,
            date: date.map(str::to_string),
            kind: Default::default(),
            amount: Default::default(),
        };
        let ledger = vec![
            entry(3, Some("2025-01-10")),
            entry(1, Some("2025-03-01")),
            entry(4, None),
            entry(2, Some("2025-02-15")),
        ];

        let ids: Vec<Option<i64>> = paginate(&ledger, &Page::new(1, 10))
            .data
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn announcements_search_title_content_and_description() {
        let records: Records = serde_json::from_str(
            r#"{"avisos": [
                {"id": 1, "titulo": "Bazar", "conteudo": "Roupas e livros"},
                {"id": 2, "titulo": "Retiro", "descricao": "Levar livro de cânticos"},
                {"id": 3, "titulo": "Livraria aberta"},
                {"id": 4, "titulo": "Ensaio"}
            ]}"#,
        )
        .unwrap();

        let found = records
            .announcements(&Page::new(1, 10).with_query("LIVR"))
            .unwrap();
        let titles: Vec<&str> = found.data.iter().map(|a| a.title.as_str()).collect();

        assert_eq!(titles, vec!["Livraria aberta", "Retiro", "Bazar"]);
    }

    #[test]
    fn fetch_all_walks_every_page() {
        let members: Vec<_> = (1..=7).map(|i| member(Some(i), &format!("M{i}"))).collect();
        let records = Records {
            members,
            ..Records::default()
        };
        let mut requests = 0;

        let all = fetch_all(3, |page| {
            requests += 1;
            records.members(page)
        })
        .unwrap();

        assert_eq!(all.len(), 7);
        assert_eq!(all[0].name, "M7");
        assert_eq!(all[6].name, "M1");
        assert_eq!(requests, 3);
    }

    #[test]
    fn fetch_all_stops_on_error() {
        let result: ParishResult<Vec<MemberRecord>> =
            fetch_all(10, |_| Err(ParishError::Records("offline".into())));

        assert!(result.is_err());
    }

    #[test]
    fn one_unreadable_row_keeps_the_rest_of_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"{"membros": [{"nome": "Ana"}, {"nome": "Bob", "id": "x"}],
                "eventos": [{"titulo": null, "data": "2025-06-15"}, {"titulo": "Culto", "data": "2025-06-15"}]}"#,
        )
        .unwrap();

        let store = FileStore::open(&path).unwrap();

        assert_eq!(store.members(&Page::default()).unwrap().total, 1);
        assert_eq!(store.events(&Page::default()).unwrap().total, 2);
    }

    #[test]
    fn file_store_reads_toml_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.toml");
        std::fs::write(&path, "[[members]]\nname = \"Ana\"\n").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.members(&Page::default()).unwrap().total, 1);

        std::fs::write(&path, "[[members]]\nname = \"Ana\"\n\n[[members]]\nname = \"Bob\"\n").unwrap();
        assert_eq!(store.members(&Page::default()).unwrap().total, 2);
    }

    #[test]
    fn file_store_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"{"eventos": [{"titulo": "Culto", "data": "2025-06-15"}]}"#).unwrap();

        let store = FileStore::open(&path).unwrap();

        assert_eq!(store.events(&Page::default()).unwrap().data[0].title, "Culto");
    }

    #[test]
    fn file_store_rejects_unknown_extension_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("records.yaml");
        std::fs::write(&yaml, "").unwrap();

        assert!(matches!(FileStore::open(&yaml), Err(ParishError::Config(_))));
        assert!(matches!(
            FileStore::open(dir.path().join("missing.toml")),
            Err(ParishError::Records(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();

        assert!(matches!(store.load(), Err(ParishError::Records(_))));
    }
}
