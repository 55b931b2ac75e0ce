//! Record types returned by the data-access layer.
//!
//! Field names are English; the aliases accept records exported from the
//! Portuguese-keyed backend (`nome`, `aniversario`, `titulo`, ...) as-is.
//!
//! Reading is per record: a row that can't be read is left out of its list
//! and the rest of the file still loads. Within a row, a `null` or wrongly
//! typed field falls back to its default.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::date::RawDate;
use crate::ranking::Subject;

/// A value of type `T`, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrElse<T> {
    Value(T),
    Other(IgnoredAny),
}

/// `null` or a value of the wrong shape becomes `T::default()`.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match OrElse::<T>::deserialize(deserializer)? {
        OrElse::Value(value) => value,
        OrElse::Other(_) => T::default(),
    })
}

/// Read a list, leaving out rows that don't deserialize as `T`.
fn skip_unreadable<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let rows: Option<Vec<OrElse<T>>> = Option::deserialize(deserializer)?;

    let mut skipped = 0usize;
    let records: Vec<T> = rows
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| match row {
            OrElse::Value(record) => Some(record),
            OrElse::Other(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, kept = records.len(), "skipping unreadable records");
    }

    Ok(records)
}

/// A congregation member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "nome", deserialize_with = "or_default")]
    pub name: String,
    /// Birthday, any shape the backend stored it in
    #[serde(
        default,
        alias = "aniversario",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<String>,
    #[serde(
        default,
        alias = "telefone",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        alias = "endereco",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
}

impl MemberRecord {
    /// The member as a birthday subject. Members without a name have none.
    pub fn subject(&self) -> Option<Subject> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Subject::new(name, RawDate::from_field(self.birth_date.as_deref())))
    }
}

/// Whether an event happens once or every year on the same day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Once,
    Yearly,
}

/// A scheduled church event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "titulo", deserialize_with = "or_default")]
    pub title: String,
    #[serde(
        default,
        alias = "data",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    /// Time of day, `HH:MM`
    #[serde(
        default,
        alias = "horario",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        default,
        alias = "local",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    /// Marked as attended on the events page
    #[serde(default, alias = "comparecido", deserialize_with = "or_default")]
    pub attended: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub recurrence: Recurrence,
}

impl EventRecord {
    /// Title with the location appended, as shown on the upcoming list.
    pub fn label(&self) -> String {
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => format!("{} • {}", self.title, location),
            _ => self.title.clone(),
        }
    }
}

/// Income or expense.
///
/// Anything other than an expense marker counts as income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EntryKind {
    #[default]
    Income,
    Expense,
}

impl From<String> for EntryKind {
    fn from(kind: String) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "expense" | "despesa" => EntryKind::Expense,
            _ => EntryKind::Income,
        }
    }
}

/// A ledger amount: a plain number or pt-BR formatted text (`"1.234,56"`).
///
/// A missing, `null` or otherwise unreadable amount reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

/// A single income or expense line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        default,
        alias = "descricao",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// When the entry was booked, any date shape
    #[serde(
        default,
        alias = "data",
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, alias = "tipo", deserialize_with = "or_default")]
    pub kind: EntryKind,
    #[serde(default, alias = "valor", deserialize_with = "or_default")]
    pub amount: Amount,
}

/// A notice posted to the congregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnnouncementRow")]
pub struct Announcement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp, any date shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Announcements as exported. Different backends name the creation
/// timestamp differently; the first non-blank one wins.
#[derive(Deserialize)]
struct AnnouncementRow {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default, alias = "titulo", deserialize_with = "or_default")]
    title: String,
    #[serde(default, alias = "conteudo", deserialize_with = "or_default")]
    content: Option<String>,
    #[serde(default, alias = "descricao", deserialize_with = "or_default")]
    description: Option<String>,
    #[serde(default, rename = "criadoEm", deserialize_with = "or_default")]
    criado_em: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    created_at: Option<String>,
    #[serde(default, rename = "createdAt", deserialize_with = "or_default")]
    created_at_camel: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    created: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    inserted_at: Option<String>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        let created_at = [
            row.criado_em,
            row.created_at,
            row.created_at_camel,
            row.created,
            row.inserted_at,
        ]
        .into_iter()
        .flatten()
        .find(|created| !created.trim().is_empty());

        Announcement {
            id: row.id,
            title: row.title,
            content: row.content,
            description: row.description,
            created_at,
        }
    }
}

/// Everything a records file holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default, alias = "membros", deserialize_with = "skip_unreadable")]
    pub members: Vec<MemberRecord>,
    #[serde(default, alias = "eventos", deserialize_with = "skip_unreadable")]
    pub events: Vec<EventRecord>,
    #[serde(default, alias = "financas", deserialize_with = "skip_unreadable")]
    pub ledger: Vec<LedgerEntry>,
    #[serde(default, alias = "avisos", deserialize_with = "skip_unreadable")]
    pub announcements: Vec<Announcement>,
}
