//! Finance summary for the dashboard card.

use serde::Serialize;

use crate::records::{Amount, EntryKind, LedgerEntry};

/// Totals in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub income: i64,
    pub expenses: i64,
    pub balance: i64,
}

impl Amount {
    /// The amount in cents. Unreadable amounts count as zero.
    pub fn cents(&self) -> i64 {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(text) => parse_br_number(text).unwrap_or(0.0),
        };

        if value.is_finite() {
            (value * 100.0).round() as i64
        } else {
            0
        }
    }
}

/// Read pt-BR number text: `.` groups thousands, `,` is the decimal mark.
fn parse_br_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace('.', "").replacen(',', ".", 1);
    if normalized.is_empty() {
        return Some(0.0);
    }
    normalized.parse().ok()
}

pub fn summarize(entries: &[LedgerEntry]) -> LedgerSummary {
    let (income, expenses) = entries
        .iter()
        .fold((0i64, 0i64), |(income, expenses), entry| match entry.kind {
            EntryKind::Income => (income.saturating_add(entry.amount.cents()), expenses),
            EntryKind::Expense => (income, expenses.saturating_add(entry.amount.cents())),
        });

    LedgerSummary {
        income,
        expenses,
        balance: income.saturating_sub(expenses),
    }
}
