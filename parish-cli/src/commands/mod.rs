pub mod announcements;
pub mod birthdays;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod members;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use parish_core::config::{ParishConfig, expand_path};
use parish_core::dashboard::DashboardSettings;
use parish_core::date::today_in;
use parish_core::store::FileStore;

/// Everything a command needs, resolved once per invocation.
pub struct Session {
    pub store: FileStore,
    /// Captured once so every list compares against the same day
    pub today: NaiveDate,
    pub settings: DashboardSettings,
}

impl Session {
    pub fn open(file: Option<PathBuf>, today: Option<NaiveDate>) -> Result<Self> {
        let config = ParishConfig::load()?;
        let settings = config.dashboard_settings()?;

        let path = match file {
            Some(file) => expand_path(&file),
            None => config.data_path(),
        };
        let store = FileStore::open(&path).with_context(|| {
            format!(
                "Could not open records.\n\n\
                Point data_file in {} at your records file, or pass --file.",
                ParishConfig::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string())
            )
        })?;

        let today = today.unwrap_or_else(|| today_in(&settings.rules.zone));

        Ok(Session {
            store,
            today,
            settings,
        })
    }

    /// Upcoming-list length, honoring a per-command override.
    pub fn limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.settings.limit)
    }
}
