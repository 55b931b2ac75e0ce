//! Global parish configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardSettings;
use crate::error::{ParishError, ParishResult};
use crate::recurrence::{LeapDayPolicy, RecurrenceRules};
use crate::store::MAX_PAGE_SIZE;

static DEFAULT_DATA_FILE: &str = "~/parish/records.toml";
const DEFAULT_UPCOMING_LIMIT: usize = 5;
const DEFAULT_DASHBOARD_PAGE_SIZE: usize = MAX_PAGE_SIZE;

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

fn default_page_size() -> usize {
    DEFAULT_DASHBOARD_PAGE_SIZE
}

/// Configuration at ~/.config/parish/config.toml
///
/// Every key can be overridden with a `PARISH_`-prefixed environment
/// variable (e.g. `PARISH_UPCOMING_LIMIT=10`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParishConfig {
    /// Records file (.toml or .json)
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// How many birthdays and events the dashboard shows
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    /// How many records the dashboard requests at a time while reading a list
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// IANA zone name; the system zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub leap_day: LeapDayPolicy,
}

impl Default for ParishConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            page_size: DEFAULT_DASHBOARD_PAGE_SIZE,
            timezone: None,
            leap_day: LeapDayPolicy::default(),
        }
    }
}

impl ParishConfig {
    pub fn config_path() -> ParishResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ParishError::Config("Could not determine config directory".into()))?
            .join("parish");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out file first if needed.
    pub fn load() -> ParishResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` plus environment overrides. A missing file is fine.
    pub fn load_from(path: &Path) -> ParishResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PARISH").try_parsing(true))
            .build()
            .map_err(|e| ParishError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ParishError::Config(e.to_string()))
    }

    /// Records file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_path(&self.data_file)
    }

    /// The configured zone, else the system zone, else UTC.
    pub fn zone(&self) -> ParishResult<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ParishError::TimeZone(name.clone())),
            None => Ok(system_zone()),
        }
    }

    pub fn rules(&self) -> ParishResult<RecurrenceRules> {
        Ok(RecurrenceRules {
            zone: self.zone()?,
            leap_day: self.leap_day,
        })
    }

    pub fn dashboard_settings(&self) -> ParishResult<DashboardSettings> {
        Ok(DashboardSettings {
            limit: self.upcoming_limit,
            page_size: self.page_size,
            rules: self.rules()?,
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ParishResult<()> {
        let contents = format!(
            "\
# parish configuration

# Records file (.toml or .json):
# data_file = \"{}\"

# Entries shown in the upcoming birthdays and events lists:
# upcoming_limit = {}

# Records requested at a time when building the dashboard:
# page_size = {}

# Zone used to read timestamps (defaults to the system zone):
# timezone = \"America/Sao_Paulo\"

# Where Feb 29 birthdays land in other years (\"feb28\" or \"mar1\"):
# leap_day = \"feb28\"
",
            DEFAULT_DATA_FILE, DEFAULT_UPCOMING_LIMIT, DEFAULT_DASHBOARD_PAGE_SIZE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ParishError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ParishError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn system_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parish/config.toml");

        ParishConfig::create_default_config(&path).unwrap();
        let config = ParishConfig::load_from(&path).unwrap();

        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.upcoming_limit, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(config.page_size, DEFAULT_DASHBOARD_PAGE_SIZE);
        assert_eq!(config.leap_day, LeapDayPolicy::Feb28);
    }

    #[test]
    fn reads_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_file = \"/srv/parish/records.json\"\nupcoming_limit = 8\ntimezone = \"America/Sao_Paulo\"\nleap_day = \"mar1\"\n",
        )
        .unwrap();

        let config = ParishConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/parish/records.json"));
        assert_eq!(config.upcoming_limit, 8);
        assert_eq!(config.zone().unwrap(), Tz::America__Sao_Paulo);
        assert_eq!(config.rules().unwrap().leap_day, LeapDayPolicy::Mar1);
    }

    #[test]
    fn paths_without_tilde_are_unchanged() {
        assert_eq!(
            expand_path(Path::new("/srv/parish/records.toml")),
            PathBuf::from("/srv/parish/records.toml")
        );
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let config = ParishConfig {
            timezone: Some("Mars/Olympus".into()),
            ..ParishConfig::default()
        };

        assert!(matches!(config.zone(), Err(ParishError::TimeZone(_))));
    }
}
