//! Download file naming
//!
//! `{SafeName}_{YYYY-MM-DD}.{ext}`. The safe name keeps ASCII letters,
//! digits, `_`, `-` and whitespace; whitespace runs become one `_`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Source of the export date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Local wall clock
    #[default]
    System,
    /// Pinned date, midnight
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Current instant for UTC timestamps; a pinned date is midnight UTC
    pub fn now_utc(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// Sanitize a candidate name for use in a file name.
///
/// Returns `None` when nothing usable is left.
pub fn safe_name(name: &str) -> Option<String> {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let joined = kept.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Full download name for an export made on `date`
pub fn export_file_name(name: Option<&str>, fallback: &str, date: NaiveDate, extension: &str) -> String {
    let stem = name
        .and_then(safe_name)
        .unwrap_or_else(|| fallback.to_string());
    format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), extension)
}
