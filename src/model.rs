use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The six cleanup classes. Partitions both items and schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trash,
    Cache,
    Downloads,
    Logs,
    Apps,
    #[serde(rename = "large")]
    LargeFiles,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Trash,
        Category::Cache,
        Category::Downloads,
        Category::Logs,
        Category::Apps,
        Category::LargeFiles,
    ];

    /// Machine-readable name, matches the persisted form.
    pub fn name(self) -> &'static str {
        match self {
            Category::Trash => "trash",
            Category::Cache => "cache",
            Category::Downloads => "downloads",
            Category::Logs => "logs",
            Category::Apps => "apps",
            Category::LargeFiles => "large",
        }
    }

    /// Short label used in schedule lists.
    pub fn label(self) -> &'static str {
        match self {
            Category::Trash => "Trash",
            Category::Cache => "Cache",
            Category::Downloads => "Downloads",
            Category::Logs => "System Logs",
            Category::Apps => "Leftover Apps",
            Category::LargeFiles => "Large Files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trash" => Ok(Category::Trash),
            "cache" => Ok(Category::Cache),
            "downloads" => Ok(Category::Downloads),
            "logs" => Ok(Category::Logs),
            "apps" => Ok(Category::Apps),
            "large" | "large-files" => Ok(Category::LargeFiles),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// One discovered (simulated) filesystem entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningItem {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub category: Category,
    pub last_modified: DateTime<Utc>,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(Error::UnknownFrequency(other.to_string())),
        }
    }
}

/// A 24-hour wall-clock time, persisted as `HH:mm`.
///
/// Only constructible through [`TimeOfDay::new`] or parsing, so a stored
/// schedule always carries an in-range time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u32>().ok()
        };
        let hour = digits(h).ok_or_else(invalid)?;
        let minute = digits(m).ok_or_else(invalid)?;
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A recurring-cleanup intent. Nothing executes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCleaning {
    pub id: String,
    pub category: Category,
    pub frequency: Frequency,
    pub time: TimeOfDay,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    /// Cached result of the next-run calculation for `frequency` and `time`.
    pub next_run: DateTime<Utc>,
}

/// Partial update for a schedule. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleUpdate {
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub time: Option<TimeOfDay>,
    pub enabled: Option<bool>,
    pub last_run: Option<DateTime<Utc>>,
}

impl ScheduleUpdate {
    pub fn touches_timing(&self) -> bool {
        self.frequency.is_some() || self.time.is_some()
    }
}

/// Immutable record of a past clean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningHistory {
    pub id: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub items_cleaned: u64,
    pub space_saved: u64,
}

/// Cumulative counters. Only ever grow, and always together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_space_saved: u64,
    pub total_items_cleaned: u64,
}

const GIB: u64 = 1024 * 1024 * 1024;

/// Categorized disk usage for the dashboard chart. Not derived from items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBreakdown {
    pub apps: u64,
    pub documents: u64,
    pub system: u64,
    pub other: u64,
    pub free: u64,
    pub total: u64,
}

impl StorageBreakdown {
    pub fn simulated() -> Self {
        Self {
            apps: 45 * GIB,
            documents: 28 * GIB,
            system: 15 * GIB,
            other: 32 * GIB,
            free: 136 * GIB,
            total: 256 * GIB,
        }
    }

    /// Split `total - free` across the four used buckets in the simulated
    /// proportions. The remainder of the integer split goes to `other`.
    pub fn from_usage(total: u64, free: u64) -> Self {
        let free = free.min(total);
        let used = (total - free) as u128;
        let sim = Self::simulated();
        let sim_used = sim.used() as u128;
        let share = |part: u64| (used * part as u128 / sim_used) as u64;
        let apps = share(sim.apps);
        let documents = share(sim.documents);
        let system = share(sim.system);
        let other = (used as u64) - apps - documents - system;
        Self {
            apps,
            documents,
            system,
            other,
            free,
            total,
        }
    }

    pub fn used(&self) -> u64 {
        self.apps + self.documents + self.system + self.other
    }
}

impl Default for StorageBreakdown {
    fn default() -> Self {
        Self::simulated()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Cleaning(Category),
    Settings,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Cleaning(Category::LargeFiles) => "large-files",
            View::Cleaning(category) => category.name(),
            View::Settings => "settings",
        }
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(View::Dashboard),
            "settings" => Ok(View::Settings),
            other => other.parse().map(View::Cleaning),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modal {
    Welcome,
    Schedule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

/// A transient toast.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
