use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Builder;

use crate::model::{Category, CleaningItem, ItemKind};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Size range for a template, `[min, max)` in `unit` bytes.
#[derive(Clone, Copy, Debug)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
    pub unit: u64,
}

impl SizeRange {
    pub const fn kib(min: u64, max: u64) -> Self {
        Self { min, max, unit: KIB }
    }

    pub const fn mib(min: u64, max: u64) -> Self {
        Self { min, max, unit: MIB }
    }
}

/// Blueprint for one simulated entry.
#[derive(Clone, Copy, Debug)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub path: &'static str,
    pub kind: ItemKind,
    pub size: SizeRange,
    /// Last-modified is drawn from the past `max_age_days` days.
    pub max_age_days: u32,
}

/// The trait every category module implements.
pub trait CategorySource {
    fn category(&self) -> Category;

    /// Title for the cleaning view and history entries.
    fn title(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Caution shown above the item list, if any.
    fn warning(&self) -> Option<&'static str> {
        None
    }

    /// Terminal commands the user may copy and run by hand.
    fn commands(&self) -> &'static [&'static str];

    fn templates(&self) -> &'static [ItemTemplate];
}

/// Simulate a scan of one category. Never touches the filesystem.
pub fn generate<R: Rng + ?Sized>(
    source: &dyn CategorySource,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<CleaningItem> {
    source
        .templates()
        .iter()
        .map(|t| instantiate(t, source.category(), rng, now))
        .collect()
}

fn instantiate<R: Rng + ?Sized>(
    template: &ItemTemplate,
    category: Category,
    rng: &mut R,
    now: DateTime<Utc>,
) -> CleaningItem {
    let SizeRange { min, max, unit } = template.size;
    let size = unit * if max > min { rng.random_range(min..max) } else { min };
    let age_days = match template.max_age_days {
        0 => 0,
        n => rng.random_range(0..n),
    };

    CleaningItem {
        id: Builder::from_random_bytes(rng.random()).into_uuid().to_string(),
        name: template.name.to_string(),
        path: template.path.to_string(),
        size,
        kind: template.kind,
        category,
        last_modified: now - Duration::days(i64::from(age_days)),
        selected: false,
    }
}
