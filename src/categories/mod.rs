mod apps;
mod cache;
mod downloads;
mod large_files;
mod logs;
mod trash;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::cleaner::{self, CategorySource};
use crate::model::{Category, CleaningItem};

pub fn all_sources() -> Vec<Box<dyn CategorySource>> {
    vec![
        Box::new(trash::Trash),
        Box::new(cache::UserCache),
        Box::new(downloads::Downloads),
        Box::new(logs::SystemLogs),
        Box::new(apps::LeftoverApps),
        Box::new(large_files::LargeFiles),
    ]
}

pub fn find_source(category: Category) -> Box<dyn CategorySource> {
    match category {
        Category::Trash => Box::new(trash::Trash),
        Category::Cache => Box::new(cache::UserCache),
        Category::Downloads => Box::new(downloads::Downloads),
        Category::Logs => Box::new(logs::SystemLogs),
        Category::Apps => Box::new(apps::LeftoverApps),
        Category::LargeFiles => Box::new(large_files::LargeFiles),
    }
}

/// Simulated items for every category, in category order.
pub fn generate_all<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<CleaningItem> {
    all_sources()
        .iter()
        .flat_map(|source| cleaner::generate(source.as_ref(), &mut *rng, now))
        .collect()
}
