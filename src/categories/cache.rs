use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct UserCache;

const fn cache_dir(name: &'static str, path: &'static str, size: SizeRange, max_age_days: u32) -> ItemTemplate {
    ItemTemplate {
        name,
        path,
        kind: ItemKind::Folder,
        size,
        max_age_days,
    }
}

const TEMPLATES: &[ItemTemplate] = &[
    cache_dir("com.apple.Safari", "~/Library/Caches/com.apple.Safari", SizeRange::mib(100, 500), 1),
    cache_dir("com.google.Chrome", "~/Library/Caches/com.google.Chrome", SizeRange::mib(200, 800), 1),
    cache_dir("com.spotify.client", "~/Library/Caches/com.spotify.client", SizeRange::mib(50, 300), 2),
    cache_dir("com.apple.dt.Xcode", "~/Library/Caches/com.apple.dt.Xcode", SizeRange::mib(1000, 5000), 3),
    cache_dir("com.microsoft.VSCode", "~/Library/Caches/com.microsoft.VSCode", SizeRange::mib(100, 400), 1),
    cache_dir("com.slack.Slack", "~/Library/Caches/com.slack.Slack", SizeRange::mib(50, 200), 1),
    cache_dir("com.discord", "~/Library/Caches/com.discord", SizeRange::mib(80, 250), 2),
];

impl CategorySource for UserCache {
    fn category(&self) -> Category {
        Category::Cache
    }

    fn title(&self) -> &'static str {
        "User Cache"
    }

    fn description(&self) -> &'static str {
        "Temporary application files that can be regenerated"
    }

    fn commands(&self) -> &'static [&'static str] {
        &["rm -rf ~/Library/Caches/*"]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
