use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct Downloads;

const TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        name: "installer.dmg",
        path: "~/Downloads/installer.dmg",
        kind: ItemKind::File,
        size: SizeRange::mib(100, 500),
        max_age_days: 60,
    },
    ItemTemplate {
        name: "random_files",
        path: "~/Downloads/random_files",
        kind: ItemKind::Folder,
        size: SizeRange::mib(50, 200),
        max_age_days: 90,
    },
    ItemTemplate {
        name: "backup_2023.zip",
        path: "~/Downloads/backup_2023.zip",
        kind: ItemKind::File,
        size: SizeRange::mib(500, 2000),
        max_age_days: 120,
    },
    ItemTemplate {
        name: "presentation.pptx",
        path: "~/Downloads/presentation.pptx",
        kind: ItemKind::File,
        size: SizeRange::mib(10, 100),
        max_age_days: 30,
    },
    ItemTemplate {
        name: "music_collection",
        path: "~/Downloads/music_collection",
        kind: ItemKind::Folder,
        size: SizeRange::mib(300, 800),
        max_age_days: 45,
    },
];

impl CategorySource for Downloads {
    fn category(&self) -> Category {
        Category::Downloads
    }

    fn title(&self) -> &'static str {
        "Downloads"
    }

    fn description(&self) -> &'static str {
        "Downloaded files you might not need anymore"
    }

    fn warning(&self) -> Option<&'static str> {
        Some("Review these files before removing them")
    }

    fn commands(&self) -> &'static [&'static str] {
        &["# Review ~/Downloads manually before deleting anything"]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
