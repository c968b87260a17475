use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct Trash;

const TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        name: "Old project.zip",
        path: "~/.Trash/Old project.zip",
        kind: ItemKind::File,
        size: SizeRange::mib(50, 500),
        max_age_days: 30,
    },
    ItemTemplate {
        name: "Screenshots",
        path: "~/.Trash/Screenshots",
        kind: ItemKind::Folder,
        size: SizeRange::mib(100, 800),
        max_age_days: 15,
    },
    ItemTemplate {
        name: "document.pdf",
        path: "~/.Trash/document.pdf",
        kind: ItemKind::File,
        size: SizeRange::mib(1, 50),
        max_age_days: 7,
    },
    ItemTemplate {
        name: "holiday_video.mov",
        path: "~/.Trash/holiday_video.mov",
        kind: ItemKind::File,
        size: SizeRange::mib(500, 2000),
        max_age_days: 45,
    },
    ItemTemplate {
        name: "node_modules_backup",
        path: "~/.Trash/node_modules_backup",
        kind: ItemKind::Folder,
        size: SizeRange::mib(200, 1000),
        max_age_days: 10,
    },
];

impl CategorySource for Trash {
    fn category(&self) -> Category {
        Category::Trash
    }

    fn title(&self) -> &'static str {
        "Trash"
    }

    fn description(&self) -> &'static str {
        "Deleted files waiting to be removed permanently"
    }

    fn commands(&self) -> &'static [&'static str] {
        &["rm -rf ~/.Trash/*"]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
