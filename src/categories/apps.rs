use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct LeftoverApps;

const TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        name: "OldApp.app (uninstalled)",
        path: "~/Library/Application Support/OldApp",
        kind: ItemKind::Folder,
        size: SizeRange::mib(50, 200),
        max_age_days: 180,
    },
    // preference files are tiny
    ItemTemplate {
        name: "UnusedTool Preferences",
        path: "~/Library/Preferences/com.unusedtool.plist",
        kind: ItemKind::File,
        size: SizeRange::kib(1, 10),
        max_age_days: 200,
    },
    ItemTemplate {
        name: "DeletedGame Data",
        path: "~/Library/Application Support/DeletedGame",
        kind: ItemKind::Folder,
        size: SizeRange::mib(100, 500),
        max_age_days: 90,
    },
];

impl CategorySource for LeftoverApps {
    fn category(&self) -> Category {
        Category::Apps
    }

    fn title(&self) -> &'static str {
        "Leftover Apps"
    }

    fn description(&self) -> &'static str {
        "Files left behind by applications that are no longer installed"
    }

    fn commands(&self) -> &'static [&'static str] {
        &["# Leftover files have to be removed manually"]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
