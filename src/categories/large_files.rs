use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct LargeFiles;

const TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        name: "Final_Project_v3_FINAL_REAL.psd",
        path: "~/Documents/Design/Final_Project_v3_FINAL_REAL.psd",
        kind: ItemKind::File,
        size: SizeRange::mib(500, 2000),
        max_age_days: 60,
    },
    ItemTemplate {
        name: "backup_iphone_2022.zip",
        path: "~/Documents/Backups/backup_iphone_2022.zip",
        kind: ItemKind::File,
        size: SizeRange::mib(5000, 15000),
        max_age_days: 365,
    },
    ItemTemplate {
        name: "virtual_machine.vmdk",
        path: "~/VMs/virtual_machine.vmdk",
        kind: ItemKind::File,
        size: SizeRange::mib(10000, 50000),
        max_age_days: 120,
    },
    ItemTemplate {
        name: "raw_photos_2023",
        path: "~/Pictures/raw_photos_2023",
        kind: ItemKind::Folder,
        size: SizeRange::mib(2000, 8000),
        max_age_days: 30,
    },
];

impl CategorySource for LargeFiles {
    fn category(&self) -> Category {
        Category::LargeFiles
    }

    fn title(&self) -> &'static str {
        "Large Files"
    }

    fn description(&self) -> &'static str {
        "Files taking up the most space on your disk"
    }

    fn warning(&self) -> Option<&'static str> {
        Some("Review carefully before removing")
    }

    fn commands(&self) -> &'static [&'static str] {
        &["# Review these files before deleting them"]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
