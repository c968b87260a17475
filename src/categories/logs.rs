use crate::cleaner::{CategorySource, ItemTemplate, SizeRange};
use crate::model::{Category, ItemKind};

pub struct SystemLogs;

const TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        name: "system.log",
        path: "/var/log/system.log",
        kind: ItemKind::File,
        size: SizeRange::mib(10, 100),
        max_age_days: 1,
    },
    ItemTemplate {
        name: "install.log",
        path: "/var/log/install.log",
        kind: ItemKind::File,
        size: SizeRange::mib(5, 50),
        max_age_days: 7,
    },
    ItemTemplate {
        name: "DiagnosticReports",
        path: "/Library/Logs/DiagnosticReports",
        kind: ItemKind::Folder,
        size: SizeRange::mib(50, 300),
        max_age_days: 14,
    },
    ItemTemplate {
        name: "com.apple.xpc.launchd",
        path: "/var/log/com.apple.xpc.launchd",
        kind: ItemKind::Folder,
        size: SizeRange::mib(20, 80),
        max_age_days: 3,
    },
];

impl CategorySource for SystemLogs {
    fn category(&self) -> Category {
        Category::Logs
    }

    fn title(&self) -> &'static str {
        "System Logs"
    }

    fn description(&self) -> &'static str {
        "System log and diagnostic files"
    }

    fn warning(&self) -> Option<&'static str> {
        Some("Requires administrator privileges")
    }

    fn commands(&self) -> &'static [&'static str] {
        &[
            "sudo rm -rf /var/log/*",
            "sudo rm -rf /Library/Logs/DiagnosticReports/*",
        ]
    }

    fn templates(&self) -> &'static [ItemTemplate] {
        TEMPLATES
    }
}
