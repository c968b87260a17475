use std::time::Duration;

use eframe::egui;
use rand::rngs::StdRng;
use tidyclean::categories;
use tidyclean::model::{Category, Frequency, ItemKind, Modal, NotificationKind, ScheduleUpdate, Theme, TimeOfDay, View};
use tidyclean::refresh::{RefreshTask, REFRESH_DURATION};
use tidyclean::store::ShellEvent;
use tidyclean::utils::{self, format_size};
use tidyclean::Store;
use tracing::debug;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(80, 180, 220);
const GOOD: egui::Color32 = egui::Color32::from_rgb(80, 200, 80);
const CAUTION: egui::Color32 = egui::Color32::from_rgb(220, 150, 50);
const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);
const MUTED: egui::Color32 = egui::Color32::from_rgb(160, 160, 170);

/// Schedule editor form. Holds raw text until saved.
struct ScheduleEditor {
    editing: Option<String>,
    category: Category,
    frequency: Frequency,
    time: String,
    enabled: bool,
    error: Option<String>,
}

impl ScheduleEditor {
    fn new() -> Self {
        Self {
            editing: None,
            category: Category::Cache,
            frequency: Frequency::Weekly,
            time: TimeOfDay::default().to_string(),
            enabled: true,
            error: None,
        }
    }
}

/// Display data for one row of the item list.
struct ItemRow {
    id: String,
    name: String,
    path: String,
    size: u64,
    kind: ItemKind,
    age: String,
    selected: bool,
}

pub struct TidyCleanApp {
    store: Store,
    refresh: Option<RefreshTask>,
    editor: Option<ScheduleEditor>,
    last_system_dark: Option<bool>,
    rng: StdRng,
}

impl TidyCleanApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, store: Store, rng: StdRng) -> Self {
        Self {
            store,
            refresh: None,
            editor: None,
            last_system_dark: None,
            rng,
        }
    }

    /// Forward host signals (system appearance, menu shortcut) to the store.
    fn poll_shell(&mut self, ctx: &egui::Context) {
        let system_dark = ctx.input(|i| i.raw.system_theme.map(|t| t == egui::Theme::Dark));
        if let Some(dark) = system_dark {
            if self.last_system_dark != Some(dark) {
                self.last_system_dark = Some(dark);
                self.store.apply_shell_event(ShellEvent::ThemeChanged { dark });
            }
        }

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Comma)) {
            self.store.apply_shell_event(ShellEvent::Navigate(View::Settings));
        }
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = if self.store.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
    }

    fn drain_refresh(&mut self) {
        let Some(task) = &self.refresh else {
            return;
        };
        let category = task.category();
        let mut done = false;
        for message in task.drain() {
            self.store.apply_refresh(category, message);
            done |= !matches!(message, tidyclean::refresh::RefreshMessage::Progress(_));
        }
        if done {
            self.refresh = None;
        }
    }

    fn start_refresh(&mut self, category: Category) {
        if self.refresh.is_some() {
            return;
        }
        self.store.set_scanning(true);
        self.refresh = Some(RefreshTask::spawn(category, REFRESH_DURATION));
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading(
            egui::RichText::new("TidyClean")
                .size(22.0)
                .strong()
                .color(ACCENT),
        );
        ui.label(egui::RichText::new("Cleanup assistant").color(egui::Color32::GRAY));
        ui.add_space(12.0);

        let current = self.store.current_view();
        if ui
            .selectable_label(current == View::Dashboard, "Dashboard")
            .clicked()
        {
            self.store.set_current_view(View::Dashboard);
        }
        ui.separator();

        for source in categories::all_sources() {
            let category = source.category();
            let view = View::Cleaning(category);
            let count = self.store.category_count(category);
            let label = if count > 0 {
                format!("{} ({count})", source.title())
            } else {
                source.title().to_string()
            };
            if ui.selectable_label(current == view, label).clicked() {
                self.store.set_current_view(view);
            }
        }

        ui.separator();
        if ui
            .selectable_label(current == View::Settings, "Settings")
            .clicked()
        {
            self.store.set_current_view(View::Settings);
        }
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("Dashboard").size(24.0).strong());
        ui.label(egui::RichText::new("Keep your Mac clean and fast").color(egui::Color32::GRAY));
        ui.add_space(8.0);

        let stats = self.store.stats();
        ui.columns(3, |cols| {
            stat_card(&mut cols[0], "Space freed", &format_size(stats.total_space_saved));
            stat_card(
                &mut cols[1],
                "Items cleaned",
                &utils::format_number(stats.total_items_cleaned),
            );
            stat_card(
                &mut cols[2],
                "Cleanable now",
                &format_size(self.store.total_cleanable_size()),
            );
        });
        ui.add_space(8.0);

        let storage = *self.store.storage();
        egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
            ui.label(egui::RichText::new("Storage").strong());
            ui.label(format!(
                "{} used of {}",
                format_size(storage.used()),
                format_size(storage.total)
            ));
            for (label, bytes) in [
                ("Applications", storage.apps),
                ("Documents", storage.documents),
                ("System", storage.system),
                ("Other", storage.other),
                ("Free", storage.free),
            ] {
                ui.horizontal(|ui| {
                    ui.add_sized([110.0, 18.0], egui::Label::new(label));
                    let fraction = if storage.total == 0 {
                        0.0
                    } else {
                        bytes as f32 / storage.total as f32
                    };
                    ui.add(egui::ProgressBar::new(fraction).desired_width(220.0));
                    ui.label(format!(
                        "{} ({})",
                        format_size(bytes),
                        utils::format_percentage(bytes, storage.total)
                    ));
                });
            }
        });
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Quick actions").strong());
        let mut navigate = None;
        ui.horizontal_wrapped(|ui| {
            for category in [
                Category::Trash,
                Category::Cache,
                Category::Downloads,
                Category::Logs,
            ] {
                let text = format!(
                    "{}\n{}",
                    categories::find_source(category).title(),
                    format_size(self.store.category_size(category))
                );
                if ui.add_sized([140.0, 44.0], egui::Button::new(text)).clicked() {
                    navigate = Some(View::Cleaning(category));
                }
            }
        });
        if let Some(view) = navigate {
            self.store.set_current_view(view);
        }
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Recent activity").strong());
        let now = self.store.now();
        if self.store.history().is_empty() {
            ui.label(egui::RichText::new("No cleanings yet.").italics().color(egui::Color32::GRAY));
        }
        for entry in self.store.history().iter().take(5) {
            ui.horizontal(|ui| {
                ui.label(&entry.category);
                ui.label(
                    egui::RichText::new(format!(
                        "{} items, {}",
                        entry.items_cleaned,
                        format_size(entry.space_saved)
                    ))
                    .color(GOOD),
                );
                ui.label(
                    egui::RichText::new(utils::format_relative_time(
                        entry.date,
                        now,
                        self.store.language(),
                    ))
                    .color(egui::Color32::GRAY),
                );
            });
        }
    }

    fn render_cleaning_view(&mut self, ui: &mut egui::Ui, category: Category) {
        let source = categories::find_source(category);
        let is_refreshing = self.refresh.is_some();

        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new(source.title()).size(24.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if is_refreshing {
                    if ui.button("Cancel").clicked() {
                        if let Some(task) = &self.refresh {
                            task.cancel();
                        }
                    }
                    ui.add(
                        egui::ProgressBar::new(f32::from(self.store.scan_progress()) / 100.0)
                            .desired_width(120.0),
                    );
                } else if ui.button("Refresh").clicked() {
                    self.start_refresh(category);
                }
            });
        });
        ui.label(egui::RichText::new(source.description()).color(egui::Color32::GRAY));

        if let Some(warning) = source.warning() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(format!("\u{26A0} {warning}")).color(CAUTION));
        }
        ui.add_space(8.0);

        let count = self.store.category_count(category);
        let selected = self.store.selected_count(category);
        let all_selected = self.store.all_selected(category);
        ui.horizontal(|ui| {
            let label = if all_selected { "Deselect All" } else { "Select All" };
            if ui.add_enabled(count > 0, egui::Button::new(label)).clicked() {
                if all_selected {
                    self.store.deselect_all(category);
                } else {
                    self.store.select_all(category);
                }
            }
            ui.label(format!("{selected} of {count} selected"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "{} of {}",
                        format_size(self.store.selected_size(category)),
                        format_size(self.store.category_size(category))
                    ))
                    .strong()
                    .color(GOOD),
                );
            });
        });
        ui.separator();

        // Extract display data first to avoid borrow conflicts
        let now = self.store.now();
        let language = self.store.language();
        let rows: Vec<ItemRow> = self
            .store
            .items_in(category)
            .map(|item| ItemRow {
                id: item.id.clone(),
                name: item.name.clone(),
                path: item.path.clone(),
                size: item.size,
                kind: item.kind,
                age: utils::format_relative_time(item.last_modified, now, language),
                selected: item.selected,
            })
            .collect();

        let mut toggled = Vec::new();
        egui::ScrollArea::vertical()
            .max_height(320.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if rows.is_empty() {
                    ui.label(
                        egui::RichText::new("Nothing to clean here.")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                }
                for row in &rows {
                    ui.horizontal(|ui| {
                        let mut checked = row.selected;
                        if ui.checkbox(&mut checked, "").changed() {
                            toggled.push(row.id.clone());
                        }
                        let icon = match row.kind {
                            ItemKind::File => "\u{1F5CB}",
                            ItemKind::Folder => "\u{1F4C1}",
                        };
                        ui.label(format!("{icon} {}", row.name));
                        ui.label(egui::RichText::new(&row.path).small().color(MUTED));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format_size(row.size))
                                    .color(egui::Color32::from_rgb(220, 180, 50)),
                            );
                            ui.label(egui::RichText::new(&row.age).small().color(egui::Color32::GRAY));
                        });
                    });
                }
            });
        for id in toggled {
            let _ = self.store.toggle_item_selection(&id);
        }

        ui.add_space(8.0);
        if ui
            .add(
                egui::Button::new(
                    egui::RichText::new("Clean Selected")
                        .strong()
                        .color(egui::Color32::WHITE),
                )
                .fill(DANGER),
            )
            .clicked()
        {
            self.store.clean_selected(category);
        }

        ui.add_space(12.0);
        ui.label(egui::RichText::new("Run it yourself in Terminal").strong());
        for command in source.commands() {
            ui.horizontal(|ui| {
                ui.code(*command);
                if ui.small_button("Copy").clicked() {
                    ui.ctx().copy_text(command.to_string());
                    debug!("copied command to clipboard: {command}");
                    self.store
                        .add_notification(NotificationKind::Info, "Copied", *command);
                }
            });
        }
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("Settings").size(24.0).strong());
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Appearance").strong());
        ui.horizontal(|ui| {
            for theme in Theme::ALL {
                if ui
                    .selectable_label(self.store.theme() == theme, theme.label())
                    .clicked()
                {
                    self.store.set_theme(theme);
                }
            }
        });
        ui.add_space(4.0);

        ui.label(egui::RichText::new("Language").strong());
        ui.horizontal(|ui| {
            for (code, label) in [("es", "Español"), ("en", "English")] {
                if ui
                    .selectable_label(self.store.language() == code, label)
                    .clicked()
                {
                    self.store.set_language(code);
                }
            }
        });
        ui.label(
            egui::RichText::new("Used for relative dates. Other text stays in English.")
                .small()
                .color(egui::Color32::GRAY),
        );
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Scheduled cleanings").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ Add schedule").clicked() {
                    self.editor = Some(ScheduleEditor::new());
                    self.store.set_active_modal(Some(Modal::Schedule));
                }
            });
        });
        ui.label(
            egui::RichText::new("Reminders only. Cleanups still have to be started by hand.")
                .small()
                .color(egui::Color32::GRAY),
        );

        if self.store.schedules().is_empty() {
            ui.label(egui::RichText::new("No schedules yet.").italics().color(egui::Color32::GRAY));
        }
        let mut toggle = None;
        let mut edit = None;
        for schedule in self.store.schedules() {
            ui.horizontal(|ui| {
                let mut enabled = schedule.enabled;
                if ui.checkbox(&mut enabled, "").changed() {
                    toggle = Some(schedule.id.clone());
                }
                ui.label(egui::RichText::new(schedule.category.label()).strong());
                ui.label(format!("{} \u{2022} {}", schedule.frequency.label(), schedule.time));
                let next = if schedule.enabled {
                    format!("next: {}", utils::format_local_datetime(schedule.next_run))
                } else {
                    "paused".to_string()
                };
                ui.label(egui::RichText::new(next).color(egui::Color32::GRAY));
                if ui.small_button("Edit").clicked() {
                    edit = Some(ScheduleEditor {
                        editing: Some(schedule.id.clone()),
                        category: schedule.category,
                        frequency: schedule.frequency,
                        time: schedule.time.to_string(),
                        enabled: schedule.enabled,
                        error: None,
                    });
                }
            });
        }
        if let Some(id) = toggle {
            let _ = self.store.toggle_schedule(&id);
        }
        if let Some(editor) = edit {
            self.editor = Some(editor);
            self.store.set_active_modal(Some(Modal::Schedule));
        }
        ui.separator();

        let stats = self.store.stats();
        ui.label(egui::RichText::new("Statistics").strong());
        ui.label(format!("Total space freed: {}", format_size(stats.total_space_saved)));
        ui.label(format!(
            "Total items cleaned: {}",
            utils::format_number(stats.total_items_cleaned)
        ));
        ui.separator();

        ui.label(egui::RichText::new("History").strong());
        if self.store.history().is_empty() {
            ui.label(egui::RichText::new("Nothing cleaned yet.").italics().color(egui::Color32::GRAY));
        }
        egui::ScrollArea::vertical()
            .id_salt("history")
            .max_height(200.0)
            .show(ui, |ui| {
                for entry in self.store.history() {
                    ui.horizontal(|ui| {
                        ui.label(utils::format_date(&entry.date));
                        ui.label(&entry.category);
                        ui.label(
                            egui::RichText::new(format!(
                                "{} items, {}",
                                entry.items_cleaned,
                                format_size(entry.space_saved)
                            ))
                            .color(GOOD),
                        );
                    });
                }
            });
    }

    fn render_schedule_modal(&mut self, ctx: &egui::Context) {
        let Some(editor) = &mut self.editor else {
            self.store.set_active_modal(None);
            return;
        };

        let mut save = false;
        let mut delete = false;
        let mut close = false;

        let title = if editor.editing.is_some() {
            "Edit schedule"
        } else {
            "New schedule"
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::ComboBox::from_label("Category")
                    .selected_text(editor.category.label())
                    .show_ui(ui, |ui| {
                        for category in Category::ALL {
                            ui.selectable_value(&mut editor.category, category, category.label());
                        }
                    });
                ui.horizontal(|ui| {
                    for frequency in Frequency::ALL {
                        ui.radio_value(&mut editor.frequency, frequency, frequency.label());
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Time (HH:mm)");
                    ui.add(egui::TextEdit::singleline(&mut editor.time).desired_width(60.0));
                });
                ui.checkbox(&mut editor.enabled, "Enabled");
                if let Some(error) = &editor.error {
                    ui.label(egui::RichText::new(error).color(DANGER));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if editor.editing.is_some() && ui.button("Delete").clicked() {
                        delete = true;
                    }
                });
            });

        if save {
            match editor.time.parse::<TimeOfDay>() {
                Ok(time) => {
                    match editor.editing.clone() {
                        Some(id) => {
                            let update = ScheduleUpdate {
                                category: Some(editor.category),
                                frequency: Some(editor.frequency),
                                time: Some(time),
                                enabled: Some(editor.enabled),
                                last_run: None,
                            };
                            let _ = self.store.update_schedule(&id, update);
                        }
                        None => {
                            self.store.add_schedule(
                                editor.category,
                                editor.frequency,
                                time,
                                editor.enabled,
                            );
                        }
                    }
                    close = true;
                }
                Err(e) => editor.error = Some(e.to_string()),
            }
        }
        if delete {
            if let Some(id) = editor.editing.clone() {
                let _ = self.store.remove_schedule(&id);
            }
            close = true;
        }
        if close {
            self.editor = None;
            self.store.set_active_modal(None);
        }
    }

    fn render_welcome_modal(&mut self, ctx: &egui::Context) {
        let mut dismiss = false;
        egui::Window::new("Welcome")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([380.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Welcome to TidyClean").size(20.0).strong());
                });
                ui.add_space(8.0);
                ui.label(
                    "TidyClean shows what could be cleaned on your Mac. It never deletes \
                     anything itself: cleaning only clears the list, and each category \
                     lists the Terminal commands you can run yourself.",
                );
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    if ui.add_sized([140.0, 32.0], egui::Button::new("Get started")).clicked() {
                        dismiss = true;
                    }
                });
            });
        if dismiss {
            self.store.set_active_modal(None);
        }
    }

    fn render_toasts(&mut self, ctx: &egui::Context) {
        self.store.expire_notifications();
        if self.store.notifications().is_empty() {
            return;
        }

        let mut closed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                for notification in self.store.notifications() {
                    let color = match notification.kind {
                        NotificationKind::Success => GOOD,
                        NotificationKind::Warning => CAUTION,
                        NotificationKind::Error => DANGER,
                        NotificationKind::Info => ACCENT,
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_width(260.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&notification.title).strong().color(color));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("\u{2715}").clicked() {
                                    closed = Some(notification.id.clone());
                                }
                            });
                        });
                        if !notification.message.is_empty() {
                            ui.label(&notification.message);
                        }
                    });
                    ui.add_space(4.0);
                }
            });
        if let Some(id) = closed {
            self.store.remove_notification(&id);
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
        ui.label(egui::RichText::new(label).color(egui::Color32::GRAY));
        ui.label(egui::RichText::new(value).size(18.0).strong().color(ACCENT));
    });
}

impl eframe::App for TidyCleanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_shell(ctx);
        self.apply_theme(ctx);
        self.drain_refresh();
        self.store.restock_items(&mut self.rng);

        if self.refresh.is_some() {
            ctx.request_repaint();
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.store.current_view() {
                    View::Dashboard => self.render_dashboard(ui),
                    View::Cleaning(category) => self.render_cleaning_view(ui, category),
                    View::Settings => self.render_settings(ui),
                });
        });

        match self.store.active_modal() {
            Some(Modal::Welcome) => self.render_welcome_modal(ctx),
            Some(Modal::Schedule) => self.render_schedule_modal(ctx),
            None => {}
        }

        self.render_toasts(ctx);
    }
}
