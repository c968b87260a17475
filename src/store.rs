use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::categories;
use crate::error::{Error, Result};
use crate::model::{
    Category, CleaningHistory, CleaningItem, Frequency, Modal, Notification, NotificationKind,
    ScheduleUpdate, ScheduledCleaning, Stats, StorageBreakdown, Theme, TimeOfDay, View,
};
use crate::persist::{PersistedState, Persistence};
use crate::refresh::RefreshMessage;
use crate::schedule::{self, Clock, SystemClock};
use crate::utils::{self, format_size};

/// The history log keeps only this many entries, newest first.
pub const HISTORY_LIMIT: usize = 50;

/// Toasts are dismissed after this many milliseconds.
pub const TOAST_DURATION_MS: i64 = 5_000;

/// Signals the hosting shell sends into the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    Navigate(View),
    ThemeChanged { dark: bool },
}

/// Result of a completed clean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanReport {
    pub items_cleaned: u64,
    pub space_saved: u64,
}

/// All application state, owned by one instance for the process lifetime.
///
/// Theme, language, history, stats and schedules are written through the
/// attached [`Persistence`] after every change; everything else resets on
/// restart.
pub struct Store<C: Clock = SystemClock> {
    clock: C,
    persistence: Option<Persistence>,

    theme: Theme,
    language: String,
    history: Vec<CleaningHistory>,
    stats: Stats,
    schedules: Vec<ScheduledCleaning>,

    current_view: View,
    system_dark: bool,
    is_scanning: bool,
    scan_progress: u8,
    storage: StorageBreakdown,
    items: Vec<CleaningItem>,
    active_modal: Option<Modal>,
    notifications: Vec<Notification>,
}

impl<C: Clock> Store<C> {
    /// A fresh in-memory store with default state.
    pub fn new(clock: C) -> Self {
        Self::from_persisted(clock, PersistedState::default())
    }

    /// Rehydrate from `state`. Ephemeral fields start at their defaults.
    pub fn from_persisted(clock: C, state: PersistedState) -> Self {
        let mut history = state.history;
        history.truncate(HISTORY_LIMIT);

        Self {
            clock,
            persistence: None,
            theme: state.theme,
            language: utils::normalize_language(&state.language).to_string(),
            history,
            stats: Stats {
                total_space_saved: state.total_space_saved,
                total_items_cleaned: state.total_items_cleaned,
            },
            schedules: state.scheduled_cleanings,
            current_view: View::default(),
            system_dark: false,
            is_scanning: false,
            scan_progress: 0,
            storage: StorageBreakdown::default(),
            items: Vec::new(),
            active_modal: Some(Modal::Welcome),
            notifications: Vec::new(),
        }
    }

    /// Load whatever `persistence` holds and keep writing back to it.
    /// Unreadable state is logged and replaced by defaults.
    pub fn open(clock: C, persistence: Persistence) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                info!(
                    "restored {} schedules and {} history entries from {}",
                    state.scheduled_cleanings.len(),
                    state.history.len(),
                    persistence.path().display()
                );
                state
            }
            Ok(None) => {
                debug!("no saved state at {}", persistence.path().display());
                PersistedState::default()
            }
            Err(e) => {
                warn!(
                    "ignoring unreadable state at {}: {e}",
                    persistence.path().display()
                );
                PersistedState::default()
            }
        };

        let mut store = Self::from_persisted(clock, state);
        store.persistence = Some(persistence);
        store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    /// Snapshot of the persisted subset.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            theme: self.theme,
            language: self.language.clone(),
            history: self.history.clone(),
            total_space_saved: self.stats.total_space_saved,
            total_items_cleaned: self.stats.total_items_cleaned,
            scheduled_cleanings: self.schedules.clone(),
        }
    }

    fn persist(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if let Err(e) = persistence.save(&self.persisted()) {
            warn!(
                "failed to save state to {}: {e}",
                persistence.path().display()
            );
        }
    }

    // -- appearance & navigation --------------------------------------------

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        debug!("theme -> {theme:?}");
        self.theme = theme;
        self.persist();
    }

    /// Whether the dark appearance applies, resolving `System` through the
    /// last theme signal from the shell.
    pub fn is_dark(&self) -> bool {
        match self.theme {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => self.system_dark,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Store the primary subtag of `code` if supported, else the default.
    pub fn set_language(&mut self, code: &str) {
        let language = utils::normalize_language(code);
        if self.language == language {
            return;
        }
        debug!("language -> {language}");
        self.language = language.to_string();
        self.persist();
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn set_current_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn apply_shell_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Navigate(view) => self.set_current_view(view),
            ShellEvent::ThemeChanged { dark } => self.system_dark = dark,
        }
    }

    pub fn active_modal(&self) -> Option<Modal> {
        self.active_modal
    }

    pub fn set_active_modal(&mut self, modal: Option<Modal>) {
        self.active_modal = modal;
    }

    // -- scanning -----------------------------------------------------------

    pub fn is_scanning(&self) -> bool {
        self.is_scanning
    }

    pub fn set_scanning(&mut self, scanning: bool) {
        self.is_scanning = scanning;
        if scanning {
            self.scan_progress = 0;
        }
    }

    pub fn scan_progress(&self) -> u8 {
        self.scan_progress
    }

    pub fn set_scan_progress(&mut self, progress: u8) {
        self.scan_progress = utils::clamp(progress, 0, 100);
    }

    /// Fold one message of a simulated rescan of `category` into the state.
    pub fn apply_refresh(&mut self, category: Category, message: RefreshMessage) {
        match message {
            RefreshMessage::Progress(p) => {
                self.is_scanning = true;
                self.set_scan_progress(p);
            }
            RefreshMessage::Finished => {
                self.is_scanning = false;
                self.scan_progress = 100;
                let found = self.category_count(category);
                self.add_notification(
                    NotificationKind::Info,
                    "Scan complete",
                    format!("Found {found} items"),
                );
            }
            RefreshMessage::Cancelled => {
                self.is_scanning = false;
                self.scan_progress = 0;
                self.add_notification(NotificationKind::Info, "Scan cancelled", "");
            }
        }
    }

    pub fn storage(&self) -> &StorageBreakdown {
        &self.storage
    }

    pub fn set_storage(&mut self, storage: StorageBreakdown) {
        self.storage = storage;
    }

    // -- items --------------------------------------------------------------

    pub fn items(&self) -> &[CleaningItem] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<CleaningItem>) {
        self.items = items;
    }

    /// Fill the item list with a fresh simulated scan when it is empty.
    /// Returns whether new items were generated.
    pub fn restock_items<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.items.is_empty() {
            return false;
        }
        self.items = categories::generate_all(rng, self.now());
        debug!("generated {} simulated items", self.items.len());
        true
    }

    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &CleaningItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    pub fn toggle_item_selection(&mut self, id: &str) -> Result<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
        item.selected = !item.selected;
        Ok(item.selected)
    }

    pub fn select_all(&mut self, category: Category) {
        self.set_category_selection(category, true);
    }

    pub fn deselect_all(&mut self, category: Category) {
        self.set_category_selection(category, false);
    }

    fn set_category_selection(&mut self, category: Category, selected: bool) {
        for item in self.items.iter_mut().filter(|i| i.category == category) {
            item.selected = selected;
        }
    }

    /// Drop every item whose id is in `ids`. Unknown ids are ignored.
    /// Returns how many items were removed.
    pub fn remove_items<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let ids: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(i.id.as_str()));
        before - self.items.len()
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.items_in(category).count()
    }

    pub fn category_size(&self, category: Category) -> u64 {
        self.items_in(category).map(|i| i.size).sum()
    }

    pub fn selected_count(&self, category: Category) -> usize {
        self.items_in(category).filter(|i| i.selected).count()
    }

    pub fn selected_size(&self, category: Category) -> u64 {
        self.items_in(category)
            .filter(|i| i.selected)
            .map(|i| i.size)
            .sum()
    }

    pub fn all_selected(&self, category: Category) -> bool {
        let mut items = self.items_in(category).peekable();
        items.peek().is_some() && items.all(|i| i.selected)
    }

    /// The dashboard's "cleanable" figure: trash, cache, downloads and logs.
    pub fn total_cleanable_size(&self) -> u64 {
        [
            Category::Trash,
            Category::Cache,
            Category::Downloads,
            Category::Logs,
        ]
        .into_iter()
        .map(|c| self.category_size(c))
        .sum()
    }

    /// Remove the selected items of `category`, record the clean in the stats
    /// and history, and announce it. With nothing selected this only raises a
    /// warning and returns `None`.
    pub fn clean_selected(&mut self, category: Category) -> Option<CleanReport> {
        let selected: Vec<String> = self
            .items_in(category)
            .filter(|i| i.selected)
            .map(|i| i.id.clone())
            .collect();

        if selected.is_empty() {
            self.add_notification(
                NotificationKind::Warning,
                "Nothing selected",
                "Select the items you want to clean",
            );
            return None;
        }

        let report = CleanReport {
            items_cleaned: selected.len() as u64,
            space_saved: self.selected_size(category),
        };

        self.remove_items(&selected);
        self.bump_stats(report.space_saved, report.items_cleaned);
        self.record_history(
            categories::find_source(category).title(),
            report.items_cleaned,
            report.space_saved,
        );
        self.persist();

        info!(
            "cleaned {} items ({}) from {category}",
            report.items_cleaned,
            format_size(report.space_saved)
        );
        self.add_notification(
            NotificationKind::Success,
            "Cleaning complete",
            format!("Freed {}", format_size(report.space_saved)),
        );
        Some(report)
    }

    // -- history & stats ----------------------------------------------------

    pub fn history(&self) -> &[CleaningHistory] {
        &self.history
    }

    pub fn add_history(
        &mut self,
        category: impl Into<String>,
        items_cleaned: u64,
        space_saved: u64,
    ) -> &CleaningHistory {
        self.record_history(category, items_cleaned, space_saved);
        self.persist();
        &self.history[0]
    }

    fn record_history(&mut self, category: impl Into<String>, items_cleaned: u64, space_saved: u64) {
        let entry = CleaningHistory {
            id: utils::generate_id(),
            date: self.now(),
            category: category.into(),
            items_cleaned,
            space_saved,
        };
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Add both deltas to the cumulative counters in one step.
    pub fn update_stats(&mut self, space: u64, items: u64) {
        self.bump_stats(space, items);
        self.persist();
    }

    fn bump_stats(&mut self, space: u64, items: u64) {
        self.stats = Stats {
            total_space_saved: self.stats.total_space_saved.saturating_add(space),
            total_items_cleaned: self.stats.total_items_cleaned.saturating_add(items),
        };
    }

    // -- schedules ----------------------------------------------------------

    pub fn schedules(&self) -> &[ScheduledCleaning] {
        &self.schedules
    }

    pub fn schedule(&self, id: &str) -> Option<&ScheduledCleaning> {
        self.schedules.iter().find(|s| s.id == id)
    }

    fn next_run(&self, frequency: Frequency, time: TimeOfDay) -> DateTime<Utc> {
        schedule::next_run(frequency, time, &self.clock.now()).with_timezone(&Utc)
    }

    fn schedule_index(&self, id: &str) -> Result<usize> {
        self.schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::ScheduleNotFound(id.to_string()))
    }

    /// Create a schedule. Several schedules may share a category.
    pub fn add_schedule(
        &mut self,
        category: Category,
        frequency: Frequency,
        time: TimeOfDay,
        enabled: bool,
    ) -> &ScheduledCleaning {
        let schedule = ScheduledCleaning {
            id: utils::generate_id(),
            category,
            frequency,
            time,
            enabled,
            last_run: None,
            next_run: self.next_run(frequency, time),
        };
        info!(
            "scheduled {} cleaning of {category} at {time}, next run {}",
            frequency.label().to_lowercase(),
            schedule.next_run
        );
        self.schedules.push(schedule);
        self.persist();
        &self.schedules[self.schedules.len() - 1]
    }

    /// Merge `update` into the schedule `id`. When frequency or time is part
    /// of the update, `next_run` is recomputed from the merged values.
    pub fn update_schedule(&mut self, id: &str, update: ScheduleUpdate) -> Result<&ScheduledCleaning> {
        let idx = self.schedule_index(id)?;
        let recompute = update.touches_timing();

        let schedule = &mut self.schedules[idx];
        if let Some(category) = update.category {
            schedule.category = category;
        }
        if let Some(frequency) = update.frequency {
            schedule.frequency = frequency;
        }
        if let Some(time) = update.time {
            schedule.time = time;
        }
        if let Some(enabled) = update.enabled {
            schedule.enabled = enabled;
        }
        if let Some(last_run) = update.last_run {
            schedule.last_run = Some(last_run);
        }

        if recompute {
            let (frequency, time) = (schedule.frequency, schedule.time);
            let next_run = self.next_run(frequency, time);
            self.schedules[idx].next_run = next_run;
        }

        debug!("updated schedule {id}");
        self.persist();
        Ok(&self.schedules[idx])
    }

    pub fn remove_schedule(&mut self, id: &str) -> Result<ScheduledCleaning> {
        let idx = self.schedule_index(id)?;
        let removed = self.schedules.remove(idx);
        info!("removed {} schedule {id}", removed.category);
        self.persist();
        Ok(removed)
    }

    /// Flip `enabled`. `next_run` is left as is.
    pub fn toggle_schedule(&mut self, id: &str) -> Result<bool> {
        let idx = self.schedule_index(id)?;
        let schedule = &mut self.schedules[idx];
        schedule.enabled = !schedule.enabled;
        let enabled = schedule.enabled;
        self.persist();
        Ok(enabled)
    }

    // -- notifications ------------------------------------------------------

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> String {
        let id = utils::generate_id();
        self.notifications.push(Notification {
            id: id.clone(),
            kind,
            title: title.into(),
            message: message.into(),
            created_at: self.now(),
        });
        id
    }

    /// Returns whether a notification was removed.
    pub fn remove_notification(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        before != self.notifications.len()
    }

    /// Drop toasts older than [`TOAST_DURATION_MS`].
    pub fn expire_notifications(&mut self) -> usize {
        let now = self.now();
        let before = self.notifications.len();
        self.notifications
            .retain(|n| (now - n.created_at).num_milliseconds() < TOAST_DURATION_MS);
        before - self.notifications.len()
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::model::ItemKind;
    use crate::schedule::FixedClock;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn store_at(now: DateTime<Utc>) -> Store<FixedClock> {
        Store::new(FixedClock::new(now))
    }

    fn item(id: &str, category: Category, size: u64) -> CleaningItem {
        CleaningItem {
            id: id.to_string(),
            name: id.to_string(),
            path: format!("~/{id}"),
            size,
            kind: ItemKind::File,
            category,
            last_modified: utc(2025, 1, 1, 0, 0),
            selected: false,
        }
    }

    fn store_with_items() -> Store<FixedClock> {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.set_items(vec![
            item("t1", Category::Trash, 100),
            item("t2", Category::Trash, 200),
            item("c1", Category::Cache, 1_000),
            item("l1", Category::LargeFiles, 50_000),
        ]);
        store
    }

    #[test]
    fn defaults() {
        let store = store_at(utc(2025, 1, 1, 0, 0));
        assert_eq!(store.theme(), Theme::System);
        assert_eq!(store.language(), "es");
        assert_eq!(store.current_view(), View::Dashboard);
        assert_eq!(store.active_modal(), Some(Modal::Welcome));
        assert_eq!(store.stats(), Stats::default());
        assert!(store.schedules().is_empty());
        assert_eq!(*store.storage(), StorageBreakdown::simulated());
    }

    #[test]
    fn add_schedule_computes_next_run() {
        let mut store = store_at(utc(2025, 3, 10, 8, 0));
        let s = store
            .add_schedule(Category::Cache, Frequency::Daily, at(9, 0), true)
            .clone();
        assert_eq!(s.next_run, utc(2025, 3, 10, 9, 0));
        assert!(s.enabled);
        assert!(s.last_run.is_none());

        store.clock().set(utc(2025, 3, 10, 10, 0));
        let later = store.add_schedule(Category::Cache, Frequency::Daily, at(9, 0), false);
        assert_eq!(later.next_run, utc(2025, 3, 11, 9, 0));
        assert_ne!(later.id, s.id);
        assert_eq!(store.schedules().len(), 2);
    }

    #[test]
    fn update_recomputes_from_merged_values() {
        let mut store = store_at(utc(2025, 3, 10, 10, 0));
        let id = store
            .add_schedule(Category::Trash, Frequency::Weekly, at(9, 0), true)
            .id
            .clone();
        assert_eq!(store.schedule(&id).unwrap().next_run, utc(2025, 3, 17, 9, 0));

        // only time changes: weekly is kept from the stored record
        let s = store
            .update_schedule(&id, ScheduleUpdate { time: Some(at(11, 0)), ..Default::default() })
            .unwrap();
        assert_eq!(s.frequency, Frequency::Weekly);
        assert_eq!(s.next_run, utc(2025, 3, 10, 11, 0));

        // only frequency changes: the 11:00 time is kept
        store.clock().set(utc(2025, 3, 10, 12, 0));
        let s = store
            .update_schedule(
                &id,
                ScheduleUpdate { frequency: Some(Frequency::Daily), ..Default::default() },
            )
            .unwrap();
        assert_eq!(s.time, at(11, 0));
        assert_eq!(s.next_run, utc(2025, 3, 11, 11, 0));
    }

    #[test]
    fn update_without_timing_keeps_next_run() {
        let mut store = store_at(utc(2025, 3, 10, 10, 0));
        let id = store
            .add_schedule(Category::Trash, Frequency::Daily, at(9, 0), true)
            .id
            .clone();
        let before = store.schedule(&id).unwrap().next_run;

        store.clock().set(utc(2025, 6, 1, 0, 0));
        let s = store
            .update_schedule(
                &id,
                ScheduleUpdate {
                    category: Some(Category::Logs),
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(s.category, Category::Logs);
        assert!(!s.enabled);
        assert_eq!(s.next_run, before);
    }

    #[test]
    fn missing_schedule_is_reported_and_nothing_changes() {
        let mut store = store_at(utc(2025, 3, 10, 10, 0));
        store.add_schedule(Category::Trash, Frequency::Daily, at(9, 0), true);
        let snapshot = store.schedules().to_vec();

        let update = ScheduleUpdate { enabled: Some(false), ..Default::default() };
        assert!(matches!(
            store.update_schedule("nope", update),
            Err(Error::ScheduleNotFound(id)) if id == "nope"
        ));
        assert!(store.remove_schedule("nope").is_err());
        assert!(store.toggle_schedule("nope").is_err());
        assert_eq!(store.schedules(), snapshot.as_slice());
    }

    #[test]
    fn toggle_flips_enabled_only() {
        let mut store = store_at(utc(2025, 3, 10, 10, 0));
        let id = store
            .add_schedule(Category::Apps, Frequency::Monthly, at(9, 0), true)
            .id
            .clone();
        let next_run = store.schedule(&id).unwrap().next_run;

        store.clock().set(utc(2025, 8, 1, 0, 0));
        assert!(!store.toggle_schedule(&id).unwrap());
        assert!(store.toggle_schedule(&id).unwrap());
        assert_eq!(store.schedule(&id).unwrap().next_run, next_run);
    }

    #[test]
    fn remove_schedule_deletes_only_the_target() {
        let mut store = store_at(utc(2025, 3, 10, 10, 0));
        let a = store
            .add_schedule(Category::Cache, Frequency::Daily, at(9, 0), true)
            .id
            .clone();
        let b = store
            .add_schedule(Category::Cache, Frequency::Daily, at(9, 0), true)
            .id
            .clone();
        assert_eq!(store.remove_schedule(&a).unwrap().id, a);
        assert!(store.schedule(&a).is_none());
        assert!(store.schedule(&b).is_some());
    }

    #[test]
    fn select_and_deselect_are_scoped_to_a_category() {
        let mut store = store_with_items();
        store.toggle_item_selection("c1").unwrap();

        store.select_all(Category::Trash);
        assert!(store.all_selected(Category::Trash));
        store.select_all(Category::Trash);
        assert_eq!(store.selected_count(Category::Trash), 2);

        store.deselect_all(Category::Trash);
        assert!(store.items_in(Category::Trash).all(|i| !i.selected));
        assert!(store.items_in(Category::Cache).all(|i| i.selected));
        assert!(!store.items_in(Category::LargeFiles).any(|i| i.selected));
    }

    #[test]
    fn all_selected_is_false_for_empty_category() {
        let store = store_with_items();
        assert!(!store.all_selected(Category::Downloads));
    }

    #[test]
    fn toggle_unknown_item_is_an_error() {
        let mut store = store_with_items();
        assert!(matches!(
            store.toggle_item_selection("ghost"),
            Err(Error::ItemNotFound(_))
        ));
    }

    #[test]
    fn remove_items_ignores_unknown_ids() {
        let mut store = store_with_items();
        assert_eq!(store.remove_items(&["t1", "ghost"]), 1);
        assert!(store.items().iter().all(|i| i.id != "t1"));
        assert_eq!(store.items().len(), 3);
        assert_eq!(store.remove_items(&["ghost"]), 0);
        assert_eq!(store.items().len(), 3);
    }

    #[test]
    fn aggregates_are_derived_from_items() {
        let mut store = store_with_items();
        assert_eq!(store.category_count(Category::Trash), 2);
        assert_eq!(store.category_size(Category::Trash), 300);
        assert_eq!(store.total_cleanable_size(), 1_300);

        store.toggle_item_selection("t2").unwrap();
        assert_eq!(store.selected_count(Category::Trash), 1);
        assert_eq!(store.selected_size(Category::Trash), 200);
    }

    #[test]
    fn clean_with_empty_selection_only_warns() {
        let mut store = store_with_items();
        assert_eq!(store.clean_selected(Category::Trash), None);
        assert_eq!(store.items().len(), 4);
        assert!(store.history().is_empty());
        assert_eq!(store.stats(), Stats::default());
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn clean_removes_selection_and_records_it() {
        let mut store = store_with_items();
        store.select_all(Category::Trash);

        let report = store.clean_selected(Category::Trash).unwrap();
        assert_eq!(report, CleanReport { items_cleaned: 2, space_saved: 300 });
        assert_eq!(store.category_count(Category::Trash), 0);
        assert_eq!(store.items().len(), 2);
        assert_eq!(
            store.stats(),
            Stats { total_space_saved: 300, total_items_cleaned: 2 }
        );

        let entry = &store.history()[0];
        assert_eq!(entry.category, "Trash");
        assert_eq!(entry.items_cleaned, 2);
        assert_eq!(entry.space_saved, 300);
        assert_eq!(entry.date, utc(2025, 3, 10, 12, 0));
        assert_eq!(store.notifications().last().unwrap().kind, NotificationKind::Success);
    }

    #[test]
    fn history_keeps_the_fifty_most_recent() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        for n in 0..75u64 {
            store.add_history("Cache", n, n * 10);
            assert!(store.history().len() <= HISTORY_LIMIT);
        }
        let history = store.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].items_cleaned, 74);
        assert_eq!(history[HISTORY_LIMIT - 1].items_cleaned, 25);
    }

    #[test]
    fn history_eviction_ignores_timestamps() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.add_history("first", 1, 1);
        // clock moves backwards; insertion order still wins
        store.clock().set(utc(2020, 1, 1, 0, 0));
        store.add_history("second", 2, 2);
        assert_eq!(store.history()[0].category, "second");
    }

    #[test]
    fn stats_accumulate_exactly() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.update_stats(1_000, 3);
        store.update_stats(24, 4);
        assert_eq!(
            store.stats(),
            Stats { total_space_saved: 1_024, total_items_cleaned: 7 }
        );
    }

    #[test]
    fn notifications_expire_after_toast_duration() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        let first = store.add_notification(NotificationKind::Info, "a", "");
        store.clock().advance(Duration::seconds(3));
        store.add_notification(NotificationKind::Info, "b", "");
        store.clock().advance(Duration::seconds(2));

        assert_eq!(store.expire_notifications(), 1);
        assert!(store.notifications().iter().all(|n| n.id != first));
        assert!(!store.remove_notification(&first));
        let second = store.notifications()[0].id.clone();
        assert!(store.remove_notification(&second));
    }

    #[test]
    fn shell_events_navigate_and_resolve_system_theme() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.apply_shell_event(ShellEvent::Navigate(View::Settings));
        assert_eq!(store.current_view(), View::Settings);

        assert!(!store.is_dark());
        store.apply_shell_event(ShellEvent::ThemeChanged { dark: true });
        assert!(store.is_dark());
        assert_eq!(store.theme(), Theme::System);

        store.set_theme(Theme::Light);
        assert!(!store.is_dark());
    }

    #[test]
    fn language_is_normalized() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.set_language("en-GB");
        assert_eq!(store.language(), "en");
        store.set_language("de");
        assert_eq!(store.language(), "es");
    }

    #[test]
    fn scan_progress_is_clamped() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        store.set_scan_progress(250);
        assert_eq!(store.scan_progress(), 100);
        store.set_scanning(true);
        assert_eq!(store.scan_progress(), 0);
    }

    #[test]
    fn refresh_messages_drive_scan_state() {
        let mut store = store_with_items();
        store.apply_refresh(Category::Trash, RefreshMessage::Progress(40));
        assert!(store.is_scanning());
        assert_eq!(store.scan_progress(), 40);

        store.apply_refresh(Category::Trash, RefreshMessage::Finished);
        assert!(!store.is_scanning());
        assert_eq!(store.notifications()[0].message, "Found 2 items");
    }

    #[test]
    fn items_are_restocked_once_everything_is_cleaned() {
        let mut store = store_with_items();
        let mut rng = StdRng::seed_from_u64(11);
        assert!(!store.restock_items(&mut rng));
        assert_eq!(store.items().len(), 4);

        for category in Category::ALL {
            store.select_all(category);
            store.clean_selected(category);
        }
        assert!(store.items().is_empty());

        assert!(store.restock_items(&mut rng));
        assert_eq!(store.items().len(), 28);
        assert_eq!(store.category_count(Category::Trash), 5);
        // history and stats are untouched by a restock
        assert_eq!(store.stats().total_items_cleaned, 4);
    }

    #[test]
    fn generated_items_can_be_cleaned() {
        let mut store = store_at(utc(2025, 3, 10, 12, 0));
        let now = store.now();
        store.set_items(categories::generate_all(&mut StdRng::seed_from_u64(3), now));
        store.select_all(Category::Cache);
        let expected = store.category_size(Category::Cache);

        let report = store.clean_selected(Category::Cache).unwrap();
        assert_eq!(report.items_cleaned, 7);
        assert_eq!(report.space_saved, expected);
        assert_eq!(store.history()[0].category, "User Cache");
    }
}
