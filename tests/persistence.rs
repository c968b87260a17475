use chrono::{DateTime, Duration, TimeZone, Utc};
use tidyclean::model::{
    Category, CleaningHistory, CleaningItem, Frequency, ItemKind, Modal, ScheduleUpdate, Theme,
    TimeOfDay, View,
};
use tidyclean::persist::{PersistedState, Persistence};
use tidyclean::schedule::FixedClock;
use tidyclean::store::HISTORY_LIMIT;
use tidyclean::Store;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

fn item(id: &str, category: Category, size: u64) -> CleaningItem {
    CleaningItem {
        id: id.to_string(),
        name: id.to_string(),
        path: format!("~/{id}"),
        size,
        kind: ItemKind::Folder,
        category,
        last_modified: noon() - Duration::days(3),
        selected: false,
    }
}

#[test]
fn persisted_subset_round_trips_and_the_rest_resets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut store = Store::open(FixedClock::new(noon()), Persistence::new(&path));
    store.set_theme(Theme::Dark);
    store.set_language("en");
    let daily = store
        .add_schedule(Category::Cache, Frequency::Daily, TimeOfDay::new(9, 0).unwrap(), true)
        .id
        .clone();
    store.add_schedule(Category::Trash, Frequency::Monthly, TimeOfDay::new(18, 30).unwrap(), false);
    store
        .update_schedule(&daily, ScheduleUpdate { last_run: Some(noon()), ..Default::default() })
        .unwrap();

    store.set_items(vec![
        item("a", Category::Cache, 4096),
        item("b", Category::Cache, 1024),
        item("c", Category::Logs, 10),
    ]);
    store.select_all(Category::Cache);
    store.clean_selected(Category::Cache).unwrap();
    store.set_current_view(View::Settings);
    store.set_active_modal(None);
    store.set_scanning(true);

    let before = store.persisted();
    drop(store);

    let restored = Store::open(FixedClock::new(noon()), Persistence::new(&path));
    assert_eq!(restored.persisted(), before);
    assert_eq!(restored.theme(), Theme::Dark);
    assert_eq!(restored.language(), "en");
    assert_eq!(restored.stats().total_space_saved, 5120);
    assert_eq!(restored.stats().total_items_cleaned, 2);
    assert_eq!(restored.history().len(), 1);
    assert_eq!(restored.schedules().len(), 2);
    assert_eq!(restored.schedule(&daily).unwrap().last_run, Some(noon()));

    assert_eq!(restored.current_view(), View::Dashboard);
    assert_eq!(restored.active_modal(), Some(Modal::Welcome));
    assert!(restored.items().is_empty());
    assert!(restored.notifications().is_empty());
    assert!(!restored.is_scanning());
}

#[test]
fn restored_next_run_is_not_recomputed_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut store = Store::open(FixedClock::new(noon()), Persistence::new(&path));
    let id = store
        .add_schedule(Category::Logs, Frequency::Weekly, TimeOfDay::new(8, 0).unwrap(), true)
        .id
        .clone();
    let next_run = store.schedule(&id).unwrap().next_run;
    drop(store);

    let later = noon() + Duration::days(30);
    let restored = Store::open(FixedClock::new(later), Persistence::new(&path));
    assert_eq!(restored.schedule(&id).unwrap().next_run, next_run);
}

#[test]
fn oversized_history_is_capped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let history = (0..60u64)
        .map(|n| CleaningHistory {
            id: format!("h{n}"),
            date: noon() - Duration::hours(n as i64),
            category: "Trash".to_string(),
            items_cleaned: n,
            space_saved: n * 100,
        })
        .collect();
    let state = PersistedState {
        history,
        ..Default::default()
    };
    Persistence::new(&path).save(&state).unwrap();

    let store = Store::open(FixedClock::new(noon()), Persistence::new(&path));
    assert_eq!(store.history().len(), HISTORY_LIMIT);
    assert_eq!(store.history()[0].id, "h0");
    assert_eq!(store.history()[HISTORY_LIMIT - 1].id, "h49");
}

#[test]
fn unreadable_state_falls_back_to_defaults_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let mut store = Store::open(FixedClock::new(noon()), Persistence::new(&path));
    assert_eq!(store.persisted(), PersistedState::default());

    store.update_stats(10, 1);
    let reloaded = Persistence::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.total_space_saved, 10);
    assert_eq!(reloaded.total_items_cleaned, 1);
}

#[test]
fn every_mutation_of_the_subset_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let persistence = Persistence::new(&path);
    let mut store = Store::open(FixedClock::new(noon()), persistence.clone());

    let id = store
        .add_schedule(Category::Apps, Frequency::Daily, TimeOfDay::new(7, 15).unwrap(), true)
        .id
        .clone();
    assert_eq!(persistence.load().unwrap().unwrap().scheduled_cleanings.len(), 1);

    store.toggle_schedule(&id).unwrap();
    assert!(!persistence.load().unwrap().unwrap().scheduled_cleanings[0].enabled);

    store.remove_schedule(&id).unwrap();
    assert!(persistence.load().unwrap().unwrap().scheduled_cleanings.is_empty());

    store.set_language("es-ES");
    store.set_language("en");
    assert_eq!(persistence.load().unwrap().unwrap().language, "en");
}
