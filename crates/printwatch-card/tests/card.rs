use printwatch_card::{CardError, Clock, PrintWatchCard};
use printwatch_config::ConfigError;
use printwatch_core::{EntityId, EntitySnapshot, EntityState, KeyLocalizer};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct FakeClock {
    now: Cell<i64>,
}

impl FakeClock {
    fn at(now: i64) -> Rc<Self> {
        Rc::new(Self { now: Cell::new(now) })
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

#[test]
fn test_construction_requires_title() {
    let err = PrintWatchCard::from_value(json!({ "status": "sensor.status" })).unwrap_err();
    assert!(matches!(err, CardError::Config(ConfigError::MissingTitle)));
}

#[test]
fn test_title_only_card_yields_default_view() {
    let card = PrintWatchCard::from_value(json!({ "title": "Printer" })).unwrap();
    let view = card.view();
    assert_eq!(view.name, "Printer");
    assert_eq!(view.status, "idle");
    assert!(!view.is_printing);
    assert!(view.slots.is_empty());
    assert!(card.visibility().camera);
}

#[test]
fn test_store_update_notifies_view_listeners() {
    let mut card = PrintWatchCard::from_value(json!({
        "title": "Printer",
        "status": "sensor.status"
    }))
    .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handle = card.on_view_changed(move |view, _| {
        sink.borrow_mut().push(view.status.clone());
    });

    let mut store = EntitySnapshot::new();
    store.insert(id("sensor.status"), EntityState::new("printing"));
    card.on_store_update(&store);

    store.insert(id("sensor.status"), EntityState::new("pause"));
    card.on_store_update(&store);

    assert_eq!(*seen.borrow(), vec!["printing", "pause"]);

    // After removal the listener no longer fires.
    assert!(card.remove_listener(handle));
    card.on_store_update(&store);
    assert_eq!(seen.borrow().len(), 2);
    assert!(!card.remove_listener(handle));
}

#[test]
fn test_set_config_fires_config_listeners() {
    let mut card = PrintWatchCard::from_value(json!({ "title": "Old name" })).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    card.on_config_changed(move |config| {
        sink.borrow_mut().push(config.title.clone());
    });

    card.set_config(json!({ "title": "New name", "show": { "camera": false } }))
        .unwrap();

    assert_eq!(*seen.borrow(), vec!["New name"]);
    assert_eq!(card.config().title, "New name");
    assert!(!card.visibility().camera);

    // An invalid replacement keeps the previous configuration.
    let err = card.set_config(json!({ "title": "" })).unwrap_err();
    assert!(matches!(err, CardError::Config(ConfigError::MissingTitle)));
    assert_eq!(card.config().title, "New name");
}

#[test]
fn test_store_update_drives_camera_refresh() {
    let clock = FakeClock::at(0);
    let mut card = PrintWatchCard::new(
        json!({
            "title": "Printer",
            "online": "binary_sensor.online",
            "camera": { "entity": "camera.chamber", "refresh_rate": 1000 },
        }),
        clock.clone(),
        Rc::new(KeyLocalizer),
    )
    .unwrap();

    let mut store = EntitySnapshot::new();
    store.insert(id("binary_sensor.online"), EntityState::new("on"));
    store.insert(
        id("camera.chamber"),
        EntityState::new("recording").with_attr("entity_picture", "/api/cam?token=x"),
    );

    clock.now.set(2000);
    let urls = card.on_store_update(&store).unwrap();
    assert_eq!(urls.camera.as_deref(), Some("/api/cam?token=x&t=2000"));

    // Within the throttle window nothing refreshes.
    clock.now.set(2900);
    assert!(card.on_store_update(&store).is_none());

    // Past the window the next store notification refreshes again.
    clock.now.set(3011);
    assert!(card.on_store_update(&store).is_some());

    // Offline: never, regardless of elapsed time.
    store.insert(id("binary_sensor.online"), EntityState::new("off"));
    clock.now.set(1_000_000);
    assert!(card.on_store_update(&store).is_none());
}

#[test]
fn test_image_error_latch_roundtrip() {
    let mut card = PrintWatchCard::from_value(json!({ "title": "Printer" })).unwrap();
    assert!(!card.camera().has_error());
    card.note_image_error();
    assert!(card.camera().has_error());
    card.note_image_loaded();
    assert!(!card.camera().has_error());
}
