use printwatch_card::{DialogState, EditKind, PrintWatchCard};
use printwatch_core::{CommandSink, EntityId, EntitySnapshot, EntityState};
use serde_json::json;
use std::cell::RefCell;

#[derive(Default)]
struct RecordingSink {
    calls: RefCell<Vec<(String, String, String)>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.borrow().clone()
    }
}

impl CommandSink for RecordingSink {
    fn invoke(&self, domain: &str, action: &str, entity: &EntityId) {
        self.calls.borrow_mut().push((
            domain.to_string(),
            action.to_string(),
            entity.as_str().to_string(),
        ));
    }
}

fn card() -> PrintWatchCard {
    PrintWatchCard::from_value(json!({
        "title": "Printer",
        "status": "sensor.status",
        "speed_profile": "select.speed",
        "control": {
            "pause_button": "button.pause",
            "resume_button": "button.resume",
            "stop_button": "button.stop",
            "chamber_light": "light.chamber",
            "fan": "fan.aux"
        },
        "temperature": {
            "bed": "sensor.bed",
            "bed_number": "number.bed_target"
        }
    }))
    .unwrap()
}

fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

#[test]
fn test_confirm_pause_while_printing_presses_pause() {
    let mut card = card();
    let mut store = EntitySnapshot::new();
    store.insert(id("sensor.status"), EntityState::new("printing"));
    card.on_store_update(&store);

    let sink = RecordingSink::default();
    card.open_pause_dialog();
    card.confirm_dialog(&sink);

    assert_eq!(
        sink.calls(),
        vec![(
            "button".to_string(),
            "press".to_string(),
            "button.pause".to_string()
        )]
    );
    assert_eq!(*card.dialog(), DialogState::Closed);
}

#[test]
fn test_confirm_pause_while_paused_presses_resume() {
    let mut card = card();
    let mut store = EntitySnapshot::new();
    store.insert(id("sensor.status"), EntityState::new("pause"));
    card.on_store_update(&store);

    let sink = RecordingSink::default();
    card.open_pause_dialog();
    card.confirm_dialog(&sink);

    assert_eq!(sink.calls()[0].2, "button.resume");
}

#[test]
fn test_confirm_stop_presses_stop() {
    let mut card = card();
    let sink = RecordingSink::default();
    card.open_stop_dialog();
    card.confirm_dialog(&sink);

    assert_eq!(sink.calls()[0].2, "button.stop");
    assert_eq!(*card.dialog(), DialogState::Closed);
}

#[test]
fn test_cancel_issues_no_command() {
    let mut card = card();
    let sink = RecordingSink::default();
    card.open_stop_dialog();
    card.cancel_dialog();

    assert!(sink.calls().is_empty());
    assert_eq!(*card.dialog(), DialogState::Closed);
}

#[test]
fn test_confirm_replaces_value_edit_dialog() {
    let mut card = card();
    card.open_edit_dialog(EditKind::Bed);
    assert!(matches!(card.dialog(), DialogState::ValueEdit(_)));

    // Only one dialog at a time; opening a confirm replaces the editor.
    card.open_pause_dialog();
    assert!(matches!(card.dialog(), DialogState::Confirm(_)));
}

#[test]
fn test_bed_edit_dialog_seeded_from_view() {
    let mut card = card();
    let mut store = EntitySnapshot::new();
    store.insert(id("sensor.bed"), EntityState::new("60.5"));
    card.on_store_update(&store);

    card.open_edit_dialog(EditKind::Bed);
    match card.dialog() {
        DialogState::ValueEdit(dialog) => {
            assert_eq!(dialog.current_value, "60.5");
            assert_eq!(dialog.entity.as_ref().unwrap().as_str(), "number.bed_target");
            assert_eq!(dialog.min, Some(0.0));
            assert_eq!(dialog.max, Some(120.0));
            assert_eq!(dialog.title, "temperatures.bed_target");
        }
        other => panic!("expected value-edit dialog, got {other:?}"),
    }
}

#[test]
fn test_speed_edit_dialog_defaults_to_standard() {
    let mut card = card();
    card.open_edit_dialog(EditKind::Speed);
    match card.dialog() {
        DialogState::ValueEdit(dialog) => {
            assert_eq!(dialog.current_value, "standard");
            assert_eq!(dialog.entity.as_ref().unwrap().as_str(), "select.speed");
            assert_eq!(dialog.min, None);
            assert_eq!(dialog.max, None);
        }
        other => panic!("expected value-edit dialog, got {other:?}"),
    }
}

#[test]
fn test_toggle_light_infers_domain_and_direction() {
    let card = card();
    let sink = RecordingSink::default();

    let mut store = EntitySnapshot::new();
    store.insert(id("light.chamber"), EntityState::new("on"));
    card.toggle_light(&store, &sink);

    store.insert(id("light.chamber"), EntityState::new("off"));
    card.toggle_light(&store, &sink);

    assert_eq!(
        sink.calls(),
        vec![
            (
                "light".to_string(),
                "turn_off".to_string(),
                "light.chamber".to_string()
            ),
            (
                "light".to_string(),
                "turn_on".to_string(),
                "light.chamber".to_string()
            ),
        ]
    );
}

#[test]
fn test_toggle_fan_skips_absent_entity() {
    let card = card();
    let sink = RecordingSink::default();

    let store = EntitySnapshot::new();
    card.toggle_fan(&store, &sink);
    assert!(sink.calls().is_empty());

    let mut store = EntitySnapshot::new();
    store.insert(id("fan.aux"), EntityState::new("off"));
    card.toggle_fan(&store, &sink);
    assert_eq!(
        sink.calls(),
        vec![(
            "fan".to_string(),
            "turn_on".to_string(),
            "fan.aux".to_string()
        )]
    );
}
