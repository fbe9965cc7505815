//! Card controller
//!
//! One `PrintWatchCard` per rendered card instance. Owns the validated
//! configuration, the last computed view model, the dialog state, and
//! the camera throttle. Everything is single-threaded and event-driven:
//! the host calls [`PrintWatchCard::on_store_update`] on every relevant
//! store mutation and forwards raw UI events into the handler methods.
//!
//! Handlers take the current store and command sink as parameters
//! instead of capturing them, so no mutable widget state hides inside
//! closures.

use printwatch_config::{CardConfig, VisibilityFlags};
use printwatch_core::{CommandSink, EntitySnapshot, KeyLocalizer, Localizer, StateStore};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

use crate::camera::{CameraController, CameraUrls, Clock, SystemClock};
use crate::dialog::{ConfirmKind, DialogState, EditKind};
use crate::error::CardResult;
use crate::view_model::PrintViewModel;

/// Handle for a registered listener.
///
/// Uniquely identifies a subscription; pass it back to
/// [`PrintWatchCard::remove_listener`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(Uuid);

impl ListenerHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", &self.0.to_string()[..8])
    }
}

type ViewListener = Box<dyn Fn(&PrintViewModel, &VisibilityFlags)>;
type ConfigListener = Box<dyn Fn(&CardConfig)>;

/// Per-instance card controller.
pub struct PrintWatchCard {
    config: CardConfig,
    localizer: Rc<dyn Localizer>,
    camera: CameraController,
    dialog: DialogState,
    view: PrintViewModel,
    visibility: VisibilityFlags,
    view_listeners: Vec<(ListenerHandle, ViewListener)>,
    config_listeners: Vec<(ListenerHandle, ConfigListener)>,
}

impl fmt::Debug for PrintWatchCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintWatchCard")
            .field("config", &self.config)
            .field("dialog", &self.dialog)
            .field("view", &self.view)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl PrintWatchCard {
    /// Construct a card from a raw configuration value.
    ///
    /// Fails when the configuration is invalid (missing `title`); a
    /// card must not render partially. The initial view model is built
    /// against an empty snapshot, i.e. entirely from defaults.
    pub fn new(
        value: serde_json::Value,
        clock: Rc<dyn Clock>,
        localizer: Rc<dyn Localizer>,
    ) -> CardResult<Self> {
        let config = CardConfig::from_value(value)?;
        let camera = CameraController::new(clock, config.camera_refresh_ms());
        let empty = EntitySnapshot::new();
        let view = PrintViewModel::build(&empty, &config);
        let visibility = VisibilityFlags::from_config(&config);
        tracing::debug!(title = %config.title, "Card constructed");

        Ok(Self {
            config,
            localizer,
            camera,
            dialog: DialogState::default(),
            view,
            visibility,
            view_listeners: Vec::new(),
            config_listeners: Vec::new(),
        })
    }

    /// Construct a card with the wall clock and key-echo localization.
    pub fn from_value(value: serde_json::Value) -> CardResult<Self> {
        Self::new(value, Rc::new(SystemClock), Rc::new(KeyLocalizer))
    }

    /// The validated configuration.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// The last computed view model.
    pub fn view(&self) -> &PrintViewModel {
        &self.view
    }

    /// The current section visibility.
    pub fn visibility(&self) -> &VisibilityFlags {
        &self.visibility
    }

    /// The current dialog state.
    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// The camera controller (refresh throttle and error latch).
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Replace the configuration wholesale (editor change).
    ///
    /// Re-derives the camera interval and visibility flags, then fires
    /// config-changed listeners with the new configuration.
    pub fn set_config(&mut self, value: serde_json::Value) -> CardResult<()> {
        let config = CardConfig::from_value(value)?;
        self.camera.set_refresh_interval(config.camera_refresh_ms());
        self.visibility = VisibilityFlags::from_config(&config);
        self.config = config;
        tracing::debug!(title = %self.config.title, "Configuration replaced");

        for (_, listener) in &self.config_listeners {
            listener(&self.config);
        }
        Ok(())
    }

    /// Recompute everything from a fresh store snapshot.
    ///
    /// Replaces the view model wholesale, notifies view listeners, and
    /// evaluates the camera throttle. Returns cache-busted image URLs
    /// when a refresh is due, for the presentation layer to apply.
    pub fn on_store_update(&mut self, store: &dyn StateStore) -> Option<CameraUrls> {
        self.view = PrintViewModel::build(store, &self.config);

        for (_, listener) in &self.view_listeners {
            listener(&self.view, &self.visibility);
        }

        self.camera.refresh(store, &self.config)
    }

    /// Register a view-model listener; fired after every recompute.
    pub fn on_view_changed(
        &mut self,
        listener: impl Fn(&PrintViewModel, &VisibilityFlags) + 'static,
    ) -> ListenerHandle {
        let handle = ListenerHandle::new();
        self.view_listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Register a config-changed listener; fired on every editor
    /// replacement with the full new configuration.
    pub fn on_config_changed(
        &mut self,
        listener: impl Fn(&CardConfig) + 'static,
    ) -> ListenerHandle {
        let handle = ListenerHandle::new();
        self.config_listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Remove a previously registered listener. Returns whether a
    /// listener was removed.
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.view_listeners.len() + self.config_listeners.len();
        self.view_listeners.retain(|(h, _)| *h != handle);
        self.config_listeners.retain(|(h, _)| *h != handle);
        before != self.view_listeners.len() + self.config_listeners.len()
    }

    /// Open the pause/resume confirmation dialog.
    pub fn open_pause_dialog(&mut self) {
        self.dialog
            .open_confirm(ConfirmKind::Pause, self.localizer.as_ref());
    }

    /// Open the stop confirmation dialog.
    pub fn open_stop_dialog(&mut self) {
        self.dialog
            .open_confirm(ConfirmKind::Stop, self.localizer.as_ref());
    }

    /// Open a value-edit dialog seeded from the current view model.
    pub fn open_edit_dialog(&mut self, kind: EditKind) {
        let (current_value, entity) = match kind {
            EditKind::Bed => (
                format_reading(self.view.bed_temp),
                self.view.bed_target_entity.clone(),
            ),
            EditKind::Nozzle => (
                format_reading(self.view.nozzle_temp),
                self.view.nozzle_target_entity.clone(),
            ),
            EditKind::Speed => (
                self.view.speed_profile.clone(),
                self.view.speed_profile_entity.clone(),
            ),
        };
        self.dialog
            .open_value_edit(kind, current_value, entity, self.localizer.as_ref());
    }

    /// Confirm the open dialog, issuing its gated command.
    pub fn confirm_dialog(&mut self, sink: &dyn CommandSink) {
        self.dialog.confirm(sink, &self.view, &self.config);
    }

    /// Cancel the open dialog without issuing any command.
    pub fn cancel_dialog(&mut self) {
        self.dialog.cancel();
    }

    /// Close the open dialog.
    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    /// Toggle the chamber light. The service domain is inferred from
    /// the entity id; a no-op when the entity is unconfigured or absent.
    pub fn toggle_light(&self, store: &dyn StateStore, sink: &dyn CommandSink) {
        let Some(id) = self.config.control.chamber_light.as_ref() else {
            return;
        };
        let Some(entity) = store.entity(id) else {
            tracing::warn!(entity = %id, "Chamber light entity not in store");
            return;
        };
        let action = if entity.state == "on" {
            "turn_off"
        } else {
            "turn_on"
        };
        sink.invoke(id.domain(), action, id);
    }

    /// Toggle the auxiliary fan; a no-op when the entity is
    /// unconfigured or absent.
    pub fn toggle_fan(&self, store: &dyn StateStore, sink: &dyn CommandSink) {
        let Some(id) = self.config.control.fan.as_ref() else {
            return;
        };
        let Some(entity) = store.entity(id) else {
            tracing::warn!(entity = %id, "Fan entity not in store");
            return;
        };
        let action = if entity.state == "on" {
            "turn_off"
        } else {
            "turn_on"
        };
        sink.invoke("fan", action, id);
    }

    /// Record an image load failure (offline placeholder until cleared).
    pub fn note_image_error(&mut self) {
        self.camera.note_image_error();
    }

    /// Record a successful image load.
    pub fn note_image_loaded(&mut self) {
        self.camera.note_image_loaded();
    }
}

/// Format a numeric readout for the value editor; malformed readings
/// display as `0`.
fn format_reading(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        "0".to_string()
    }
}
