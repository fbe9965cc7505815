//! Dialog state machine
//!
//! Transient UI state for the confirm (pause/stop) and value-edit
//! (bed/nozzle/speed) dialogs. One dialog at most is open per card;
//! opening another replaces it. Every transition is synchronous with the
//! UI event that triggered it, and confirm/cancel/close always land back
//! in [`DialogState::Closed`].

use printwatch_core::{press_button, CommandSink, EntityId, Localizer};
use printwatch_config::CardConfig;
use serde::Serialize;

use crate::view_model::PrintViewModel;

/// Which destructive action a confirm dialog gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmKind {
    /// Pause/resume toggle.
    Pause,
    /// Stop the print.
    Stop,
}

impl ConfirmKind {
    fn key(self) -> &'static str {
        match self {
            ConfirmKind::Pause => "pause",
            ConfirmKind::Stop => "stop",
        }
    }
}

/// Which readout a value-edit dialog targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Bed target temperature.
    Bed,
    /// Nozzle target temperature.
    Nozzle,
    /// Speed profile.
    Speed,
}

impl EditKind {
    /// Valid target range, when the value is bounded. Speed profiles
    /// are enumerated by the host and carry no numeric bounds.
    pub fn bounds(self) -> Option<(f64, f64)> {
        match self {
            EditKind::Bed => Some((0.0, 120.0)),
            EditKind::Nozzle => Some((0.0, 320.0)),
            EditKind::Speed => None,
        }
    }

    fn title_key(self) -> &'static str {
        match self {
            EditKind::Bed => "temperatures.bed_target",
            EditKind::Nozzle => "temperatures.nozzle_target",
            EditKind::Speed => "temperatures.speed_profile",
        }
    }
}

/// An open two-outcome confirmation prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmDialog {
    /// Gated action.
    pub kind: ConfirmKind,
    /// Localized dialog title.
    pub title: String,
    /// Localized dialog message.
    pub message: String,
}

/// An open value-edit prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEditDialog {
    /// Targeted readout.
    pub kind: EditKind,
    /// Localized dialog title.
    pub title: String,
    /// Current value shown in the editor.
    pub current_value: String,
    /// Entity the host edits when the user commits a new value.
    pub entity: Option<EntityId>,
    /// Lower bound, when the value is bounded.
    pub min: Option<f64>,
    /// Upper bound, when the value is bounded.
    pub max: Option<f64>,
}

/// Transient dialog state of one card instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum DialogState {
    /// No dialog showing. Initial and terminal state.
    #[default]
    Closed,
    /// A confirmation prompt is showing.
    Confirm(ConfirmDialog),
    /// A value editor is showing.
    ValueEdit(ValueEditDialog),
}

impl DialogState {
    /// Whether any dialog is showing.
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    /// Open a confirmation prompt, replacing any open dialog.
    pub fn open_confirm(&mut self, kind: ConfirmKind, localizer: &dyn Localizer) {
        let key = kind.key();
        tracing::debug!(dialog = key, "Opening confirm dialog");
        *self = DialogState::Confirm(ConfirmDialog {
            kind,
            title: localizer.translate(&format!("dialogs.{key}.title")),
            message: localizer.translate(&format!("dialogs.{key}.message")),
        });
    }

    /// Open a value editor, replacing any open dialog.
    pub fn open_value_edit(
        &mut self,
        kind: EditKind,
        current_value: String,
        entity: Option<EntityId>,
        localizer: &dyn Localizer,
    ) {
        let (min, max) = match kind.bounds() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        tracing::debug!(dialog = ?kind, "Opening value-edit dialog");
        *self = DialogState::ValueEdit(ValueEditDialog {
            kind,
            title: localizer.translate(kind.title_key()),
            current_value,
            entity,
            min,
            max,
        });
    }

    /// Resolve the open dialog affirmatively.
    ///
    /// For a confirm dialog, issues the single gated command: pause
    /// presses the resume button when the print is currently paused,
    /// else the pause button; stop presses the stop button. Value-edit
    /// dialogs commit through the host editor, so confirming merely
    /// closes them. Always lands in `Closed`.
    pub fn confirm(&mut self, sink: &dyn CommandSink, view: &PrintViewModel, config: &CardConfig) {
        if let DialogState::Confirm(dialog) = self {
            let target = match dialog.kind {
                ConfirmKind::Pause if view.is_paused => config.control.resume_button.as_ref(),
                ConfirmKind::Pause => config.control.pause_button.as_ref(),
                ConfirmKind::Stop => config.control.stop_button.as_ref(),
            };
            match target {
                Some(entity) => press_button(sink, entity),
                None => {
                    tracing::warn!(dialog = dialog.kind.key(), "No button entity configured")
                }
            }
        }
        *self = DialogState::Closed;
    }

    /// Dismiss the open dialog without issuing any command.
    pub fn cancel(&mut self) {
        *self = DialogState::Closed;
    }

    /// Close the open dialog (same as cancel; kept distinct for the
    /// presentation layer's close-button wiring).
    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }
}
