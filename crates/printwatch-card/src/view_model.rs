//! View-model construction
//!
//! The single boundary that turns "any referenced entity may be absent,
//! stale, or malformed" into an always-valid flat structure. Building is
//! pure and total: it never errors, never panics, and is cheap enough to
//! run on every store notification. The result is replaced wholesale on
//! each recompute so readers always see a consistent snapshot.

use printwatch_core::{is_paused, is_printing, last_print_name, state_or, EntityId, StateStore};
use printwatch_config::CardConfig;
use serde::Serialize;

use crate::slots::{resolve_slots, SlotDescriptor};

/// Flattened, rendering-ready card state.
#[derive(Debug, Clone, Serialize)]
pub struct PrintViewModel {
    /// Display name of the printer (the configured title).
    pub name: String,
    /// Coarse printer status; `idle` when unavailable.
    pub status: String,
    /// Fine-grained stage; `unknown` when unavailable.
    pub current_stage: String,
    /// Print progress percentage. NaN when the raw value is malformed.
    pub progress: f64,
    /// Remaining print time in seconds. The upstream raw value is
    /// minutes; malformed values degrade to 0.
    pub remaining_secs: i64,
    /// Active speed profile; `standard` when unavailable.
    pub speed_profile: String,
    /// Whether a print is in progress (paused included).
    pub is_printing: bool,
    /// Whether the print is paused.
    pub is_paused: bool,
    /// Current layer number; 0 when unavailable.
    pub current_layer: u32,
    /// Total layer count; 0 when unavailable.
    pub total_layers: u32,
    /// Bed temperature. NaN when the raw value is malformed.
    pub bed_temp: f64,
    /// Nozzle temperature. NaN when the raw value is malformed.
    pub nozzle_temp: f64,
    /// Estimated filament weight in grams; 0 when unavailable.
    pub print_weight: i64,
    /// Estimated filament length in meters; 0 when unavailable.
    pub print_length: i64,
    /// Current task name; `No active print` when unavailable.
    pub task_name: String,
    /// Name of the last completed job, once the printer is back at
    /// idle/finished and the name is a real value.
    pub last_print_name: Option<String>,
    /// Resolved AMS slots, in configured order.
    pub slots: Vec<SlotDescriptor>,
    /// Bed target-number entity for the edit dialog.
    pub bed_target_entity: Option<EntityId>,
    /// Nozzle target-number entity for the edit dialog.
    pub nozzle_target_entity: Option<EntityId>,
    /// Speed-profile select entity for the edit dialog.
    pub speed_profile_entity: Option<EntityId>,
    /// Auxiliary fan entity; present only when it resolves in the store.
    pub fan_entity: Option<EntityId>,
}

impl PrintViewModel {
    /// Build the view model from a store snapshot and a validated
    /// configuration. Tolerates every referenced entity being absent.
    pub fn build(store: &dyn StateStore, config: &CardConfig) -> Self {
        let status = state_or(store, config.status.as_ref(), "idle");
        let stage = state_or(store, config.stage.as_ref(), "unknown");

        // Raw task name without a default; placeholder filtering happens
        // in the classifier.
        let task_raw = config
            .model
            .name
            .as_ref()
            .and_then(|id| store.entity(id))
            .map(|state| state.state.as_str())
            .filter(|s| !s.is_empty());

        let fan_entity = config
            .control
            .fan
            .clone()
            .filter(|id| store.entity(id).is_some());

        Self {
            name: config.title.clone(),
            status: status.to_string(),
            current_stage: stage.to_string(),
            progress: parse_float(state_or(store, config.progress.as_ref(), "0")),
            remaining_secs: minutes_to_secs(state_or(
                store,
                config.remaining_time.as_ref(),
                "0",
            )),
            speed_profile: state_or(store, config.speed_profile.as_ref(), "standard")
                .to_string(),
            is_printing: is_printing(status, stage),
            is_paused: is_paused(status),
            current_layer: parse_count(state_or(
                store,
                config.layers.current_layer.as_ref(),
                "0",
            )),
            total_layers: parse_count(state_or(store, config.layers.total_layers.as_ref(), "0")),
            bed_temp: parse_float(state_or(store, config.temperature.bed.as_ref(), "0")),
            nozzle_temp: parse_float(state_or(store, config.temperature.nozzle.as_ref(), "0")),
            print_weight: parse_int(state_or(store, config.model.weight.as_ref(), "0")),
            print_length: parse_int(state_or(store, config.model.length.as_ref(), "0")),
            task_name: task_raw.unwrap_or("No active print").to_string(),
            last_print_name: last_print_name(status, task_raw).map(str::to_string),
            slots: resolve_slots(store, config),
            bed_target_entity: config.temperature.bed_number.clone(),
            nozzle_target_entity: config.temperature.nozzle_number.clone(),
            speed_profile_entity: config.speed_profile.clone(),
            fan_entity,
        }
    }
}

/// Parse a raw float state. Malformed values degrade to NaN, never
/// an error.
fn parse_float(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a raw non-negative count, truncating fractional values.
fn parse_count(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v as u32,
        _ => 0,
    }
}

/// Parse a raw integer reading, truncating fractional values.
fn parse_int(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v as i64,
        _ => 0,
    }
}

/// Convert a raw minutes value to whole seconds.
fn minutes_to_secs(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => (v * 60.0).round() as i64,
        _ => 0,
    }
}
