//! AMS filament slot resolution
//!
//! Maps the configured slot reference list to normalized descriptors.
//! Resolution is order-preserving and drops unresolvable references
//! rather than synthesizing placeholder slots.

use printwatch_core::{EntityId, StateStore};
use printwatch_config::{CardConfig, SlotRef};
use serde::Serialize;

/// Neutral gray used when a slot reports no filament color.
pub const DEFAULT_SLOT_COLOR: &str = "#E0E0E0";

/// One resolved AMS filament slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDescriptor {
    /// The slot entity this descriptor was resolved from.
    pub entity: EntityId,
    /// Filament type, or `Empty` when the slot reports a blank state.
    #[serde(rename = "type")]
    pub slot_type: String,
    /// Filament color as a CSS color string.
    pub color: String,
    /// Whether the slot is unoccupied.
    pub empty: bool,
    /// Whether the slot is currently feeding the print.
    pub active: bool,
    /// Display name of the slot.
    pub name: String,
}

/// Resolve the configured AMS slots against a store snapshot.
///
/// Entries normalize to trimmed entity ids; blank entries and entities
/// absent from the store are dropped. Output order matches configured
/// order.
pub fn resolve_slots(store: &dyn StateStore, config: &CardConfig) -> Vec<SlotDescriptor> {
    config
        .ams_slots
        .iter()
        .filter_map(SlotRef::entity_id)
        .filter_map(|id| resolve_slot(store, id))
        .collect()
}

fn resolve_slot(store: &dyn StateStore, id: EntityId) -> Option<SlotDescriptor> {
    let state = store.entity(&id)?;

    let slot_type = if state.state.is_empty() {
        "Empty".to_string()
    } else {
        state.state.clone()
    };

    let color = state
        .attr_str("color")
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_SLOT_COLOR)
        .to_string();

    let name = state
        .attr_str("name")
        .filter(|n| !n.is_empty())
        .or_else(|| state.attr_str("friendly_name").filter(|n| !n.is_empty()))
        .unwrap_or("Unknown")
        .to_string();

    Some(SlotDescriptor {
        slot_type,
        color,
        empty: state.attr_truthy("empty"),
        active: state.attr_truthy("active"),
        name,
        entity: id,
    })
}
