//! Entity model and store adapter
//!
//! This module provides:
//! - `EntityId` - validated identifier for a value in the host store
//! - `EntityState` - a raw state string plus attribute map snapshot
//! - `StateStore` - the read-only seam the host dashboard implements
//! - `EntitySnapshot` - a map-backed store for hosts and tests
//!
//! Any entity may be absent from the store at any time. Absence is an
//! expected condition, not an error; callers supply the default to
//! substitute via [`state_or`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Identifier for a value in the host's entity-state store.
///
/// Opaque beyond non-emptiness; the conventional `domain.object_id`
/// shape is used only to infer a service domain for toggles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a validated entity id. Leading/trailing whitespace is
    /// trimmed; an id that is empty after trimming is rejected.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyEntityId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain prefix of the id (`light` for `light.chamber`).
    ///
    /// Ids without a `.` separator return the whole id.
    pub fn domain(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EntityId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Snapshot of a single entity: raw state string plus attributes.
///
/// Produced and owned by the host store; this core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Raw state value as reported by the host.
    pub state: String,
    /// Attribute map; values are arbitrary JSON.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    /// Create a state with no attributes.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Raw attribute value, if present.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attribute as a string slice, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Attribute as a float, if present and numeric.
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }

    /// Loose boolean coercion of an attribute.
    ///
    /// Missing, null, `false`, `0`, and `""` are false; every other
    /// value (including non-empty strings like `"false"`) is true.
    pub fn attr_truthy(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

/// Read-only view of the host's reactive entity-state store.
///
/// The host notifies the card on every relevant mutation; the card
/// re-reads through this trait and recomputes its view model. Lookups
/// must be cheap since they run on every update.
pub trait StateStore {
    /// Current state of an entity, or `None` when absent.
    fn entity(&self, id: &EntityId) -> Option<&EntityState>;
}

/// Resolve an optional entity reference to its raw state string,
/// substituting the caller-supplied default when the reference is
/// unset, the entity is absent, or its state is blank.
pub fn state_or<'a>(
    store: &'a dyn StateStore,
    id: Option<&EntityId>,
    default: &'a str,
) -> &'a str {
    match id.and_then(|id| store.entity(id)) {
        Some(state) if !state.state.is_empty() => state.state.as_str(),
        _ => default,
    }
}

/// Map-backed [`StateStore`] implementation.
///
/// Hosts that materialize update notifications into snapshots can use
/// this directly; it is also the store used throughout the tests.
#[derive(Debug, Clone, Default)]
pub struct EntitySnapshot {
    entities: HashMap<EntityId, EntityState>,
}

impl EntitySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity state.
    pub fn insert(&mut self, id: EntityId, state: EntityState) -> &mut Self {
        self.entities.insert(id, state);
        self
    }

    /// Remove an entity, returning its previous state.
    pub fn remove(&mut self, id: &EntityId) -> Option<EntityState> {
        self.entities.remove(id)
    }

    /// Number of entities in the snapshot.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl StateStore for EntitySnapshot {
    fn entity(&self, id: &EntityId) -> Option<&EntityState> {
        self.entities.get(id)
    }
}

impl FromIterator<(EntityId, EntityState)> for EntitySnapshot {
    fn from_iter<T: IntoIterator<Item = (EntityId, EntityState)>>(iter: T) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_id_trims_and_validates() {
        let id = EntityId::new("  sensor.printer_status  ").unwrap();
        assert_eq!(id.as_str(), "sensor.printer_status");

        assert_eq!(EntityId::new(""), Err(CoreError::EmptyEntityId));
        assert_eq!(EntityId::new("   "), Err(CoreError::EmptyEntityId));
    }

    #[test]
    fn test_entity_id_domain() {
        let id = EntityId::new("light.chamber_light").unwrap();
        assert_eq!(id.domain(), "light");

        let bare = EntityId::new("chamber").unwrap();
        assert_eq!(bare.domain(), "chamber");
    }

    #[test]
    fn test_entity_id_deserialize_rejects_blank() {
        let ok: EntityId = serde_json::from_value(json!("switch.fan")).unwrap();
        assert_eq!(ok.as_str(), "switch.fan");

        let err = serde_json::from_value::<EntityId>(json!("  "));
        assert!(err.is_err());
    }

    #[test]
    fn test_attr_truthy_coercion() {
        let state = EntityState::new("loaded")
            .with_attr("empty", false)
            .with_attr("active", 1)
            .with_attr("zero", 0)
            .with_attr("blank", "")
            .with_attr("text", "false")
            .with_attr("nothing", Value::Null);

        assert!(!state.attr_truthy("empty"));
        assert!(state.attr_truthy("active"));
        assert!(!state.attr_truthy("zero"));
        assert!(!state.attr_truthy("blank"));
        // Non-empty strings coerce to true regardless of content.
        assert!(state.attr_truthy("text"));
        assert!(!state.attr_truthy("nothing"));
        assert!(!state.attr_truthy("missing"));
    }

    #[test]
    fn test_state_or_defaults() {
        let mut snapshot = EntitySnapshot::new();
        let status = EntityId::new("sensor.status").unwrap();
        let blank = EntityId::new("sensor.blank").unwrap();
        snapshot.insert(status.clone(), EntityState::new("printing"));
        snapshot.insert(blank.clone(), EntityState::new(""));

        assert_eq!(state_or(&snapshot, Some(&status), "idle"), "printing");
        // Blank states count as absent.
        assert_eq!(state_or(&snapshot, Some(&blank), "idle"), "idle");
        // Unset reference and missing entity both fall back.
        assert_eq!(state_or(&snapshot, None, "idle"), "idle");
        let missing = EntityId::new("sensor.missing").unwrap();
        assert_eq!(state_or(&snapshot, Some(&missing), "unknown"), "unknown");
    }
}
