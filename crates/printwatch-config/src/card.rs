//! Card configuration schema
//!
//! User-authored, semi-structured configuration: top-level scalar entity
//! references plus nested groups and an ordered AMS slot list. Supplied
//! wholesale at construction and replaced wholesale on editor changes;
//! immutable within a render pass.
//!
//! Entity reference fields are lenient on input: blank or
//! whitespace-only values deserialize as unset rather than erroring.
//! Only the missing `title` is fatal.

use printwatch_core::EntityId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::show::ShowConfig;

/// Default camera refresh interval in milliseconds.
pub const DEFAULT_CAMERA_REFRESH_MS: u64 = 1_000;

/// Deserialize an optional entity reference, treating blank strings as
/// unset.
fn entity_opt<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| EntityId::new(s).ok()))
}

/// One entry of the AMS slot list.
///
/// The editor emits either a bare entity id string or an object of the
/// form `{ "entity": "sensor.ams_tray_1" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotRef {
    /// Bare entity id string.
    Id(String),
    /// Object form with an `entity` key.
    Object {
        /// The referenced slot entity.
        entity: String,
    },
}

impl SlotRef {
    /// Normalized entity id; `None` when the entry is blank.
    pub fn entity_id(&self) -> Option<EntityId> {
        let raw = match self {
            SlotRef::Id(s) => s,
            SlotRef::Object { entity } => entity,
        };
        EntityId::new(raw.as_str()).ok()
    }
}

/// Camera section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera entity whose `entity_picture` attribute carries the feed URL.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityId>,
    /// Refresh throttle interval in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<u64>,
}

/// Action control section: buttons and toggleable accessories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Button entity that pauses the running print.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub pause_button: Option<EntityId>,
    /// Button entity that resumes a paused print.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub resume_button: Option<EntityId>,
    /// Button entity that stops the print.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub stop_button: Option<EntityId>,
    /// Chamber light entity; its service domain is inferred from the id.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub chamber_light: Option<EntityId>,
    /// Auxiliary fan entity.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub fan: Option<EntityId>,
}

/// Layer progress section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    /// Current layer number sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub current_layer: Option<EntityId>,
    /// Total layer count sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub total_layers: Option<EntityId>,
}

/// Temperature section: readout sensors plus their target-number
/// entities for the edit dialogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Bed temperature sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub bed: Option<EntityId>,
    /// Nozzle temperature sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub nozzle: Option<EntityId>,
    /// Bed target-temperature number entity.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<EntityId>,
    /// Nozzle target-temperature number entity.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub nozzle_number: Option<EntityId>,
}

/// Current model/job section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Task name sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub name: Option<EntityId>,
    /// Preview image entity whose `entity_picture` carries the URL.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub preview: Option<EntityId>,
    /// Estimated filament weight sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub weight: Option<EntityId>,
    /// Estimated filament length sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub length: Option<EntityId>,
}

/// Full card configuration.
///
/// Every field except `title` is optional; a config holding only a
/// title is valid and yields a view model built entirely from defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Display name of the printer. Required.
    pub title: String,
    /// Coarse printer status sensor (printing/idle/pause/...).
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityId>,
    /// Fine-grained stage sensor (heating/leveling/printing/...).
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub stage: Option<EntityId>,
    /// Print progress percentage sensor.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub progress: Option<EntityId>,
    /// Remaining print time sensor; the raw value is minutes.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<EntityId>,
    /// Speed profile select entity.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub speed_profile: Option<EntityId>,
    /// Online indicator entity; the printer counts as online iff its
    /// state is the literal `on`.
    #[serde(deserialize_with = "entity_opt", skip_serializing_if = "Option::is_none")]
    pub online: Option<EntityId>,
    /// Camera section.
    pub camera: CameraConfig,
    /// Control section.
    pub control: ControlConfig,
    /// Layer progress section.
    pub layers: LayersConfig,
    /// Temperature section.
    pub temperature: TemperatureConfig,
    /// Model/job section.
    pub model: ModelConfig,
    /// Section visibility overrides.
    pub show: ShowConfig,
    /// Ordered AMS slot references.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ams_slots: Vec<SlotRef>,
}

impl CardConfig {
    /// Decode and validate a raw configuration value from the host.
    pub fn from_value(value: serde_json::Value) -> ConfigResult<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. The only fatal condition is a
    /// missing or blank `title`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingTitle);
        }
        Ok(())
    }

    /// Effective camera refresh interval in milliseconds.
    pub fn camera_refresh_ms(&self) -> u64 {
        self.camera
            .refresh_rate
            .unwrap_or(DEFAULT_CAMERA_REFRESH_MS)
    }

    /// Normalized AMS slot entity ids, in configured order, with blank
    /// entries dropped.
    pub fn slot_entities(&self) -> Vec<EntityId> {
        self.ams_slots.iter().filter_map(SlotRef::entity_id).collect()
    }
}
