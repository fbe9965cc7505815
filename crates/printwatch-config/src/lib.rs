//! # PrintWatch Config
//!
//! Strongly-typed card configuration for PrintWatch. Replaces the
//! duck-typed nested config object the editor produces with an explicit
//! schema: every branch is an optional field with a documented default,
//! validated once at construction.

pub mod card;
pub mod error;
pub mod show;

pub use card::{
    CameraConfig, CardConfig, ControlConfig, LayersConfig, ModelConfig, SlotRef,
    TemperatureConfig, DEFAULT_CAMERA_REFRESH_MS,
};
pub use error::{ConfigError, ConfigResult};
pub use show::{ShowConfig, ShowFlag, VisibilityFlags};
