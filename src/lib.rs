//! # PrintWatch
//!
//! State-derivation and interaction-control core for a 3D printer status
//! card hosted inside a home-automation dashboard. The host owns the
//! entity-state store, service invocation, and all rendering; this crate
//! turns loosely-typed entity values into an always-valid view model and
//! drives the card's transient interaction state.
//!
//! ## Architecture
//!
//! PrintWatch is organized as a workspace with multiple crates:
//!
//! 1. **printwatch-core** - Entity model, print-state classifier, host seams
//! 2. **printwatch-config** - Typed card configuration and visibility flags
//! 3. **printwatch-card** - View-model builder, camera throttle, dialogs,
//!    and the per-card controller
//! 4. **printwatch** - Facade crate re-exporting the public surface
//!
//! ## Features
//!
//! - **Tolerant state derivation**: every referenced entity may be absent,
//!   stale, or malformed; the view model always comes back with defaults
//! - **Explicit state machines**: printing classification and the
//!   confirm / value-edit dialogs are small, testable state machines
//! - **Store-driven throttling**: camera refresh is gated on store
//!   notifications, with an injectable clock for tests
//! - **No hidden capture**: command handlers take the current store and
//!   sink as parameters instead of closing over mutable widget state

pub use printwatch_card::{
    resolve_slots, CameraController, CameraUrls, CardError, CardResult, Clock, ConfirmDialog,
    ConfirmKind, DialogState, EditKind, ListenerHandle, PrintViewModel, PrintWatchCard,
    SlotDescriptor, SystemClock, ValueEditDialog,
};

pub use printwatch_config::{
    CameraConfig, CardConfig, ConfigError, ConfigResult, ControlConfig, LayersConfig, ModelConfig,
    ShowConfig, ShowFlag, SlotRef, TemperatureConfig, VisibilityFlags, DEFAULT_CAMERA_REFRESH_MS,
};

pub use printwatch_core::{
    is_paused, is_printing, last_print_name, press_button, state_or, CommandSink, CoreError,
    EntityId, EntitySnapshot, EntityState, KeyLocalizer, Localizer, StateStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
