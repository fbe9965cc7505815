//! # PrintWatch Card
//!
//! The state-derivation and interaction-control layer of the printer
//! status card. Builds the always-valid [`PrintViewModel`] from a store
//! snapshot, resolves AMS filament slots, throttles camera refreshes,
//! and drives the confirm / value-edit dialog state machines.
//!
//! All logic here is single-threaded and store-driven: it runs on host
//! store notifications and on user input events forwarded by the
//! presentation layer. Nothing blocks, polls, or retries.

pub mod camera;
pub mod card;
pub mod dialog;
pub mod error;
pub mod slots;
pub mod view_model;

pub use camera::{CameraController, CameraUrls, Clock, SystemClock};
pub use card::{ListenerHandle, PrintWatchCard};
pub use dialog::{ConfirmDialog, ConfirmKind, DialogState, EditKind, ValueEditDialog};
pub use error::{CardError, CardResult};
pub use slots::{resolve_slots, SlotDescriptor};
pub use view_model::PrintViewModel;
