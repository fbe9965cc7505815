//! # PrintWatch Core
//!
//! Core types and seams for the PrintWatch printer status card.
//! Provides the entity model, the print-state classifier, and the traits
//! the host dashboard implements (state store, command sink, localization).

pub mod command;
pub mod entity;
pub mod error;
pub mod localize;
pub mod status;

pub use command::{press_button, CommandSink};
pub use entity::{state_or, EntityId, EntitySnapshot, EntityState, StateStore};
pub use error::{CoreError, Result};
pub use localize::{KeyLocalizer, Localizer};
pub use status::{is_paused, is_printing, last_print_name};
