//! Core logic for the Raccolta Differenziata card: sensor discovery, localization and
//! construction of the visual tree a host paints.

/// Card facade driven by hosts.
pub mod card;
/// Configuration intake and derived display options.
pub mod config;
/// Translation tables and locale formatting.
pub mod i18n;
/// Entity identifiers, states and snapshots.
pub mod model;
/// Errors and host-facing traits.
pub mod ports;
/// Card metadata for discovery.
pub mod registry;
/// Reminders for upcoming collections.
pub mod reminder;
/// Discovery of collection sensors.
pub mod resolver;
/// Presentation builder.
pub mod view;

pub use card::*;
pub use config::*;
pub use i18n::*;
pub use model::*;
pub use ports::*;
pub use registry::*;
pub use reminder::*;
pub use resolver::*;
pub use view::*;
