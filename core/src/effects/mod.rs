//! Effect system
//!
//! This module provides:
//! - **Behavior contract**: the [`SpellEffect`] trait every registered effect implements
//! - **Definitions**: immutable tag combinations bound to a behavior
//! - **Registry**: the frozen combinatorial catalog built once at startup
//! - **Active instances**: runtime state of currently running timed effects
//! - **Tracker**: drives each active instance through its tick/end lifecycle
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                EffectDefinition (frozen registry)            │
//! │  "scroll_control_fire: FireSpell, stable, cast delay 0"      │
//! └──────────────────────────────────────────────────────────────┘
//!                            │
//!                   apply() reports success
//!               and declares a non-zero duration
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 ActiveEffect (runtime state)                 │
//! │  "caster 7's fire spell, 143 of 200 ticks remaining"         │
//! └──────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!              EffectTracker::tick → on_tick / on_end
//! ```

mod active;
mod behavior;
mod config;
mod definition;
mod error;
mod registry;
pub mod tracker;

#[cfg(test)]
mod tracker_tests;

pub use active::{ActiveEffect, EffectId};
pub use behavior::{EffectError, SpellEffect, spell_fn};
pub use config::{CatalogConfig, CombinationConfig};
pub use definition::{EffectDefinition, Timing, canonical_name};
pub use error::{CatalogError, ConfigError, DefinitionError};
pub use registry::{EffectRegistry, RegistryBuilder};
pub use tracker::EffectTracker;
