//! sigil-core: deferred-execution scheduler, active-effect tracker, and
//! combinatorial spell-rule engine for tick-based simulations.
//!
//! The host drives the engine from a single logical tick thread: each host
//! tick advances the [`scheduler::TickScheduler`] (firing due tasks, some of
//! which apply spells) and then the [`effects::EffectTracker`] (advancing
//! every active effect through its tick/end lifecycle). The
//! [`effects::EffectRegistry`] is built once at startup from the full
//! modifier × kind cross product and frozen before any tick activity begins.

pub mod effects;
pub mod engine;
pub mod mana;
pub mod rules;
pub mod scheduler;
pub mod spells;
pub mod world;

// Re-exports for convenience
pub use effects::{
    ActiveEffect, CatalogConfig, CatalogError, CombinationConfig, ConfigError, DefinitionError,
    EffectDefinition, EffectError, EffectId, EffectRegistry, EffectTracker, RegistryBuilder,
    SpellEffect, Timing, canonical_name, spell_fn,
};
pub use engine::{CastOutcome, EngineConfig, SpellEngine, StabilityPolicy};
pub use mana::{CasterId, ManaLedger, ManaPool};
pub use scheduler::{Repeat, TaskId, TaskResult, TickScheduler};
pub use spells::{FireSpell, catalog, catalog_default};
pub use world::SpellWorld;

pub use sigil_types::{
    ElementGroup, Interaction, Kind, KindSet, Modifier, ModifierSet, Priority, constants,
};
