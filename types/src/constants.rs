//! Tuning constants for the spell engine
//!
//! Centralized so that no module carries magic numbers. Units are ticks
//! unless stated otherwise; one tick is the sole unit of time in the engine.

// ─── Intensity multipliers ──────────────────────────────────────────────────

pub const MUCH_INTENSITY_MULTIPLIER: f64 = 2.0;
pub const LITTLE_INTENSITY_MULTIPLIER: f64 = 0.5;
pub const SOME_INTENSITY_MULTIPLIER: f64 = 1.0;

// ─── Kind interaction multipliers ───────────────────────────────────────────

pub const AMPLIFY_MULTIPLIER: f64 = 1.5;
pub const OPPOSE_MULTIPLIER: f64 = 0.5;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

// ─── Spell radius ───────────────────────────────────────────────────────────

pub const BASE_SPELL_RADIUS: u32 = 1;
pub const AREA_RADIUS_BONUS: u32 = 2;
pub const MANY_RADIUS_BONUS: u32 = 2;

// ─── Casting timing ─────────────────────────────────────────────────────────

/// Base delay between a cast request and the spell taking effect (1 second)
pub const BASE_CASTING_DELAY_TICKS: u32 = 20;
pub const MIN_CASTING_DELAY_TICKS: u32 = 5;
pub const MAX_CASTING_DELAY_TICKS: u32 = 100;
/// Default for behaviors that do not declare their own delay (2 seconds)
pub const DEFAULT_CAST_DELAY_TICKS: u32 = 40;
pub const DELAY_MUCH_BONUS: i32 = 20;
pub const DELAY_LITTLE_REDUCTION: i32 = -10;

// ─── Fire spell ─────────────────────────────────────────────────────────────

pub const FIRE_EFFECT_DURATION_TICKS: u32 = 200;
/// Fires placed per point of intensity, limiting the total footprint
pub const FIRE_MAX_BLOCKS_PER_INTENSITY: u32 = 50;

// ─── Mana ───────────────────────────────────────────────────────────────────

pub const DEFAULT_MANA_COST: u32 = 10;
pub const MANA_COST_PER_MODIFIER: u32 = 5;
pub const FIRE_MANA_SURCHARGE: u32 = 10;
pub const DEFAULT_MAX_MANA: u32 = 100;
pub const MANA_REGEN_AMOUNT: u32 = 2;
pub const MANA_REGEN_INTERVAL_TICKS: u32 = 20;

// ─── Canonical naming ───────────────────────────────────────────────────────

pub const SCROLL_NAME_PREFIX: &str = "scroll_";
pub const SCROLL_NAME_SEPARATOR: &str = "_";
pub const SCROLL_MAX_STACK_SIZE: u32 = 16;
