//! Active effect instances (runtime state)
//!
//! An `ActiveEffect` is one live, timed occurrence of a previously applied
//! spell. It is created when a behavior's `apply` reports success and
//! declares a non-zero duration, ticked down by the tracker, and destroyed
//! once its counter reaches zero.
//!
//! # Lifecycle
//!
//! 1. `apply` succeeds with duration N → instance created with N ticks
//! 2. Each tick: `on_tick(remaining)` with the pre-decrement counter, then decrement
//! 3. Counter reaches 0 → `on_end` fires exactly once → instance removed
//!
//! `force_expire` short-circuits straight to step 3. Expired is absorbing;
//! there is no other transition.

use std::fmt;
use std::sync::Arc;

use sigil_types::{Kind, KindSet, Modifier, ModifierSet};

use super::behavior::SpellEffect;
use super::error::DefinitionError;

/// Identifier handed out by [`super::EffectTracker::add`], used to address
/// an instance whose ownership lives inside the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(pub u64);

/// A live, timed occurrence of an applied effect
pub struct ActiveEffect<W, A> {
    caster: A,
    behavior: Arc<dyn SpellEffect<W, A>>,
    modifiers: ModifierSet,
    kinds: KindSet,
    ticks_remaining: u32,
    total_duration: u32,
    started: bool,
}

impl<W, A> ActiveEffect<W, A> {
    /// Create an instance, validating the tag sets and clamping the
    /// duration to zero or more ticks.
    pub fn new(
        caster: A,
        behavior: Arc<dyn SpellEffect<W, A>>,
        modifiers: ModifierSet,
        kinds: KindSet,
        duration_ticks: i32,
    ) -> Result<Self, DefinitionError> {
        if modifiers.is_empty() {
            return Err(DefinitionError::EmptyModifiers);
        }
        if kinds.is_empty() {
            return Err(DefinitionError::EmptyKinds);
        }

        let duration = duration_ticks.max(0) as u32;
        Ok(Self {
            caster,
            behavior,
            modifiers,
            kinds,
            ticks_remaining: duration,
            total_duration: duration,
            started: false,
        })
    }

    /// Advance one tick: run `on_tick` with the pre-decrement counter,
    /// decrement, and fire `on_end` when the counter reaches zero.
    /// Returns true once the instance has expired.
    pub fn advance(&mut self, world: &mut W) -> bool {
        if self.ticks_remaining == 0 {
            // Already expired; no further hooks
            return true;
        }

        if !self.started {
            self.started = true;
        }

        if let Err(error) = self.behavior.on_tick(
            world,
            &self.caster,
            &self.modifiers,
            &self.kinds,
            self.ticks_remaining,
        ) {
            tracing::warn!(%error, remaining = self.ticks_remaining, "effect on_tick failed");
        }

        self.ticks_remaining -= 1;

        if self.ticks_remaining == 0 {
            self.finish(world);
            return true;
        }
        false
    }

    /// Forcibly expire the instance, firing `on_end` if the counter was
    /// still positive. Idempotent: returns false if already expired.
    pub fn force_expire(&mut self, world: &mut W) -> bool {
        if self.ticks_remaining == 0 {
            return false;
        }
        self.ticks_remaining = 0;
        self.finish(world);
        true
    }

    fn finish(&mut self, world: &mut W) {
        if let Err(error) =
            self.behavior
                .on_end(world, &self.caster, &self.modifiers, &self.kinds)
        {
            tracing::warn!(%error, "effect on_end failed");
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ticks_remaining == 0
    }

    /// Whether the first tick has run
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn total_duration(&self) -> u32 {
        self.total_duration
    }

    pub fn ticks_elapsed(&self) -> u32 {
        self.total_duration - self.ticks_remaining
    }

    /// Completion fraction, 0.0 = just started, 1.0 = expired
    pub fn progress(&self) -> f32 {
        if self.total_duration == 0 {
            return 1.0;
        }
        1.0 - self.ticks_remaining as f32 / self.total_duration as f32
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn has_kind(&self, kind: Kind) -> bool {
        self.kinds.contains(kind)
    }

    pub fn caster(&self) -> &A {
        &self.caster
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }
}

impl<W, A> fmt::Debug for ActiveEffect<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveEffect")
            .field("modifiers", &self.modifiers)
            .field("kinds", &self.kinds)
            .field("ticks_remaining", &self.ticks_remaining)
            .field("total_duration", &self.total_duration)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
