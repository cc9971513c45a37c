//! The behavior contract every registered effect implements
//!
//! Behaviors receive the world and caster handles opaquely, along with the
//! tag sets of the cast, and produce the spell's outcome. They are shared
//! immutably (`Arc<dyn SpellEffect>`) between the registry and however many
//! active instances a definition currently has, so per-cast state belongs
//! to the host behind the world handle, not in the behavior itself.

use std::sync::Arc;

use thiserror::Error;

use sigil_types::constants::DEFAULT_CAST_DELAY_TICKS;
use sigil_types::{KindSet, ModifierSet};

/// A failure raised from inside a behavior hook or a scheduled action.
///
/// Contained at the scheduler/tracker boundary: logged and dropped, never
/// propagated into the tick loop. One effect's failure cannot cascade to
/// the others firing in the same tick.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EffectError {
    message: String,
}

impl EffectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A magic effect bound to a registered tag combination.
///
/// `apply` returning `Ok(false)` means the spell fizzled, which is a
/// domain outcome rather than a failure. `Err` is an execution failure the
/// engine logs and contains. The timing queries have defaults so simple effects only
/// implement `apply`; effects that linger override
/// [`active_duration_ticks`](SpellEffect::active_duration_ticks) and the
/// lifecycle hooks.
pub trait SpellEffect<W, A> {
    /// Apply the effect. Returns whether the spell actually took hold.
    fn apply(
        &self,
        world: &mut W,
        caster: &A,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> Result<bool, EffectError>;

    /// Gate checked before the cast is scheduled.
    fn can_apply(&self, _world: &W, _caster: &A, modifiers: &ModifierSet, kinds: &KindSet) -> bool {
        !modifiers.is_empty() && !kinds.is_empty()
    }

    /// Ticks between the cast request and `apply` running.
    fn cast_delay_ticks(&self, _modifiers: &ModifierSet, _kinds: &KindSet) -> u32 {
        DEFAULT_CAST_DELAY_TICKS
    }

    /// How long the effect stays active after a successful `apply`.
    /// Zero (the default) means the effect is instantaneous.
    fn active_duration_ticks(&self, _modifiers: &ModifierSet, _kinds: &KindSet) -> u32 {
        0
    }

    /// Called once per tick while the effect is active, with the
    /// pre-decrement number of ticks remaining (duration, duration-1, .., 1).
    fn on_tick(
        &self,
        _world: &mut W,
        _caster: &A,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
        _ticks_remaining: u32,
    ) -> Result<(), EffectError> {
        Ok(())
    }

    /// Called exactly once when the effect expires, whether by countdown
    /// or forced early expiry.
    fn on_end(
        &self,
        _world: &mut W,
        _caster: &A,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<(), EffectError> {
        Ok(())
    }
}

struct SpellFn<F> {
    apply: F,
}

impl<W, A, F> SpellEffect<W, A> for SpellFn<F>
where
    F: Fn(&mut W, &A, &ModifierSet, &KindSet) -> Result<bool, EffectError>,
{
    fn apply(
        &self,
        world: &mut W,
        caster: &A,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> Result<bool, EffectError> {
        (self.apply)(world, caster, modifiers, kinds)
    }
}

/// Wrap a bare apply closure as a full [`SpellEffect`] with default timing.
/// Handy for instantaneous effects that need no lifecycle hooks.
pub fn spell_fn<W: 'static, A: 'static, F>(apply: F) -> Arc<dyn SpellEffect<W, A>>
where
    F: Fn(&mut W, &A, &ModifierSet, &KindSet) -> Result<bool, EffectError> + 'static,
{
    Arc::new(SpellFn { apply })
}
