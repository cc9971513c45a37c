//! Fire spell
//!
//! Places fires around the caster, optionally scorching nearby entities,
//! then cleans its fires up when the effect expires. Modifier handling:
//! Area/Many widen the radius, Much/Little scale everything, Construction
//! allows placement on any solid footing, Destruction adds the entity
//! damage pass, and Control spares the caster from it.

use sigil_types::constants::{
    BASE_SPELL_RADIUS, FIRE_EFFECT_DURATION_TICKS, FIRE_MAX_BLOCKS_PER_INTENSITY,
};
use sigil_types::{Kind, KindSet, Modifier, ModifierSet};

use crate::effects::{EffectError, SpellEffect};
use crate::rules;
use crate::world::SpellWorld;

#[derive(Debug, Default)]
pub struct FireSpell;

impl<W: SpellWorld<A>, A> SpellEffect<W, A> for FireSpell {
    fn apply(
        &self,
        world: &mut W,
        caster: &A,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> Result<bool, EffectError> {
        if !kinds.contains(Kind::Fire) {
            return Ok(false);
        }

        let resolved = rules::resolve_modifier_conflicts(modifiers);
        let radius = rules::radius_modifier(&resolved, BASE_SPELL_RADIUS);
        let intensity =
            rules::intensity_modifier(&resolved) * rules::type_interaction_multiplier(kinds.as_slice());

        let constructive = resolved.contains(Modifier::Construction);
        let max_fires = (FIRE_MAX_BLOCKS_PER_INTENSITY as f64 * intensity) as u32;

        let placed = world.ignite_around(caster, radius, max_fires, constructive);
        if placed == 0 {
            tracing::debug!("fire spell placed no fires; fizzling");
            return Ok(false);
        }

        if resolved.contains(Modifier::Destruction) {
            world.scorch_entities(caster, radius, intensity, resolved.contains(Modifier::Control));
        }

        world.notify(
            caster,
            &format!(
                "You unleash {} {} fire spell! ({} fires created)",
                intensity_description(intensity),
                effect_description(&resolved),
                placed
            ),
        );

        Ok(true)
    }

    // Fire takes hold the moment the scroll is read
    fn cast_delay_ticks(&self, _modifiers: &ModifierSet, _kinds: &KindSet) -> u32 {
        0
    }

    fn active_duration_ticks(&self, _modifiers: &ModifierSet, _kinds: &KindSet) -> u32 {
        FIRE_EFFECT_DURATION_TICKS
    }

    fn on_end(
        &self,
        world: &mut W,
        caster: &A,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<(), EffectError> {
        let removed = world.extinguish_around(caster);
        tracing::debug!(removed, "fire spell expired");
        world.notify(caster, "Your fire spell fades away.");
        Ok(())
    }
}

fn intensity_description(intensity: f64) -> &'static str {
    if intensity >= 2.0 {
        "devastating"
    } else if intensity >= 1.5 {
        "powerful"
    } else if intensity >= 1.0 {
        "moderate"
    } else if intensity >= 0.5 {
        "weak"
    } else {
        "feeble"
    }
}

fn effect_description(modifiers: &ModifierSet) -> &'static str {
    if modifiers.contains(Modifier::Control) {
        "controlled"
    } else if modifiers.contains(Modifier::Destruction) {
        "destructive"
    } else if modifiers.contains(Modifier::Construction) {
        "constructive"
    } else if modifiers.contains(Modifier::Area) {
        "area"
    } else {
        "basic"
    }
}
