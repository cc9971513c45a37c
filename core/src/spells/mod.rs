//! Shipped spell catalog
//!
//! Builds the full cross product of single-modifier × single-kind
//! combinations, layers hand-authored behaviors over whitelisted pairs,
//! and registers the compound combinations. A [`CatalogConfig`] can
//! disable combinations or override their timing before the registry is
//! frozen.

mod fire;

pub use fire::FireSpell;

use std::sync::Arc;

use sigil_types::constants::{BASE_CASTING_DELAY_TICKS, FIRE_EFFECT_DURATION_TICKS};
use sigil_types::{Kind, KindSet, Modifier, ModifierSet};

use crate::effects::{
    CatalogConfig, CatalogError, DefinitionError, EffectError, EffectRegistry, RegistryBuilder,
    SpellEffect, Timing,
};
use crate::world::SpellWorld;

/// Fallback behavior for combinations without a hand-authored effect:
/// announces the cast and reports success.
#[derive(Debug, Default)]
struct ScrollAnnouncement;

impl<W: SpellWorld<A>, A> SpellEffect<W, A> for ScrollAnnouncement {
    fn apply(
        &self,
        world: &mut W,
        caster: &A,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> Result<bool, EffectError> {
        let modifier_names: Vec<&str> = modifiers.iter().map(|m| m.display_name()).collect();
        let kind_names: Vec<&str> = kinds.iter().map(|k| k.display_name()).collect();
        world.notify(
            caster,
            &format!(
                "You cast {} {} magic!",
                modifier_names.join(" "),
                kind_names.join(" ")
            ),
        );
        Ok(true)
    }
}

/// Register every (single modifier, single kind) pair.
///
/// The default announcement behavior covers the whole cross product;
/// whitelisted pairs get their hand-authored override instead.
pub fn register_basic_combinations<W, A>(
    builder: &mut RegistryBuilder<W, A>,
) -> Result<(), DefinitionError>
where
    W: SpellWorld<A> + 'static,
    A: 'static,
{
    let announcement: Arc<dyn SpellEffect<W, A>> = Arc::new(ScrollAnnouncement);
    let fire: Arc<dyn SpellEffect<W, A>> = Arc::new(FireSpell);

    for modifier in Modifier::ALL {
        for kind in Kind::ALL {
            let behavior = match (modifier, kind) {
                (Modifier::Control, Kind::Fire) => Arc::clone(&fire),
                _ => Arc::clone(&announcement),
            };
            builder.register(
                ModifierSet::of(&[modifier]),
                KindSet::of(&[kind]),
                behavior,
            )?;
        }
    }
    Ok(())
}

/// Register the hand-authored multi-tag combinations, each with explicit
/// cast-delay/duration overrides.
pub fn register_custom_combinations<W, A>(
    builder: &mut RegistryBuilder<W, A>,
) -> Result<(), DefinitionError>
where
    W: SpellWorld<A> + 'static,
    A: 'static,
{
    // Wide multi-fire burst: slower incantation, same burn duration
    builder.register_with_timing(
        ModifierSet::of(&[Modifier::Area, Modifier::Many]),
        KindSet::of(&[Kind::Fire]),
        Arc::new(FireSpell),
        Timing {
            cast_delay_ticks: Some(BASE_CASTING_DELAY_TICKS),
            duration_ticks: Some(FIRE_EFFECT_DURATION_TICKS),
        },
    )?;
    Ok(())
}

/// Build and freeze the full shipped catalog, applying the host's override
/// config between registration and freeze.
pub fn catalog<W, A>(config: &CatalogConfig) -> Result<EffectRegistry<W, A>, CatalogError>
where
    W: SpellWorld<A> + 'static,
    A: 'static,
{
    let mut builder = RegistryBuilder::new();
    register_basic_combinations(&mut builder)?;
    register_custom_combinations(&mut builder)?;
    config.apply(&mut builder)?;
    Ok(builder.freeze())
}

/// The shipped catalog with no overrides.
pub fn catalog_default<W, A>() -> Result<EffectRegistry<W, A>, CatalogError>
where
    W: SpellWorld<A> + 'static,
    A: 'static,
{
    catalog(&CatalogConfig::default())
}
