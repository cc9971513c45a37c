//! Interaction rules between modifiers and kinds
//!
//! Pure, stateless functions computing how the tags of a spell combine:
//! which modifiers survive conflict resolution, how intensity and radius
//! scale, and how kind pairings amplify or oppose each other. Nothing here
//! touches world state; every caller decides what to do with the numbers.

use sigil_types::constants::{
    AREA_RADIUS_BONUS, BASE_CASTING_DELAY_TICKS, DEFAULT_MANA_COST, DELAY_LITTLE_REDUCTION,
    DELAY_MUCH_BONUS, FIRE_MANA_SURCHARGE, LITTLE_INTENSITY_MULTIPLIER, MANA_COST_PER_MODIFIER,
    MANY_RADIUS_BONUS, MAX_CASTING_DELAY_TICKS, MIN_CASTING_DELAY_TICKS,
    MUCH_INTENSITY_MULTIPLIER, NEUTRAL_MULTIPLIER, SOME_INTENSITY_MULTIPLIER,
};
use sigil_types::{Kind, KindSet, Modifier, ModifierSet};


/// Resolve modifier conflicts, keeping the higher-priority member of each
/// conflicting pair.
///
/// At most one of the intensity modifiers {Much, Some, Little} survives
/// (precedence Much > Some > Little), and Destruction is dropped whenever
/// Control is present. Everything else passes through with its relative
/// order intact. Idempotent: resolving twice equals resolving once.
pub fn resolve_modifier_conflicts(modifiers: &ModifierSet) -> ModifierSet {
    if modifiers.is_empty() {
        return ModifierSet::new();
    }

    let mut resolved: Vec<Modifier> = modifiers.iter().collect();

    // Intensity conflicts (Much vs Little vs Some)
    let intensity: Vec<Modifier> = resolved.iter().copied().filter(|m| m.is_intensity()).collect();
    if intensity.len() > 1 {
        let keep = if intensity.contains(&Modifier::Much) {
            Modifier::Much
        } else if intensity.contains(&Modifier::Some) {
            Modifier::Some
        } else {
            Modifier::Little
        };
        resolved.retain(|m| !m.is_intensity() || *m == keep);
    }

    // Control vs Destruction: Control wins
    if resolved.contains(&Modifier::Control) && resolved.contains(&Modifier::Destruction) {
        resolved.retain(|m| *m != Modifier::Destruction);
    }

    resolved.into_iter().collect()
}

/// Intensity multiplier for a modifier set.
///
/// Much amplifies, Little reduces, anything else is neutral. Much takes
/// precedence if both somehow survived resolution. Always positive.
pub fn intensity_modifier(modifiers: &ModifierSet) -> f64 {
    if modifiers.contains(Modifier::Much) {
        MUCH_INTENSITY_MULTIPLIER
    } else if modifiers.contains(Modifier::Little) {
        LITTLE_INTENSITY_MULTIPLIER
    } else {
        SOME_INTENSITY_MULTIPLIER
    }
}

/// Effective radius for a spell: base plus scope bonuses, scaled by
/// intensity, never below 1.
pub fn radius_modifier(modifiers: &ModifierSet, base_radius: u32) -> u32 {
    let mut radius = base_radius;

    if modifiers.contains(Modifier::Area) {
        radius += AREA_RADIUS_BONUS;
    }
    if modifiers.contains(Modifier::Many) {
        radius += MANY_RADIUS_BONUS;
    }

    let intensity = intensity_modifier(modifiers);
    if intensity != 1.0 {
        radius = ((radius as f64 * intensity) as u32).max(1);
    }

    radius
}

/// Overall effect multiplier from kind interactions.
///
/// Every unordered pair of kinds contributes its interaction constant to a
/// running product. Accepts a plain slice so callers can score sequences
/// that still contain repeats; identical members amplify. A singleton or
/// empty sequence is neutral.
pub fn type_interaction_multiplier(kinds: &[Kind]) -> f64 {
    if kinds.len() <= 1 {
        return NEUTRAL_MULTIPLIER;
    }

    let mut multiplier = 1.0;
    for i in 0..kinds.len() {
        for j in (i + 1)..kinds.len() {
            multiplier *= kinds[i].interaction_with(kinds[j]).multiplier();
        }
    }
    multiplier
}

/// Whether a combination is stable enough to cast safely.
///
/// Counts conflicting modifier pairs and opposing kind pairs; the
/// combination is stable only while each count stays at or below 1.
/// Advisory: callers decide whether instability blocks the cast.
pub fn is_stable_combination(modifiers: &ModifierSet, kinds: &KindSet) -> bool {
    let modifier_conflicts = count_modifier_conflicts(modifiers.as_slice());
    let kind_conflicts = count_kind_conflicts(kinds.as_slice());
    modifier_conflicts <= 1 && kind_conflicts <= 1
}

/// Ticks between a cast request and the spell taking effect.
///
/// Much slows the incantation, Little quickens it; the result is clamped
/// to the configured window.
pub fn casting_delay_ticks(modifiers: &ModifierSet) -> u32 {
    let mut delay = BASE_CASTING_DELAY_TICKS as i32;

    if modifiers.contains(Modifier::Much) {
        delay += DELAY_MUCH_BONUS;
    }
    if modifiers.contains(Modifier::Little) {
        delay += DELAY_LITTLE_REDUCTION;
    }

    delay.clamp(MIN_CASTING_DELAY_TICKS as i32, MAX_CASTING_DELAY_TICKS as i32) as u32
}

/// Mana cost of casting a combination: a flat base, a surcharge per
/// modifier, and a further surcharge for fire magic.
pub fn mana_cost(modifiers: &ModifierSet, kinds: &KindSet) -> u32 {
    let mut cost = DEFAULT_MANA_COST + modifiers.len() as u32 * MANA_COST_PER_MODIFIER;
    if kinds.contains(Kind::Fire) {
        cost += FIRE_MANA_SURCHARGE;
    }
    cost
}

/// Human-readable summary of the modifications a combination applies,
/// e.g. "amplified, area effect, synergistic". Display layers put this in
/// tooltips; the engine itself never parses it.
pub fn modification_description(modifiers: &ModifierSet, kinds: &KindSet) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let intensity = intensity_modifier(modifiers);
    if intensity > 1.0 {
        parts.push("amplified");
    } else if intensity < 1.0 {
        parts.push("weakened");
    }

    if modifiers.contains(Modifier::Area) {
        parts.push("area effect");
    }
    if modifiers.contains(Modifier::Many) {
        parts.push("multi-target");
    }
    if modifiers.contains(Modifier::Control) {
        parts.push("precise");
    }
    if modifiers.contains(Modifier::Move) {
        parts.push("mobile");
    }

    let type_multiplier = type_interaction_multiplier(kinds.as_slice());
    if type_multiplier > 1.0 {
        parts.push("synergistic");
    } else if type_multiplier < 1.0 {
        parts.push("conflicted");
    }

    if parts.is_empty() {
        "standard".to_string()
    } else {
        parts.join(", ")
    }
}

fn count_modifier_conflicts(modifiers: &[Modifier]) -> usize {
    let mut conflicts = 0;
    for i in 0..modifiers.len() {
        for j in (i + 1)..modifiers.len() {
            if modifiers[i].conflicts_with(modifiers[j]) {
                conflicts += 1;
            }
        }
    }
    conflicts
}

fn count_kind_conflicts(kinds: &[Kind]) -> usize {
    let mut conflicts = 0;
    for i in 0..kinds.len() {
        for j in (i + 1)..kinds.len() {
            if kinds[i].interaction_with(kinds[j]) == sigil_types::Interaction::Oppose {
                conflicts += 1;
            }
        }
    }
    conflicts
}
