//! Effect definition types
//!
//! A definition binds one tag combination to a behavior, permanently. All
//! definitions are created during registry population at startup and never
//! mutated afterwards; the stability flag is computed once at construction
//! so cast-time checks are a field read.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sigil_types::constants::{SCROLL_NAME_PREFIX, SCROLL_NAME_SEPARATOR};
use sigil_types::{KindSet, ModifierSet};

use crate::rules;

use super::behavior::SpellEffect;
use super::error::DefinitionError;

/// Explicit timing overrides for a registered combination.
///
/// Values set here take precedence over the behavior's own
/// `cast_delay_ticks`/`active_duration_ticks`; unset fields fall through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default)]
    pub cast_delay_ticks: Option<u32>,
    #[serde(default)]
    pub duration_ticks: Option<u32>,
}

/// Canonical registry key for a tag combination.
///
/// A pure function of set membership: modifier and kind names are sorted
/// before joining, so any permutation of the same tags produces the same
/// name. This string is the only identity other subsystems may rely on.
pub fn canonical_name(modifiers: &ModifierSet, kinds: &KindSet) -> String {
    format!(
        "{}{}{}{}",
        SCROLL_NAME_PREFIX,
        modifiers.sorted_names().join(SCROLL_NAME_SEPARATOR),
        SCROLL_NAME_SEPARATOR,
        kinds.sorted_names().join(SCROLL_NAME_SEPARATOR),
    )
}

/// Definition of a castable effect (one entry of the frozen registry)
///
/// Owns immutable tag sets, the behavior, and the derived stability flag.
/// Multiple [`super::ActiveEffect`] instances may be running off a single
/// definition at once (one per cast).
pub struct EffectDefinition<W, A> {
    name: String,
    modifiers: ModifierSet,
    kinds: KindSet,
    behavior: Arc<dyn SpellEffect<W, A>>,
    timing: Timing,
    stable: bool,
}

impl<W, A> EffectDefinition<W, A> {
    /// Create a definition, validating the tag sets and computing the
    /// canonical name and stability eagerly.
    pub fn new(
        modifiers: ModifierSet,
        kinds: KindSet,
        behavior: Arc<dyn SpellEffect<W, A>>,
        timing: Timing,
    ) -> Result<Self, DefinitionError> {
        if modifiers.is_empty() {
            return Err(DefinitionError::EmptyModifiers);
        }
        if kinds.is_empty() {
            return Err(DefinitionError::EmptyKinds);
        }

        let name = canonical_name(&modifiers, &kinds);
        let stable = rules::is_stable_combination(&modifiers, &kinds);

        Ok(Self {
            name,
            modifiers,
            kinds,
            behavior,
            timing,
            stable,
        })
    }

    /// Copy of this definition with different timing overrides
    pub fn with_timing(&self, timing: Timing) -> Self {
        Self {
            name: self.name.clone(),
            modifiers: self.modifiers.clone(),
            kinds: self.kinds.clone(),
            behavior: Arc::clone(&self.behavior),
            timing,
            stable: self.stable,
        }
    }

    /// Canonical name (registry identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    pub fn behavior(&self) -> &Arc<dyn SpellEffect<W, A>> {
        &self.behavior
    }

    /// Whether the combination was judged stable at registration.
    /// Advisory: the casting layer decides what instability means.
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Tag count, used for the deterministic registry ordering
    pub fn complexity(&self) -> usize {
        self.modifiers.len() + self.kinds.len()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Effective cast delay: explicit override, else the behavior's answer
    pub fn cast_delay_ticks(&self) -> u32 {
        self.timing
            .cast_delay_ticks
            .unwrap_or_else(|| self.behavior.cast_delay_ticks(&self.modifiers, &self.kinds))
    }

    /// Effective active duration: explicit override, else the behavior's answer
    pub fn active_duration_ticks(&self) -> u32 {
        self.timing
            .duration_ticks
            .unwrap_or_else(|| self.behavior.active_duration_ticks(&self.modifiers, &self.kinds))
    }
}

impl<W, A> fmt::Debug for EffectDefinition<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDefinition")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers)
            .field("kinds", &self.kinds)
            .field("timing", &self.timing)
            .field("stable", &self.stable)
            .finish_non_exhaustive()
    }
}
