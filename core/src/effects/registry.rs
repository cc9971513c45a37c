//! The combinatorial effect catalog
//!
//! Built once at startup through [`RegistryBuilder`] and then frozen into
//! an [`EffectRegistry`]. The frozen registry is immutable: lookups are
//! read-only and the deterministic enumeration order is computed exactly
//! once, at freeze time. Re-running registration means building a new
//! registry.

use std::sync::Arc;

use hashbrown::HashMap;

use sigil_types::{KindSet, ModifierSet};

use super::behavior::SpellEffect;
use super::definition::{EffectDefinition, Timing, canonical_name};
use super::error::DefinitionError;

/// Mutable registration phase of the catalog.
///
/// Every validation failure here is a fatal startup error; callers
/// propagate it with `?` and refuse to start on an incomplete catalog.
pub struct RegistryBuilder<W, A> {
    by_name: HashMap<String, Arc<EffectDefinition<W, A>>>,
}

impl<W, A> RegistryBuilder<W, A> {
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Register a combination with default timing.
    pub fn register(
        &mut self,
        modifiers: ModifierSet,
        kinds: KindSet,
        behavior: Arc<dyn SpellEffect<W, A>>,
    ) -> Result<(), DefinitionError> {
        self.register_with_timing(modifiers, kinds, behavior, Timing::default())
    }

    /// Register a combination with explicit cast-delay/duration overrides.
    pub fn register_with_timing(
        &mut self,
        modifiers: ModifierSet,
        kinds: KindSet,
        behavior: Arc<dyn SpellEffect<W, A>>,
        timing: Timing,
    ) -> Result<(), DefinitionError> {
        let definition = EffectDefinition::new(modifiers, kinds, behavior, timing)?;
        let name = definition.name().to_string();

        if self.by_name.contains_key(&name) {
            return Err(DefinitionError::DuplicateName { name });
        }

        tracing::debug!(name = %name, stable = definition.is_stable(), "registered effect");
        self.by_name.insert(name, Arc::new(definition));
        Ok(())
    }

    /// Replace the timing overrides of an already-registered combination.
    /// Returns false if the combination is not registered.
    pub fn set_timing(&mut self, modifiers: &ModifierSet, kinds: &KindSet, timing: Timing) -> bool {
        let name = canonical_name(modifiers, kinds);
        let Some(existing) = self.by_name.get(&name) else {
            return false;
        };
        let rebuilt = existing.with_timing(timing);
        self.by_name.insert(name, Arc::new(rebuilt));
        true
    }

    /// Drop a registered combination. Returns whether it existed.
    pub fn remove(&mut self, modifiers: &ModifierSet, kinds: &KindSet) -> bool {
        self.by_name.remove(&canonical_name(modifiers, kinds)).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Freeze the catalog, computing the deterministic enumeration order:
    /// stable definitions first, then by ascending tag count, then by
    /// canonical name.
    pub fn freeze(self) -> EffectRegistry<W, A> {
        let mut ordered: Vec<Arc<EffectDefinition<W, A>>> = self.by_name.values().cloned().collect();
        ordered.sort_by(|a, b| {
            b.is_stable()
                .cmp(&a.is_stable())
                .then(a.complexity().cmp(&b.complexity()))
                .then_with(|| a.name().cmp(b.name()))
        });

        tracing::info!(count = ordered.len(), "effect registry frozen");
        EffectRegistry {
            by_name: self.by_name,
            ordered,
        }
    }
}

impl<W, A> Default for RegistryBuilder<W, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// The frozen effect catalog.
///
/// Immutable after [`RegistryBuilder::freeze`]; share it behind an `Arc`.
pub struct EffectRegistry<W, A> {
    by_name: HashMap<String, Arc<EffectDefinition<W, A>>>,
    ordered: Vec<Arc<EffectDefinition<W, A>>>,
}

impl<W, A> EffectRegistry<W, A> {
    /// Look up the definition for a tag combination.
    ///
    /// Identity is membership-based: any permutation of the same tags maps
    /// to the same definition. Returns None for unregistered combinations
    /// (a lookup miss is not an error).
    pub fn lookup(
        &self,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> Option<&Arc<EffectDefinition<W, A>>> {
        self.by_name.get(&canonical_name(modifiers, kinds))
    }

    /// Look up a definition by its canonical name.
    pub fn get(&self, name: &str) -> Option<&Arc<EffectDefinition<W, A>>> {
        self.by_name.get(name)
    }

    /// Every definition in the deterministic enumeration order computed at
    /// freeze time (stability desc, complexity asc, name asc).
    pub fn all(&self) -> &[Arc<EffectDefinition<W, A>>] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
