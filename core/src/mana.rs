//! Caster mana pools
//!
//! The engine charges casts against per-caster pools and refills them with
//! a repeating scheduler task. Casters are opaque to the core, so the
//! ledger keys pools by a host-assigned [`CasterId`].

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Opaque identifier the host assigns to a caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CasterId(pub u64);

/// Mana state for a single caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    current: u32,
    max: u32,
    regenerating: bool,
}

impl ManaPool {
    /// A full pool with the given capacity
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            regenerating: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn has(&self, amount: u32) -> bool {
        self.current >= amount
    }

    /// Deduct `amount` if available. Returns whether the deduction happened.
    pub fn try_consume(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Add mana, saturating at the pool's capacity.
    pub fn add(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Whether a regeneration task is currently running for this pool
    pub fn is_regenerating(&self) -> bool {
        self.regenerating
    }

    pub(crate) fn set_regenerating(&mut self, regenerating: bool) {
        self.regenerating = regenerating;
    }
}

/// All mana pools known to the engine
#[derive(Debug, Clone, Default)]
pub struct ManaLedger {
    pools: HashMap<CasterId, ManaPool>,
}

impl ManaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool for `id`, creating a full one with capacity `max` on first use.
    pub fn ensure(&mut self, id: CasterId, max: u32) -> &mut ManaPool {
        self.pools.entry(id).or_insert_with(|| ManaPool::new(max))
    }

    pub fn pool(&self, id: CasterId) -> Option<&ManaPool> {
        self.pools.get(&id)
    }

    pub fn pool_mut(&mut self, id: CasterId) -> Option<&mut ManaPool> {
        self.pools.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_requires_enough_mana() {
        let mut pool = ManaPool::new(30);
        assert!(pool.try_consume(25));
        assert_eq!(pool.current(), 5);
        assert!(!pool.try_consume(10));
        assert_eq!(pool.current(), 5, "failed consume must not deduct");
    }

    #[test]
    fn add_saturates_at_capacity() {
        let mut pool = ManaPool::new(30);
        pool.try_consume(10);
        pool.add(50);
        assert_eq!(pool.current(), 30);
        assert!(pool.is_full());
    }

    #[test]
    fn ensure_creates_a_full_pool_once() {
        let mut ledger = ManaLedger::new();
        let id = CasterId(7);
        ledger.ensure(id, 100).try_consume(40);
        assert_eq!(ledger.ensure(id, 100).current(), 60);
        assert_eq!(ledger.len(), 1);
    }
}
