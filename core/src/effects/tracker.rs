//! Active effect tracking
//!
//! Owns every currently running [`ActiveEffect`] and drives the lifecycle:
//! one `tick` advances all instances in insertion order and removes the
//! ones that expired during the pass. Hook failures are contained per
//! instance; one effect erroring never disturbs the others.

use super::active::{ActiveEffect, EffectId};

/// Tracks and advances active effect instances.
///
/// Single-owner, single-thread: the host calls `tick` once per simulation
/// tick and never concurrently with `add`/`force_expire`.
pub struct EffectTracker<W, A> {
    active: Vec<(EffectId, ActiveEffect<W, A>)>,
    next_id: u64,
}

impl<W, A> EffectTracker<W, A> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_id: 1,
        }
    }

    /// Start tracking an already-constructed instance.
    pub fn add(&mut self, instance: ActiveEffect<W, A>) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            id = id.0,
            duration = instance.total_duration(),
            "tracking active effect"
        );
        self.active.push((id, instance));
        id
    }

    /// Advance every tracked instance by one tick, in insertion order.
    ///
    /// Instances whose counter reaches zero fire their terminal hook and
    /// are removed before this returns; removal happens after the full
    /// pass, so no instance is skipped or visited twice.
    pub fn tick(&mut self, world: &mut W) {
        if self.active.is_empty() {
            return;
        }

        let mut expired = 0usize;
        for (_, instance) in self.active.iter_mut() {
            if instance.advance(world) {
                expired += 1;
            }
        }

        if expired > 0 {
            self.active.retain(|(_, instance)| !instance.is_expired());
            tracing::debug!(
                removed = expired,
                remaining = self.active.len(),
                "expired effects removed"
            );
        }
    }

    /// Expire an instance early, firing its terminal hook immediately and
    /// removing it. Returns false (and does nothing) if the id is unknown,
    /// including when it already expired, so the call is idempotent.
    pub fn force_expire(&mut self, id: EffectId, world: &mut W) -> bool {
        let Some(index) = self.active.iter().position(|(eid, _)| *eid == id) else {
            return false;
        };
        let (_, mut instance) = self.active.remove(index);
        let fired = instance.force_expire(world);
        tracing::debug!(id = id.0, fired, "force-expired active effect");
        fired
    }

    pub fn count(&self) -> usize {
        self.active.len()
    }

    pub fn get(&self, id: EffectId) -> Option<&ActiveEffect<W, A>> {
        self.active
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, instance)| instance)
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.active.iter().any(|(eid, _)| *eid == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EffectId, &ActiveEffect<W, A>)> {
        self.active.iter().map(|(id, instance)| (*id, instance))
    }

    /// Drop every tracked instance without running terminal hooks.
    /// Reset/test escape hatch, not part of the normal lifecycle.
    pub fn clear(&mut self) {
        if !self.active.is_empty() {
            tracing::warn!(dropped = self.active.len(), "clearing all active effects");
        }
        self.active.clear();
    }
}

impl<W, A> Default for EffectTracker<W, A> {
    fn default() -> Self {
        Self::new()
    }
}
