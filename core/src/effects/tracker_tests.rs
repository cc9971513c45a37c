//! Tests for the active-effect lifecycle
//!
//! Verifies that:
//! - on_tick sees the pre-decrement countdown and on_end fires exactly once
//! - force_expire is immediate and idempotent
//! - Hook failures are contained per instance
//! - Construction validates tag sets and clamps durations

use std::sync::Arc;

use sigil_types::{Kind, KindSet, Modifier, ModifierSet};

use super::{ActiveEffect, EffectError, EffectTracker, SpellEffect};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Hook invocations recorded by the mock world
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Tick(&'static str, u32),
    End(&'static str),
}

type World = Vec<Call>;

/// Behavior that records every lifecycle hook under its label
struct Pulse(&'static str);

impl SpellEffect<World, u64> for Pulse {
    fn apply(
        &self,
        _world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<bool, EffectError> {
        Ok(true)
    }

    fn on_tick(
        &self,
        world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
        ticks_remaining: u32,
    ) -> Result<(), EffectError> {
        world.push(Call::Tick(self.0, ticks_remaining));
        Ok(())
    }

    fn on_end(
        &self,
        world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<(), EffectError> {
        world.push(Call::End(self.0));
        Ok(())
    }
}

/// Behavior whose per-tick hook always fails but whose end hook records
struct Flaky(&'static str);

impl SpellEffect<World, u64> for Flaky {
    fn apply(
        &self,
        _world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<bool, EffectError> {
        Ok(true)
    }

    fn on_tick(
        &self,
        _world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
        _ticks_remaining: u32,
    ) -> Result<(), EffectError> {
        Err(EffectError::new("sputtering"))
    }

    fn on_end(
        &self,
        world: &mut World,
        _caster: &u64,
        _modifiers: &ModifierSet,
        _kinds: &KindSet,
    ) -> Result<(), EffectError> {
        world.push(Call::End(self.0));
        Ok(())
    }
}

fn make_instance(
    behavior: Arc<dyn SpellEffect<World, u64>>,
    duration_ticks: i32,
) -> ActiveEffect<World, u64> {
    ActiveEffect::new(
        7,
        behavior,
        ModifierSet::of(&[Modifier::Some]),
        KindSet::of(&[Kind::Life]),
        duration_ticks,
    )
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Lifecycle Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn full_countdown_runs_the_exact_hook_sequence() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    tracker.add(make_instance(Arc::new(Pulse("burn")), 5));

    for _ in 0..5 {
        tracker.tick(&mut world);
    }

    assert_eq!(
        world,
        vec![
            Call::Tick("burn", 5),
            Call::Tick("burn", 4),
            Call::Tick("burn", 3),
            Call::Tick("burn", 2),
            Call::Tick("burn", 1),
            Call::End("burn"),
        ]
    );
    assert_eq!(tracker.count(), 0, "expired instance must be removed");
}

#[test]
fn on_end_never_fires_twice() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    tracker.add(make_instance(Arc::new(Pulse("burn")), 2));

    for _ in 0..6 {
        tracker.tick(&mut world);
    }

    let ends = world.iter().filter(|c| matches!(c, Call::End(_))).count();
    assert_eq!(ends, 1);
}

#[test]
fn force_expire_fires_end_immediately_and_once() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    let id = tracker.add(make_instance(Arc::new(Pulse("burn")), 3));
    tracker.tick(&mut world);
    assert_eq!(world, vec![Call::Tick("burn", 3)]);

    assert!(tracker.force_expire(id, &mut world));
    assert_eq!(world, vec![Call::Tick("burn", 3), Call::End("burn")]);
    assert_eq!(tracker.count(), 0);

    // Idempotent: the instance is gone
    assert!(!tracker.force_expire(id, &mut world));

    tracker.tick(&mut world);
    let ends = world.iter().filter(|c| matches!(c, Call::End(_))).count();
    assert_eq!(ends, 1, "tick after force_expire must not re-invoke on_end");
}

#[test]
fn force_expire_on_unknown_id_is_a_noop() {
    let mut tracker: EffectTracker<World, u64> = EffectTracker::new();
    let mut world = World::new();

    let id = tracker.add(make_instance(Arc::new(Pulse("burn")), 2));
    tracker.clear();
    assert!(!tracker.force_expire(id, &mut world));
    assert!(world.is_empty());
}

#[test]
fn instances_advance_in_insertion_order() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    tracker.add(make_instance(Arc::new(Pulse("short")), 1));
    tracker.add(make_instance(Arc::new(Pulse("long")), 2));

    tracker.tick(&mut world);
    assert_eq!(
        world,
        vec![
            Call::Tick("short", 1),
            Call::End("short"),
            Call::Tick("long", 2),
        ]
    );
    assert_eq!(tracker.count(), 1);

    tracker.tick(&mut world);
    assert_eq!(tracker.count(), 0);
}

#[test]
fn failing_on_tick_does_not_disturb_others_or_suppress_on_end() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    tracker.add(make_instance(Arc::new(Flaky("flaky")), 2));
    tracker.add(make_instance(Arc::new(Pulse("steady")), 2));

    tracker.tick(&mut world);
    tracker.tick(&mut world);

    assert_eq!(
        world,
        vec![
            Call::Tick("steady", 2),
            Call::End("flaky"),
            Call::Tick("steady", 1),
            Call::End("steady"),
        ]
    );
    assert_eq!(tracker.count(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Construction and Queries
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn construction_rejects_empty_tag_sets() {
    let result = ActiveEffect::new(
        7u64,
        Arc::new(Pulse("burn")) as Arc<dyn SpellEffect<World, u64>>,
        ModifierSet::new(),
        KindSet::of(&[Kind::Fire]),
        5,
    );
    assert!(result.is_err());
}

#[test]
fn negative_duration_is_clamped_to_zero() {
    let instance = make_instance(Arc::new(Pulse("burn")), -7);
    assert!(instance.is_expired());
    assert_eq!(instance.total_duration(), 0);

    // A pre-expired instance is removed without running any hooks
    let mut tracker = EffectTracker::new();
    let mut world = World::new();
    tracker.add(instance);
    tracker.tick(&mut world);
    assert!(world.is_empty());
    assert_eq!(tracker.count(), 0);
}

#[test]
fn progress_and_elapsed_track_the_countdown() {
    let mut tracker = EffectTracker::new();
    let mut world = World::new();

    let id = tracker.add(make_instance(Arc::new(Pulse("burn")), 4));
    {
        let instance = tracker.get(id).unwrap();
        assert!(!instance.has_started());
        assert_eq!(instance.progress(), 0.0);
        assert_eq!(instance.ticks_elapsed(), 0);
    }

    tracker.tick(&mut world);
    let instance = tracker.get(id).unwrap();
    assert!(instance.has_started());
    assert_eq!(instance.ticks_remaining(), 3);
    assert_eq!(instance.ticks_elapsed(), 1);
    assert_eq!(instance.progress(), 0.25);
    assert!(instance.has_modifier(Modifier::Some));
    assert!(instance.has_kind(Kind::Life));
}
