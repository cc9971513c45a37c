//! Cast pipeline and tick orchestration
//!
//! `SpellEngine` owns the frozen registry, the scheduler, the tracker, and
//! the mana ledger, and exposes the two entry points the host calls:
//! [`SpellEngine::cast`] to request a spell and [`SpellEngine::tick`] once
//! per simulation tick. A cast is resolved, gated (stability, mana,
//! `can_apply`), then deferred by the combination's cast delay; when the
//! deferred task fires and the behavior reports success with a non-zero
//! duration, the resulting instance is handed to the tracker on the same
//! tick.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sigil_types::constants::{
    DEFAULT_MAX_MANA, MANA_REGEN_AMOUNT, MANA_REGEN_INTERVAL_TICKS,
};
use sigil_types::{KindSet, ModifierSet};

use crate::effects::{ActiveEffect, EffectRegistry, EffectTracker};
use crate::mana::{CasterId, ManaLedger, ManaPool};
use crate::rules;
use crate::scheduler::{Repeat, TickScheduler};


/// What the engine does with a combination flagged unstable.
///
/// Stability itself is advisory; this policy is where enforcement lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityPolicy {
    /// Log the instability and cast anyway
    #[default]
    WarnOnly,
    /// Refuse to cast unstable combinations
    Block,
}

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stability_policy: StabilityPolicy,
    /// Capacity of pools created on a caster's first cast
    pub max_mana: u32,
    pub mana_regen_amount: u32,
    pub mana_regen_interval_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stability_policy: StabilityPolicy::default(),
            max_mana: DEFAULT_MAX_MANA,
            mana_regen_amount: MANA_REGEN_AMOUNT,
            mana_regen_interval_ticks: MANA_REGEN_INTERVAL_TICKS,
        }
    }
}

/// Outcome of a cast request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// The application was scheduled after the combination's cast delay.
    /// A delay of zero means it already ran before this was returned.
    Scheduled { cast_delay_ticks: u32 },
    /// No definition registered for the combination (not an error)
    UnknownCombination,
    /// The stability policy refused the combination
    Unstable,
    /// The behavior's `can_apply` gate refused
    NotApplicable,
    /// The caster lacks the mana
    InsufficientMana { required: u32, available: u32 },
}

/// Owns the spell subsystems and drives them from the host's tick.
///
/// Single logical tick thread: `cast` and `tick` must not be called
/// concurrently. The registry is frozen and shared; everything else is
/// single-owner state.
pub struct SpellEngine<W, A> {
    registry: Arc<EffectRegistry<W, A>>,
    scheduler: TickScheduler<W>,
    tracker: EffectTracker<W, A>,
    mana: Rc<RefCell<ManaLedger>>,
    pending_spawns: Rc<RefCell<Vec<ActiveEffect<W, A>>>>,
    config: EngineConfig,
}

impl<W: 'static, A: 'static> SpellEngine<W, A> {
    pub fn new(registry: Arc<EffectRegistry<W, A>>, config: EngineConfig) -> Self {
        Self {
            registry,
            scheduler: TickScheduler::new(),
            tracker: EffectTracker::new(),
            mana: Rc::new(RefCell::new(ManaLedger::new())),
            pending_spawns: Rc::new(RefCell::new(Vec::new())),
            config,
        }
    }

    /// Request a cast of the given combination by `caster`.
    ///
    /// Resolves the definition, applies the stability policy, checks the
    /// `can_apply` gate, charges mana, and schedules the application after
    /// the combination's cast delay. The returned outcome reports which
    /// gate refused, if any; presentation of refusals is the host's job.
    pub fn cast(
        &mut self,
        world: &mut W,
        caster_id: CasterId,
        caster: A,
        modifiers: &ModifierSet,
        kinds: &KindSet,
    ) -> CastOutcome {
        let Some(definition) = self.registry.lookup(modifiers, kinds).cloned() else {
            tracing::debug!(?modifiers, ?kinds, "no effect registered for combination");
            return CastOutcome::UnknownCombination;
        };

        if !definition.is_stable() {
            match self.config.stability_policy {
                StabilityPolicy::Block => {
                    tracing::debug!(name = definition.name(), "unstable combination refused");
                    return CastOutcome::Unstable;
                }
                StabilityPolicy::WarnOnly => {
                    tracing::warn!(name = definition.name(), "casting unstable combination");
                }
            }
        }

        if !definition
            .behavior()
            .can_apply(world, &caster, definition.modifiers(), definition.kinds())
        {
            return CastOutcome::NotApplicable;
        }

        let cost = rules::mana_cost(modifiers, kinds);
        {
            let mut ledger = self.mana.borrow_mut();
            let pool = ledger.ensure(caster_id, self.config.max_mana);
            if !pool.try_consume(cost) {
                return CastOutcome::InsufficientMana {
                    required: cost,
                    available: pool.current(),
                };
            }
        }
        self.start_regen_if_needed(caster_id);

        let delay = definition.cast_delay_ticks();
        let spawns = Rc::clone(&self.pending_spawns);
        self.scheduler.schedule(world, delay as i32, move |world| {
            let applied = definition.behavior().apply(
                world,
                &caster,
                definition.modifiers(),
                definition.kinds(),
            )?;
            if !applied {
                tracing::debug!(name = definition.name(), "spell fizzled");
                return Ok(());
            }

            let duration = definition.active_duration_ticks();
            if duration > 0 {
                match ActiveEffect::new(
                    caster,
                    Arc::clone(definition.behavior()),
                    definition.modifiers().clone(),
                    definition.kinds().clone(),
                    duration as i32,
                ) {
                    Ok(instance) => spawns.borrow_mut().push(instance),
                    // Unreachable while registration validates tag sets
                    Err(error) => tracing::warn!(%error, "could not track active effect"),
                }
            }
            Ok(())
        });

        CastOutcome::Scheduled {
            cast_delay_ticks: delay,
        }
    }

    /// Advance the engine by one simulation tick: fire due tasks, register
    /// any effects they applied, then advance every active effect.
    pub fn tick(&mut self, world: &mut W) {
        self.scheduler.tick(world);
        self.drain_spawns();
        self.tracker.tick(world);
    }

    fn drain_spawns(&mut self) {
        let mut spawns = self.pending_spawns.borrow_mut();
        for instance in spawns.drain(..) {
            self.tracker.add(instance);
        }
    }

    fn start_regen_if_needed(&mut self, caster_id: CasterId) {
        {
            let mut ledger = self.mana.borrow_mut();
            let Some(pool) = ledger.pool_mut(caster_id) else {
                return;
            };
            if pool.is_full() || pool.is_regenerating() {
                return;
            }
            pool.set_regenerating(true);
        }

        let amount = self.config.mana_regen_amount;
        let ledger = Rc::clone(&self.mana);
        let task = self.scheduler.schedule_repeating(
            self.config.mana_regen_interval_ticks as i32,
            move |_world| {
                let mut ledger = ledger.borrow_mut();
                let Some(pool) = ledger.pool_mut(caster_id) else {
                    return Ok(Repeat::Stop);
                };
                pool.add(amount);
                if pool.is_full() {
                    pool.set_regenerating(false);
                    Ok(Repeat::Stop)
                } else {
                    Ok(Repeat::Continue)
                }
            },
        );
        tracing::debug!(caster = caster_id.0, task = task.0, "mana regeneration started");
    }

    pub fn registry(&self) -> &Arc<EffectRegistry<W, A>> {
        &self.registry
    }

    /// Handle to the task queue (cloning it shares the same queue)
    pub fn scheduler(&self) -> &TickScheduler<W> {
        &self.scheduler
    }

    pub fn tracker(&self) -> &EffectTracker<W, A> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut EffectTracker<W, A> {
        &mut self.tracker
    }

    /// Snapshot of a caster's mana pool, if they have cast before
    pub fn mana_pool(&self, caster_id: CasterId) -> Option<ManaPool> {
        self.mana.borrow().pool(caster_id).copied()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drop all pending tasks, active effects, and queued spawns.
    pub fn reset(&mut self) {
        self.scheduler.clear_all();
        self.tracker.clear();
        self.pending_spawns.borrow_mut().clear();
    }
}
