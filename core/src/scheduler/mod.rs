//! Deferred task execution measured in ticks
//!
//! The scheduler owns pending actions and fires them after a caller-chosen
//! number of ticks. It knows nothing about spells; the actions it runs are
//! opaque closures over the host context. Cloning a `TickScheduler` yields
//! a handle to the same queue, which is how a firing action schedules
//! follow-up work (the queue is interior-mutable behind a single-thread
//! `Rc<RefCell>`; the host drives `tick` from one logical thread).
//!
//! Task failures are logged and contained here: they never propagate into
//! the tick loop, and one task's failure does not affect the others firing
//! on the same tick.

use std::cell::RefCell;
use std::rc::Rc;

use crate::effects::EffectError;

#[cfg(test)]
mod scheduler_tests;

/// Result of a scheduled action
pub type TaskResult = Result<(), EffectError>;

/// Whether a repeating task stays scheduled after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Continue,
    Stop,
}

/// Identifier for a pending task, usable with [`TickScheduler::cancel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

enum TaskAction<W> {
    Once(Box<dyn FnOnce(&mut W) -> TaskResult>),
    Repeating {
        interval_ticks: u32,
        action: Box<dyn FnMut(&mut W) -> Result<Repeat, EffectError>>,
    },
}

struct ScheduledTask<W> {
    id: TaskId,
    ticks_left: u32,
    action: TaskAction<W>,
}

struct SchedulerState<W> {
    pending: Vec<ScheduledTask<W>>,
    next_id: u64,
}

/// Fires owned actions after a caller-specified number of ticks.
///
/// Every stored task has a positive counter: a delay of zero or less runs
/// the action synchronously instead of enqueuing it.
pub struct TickScheduler<W> {
    inner: Rc<RefCell<SchedulerState<W>>>,
}

impl<W> Clone for TickScheduler<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W> TickScheduler<W> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerState {
                pending: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Schedule `action` to run after `delay_ticks` ticks.
    ///
    /// A delay of zero or less runs the action synchronously before this
    /// returns (failures logged, never propagated) and yields no id.
    pub fn schedule(
        &self,
        world: &mut W,
        delay_ticks: i32,
        action: impl FnOnce(&mut W) -> TaskResult + 'static,
    ) -> Option<TaskId> {
        if delay_ticks <= 0 {
            if let Err(error) = action(world) {
                tracing::warn!(%error, "immediate task failed");
            }
            return None;
        }

        let mut state = self.inner.borrow_mut();
        let id = TaskId(state.next_id);
        state.next_id += 1;
        state.pending.push(ScheduledTask {
            id,
            ticks_left: delay_ticks as u32,
            action: TaskAction::Once(Box::new(action)),
        });
        tracing::debug!(id = id.0, delay_ticks, pending = state.pending.len(), "scheduled task");
        Some(id)
    }

    /// Schedule `action` to run every `interval_ticks` ticks (clamped to at
    /// least 1) until it returns [`Repeat::Stop`], errors, or is cancelled.
    /// The first run happens after one full interval.
    pub fn schedule_repeating(
        &self,
        interval_ticks: i32,
        action: impl FnMut(&mut W) -> Result<Repeat, EffectError> + 'static,
    ) -> TaskId {
        let interval = interval_ticks.max(1) as u32;
        let mut state = self.inner.borrow_mut();
        let id = TaskId(state.next_id);
        state.next_id += 1;
        state.pending.push(ScheduledTask {
            id,
            ticks_left: interval,
            action: TaskAction::Repeating {
                interval_ticks: interval,
                action: Box::new(action),
            },
        });
        tracing::debug!(id = id.0, interval, "scheduled repeating task");
        id
    }

    /// Advance every pending task by one tick and fire the ones that are
    /// due, in FIFO insertion order.
    ///
    /// Tasks scheduled by a firing action are not eligible until the next
    /// call; likewise a repeating task re-arms for its next interval rather
    /// than firing twice in one pass.
    pub fn tick(&self, world: &mut W) {
        let due = {
            let mut state = self.inner.borrow_mut();
            if state.pending.is_empty() {
                return;
            }
            std::mem::take(&mut state.pending)
        };

        let mut surviving = Vec::with_capacity(due.len());
        let mut rearmed = Vec::new();

        for mut task in due {
            task.ticks_left -= 1;
            if task.ticks_left > 0 {
                surviving.push(task);
                continue;
            }

            match task.action {
                TaskAction::Once(action) => {
                    if let Err(error) = action(world) {
                        tracing::warn!(id = task.id.0, %error, "scheduled task failed");
                    }
                }
                TaskAction::Repeating {
                    interval_ticks,
                    mut action,
                } => match action(world) {
                    Ok(Repeat::Continue) => rearmed.push(ScheduledTask {
                        id: task.id,
                        ticks_left: interval_ticks,
                        action: TaskAction::Repeating {
                            interval_ticks,
                            action,
                        },
                    }),
                    Ok(Repeat::Stop) => {}
                    Err(error) => {
                        tracing::warn!(id = task.id.0, %error, "repeating task failed; dropping it");
                    }
                },
            }
        }

        // Queue order after the pass: surviving tasks keep their positions,
        // then anything the firing actions scheduled, then re-armed repeats.
        let mut state = self.inner.borrow_mut();
        let scheduled_during_tick = std::mem::take(&mut state.pending);
        surviving.extend(scheduled_during_tick);
        surviving.extend(rearmed);
        state.pending = surviving;
    }

    /// Remove a pending task. Returns whether it was still pending.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|task| task.id != id);
        state.pending.len() != before
    }

    pub fn count_pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Drop every pending task without running it. Reset escape hatch.
    pub fn clear_all(&self) {
        let mut state = self.inner.borrow_mut();
        if !state.pending.is_empty() {
            tracing::warn!(dropped = state.pending.len(), "clearing all scheduled tasks");
        }
        state.pending.clear();
    }
}

impl<W> Default for TickScheduler<W> {
    fn default() -> Self {
        Self::new()
    }
}
