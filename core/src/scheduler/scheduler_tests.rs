//! Tests for scheduler timing, ordering, and failure containment
//!
//! Verifies that:
//! - Delay <= 0 runs synchronously and never enqueues
//! - Tasks fire exactly once after their full delay, FIFO within a tick
//! - Tasks scheduled mid-tick wait for the next tick
//! - Failures are contained and repeating tasks re-arm, stop, and cancel

use std::cell::RefCell;
use std::rc::Rc;

use crate::effects::EffectError;

use super::{Repeat, TickScheduler};

/// Test context: a plain event log the tasks append to
type World = Vec<&'static str>;

#[test]
fn immediate_task_runs_synchronously() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    let id = scheduler.schedule(&mut world, 0, |w| {
        w.push("now");
        Ok(())
    });

    assert_eq!(id, None);
    assert_eq!(world, vec!["now"]);
    assert_eq!(scheduler.count_pending(), 0);

    scheduler.schedule(&mut world, -5, |w| {
        w.push("also now");
        Ok(())
    });
    assert_eq!(world, vec!["now", "also now"]);
    assert_eq!(scheduler.count_pending(), 0);
}

#[test]
fn task_fires_exactly_once_after_full_delay() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule(&mut world, 3, |w| {
        w.push("fired");
        Ok(())
    });

    scheduler.tick(&mut world);
    scheduler.tick(&mut world);
    assert!(world.is_empty(), "fired too early");
    assert_eq!(scheduler.count_pending(), 1);

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["fired"]);
    assert_eq!(scheduler.count_pending(), 0);

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["fired"], "fired more than once");
}

#[test]
fn same_tick_tasks_fire_in_fifo_order() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule(&mut world, 2, |w| {
        w.push("first");
        Ok(())
    });
    scheduler.schedule(&mut world, 2, |w| {
        w.push("second");
        Ok(())
    });
    scheduler.schedule(&mut world, 1, |w| {
        w.push("early");
        Ok(())
    });

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["early"]);

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["early", "first", "second"]);
}

#[test]
fn tasks_scheduled_during_tick_wait_for_next_tick() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    let handle = scheduler.clone();
    scheduler.schedule(&mut world, 1, move |w| {
        w.push("outer");
        handle.schedule(w, 1, |w| {
            w.push("inner");
            Ok(())
        });
        Ok(())
    });

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["outer"], "inner task must not fire on the tick that scheduled it");
    assert_eq!(scheduler.count_pending(), 1);

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["outer", "inner"]);
    assert_eq!(scheduler.count_pending(), 0);
}

#[test]
fn failing_task_does_not_disturb_the_others() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule(&mut world, 1, |_| Err(EffectError::new("backfired")));
    scheduler.schedule(&mut world, 1, |w| {
        w.push("survivor");
        Ok(())
    });

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["survivor"]);
    assert_eq!(scheduler.count_pending(), 0);
}

#[test]
fn immediate_task_failure_is_contained() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    let id = scheduler.schedule(&mut world, 0, |_| Err(EffectError::new("backfired")));
    assert_eq!(id, None);
    assert_eq!(scheduler.count_pending(), 0);
}

#[test]
fn repeating_task_rearms_until_stopped() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();
    let runs = Rc::new(RefCell::new(0u32));

    let counter = Rc::clone(&runs);
    scheduler.schedule_repeating(2, move |_| {
        *counter.borrow_mut() += 1;
        if *counter.borrow() >= 3 {
            Ok(Repeat::Stop)
        } else {
            Ok(Repeat::Continue)
        }
    });

    for _ in 0..6 {
        scheduler.tick(&mut world);
    }
    assert_eq!(*runs.borrow(), 3);
    assert_eq!(scheduler.count_pending(), 0);

    // A stopped task stays stopped
    for _ in 0..4 {
        scheduler.tick(&mut world);
    }
    assert_eq!(*runs.borrow(), 3);
}

#[test]
fn repeating_task_fires_once_per_interval() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();
    let runs = Rc::new(RefCell::new(0u32));

    let counter = Rc::clone(&runs);
    scheduler.schedule_repeating(3, move |_| {
        *counter.borrow_mut() += 1;
        Ok(Repeat::Continue)
    });

    for tick in 1..=9 {
        scheduler.tick(&mut world);
        assert_eq!(*runs.borrow(), tick / 3, "wrong run count after tick {tick}");
    }
}

#[test]
fn failing_repeating_task_is_dropped() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule_repeating(1, |_| Err(EffectError::new("backfired")));

    scheduler.tick(&mut world);
    assert_eq!(scheduler.count_pending(), 0);
}

#[test]
fn repeating_interval_is_clamped_to_one() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule_repeating(0, |w| {
        w.push("ran");
        Ok(Repeat::Stop)
    });

    scheduler.tick(&mut world);
    assert_eq!(world, vec!["ran"]);
}

#[test]
fn cancel_removes_a_pending_task() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    let id = scheduler
        .schedule(&mut world, 5, |w| {
            w.push("never");
            Ok(())
        })
        .unwrap();

    assert!(scheduler.cancel(id));
    assert_eq!(scheduler.count_pending(), 0);
    assert!(!scheduler.cancel(id), "second cancel must be a no-op");

    for _ in 0..10 {
        scheduler.tick(&mut world);
    }
    assert!(world.is_empty());
}

#[test]
fn clear_all_drops_everything() {
    let scheduler: TickScheduler<World> = TickScheduler::new();
    let mut world = World::new();

    scheduler.schedule(&mut world, 2, |w| {
        w.push("a");
        Ok(())
    });
    scheduler.schedule(&mut world, 4, |w| {
        w.push("b");
        Ok(())
    });
    scheduler.schedule_repeating(1, |_| Ok(Repeat::Continue));
    assert_eq!(scheduler.count_pending(), 3);

    scheduler.clear_all();
    assert_eq!(scheduler.count_pending(), 0);

    for _ in 0..5 {
        scheduler.tick(&mut world);
    }
    assert!(world.is_empty());
}
