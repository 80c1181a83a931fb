//! Per-tick trigger evaluation.
//!
//! [`tick`] runs the shared skeleton for one trigger: dormancy check,
//! condition gate, cooldown gate, then dispatch to the strategy for the
//! trigger's kind. Strategies mutate the instance, run handlers and emit
//! events through a [`TickContext`].

mod collectible;
mod combat;
mod interaction;
mod line_of_sight;
mod proximity;
mod volume;

pub(crate) use collectible::record_pickup;
pub(crate) use combat::record_kill;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::core::{SystemConfig, TriggerId};
use crate::host::{FrameInput, HostHooks};

use super::callbacks::{TriggerCallbacks, TriggerObserver};
use super::condition::{ConditionContext, ConditionEvaluator};
use super::config::{TriggerConfig, TriggerKind};
use super::event::{EventSink, TriggerEvent};
use super::instance::{TriggerInstance, TriggerState};
use super::registry::TriggerEntry;

/// Everything a strategy may read or write during one tick.
pub(crate) struct TickContext<'a> {
    pub now_ms: f64,
    pub delta_ms: f64,
    pub frame: &'a mut FrameInput,
    pub hooks: &'a HostHooks,
    pub settings: &'a SystemConfig,
    pub sink: &'a mut dyn EventSink,
    pub completed: &'a mut FxHashSet<TriggerId>,
    pub observer: &'a mut Option<Box<dyn TriggerObserver>>,
}

impl TickContext<'_> {
    pub fn emit(&mut self, event: TriggerEvent) {
        trace!(event = %event, "trigger event");
        self.sink.emit(event);
    }
}

/// Evaluate one trigger for the current tick.
pub(crate) fn tick(entry: &mut TriggerEntry, ctx: &mut TickContext) {
    // Key edges are sampled every tick, including ticks the body is skipped.
    let was_pressed = std::mem::replace(&mut entry.instance.interact_was_pressed, ctx.frame.interact_pressed);

    if entry.instance.state.is_dormant() {
        return;
    }

    if let Some(conditions) = &entry.config.conditions {
        let gate = ConditionContext {
            hooks: ctx.hooks,
            player_health: ctx.frame.player_health,
            completed: &*ctx.completed,
        };
        if !ConditionEvaluator::all_satisfied(conditions, &gate) {
            return;
        }
    }

    if entry.instance.state == TriggerState::Cooldown {
        let cooldown = entry.config.effective_cooldown_ms().unwrap_or(0.0);
        if !entry.instance.cooldown_elapsed(ctx.now_ms, cooldown) {
            return;
        }
        let next = if entry.instance.player_inside {
            TriggerState::Active
        } else {
            TriggerState::Idle
        };
        set_state(&entry.config.id, &mut entry.instance, next, ctx.observer);
    }

    let config = &entry.config;
    let instance = &mut entry.instance;
    let callbacks = &mut entry.callbacks;

    match &config.kind {
        TriggerKind::Volume(t) => volume::update(config, t, instance, callbacks, ctx),
        TriggerKind::Proximity(t) => proximity::update(config, t, instance, callbacks, ctx),
        TriggerKind::Interaction(t) => interaction::update(config, t, instance, callbacks, was_pressed, ctx),
        TriggerKind::LineOfSight(t) => line_of_sight::update(config, t, instance, callbacks, ctx),
        TriggerKind::Combat(t) => combat::update(config, t, instance, callbacks, ctx),
        TriggerKind::Collectible(t) => collectible::update(config, t, instance, callbacks, ctx),
    }
}

/// Move a trigger to `state`, notifying the observer on change.
pub(crate) fn set_state(
    id: &TriggerId,
    instance: &mut TriggerInstance,
    state: TriggerState,
    observer: &mut Option<Box<dyn TriggerObserver>>,
) {
    if instance.state == state {
        return;
    }
    debug!(trigger = %id, from = %instance.state, to = %state, "trigger state changed");
    instance.state = state;
    if let Some(observer) = observer.as_mut() {
        observer.state_changed(id, state);
    }
}

/// Mark a trigger completed. Terminal until reset.
fn complete(config: &TriggerConfig, instance: &mut TriggerInstance, ctx: &mut TickContext) {
    set_state(&config.id, instance, TriggerState::Completed, ctx.observer);
    ctx.completed.insert(config.id.clone());
}

/// State a repeatable trigger returns to after firing or disengaging.
///
/// Cooldown always runs from the last firing, so a trigger that disengages
/// after its cooldown has already elapsed goes straight back to idle.
fn rest(config: &TriggerConfig, instance: &mut TriggerInstance, ctx: &mut TickContext) {
    let cooling = config
        .effective_cooldown_ms()
        .is_some_and(|cooldown| !instance.cooldown_elapsed(ctx.now_ms, cooldown));
    let next = if cooling {
        TriggerState::Cooldown
    } else if instance.player_inside {
        TriggerState::Active
    } else {
        TriggerState::Idle
    };
    set_state(&config.id, instance, next, ctx.observer);
}

/// Record a firing, then complete (one-shot) or rest (repeatable).
fn fire(config: &TriggerConfig, instance: &mut TriggerInstance, ctx: &mut TickContext) {
    debug!(trigger = %config.id, kind = %config.trigger_type(), "trigger fired");
    instance.last_activation_ms = Some(ctx.now_ms);
    if config.one_shot {
        complete(config, instance, ctx);
    } else {
        rest(config, instance, ctx);
    }
}

/// Rising edge shared by the spatial strategies.
fn enter(
    config: &TriggerConfig,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    instance.player_inside = true;
    instance.enter_time_ms = ctx.now_ms;
    set_state(&config.id, instance, TriggerState::Active, ctx.observer);
    callbacks.enter(&config.id);
    ctx.emit(TriggerEvent::Enter {
        trigger_id: config.id.clone(),
        trigger_type: config.trigger_type(),
    });
}

/// Falling edge shared by the spatial strategies. Leaves the state to the caller.
fn exit(
    config: &TriggerConfig,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    instance.player_inside = false;
    callbacks.exit(&config.id);
    ctx.emit(TriggerEvent::Exit {
        trigger_id: config.id.clone(),
        trigger_type: config.trigger_type(),
    });
}
