//! Interaction triggers: press (or hold) the interact key while in range.

use tracing::debug;

use super::{enter, exit, fire, set_state, TickContext};
use crate::core::TIME_EPSILON_MS;
use crate::geometry::within_radius;
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{InteractionTrigger, TriggerConfig};
use crate::triggers::event::TriggerEvent;
use crate::triggers::instance::{TriggerInstance, TriggerState};

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &InteractionTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    was_pressed: bool,
    ctx: &mut TickContext,
) {
    let in_range = within_radius(ctx.frame.player_position, config.position, trigger.radius);
    let pressed = ctx.frame.interact_pressed;

    if in_range && !instance.player_inside {
        enter(config, instance, callbacks, ctx);
    } else if !in_range && instance.player_inside {
        cancel(config, instance, callbacks);
        exit(config, instance, callbacks, ctx);
        set_state(&config.id, instance, TriggerState::Idle, ctx.observer);
    }

    if in_range {
        match trigger.hold_time_ms() {
            None => {
                if pressed && !was_pressed {
                    complete_interaction(config, instance, callbacks, ctx);
                }
            }
            Some(hold_ms) => {
                if pressed {
                    instance.interaction_held_ms += ctx.delta_ms;
                    instance.interaction_progress = (instance.interaction_held_ms / hold_ms).min(1.0) as f32;
                    if instance.interaction_held_ms + TIME_EPSILON_MS >= hold_ms {
                        complete_interaction(config, instance, callbacks, ctx);
                    }
                } else {
                    cancel(config, instance, callbacks);
                }
            }
        }
    }
}

fn complete_interaction(
    config: &TriggerConfig,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    callbacks.interact(&config.id);
    ctx.emit(TriggerEvent::Interact {
        trigger_id: config.id.clone(),
    });
    if config.one_shot {
        instance.interaction_held_ms = 0.0;
        instance.interaction_progress = 1.0;
    } else {
        instance.clear_interaction();
    }
    fire(config, instance, ctx);
}

/// Abandon a hold in progress.
fn cancel(config: &TriggerConfig, instance: &mut TriggerInstance, callbacks: &mut TriggerCallbacks) {
    if instance.interaction_held_ms <= 0.0 {
        return;
    }
    debug!(trigger = %config.id, progress = instance.interaction_progress, "interaction cancelled");
    instance.clear_interaction();
    callbacks.interact_cancel(&config.id);
}
