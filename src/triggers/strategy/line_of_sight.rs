//! Line-of-sight triggers: keep the camera on a target for a while.

use super::{fire, set_state, TickContext};
use crate::core::TIME_EPSILON_MS;
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{LineOfSightTrigger, TriggerConfig};
use crate::triggers::event::TriggerEvent;
use crate::triggers::instance::{TriggerInstance, TriggerState};

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &LineOfSightTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    let Some(camera) = ctx.frame.camera else {
        return;
    };
    let target = trigger.target_position;
    let looking = camera.position.distance(target) <= trigger.max_distance
        && camera
            .angle_to(target)
            .is_some_and(|angle| angle <= trigger.angle_threshold_rad);

    if looking {
        if !instance.player_inside {
            instance.player_inside = true;
            instance.enter_time_ms = ctx.now_ms;
        }
        set_state(&config.id, instance, TriggerState::Active, ctx.observer);

        instance.look_duration_ms += ctx.delta_ms;
        if instance.look_duration_ms + TIME_EPSILON_MS >= trigger.look_duration_ms {
            callbacks.look(&config.id);
            ctx.emit(TriggerEvent::LineOfSight {
                trigger_id: config.id.clone(),
                target_position: target,
            });
            instance.look_duration_ms = 0.0;
            fire(config, instance, ctx);
        }
    } else {
        let had_progress = instance.look_duration_ms > 0.0;
        instance.look_duration_ms = 0.0;
        instance.player_inside = false;
        set_state(&config.id, instance, TriggerState::Idle, ctx.observer);
        if had_progress {
            callbacks.look_away(&config.id);
        }
    }
}
