//! Volume triggers: enter, stay and exit edges on a box, sphere or cylinder.

use super::{complete, enter, exit, rest, set_state, TickContext};
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{TriggerConfig, VolumeTrigger};
use crate::triggers::event::TriggerEvent;
use crate::triggers::instance::{TriggerInstance, TriggerState};

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &VolumeTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    let inside = trigger.volume.contains(config.position, ctx.frame.player_position);

    match (inside, instance.player_inside) {
        (true, false) => {
            instance.last_activation_ms = Some(ctx.now_ms);
            enter(config, instance, callbacks, ctx);
            // A stay handler keeps a one-shot volume alive until the player leaves.
            if config.one_shot && !callbacks.has_stay() {
                complete(config, instance, ctx);
            }
        }
        (false, true) => {
            exit(config, instance, callbacks, ctx);
            if config.one_shot {
                complete(config, instance, ctx);
            } else {
                rest(config, instance, ctx);
            }
        }
        (true, true) => {
            set_state(&config.id, instance, TriggerState::Active, ctx.observer);
            let dwell_ms = ctx.now_ms - instance.enter_time_ms;
            callbacks.stay(&config.id, dwell_ms);
            if ctx.settings.emit_stay_events {
                ctx.emit(TriggerEvent::Stay {
                    trigger_id: config.id.clone(),
                    trigger_type: config.trigger_type(),
                    duration_ms: dwell_ms,
                });
            }
        }
        (false, false) => {}
    }
}
