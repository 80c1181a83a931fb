//! Proximity triggers: a radius around a point, optionally gated on the
//! camera facing the point.

use glam::Vec3;

use super::{complete, enter, exit, rest, TickContext};
use crate::geometry::{within_radius, Camera};
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{ProximityTrigger, TriggerConfig};
use crate::triggers::instance::TriggerInstance;

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &ProximityTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    let player = ctx.frame.player_position;
    let in_range = within_radius(player, config.position, trigger.radius)
        && facing_ok(trigger.facing_threshold, ctx.frame.camera, player, config.position);

    match (in_range, instance.player_inside) {
        (true, false) => {
            instance.last_activation_ms = Some(ctx.now_ms);
            enter(config, instance, callbacks, ctx);
            if config.one_shot {
                complete(config, instance, ctx);
            }
        }
        (false, true) => {
            exit(config, instance, callbacks, ctx);
            rest(config, instance, ctx);
        }
        _ => {}
    }
}

/// Facing gate. Without a threshold it always passes; with one it needs a
/// camera whose forward vector has at least `threshold` dot product with the
/// player-to-trigger direction.
fn facing_ok(threshold: Option<f32>, camera: Option<Camera>, player: Vec3, target: Vec3) -> bool {
    let Some(threshold) = threshold else {
        return true;
    };
    let Some(camera) = camera else {
        return false;
    };
    match (target - player).try_normalize() {
        Some(direction) => camera.facing_dot(direction).is_some_and(|dot| dot >= threshold),
        // Standing on the point counts as facing it.
        None => true,
    }
}
