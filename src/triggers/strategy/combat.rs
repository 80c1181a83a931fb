//! Combat triggers: clear the enemies in a zone.
//!
//! Completion policy, first match wins:
//!
//! 1. named enemies: every listed id has been killed;
//! 2. `min_kills`: at least that many kills and no living enemy in the zone;
//! 3. otherwise: at least one kill and no living enemy in the zone.

use glam::Vec3;
use tracing::debug;

use super::{fire, set_state, TickContext};
use crate::core::EntityId;
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{CombatTrigger, TriggerConfig};
use crate::triggers::event::TriggerEvent;
use crate::triggers::instance::{TriggerInstance, TriggerState};

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &CombatTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    let inside = trigger.volume.contains(config.position, ctx.frame.player_position);
    if inside != instance.player_inside {
        instance.player_inside = inside;
        if inside {
            instance.enter_time_ms = ctx.now_ms;
            set_state(&config.id, instance, TriggerState::Active, ctx.observer);
        } else {
            set_state(&config.id, instance, TriggerState::Idle, ctx.observer);
        }
    }

    let kills = instance.killed_enemies.len();
    let cleared = match (trigger.named_enemies(), trigger.min_kills) {
        (Some(named), _) => named.iter().all(|id| instance.killed_enemies.contains(id)),
        (None, Some(min_kills)) => kills >= min_kills && !living_enemy_inside(config, trigger, ctx),
        (None, None) => kills > 0 && !living_enemy_inside(config, trigger, ctx),
    };

    if cleared {
        callbacks.combat_complete(&config.id, kills);
        ctx.emit(TriggerEvent::CombatComplete {
            trigger_id: config.id.clone(),
            enemies_killed: kills,
        });
        fire(config, instance, ctx);
    }
}

fn living_enemy_inside(config: &TriggerConfig, trigger: &CombatTrigger, ctx: &mut TickContext) -> bool {
    ctx.frame
        .enemies(ctx.hooks)
        .iter()
        .any(|enemy| enemy.alive && trigger.volume.contains(config.position, enemy.position))
}

/// Record a kill at `position` if it falls inside this trigger's zone.
pub(crate) fn record_kill(
    config: &TriggerConfig,
    trigger: &CombatTrigger,
    instance: &mut TriggerInstance,
    enemy: EntityId,
    position: Vec3,
) -> bool {
    if instance.state.is_dormant() || !trigger.volume.contains(config.position, position) {
        return false;
    }
    if instance.killed_enemies.insert(enemy) {
        debug!(trigger = %config.id, %enemy, kills = instance.killed_enemies.len(), "kill recorded");
    }
    true
}
