//! Collectible triggers: gather enough of a tracked item set.

use tracing::debug;

use super::{fire, TickContext};
use crate::triggers::callbacks::TriggerCallbacks;
use crate::triggers::config::{CollectibleTrigger, TriggerConfig};
use crate::triggers::event::TriggerEvent;
use crate::triggers::instance::TriggerInstance;

pub(super) fn update(
    config: &TriggerConfig,
    trigger: &CollectibleTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    ctx: &mut TickContext,
) {
    let count = instance.collected_items.len();
    if count < trigger.required() {
        return;
    }
    let Some(last) = instance.last_collected.clone() else {
        return;
    };

    callbacks.collection_complete(&config.id, count);
    ctx.emit(TriggerEvent::Collectible {
        trigger_id: config.id.clone(),
        collectible_id: last,
    });
    fire(config, instance, ctx);
}

/// Record a pickup if this trigger tracks `item`. Repeated pickups of the same
/// id count once.
pub(crate) fn record_pickup(
    config: &TriggerConfig,
    trigger: &CollectibleTrigger,
    instance: &mut TriggerInstance,
    callbacks: &mut TriggerCallbacks,
    item: &str,
) -> bool {
    if instance.state.is_dormant() || !trigger.tracks(item) {
        return false;
    }
    if instance.collected_items.insert(item.to_owned()) {
        instance.last_collected = Some(item.to_owned());
        let count = instance.collected_items.len();
        debug!(trigger = %config.id, item, count, required = trigger.required(), "collectible recorded");
        callbacks.item_collected(&config.id, item, count);
    }
    true
}
