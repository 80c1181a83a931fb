//! The trigger engine facade.
//!
//! `TriggerSystem` owns every trigger, group and completion record for one
//! level. The host wires in getters, registers content, forwards kill and
//! pickup notifications, and calls [`TriggerSystem::update`] once per
//! simulation tick.

use glam::Vec3;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::core::{EntityId, GroupId, Result, SystemConfig, TriggerId};
use crate::geometry::Camera;
use crate::host::{EnemySnapshot, FrameInput, HostHooks};

use super::callbacks::{GroupCallback, TriggerCallbacks, TriggerObserver};
use super::config::{TriggerConfig, TriggerKind};
use super::event::{EventQueue, EventSink, TriggerEvent};
use super::group::{GroupMode, TriggerGroup, TriggerGroupConfig};
use super::instance::{TriggerInstance, TriggerState};
use super::level::LevelTriggers;
use super::registry::{TriggerEntry, TriggerRegistry};
use super::strategy::{self, TickContext};

/// Scripted-event engine for one level.
///
/// ```
/// use glam::Vec3;
/// use level_triggers::triggers::{TriggerConfig, TriggerEvent, TriggerSystem};
/// use level_triggers::geometry::VolumeShape;
///
/// let mut system = TriggerSystem::new();
/// system.set_player_position_getter(|| Vec3::new(1.0, 0.0, 0.0));
/// system.create_trigger(
///     TriggerConfig::volume("hall", Vec3::ZERO, VolumeShape::Sphere, 5.0).one_shot(),
/// );
///
/// system.update(0.016);
///
/// assert!(system.is_trigger_complete("hall"));
/// assert!(matches!(system.drain_events()[0], TriggerEvent::Enter { .. }));
/// ```
pub struct TriggerSystem<S: EventSink = EventQueue> {
    settings: SystemConfig,
    registry: TriggerRegistry,
    groups: Vec<TriggerGroup>,
    completed: FxHashSet<TriggerId>,
    hooks: HostHooks,
    observer: Option<Box<dyn TriggerObserver>>,
    sink: S,
    now_ms: f64,
}

impl TriggerSystem<EventQueue> {
    /// Create an engine that buffers events in an [`EventQueue`].
    pub fn new() -> Self {
        Self::with_sink(EventQueue::new())
    }

    /// Take every buffered event, oldest first.
    pub fn drain_events(&mut self) -> Vec<TriggerEvent> {
        self.sink.drain()
    }
}

impl Default for TriggerSystem<EventQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> TriggerSystem<S> {
    /// Create an engine that emits into `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self {
            settings: SystemConfig::default(),
            registry: TriggerRegistry::new(),
            groups: Vec::new(),
            completed: FxHashSet::default(),
            hooks: HostHooks::new(),
            observer: None,
            sink,
            now_ms: 0.0,
        }
    }

    /// Replace the engine settings (builder pattern).
    #[must_use]
    pub fn with_config(mut self, settings: SystemConfig) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SystemConfig {
        &self.settings
    }

    // === Host wiring ===

    /// Camera used by line-of-sight triggers and proximity facing checks.
    pub fn set_camera(&mut self, getter: impl Fn() -> Camera + 'static) {
        self.hooks.set_camera(getter);
    }

    /// Without this getter `update` does nothing at all.
    pub fn set_player_position_getter(&mut self, getter: impl Fn() -> Vec3 + 'static) {
        self.hooks.set_player_position(getter);
    }

    /// Health read by the `min_health`/`max_health` conditions.
    pub fn set_player_health_getter(&mut self, getter: impl Fn() -> f32 + 'static) {
        self.hooks.set_player_health(getter);
    }

    /// Predicate for the `required_item` condition.
    pub fn set_player_inventory_checker(&mut self, checker: impl Fn(&str) -> bool + 'static) {
        self.hooks.set_inventory(checker);
    }

    /// Predicate for the `required_flag` condition.
    pub fn set_flag_checker(&mut self, checker: impl Fn(&str) -> bool + 'static) {
        self.hooks.set_flags(checker);
    }

    /// Roster used by combat triggers to look for living enemies in a zone.
    pub fn set_enemy_position_getter(&mut self, getter: impl Fn() -> Vec<EnemySnapshot> + 'static) {
        self.hooks.set_enemies(getter);
    }

    /// Interact key state, sampled once per tick.
    pub fn set_interact_key_checker(&mut self, checker: impl Fn() -> bool + 'static) {
        self.hooks.set_interact_key(checker);
    }

    /// Evaluator for the `custom` condition key.
    pub fn set_custom_condition_evaluator(&mut self, evaluator: impl Fn(&str) -> bool + 'static) {
        self.hooks.set_custom_condition(evaluator);
    }

    /// Install a state-change observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl TriggerObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // === Trigger lifecycle ===

    /// Register a trigger with no handlers.
    pub fn create_trigger(&mut self, config: TriggerConfig) {
        self.create_trigger_with(config, TriggerCallbacks::new());
    }

    /// Register a trigger with a handler table.
    ///
    /// An existing trigger with the same id is replaced: its runtime state and
    /// completion record are discarded.
    pub fn create_trigger_with(&mut self, config: TriggerConfig, callbacks: TriggerCallbacks) {
        let id = config.id.clone();
        let kind = config.trigger_type();
        if self.registry.insert(TriggerEntry::new(config, callbacks)).is_some() {
            warn!(trigger = %id, "duplicate trigger id, replacing existing trigger");
            self.completed.remove(&id);
        }
        debug!(trigger = %id, %kind, "trigger created");
    }

    /// Register several triggers in order.
    pub fn create_triggers(&mut self, configs: impl IntoIterator<Item = TriggerConfig>) {
        for config in configs {
            self.create_trigger(config);
        }
    }

    /// Replace a trigger's handler table. Returns `false` for an unknown id.
    pub fn set_callbacks(&mut self, id: &str, callbacks: TriggerCallbacks) -> bool {
        match self.registry.get_mut(id) {
            Some(entry) => {
                entry.callbacks = callbacks;
                true
            }
            None => false,
        }
    }

    /// Unregister a trigger. Unknown ids are ignored.
    pub fn remove_trigger(&mut self, id: &str) -> bool {
        let Some(entry) = self.registry.remove(id) else {
            debug!(trigger = id, "remove of unknown trigger ignored");
            return false;
        };
        self.completed.remove(id);
        if let Some(observer) = self.observer.as_mut() {
            observer.trigger_removed(&entry.config.id);
        }
        debug!(trigger = %entry.config.id, "trigger removed");
        true
    }

    /// Remove every trigger and group and forget all completions.
    pub fn clear_triggers(&mut self) {
        let removed = self.registry.clear();
        if let Some(observer) = self.observer.as_mut() {
            for id in &removed {
                observer.trigger_removed(id);
            }
        }
        self.groups.clear();
        self.completed.clear();
        debug!(removed = removed.len(), "triggers cleared");
    }

    /// Validate a level document, then register all of its content.
    ///
    /// Nothing is installed if any declaration is invalid. Returns the number
    /// of triggers registered.
    pub fn load_level(&mut self, level: LevelTriggers) -> Result<usize> {
        if let Err(err) = level.validate() {
            warn!(error = %err, "level rejected");
            return Err(err);
        }
        let count = level.triggers.len();
        self.create_triggers(level.triggers);
        for group in level.groups {
            self.create_group(group);
        }
        debug!(triggers = count, "level loaded");
        Ok(count)
    }

    // === Groups ===

    pub fn create_group(&mut self, config: TriggerGroupConfig) {
        self.install_group(config, None);
    }

    /// Register a group with a completion handler.
    pub fn create_group_with(
        &mut self,
        config: TriggerGroupConfig,
        on_complete: impl FnMut(&GroupId, GroupMode) + 'static,
    ) {
        self.install_group(config, Some(Box::new(on_complete)));
    }

    fn install_group(&mut self, config: TriggerGroupConfig, callback: Option<GroupCallback>) {
        if let Some(index) = self.groups.iter().position(|g| g.config.id == config.id) {
            warn!(group = %config.id, "duplicate group id, replacing existing group");
            self.groups.remove(index);
        }
        debug!(group = %config.id, mode = %config.mode, members = config.trigger_ids.len(), "group created");
        self.groups.push(TriggerGroup::new(config, callback));
    }

    /// Has the group's completion predicate ever held? `false` for unknown ids.
    #[must_use]
    pub fn is_group_complete(&self, id: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.config.id.as_str() == id && g.completed)
    }

    // === Trigger control ===

    /// Re-enable a disabled trigger. A trigger that completed before it was
    /// disabled stays completed.
    pub fn enable_trigger(&mut self, id: &str) -> bool {
        let Some(entry) = self.registry.get_mut(id) else {
            return false;
        };
        if entry.instance.state == TriggerState::Disabled {
            let next = if self.completed.contains(id) {
                TriggerState::Completed
            } else {
                TriggerState::Idle
            };
            strategy::set_state(&entry.config.id, &mut entry.instance, next, &mut self.observer);
        }
        true
    }

    /// Stop evaluating a trigger. Progress counters are kept.
    pub fn disable_trigger(&mut self, id: &str) -> bool {
        let Some(entry) = self.registry.get_mut(id) else {
            return false;
        };
        entry.instance.player_inside = false;
        strategy::set_state(&entry.config.id, &mut entry.instance, TriggerState::Disabled, &mut self.observer);
        true
    }

    /// Clear a trigger's progress and completion, returning it to idle.
    pub fn reset_trigger(&mut self, id: &str) -> bool {
        let Some(entry) = self.registry.get_mut(id) else {
            return false;
        };
        let previous = entry.instance.state;
        entry.instance.reset();
        entry.instance.state = previous;
        strategy::set_state(&entry.config.id, &mut entry.instance, TriggerState::Idle, &mut self.observer);
        self.completed.remove(id);
        debug!(trigger = id, "trigger reset");
        true
    }

    // === Queries ===

    #[must_use]
    pub fn is_trigger_complete(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Ids of triggers currently in the `Active` state, in registration order.
    #[must_use]
    pub fn active_triggers(&self) -> Vec<TriggerId> {
        self.registry
            .iter()
            .filter(|e| e.instance.state == TriggerState::Active)
            .map(|e| e.config.id.clone())
            .collect()
    }

    #[must_use]
    pub fn trigger_state(&self, id: &str) -> Option<TriggerState> {
        self.registry.get(id).map(|e| e.instance.state)
    }

    #[must_use]
    pub fn config(&self, id: &str) -> Option<&TriggerConfig> {
        self.registry.get(id).map(|e| &e.config)
    }

    #[must_use]
    pub fn instance(&self, id: &str) -> Option<&TriggerInstance> {
        self.registry.get(id).map(|e| &e.instance)
    }

    /// Hold progress in `[0, 1]` of an interaction trigger.
    #[must_use]
    pub fn interaction_progress(&self, id: &str) -> Option<f32> {
        let entry = self.registry.get(id)?;
        match entry.config.kind {
            TriggerKind::Interaction(_) => Some(entry.instance.interaction_progress),
            _ => None,
        }
    }

    /// Registered ids in registration order.
    #[must_use]
    pub fn trigger_ids(&self) -> &[TriggerId] {
        self.registry.ids()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Simulation clock in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // === Notifications ===

    /// Record an enemy death. Every live combat trigger whose zone contains
    /// `position` counts the kill.
    pub fn notify_enemy_killed(&mut self, enemy: EntityId, position: Vec3) {
        let mut matched = 0usize;
        self.registry.for_each_mut(|entry| {
            if let TriggerKind::Combat(combat) = &entry.config.kind {
                if strategy::record_kill(&entry.config, combat, &mut entry.instance, enemy, position) {
                    matched += 1;
                }
            }
        });
        if matched == 0 {
            debug!(%enemy, ?position, "kill outside every combat zone ignored");
        }
    }

    /// Record a collectible pickup. Every live collectible trigger tracking
    /// the id counts it.
    pub fn notify_collectible_picked_up(&mut self, collectible_id: &str) {
        let mut matched = 0usize;
        self.registry.for_each_mut(|entry| {
            if let TriggerKind::Collectible(collectible) = &entry.config.kind {
                if strategy::record_pickup(
                    &entry.config,
                    collectible,
                    &mut entry.instance,
                    &mut entry.callbacks,
                    collectible_id,
                ) {
                    matched += 1;
                }
            }
        });
        if matched == 0 {
            debug!(collectible = collectible_id, "untracked collectible ignored");
        }
    }

    // === Tick ===

    /// Advance the clock by `delta_seconds` and evaluate every trigger, then
    /// every group.
    ///
    /// Without a player-position getter the whole tick is skipped, including
    /// the clock.
    pub fn update(&mut self, delta_seconds: f32) {
        let Some(mut frame) = FrameInput::capture(&self.hooks) else {
            return;
        };
        let delta_ms = self.settings.delta_ms(delta_seconds);
        self.now_ms += delta_ms;

        let Self {
            settings,
            registry,
            groups,
            completed,
            hooks,
            observer,
            sink,
            now_ms,
        } = self;

        let mut ctx = TickContext {
            now_ms: *now_ms,
            delta_ms,
            frame: &mut frame,
            hooks,
            settings,
            sink,
            completed,
            observer,
        };
        registry.for_each_mut(|entry| strategy::tick(entry, &mut ctx));

        for group in groups.iter_mut() {
            if group.completed || !group.config.is_satisfied(ctx.completed) {
                continue;
            }
            group.completed = true;
            debug!(group = %group.config.id, mode = %group.config.mode, "group completed");
            if let Some(callback) = group.callback.as_mut() {
                callback(&group.config.id, group.config.mode);
            }
            ctx.emit(TriggerEvent::GroupComplete {
                group_id: group.config.id.clone(),
                mode: group.config.mode,
            });
        }
    }

    // === Teardown ===

    /// Drop all content and host references, handing back the sink.
    pub fn dispose(mut self) -> S {
        self.clear_triggers();
        self.hooks.clear();
        self.observer = None;
        debug!("trigger system disposed");
        self.sink
    }
}

impl<S: EventSink + std::fmt::Debug> std::fmt::Debug for TriggerSystem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerSystem")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("groups", &self.groups)
            .field("completed", &self.completed)
            .field("hooks", &self.hooks)
            .field("observer", &self.observer.is_some())
            .field("sink", &self.sink)
            .field("now_ms", &self.now_ms)
            .finish()
    }
}
