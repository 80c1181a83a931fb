//! Trigger system integration tests.
//!
//! These drive a `TriggerSystem` through the public API with a scripted host:
//! the player, camera, interact key and enemy roster are cells the tests move
//! between ticks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;
use level_triggers::geometry::{Camera, Volume, VolumeShape};
use level_triggers::host::EnemySnapshot;
use level_triggers::triggers::{
    CollectibleTrigger, CombatTrigger, ConditionSet, EventSink, InteractionTrigger,
    LineOfSightTrigger, ProximityTrigger, TriggerCallbacks, TriggerConfig, TriggerEvent,
    TriggerObserver, TriggerState, TriggerSystem,
};
use level_triggers::{EntityId, SystemConfig, TriggerId};

/// Scripted host state shared with the engine's getters.
#[derive(Clone)]
struct World {
    player: Rc<Cell<Vec3>>,
    camera: Rc<Cell<Camera>>,
    interact: Rc<Cell<bool>>,
    enemies: Rc<RefCell<Vec<EnemySnapshot>>>,
}

impl World {
    fn new() -> Self {
        Self {
            player: Rc::new(Cell::new(Vec3::new(100.0, 0.0, 0.0))),
            camera: Rc::new(Cell::new(Camera::new(Vec3::ZERO, Vec3::NEG_Z))),
            interact: Rc::new(Cell::new(false)),
            enemies: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn wire(&self, system: &mut TriggerSystem) {
        let player = Rc::clone(&self.player);
        system.set_player_position_getter(move || player.get());
        let camera = Rc::clone(&self.camera);
        system.set_camera(move || camera.get());
        let interact = Rc::clone(&self.interact);
        system.set_interact_key_checker(move || interact.get());
        let enemies = Rc::clone(&self.enemies);
        system.set_enemy_position_getter(move || enemies.borrow().clone());
    }

    fn move_to(&self, x: f32, y: f32, z: f32) {
        self.player.set(Vec3::new(x, y, z));
    }
}

fn wired() -> (TriggerSystem, World) {
    let mut system = TriggerSystem::new();
    let world = World::new();
    world.wire(&mut system);
    (system, world)
}

fn names(events: &[TriggerEvent]) -> Vec<&'static str> {
    events.iter().map(TriggerEvent::name).collect()
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut(&TriggerId) + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move |_: &TriggerId| handle.set(handle.get() + 1))
}

// === Volume ===

/// A one-shot sphere fires its enter handler exactly once, even when the
/// player leaves and comes back.
#[test]
fn test_one_shot_volume_fires_once() {
    let (mut system, world) = wired();
    let (entered, on_enter) = counter();
    system.create_trigger_with(
        TriggerConfig::volume("hall", Vec3::ZERO, VolumeShape::Sphere, 5.0).one_shot(),
        TriggerCallbacks::new().on_enter(on_enter),
    );

    world.move_to(10.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(entered.get(), 0);

    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(entered.get(), 1);
    assert!(system.is_trigger_complete("hall"));
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);

    for position in [10.0, 0.0, 10.0, 0.0] {
        world.move_to(position, 0.0, 0.0);
        system.update(0.1);
    }
    assert_eq!(entered.get(), 1);
    assert_eq!(system.trigger_state("hall"), Some(TriggerState::Completed));
    assert!(system.drain_events().is_empty());
}

/// Enter and exit alternate; stay events carry the dwell time.
#[test]
fn test_volume_hysteresis() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::volume("pool", Vec3::ZERO, VolumeShape::Sphere, 5.0));

    for x in [10.0, 0.0, 1.0, 2.0, 10.0, 0.0] {
        world.move_to(x, 0.0, 0.0);
        system.update(0.25);
    }

    let events = system.drain_events();
    let edges: Vec<_> = names(&events)
        .into_iter()
        .filter(|name| *name != "TRIGGER_STAY")
        .collect();
    assert_eq!(edges, vec!["TRIGGER_ENTER", "TRIGGER_EXIT", "TRIGGER_ENTER"]);

    let dwell: Vec<f64> = events
        .iter()
        .filter_map(|e| match e {
            TriggerEvent::Stay { duration_ms, .. } => Some(*duration_ms),
            _ => None,
        })
        .collect();
    assert_eq!(dwell, vec![250.0, 500.0]);
    assert_eq!(system.active_triggers(), vec![TriggerId::new("pool")]);
}

#[test]
fn test_stay_events_can_be_suppressed() {
    let mut system = TriggerSystem::new().with_config(SystemConfig::default().with_stay_events(false));
    let world = World::new();
    world.wire(&mut system);

    let stays = Rc::new(Cell::new(0));
    let handle = Rc::clone(&stays);
    system.create_trigger_with(
        TriggerConfig::volume("pool", Vec3::ZERO, VolumeShape::Box, Vec3::new(4.0, 4.0, 4.0)),
        TriggerCallbacks::new().on_stay(move |_, _| handle.set(handle.get() + 1)),
    );

    world.move_to(0.0, 0.0, 0.0);
    for _ in 0..4 {
        system.update(0.1);
    }

    assert_eq!(stays.get(), 3);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);
}

/// A one-shot volume with a stay handler completes when the player leaves.
#[test]
fn test_one_shot_volume_with_stay_completes_on_exit() {
    let (mut system, world) = wired();
    system.create_trigger_with(
        TriggerConfig::volume("ambush", Vec3::ZERO, VolumeShape::Cylinder, 3.0).one_shot(),
        TriggerCallbacks::new().on_stay(|_, _| {}),
    );

    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);
    system.update(0.1);
    assert_eq!(system.trigger_state("ambush"), Some(TriggerState::Active));
    assert!(!system.is_trigger_complete("ambush"));

    world.move_to(10.0, 0.0, 0.0);
    system.update(0.1);
    assert!(system.is_trigger_complete("ambush"));

    world.move_to(0.0, 0.0, 0.0);
    system.drain_events();
    system.update(0.1);
    assert!(system.drain_events().is_empty());
}

/// After firing at t, a cooldown trigger cannot fire again before t + cooldown
/// and fires on the first satisfying tick at or after it.
#[test]
fn test_volume_cooldown() {
    let (mut system, world) = wired();
    system.create_trigger(
        TriggerConfig::volume("vent", Vec3::ZERO, VolumeShape::Sphere, 5.0).with_cooldown(1000.0),
    );

    let mut enters_at = Vec::new();
    // t = 250: enter, t = 500: leave, then stand inside from t = 750 onwards.
    let path = [0.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    for x in path {
        world.move_to(x, 0.0, 0.0);
        system.update(0.25);
        for event in system.drain_events() {
            if let TriggerEvent::Enter { .. } = event {
                enters_at.push(system.now_ms());
            }
        }
    }

    assert_eq!(enters_at, vec![250.0, 1250.0]);
}

#[test]
fn test_cooldown_ignored_for_one_shot() {
    let config = TriggerConfig::proximity("p", Vec3::ZERO, 1.0).with_cooldown(500.0).one_shot();
    assert_eq!(config.effective_cooldown_ms(), None);
}

// === Proximity ===

#[test]
fn test_proximity_enter_and_exit() {
    let (mut system, world) = wired();
    let (exited, on_exit) = counter();
    system.create_trigger_with(
        TriggerConfig::proximity("npc", Vec3::ZERO, 3.0),
        TriggerCallbacks::new().on_exit(on_exit),
    );

    world.move_to(2.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(system.trigger_state("npc"), Some(TriggerState::Active));

    world.move_to(4.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(system.trigger_state("npc"), Some(TriggerState::Idle));
    assert_eq!(exited.get(), 1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER", "TRIGGER_EXIT"]);
}

#[test]
fn test_proximity_facing_threshold() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::new(
        "painting",
        Vec3::new(0.0, 0.0, -3.0),
        ProximityTrigger::new(5.0).facing(0.7),
    ));

    world.move_to(0.0, 0.0, 0.0);
    world.camera.set(Camera::new(Vec3::ZERO, Vec3::Z));
    system.update(0.1);
    assert!(system.drain_events().is_empty());

    world.camera.set(Camera::new(Vec3::ZERO, Vec3::NEG_Z));
    system.update(0.1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);
}

#[test]
fn test_proximity_facing_requires_camera() {
    let mut system = TriggerSystem::new();
    system.set_player_position_getter(|| Vec3::ZERO);
    system.create_trigger(TriggerConfig::new(
        "painting",
        Vec3::new(0.0, 0.0, -3.0),
        ProximityTrigger::new(5.0).facing(0.0),
    ));

    system.update(0.1);
    assert!(system.drain_events().is_empty());
}

// === Interaction ===

/// Holding for ten 100ms ticks fires on the tenth.
#[test]
fn test_interaction_hold_fires_when_duration_reached() {
    let (mut system, world) = wired();
    system.create_trigger(
        TriggerConfig::new(
            "lever",
            Vec3::ZERO,
            InteractionTrigger::new(2.0).with_prompt("Pull").with_hold_time(1000.0),
        )
        .one_shot(),
    );

    world.move_to(1.0, 0.0, 0.0);
    world.interact.set(true);

    for tick in 1..=9 {
        system.update(0.1);
        let fired = system
            .drain_events()
            .iter()
            .any(|e| matches!(e, TriggerEvent::Interact { .. }));
        assert!(!fired, "fired early on tick {tick}");
    }
    let progress = system.interaction_progress("lever").unwrap();
    assert!((progress - 0.9).abs() < 1e-4);

    system.update(0.1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_INTERACT"]);
    assert!(system.is_trigger_complete("lever"));
    assert_eq!(system.interaction_progress("lever"), Some(1.0));

    system.update(0.1);
    assert!(system.drain_events().is_empty());
}

#[test]
fn test_interaction_release_cancels() {
    let (mut system, world) = wired();
    let (cancelled, on_cancel) = counter();
    let (interacted, on_interact) = counter();
    system.create_trigger_with(
        TriggerConfig::new("valve", Vec3::ZERO, InteractionTrigger::new(2.0).with_hold_time(1000.0)),
        TriggerCallbacks::new()
            .on_interact_cancel(on_cancel)
            .on_interact(on_interact),
    );

    world.move_to(1.0, 0.0, 0.0);
    world.interact.set(true);
    for _ in 0..5 {
        system.update(0.1);
    }
    assert!(system.interaction_progress("valve").unwrap() > 0.4);

    world.interact.set(false);
    system.update(0.1);
    assert_eq!(system.interaction_progress("valve"), Some(0.0));
    assert_eq!(cancelled.get(), 1);

    world.interact.set(true);
    for _ in 0..10 {
        system.update(0.1);
    }
    world.interact.set(false);
    system.update(0.1);

    assert_eq!(interacted.get(), 1);
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn test_interaction_leaving_range_cancels() {
    let (mut system, world) = wired();
    let (cancelled, on_cancel) = counter();
    system.create_trigger_with(
        TriggerConfig::new("crate", Vec3::ZERO, InteractionTrigger::new(2.0).with_hold_time(1000.0)),
        TriggerCallbacks::new().on_interact_cancel(on_cancel),
    );

    world.move_to(1.0, 0.0, 0.0);
    world.interact.set(true);
    system.update(0.1);
    system.update(0.1);

    world.move_to(5.0, 0.0, 0.0);
    system.update(0.1);

    assert_eq!(cancelled.get(), 1);
    assert_eq!(system.interaction_progress("crate"), Some(0.0));
    assert_eq!(system.trigger_state("crate"), Some(TriggerState::Idle));
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER", "TRIGGER_EXIT"]);
}

/// Without a hold time, each key press fires once.
#[test]
fn test_instant_interaction_fires_on_press() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::new("door", Vec3::ZERO, InteractionTrigger::new(2.0)));

    world.move_to(1.0, 0.0, 0.0);
    system.update(0.1);

    world.interact.set(true);
    for _ in 0..3 {
        system.update(0.1);
    }
    world.interact.set(false);
    system.update(0.1);
    world.interact.set(true);
    system.update(0.1);

    let interacts = system
        .drain_events()
        .iter()
        .filter(|e| matches!(e, TriggerEvent::Interact { .. }))
        .count();
    assert_eq!(interacts, 2);
}

fn interact_count(system: &mut TriggerSystem) -> usize {
    system
        .drain_events()
        .iter()
        .filter(|e| matches!(e, TriggerEvent::Interact { .. }))
        .count()
}

/// A press made after the cooldown has elapsed is a fresh press even though
/// the key was last seen down on the firing tick.
#[test]
fn test_instant_interaction_fires_again_after_cooldown() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::new("door", Vec3::ZERO, InteractionTrigger::new(2.0)).with_cooldown(1000.0));
    world.move_to(1.0, 0.0, 0.0);

    let mut fired_at = Vec::new();
    for tick in 1..=15u32 {
        let t = tick * 100;
        world.interact.set(t == 100 || t >= 1100);
        system.update(0.1);
        if interact_count(&mut system) > 0 {
            fired_at.push(t);
        }
    }

    assert_eq!(fired_at, vec![100, 1100]);
}

/// A player still in range when the cooldown ends sees the trigger active again.
#[test]
fn test_interaction_returns_to_active_after_cooldown() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::new("door", Vec3::ZERO, InteractionTrigger::new(2.0)).with_cooldown(500.0));
    world.move_to(1.0, 0.0, 0.0);

    system.update(0.1);
    assert_eq!(system.trigger_state("door"), Some(TriggerState::Active));

    world.interact.set(true);
    system.update(0.1);
    assert_eq!(system.trigger_state("door"), Some(TriggerState::Cooldown));
    assert!(system.active_triggers().is_empty());

    world.interact.set(false);
    for _ in 0..5 {
        system.update(0.1);
    }
    assert_eq!(system.trigger_state("door"), Some(TriggerState::Active));
    assert_eq!(system.active_triggers(), vec![TriggerId::new("door")]);
}

/// Releasing the key while disabled counts, so the first press after
/// re-enabling fires.
#[test]
fn test_interaction_release_while_disabled() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::new("door", Vec3::ZERO, InteractionTrigger::new(2.0)));
    world.move_to(1.0, 0.0, 0.0);

    world.interact.set(true);
    system.update(0.1);
    assert_eq!(interact_count(&mut system), 1);

    system.disable_trigger("door");
    world.interact.set(false);
    system.update(0.1);

    system.enable_trigger("door");
    world.interact.set(true);
    system.update(0.1);
    assert_eq!(interact_count(&mut system), 1);
}

// === Line of sight ===

#[test]
fn test_line_of_sight_after_look_duration() {
    let (mut system, world) = wired();
    let target = Vec3::new(0.0, 0.0, -10.0);
    system.create_trigger(
        TriggerConfig::new("statue", target, LineOfSightTrigger::new(target).with_look_duration(500.0))
            .one_shot(),
    );

    system.update(0.25);
    assert!(system.drain_events().is_empty());
    assert_eq!(system.trigger_state("statue"), Some(TriggerState::Active));

    system.update(0.25);
    let events = system.drain_events();
    assert_eq!(
        events,
        vec![TriggerEvent::LineOfSight {
            trigger_id: TriggerId::new("statue"),
            target_position: target,
        }]
    );
    assert!(system.is_trigger_complete("statue"));
}

#[test]
fn test_line_of_sight_look_away_resets() {
    let (mut system, world) = wired();
    let (looked_away, on_look_away) = counter();
    let target = Vec3::new(0.0, 0.0, -10.0);
    system.create_trigger_with(
        TriggerConfig::new("statue", target, LineOfSightTrigger::new(target).with_look_duration(500.0)),
        TriggerCallbacks::new().on_look_away(on_look_away),
    );

    system.update(0.25);
    world.camera.set(Camera::new(Vec3::ZERO, Vec3::Z));
    system.update(0.25);
    assert_eq!(looked_away.get(), 1);
    assert_eq!(system.instance("statue").unwrap().look_duration_ms, 0.0);

    world.camera.set(Camera::new(Vec3::ZERO, Vec3::NEG_Z));
    system.update(0.25);
    assert!(system.drain_events().is_empty());
    system.update(0.25);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_LINE_OF_SIGHT"]);
}

#[test]
fn test_line_of_sight_respects_max_distance() {
    let (mut system, _world) = wired();
    let target = Vec3::new(0.0, 0.0, -50.0);
    system.create_trigger(TriggerConfig::new(
        "tower",
        target,
        LineOfSightTrigger::new(target).with_max_distance(20.0),
    ));

    for _ in 0..5 {
        system.update(0.25);
    }
    assert!(system.drain_events().is_empty());
}

/// A repeatable instant look trigger re-fires once per cooldown.
#[test]
fn test_line_of_sight_repeats_after_cooldown() {
    let (mut system, _world) = wired();
    let target = Vec3::new(0.0, 0.0, -10.0);
    system.create_trigger(
        TriggerConfig::new("beacon", target, LineOfSightTrigger::new(target)).with_cooldown(1000.0),
    );

    let mut fired_at = Vec::new();
    for _ in 0..12 {
        system.update(0.25);
        if !system.drain_events().is_empty() {
            fired_at.push(system.now_ms());
        }
    }
    assert_eq!(fired_at, vec![250.0, 1250.0, 2250.0]);
}

// === Combat ===

fn arena(trigger: CombatTrigger) -> TriggerConfig {
    TriggerConfig::new("arena", Vec3::ZERO, trigger).one_shot()
}

/// Two kills inside the zone with the roster clear completes a min-kills
/// trigger; one kill does not.
#[test]
fn test_combat_min_kills() {
    let (mut system, world) = wired();
    let (a, b) = (Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    *world.enemies.borrow_mut() = vec![EnemySnapshot::alive(EntityId(1), a), EnemySnapshot::alive(EntityId(2), b)];
    system.create_trigger(arena(CombatTrigger::new(Volume::sphere(10.0)).with_min_kills(2)));

    system.notify_enemy_killed(EntityId(1), a);
    *world.enemies.borrow_mut() = vec![EnemySnapshot::dead(EntityId(1), a), EnemySnapshot::alive(EntityId(2), b)];
    system.update(0.1);
    assert!(!system.is_trigger_complete("arena"));

    system.notify_enemy_killed(EntityId(2), b);
    *world.enemies.borrow_mut() = vec![EnemySnapshot::dead(EntityId(1), a), EnemySnapshot::dead(EntityId(2), b)];
    system.update(0.1);

    assert_eq!(
        system.drain_events(),
        vec![TriggerEvent::CombatComplete {
            trigger_id: TriggerId::new("arena"),
            enemies_killed: 2,
        }]
    );
    assert!(system.is_trigger_complete("arena"));
}

#[test]
fn test_combat_min_kills_waits_for_living_enemies() {
    let (mut system, world) = wired();
    *world.enemies.borrow_mut() = vec![EnemySnapshot::alive(EntityId(3), Vec3::new(0.0, 0.0, 1.0))];
    system.create_trigger(arena(CombatTrigger::new(Volume::sphere(10.0)).with_min_kills(1)));

    system.notify_enemy_killed(EntityId(1), Vec3::ZERO);
    system.update(0.1);
    assert!(!system.is_trigger_complete("arena"));

    world.enemies.borrow_mut().clear();
    system.update(0.1);
    assert!(system.is_trigger_complete("arena"));
}

/// Named enemies take precedence over `min_kills` and the roster.
#[test]
fn test_combat_named_enemies_take_precedence() {
    let (mut system, world) = wired();
    *world.enemies.borrow_mut() = vec![EnemySnapshot::alive(EntityId(3), Vec3::new(0.0, 0.0, 1.0))];
    system.create_trigger(arena(
        CombatTrigger::new(Volume::sphere(10.0))
            .with_enemies([EntityId(1), EntityId(2)])
            .with_min_kills(5),
    ));

    system.notify_enemy_killed(EntityId(1), Vec3::ZERO);
    system.update(0.1);
    assert!(!system.is_trigger_complete("arena"));

    system.notify_enemy_killed(EntityId(2), Vec3::ZERO);
    system.update(0.1);
    assert!(system.is_trigger_complete("arena"));
}

/// With neither named enemies nor `min_kills`, a zone with no kills never
/// completes, even when it holds no enemies at all.
#[test]
fn test_combat_implicit_policy_needs_a_kill() {
    let (mut system, _world) = wired();
    system.create_trigger(arena(CombatTrigger::new(Volume::sphere(10.0))));

    for _ in 0..5 {
        system.update(0.1);
    }
    assert!(!system.is_trigger_complete("arena"));

    system.notify_enemy_killed(EntityId(9), Vec3::new(3.0, 0.0, 0.0));
    system.update(0.1);
    assert!(system.is_trigger_complete("arena"));
}

#[test]
fn test_combat_ignores_kills_outside_zone() {
    let (mut system, _world) = wired();
    system.create_trigger(arena(CombatTrigger::new(Volume::sphere(10.0))));

    system.notify_enemy_killed(EntityId(1), Vec3::new(50.0, 0.0, 0.0));
    system.update(0.1);

    assert!(system.instance("arena").unwrap().killed_enemies.is_empty());
    assert!(!system.is_trigger_complete("arena"));
}

#[test]
fn test_combat_active_while_player_inside() {
    let (mut system, world) = wired();
    system.create_trigger(arena(CombatTrigger::new(Volume::sphere(10.0))));

    world.move_to(1.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(system.active_triggers(), vec![TriggerId::new("arena")]);
    assert!(system.drain_events().is_empty());

    world.move_to(20.0, 0.0, 0.0);
    system.update(0.1);
    assert!(system.active_triggers().is_empty());
}

// === Collectible ===

#[test]
fn test_collectible_completion() {
    let (mut system, _world) = wired();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&picked);
    system.create_trigger_with(
        TriggerConfig::new(
            "gems",
            Vec3::ZERO,
            CollectibleTrigger::new(["gem_a", "gem_b", "gem_c"]).with_required_count(2),
        )
        .one_shot(),
        TriggerCallbacks::new()
            .on_item_collected(move |_, item, count| log.borrow_mut().push((item.to_string(), count))),
    );

    system.notify_collectible_picked_up("gem_a");
    system.notify_collectible_picked_up("gem_a");
    system.notify_collectible_picked_up("coin");
    system.update(0.1);
    assert!(!system.is_trigger_complete("gems"));

    system.notify_collectible_picked_up("gem_c");
    system.update(0.1);

    assert_eq!(*picked.borrow(), vec![("gem_a".to_string(), 1), ("gem_c".to_string(), 2)]);
    assert_eq!(
        system.drain_events(),
        vec![TriggerEvent::Collectible {
            trigger_id: TriggerId::new("gems"),
            collectible_id: "gem_c".to_string(),
        }]
    );
    assert!(system.is_trigger_complete("gems"));
}

#[test]
fn test_collectible_defaults_to_every_item() {
    let (mut system, _world) = wired();
    system.create_trigger(
        TriggerConfig::new("keys", Vec3::ZERO, CollectibleTrigger::new(["red", "blue"])).one_shot(),
    );

    system.notify_collectible_picked_up("red");
    system.update(0.1);
    assert!(!system.is_trigger_complete("keys"));

    system.notify_collectible_picked_up("blue");
    system.update(0.1);
    assert!(system.is_trigger_complete("keys"));
}

// === Conditions ===

#[test]
fn test_condition_gates_trigger() {
    let (mut system, world) = wired();
    let has_key = Rc::new(Cell::new(false));
    let inventory = Rc::clone(&has_key);
    system.set_player_inventory_checker(move |item| item == "key" && inventory.get());
    system.create_trigger(
        TriggerConfig::proximity("vault", Vec3::ZERO, 3.0)
            .with_conditions(ConditionSet::new().with_item("key")),
    );

    world.move_to(1.0, 0.0, 0.0);
    system.update(0.1);
    assert!(system.drain_events().is_empty());

    has_key.set(true);
    system.update(0.1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);
}

#[test]
fn test_health_and_prerequisite_conditions() {
    let (mut system, world) = wired();
    let health = Rc::new(Cell::new(30.0));
    let getter = Rc::clone(&health);
    system.set_player_health_getter(move || getter.get());

    system.create_trigger(
        TriggerConfig::proximity("second", Vec3::ZERO, 3.0)
            .with_conditions(ConditionSet::new().after("first").with_min_health(50.0)),
    );
    system.create_trigger(TriggerConfig::proximity("first", Vec3::new(10.0, 0.0, 0.0), 3.0).one_shot());

    world.move_to(1.0, 0.0, 0.0);
    health.set(80.0);
    system.update(0.1);
    assert_eq!(system.trigger_state("second"), Some(TriggerState::Idle));

    world.move_to(9.0, 0.0, 0.0);
    system.update(0.1);
    assert!(system.is_trigger_complete("first"));

    world.move_to(1.0, 0.0, 0.0);
    health.set(30.0);
    system.update(0.1);
    assert_eq!(system.trigger_state("second"), Some(TriggerState::Idle));

    health.set(50.0);
    system.update(0.1);
    assert_eq!(system.trigger_state("second"), Some(TriggerState::Active));
}

/// A condition whose host hook is missing is not evaluated.
#[test]
fn test_unwired_condition_does_not_block() {
    let (mut system, world) = wired();
    system.create_trigger(
        TriggerConfig::proximity("gate", Vec3::ZERO, 3.0)
            .with_conditions(ConditionSet::new().with_flag("gate_open").with_custom("boss_dead")),
    );

    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);
}

// === Lifecycle ===

#[test]
fn test_disable_enable_reset() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::proximity("p", Vec3::ZERO, 3.0).one_shot());
    world.move_to(0.0, 0.0, 0.0);

    assert!(system.disable_trigger("p"));
    system.update(0.1);
    assert_eq!(system.trigger_state("p"), Some(TriggerState::Disabled));
    assert!(system.drain_events().is_empty());

    system.enable_trigger("p");
    assert_eq!(system.trigger_state("p"), Some(TriggerState::Idle));
    system.update(0.1);
    assert!(system.is_trigger_complete("p"));

    system.disable_trigger("p");
    system.enable_trigger("p");
    assert_eq!(system.trigger_state("p"), Some(TriggerState::Completed));

    system.drain_events();
    assert!(system.reset_trigger("p"));
    assert_eq!(system.trigger_state("p"), Some(TriggerState::Idle));
    assert!(!system.is_trigger_complete("p"));

    system.update(0.1);
    assert_eq!(names(&system.drain_events()), vec!["TRIGGER_ENTER"]);
}

#[test]
fn test_disable_keeps_progress() {
    let (mut system, _world) = wired();
    system.create_trigger(
        TriggerConfig::new("loot", Vec3::ZERO, CollectibleTrigger::new(["a", "b"])).one_shot(),
    );
    system.notify_collectible_picked_up("a");
    system.disable_trigger("loot");

    system.notify_collectible_picked_up("b");
    system.enable_trigger("loot");
    system.update(0.1);

    assert_eq!(system.instance("loot").unwrap().collected_items.len(), 1);
    assert!(!system.is_trigger_complete("loot"));
}

#[test]
fn test_disabled_config_starts_disabled() {
    let (mut system, world) = wired();
    system.create_trigger(TriggerConfig::proximity("p", Vec3::ZERO, 3.0).disabled());
    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);

    assert_eq!(system.trigger_state("p"), Some(TriggerState::Disabled));
    assert!(system.drain_events().is_empty());
}

#[test]
fn test_remove_and_clear() {
    let (mut system, world) = wired();
    system.create_triggers([
        TriggerConfig::proximity("a", Vec3::ZERO, 3.0).one_shot(),
        TriggerConfig::proximity("b", Vec3::ZERO, 3.0),
        TriggerConfig::proximity("c", Vec3::ZERO, 3.0),
    ]);
    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);
    assert!(system.is_trigger_complete("a"));

    assert!(system.remove_trigger("a"));
    assert!(!system.is_trigger_complete("a"));
    assert_eq!(system.trigger_state("a"), None);
    assert_eq!(system.trigger_ids(), &[TriggerId::new("b"), TriggerId::new("c")]);

    system.clear_triggers();
    assert!(system.is_empty());
    assert!(system.active_triggers().is_empty());
}

#[test]
fn test_active_triggers_in_registration_order() {
    let (mut system, world) = wired();
    for id in ["z", "m", "a"] {
        system.create_trigger(TriggerConfig::proximity(id, Vec3::ZERO, 3.0));
    }
    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);

    assert_eq!(
        system.active_triggers(),
        vec![TriggerId::new("z"), TriggerId::new("m"), TriggerId::new("a")]
    );
}

#[test]
fn test_max_delta_clamps_clock() {
    let mut system = TriggerSystem::new().with_config(SystemConfig::default().with_max_delta(0.1));
    system.set_player_position_getter(|| Vec3::ZERO);
    system.update(5.0);
    assert_eq!(system.now_ms(), f64::from(0.1f32) * 1000.0);
}

// === Observer and sinks ===

#[derive(Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl TriggerObserver for Recorder {
    fn state_changed(&mut self, id: &TriggerId, state: TriggerState) {
        self.0.borrow_mut().push(format!("{} {}", id.as_str(), state));
    }

    fn trigger_removed(&mut self, id: &TriggerId) {
        self.0.borrow_mut().push(format!("{} removed", id.as_str()));
    }
}

#[test]
fn test_observer_sees_transitions() {
    let (mut system, world) = wired();
    let log = Rc::new(RefCell::new(Vec::new()));
    system.set_observer(Recorder(Rc::clone(&log)));
    system.create_trigger(TriggerConfig::proximity("p", Vec3::ZERO, 3.0).one_shot());

    world.move_to(0.0, 0.0, 0.0);
    system.update(0.1);
    system.remove_trigger("p");

    assert_eq!(*log.borrow(), vec!["p active", "p completed", "p removed"]);
}

#[derive(Debug, Default)]
struct CountingSink {
    count: usize,
}

impl EventSink for CountingSink {
    fn emit(&mut self, _event: TriggerEvent) {
        self.count += 1;
    }
}

#[test]
fn test_custom_sink_and_dispose() {
    let mut system = TriggerSystem::with_sink(CountingSink::default());
    system.set_player_position_getter(|| Vec3::ZERO);
    system.create_trigger(TriggerConfig::volume("v", Vec3::ZERO, VolumeShape::Sphere, 1.0));

    system.update(0.1);
    system.update(0.1);
    assert_eq!(system.sink().count, 2);

    let sink = system.dispose();
    assert_eq!(sink.count, 2);
}
