//! Encounter integration test
//!
//! Игрок + монстр headless, proximity зона, ручное время 100ms/кадр.
//!
//! Проверяем:
//! - Health инварианты каждый кадр
//! - Смерть игрока: ровно один EntityDied, freeze движения
//! - Игрок убивает монстра melee атаками: aggro разобран, урон прекращается
//! - Health bar повторяет HealthChanged

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lairkeep_simulation::*;

/// Helper: полный App + сцена по tuning
fn create_encounter(tuning: CombatTuning, player_pos: Vec3) -> (App, Entity, Entity) {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));

    let (player, monster) = spawn_encounter(
        &mut app.world_mut().commands(),
        &tuning,
        player_pos,
        Vec3::ZERO,
        6.0,
    )
    .expect("valid tuning");
    app.world_mut().flush();

    (app, player, monster)
}

/// Helper: события типа E, накопленные с прошлого вызова
fn collect<E: Event + Clone>(app: &App, reader: &mut bevy::ecs::event::EventCursor<E>) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    reader.read(events).cloned().collect()
}

fn check_health_invariants(app: &App, entities: &[Entity], tick: usize) {
    for &entity in entities {
        if let Some(health) = app.world().get::<Health>(entity) {
            assert!(
                health.current() <= health.max(),
                "Tick {}: {:?} health.current ({}) > health.max ({})",
                tick,
                entity,
                health.current(),
                health.max()
            );
        }
    }
}

#[test]
fn test_player_dies_once_and_freezes() {
    let tuning = CombatTuning {
        player: PlayerConfig {
            max_health: 30,
            ..default()
        },
        ..default()
    };
    let (mut app, player, monster) = create_encounter(tuning, Vec3::new(0.0, 0.0, -1.5));

    let mut died_reader = app.world().resource::<Events<EntityDied>>().get_cursor();
    let mut deaths = Vec::new();

    // Игрок пытается уйти, но мы держим его вплотную (input = 0 до смерти)
    for tick in 0..60 {
        app.update();
        check_health_invariants(&app, &[player, monster], tick);
        deaths.extend(collect(&app, &mut died_reader));
    }

    // 30 HP / 10 урона за секунду → мертв к ~3-4 секунде
    let player_deaths: Vec<_> = deaths.iter().filter(|d| d.entity == player).collect();
    assert_eq!(player_deaths.len(), 1, "death must fire exactly once");
    assert_eq!(player_deaths[0].killer, Some(monster));

    let world = app.world();
    assert_eq!(world.get::<Health>(player).map(Health::current), Some(0));
    assert!(world.get::<Dead>(player).is_some());

    let sink = world.get::<AnimationSink>(player).expect("player sink");
    assert!(sink.pending().contains(&AnimTrigger::Die));

    // Freeze: input игнорируется
    let before = world.get::<Transform>(player).map(|t| t.translation);
    if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
        input.direction = Vec3::NEG_Z;
    }
    for _ in 0..10 {
        app.update();
    }
    let after = app.world().get::<Transform>(player).map(|t| t.translation);
    assert_eq!(before, after);
}

#[test]
fn test_player_kills_monster_with_melee() {
    let (mut app, player, monster) = create_encounter(CombatTuning::default(), Vec3::new(0.0, 0.0, 1.0));

    // Игрок смотрит на монстра (forward -Z, монстр в начале координат)
    app.update();
    assert!(app.world().get::<AggroState>(monster).is_some_and(AggroState::is_chasing));

    // Клик на каждом кадре: cooldown 0.5s → удар каждые 5 кадров, 15 урона
    for tick in 0..80 {
        app.world_mut().send_event(PlayerAttackIntent { player });
        app.update();
        check_health_invariants(&app, &[player, monster], tick);

        if app.world().get::<Dead>(monster).is_some() {
            break;
        }
    }

    let world = app.world();
    assert!(world.get::<Dead>(monster).is_some(), "monster should die");
    assert_eq!(world.get::<AggroState>(monster).map(AggroState::phase), Some(AggroPhase::Dead));

    let hp_at_kill = world.get::<Health>(player).map(Health::current);
    assert!(hp_at_kill.is_some_and(|hp| hp > 0));

    // Мертвый монстр больше не бьёт
    for _ in 0..30 {
        app.update();
    }
    assert_eq!(app.world().get::<Health>(player).map(Health::current), hp_at_kill);
}

#[test]
fn test_melee_respects_cooldown_and_reach() {
    let (mut app, player, monster) = create_encounter(CombatTuning::default(), Vec3::new(0.0, 0.0, 1.0));

    // Игрок отвернулся (+Z): центр удара (0, 0, 2), монстр не задет
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.rotation = Quat::from_rotation_y(std::f32::consts::PI);
    }
    app.update();

    app.world_mut().send_event(PlayerAttackIntent { player });
    app.update();
    assert_eq!(app.world().get::<Health>(monster).map(Health::current), Some(100));

    // Ждём cooldown с запасом
    for _ in 0..10 {
        app.update();
    }

    // Лицом к монстру: два клика в одном кадре → один удар
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.rotation = Quat::IDENTITY;
    }
    app.world_mut().send_event(PlayerAttackIntent { player });
    app.world_mut().send_event(PlayerAttackIntent { player });
    app.update();
    assert_eq!(app.world().get::<Health>(monster).map(Health::current), Some(85));

    // Анимация удара на каждый клик
    let sink = app.world().get::<AnimationSink>(player).expect("sink");
    assert_eq!(
        sink.pending().iter().filter(|t| **t == AnimTrigger::Attack).count(),
        3
    );
}

#[test]
fn test_health_bar_tracks_changes() {
    let (mut app, player, _monster) = create_encounter(CombatTuning::default(), Vec3::new(0.0, 0.0, -1.5));

    let bar = app.world_mut().spawn(HealthBar::new(player)).id();
    app.world_mut()
        .spawn((BillboardCamera, Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y)));

    app.update();
    assert_eq!(app.world().get::<HealthBar>(bar).map(|b| (b.value, b.max)), Some((100, 100)));

    app.world_mut().send_event(HealRequest { target: player, amount: 10 });
    app.world_mut().send_event(DamageRequest { attacker: None, target: player, amount: 25 });
    app.update();

    let world = app.world();
    assert_eq!(world.get::<HealthBar>(bar).map(|b| b.value), Some(85));

    let bar_transform = world.get::<Transform>(bar).expect("bar transform");
    let player_pos = world.get::<Transform>(player).map(|t| t.translation).unwrap_or_default();
    assert!((bar_transform.translation - (player_pos + Vec3::new(0.0, 2.0, 0.0))).length() < 1e-4);

    // Только yaw: forward полоски горизонтален
    let forward = bar_transform.rotation * Vec3::NEG_Z;
    assert!(forward.y.abs() < 1e-5);
}

#[test]
fn test_invalid_tuning_rejected() {
    let mut app = create_headless_app();
    let tuning = CombatTuning {
        monster: MonsterConfig {
            attack_interval: 0.0,
            ..default()
        },
        ..default()
    };

    let result = spawn_encounter(&mut app.world_mut().commands(), &tuning, Vec3::ZERO, Vec3::ONE, 6.0);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid { field: "monster.attack_interval", .. })
    ));
}
