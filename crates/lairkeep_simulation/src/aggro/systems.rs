//! Aggro системы: цель, per-frame FSM, animation strike, смерть, locomotion

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use crate::aggro::{AggroDecision, AggroState, AttackTicker, Monster, ZoneSensor};
use crate::combat::{DamageRequest, EntityDied};
use crate::components::{ActorTag, AnimFlag, AnimTrigger, AnimationSink, Dead, Health, MovementSpeed};
use crate::config::{ConfigError, MonsterConfig};
use crate::logger;
use crate::shared::slerp_yaw_towards;

/// Animation event "удар попал" (альтернативный путь урона, от клипа атаки)
#[derive(Event, Debug, Clone)]
pub struct StrikeHit {
    pub monster: Entity,
}

/// Система: цель по умолчанию на спавне — первый актор с тегом Player
pub fn acquire_initial_target(
    mut monsters: Query<(Entity, &mut AggroState), Added<AggroState>>,
    actors: Query<(Entity, &ActorTag)>,
) {
    for (entity, mut aggro) in monsters.iter_mut() {
        let player = actors
            .iter()
            .find(|(_, tag)| **tag == ActorTag::Player)
            .map(|(player, _)| player);

        match player {
            Some(player) => {
                aggro.acquire_if_none(player);
            }
            None => logger::log(&format!("Monster {:?}: no player at spawn", entity)),
        }
    }
}

/// Система: monster MovementSpeed = MovementSpeed цели (если match_target_speed)
pub fn match_target_speed(
    mut monsters: Query<(&AggroState, &MonsterConfig, &mut MovementSpeed), (With<Monster>, Without<Dead>)>,
    targets: Query<&MovementSpeed, Without<Monster>>,
) {
    for (aggro, config, mut speed) in monsters.iter_mut() {
        if !config.match_target_speed {
            continue;
        }

        if let Some(target_speed) = aggro.target().and_then(|t| targets.get(t).ok()) {
            speed.speed = target_speed.speed;
        }
    }
}

/// Система: per-frame aggro FSM (leash, hysteresis, разгон, поворот к цели)
pub fn update_aggro(
    time: Res<Time>,
    mut monsters: Query<
        (
            Entity,
            &mut Transform,
            &mut AggroState,
            &mut AttackTicker,
            &MonsterConfig,
            &MovementSpeed,
            Option<&mut AnimationSink>,
        ),
        (With<Monster>, Without<Dead>),
    >,
    targets: Query<&Transform, Without<Monster>>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut aggro, mut ticker, config, speed, sink) in monsters.iter_mut() {
        if !aggro.is_chasing() {
            continue;
        }

        let to_target = aggro
            .target()
            .and_then(|target| targets.get(target).ok())
            .map(|target_transform| target_transform.translation - transform.translation);

        let decision = aggro.evaluate(to_target.map(Vec3::length), speed.speed, config, delta);

        match decision {
            AggroDecision::Hold => {}
            AggroDecision::Disengage => {
                ticker.cancel();
                if let Some(mut sink) = sink {
                    sink.set_flag(AnimFlag::Attacking, false);
                }
                logger::log(&format!("Monster {:?}: disengaged ({:?})", entity, aggro.phase()));
            }
            AggroDecision::Pursue | AggroDecision::Attack => {
                if let Some(direction) = to_target {
                    transform.rotation =
                        slerp_yaw_towards(transform.rotation, direction, config.rotation_speed, delta);
                }
                if let Some(mut sink) = sink {
                    sink.set_flag(AnimFlag::Attacking, decision == AggroDecision::Attack);
                }
            }
        }
    }
}

/// Система: StrikeHit → DamageRequest
///
/// Бьёт только если монстр жив, игрок в зоне, у цели есть Health и она в attack_range.
pub fn apply_strike_hits(
    mut strikes: EventReader<StrikeHit>,
    monsters: Query<(&Transform, &AggroState, &MonsterConfig), (With<Monster>, Without<Dead>)>,
    targets: Query<&Transform, With<Health>>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    for strike in strikes.read() {
        let Ok((transform, aggro, config)) = monsters.get(strike.monster) else {
            continue;
        };

        if aggro.is_dead() || !aggro.player_in_zone() {
            continue;
        }

        let Some(target) = aggro.target() else {
            continue;
        };

        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        if transform.translation.distance(target_transform.translation) <= config.attack_range {
            damage_requests.write(DamageRequest {
                attacker: Some(strike.monster),
                target,
                amount: config.attack_damage,
            });
        }
    }
}

/// Система: смерть монстра
///
/// - AggroState → Dead, тикер отменён
/// - все коллайдеры (сам монстр + его сенсоры) отключены
/// - AnimTrigger::Die
/// - маркер Dead (дальше per-frame системы его пропускают)
pub fn handle_monster_death(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut monsters: Query<(&mut AggroState, &mut AttackTicker, Option<&mut AnimationSink>), With<Monster>>,
    mut sensors: Query<(Entity, &mut ZoneSensor)>,
) {
    for death in deaths.read() {
        let Ok((mut aggro, mut ticker, sink)) = monsters.get_mut(death.entity) else {
            continue;
        };

        aggro.die();
        ticker.cancel();

        if let Some(mut sink) = sink {
            sink.set_flag(AnimFlag::Attacking, false);
            sink.fire(AnimTrigger::Die);
        }

        for (sensor_entity, mut sensor) in sensors.iter_mut() {
            if sensor.owner == death.entity {
                sensor.enabled = false;
                commands.entity(sensor_entity).insert(ColliderDisabled);
            }
        }

        commands.entity(death.entity).insert((Dead, ColliderDisabled));

        logger::log_info(&format!("Monster {:?} died, aggro torn down", death.entity));
    }
}

/// Система (FixedUpdate): шаг вперёд со скоростью desired_speed
pub fn drive_monster_locomotion(
    time: Res<Time<Fixed>>,
    mut monsters: Query<(&mut Transform, &AggroState), (With<Monster>, Without<Dead>)>,
) {
    let delta = time.delta_secs();

    for (mut transform, aggro) in monsters.iter_mut() {
        if !aggro.is_chasing() || aggro.desired_speed() <= 0.0 {
            continue;
        }

        let step = *transform.forward() * aggro.desired_speed() * delta;
        transform.translation += step;
    }
}

/// Spawn helper для монстра
///
/// Компоненты: Monster (+ required AggroState, AttackTicker, Health, MovementSpeed),
/// ActorTag::Monster, MonsterConfig, AnimationSink.
/// Zone sensor спавнится отдельно (spawn_aggro_zone / spawn_proximity_zone).
pub fn spawn_monster(
    commands: &mut Commands,
    position: Vec3,
    config: MonsterConfig,
    max_health: u32,
) -> Result<Entity, ConfigError> {
    config.validate()?;
    if max_health == 0 {
        return Err(ConfigError::Invalid {
            field: "monster_max_health",
            reason: "must be > 0".to_string(),
        });
    }

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            Monster,
            ActorTag::Monster,
            Health::new(max_health),
            MovementSpeed { speed: config.move_speed },
            AttackTicker::new(config.attack_interval),
            AnimationSink::default(),
            config,
        ))
        .id();

    Ok(entity)
}
