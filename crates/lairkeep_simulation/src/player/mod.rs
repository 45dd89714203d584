//! Player: движение от MovementInput, death freeze, spawn helper
//!
//! Input устройства не здесь: внешний слой пишет MovementInput и PlayerAttackIntent.

use bevy::prelude::*;

use crate::combat::EntityDied;
use crate::components::{
    ActorTag, AnimFlag, AnimTrigger, AnimationSink, Attacker, Dead, Health, MovementInput, MovementSpeed, Player,
};
use crate::config::{ConfigError, PlayerConfig};
use crate::logger;
use crate::SimulationSet;

/// Система (FixedUpdate): translation += rotation * input * speed * dt
///
/// Мертвый игрок не двигается (Without<Dead>).
pub fn apply_player_movement(
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut Transform, &MovementInput, &MovementSpeed), (With<Player>, Without<Dead>)>,
) {
    let delta = time.delta_secs();

    for (mut transform, input, speed) in players.iter_mut() {
        if input.direction.length_squared() <= f32::EPSILON {
            continue;
        }

        let world_direction = transform.rotation * input.direction;
        transform.translation += world_direction * speed.speed * delta;
    }
}

/// Система: смерть игрока → freeze
///
/// - MovementInput обнулён, Dead вешается (движение и melee больше не обрабатываются)
/// - AnimTrigger::Die, если граф его поддерживает (иначе warning)
pub fn handle_player_death(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut players: Query<(&mut MovementInput, Option<&mut AnimationSink>), (With<Player>, Without<Dead>)>,
) {
    for death in deaths.read() {
        let Ok((mut input, sink)) = players.get_mut(death.entity) else {
            continue;
        };

        input.direction = Vec3::ZERO;

        match sink {
            Some(mut sink) => {
                sink.set_flag(AnimFlag::Attacking, false);
                if !sink.fire(AnimTrigger::Die) {
                    logger::log_warning(&format!(
                        "Player {:?}: animator has no Die trigger",
                        death.entity
                    ));
                }
            }
            None => logger::log_warning(&format!("Player {:?}: no animation sink bound", death.entity)),
        }

        commands.entity(death.entity).insert(Dead);

        logger::log_info(&format!("Player {:?} died, controls frozen", death.entity));
    }
}

/// Spawn helper для игрока
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: PlayerConfig) -> Result<Entity, ConfigError> {
    config.validate()?;

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            Player,
            ActorTag::Player,
            Health::new(config.max_health),
            MovementSpeed { speed: config.speed },
            MovementInput::default(),
            Attacker::new(config.attack_cooldown),
            AnimationSink::default(),
            config,
        ))
        .id();

    Ok(entity)
}

/// Player Plugin
///
/// - FixedUpdate: apply_player_movement
/// - Update/Reactions: handle_player_death
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_player_movement)
            .add_systems(Update, handle_player_death.in_set(SimulationSet::Reactions));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_player_rejects_invalid_config() {
        let mut world = World::new();
        let mut commands = world.commands();

        let result = spawn_player(
            &mut commands,
            Vec3::ZERO,
            PlayerConfig {
                attack_range: 0.0,
                ..default()
            },
        );

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "player.attack_range", .. })
        ));
    }

    #[test]
    fn test_spawn_player_components() {
        let mut world = World::new();
        let player = spawn_player(&mut world.commands(), Vec3::ONE, PlayerConfig::default())
            .expect("valid config");
        world.flush();

        assert_eq!(world.get::<ActorTag>(player), Some(&ActorTag::Player));
        assert_eq!(world.get::<Health>(player).map(Health::max), Some(100));
        assert_eq!(world.get::<MovementSpeed>(player).map(|s| s.speed), Some(5.0));
        assert!(world.get::<Player>(player).is_some());
    }
}
