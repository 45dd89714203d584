//! Lairkeep Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16: монстр с aggro FSM против игрока.
//!
//! Подсистемы:
//! - aggro: zone sensor, aggro FSM с hysteresis/leash, attack ticker, locomotion
//! - combat: health ledger pipeline (DamageRequest → HealthChanged/EntityDied), melee игрока
//! - player: движение, death freeze
//! - ui: health bar binding
//!
//! Render/анимация/input — внешние слои: читают AnimationSink, HealthBar, пишут
//! MovementInput, PlayerAttackIntent, StrikeHit.

use bevy::prelude::*;

// Публичные модули
pub mod aggro;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod player;
pub mod shared;
pub mod ui;

// Re-export базовых типов для удобства
pub use aggro::{
    spawn_aggro_zone, spawn_monster, spawn_proximity_zone, AggroPhase, AggroPlugin, AggroState, AttackTicker,
    Monster, ProximitySensor, StrikeHit, ZoneContact, ZoneContactKind, ZoneSensor,
};
pub use combat::{CombatPlugin, DamageRequest, EntityDied, HealRequest, HealthChanged, PlayerAttackIntent};
pub use components::*;
pub use config::{CombatTuning, ConfigError, MonsterConfig, PlayerConfig};
pub use player::{spawn_player, PlayerPlugin};
pub use ui::{BillboardCamera, HealthBar, HealthBarPlugin};

/// Фазы Update кадра (последовательно)
///
/// Timers идут первыми: тикер, запущенный в кадре N, впервые видит время кадра N+1.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Cooldown'ы и attack тикеры
    Timers,
    /// Сенсоры → ZoneContact, цель на спавне
    Sensing,
    /// Aggro FSM: zone routing, speed matching, leash/hysteresis
    Decision,
    /// Удары: melee игрока, animation strikes
    Actions,
    /// DamageRequest/HealRequest → Health
    Health,
    /// Реакции на EntityDied
    Reactions,
    /// Health bars
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Timers,
                SimulationSet::Sensing,
                SimulationSet::Decision,
                SimulationSet::Actions,
                SimulationSet::Health,
                SimulationSet::Reactions,
                SimulationSet::Presentation,
            )
                .chain(),
        )
        .init_resource::<CombatTuning>()
        .add_plugins((CombatPlugin, AggroPlugin, PlayerPlugin, HealthBarPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Spawn сцены по tuning: игрок + монстр с headless proximity зоной
///
/// Возвращает (player, monster).
pub fn spawn_encounter(
    commands: &mut Commands,
    tuning: &CombatTuning,
    player_position: Vec3,
    monster_position: Vec3,
    zone_radius: f32,
) -> Result<(Entity, Entity), ConfigError> {
    tuning.validate()?;

    let player = spawn_player(commands, player_position, tuning.player.clone())?;
    let monster = spawn_monster(commands, monster_position, tuning.monster.clone(), tuning.monster_max_health)?;
    spawn_proximity_zone(commands, monster, zone_radius);

    Ok((player, monster))
}
