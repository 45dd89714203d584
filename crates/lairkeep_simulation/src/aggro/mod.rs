//! Aggro & combat controller монстра
//!
//! Zone sensor → aggro FSM (per-frame) → locomotion (FixedUpdate)
//!                                     → attack ticker (периодический) → DamageRequest игроку
//! EntityDied монстра → teardown (тикер, коллайдеры, Dead).

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::components::{Health, MovementSpeed};
use crate::config::MonsterConfig;
use crate::SimulationSet;

pub mod state;
pub mod systems;
pub mod ticker;
pub mod zone;


// Re-export основных типов
pub use state::{AggroDecision, AggroPhase, AggroState, ZoneResponse};
pub use systems::{
    acquire_initial_target, apply_strike_hits, drive_monster_locomotion, handle_monster_death,
    match_target_speed, spawn_monster, update_aggro, StrikeHit,
};
pub use ticker::{sync_attack_intervals, tick_attack_tickers, AttackTicker};
pub use zone::{
    collision_events_to_zone_contacts, route_zone_contacts, sense_zone_by_proximity, spawn_aggro_zone,
    spawn_proximity_zone, ProximitySensor, ZoneContact, ZoneContactKind, ZoneSensor,
};

/// Маркер монстра (AI-controlled актор с aggro FSM)
///
/// Автоматически добавляет AggroState, AttackTicker, Health, MovementSpeed, MonsterConfig
/// через Required Components.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(AggroState, AttackTicker, Health, MovementSpeed, MonsterConfig, Transform)]
pub struct Monster;

/// Aggro Plugin
///
/// Update (через SimulationSet):
/// 1. Timers: sync_attack_intervals → tick_attack_tickers (тикер видит только время ПОСЛЕ старта)
/// 2. Sensing: rapier/proximity → ZoneContact, цель по умолчанию
/// 3. Decision: route_zone_contacts → match_target_speed → update_aggro
/// 4. Actions: apply_strike_hits
/// 5. Reactions: handle_monster_death
///
/// FixedUpdate: drive_monster_locomotion
pub struct AggroPlugin;

impl Plugin for AggroPlugin {
    fn build(&self, app: &mut App) {
        // CollisionEvent регистрирует rapier plugin; без него — пустой поток
        app.add_event::<CollisionEvent>()
            .add_event::<ZoneContact>()
            .add_event::<StrikeHit>();

        app.add_systems(
            Update,
            (
                (sync_attack_intervals, tick_attack_tickers)
                    .chain()
                    .in_set(SimulationSet::Timers),
                (
                    collision_events_to_zone_contacts,
                    sense_zone_by_proximity,
                    acquire_initial_target,
                )
                    .chain()
                    .in_set(SimulationSet::Sensing),
                (route_zone_contacts, match_target_speed, update_aggro)
                    .chain()
                    .in_set(SimulationSet::Decision),
                apply_strike_hits.in_set(SimulationSet::Actions),
                handle_monster_death.in_set(SimulationSet::Reactions),
            ),
        );

        app.add_systems(FixedUpdate, drive_monster_locomotion);
    }
}
