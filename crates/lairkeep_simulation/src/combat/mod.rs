//! Combat module: health ledger pipeline + player melee
//!
//! ECS ответственность:
//! - Game state: Health, Attacker cooldown
//! - Combat rules: кто кого бьёт и когда (DamageRequest)
//! - Events: HealthChanged, EntityDied
//!
//! Presentation ответственность:
//! - анимации по AnimationSink триггерам, health bar по HealthChanged

use bevy::prelude::*;

use crate::components::tick_attack_cooldowns;
use crate::SimulationSet;

pub mod damage;
pub mod melee;

// Re-export основных типов
pub use damage::{apply_health_requests, DamageRequest, EntityDied, HealRequest, HealthChanged};
pub use melee::{melee_strike_center, player_melee_attack, PlayerAttackIntent};

/// Combat Plugin
///
/// Регистрирует события и combat системы в Update.
///
/// Порядок (через SimulationSet):
/// 1. tick_attack_cooldowns — Timers
/// 2. player_melee_attack — Actions (PlayerAttackIntent → DamageRequest)
/// 3. apply_health_requests — Health (DamageRequest → HealthChanged/EntityDied)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<HealRequest>()
            .add_event::<HealthChanged>()
            .add_event::<EntityDied>()
            .add_event::<PlayerAttackIntent>();

        app.add_systems(
            Update,
            (
                tick_attack_cooldowns.in_set(SimulationSet::Timers),
                player_melee_attack.in_set(SimulationSet::Actions),
                apply_health_requests.in_set(SimulationSet::Health),
            ),
        );
    }
}
