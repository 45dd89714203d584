//! Player melee: overlap-сфера перед игроком.
//!
//! # Attack Flow
//!
//! ```text
//! Input layer → PlayerAttackIntent (click)
//!   ↓
//! AnimTrigger::Attack (на каждый клик, даже на cooldown)
//!   ↓
//! Attacker::try_start_attack (cooldown gate)
//!   ↓
//! overlap sphere (origin + forward * reach, radius = attack_range)
//!   ↓
//! DamageRequest на каждого живого с Health внутри сферы
//! ```

use bevy::prelude::*;

use crate::combat::DamageRequest;
use crate::components::{AnimTrigger, AnimationSink, Attacker, Dead, Health, Player};
use crate::config::PlayerConfig;

// ============================================================================
// Events
// ============================================================================

/// Игрок нажал атаку (пишет input слой)
#[derive(Event, Debug, Clone)]
pub struct PlayerAttackIntent {
    pub player: Entity,
}

// ============================================================================
// Helpers
// ============================================================================

/// Центр overlap-сферы удара
pub fn melee_strike_center(transform: &Transform, reach: f32) -> Vec3 {
    transform.translation + *transform.forward() * reach
}

// ============================================================================
// Systems
// ============================================================================

/// Обработка PlayerAttackIntent → DamageRequest по всем в сфере
pub fn player_melee_attack(
    mut intents: EventReader<PlayerAttackIntent>,
    mut players: Query<
        (&Transform, &PlayerConfig, &mut Attacker, Option<&mut AnimationSink>),
        (With<Player>, Without<Dead>),
    >,
    victims: Query<(Entity, &Transform, &Health)>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    for intent in intents.read() {
        let Ok((transform, config, mut attacker, sink)) = players.get_mut(intent.player) else {
            continue;
        };

        // Анимация удара на любой клик (cooldown её не блокирует)
        if let Some(mut sink) = sink {
            sink.fire(AnimTrigger::Attack);
        }

        if !attacker.try_start_attack() {
            continue;
        }

        let center = melee_strike_center(transform, config.attack_reach);

        for (victim, victim_transform, health) in victims.iter() {
            if victim == intent.player || !health.is_alive() {
                continue;
            }

            if victim_transform.translation.distance(center) <= config.attack_range {
                damage_requests.write(DamageRequest {
                    attacker: Some(intent.player),
                    target: victim,
                    amount: config.attack_damage,
                });
            }
        }
    }
}
