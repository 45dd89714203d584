//! Combat компоненты: Attacker (melee cooldown игрока)

use bevy::prelude::*;

/// Способность атаковать с cooldown
///
/// Игрок: клик → `try_start_attack`, cooldown тикает каждый frame.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Cooldown между атаками (секунды)
    pub attack_cooldown: f32,
    /// Текущий cooldown таймер (уменьшается до 0)
    pub cooldown_timer: f32,
}

impl Default for Attacker {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Attacker {
    pub fn new(attack_cooldown: f32) -> Self {
        Self {
            attack_cooldown,
            cooldown_timer: 0.0,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// true — атака началась, cooldown сброшен
    pub fn try_start_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.cooldown_timer = self.attack_cooldown;
        true
    }

    pub fn tick(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }
}

/// System: обновление attack cooldown таймеров
pub fn tick_attack_cooldowns(mut query: Query<&mut Attacker>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut attacker in query.iter_mut() {
        attacker.tick(delta);
    }
}
