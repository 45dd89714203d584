//! Aggro FSM монстра
//!
//! Конечный автомат (phase выводится из флагов):
//! Idle → Pursuing ↔ Attacking → Idle (leash break / потеря цели)
//! Pursuing/Attacking → Dead (терминальное)
//!
//! Архитектура:
//! - Pure логика без ECS: системы только читают дистанцию и применяют решение
//! - Pursuing ↔ Attacking с hysteresis (enter ≤ attack_range, exit > attack_range + stick_extra)
//! - Leash: только когда игрок вне зоны И дальше leash_distance

use bevy::prelude::*;

use crate::config::MonsterConfig;
use crate::shared::move_towards;

/// Выведенная фаза FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggroPhase {
    /// Не преследуем (chasing = false)
    Idle,
    /// Бежим к цели (chasing, !in_attack_zone)
    Pursuing,
    /// Стоим и атакуем (chasing, in_attack_zone)
    Attacking,
    /// Мертв, из этой фазы выхода нет
    Dead,
}

/// Что делать с zone enter/exit сигналом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneResponse {
    /// Idle → Pursuing: запустить attack ticker
    Engage,
    /// Уже преследуем, цель обновлена
    Refresh,
    /// Игрок вышел из зоны (погоню не рвём, этим занимается leash)
    Exited,
    /// Мертвым сигналы не нужны
    Ignored,
}

/// Решение per-frame оценки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggroDecision {
    /// Нечего делать (Idle или Dead)
    Hold,
    /// Погоня брошена: остановить ticker, сбросить attack флаг
    Disengage,
    /// Двигаемся к цели со скоростью desired_speed
    Pursue,
    /// В радиусе атаки, стоим
    Attack,
}

/// Aggro state монстра
///
/// Инварианты:
/// - in_attack_zone → chasing
/// - !chasing → desired_speed == 0
/// - dead → всё сброшено навсегда
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AggroState {
    /// Цель (игрок). None = нет цели, погоня подавлена до следующего zone enter
    target: Option<Entity>,
    /// Сырой сигнал сенсора
    player_in_zone: bool,
    chasing: bool,
    in_attack_zone: bool,
    /// Текущая скорость (разгон с ограниченным ускорением)
    current_speed: f32,
    /// Скорость для locomotion шага в FixedUpdate
    desired_speed: f32,
    dead: bool,
}

impl AggroState {
    pub fn with_target(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..default()
        }
    }

    pub fn phase(&self) -> AggroPhase {
        if self.dead {
            AggroPhase::Dead
        } else if !self.chasing {
            AggroPhase::Idle
        } else if self.in_attack_zone {
            AggroPhase::Attacking
        } else {
            AggroPhase::Pursuing
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn player_in_zone(&self) -> bool {
        self.player_in_zone
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn in_attack_zone(&self) -> bool {
        self.in_attack_zone
    }

    pub fn desired_speed(&self) -> f32 {
        self.desired_speed
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Цель по умолчанию (на спавне), только если своей ещё нет
    pub fn acquire_if_none(&mut self, target: Entity) -> bool {
        if self.dead || self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        true
    }

    /// Сигнал сенсора: `who` вошёл / вышел из зоны
    pub fn set_player_in_zone(&mut self, in_zone: bool, who: Entity) -> ZoneResponse {
        if self.dead {
            return ZoneResponse::Ignored;
        }

        self.player_in_zone = in_zone;

        if !in_zone {
            return ZoneResponse::Exited;
        }

        // Re-acquire: zone enter всегда обновляет ссылку на цель
        self.target = Some(who);

        if self.chasing {
            ZoneResponse::Refresh
        } else {
            self.chasing = true;
            ZoneResponse::Engage
        }
    }

    /// Per-frame оценка
    ///
    /// `distance` — None если цель пропала (despawn): трактуем как "нет цели".
    /// `move_speed` — целевая скорость погони (своя или скопированная у игрока).
    pub fn evaluate(
        &mut self,
        distance: Option<f32>,
        move_speed: f32,
        config: &MonsterConfig,
        delta: f32,
    ) -> AggroDecision {
        if self.dead || !self.chasing {
            return AggroDecision::Hold;
        }

        let Some(distance) = distance else {
            self.lose_target();
            return AggroDecision::Disengage;
        };

        // Leash: сам по себе выход из зоны погоню не рвёт
        if !self.player_in_zone && distance > config.leash_distance {
            self.reset_pursuit();
            return AggroDecision::Disengage;
        }

        // Hysteresis дальности
        if !self.in_attack_zone && distance <= config.attack_range {
            self.in_attack_zone = true;
        } else if self.in_attack_zone && distance > config.attack_exit_range() {
            self.in_attack_zone = false;
        }

        if self.in_attack_zone {
            self.current_speed = 0.0;
            self.desired_speed = 0.0;
            AggroDecision::Attack
        } else {
            self.current_speed =
                move_towards(self.current_speed, move_speed.max(0.0), config.acceleration * delta);
            self.desired_speed = self.current_speed;
            AggroDecision::Pursue
        }
    }

    /// Цель пропала: забываем её, погоня подавлена до следующего zone enter
    pub fn lose_target(&mut self) {
        self.target = None;
        self.player_in_zone = false;
        self.reset_pursuit();
    }

    /// Терминальный переход
    pub fn die(&mut self) {
        self.reset_pursuit();
        self.player_in_zone = false;
        self.dead = true;
    }

    fn reset_pursuit(&mut self) {
        self.chasing = false;
        self.in_attack_zone = false;
        self.current_speed = 0.0;
        self.desired_speed = 0.0;
    }
}
