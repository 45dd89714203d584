//! Базовые компоненты акторов: ActorTag, Health, MovementSpeed, Dead

use bevy::prelude::*;

/// Тег актора (фильтр для zone sensor)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum ActorTag {
    Player,
    Monster,
}

/// Здоровье актора (health ledger)
///
/// Инвариант: 0 ≤ current ≤ max, max > 0.
/// Мутируется только через `take_damage` / `heal`.
/// После current == 0 актор мертв, воскрешения нет.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
}

/// Результат мутации Health (что публиковать наружу)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Ничего не изменилось (актор уже мертв)
    Ignored,
    /// Значение обновлено, актор жив
    Changed { current: u32, max: u32 },
    /// Переход current > 0 → 0 (ровно один раз за жизнь ledger'а)
    Died { max: u32 },
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    /// Полное здоровье; max == 0 поднимается до 1
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) -> HealthChange {
        if !self.is_alive() {
            return HealthChange::Ignored;
        }

        self.current = self.current.saturating_sub(amount).min(self.max);

        if self.is_alive() {
            HealthChange::Changed {
                current: self.current,
                max: self.max,
            }
        } else {
            HealthChange::Died { max: self.max }
        }
    }

    /// Лечение мертвого — no-op (не воскрешаем, не публикуем)
    pub fn heal(&mut self, amount: u32) -> HealthChange {
        if !self.is_alive() {
            return HealthChange::Ignored;
        }

        self.current = self.current.saturating_add(amount).min(self.max);

        HealthChange::Changed {
            current: self.current,
            max: self.max,
        }
    }
}

/// Скорость движения актора (метры/сек)
///
/// Монстр с `match_target_speed` копирует её у цели каждый frame.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 3.5 }
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Вешается один раз обработчиком EntityDied. Per-frame системы его пропускают.
/// Деспавн не автоматический — трупы остаются на месте.
#[derive(Component, Debug)]
pub struct Dead;
