//! Tuning конфиги: монстр (aggro/combat) и игрок (movement/melee)
//!
//! Загружаются из RON (`CombatTuning::from_ron_str`), валидируются при загрузке.
//! Defaults совпадают с игровыми значениями из сцены.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации — единственная fallible поверхность симуляции
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Параметры монстра (aggro, hysteresis, leash, attack ticker, locomotion)
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct MonsterConfig {
    /// Урон за один тик атаки
    pub attack_damage: u32,
    /// Период attack ticker (секунды)
    pub attack_interval: f32,
    /// Порог входа в Attacking (метры)
    pub attack_range: f32,
    /// Доп. запас для выхода из Attacking: exit = attack_range + attack_stick_extra
    pub attack_stick_extra: f32,
    /// Дальше этого (и вне зоны) монстр бросает погоню
    pub leash_distance: f32,
    /// Скорость погони (m/s), если не матчим скорость цели
    pub move_speed: f32,
    /// Следовать MovementSpeed цели каждый frame
    pub match_target_speed: bool,
    /// Скорость поворота к цели (slerp factor/sec)
    pub rotation_speed: f32,
    /// Разгон current_speed → move_speed (units/sec²)
    pub acceleration: f32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            attack_damage: 10,
            attack_interval: 1.0,
            attack_range: 2.0,
            attack_stick_extra: 0.75,
            leash_distance: 15.0,
            move_speed: 3.5,
            match_target_speed: true,
            rotation_speed: 8.0,
            acceleration: 12.0,
        }
    }
}

impl MonsterConfig {
    /// Дистанция выхода из Attacking (строго больше порога входа)
    pub fn attack_exit_range(&self) -> f32 {
        self.attack_range + self.attack_stick_extra
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("monster.attack_interval", self.attack_interval)?;
        positive("monster.attack_range", self.attack_range)?;
        positive("monster.attack_stick_extra", self.attack_stick_extra)?;
        positive("monster.leash_distance", self.leash_distance)?;
        non_negative("monster.move_speed", self.move_speed)?;
        positive("monster.rotation_speed", self.rotation_speed)?;
        positive("monster.acceleration", self.acceleration)?;

        if self.leash_distance <= self.attack_exit_range() {
            return Err(ConfigError::Invalid {
                field: "monster.leash_distance",
                reason: format!(
                    "must exceed attack exit range {} (got {})",
                    self.attack_exit_range(),
                    self.leash_distance
                ),
            });
        }

        Ok(())
    }
}

/// Параметры игрока (движение + melee overlap-атака)
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    pub speed: f32,
    pub attack_damage: u32,
    /// Радиус overlap сферы удара
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Центр сферы = origin + forward * attack_reach
    pub attack_reach: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 5.0,
            attack_damage: 15,
            attack_range: 0.5,
            attack_cooldown: 0.5,
            attack_reach: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_health",
                reason: "must be > 0".to_string(),
            });
        }
        non_negative("player.speed", self.speed)?;
        positive("player.attack_range", self.attack_range)?;
        non_negative("player.attack_cooldown", self.attack_cooldown)?;
        non_negative("player.attack_reach", self.attack_reach)?;
        Ok(())
    }
}

/// Весь tuning сцены (resource)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub monster_max_health: u32,
    pub monster: MonsterConfig,
    pub player: PlayerConfig,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            monster_max_health: 100,
            monster: MonsterConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl CombatTuning {
    /// Парсит RON и сразу валидирует
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let tuning: CombatTuning = ron::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monster_max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "monster_max_health",
                reason: "must be > 0".to_string(),
            });
        }
        self.monster.validate()?;
        self.player.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be > 0 (got {})", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0 (got {})", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_config_default() {
        let config = MonsterConfig::default();
        assert_eq!(config.attack_damage, 10);
        assert_eq!(config.attack_interval, 1.0);
        assert_eq!(config.attack_range, 2.0);
        assert_eq!(config.attack_exit_range(), 2.75);
        assert_eq!(config.leash_distance, 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tuning_from_ron_partial() {
        let tuning = CombatTuning::from_ron_str(
            "(monster_max_health: 80, monster: (attack_damage: 25, leash_distance: 20.0))",
        )
        .expect("valid tuning");

        assert_eq!(tuning.monster_max_health, 80);
        assert_eq!(tuning.monster.attack_damage, 25);
        assert_eq!(tuning.monster.leash_distance, 20.0);
        // Остальное — defaults
        assert_eq!(tuning.monster.attack_range, 2.0);
        assert_eq!(tuning.player.attack_damage, 15);
    }

    #[test]
    fn test_tuning_rejects_zero_health() {
        let err = CombatTuning::from_ron_str("(monster_max_health: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "monster_max_health", .. }));
    }

    #[test]
    fn test_tuning_rejects_garbage() {
        let err = CombatTuning::from_ron_str("(monster: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_leash_must_exceed_attack_exit() {
        let config = MonsterConfig {
            leash_distance: 2.5,
            ..default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("monster.leash_distance"));
    }
}
