//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: тег, здоровье (health ledger), скорость, Dead
//! - combat: cooldown атак (Attacker)
//! - movement: input игрока (MovementInput)
//! - animation: флаги/триггеры для presentation слоя (AnimationSink)
//! - player: player control marker (Player)

pub mod actor;
pub mod animation;
pub mod combat;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use combat::*;
pub use movement::*;
pub use player::*;
