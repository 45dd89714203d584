//! Movement компоненты: input игрока

use bevy::prelude::*;

/// Входные данные для движения игрока (local space, WASD)
///
/// Для headless тестов — mock input через этот компонент.
/// Для игры — заполняется внешним input слоем.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// x = strafe, z = forward/back (в локальных осях актора)
    pub direction: Vec3,
}
