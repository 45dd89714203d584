//! Yaw-only helpers
//!
//! Bevy forward = -Z. Все повороты только вокруг Y (без наклона).

use bevy::prelude::*;

/// Минимальная длина² горизонтального вектора, ниже — направление не определено
const MIN_HORIZONTAL_SQ: f32 = 0.0001;

/// Поворот вокруг Y, при котором forward (-Z) смотрит вдоль `direction` (y игнорируется)
///
/// None если горизонтальная составляющая вырождена.
pub fn yaw_rotation_towards(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= MIN_HORIZONTAL_SQ {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Плавный (не snap) поворот к цели: slerp с фактором `speed * dt` (clamp 0..1)
pub fn slerp_yaw_towards(current: Quat, direction: Vec3, speed: f32, delta: f32) -> Quat {
    match yaw_rotation_towards(direction) {
        Some(target) => current.slerp(target, (speed * delta).clamp(0.0, 1.0)),
        None => current,
    }
}

/// Сдвиг `current` к `target` не больше чем на `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
