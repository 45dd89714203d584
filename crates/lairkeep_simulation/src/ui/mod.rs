//! Health bar binding (world-space bar над головой актора)
//!
//! Контракт: значение обновляется на каждый HealthChanged цели,
//! позиция = цель + world_offset, поворот только по yaw вслед за камерой.

use bevy::prelude::*;

use crate::combat::HealthChanged;
use crate::components::Health;
use crate::shared::yaw_rotation_towards;
use crate::SimulationSet;

/// Состояние полоски здоровья (рендер читает value/max)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct HealthBar {
    pub target: Entity,
    pub value: u32,
    pub max: u32,
    pub world_offset: Vec3,
}

impl HealthBar {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            value: 0,
            max: 1,
            world_offset: Vec3::new(0.0, 2.0, 0.0),
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.value as f32 / self.max as f32
        }
    }
}

/// Маркер камеры, к которой поворачиваются полоски
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BillboardCamera;

/// Поворот полоски: forward камеры без наклона; вырожденный случай → -Z
pub fn billboard_rotation(camera_forward: Vec3) -> Quat {
    yaw_rotation_towards(camera_forward).unwrap_or(Quat::IDENTITY)
}

/// Система: начальные value/max из Health цели
pub fn bind_health_bars(mut bars: Query<&mut HealthBar, Added<HealthBar>>, targets: Query<&Health>) {
    for mut bar in bars.iter_mut() {
        if let Ok(health) = targets.get(bar.target) {
            bar.value = health.current();
            bar.max = health.max();
        }
    }
}

/// Система: HealthChanged → полоски этой цели
pub fn update_health_bars(mut changes: EventReader<HealthChanged>, mut bars: Query<&mut HealthBar>) {
    for change in changes.read() {
        for mut bar in bars.iter_mut().filter(|bar| bar.target == change.entity) {
            if bar.max != change.max {
                bar.max = change.max;
            }
            bar.value = change.current;
        }
    }
}

/// Система: позиция над целью + billboard по yaw камеры
pub fn place_health_bars(
    mut bars: Query<(&HealthBar, &mut Transform)>,
    targets: Query<&Transform, Without<HealthBar>>,
    cameras: Query<&Transform, (With<BillboardCamera>, Without<HealthBar>)>,
) {
    let camera_forward = cameras.iter().next().map(|camera| *camera.forward());

    for (bar, mut transform) in bars.iter_mut() {
        let Ok(target) = targets.get(bar.target) else {
            continue;
        };

        transform.translation = target.translation + bar.world_offset;

        if let Some(forward) = camera_forward {
            transform.rotation = billboard_rotation(forward);
        }
    }
}

/// UI Plugin (Presentation фаза, после Health/Reactions)
pub struct HealthBarPlugin;

impl Plugin for HealthBarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (bind_health_bars, update_health_bars, place_health_bars)
                .chain()
                .in_set(SimulationSet::Presentation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billboard_ignores_pitch() {
        let rotation = billboard_rotation(Vec3::new(0.0, -0.7, -0.7));
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_billboard_degenerate_falls_back() {
        assert_eq!(billboard_rotation(Vec3::NEG_Y), Quat::IDENTITY);
    }

    #[test]
    fn test_fraction() {
        let mut bar = HealthBar::new(Entity::PLACEHOLDER);
        bar.value = 25;
        bar.max = 100;
        assert_eq!(bar.fraction(), 0.25);
    }
}
