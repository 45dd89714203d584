//! Attack ticker — периодический урон пока монстр преследует
//!
//! Отменяемый repeating таймер вместо detached корутины:
//! - `start` идемпотентен (повторный start при активном тикере — no-op)
//! - `cancel` действует сразу: флаг проверяется перед каждым срабатыванием
//! - первое срабатывание через полный interval после start
//!
//! Один компонент на монстра → больше одного тикера быть не может.

use bevy::prelude::*;
use std::time::Duration;

use crate::aggro::{AggroState, Monster};
use crate::combat::DamageRequest;
use crate::components::{AnimTrigger, AnimationSink, Dead, Health};
use crate::config::MonsterConfig;
use crate::logger;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AttackTicker {
    timer: Timer,
    active: bool,
}

impl Default for AttackTicker {
    fn default() -> Self {
        Self::new(MonsterConfig::default().attack_interval)
    }
}

impl AttackTicker {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
            active: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.timer.duration()
    }

    /// Новый период; накопленное время текущего интервала сохраняется
    pub fn set_interval(&mut self, interval_secs: f32) {
        let interval = Duration::from_secs_f32(interval_secs);
        if self.timer.duration() != interval {
            self.timer.set_duration(interval);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// false — тикер уже шёл, ничего не изменилось
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.timer.reset();
        self.active = true;
        true
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.timer.reset();
    }

    /// Сколько срабатываний накопилось за `delta` (0 если отменён)
    pub fn tick(&mut self, delta: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

/// Система: период тикера = attack_interval из MonsterConfig
///
/// Нужна для монстров, собранных через required components (`Monster` + свой MonsterConfig):
/// required AttackTicker создаётся с дефолтным периодом.
pub fn sync_attack_intervals(
    mut monsters: Query<(&MonsterConfig, &mut AttackTicker), (With<Monster>, Changed<MonsterConfig>)>,
) {
    for (config, mut ticker) in monsters.iter_mut() {
        ticker.set_interval(config.attack_interval);
    }
}

/// Система: тик attack тикеров → DamageRequest по цели
///
/// Срабатывание бьёт только если цель в attack_range и её Health жив.
/// Тикер сам гасит себя если монстр умер / не преследует / у цели нет Health.
pub fn tick_attack_tickers(
    time: Res<Time>,
    mut monsters: Query<
        (
            Entity,
            &Transform,
            &AggroState,
            &MonsterConfig,
            &mut AttackTicker,
            Option<&mut AnimationSink>,
        ),
        (With<Monster>, Without<Dead>),
    >,
    targets: Query<(&Transform, Option<&Health>)>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    let delta = time.delta();

    for (entity, transform, aggro, config, mut ticker, mut sink) in monsters.iter_mut() {
        if !ticker.is_active() {
            continue;
        }

        if aggro.is_dead() || !aggro.is_chasing() {
            ticker.cancel();
            continue;
        }

        let Some((target_transform, Some(target_health))) =
            aggro.target().and_then(|target| targets.get(target).ok())
        else {
            logger::log(&format!("Monster {:?}: no target health, attack ticker stopped", entity));
            ticker.cancel();
            continue;
        };

        let firings = ticker.tick(delta);
        if firings == 0 {
            continue;
        }

        let distance = transform.translation.distance(target_transform.translation);
        if distance > config.attack_range || !target_health.is_alive() {
            continue;
        }

        // aggro.target() гарантированно Some (проверено выше)
        let Some(target) = aggro.target() else {
            continue;
        };

        for _ in 0..firings {
            if let Some(sink) = sink.as_mut() {
                sink.fire(AnimTrigger::Attack);
            }
            damage_requests.write(DamageRequest {
                attacker: Some(entity),
                target,
                amount: config.attack_damage,
            });
        }
    }
}
