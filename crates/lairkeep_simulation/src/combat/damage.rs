//! Damage / heal pipeline (health ledger events)
//!
//! Любой актор (тикер монстра, melee игрока, animation strike) только шлёт
//! DamageRequest / HealRequest. Health мутирует одна система — `apply_health_requests`,
//! поэтому реентрантности между акторами нет.
//!
//! Наружу публикуются:
//! - HealthChanged на каждое изменение (UI, звук)
//! - EntityDied ровно один раз на ledger (переход current > 0 → 0)

use bevy::prelude::*;
use crate::components::{Health, HealthChange};
use crate::logger;

/// Запрос: нанести урон
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
}

/// Запрос: вылечить
#[derive(Event, Debug, Clone)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Событие: здоровье изменилось
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: применить damage/heal запросы к Health
///
/// 1. DamageRequest в порядке отправки
/// 2. HealRequest в порядке отправки
/// 3. HealthChanged + EntityDied по результату каждой мутации
pub fn apply_health_requests(
    mut damage_requests: EventReader<DamageRequest>,
    mut heal_requests: EventReader<HealRequest>,
    mut health_changed: EventWriter<HealthChanged>,
    mut entity_died: EventWriter<EntityDied>,
    mut targets: Query<&mut Health>,
) {
    for request in damage_requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "DamageRequest: target {:?} has no Health component",
                request.target
            ));
            continue;
        };

        let change = health.take_damage(request.amount);
        publish_change(request.target, change, request.attacker, &mut health_changed, &mut entity_died);
    }

    for request in heal_requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "HealRequest: target {:?} has no Health component",
                request.target
            ));
            continue;
        };

        let change = health.heal(request.amount);
        publish_change(request.target, change, None, &mut health_changed, &mut entity_died);
    }
}

fn publish_change(
    entity: Entity,
    change: HealthChange,
    killer: Option<Entity>,
    health_changed: &mut EventWriter<HealthChanged>,
    entity_died: &mut EventWriter<EntityDied>,
) {
    match change {
        HealthChange::Ignored => {}
        HealthChange::Changed { current, max } => {
            health_changed.write(HealthChanged { entity, current, max });
        }
        HealthChange::Died { max } => {
            health_changed.write(HealthChanged { entity, current: 0, max });
            entity_died.write(EntityDied { entity, killer });

            logger::log_info(&format!("Entity {:?} killed by {:?}", entity, killer));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> App {
        let mut app = App::new();
        app.add_event::<DamageRequest>()
            .add_event::<HealRequest>()
            .add_event::<HealthChanged>()
            .add_event::<EntityDied>()
            .add_systems(Update, apply_health_requests);
        app
    }

    fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
        app.world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_damage_publishes_changes_and_single_death() {
        let mut app = setup();
        let target = app.world_mut().spawn(Health::new(100)).id();

        app.world_mut().send_event(DamageRequest { attacker: None, target, amount: 30 });
        app.update();

        assert_eq!(
            drain::<HealthChanged>(&mut app),
            vec![HealthChanged { entity: target, current: 70, max: 100 }]
        );
        assert!(drain::<EntityDied>(&mut app).is_empty());

        app.world_mut().send_event(DamageRequest { attacker: None, target, amount: 100 });
        app.world_mut().send_event(DamageRequest { attacker: None, target, amount: 10 });
        app.update();

        // Вторая порция урона уже по мертвому — ничего не публикуется
        assert_eq!(
            drain::<HealthChanged>(&mut app),
            vec![HealthChanged { entity: target, current: 0, max: 100 }]
        );
        assert_eq!(drain::<EntityDied>(&mut app).len(), 1);
        assert_eq!(app.world().get::<Health>(target).map(Health::current), Some(0));
    }

    #[test]
    fn test_killer_reported() {
        let mut app = setup();
        let attacker = app.world_mut().spawn_empty().id();
        let target = app.world_mut().spawn(Health::new(5)).id();

        app.world_mut().send_event(DamageRequest { attacker: Some(attacker), target, amount: 5 });
        app.update();

        let died = drain::<EntityDied>(&mut app);
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].entity, target);
        assert_eq!(died[0].killer, Some(attacker));
    }

    #[test]
    fn test_heal_publishes_change() {
        let mut app = setup();
        let target = app.world_mut().spawn(Health::new(100)).id();

        app.world_mut().send_event(DamageRequest { attacker: None, target, amount: 60 });
        app.world_mut().send_event(HealRequest { target, amount: 20 });
        app.update();

        assert_eq!(
            drain::<HealthChanged>(&mut app),
            vec![
                HealthChanged { entity: target, current: 40, max: 100 },
                HealthChanged { entity: target, current: 60, max: 100 },
            ]
        );
    }

    #[test]
    fn test_missing_health_is_skipped() {
        let mut app = setup();
        let target = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(DamageRequest { attacker: None, target, amount: 10 });
        app.update();

        assert!(drain::<HealthChanged>(&mut app).is_empty());
    }
}
