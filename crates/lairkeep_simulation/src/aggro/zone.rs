//! Zone sensor — trigger volume монстра
//!
//! Источники ZoneContact:
//! - rapier sensor collider (CollisionEvent::Started/Stopped)
//! - headless proximity sweep (ProximitySensor, без физики)
//!
//! `route_zone_contacts` фильтрует по тегу и дергает AggroState::set_player_in_zone у владельца.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::aggro::{AggroState, AttackTicker, ZoneResponse};
use crate::components::{ActorTag, AnimFlag, AnimationSink, Dead};
use crate::logger;

/// Trigger volume, сообщающий владельцу о входе/выходе цели
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ZoneSensor {
    /// Монстр-владелец
    pub owner: Entity,
    /// Единственный принимаемый тег
    pub accepted: ActorTag,
    /// false после смерти владельца
    pub enabled: bool,
}

impl ZoneSensor {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            accepted: ActorTag::Player,
            enabled: true,
        }
    }
}

/// Headless сенсор: сфера radius вокруг Transform владельца
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ProximitySensor {
    pub radius: f32,
    occupants: Vec<Entity>,
}

impl ProximitySensor {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            occupants: Vec::new(),
        }
    }

    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneContactKind {
    Entered,
    Exited,
}

/// Событие: entity вошла/вышла из zone sensor
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ZoneContact {
    pub sensor: Entity,
    pub other: Entity,
    pub kind: ZoneContactKind,
}

/// Система: rapier CollisionEvent → ZoneContact (для коллайдеров с ZoneSensor)
pub fn collision_events_to_zone_contacts(
    mut collisions: EventReader<CollisionEvent>,
    sensors: Query<(), With<ZoneSensor>>,
    mut contacts: EventWriter<ZoneContact>,
) {
    for collision in collisions.read() {
        let (a, b, kind) = match collision {
            CollisionEvent::Started(a, b, _) => (*a, *b, ZoneContactKind::Entered),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, ZoneContactKind::Exited),
        };

        if sensors.contains(a) {
            contacts.write(ZoneContact { sensor: a, other: b, kind });
        }
        if sensors.contains(b) {
            contacts.write(ZoneContact { sensor: b, other: a, kind });
        }
    }
}

/// Система: headless proximity sweep → ZoneContact (только переходы)
///
/// Despawned occupant уходит из списка; его Exited роутинг отбросит (тега уже нет),
/// потерю цели монстр ловит сам в `AggroState::evaluate(None)`.
pub fn sense_zone_by_proximity(
    mut sensors: Query<(Entity, &ZoneSensor, &mut ProximitySensor)>,
    positions: Query<&Transform>,
    candidates: Query<(Entity, &Transform), With<ActorTag>>,
    mut contacts: EventWriter<ZoneContact>,
) {
    for (sensor_entity, sensor, mut proximity) in sensors.iter_mut() {
        if !sensor.enabled {
            continue;
        }

        let Ok(origin) = positions.get(sensor.owner).map(|t| t.translation) else {
            continue;
        };

        let radius = proximity.radius;
        let inside: Vec<Entity> = candidates
            .iter()
            .filter(|(entity, _)| *entity != sensor.owner)
            .filter(|(_, transform)| transform.translation.distance(origin) <= radius)
            .map(|(entity, _)| entity)
            .collect();

        for &other in proximity.occupants.iter().filter(|e| !inside.contains(e)) {
            contacts.write(ZoneContact {
                sensor: sensor_entity,
                other,
                kind: ZoneContactKind::Exited,
            });
        }

        for &other in inside.iter().filter(|e| !proximity.occupants.contains(e)) {
            contacts.write(ZoneContact {
                sensor: sensor_entity,
                other,
                kind: ZoneContactKind::Entered,
            });
        }

        proximity.occupants = inside;
    }
}

/// Тег контакта: на самой entity или на её родителе (коллайдер-child)
fn resolve_tagged(
    entity: Entity,
    tags: &Query<&ActorTag>,
    parents: &Query<&ChildOf>,
) -> Option<(Entity, ActorTag)> {
    if let Ok(tag) = tags.get(entity) {
        return Some((entity, *tag));
    }

    let parent = parents.get(entity).ok()?.parent();
    tags.get(parent).ok().map(|tag| (parent, *tag))
}

/// Система: ZoneContact → AggroState владельца (SetPlayerInZone)
pub fn route_zone_contacts(
    mut contacts: EventReader<ZoneContact>,
    sensors: Query<&ZoneSensor>,
    tags: Query<&ActorTag>,
    parents: Query<&ChildOf>,
    mut owners: Query<
        (&mut AggroState, &mut AttackTicker, Option<&mut AnimationSink>),
        Without<Dead>,
    >,
) {
    for contact in contacts.read() {
        let Ok(sensor) = sensors.get(contact.sensor) else {
            continue;
        };

        if !sensor.enabled {
            continue;
        }

        let Some((actor, tag)) = resolve_tagged(contact.other, &tags, &parents) else {
            continue;
        };

        if tag != sensor.accepted {
            continue;
        }

        let Ok((mut aggro, mut ticker, sink)) = owners.get_mut(sensor.owner) else {
            logger::log_warning(&format!(
                "ZoneSensor {:?}: owner {:?} has no live AggroState",
                contact.sensor, sensor.owner
            ));
            continue;
        };

        let in_zone = contact.kind == ZoneContactKind::Entered;
        match aggro.set_player_in_zone(in_zone, actor) {
            ZoneResponse::Engage => {
                ticker.start();
                logger::log(&format!("Monster {:?}: engaging {:?}", sensor.owner, actor));
            }
            ZoneResponse::Exited => {
                if let Some(mut sink) = sink {
                    sink.set_flag(AnimFlag::Attacking, false);
                }
            }
            ZoneResponse::Refresh | ZoneResponse::Ignored => {}
        }
    }
}

/// Spawn rapier sensor (сфера radius) как child монстра
pub fn spawn_aggro_zone(commands: &mut Commands, monster: Entity, radius: f32) -> Entity {
    let sensor = commands
        .spawn((
            Transform::default(),
            ZoneSensor::new(monster),
            Collider::ball(radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    commands.entity(monster).add_child(sensor);
    sensor
}

/// Spawn headless proximity сенсора (без физики)
pub fn spawn_proximity_zone(commands: &mut Commands, monster: Entity, radius: f32) -> Entity {
    let sensor = commands
        .spawn((ZoneSensor::new(monster), ProximitySensor::new(radius)))
        .id();

    commands.entity(monster).add_child(sensor);
    sensor
}
