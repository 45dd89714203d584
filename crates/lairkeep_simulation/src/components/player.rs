//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Цель монстра на спавне ищется по `ActorTag::Player`, не по этому маркеру.
/// Input слой пишет MovementInput / PlayerAttackIntent только для таких entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
