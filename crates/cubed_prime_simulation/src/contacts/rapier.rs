//! Rapier2d мост: ContactShape → rapier Collider, CollisionEvent → ContactStarted
//!
//! Используется клиентом вместе с `RapierPhysicsPlugin`. Все gameplay тела
//! kinematic (двигаем Transform сами), rapier нужен только для детекции.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::{write_pair, ContactDetectionSet, ContactKind, ContactShape, ContactStarted};

/// Навесить rapier компоненты на новые ContactShape
pub fn attach_rapier_colliders(
    mut commands: Commands,
    added: Query<(Entity, &ContactShape), Added<ContactShape>>,
) {
    for (entity, shape) in added.iter() {
        let Ok(mut entity_commands) = commands.get_entity(entity) else {
            continue;
        };

        entity_commands.insert((
            RigidBody::KinematicPositionBased,
            Collider::ball(shape.radius),
            ActiveEvents::COLLISION_EVENTS,
            // kinematic ↔ kinematic пары по умолчанию не сообщаются
            ActiveCollisionTypes::all(),
        ));

        if shape.sensor {
            entity_commands.insert(Sensor);
        }
    }
}

/// Конвертировать rapier CollisionEvent::Started в ContactStarted
pub fn forward_rapier_collisions(
    mut collisions: EventReader<CollisionEvent>,
    shapes: Query<&ContactShape>,
    mut events: EventWriter<ContactStarted>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _flags) = collision else {
            continue;
        };

        // Коллайдеры без ContactShape (чужие) игнорируем
        let (Ok(a_shape), Ok(b_shape)) = (shapes.get(*a), shapes.get(*b)) else {
            continue;
        };

        write_pair(&mut events, *a, *b, ContactKind::between(a_shape, b_shape));
    }
}

/// Plugin: contacts из rapier2d (требует RapierPhysicsPlugin)
pub struct RapierContactsPlugin;

impl Plugin for RapierContactsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactStarted>()
            .add_systems(Update, attach_rapier_colliders)
            .add_systems(FixedUpdate, forward_rapier_collisions.in_set(ContactDetectionSet));
    }
}
