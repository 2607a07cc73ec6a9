//! Contacts: trigger/collision "enter" callbacks для gameplay систем
//!
//! Архитектура:
//! - Gameplay системы читают только `ContactStarted` (одно событие на каждую сторону пары)
//! - Источник событий подключается отдельным plugin:
//!   - `HeadlessContactsPlugin`: circle overlap без физического движка (тесты, headless runner)
//!   - `RapierContactsPlugin`: rapier2d collision events (client)
//! - Trigger если хотя бы один коллайдер sensor, иначе Solid

use std::collections::HashSet;

use bevy::prelude::*;

pub mod rapier;

pub use rapier::RapierContactsPlugin;

/// Коллайдер gameplay сущности (круг)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ContactShape {
    pub radius: f32,
    /// true = trigger (не толкает, только сообщает о входе)
    pub sensor: bool,
}

impl ContactShape {
    pub fn sensor(radius: f32) -> Self {
        Self { radius, sensor: true }
    }

    pub fn solid(radius: f32) -> Self {
        Self { radius, sensor: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// OnTriggerEnter: хотя бы одна сторона sensor
    Trigger,
    /// OnCollisionEnter: обе стороны solid
    Solid,
}

impl ContactKind {
    pub fn between(a: &ContactShape, b: &ContactShape) -> Self {
        if a.sensor || b.sensor {
            Self::Trigger
        } else {
            Self::Solid
        }
    }
}

/// Event: `entity` начал касаться `other`
///
/// Для каждой новой пары пишется два события (по одному на сторону),
/// как если бы каждый скрипт получил свой callback.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactStarted {
    pub entity: Entity,
    pub other: Entity,
    pub kind: ContactKind,
}

/// Все системы, производящие ContactStarted
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactDetectionSet;

/// Записать события для обеих сторон пары
pub fn write_pair(events: &mut EventWriter<ContactStarted>, a: Entity, b: Entity, kind: ContactKind) {
    events.write(ContactStarted { entity: a, other: b, kind });
    events.write(ContactStarted { entity: b, other: a, kind });
}

/// Пары, которые касались на прошлом шаге (ключ: (min, max))
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts {
    pairs: HashSet<(Entity, Entity)>,
}

impl ActiveContacts {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn ordered_pair(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Пересекаются ли два круга
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Система: headless overlap detection
///
/// O(n²) по всем ContactShape: сцены маленькие.
/// Сортировка по Entity даёт детерминированный порядок событий.
pub fn detect_overlaps(
    shapes: Query<(Entity, &ContactShape, &Transform)>,
    mut active: ResMut<ActiveContacts>,
    mut events: EventWriter<ContactStarted>,
) {
    let mut bodies: Vec<(Entity, ContactShape, Vec2)> = shapes
        .iter()
        .map(|(entity, shape, transform)| (entity, *shape, transform.translation.truncate()))
        .collect();
    bodies.sort_by_key(|(entity, _, _)| *entity);

    let mut touching = HashSet::new();

    for (i, (a, a_shape, a_pos)) in bodies.iter().enumerate() {
        for (b, b_shape, b_pos) in bodies.iter().skip(i + 1) {
            if !circles_overlap(*a_pos, a_shape.radius, *b_pos, b_shape.radius) {
                continue;
            }

            let pair = ordered_pair(*a, *b);
            touching.insert(pair);

            if !active.pairs.contains(&pair) {
                write_pair(&mut events, *a, *b, ContactKind::between(a_shape, b_shape));
            }
        }
    }

    // Разошедшиеся и деспавненные пары забываем: следующий вход снова даст событие
    active.pairs = touching;
}

/// Plugin: contacts без физического движка
pub struct HeadlessContactsPlugin;

impl Plugin for HeadlessContactsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactStarted>()
            .init_resource::<ActiveContacts>()
            .add_systems(FixedUpdate, detect_overlaps.in_set(ContactDetectionSet));
    }
}
