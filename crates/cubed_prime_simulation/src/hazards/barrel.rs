//! Explosive barrel: взрывается от пули или соседнего взрыва, потом отрастает

use bevy::prelude::*;

use crate::combat::DespawnAfter;
use crate::components::planar_rotation;
use crate::config::{BarrelConfig, GameConfig};
use crate::contacts::ContactShape;
use crate::effects::{EffectKind, EffectRequest};

use super::explosion::{Explosion, ExplosionTargets};

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ExplosiveBarrel {
    /// Радиус визуального взрыва
    pub particle_radius: f32,
    /// Радиус урона
    pub damage_radius: f32,
    /// Секунды до повторного появления
    pub cooldown: f32,
}

impl ExplosiveBarrel {
    pub fn from_config(config: &BarrelConfig) -> Self {
        Self {
            particle_radius: config.particle_radius,
            damage_radius: config.damage_radius,
            cooldown: config.cooldown,
        }
    }
}

/// Event: бочка должна взорваться
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetonateBarrel {
    pub barrel: Entity,
}

/// Место, где бочка появится снова
#[derive(Component, Debug, Clone, Copy)]
pub struct BarrelRespawn {
    pub transform: Transform,
    pub respawn_time: f32,
}

pub fn spawn_barrel(commands: &mut Commands, config: &BarrelConfig, transform: Transform) -> Entity {
    commands
        .spawn((
            ExplosiveBarrel::from_config(config),
            transform,
            ContactShape::solid(config.contact_radius),
        ))
        .id()
}

/// Взорвать бочку: Explosion (targets All) + эффект + отложенный respawn, бочку удалить
pub fn destroy_barrel(
    commands: &mut Commands,
    entity: Entity,
    barrel: &ExplosiveBarrel,
    transform: &Transform,
    config: &BarrelConfig,
    now: f32,
    effects: &mut EventWriter<EffectRequest>,
) {
    commands.spawn((
        Explosion::new(ExplosionTargets::All, barrel.particle_radius, barrel.damage_radius),
        *transform,
        DespawnAfter::in_seconds(now, config.effect_lifetime),
    ));

    effects.write(EffectRequest {
        kind: EffectKind::Explosion,
        position: transform.translation.truncate(),
        rotation: planar_rotation(transform),
    });

    commands.spawn(BarrelRespawn {
        transform: *transform,
        respawn_time: now + barrel.cooldown,
    });

    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.despawn();
    }
}

/// Система: обработка DetonateBarrel (FixedUpdate)
///
/// Одна бочка взрывается один раз, даже если в неё попало несколько пуль за шаг.
pub fn detonate_barrels(
    mut commands: Commands,
    mut detonations: EventReader<DetonateBarrel>,
    barrels: Query<(&ExplosiveBarrel, &Transform)>,
    config: Res<GameConfig>,
    time: Res<Time<Virtual>>,
    mut effects: EventWriter<EffectRequest>,
) {
    let mut targets: Vec<Entity> = detonations.read().map(|event| event.barrel).collect();
    targets.sort();
    targets.dedup();

    let now = time.elapsed_secs();

    for entity in targets {
        let Ok((barrel, transform)) = barrels.get(entity) else {
            continue;
        };

        crate::log(&format!("Barrel {:?} exploded", entity));
        destroy_barrel(&mut commands, entity, barrel, transform, &config.barrel, now, &mut effects);
    }
}

/// Система: бочки появляются снова после cooldown
pub fn respawn_barrels(
    mut commands: Commands,
    pending: Query<(Entity, &BarrelRespawn)>,
    config: Res<GameConfig>,
    time: Res<Time<Virtual>>,
) {
    let now = time.elapsed_secs();

    for (entity, respawn) in pending.iter() {
        if now < respawn.respawn_time {
            continue;
        }

        spawn_barrel(&mut commands, &config.barrel, respawn.transform);
        commands.entity(entity).despawn();
    }
}
