//! Bullet: прямолинейный снаряд с ограниченным числом пробитий
//!
//! Flow:
//! 1. fire_player_blaster → spawn_bullet (sensor + DespawnAfter lifetime)
//! 2. move_bullets (Update): R · (up + inherited) × speed × dt, в локальных осях пули
//! 3. resolve_bullet_contacts (FixedUpdate): враги, бочки, BulletSolid

use bevy::prelude::*;

use crate::components::{planar_rotation, BulletSolid, Health, HealthBar};
use crate::config::BulletConfig;
use crate::contacts::{ContactShape, ContactStarted};
use crate::effects::{EffectKind, EffectRequest};
use crate::enemy::Enemy;
use crate::hazards::{DetonateBarrel, ExplosiveBarrel};

use super::damage::{damage_enemy, DamageDealt, DamageSource, Dead, DespawnAfter};

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Bullet {
    pub speed: f32,
    pub damage: u32,
    /// Сколько ещё попаданий выдержит пуля
    pub pierces_left: u32,
    /// Movement игрока в момент выстрела, прибавляется к локальному up пули
    pub inherited_velocity: Vec2,
    /// Пуля уже израсходована, ждёт деспавна
    pub spent: bool,
}

impl Bullet {
    pub fn from_config(config: &BulletConfig) -> Self {
        Self {
            speed: config.speed,
            damage: config.damage,
            pierces_left: config.pierces,
            inherited_velocity: Vec2::ZERO,
            spent: false,
        }
    }

    /// Передать пуле движение игрока
    pub fn set_player_velocity(&mut self, velocity: Vec2) {
        self.inherited_velocity = velocity;
    }

    /// Смещение за кадр в мировых координатах
    ///
    /// Inherited velocity задана в локальных осях пули, поэтому
    /// поворачивается вместе с ней.
    pub fn step(&self, rotation: Quat, delta: f32) -> Vec2 {
        let local = Vec2::Y + self.inherited_velocity;
        (rotation * local.extend(0.0)).truncate() * self.speed * delta
    }

    /// Списать одно пробитие. Возвращает true, если пуля израсходована.
    pub fn register_pierce(&mut self) -> bool {
        self.pierces_left = self.pierces_left.saturating_sub(1);
        if self.pierces_left == 0 {
            self.spent = true;
        }
        self.spent
    }
}

/// Spawn пули в позиции/повороте стрелка
pub fn spawn_bullet(
    commands: &mut Commands,
    config: &BulletConfig,
    origin: Transform,
    inherited_velocity: Vec2,
    now: f32,
) -> Entity {
    let mut bullet = Bullet::from_config(config);
    bullet.set_player_velocity(inherited_velocity);

    commands
        .spawn((
            bullet,
            origin,
            ContactShape::sensor(config.radius),
            DespawnAfter::in_seconds(now, config.lifetime),
        ))
        .id()
}

/// Система: движение пуль (Update, scaled time)
pub fn move_bullets(mut bullets: Query<(&Bullet, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (bullet, mut transform) in bullets.iter_mut() {
        let step = bullet.step(transform.rotation, delta);
        transform.translation += step.extend(0.0);
    }
}

/// Система: попадания пуль (FixedUpdate, после contact detection)
#[allow(clippy::too_many_arguments)]
pub fn resolve_bullet_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ContactStarted>,
    mut bullets: Query<(&mut Bullet, &Transform)>,
    mut enemies: Query<(&mut Health, &mut HealthBar), (With<Enemy>, Without<Dead>)>,
    barrels: Query<(), With<ExplosiveBarrel>>,
    solids: Query<(), With<BulletSolid>>,
    mut damage_events: EventWriter<DamageDealt>,
    mut detonations: EventWriter<DetonateBarrel>,
    mut effects: EventWriter<EffectRequest>,
) {
    for contact in contacts.read() {
        let Ok((mut bullet, transform)) = bullets.get_mut(contact.entity) else {
            continue;
        };
        if bullet.spent {
            continue;
        }

        let mut stopped_by_solid = false;

        if let Ok((mut health, mut bar)) = enemies.get_mut(contact.other) {
            let dealt = damage_enemy(&mut health, &mut bar, bullet.damage);
            damage_events.write(DamageDealt {
                attacker: None,
                target: contact.other,
                damage: dealt,
                source: DamageSource::Bullet,
            });
            bullet.register_pierce();
        } else if barrels.contains(contact.other) {
            detonations.write(DetonateBarrel {
                barrel: contact.other,
            });
            bullet.register_pierce();
        } else if solids.contains(contact.other) {
            stopped_by_solid = bullet.register_pierce();
        } else {
            continue;
        }

        if !bullet.spent {
            continue;
        }

        if stopped_by_solid {
            effects.write(EffectRequest {
                kind: EffectKind::WallImpact,
                position: transform.translation.truncate(),
                rotation: -planar_rotation(transform),
            });
        }

        if let Ok(mut entity_commands) = commands.get_entity(contact.entity) {
            entity_commands.despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pierce_spends_on_first_hit() {
        let mut bullet = Bullet::from_config(&BulletConfig::default());
        assert_eq!(bullet.pierces_left, 1);

        assert!(bullet.register_pierce());
        assert!(bullet.spent);
        assert_eq!(bullet.pierces_left, 0);
    }

    #[test]
    fn test_multi_pierce() {
        let mut bullet = Bullet::from_config(&BulletConfig {
            pierces: 3,
            ..default()
        });

        assert!(!bullet.register_pierce());
        assert!(!bullet.register_pierce());
        assert!(bullet.register_pierce());
    }

    #[test]
    fn test_step_adds_inherited_velocity() {
        let mut bullet = Bullet::from_config(&BulletConfig::default());
        bullet.set_player_velocity(Vec2::new(1.0, 0.0));

        // (up + (1,0)) * 50 * 0.1
        let step = bullet.step(Quat::IDENTITY, 0.1);
        assert!((step - Vec2::new(5.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_step_rotates_inherited_velocity_with_bullet() {
        let mut bullet = Bullet::from_config(&BulletConfig::default());
        bullet.set_player_velocity(Vec2::new(0.0, 1.0));

        // Пуля смотрит в -X: локальный (0, 2) → мировой (-2, 0)
        let rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let step = bullet.step(rotation, 0.1);
        assert!((step - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }
}
