//! Explosion: одноразовый урон по площади
//!
//! Урон применяется в первом FixedUpdate шаге после spawn. Дальше entity
//! живёт только ради визуала (DespawnAfter).

use bevy::prelude::*;

use crate::combat::{damage_enemy, DamageDealt, DamageSource, Dead};
use crate::components::{Health, HealthBar};
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::player::{Player, PlayerStats};

use super::barrel::{DetonateBarrel, ExplosiveBarrel};

/// Кого задевает взрыв
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ExplosionTargets {
    /// Враги, игрок и другие бочки (цепная реакция)
    #[default]
    All,
    Enemies,
    Player,
}

impl ExplosionTargets {
    pub fn hits_enemies(self) -> bool {
        matches!(self, Self::All | Self::Enemies)
    }

    pub fn hits_player(self) -> bool {
        matches!(self, Self::All | Self::Player)
    }

    pub fn chains_barrels(self) -> bool {
        matches!(self, Self::All)
    }
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Explosion {
    pub targets: ExplosionTargets,
    /// Радиус визуала
    pub radius: f32,
    pub damage_radius: f32,
    /// Урон уже применён
    pub applied: bool,
}

impl Explosion {
    pub fn new(targets: ExplosionTargets, radius: f32, damage_radius: f32) -> Self {
        Self {
            targets,
            radius,
            damage_radius,
            applied: false,
        }
    }

    pub fn reaches(&self, center: Vec2, point: Vec2) -> bool {
        center.distance_squared(point) <= self.damage_radius * self.damage_radius
    }
}

/// Система: применить урон свежих взрывов (FixedUpdate)
#[allow(clippy::too_many_arguments)]
pub fn apply_explosions(
    mut explosions: Query<(&mut Explosion, &Transform)>,
    mut enemies: Query<(Entity, &mut Health, &mut HealthBar, &Transform), (With<Enemy>, Without<Dead>, Without<Explosion>)>,
    players: Query<&Transform, (With<Player>, Without<Explosion>)>,
    barrels: Query<(Entity, &Transform), (With<ExplosiveBarrel>, Without<Explosion>)>,
    mut stats: ResMut<PlayerStats>,
    config: Res<GameConfig>,
    mut damage_events: EventWriter<DamageDealt>,
    mut detonations: EventWriter<DetonateBarrel>,
) {
    for (mut explosion, transform) in explosions.iter_mut() {
        if explosion.applied {
            continue;
        }
        explosion.applied = true;

        let center = transform.translation.truncate();

        if explosion.targets.hits_enemies() {
            for (entity, mut health, mut bar, enemy_transform) in enemies.iter_mut() {
                if !explosion.reaches(center, enemy_transform.translation.truncate()) {
                    continue;
                }

                let dealt = damage_enemy(&mut health, &mut bar, config.barrel.explosion_damage);
                damage_events.write(DamageDealt {
                    attacker: None,
                    target: entity,
                    damage: dealt,
                    source: DamageSource::Explosion,
                });
            }
        }

        if explosion.targets.hits_player() {
            for player_transform in players.iter() {
                if explosion.reaches(center, player_transform.translation.truncate()) {
                    stats.take_damage(config.barrel.player_damage);
                }
            }
        }

        if explosion.targets.chains_barrels() {
            for (barrel, barrel_transform) in barrels.iter() {
                if explosion.reaches(center, barrel_transform.translation.truncate()) {
                    detonations.write(DetonateBarrel { barrel });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        assert!(ExplosionTargets::All.hits_enemies());
        assert!(ExplosionTargets::All.hits_player());
        assert!(ExplosionTargets::All.chains_barrels());

        assert!(ExplosionTargets::Enemies.hits_enemies());
        assert!(!ExplosionTargets::Enemies.hits_player());
        assert!(!ExplosionTargets::Enemies.chains_barrels());

        assert!(!ExplosionTargets::Player.hits_enemies());
        assert!(ExplosionTargets::Player.hits_player());
    }

    #[test]
    fn test_reaches_damage_radius() {
        let explosion = Explosion::new(ExplosionTargets::All, 2.5, 3.0);
        assert!(explosion.reaches(Vec2::ZERO, Vec2::new(3.0, 0.0)));
        assert!(!explosion.reaches(Vec2::ZERO, Vec2::new(2.2, 2.2)));
    }
}
