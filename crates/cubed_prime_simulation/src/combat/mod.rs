//! Combat module: урон, смерть врагов, пули и blaster игрока
//!
//! Порядок выполнения:
//! - Update/Act: fire_player_blaster → move_bullets
//! - Update/Cleanup: despawn_after_timeout
//! - FixedUpdate/ProjectileHits: resolve_bullet_contacts (после contact detection)
//! - FixedUpdate/Deaths: resolve_enemy_deaths (после всех источников урона)

use bevy::prelude::*;

use crate::{FixedGameplaySet, FrameSet};

pub mod bullet;
pub mod damage;
pub mod weapon;

#[cfg(test)]
mod damage_tests;

// Re-export основных типов
pub use bullet::{spawn_bullet, Bullet};
pub use damage::{damage_enemy, DamageDealt, DamageSource, Dead, DespawnAfter, EntityDied};
pub use weapon::{Blaster, BlasterFired};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<BlasterFired>();

        app.add_systems(
            Update,
            (
                (weapon::fire_player_blaster, bullet::move_bullets)
                    .chain()
                    .in_set(FrameSet::Act),
                damage::despawn_after_timeout.in_set(FrameSet::Cleanup),
            ),
        );

        app.add_systems(
            FixedUpdate,
            (
                bullet::resolve_bullet_contacts.in_set(FixedGameplaySet::ProjectileHits),
                damage::resolve_enemy_deaths.in_set(FixedGameplaySet::Deaths),
            ),
        );
    }
}
