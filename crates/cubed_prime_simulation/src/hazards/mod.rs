//! Опасности окружения: взрывающиеся бочки и взрывы
//!
//! Цепочка: DetonateBarrel → destroy_barrel → Explosion → apply_explosions
//! → (урон врагам/игроку, DetonateBarrel соседям на следующем шаге)

use bevy::prelude::*;

use crate::{FixedGameplaySet, FrameSet};

pub mod barrel;
pub mod explosion;

pub use barrel::{destroy_barrel, spawn_barrel, BarrelRespawn, DetonateBarrel, ExplosiveBarrel};
pub use explosion::{Explosion, ExplosionTargets};

pub struct HazardsPlugin;

impl Plugin for HazardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DetonateBarrel>();

        app.add_systems(
            FixedUpdate,
            (barrel::detonate_barrels, explosion::apply_explosions)
                .chain()
                .in_set(FixedGameplaySet::HazardHits),
        );

        app.add_systems(Update, barrel::respawn_barrels.in_set(FrameSet::Cleanup));
    }
}
