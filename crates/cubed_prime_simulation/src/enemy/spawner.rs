//! WaveSpawner: поддерживает поток врагов вокруг игрока
//!
//! Каждые `interval` секунд, пока живых меньше `max_alive` и игрок жив,
//! спавнит врага на кольце [min_radius, max_radius] вокруг игрока.
//! Позиции берутся из DeterministicRng → одинаковый seed = одинаковые волны.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::config::{GameConfig, SpawnerConfig};
use crate::player::{Player, PlayerStats};
use crate::DeterministicRng;

use super::spawn_enemy;

#[derive(Resource, Debug, Clone)]
pub struct WaveSpawner {
    pub interval: f32,
    pub max_alive: u32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Накопленное время с последнего спавна
    elapsed: f32,
}

impl WaveSpawner {
    pub fn from_config(config: &SpawnerConfig) -> Self {
        Self {
            interval: config.interval,
            max_alive: config.max_alive,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            elapsed: 0.0,
        }
    }

    /// Продвинуть таймер. true = пора спавнить.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        true
    }
}

/// Случайная точка на кольце вокруг center
pub fn spawn_ring_position(rng: &mut impl Rng, center: Vec2, min_radius: f32, max_radius: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = if max_radius > min_radius {
        rng.gen_range(min_radius..=max_radius)
    } else {
        min_radius
    };

    center + Vec2::from_angle(angle) * radius
}

/// Система: спавн волн (Update, scaled time)
///
/// Ресурс вставляется только при `spawner.enabled`, иначе система ничего не делает.
pub fn tick_wave_spawner(
    mut commands: Commands,
    spawner: Option<ResMut<WaveSpawner>>,
    mut rng: ResMut<DeterministicRng>,
    stats: Res<PlayerStats>,
    players: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let Some(mut spawner) = spawner else {
        return;
    };

    if !spawner.tick(time.delta_secs()) {
        return;
    }

    if stats.is_player_dead || stats.current_enemies_count >= spawner.max_alive {
        return;
    }

    let Ok(player_transform) = players.single() else {
        return;
    };

    let position = spawn_ring_position(
        &mut rng.rng,
        player_transform.translation.truncate(),
        spawner.min_radius,
        spawner.max_radius,
    );
    let enemy = spawn_enemy(&mut commands, &config.enemy, position);

    crate::log(&format!("WaveSpawner: enemy {:?} at {:?}", enemy, position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tick_interval() {
        let mut spawner = WaveSpawner::from_config(&SpawnerConfig {
            interval: 1.0,
            ..default()
        });

        assert!(!spawner.tick(0.6));
        assert!(spawner.tick(0.6));
        // Остаток 0.2 переносится
        assert!(!spawner.tick(0.7));
        assert!(spawner.tick(0.2));
    }

    #[test]
    fn test_ring_position_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let center = Vec2::new(3.0, -1.0);

        for _ in 0..100 {
            let position = spawn_ring_position(&mut rng, center, 8.0, 12.0);
            let distance = position.distance(center);
            assert!((8.0 - 1e-3..=12.0 + 1e-3).contains(&distance), "distance = {}", distance);
        }
    }

    #[test]
    fn test_ring_position_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                spawn_ring_position(&mut a, Vec2::ZERO, 8.0, 12.0),
                spawn_ring_position(&mut b, Vec2::ZERO, 8.0, 12.0)
            );
        }
    }
}
