//! Поведение врага: идти к игроку или держать дистанцию

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::MovementCommand;
use crate::player::Player;

use super::Enemy;

/// Куда враг должен идти в этом кадре
///
/// Ближе preferred_distance → отходит на (preferred − 0.5) от игрока по линии игрок→враг.
/// Иначе идёт прямо к игроку.
pub fn ideal_destination(enemy_position: Vec2, player_position: Vec2, preferred_distance: f32) -> Vec2 {
    let away = enemy_position - player_position;

    if away.length() < preferred_distance {
        player_position + away.normalize_or_zero() * (preferred_distance - 0.5)
    } else {
        player_position
    }
}

/// Система: каждый кадр обновить цель движения (SetDestination)
pub fn enemy_behaviour(
    players: Query<&Transform, With<Player>>,
    mut enemies: Query<(&Enemy, &Transform, &mut MovementCommand), Without<Dead>>,
) {
    // Нет игрока (ещё не заспавнен или умер): враги стоят
    let Ok(player_transform) = players.single() else {
        return;
    };
    let player_position = player_transform.translation.truncate();

    for (enemy, transform, mut command) in enemies.iter_mut() {
        let target = ideal_destination(transform.translation.truncate(), player_position, enemy.preferred_distance);
        *command = MovementCommand::MoveToPosition { target };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chases_player_by_default() {
        let target = ideal_destination(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.0);
        assert_eq!(target, Vec2::ZERO);
    }

    #[test]
    fn test_keeps_preferred_distance() {
        // Враг в 2 единицах, хочет 5 → цель в 4.5 от игрока по той же линии
        let target = ideal_destination(Vec2::new(0.0, 2.0), Vec2::new(0.0, 0.0), 5.0);
        assert!((target - Vec2::new(0.0, 4.5)).length() < 1e-5);
    }

    #[test]
    fn test_far_enemy_with_preferred_distance_approaches() {
        let target = ideal_destination(Vec2::new(20.0, 0.0), Vec2::new(1.0, 1.0), 5.0);
        assert_eq!(target, Vec2::new(1.0, 1.0));
    }
}
