//! Базовый вариант движения игрока: без сглаживания, dash и hit-stop
//!
//! Velocity = move axis × speed напрямую, поворот к стику/курсору.

use bevy::prelude::*;

use super::movement::{facing_rotation, PlayerInput};

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BasicMover {
    pub move_speed: f32,
    pub aim_dead_zone: f32,
}

impl Default for BasicMover {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            aim_dead_zone: 0.3,
        }
    }
}

impl BasicMover {
    /// Смещение за шаг (длина ввода ограничена 1, диагональ не быстрее)
    pub fn displacement(&self, move_axis: Vec2, delta: f32) -> Vec2 {
        move_axis.clamp_length_max(1.0) * self.move_speed * delta
    }

    /// Направление прицела: курсор приоритетнее стика
    pub fn aim(&self, input: &PlayerInput, position: Vec2) -> Option<Vec2> {
        if let Some(cursor) = input.cursor_world {
            let to_cursor = cursor - position;
            return (to_cursor != Vec2::ZERO).then_some(to_cursor);
        }
        (input.look_axis.length() >= self.aim_dead_zone).then_some(input.look_axis)
    }
}

/// Система: движение базового варианта (FixedUpdate)
pub fn apply_basic_movement(
    mut movers: Query<(&BasicMover, &PlayerInput, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mover, input, mut transform) in movers.iter_mut() {
        transform.translation += mover.displacement(input.move_axis, delta).extend(0.0);

        if let Some(aim) = mover.aim(input, transform.translation.truncate()) {
            transform.rotation = Quat::from_rotation_z(facing_rotation(aim));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_not_faster() {
        let mover = BasicMover {
            move_speed: 10.0,
            aim_dead_zone: 0.3,
        };
        let step = mover.displacement(Vec2::new(1.0, 1.0), 0.1);
        assert!((step.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_aim_prefers_cursor() {
        let mover = BasicMover::default();
        let input = PlayerInput {
            look_axis: Vec2::X,
            cursor_world: Some(Vec2::new(0.0, 3.0)),
            ..default()
        };
        assert_eq!(mover.aim(&input, Vec2::ZERO), Some(Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn test_aim_stick_dead_zone() {
        let mover = BasicMover::default();
        let weak = PlayerInput {
            look_axis: Vec2::new(0.1, 0.0),
            ..default()
        };
        assert_eq!(mover.aim(&weak, Vec2::ZERO), None);

        let strong = PlayerInput {
            look_axis: Vec2::new(0.0, -1.0),
            ..default()
        };
        assert_eq!(mover.aim(&strong, Vec2::ZERO), Some(Vec2::NEG_Y));
    }
}
