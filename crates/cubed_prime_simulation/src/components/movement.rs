//! Movement компоненты: команды перемещения для AI и их исполнение

use bevy::prelude::*;

/// Команда движения для AI актора
///
/// Архитектура:
/// - Behaviour система пишет MovementCommand (high-level intent, как SetDestination)
/// - `execute_movement_commands` двигает entity по прямой со скоростью MovementSpeed
/// - Pathfinding вокруг препятствий: ответственность хоста (navmesh)
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec2 },
    /// Остановиться немедленно
    Stop,
}

/// Скорость движения (units/sec)
#[derive(Component, Clone, Copy, Debug)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 3.5 }
    }
}

/// Дистанция, на которой цель считается достигнутой
pub const ARRIVAL_EPSILON: f32 = 0.05;

/// Один шаг к цели без перелёта
pub fn step_towards(position: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let to_target = target - position;
    let distance = to_target.length();

    if distance <= max_step || distance <= ARRIVAL_EPSILON {
        target
    } else {
        position + to_target / distance * max_step
    }
}

/// Система: исполнение MovementCommand (stand-in для navmesh agent)
///
/// Работает в FixedUpdate. Stop сбрасывается в Idle после исполнения.
pub fn execute_movement_commands(
    mut query: Query<(&mut MovementCommand, &MovementSpeed, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut command, speed, mut transform) in query.iter_mut() {
        match *command {
            MovementCommand::Idle => {}
            MovementCommand::MoveToPosition { target } => {
                let position = transform.translation.truncate();
                let next = step_towards(position, target, speed.speed * delta);
                transform.translation.x = next.x;
                transform.translation.y = next.y;
            }
            MovementCommand::Stop => {
                *command = MovementCommand::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_towards_partial() {
        let next = step_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        assert_eq!(next, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_step_towards_no_overshoot() {
        let next = step_towards(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0);
        assert_eq!(next, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_movement_command_default() {
        assert_eq!(MovementCommand::default(), MovementCommand::Idle);
    }
}
