//! Tests for player movement logic.

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy::prelude::*;

    use crate::error::GameplayError;
    use crate::player::movement::*;

    fn controller(scheme: InputScheme, dash_direction: DashDirection) -> PlayerController {
        PlayerController {
            move_speed: 5.0,
            base_dash_speed: 15.0,
            dash_duration: 0.5,
            deceleration: 10.0,
            joystick_dead_zone: 0.3,
            input_scheme: scheme,
            dash_direction,
        }
    }

    #[test]
    fn test_dash_in_movement_direction_is_normalized() {
        let controller = controller(InputScheme::Controller, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);

        assert!(motor.begin_dash(controller.dash_direction, Vec2::new(3.0, 4.0)));
        assert!(motor.is_dashing);
        assert!((motor.dash_dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_dash_ignored_while_dashing() {
        let controller = controller(InputScheme::Controller, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);

        motor.begin_dash(controller.dash_direction, Vec2::X);
        assert!(!motor.begin_dash(controller.dash_direction, Vec2::Y));
        assert_eq!(motor.dash_dir, Vec2::X);
    }

    #[test]
    fn test_dash_in_aim_direction_uses_last_dir() {
        let controller = controller(InputScheme::Controller, DashDirection::InAimDirection);
        let mut motor = PlayerMotor::new(&controller);
        motor.last_dir = Vec2::new(-2.0, 0.0);

        motor.begin_dash(controller.dash_direction, Vec2::Y);
        assert_eq!(motor.dash_dir, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_dash_speed_decays_then_resets() {
        let controller = controller(InputScheme::Controller, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);
        motor.begin_dash(controller.dash_direction, Vec2::X);

        // (15 - 5) * 0.25 / 0.5 = 5 за шаг
        motor.tick_dash(&controller, 0.25);
        assert!(motor.is_dashing);
        assert_eq!(motor.dash_speed, 10.0);

        motor.tick_dash(&controller, 0.25);
        assert!(!motor.is_dashing);
        assert_eq!(motor.dash_speed, 15.0);
    }

    #[test]
    fn test_dashing_overrides_movement() {
        let controller = controller(InputScheme::Controller, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);

        motor.frame_update(&controller, Vec2::X, None, true, 0.02);
        assert!(motor.is_dashing);

        // Игрок повернул стик, но dash продолжается в исходном направлении
        motor.frame_update(&controller, Vec2::Y, None, false, 0.02);
        assert_eq!(motor.movement, Vec2::X);
        assert_eq!(motor.target_speed(&controller), motor.dash_speed);
    }

    #[test]
    fn test_dead_zone_keeps_last_direction() {
        let controller = controller(InputScheme::Controller, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);

        motor.frame_update(&controller, Vec2::ZERO, Some(Vec2::new(1.0, 0.0)), false, 0.02);
        assert_eq!(motor.direction, Vec2::X);

        // 0.1 < dead zone 0.3 → направление не меняется
        motor.frame_update(&controller, Vec2::ZERO, Some(Vec2::new(0.0, 0.1)), false, 0.02);
        assert_eq!(motor.direction, Vec2::X);
    }

    #[test]
    fn test_keyboard_aim_ignores_dead_zone() {
        let controller = controller(InputScheme::Keyboard, DashDirection::InMovementDirection);
        let mut motor = PlayerMotor::new(&controller);

        motor.frame_update(&controller, Vec2::ZERO, Some(Vec2::new(0.0, -0.05)), false, 0.02);
        assert_eq!(motor.direction, Vec2::new(0.0, -0.05));

        // Курсор вне окна: прежнее направление
        motor.frame_update(&controller, Vec2::ZERO, None, false, 0.02);
        assert_eq!(motor.direction, Vec2::new(0.0, -0.05));
    }

    #[test]
    fn test_sample_input_by_scheme() {
        let input = PlayerInput {
            joysticks: None,
            move_axis: Vec2::X,
            look_axis: Vec2::Y,
            cursor_world: Some(Vec2::new(5.0, 5.0)),
            dash_pressed: false,
            fire_held: false,
        };

        let (movement, aim) = sample_input(InputScheme::Keyboard, &input, Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(movement, Vec2::X);
        assert_eq!(aim, Some(Vec2::new(4.0, 4.0)));

        let (_, aim) = sample_input(InputScheme::Controller, &input, Vec2::ZERO).unwrap();
        assert_eq!(aim, Some(Vec2::Y));

        let err = sample_input(InputScheme::Mobile, &input, Vec2::ZERO).unwrap_err();
        assert!(matches!(err, GameplayError::JoysticksNotLinked));
    }

    #[test]
    fn test_sample_input_mobile_joysticks() {
        let input = PlayerInput {
            joysticks: Some(VirtualJoysticks {
                move_direction: Vec2::new(0.0, 1.0),
                aim_direction: Vec2::new(1.0, 0.0),
            }),
            ..default()
        };

        let (movement, aim) = sample_input(InputScheme::Mobile, &input, Vec2::ZERO).unwrap();
        assert_eq!(movement, Vec2::Y);
        assert_eq!(aim, Some(Vec2::X));
    }

    #[test]
    fn test_blend_velocity_decelerates() {
        let velocity = blend_velocity(Vec2::new(10.0, 0.0), Vec2::ZERO, 5.0, 10.0, 0.02);
        // t = 10 * 0.02 = 0.2
        assert!((velocity.x - 8.0).abs() < 1e-5);

        // t clamp: 20 * 1.0 → 1.0 → полная остановка
        let stopped = blend_velocity(Vec2::new(10.0, 0.0), Vec2::ZERO, 5.0, 20.0, 1.0);
        assert_eq!(stopped, Vec2::ZERO);
    }

    #[test]
    fn test_blend_velocity_accelerates_towards_target() {
        let velocity = blend_velocity(Vec2::ZERO, Vec2::Y, 5.0, 10.0, 0.02);
        // t = 0.02 * 10 = 0.2 → 0.2 * 5
        assert!((velocity.y - 1.0).abs() < 1e-5);

        let mut current = Vec2::ZERO;
        for _ in 0..200 {
            current = blend_velocity(current, Vec2::Y, 5.0, 10.0, 0.02);
        }
        assert!((current.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_facing_rotation() {
        assert!(facing_rotation(Vec2::Y).abs() < 1e-6);
        assert!((facing_rotation(Vec2::X) + FRAC_PI_2).abs() < 1e-6);
        assert!((facing_rotation(Vec2::NEG_X) - FRAC_PI_2).abs() < 1e-6);
    }
}
