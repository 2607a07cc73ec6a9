//! Устройства ввода → PlayerInput
//!
//! Клавиатура/мышь: WASD, курсор, Space (dash), ЛКМ (огонь).
//! Геймпад: левый стик, правый стик, South (dash), RT (огонь).

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use cubed_prime_simulation::{FrameSet, Player, PlayerInput};

use crate::rendering::MainCamera;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sample_devices.before(FrameSet::Input));
    }
}

fn keyboard_axis(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    // Диагональ не быстрее прямой
    axis.normalize_or_zero()
}

/// Курсор в мировых координатах (None если курсор вне окна)
fn cursor_world(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

fn sample_devices(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    gamepads: Query<&Gamepad>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut players: Query<&mut PlayerInput, With<Player>>,
) {
    let Ok(mut input) = players.single_mut() else {
        return;
    };

    let mut move_axis = keyboard_axis(&keys);
    let mut look_axis = Vec2::ZERO;
    let mut dash = keys.just_pressed(KeyCode::Space);
    let mut fire = mouse.pressed(MouseButton::Left);

    if let Some(gamepad) = gamepads.iter().next() {
        if move_axis == Vec2::ZERO {
            move_axis = gamepad.left_stick();
        }
        look_axis = gamepad.right_stick();
        dash |= gamepad.just_pressed(GamepadButton::South);
        fire |= gamepad.pressed(GamepadButton::RightTrigger2);
    }

    input.move_axis = move_axis;
    input.look_axis = look_axis;
    input.cursor_world = cursor_world(&windows, &cameras);
    input.fire_held = fire;
    // dash_pressed сбрасывает motor, здесь только выставляем
    input.dash_pressed |= dash;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_diagonal_is_unit_length() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyD);

        let axis = keyboard_axis(&keys);
        assert!((axis.length() - 1.0).abs() < 1e-5);
        assert!((axis.x - axis.y).abs() < 1e-6);
    }

    #[test]
    fn test_keyboard_opposite_keys_cancel() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::KeyD);

        assert_eq!(keyboard_axis(&keys), Vec2::ZERO);
    }
}
