//! Player movement (полный вариант): сглаженное движение, прицел, dash
//!
//! Flow:
//! 1. Хост заполняет PlayerInput (raw samples с устройств)
//! 2. `update_player_motor` (Update, scaled time): выбор источника ввода по схеме,
//!    старт/затухание dash, обновление направления прицела
//! 3. `apply_player_velocity` (FixedUpdate): velocity blending → позиция + поворот

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::error::GameplayError;
use crate::logger;

use super::Player;

/// Откуда берётся ввод
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum InputScheme {
    /// Два виртуальных джойстика на экране
    Mobile,
    /// WASD + прицел мышью
    #[default]
    Keyboard,
    /// Геймпад: левый стик движение, правый прицел
    Controller,
}

/// Куда направлен dash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum DashDirection {
    #[default]
    InMovementDirection,
    InAimDirection,
}

/// Настройки движения игрока (inspector поля)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub move_speed: f32,
    pub base_dash_speed: f32,
    /// Секунды, за которые dash speed падает до move_speed
    pub dash_duration: f32,
    pub deceleration: f32,
    pub joystick_dead_zone: f32,
    pub input_scheme: InputScheme,
    pub dash_direction: DashDirection,
}

impl PlayerController {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            base_dash_speed: config.base_dash_speed,
            dash_duration: config.dash_duration,
            deceleration: config.deceleration,
            joystick_dead_zone: config.joystick_dead_zone,
            input_scheme: config.input_scheme,
            dash_direction: config.dash_direction,
        }
    }
}

/// Направления двух экранных джойстиков
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct VirtualJoysticks {
    pub move_direction: Vec2,
    pub aim_direction: Vec2,
}

/// Raw ввод за текущий кадр
///
/// Для headless тестов: mock input через этот компонент.
/// Для игры: заполняется клиентом с клавиатуры/мыши/геймпада.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Mobile: None = джойстики не привязаны к игроку
    pub joysticks: Option<VirtualJoysticks>,
    pub move_axis: Vec2,
    pub look_axis: Vec2,
    /// Позиция курсора в мировых координатах (None = курсор вне окна)
    pub cursor_world: Option<Vec2>,
    /// Dash нажат в этом кадре (edge, сбрасывается после обработки)
    pub dash_pressed: bool,
    pub fire_held: bool,
}

/// Состояние движения игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerMotor {
    pub is_dashing: bool,
    pub dash_speed: f32,
    pub dash_dir: Vec2,
    pub current_velocity: Vec2,
    /// Последнее валидное направление прицела
    pub last_dir: Vec2,
    /// Итоговый вектор движения этого кадра
    pub movement: Vec2,
    /// Итоговое направление взгляда
    pub direction: Vec2,
}

impl PlayerMotor {
    pub fn new(controller: &PlayerController) -> Self {
        Self {
            is_dashing: false,
            dash_speed: controller.base_dash_speed,
            dash_dir: Vec2::ZERO,
            current_velocity: Vec2::ZERO,
            last_dir: Vec2::Y,
            movement: Vec2::ZERO,
            direction: Vec2::Y,
        }
    }

    /// Начать dash. Во время dash повторное нажатие игнорируется.
    pub fn begin_dash(&mut self, dash_direction: DashDirection, movement: Vec2) -> bool {
        if self.is_dashing {
            return false;
        }

        self.is_dashing = true;
        self.dash_dir = match dash_direction {
            DashDirection::InAimDirection => self.last_dir.normalize_or_zero(),
            DashDirection::InMovementDirection => movement.normalize_or_zero(),
        };
        true
    }

    /// Линейное затухание dash speed от base_dash_speed до move_speed за dash_duration
    pub fn tick_dash(&mut self, controller: &PlayerController, delta: f32) {
        if !self.is_dashing {
            return;
        }

        self.dash_speed -= (controller.base_dash_speed - controller.move_speed) * delta / controller.dash_duration;

        if self.dash_speed <= controller.move_speed {
            self.is_dashing = false;
            self.dash_speed = controller.base_dash_speed;
        }
    }

    /// Кадровое обновление (Update)
    ///
    /// `aim` = None означает "нет нового прицела" (курсор вне окна).
    pub fn frame_update(
        &mut self,
        controller: &PlayerController,
        overall_movement: Vec2,
        aim: Option<Vec2>,
        dash_pressed: bool,
        delta: f32,
    ) {
        // Dash callback приходит до кадрового обновления
        if dash_pressed {
            self.begin_dash(controller.dash_direction, overall_movement);
        }

        let mut movement = overall_movement;
        if self.is_dashing {
            movement = self.dash_dir;
            self.tick_dash(controller, delta);
        }

        match controller.input_scheme {
            InputScheme::Keyboard => {
                if let Some(aim) = aim {
                    self.last_dir = aim;
                }
            }
            InputScheme::Mobile | InputScheme::Controller => {
                // Стик в dead zone: сохраняем прежнее направление
                if let Some(aim) = aim {
                    if aim.length() >= controller.joystick_dead_zone {
                        self.last_dir = aim;
                    }
                }
            }
        }

        self.movement = movement;
        self.direction = self.last_dir;
    }

    /// Target speed с учётом dash
    pub fn target_speed(&self, controller: &PlayerController) -> f32 {
        if self.is_dashing {
            self.dash_speed
        } else {
            controller.move_speed
        }
    }
}

/// Выбрать movement/aim из raw ввода по схеме
///
/// Keyboard: прицел = курсор − позиция игрока.
pub fn sample_input(
    scheme: InputScheme,
    input: &PlayerInput,
    player_position: Vec2,
) -> Result<(Vec2, Option<Vec2>), GameplayError> {
    match scheme {
        InputScheme::Mobile => {
            let sticks = input.joysticks.ok_or(GameplayError::JoysticksNotLinked)?;
            Ok((sticks.move_direction, Some(sticks.aim_direction)))
        }
        InputScheme::Keyboard => Ok((
            input.move_axis,
            input.cursor_world.map(|cursor| cursor - player_position),
        )),
        InputScheme::Controller => Ok((input.move_axis, Some(input.look_axis))),
    }
}

/// Velocity blending (Vector2.Lerp с clamp t в [0, 1])
///
/// - Нет ввода: тормозим к нулю со скоростью deceleration
/// - Есть ввод: разгоняемся к target за ~0.1s
pub fn blend_velocity(current: Vec2, movement: Vec2, target_speed: f32, deceleration: f32, delta: f32) -> Vec2 {
    if movement == Vec2::ZERO {
        current.lerp(Vec2::ZERO, (deceleration * delta).clamp(0.0, 1.0))
    } else {
        current.lerp(movement * target_speed, (delta * 10.0).clamp(0.0, 1.0))
    }
}

/// Поворот спрайта: "вверх" спрайта смотрит в direction
pub fn facing_rotation(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x) - FRAC_PI_2
}

/// Система: кадровое обновление motor (Update)
pub fn update_player_motor(
    mut players: Query<(&PlayerController, &mut PlayerInput, &mut PlayerMotor, &Transform), With<Player>>,
    time: Res<Time>,
    mut reported: Local<bool>,
) {
    let delta = time.delta_secs();

    for (controller, mut input, mut motor, transform) in players.iter_mut() {
        let dash_pressed = std::mem::take(&mut input.dash_pressed);

        let (overall_movement, aim) =
            match sample_input(controller.input_scheme, &input, transform.translation.truncate()) {
                Ok(sample) => sample,
                Err(err) => {
                    // Логируем один раз, иначе спам каждый кадр
                    if !*reported {
                        logger::log_error(&format!("Player input unavailable: {}", err));
                        *reported = true;
                    }
                    continue;
                }
            };

        motor.frame_update(controller, overall_movement, aim, dash_pressed, delta);
    }
}

/// Система: velocity → Transform (FixedUpdate)
pub fn apply_player_velocity(
    mut players: Query<(&PlayerController, &mut PlayerMotor, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (controller, mut motor, mut transform) in players.iter_mut() {
        let target_speed = motor.target_speed(controller);
        motor.current_velocity = blend_velocity(
            motor.current_velocity,
            motor.movement,
            target_speed,
            controller.deceleration,
            delta,
        );

        transform.translation += (motor.current_velocity * delta).extend(0.0);
        transform.rotation = Quat::from_rotation_z(facing_rotation(motor.direction));
    }
}
