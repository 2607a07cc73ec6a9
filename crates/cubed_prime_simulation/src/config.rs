//! GameConfig: data-driven tuning всех gameplay сущностей
//!
//! Defaults совпадают с inspector значениями префабов. Любая секция может
//! отсутствовать в JSON (serde default).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_range, GameplayError};
use crate::player::{DashDirection, InputScheme};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Частота FixedUpdate (50 Hz = базовый шаг 0.02s)
    pub fixed_hz: f64,
    pub player: PlayerConfig,
    pub hit_stop: HitStopConfig,
    pub bullet: BulletConfig,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub barrel: BarrelConfig,
    pub spawner: SpawnerConfig,
    /// Урон от поезда (мгновенное убийство)
    pub train_damage: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 50.0,
            player: PlayerConfig::default(),
            hit_stop: HitStopConfig::default(),
            bullet: BulletConfig::default(),
            weapon: WeaponConfig::default(),
            enemy: EnemyConfig::default(),
            barrel: BarrelConfig::default(),
            spawner: SpawnerConfig::default(),
            train_damage: 10_000,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GameplayError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameplayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameplayError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Проверка диапазонов (то, что в редакторе задавалось через [Range])
    pub fn validate(&self) -> Result<(), GameplayError> {
        ensure_range("fixed_hz", self.fixed_hz as f32, 1.0, 1000.0)?;
        self.player.validate()?;
        self.hit_stop.validate()?;
        ensure_range("spawner.min_radius", self.spawner.min_radius, 0.0, self.spawner.max_radius)?;
        Ok(())
    }

    /// Базовый шаг FixedUpdate (секунды) при time scale = 1
    pub fn base_fixed_step(&self) -> f64 {
        1.0 / self.fixed_hz
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub base_dash_speed: f32,
    /// Длительность dash (секунды)
    pub dash_duration: f32,
    /// Больше deceleration: быстрее теряет скорость после отпускания
    pub deceleration: f32,
    pub joystick_dead_zone: f32,
    pub input_scheme: InputScheme,
    pub dash_direction: DashDirection,
    pub max_health: u32,
    pub contact_radius: f32,
    /// Урон врагу при dash-ударе
    pub dash_strike_damage: u32,
    /// Лечение за dash-удар по bouncy врагу
    pub dash_heal: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            base_dash_speed: 25.0,
            dash_duration: 0.3,
            deceleration: 8.0,
            joystick_dead_zone: 0.3,
            input_scheme: InputScheme::Keyboard,
            dash_direction: DashDirection::InMovementDirection,
            max_health: 5,
            contact_radius: 0.5,
            dash_strike_damage: 100,
            dash_heal: 1,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        ensure_range("player.dash_duration", self.dash_duration, 0.1, 2.0)?;
        ensure_range("player.deceleration", self.deceleration, 1.0, 20.0)?;
        ensure_range("player.joystick_dead_zone", self.joystick_dead_zone, 0.2, 0.6)?;
        ensure_range("player.base_dash_speed", self.base_dash_speed, self.move_speed, f32::MAX)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitStopConfig {
    pub slow_factor: f32,
    /// Время удержания slow motion (real seconds)
    pub duration: f32,
    /// Время возврата к нормальной скорости (real seconds)
    pub recovery_time: f32,
}

impl Default for HitStopConfig {
    fn default() -> Self {
        Self {
            slow_factor: 0.5,
            duration: 0.25,
            recovery_time: 0.1,
        }
    }
}

impl HitStopConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        ensure_range("hit_stop.slow_factor", self.slow_factor, 0.01, 1.0)?;
        ensure_range("hit_stop.duration", self.duration, 0.0, 10.0)?;
        ensure_range("hit_stop.recovery_time", self.recovery_time, 0.0, 10.0)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub damage: u32,
    pub pierces: u32,
    /// Время жизни (секунды, scaled time)
    pub lifetime: f32,
    pub radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 50.0,
            damage: 50,
            pierces: 1,
            lifetime: 2.0,
            radius: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Секунды между выстрелами
    pub fire_interval: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self { fire_interval: 0.15 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Контактный урон по игроку
    pub damage: u32,
    pub start_health: u32,
    pub points: u32,
    pub delayed_death: bool,
    /// Задержка деспавна при delayed_death (секунды)
    pub death_delay: f32,
    /// Дистанция, которую враг держит от игрока (0 = идёт вплотную)
    pub preferred_distance: f32,
    pub move_speed: f32,
    pub contact_radius: f32,
    /// Solid коллайдер вместо trigger (отскакивающий враг)
    pub bouncy: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            damage: 1,
            start_health: 100,
            points: 100,
            delayed_death: false,
            death_delay: 0.5,
            preferred_distance: 0.0,
            move_speed: 3.5,
            contact_radius: 0.5,
            bouncy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrelConfig {
    pub particle_radius: f32,
    pub damage_radius: f32,
    /// Через сколько секунд бочка появится снова
    pub cooldown: f32,
    pub explosion_damage: u32,
    pub player_damage: u32,
    /// Сколько живёт explosion entity (для визуала)
    pub effect_lifetime: f32,
    pub contact_radius: f32,
}

impl Default for BarrelConfig {
    fn default() -> Self {
        Self {
            particle_radius: 2.5,
            damage_radius: 3.0,
            cooldown: 10.0,
            explosion_damage: 100,
            player_damage: 1,
            effect_lifetime: 1.0,
            contact_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub enabled: bool,
    /// Секунды между спавнами
    pub interval: f32,
    pub max_alive: u32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: 2.0,
            max_alive: 12,
            min_radius: 8.0,
            max_radius: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bullet.speed, 50.0);
        assert_eq!(config.bullet.damage, 50);
        assert_eq!(config.enemy.start_health, 100);
        assert_eq!(config.barrel.cooldown, 10.0);
        assert!((config.base_fixed_step() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{ "bullet": { "pierces": 3 }, "train_damage": 500 }"#)
            .expect("valid config");

        assert_eq!(config.bullet.pierces, 3);
        assert_eq!(config.bullet.speed, 50.0);
        assert_eq!(config.train_damage, 500);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_enum_fields_parse() {
        let config = GameConfig::from_json_str(
            r#"{ "player": { "input_scheme": "Controller", "dash_direction": "InAimDirection" } }"#,
        )
        .expect("valid config");

        assert_eq!(config.player.input_scheme, InputScheme::Controller);
        assert_eq!(config.player.dash_direction, DashDirection::InAimDirection);
    }

    #[test]
    fn test_out_of_range_dash_duration_rejected() {
        let err = GameConfig::from_json_str(r#"{ "player": { "dash_duration": 5.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            GameplayError::OutOfRange { field: "player.dash_duration", .. }
        ));
    }

    #[test]
    fn test_dead_zone_range() {
        let mut player = PlayerConfig::default();
        player.joystick_dead_zone = 0.1;
        assert!(player.validate().is_err());

        player.joystick_dead_zone = 0.6;
        assert!(player.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GameplayError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = GameConfig::load("/definitely/not/here/config.json").unwrap_err();
        assert!(matches!(err, GameplayError::ConfigRead { .. }));
    }
}
