//! Player domain: движение (два варианта), dash, hit-stop, PlayerStats
//!
//! Архитектура:
//! - PlayerInput заполняется хостом, motor читает его в Update
//! - Движение Transform в FixedUpdate
//! - Контакты с врагами в FixedUpdate после contact detection

use bevy::prelude::*;

use crate::combat::Blaster;
use crate::config::GameConfig;
use crate::contacts::ContactShape;
use crate::error::GameplayError;
use crate::{FixedGameplaySet, FrameSet};

pub mod basic;
pub mod contacts;
pub mod hit_stop;
pub mod movement;
pub mod stats;

#[cfg(test)]
mod movement_tests;

pub use basic::BasicMover;
pub use contacts::{enemy_contact_outcome, EnemyContactOutcome};
pub use hit_stop::{HitStop, HitStopPhase};
pub use movement::{
    blend_velocity, facing_rotation, sample_input, DashDirection, InputScheme, PlayerController, PlayerInput,
    PlayerMotor, VirtualJoysticks,
};
pub use stats::{PlayerDied, PlayerStats};

/// Marker component для player-controlled entity
///
/// Враги ищут цель через `With<Player>`. В игре обычно один такой entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Spawn игрока с полным вариантом движения (dash + hit-stop)
pub fn spawn_player(commands: &mut Commands, config: &GameConfig, position: Vec2) -> Result<Entity, GameplayError> {
    config.player.validate()?;

    let controller = PlayerController::from_config(&config.player);
    let motor = PlayerMotor::new(&controller);

    Ok(commands
        .spawn((
            Player,
            Transform::from_translation(position.extend(0.0)),
            controller,
            motor,
            PlayerInput::default(),
            Blaster::from_config(&config.weapon),
            ContactShape::solid(config.player.contact_radius),
        ))
        .id())
}

/// Spawn игрока с базовым вариантом движения
pub fn spawn_basic_player(commands: &mut Commands, config: &GameConfig, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            Transform::from_translation(position.extend(0.0)),
            BasicMover {
                move_speed: config.player.move_speed,
                aim_dead_zone: config.player.joystick_dead_zone,
            },
            PlayerInput::default(),
            Blaster::from_config(&config.weapon),
            ContactShape::solid(config.player.contact_radius),
        ))
        .id()
}

/// Система: новый игрок становится ссылкой в PlayerStats
pub fn register_player(added: Query<Entity, Added<Player>>, mut stats: ResMut<PlayerStats>) {
    for entity in added.iter() {
        stats.revive(entity);
        crate::log_info(&format!("Player registered: {:?}", entity));
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerDied>();

        app.add_systems(
            Update,
            (register_player, hit_stop::drive_hit_stop, movement::update_player_motor)
                .chain()
                .in_set(FrameSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (
                (movement::apply_player_velocity, basic::apply_basic_movement).in_set(FixedGameplaySet::Movement),
                contacts::resolve_player_enemy_contacts.in_set(FixedGameplaySet::PlayerHits),
                stats::handle_player_death.in_set(FixedGameplaySet::Deaths),
            ),
        );
    }
}
