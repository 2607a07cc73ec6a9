//! Enemy domain: компонент врага, spawn, поведение, спавнер волн
//!
//! Урон по врагу наносят пули, dash-удар, поезд и взрывы.
//! Смерть обрабатывается в `combat::damage::resolve_enemy_deaths`.

use bevy::prelude::*;

use crate::combat::{damage_enemy, DamageDealt, DamageSource, Dead};
use crate::components::{execute_movement_commands, Health, HealthBar, MovementCommand, MovementSpeed, Train};
use crate::config::{EnemyConfig, GameConfig};
use crate::contacts::{ContactShape, ContactStarted};
use crate::player::{Player, PlayerStats};
use crate::{FixedGameplaySet, FrameSet};

pub mod behaviour;
pub mod spawner;

pub use behaviour::{enemy_behaviour, ideal_destination};
pub use spawner::{spawn_ring_position, WaveSpawner};

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    /// Контактный урон по игроку
    pub damage: u32,
    /// Очки игроку за убийство
    pub points: u32,
    /// Тело остаётся на death_delay секунд (Dead marker)
    pub delayed_death: bool,
    pub death_delay: f32,
    /// Дистанция, которую враг держит от игрока
    pub preferred_distance: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self::from_config(&EnemyConfig::default())
    }
}

impl Enemy {
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            damage: config.damage,
            points: config.points,
            delayed_death: config.delayed_death,
            death_delay: config.death_delay,
            preferred_distance: config.preferred_distance,
        }
    }
}

/// Spawn врага со здоровьем, полоской и steering
pub fn spawn_enemy(commands: &mut Commands, config: &EnemyConfig, position: Vec2) -> Entity {
    let shape = if config.bouncy {
        ContactShape::solid(config.contact_radius)
    } else {
        ContactShape::sensor(config.contact_radius)
    };

    commands
        .spawn((
            Enemy::from_config(config),
            Health::new(config.start_health),
            HealthBar::default(),
            MovementCommand::Idle,
            MovementSpeed {
                speed: config.move_speed,
            },
            shape,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Observer: учёт нового врага (живых +1)
///
/// Срабатывает в момент вставки `Enemy`, до любого FixedUpdate шага.
/// Враг без игрока на сцене: ошибка расстановки, но не фатальная.
pub fn register_new_enemy(
    trigger: Trigger<OnAdd, Enemy>,
    players: Query<(), With<Player>>,
    mut stats: ResMut<PlayerStats>,
) {
    stats.current_enemies_count += 1;

    if players.is_empty() {
        crate::log_error(&format!(
            "Enemy {:?} spawned but there is no player to chase",
            trigger.target()
        ));
    }
}

/// Система: поезд убивает любого врага, которого задел
pub fn resolve_train_contacts(
    mut contacts: EventReader<ContactStarted>,
    trains: Query<(), With<Train>>,
    mut enemies: Query<(&mut Health, &mut HealthBar), (With<Enemy>, Without<Dead>)>,
    config: Res<GameConfig>,
    mut damage_events: EventWriter<DamageDealt>,
) {
    for contact in contacts.read() {
        if !trains.contains(contact.other) {
            continue;
        }
        let Ok((mut health, mut bar)) = enemies.get_mut(contact.entity) else {
            continue;
        };

        let dealt = damage_enemy(&mut health, &mut bar, config.train_damage);
        damage_events.write(DamageDealt {
            attacker: None,
            target: contact.entity,
            damage: dealt,
            source: DamageSource::Train,
        });
    }
}

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(register_new_enemy);

        app.add_systems(
            Update,
            (spawner::tick_wave_spawner, enemy_behaviour)
                .chain()
                .in_set(FrameSet::Act),
        );

        app.add_systems(
            FixedUpdate,
            (
                execute_movement_commands.in_set(FixedGameplaySet::Movement),
                resolve_train_contacts.in_set(FixedGameplaySet::HazardHits),
            ),
        );
    }
}
