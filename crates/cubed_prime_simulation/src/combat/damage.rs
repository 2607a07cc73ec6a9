//! Damage и death handling врагов
//!
//! Урон наносится сразу в contact системах (`damage_enemy`), а смерть
//! обрабатывается отдельно в `resolve_enemy_deaths`: ровно один раз на врага.

use bevy::prelude::*;

use crate::components::{Health, HealthBar, MovementCommand};
use crate::contacts::ContactShape;
use crate::effects::{EffectKind, EffectRequest};
use crate::enemy::Enemy;
use crate::player::PlayerStats;

/// Источник урона (для UI/звуков/статистики)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageSource {
    Bullet,
    DashStrike,
    Train,
    Explosion,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    /// None = окружение (поезд, взрыв)
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub source: DamageSource,
}

/// Событие: враг умер (health <= 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub points: u32,
    pub position: Vec2,
}

/// Компонент-маркер: entity мертв, но ещё не удалён (delayed death)
///
/// Мёртвые враги не получают урон, не бьют игрока и не двигаются.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Время: `Time<Virtual>::elapsed_secs()`, т.е. учитывает slow motion.
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта игры)
    pub despawn_time: f32,
}

impl DespawnAfter {
    pub fn in_seconds(now: f32, seconds: f32) -> Self {
        Self {
            despawn_time: now + seconds,
        }
    }
}

/// Нанести урон врагу и обновить полоску здоровья
///
/// Возвращает фактически снятое здоровье.
pub fn damage_enemy(health: &mut Health, bar: &mut HealthBar, amount: u32) -> u32 {
    let before = health.current;
    health.take_damage(amount);
    bar.fill = health.fraction();
    before - health.current
}

/// Система: смерть врагов
///
/// 1. Очки игроку, kills +1, живых −1
/// 2. EntityDied + эффект смерти
/// 3. Деспавн сразу, либо Dead + DespawnAfter при delayed_death
pub fn resolve_enemy_deaths(
    mut commands: Commands,
    enemies: Query<(Entity, &Enemy, &Health, &Transform), (Changed<Health>, Without<Dead>)>,
    mut stats: ResMut<PlayerStats>,
    mut died_events: EventWriter<EntityDied>,
    mut effects: EventWriter<EffectRequest>,
    time: Res<Time<Virtual>>,
) {
    let now = time.elapsed_secs();

    for (entity, enemy, health, transform) in enemies.iter() {
        if health.is_alive() {
            continue;
        }

        stats.add_points(enemy.points);
        stats.register_kill();

        let position = transform.translation.truncate();
        died_events.write(EntityDied {
            entity,
            points: enemy.points,
            position,
        });
        effects.write(EffectRequest {
            kind: EffectKind::EnemyDeath,
            position,
            rotation: 0.0,
        });

        crate::log(&format!(
            "Enemy {:?} died (+{} points, total {})",
            entity, enemy.points, stats.points
        ));

        let Ok(mut entity_commands) = commands.get_entity(entity) else {
            continue;
        };

        if enemy.delayed_death {
            entity_commands
                .insert((Dead, DespawnAfter::in_seconds(now, enemy.death_delay), MovementCommand::Stop))
                .remove::<ContactShape>();
        } else {
            entity_commands.despawn();
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Virtual>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            commands.entity(entity).despawn();
        }
    }
}
