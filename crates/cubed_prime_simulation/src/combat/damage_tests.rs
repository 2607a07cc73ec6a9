//! Tests for damage and enemy death systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::damage::{damage_enemy, despawn_after_timeout, resolve_enemy_deaths};
    use crate::combat::{Dead, DespawnAfter, EntityDied};
    use crate::components::{Health, HealthBar};
    use crate::config::EnemyConfig;
    use crate::effects::{EffectKind, EffectRequest};
    use crate::enemy::Enemy;
    use crate::player::PlayerStats;

    fn death_app() -> App {
        let mut app = App::new();
        app.add_event::<EntityDied>()
            .add_event::<EffectRequest>()
            .insert_resource(Time::<Virtual>::default())
            .insert_resource(PlayerStats::new(5))
            .add_systems(Update, resolve_enemy_deaths);
        app
    }

    fn spawn_test_enemy(app: &mut App, config: &EnemyConfig) -> Entity {
        app.world_mut()
            .spawn((
                Enemy::from_config(config),
                Health::new(config.start_health),
                HealthBar::default(),
                Transform::from_xyz(2.0, 3.0, 0.0),
            ))
            .id()
    }

    fn kill(app: &mut App, entity: Entity) {
        let mut entity_mut = app.world_mut().entity_mut(entity);
        let mut health = entity_mut.get_mut::<Health>().expect("enemy has Health");
        health.take_damage(10_000);
    }

    #[test]
    fn test_damage_enemy_updates_fill() {
        let mut health = Health::new(100);
        let mut bar = HealthBar::default();

        let dealt = damage_enemy(&mut health, &mut bar, 50);
        assert_eq!(dealt, 50);
        assert_eq!(health.current, 50);
        assert!((bar.fill - 0.5).abs() < 1e-6);

        // Overkill: фактический урон = оставшееся здоровье
        let dealt = damage_enemy(&mut health, &mut bar, 80);
        assert_eq!(dealt, 50);
        assert_eq!(bar.fill, 0.0);
    }

    #[test]
    fn test_death_awards_points_and_despawns() {
        let mut app = death_app();
        app.world_mut().resource_mut::<PlayerStats>().current_enemies_count = 1;

        let enemy = spawn_test_enemy(&mut app, &EnemyConfig::default());
        app.update();
        assert!(app.world().get_entity(enemy).is_ok(), "alive enemy stays");

        kill(&mut app, enemy);
        app.update();

        let stats = app.world().resource::<PlayerStats>();
        assert_eq!(stats.points, 100);
        assert_eq!(stats.total_enemies_killed, 1);
        assert_eq!(stats.current_enemies_count, 0);
        assert!(app.world().get_entity(enemy).is_err(), "dead enemy despawned");

        let died = app.world().resource::<Events<EntityDied>>();
        let mut cursor = died.get_cursor();
        let events: Vec<_> = cursor.read(died).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].entity, enemy);
        assert_eq!(events[0].position, Vec2::new(2.0, 3.0));

        let effects = app.world().resource::<Events<EffectRequest>>();
        let mut cursor = effects.get_cursor();
        assert!(cursor.read(effects).any(|e| e.kind == EffectKind::EnemyDeath));
    }

    #[test]
    fn test_delayed_death_runs_bookkeeping_once() {
        let mut app = death_app();

        let config = EnemyConfig {
            delayed_death: true,
            death_delay: 5.0,
            ..default()
        };
        let enemy = spawn_test_enemy(&mut app, &config);

        kill(&mut app, enemy);
        app.update();

        assert!(app.world().get::<Dead>(enemy).is_some());
        assert!(app.world().get::<DespawnAfter>(enemy).is_some());

        // Повторный урон по трупу: Changed<Health>, но Dead фильтр
        kill(&mut app, enemy);
        app.update();

        let stats = app.world().resource::<PlayerStats>();
        assert_eq!(stats.points, 100);
        assert_eq!(stats.total_enemies_killed, 1);
    }

    #[test]
    fn test_despawn_after_timeout() {
        let mut app = App::new();
        app.insert_resource(Time::<Virtual>::default())
            .add_systems(Update, despawn_after_timeout);

        let expired = app.world_mut().spawn(DespawnAfter { despawn_time: 0.0 }).id();
        let pending = app.world_mut().spawn(DespawnAfter { despawn_time: 100.0 }).id();

        app.update();

        assert!(app.world().get_entity(expired).is_err());
        assert!(app.world().get_entity(pending).is_ok());
    }
}
