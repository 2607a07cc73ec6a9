//! Rendering sync: simulation entities → 2D sprites
//!
//! Симуляция ничего не знает о спрайтах. Здесь:
//! - спрайт на каждый новый ContactShape (цвет по роли entity)
//! - полоски здоровья врагов (gizmos)
//! - EffectRequest → короткоживущие спрайты, SoundCue → лог
//! - камера следует за игроком, HUD в заголовке окна

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use cubed_prime_simulation::{
    log, BulletSolid, Bullet, ContactShape, Dead, DespawnAfter, EffectKind, EffectRequest, Enemy, Explosion,
    ExplosiveBarrel, HealthBar, Player, PlayerDied, PlayerStats, SoundCue, Train,
};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
        app.add_systems(
            Update,
            (
                attach_sprites,
                attach_explosion_sprites,
                tint_dead_enemies,
                spawn_effect_sprites,
                play_sound_cues,
                follow_player,
                draw_health_bars,
                update_hud,
            )
                .chain(),
        );
    }
}

/// Marker: основная камера (для cursor → world)
#[derive(Component)]
pub struct MainCamera;

/// Мировых единиц на экран по вертикали ~ 720 * scale
const CAMERA_SCALE: f32 = 0.03;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
        MainCamera,
    ));
}

/// Цвет спрайта по роли entity
fn role_color(player: bool, enemy: bool, bullet: bool, barrel: bool, train: bool, solid: bool) -> Color {
    if player {
        Color::srgb(0.2, 0.6, 1.0)
    } else if enemy {
        Color::srgb(0.9, 0.2, 0.2)
    } else if bullet {
        Color::srgb(1.0, 1.0, 0.6)
    } else if barrel {
        Color::srgb(1.0, 0.5, 0.0)
    } else if train {
        Color::srgb(0.5, 0.5, 0.6)
    } else if solid {
        Color::srgb(0.3, 0.3, 0.3)
    } else {
        Color::WHITE
    }
}

/// Spawn спрайтов для новых gameplay entities
#[allow(clippy::type_complexity)]
fn attach_sprites(
    mut commands: Commands,
    query: Query<
        (
            Entity,
            &ContactShape,
            Has<Player>,
            Has<Enemy>,
            Has<Bullet>,
            Has<ExplosiveBarrel>,
            Has<Train>,
            Has<BulletSolid>,
        ),
        Added<ContactShape>,
    >,
) {
    for (entity, shape, player, enemy, bullet, barrel, train, solid) in query.iter() {
        let color = role_color(player, enemy, bullet, barrel, train, solid);
        let size = Vec2::splat(shape.radius * 2.0);

        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.insert(Sprite::from_color(color, size));
        }
    }
}

fn attach_explosion_sprites(mut commands: Commands, explosions: Query<(Entity, &Explosion), Added<Explosion>>) {
    for (entity, explosion) in explosions.iter() {
        commands.entity(entity).insert(Sprite::from_color(
            Color::srgba(1.0, 0.6, 0.1, 0.6),
            Vec2::splat(explosion.radius * 2.0),
        ));
    }
}

/// Трупы (delayed death) серые
fn tint_dead_enemies(mut sprites: Query<&mut Sprite, Added<Dead>>) {
    for mut sprite in sprites.iter_mut() {
        sprite.color = Color::srgb(0.4, 0.4, 0.4);
    }
}

fn spawn_effect_sprites(
    mut commands: Commands,
    mut effects: EventReader<EffectRequest>,
    time: Res<Time<Virtual>>,
) {
    let now = time.elapsed_secs();

    for effect in effects.read() {
        let (color, size, lifetime) = match effect.kind {
            EffectKind::WallImpact => (Color::srgb(1.0, 0.9, 0.3), 0.4, 0.2),
            EffectKind::EnemyDeath => (Color::srgb(0.6, 0.0, 0.0), 1.4, 0.5),
            // Визуал взрыва рисуется от Explosion entity
            EffectKind::Explosion => continue,
        };

        commands.spawn((
            Sprite::from_color(color, Vec2::splat(size)),
            Transform::from_translation(effect.position.extend(1.0))
                .with_rotation(Quat::from_rotation_z(effect.rotation)),
            DespawnAfter::in_seconds(now, lifetime),
        ));
    }
}

/// Аудио ассеты вне scope: только лог
fn play_sound_cues(mut cues: EventReader<SoundCue>) {
    for cue in cues.read() {
        log(&format!("Sound: {}", cue.clip));
    }
}

fn follow_player(
    players: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
    time: Res<Time<Real>>,
) {
    let (Ok(player), Ok(mut camera)) = (players.single(), cameras.single_mut()) else {
        return;
    };

    let target = player.translation.truncate().extend(camera.translation.z);
    let t = (time.delta_secs() * 5.0).clamp(0.0, 1.0);
    camera.translation = camera.translation.lerp(target, t);
}

/// Полоски здоровья над врагами
fn draw_health_bars(enemies: Query<(&Transform, &HealthBar), (With<Enemy>, Without<Dead>)>, mut gizmos: Gizmos) {
    const WIDTH: f32 = 1.0;
    const HEIGHT: f32 = 0.12;

    for (transform, bar) in enemies.iter() {
        let position = transform.translation.truncate() + Vec2::Y * 0.8;

        gizmos.rect_2d(
            Isometry2d::from_translation(position),
            Vec2::new(WIDTH, HEIGHT),
            Color::srgb(0.8, 0.2, 0.2),
        );

        let fill = bar.fill.clamp(0.0, 1.0);
        let offset = Vec2::X * (WIDTH * (1.0 - fill) * 0.5);
        gizmos.rect_2d(
            Isometry2d::from_translation(position - offset),
            Vec2::new(WIDTH * fill, HEIGHT),
            Color::srgb(0.2, 0.8, 0.2),
        );
    }
}

/// HUD: здоровье, очки и счётчики в заголовке окна (UI вне scope)
fn update_hud(
    stats: Res<PlayerStats>,
    mut died: EventReader<PlayerDied>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for event in died.read() {
        log(&format!("Game over: {} points", event.points));
    }

    if !stats.is_changed() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    window.title = if stats.is_player_dead {
        format!("CubedPrime | GAME OVER | points {}", stats.points)
    } else {
        format!(
            "CubedPrime | HP {}/{} | points {} | kills {} | enemies {}",
            stats.health, stats.max_health, stats.points, stats.total_enemies_killed, stats.current_enemies_count
        )
    };
}
