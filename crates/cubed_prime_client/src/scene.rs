//! Арена: стены, ящики, бочки, поезд и игрок

use bevy::prelude::*;
use cubed_prime_simulation::{
    log_error, spawn_barrel, spawn_basic_player, spawn_player, BulletSolid, ContactShape, FrameSet, GameConfig, Train,
};

/// Параметры сцены из командной строки
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    pub basic_movement: bool,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneOptions>()
            .add_systems(Startup, setup_arena)
            .add_systems(Update, drive_train.in_set(FrameSet::Act));
    }
}

const ARENA_HALF: Vec2 = Vec2::new(16.0, 10.0);
const WALL_RADIUS: f32 = 0.5;

/// Поезд ходит туда-обратно по рельсам
#[derive(Component, Debug, Clone, Copy)]
pub struct TrainTrack {
    pub from: Vec2,
    pub to: Vec2,
    pub speed: f32,
    pub forward: bool,
}

fn spawn_wall(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        BulletSolid,
        ContactShape::solid(WALL_RADIUS),
        Transform::from_translation(position.extend(0.0)),
    ));
}

fn setup_arena(mut commands: Commands, config: Res<GameConfig>, options: Res<SceneOptions>) {
    // Периметр из круглых блоков (contacts поддерживают только круги)
    let step = WALL_RADIUS * 2.0;
    let columns = (ARENA_HALF.x * 2.0 / step) as i32;
    let rows = (ARENA_HALF.y * 2.0 / step) as i32;

    for i in 0..=columns {
        let x = -ARENA_HALF.x + i as f32 * step;
        spawn_wall(&mut commands, Vec2::new(x, ARENA_HALF.y));
        spawn_wall(&mut commands, Vec2::new(x, -ARENA_HALF.y));
    }
    for j in 1..rows {
        let y = -ARENA_HALF.y + j as f32 * step;
        spawn_wall(&mut commands, Vec2::new(-ARENA_HALF.x, y));
        spawn_wall(&mut commands, Vec2::new(ARENA_HALF.x, y));
    }

    // Ящики-укрытия
    for position in [Vec2::new(-6.0, 3.0), Vec2::new(6.0, -2.0), Vec2::new(0.0, 6.0)] {
        spawn_wall(&mut commands, position);
    }

    // Бочки парами, чтобы была цепная реакция
    for position in [Vec2::new(-8.0, -4.0), Vec2::new(-6.5, -4.0), Vec2::new(8.0, 5.0)] {
        spawn_barrel(&mut commands, &config.barrel, Transform::from_translation(position.extend(0.0)));
    }

    let track_y = -ARENA_HALF.y + 2.5;
    commands.spawn((
        Train,
        ContactShape::solid(1.5),
        TrainTrack {
            from: Vec2::new(-ARENA_HALF.x + 2.0, track_y),
            to: Vec2::new(ARENA_HALF.x - 2.0, track_y),
            speed: 6.0,
            forward: true,
        },
        Transform::from_xyz(-ARENA_HALF.x + 2.0, track_y, 0.0),
    ));

    if options.basic_movement {
        spawn_basic_player(&mut commands, &config, Vec2::ZERO);
    } else if let Err(err) = spawn_player(&mut commands, &config, Vec2::ZERO) {
        log_error(&format!("Failed to spawn player: {}", err));
    }
}

fn drive_train(mut trains: Query<(&mut TrainTrack, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (mut track, mut transform) in trains.iter_mut() {
        let target = if track.forward { track.to } else { track.from };
        let position = transform.translation.truncate();
        let to_target = target - position;
        let step = track.speed * delta;

        if to_target.length() <= step {
            transform.translation = target.extend(transform.translation.z);
            track.forward = !track.forward;
        } else {
            transform.translation += (to_target.normalize() * step).extend(0.0);
        }
    }
}
