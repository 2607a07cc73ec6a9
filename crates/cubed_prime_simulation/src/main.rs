//! Headless симуляция CubedPrime
//!
//! Запускает Bevy App без рендера: игрок стоит и стреляет вверх,
//! спавнер волн гонит на него врагов. Полезно для проверки баланса и детерминизма.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use cubed_prime_simulation::{
    create_gameplay_app, init_logger, log_error, log_info, spawn_barrel, spawn_player, GameConfig, PlayerInput, PlayerStats,
};

fn main() {
    let seed = 42;
    init_logger();
    log_info(&format!("Starting CubedPrime headless simulation (seed: {})", seed));

    let mut config = GameConfig::default();
    config.spawner.enabled = true;

    let mut app = create_gameplay_app(config.clone(), seed);
    // Фиксированный кадр 60 FPS, независимо от железа
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let world = app.world_mut();
    let setup = {
        let mut commands = world.commands();
        let player = spawn_player(&mut commands, &config, Vec2::ZERO);
        spawn_barrel(&mut commands, &config.barrel, Transform::from_xyz(0.0, 6.0, 0.0));
        player
    };
    world.flush();

    let player = match setup {
        Ok(player) => player,
        Err(err) => {
            log_error(&format!("Failed to spawn player: {}", err));
            return;
        }
    };

    if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
        input.fire_held = true;
    }

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let stats = app.world().resource::<PlayerStats>();
            log_info(&format!(
                "Tick {}: {} entities, HP {}/{}, points {}, alive enemies {}",
                tick,
                app.world().entities().len(),
                stats.health,
                stats.max_health,
                stats.points,
                stats.current_enemies_count
            ));
        }

        if app.world().resource::<PlayerStats>().is_player_dead {
            log_info(&format!("Player died at tick {}", tick));
            break;
        }
    }

    log_info("Simulation complete!");
}
