use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use clap::Parser;
use cubed_prime_simulation::contacts::RapierContactsPlugin;
use cubed_prime_simulation::{init_logger, log_error, log_info, GameConfig, SimulationPlugin};

mod input;
mod rendering;
mod scene;

use input::InputPlugin;
use rendering::RenderingSyncPlugin;
use scene::{ScenePlugin, SceneOptions};

#[derive(Parser, Debug)]
#[command(name = "cubed_prime", about = "CubedPrime top-down arena shooter")]
struct Args {
    /// JSON tuning file (GameConfig); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Basic movement variant (no dash, no hit-stop)
    #[arg(long)]
    basic_movement: bool,

    /// Seed for the wave spawner
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Disable the wave spawner (static arena)
    #[arg(long)]
    no_waves: bool,
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}", err));
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    config.spawner.enabled = !args.no_waves;

    log_info(&format!("Starting CubedPrime (seed: {})", args.seed));

    let exit = App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "CubedPrime".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Collision events → ContactStarted
        .add_plugins((RapierPhysicsPlugin::<NoUserData>::default(), RapierContactsPlugin))
        // Simulation (headless gameplay logic)
        .add_plugins(SimulationPlugin::new(config.clone()).with_seed(args.seed))
        // Devices → PlayerInput
        .add_plugins(InputPlugin)
        // Rendering sync (simulation → sprites)
        .add_plugins(RenderingSyncPlugin)
        // Arena
        .insert_resource(SceneOptions {
            basic_movement: args.basic_movement,
        })
        .add_plugins(ScenePlugin)
        .run();

    match exit {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(_) => ExitCode::FAILURE,
    }
}
