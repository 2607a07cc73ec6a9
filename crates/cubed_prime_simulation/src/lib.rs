//! CubedPrime Simulation Core
//!
//! Headless gameplay на Bevy 0.16: игрок (два варианта движения, dash, hit-stop),
//! враги, пули, взрывающиеся бочки, PlayerStats.
//!
//! HOST / SIMULATION split:
//! - Simulation = gameplay rules, state, events (этот crate)
//! - Host = рендер, звук, ввод, физический движок (client crate)
//!
//! Хост заполняет `PlayerInput`, подключает источник `ContactStarted`
//! (`HeadlessContactsPlugin` или `RapierContactsPlugin`) и читает
//! `EffectRequest`/`SoundCue`/`PlayerStats`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod contacts;
pub mod effects;
pub mod enemy;
pub mod error;
pub mod hazards;
pub mod logger;
pub mod player;

// Re-export базовых типов для удобства
pub use combat::{Blaster, Bullet, CombatPlugin, DamageDealt, DamageSource, Dead, DespawnAfter, EntityDied};
pub use components::*;
pub use config::GameConfig;
pub use contacts::{ContactDetectionSet, ContactKind, ContactShape, ContactStarted, HeadlessContactsPlugin};
pub use effects::{EffectKind, EffectRequest, EffectsPlugin, SoundCue};
pub use enemy::{spawn_enemy, Enemy, EnemyPlugin, WaveSpawner};
pub use error::GameplayError;
pub use hazards::{spawn_barrel, DetonateBarrel, Explosion, ExplosionTargets, ExplosiveBarrel, HazardsPlugin};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, set_logger_if_needed, LogLevel,
    LogPrinter,
};
pub use player::{
    spawn_basic_player, spawn_player, HitStop, Player, PlayerDied, PlayerInput, PlayerMotor, PlayerPlugin,
    PlayerStats,
};

/// Кадровые фазы (Update, scaled time)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Ввод, hit-stop, motor игрока, учёт новых сущностей
    Input,
    /// Стрельба, пули, поведение врагов, спавн
    Act,
    /// Таймерный деспавн, respawn бочек
    Cleanup,
}

/// Фазы FixedUpdate шага
///
/// Movement → ContactDetectionSet → PlayerHits → ProjectileHits → HazardHits → Deaths
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedGameplaySet {
    Movement,
    PlayerHits,
    ProjectileHits,
    HazardHits,
    /// Смерти после всех источников урона
    Deaths,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Источник contacts НЕ входит: хост добавляет HeadlessContactsPlugin или RapierContactsPlugin.
pub struct SimulationPlugin {
    pub config: GameConfig,
    pub seed: u64,
}

impl SimulationPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config, seed: 42 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;

        app
            // Fixed timestep (50Hz = базовый шаг 0.02s, hit-stop его уменьшает)
            .insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            .insert_resource(DeterministicRng::new(self.seed))
            .insert_resource(PlayerStats::new(config.player.max_health))
            .insert_resource(HitStop::from_config(&config.hit_stop))
            .insert_resource(config.clone())
            .add_event::<ContactStarted>();

        if config.spawner.enabled {
            app.insert_resource(WaveSpawner::from_config(&config.spawner));
        }

        app.configure_sets(Update, (FrameSet::Input, FrameSet::Act, FrameSet::Cleanup).chain());
        app.configure_sets(
            FixedUpdate,
            (
                FixedGameplaySet::Movement,
                ContactDetectionSet,
                FixedGameplaySet::PlayerHits,
                FixedGameplaySet::ProjectileHits,
                FixedGameplaySet::HazardHits,
                FixedGameplaySet::Deaths,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((EffectsPlugin, PlayerPlugin, CombatPlugin, EnemyPlugin, HazardsPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без gameplay plugins)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(GameConfig::default().fixed_hz));

    app
}

/// Headless App с полным gameplay и overlap contacts
pub fn create_gameplay_app(config: GameConfig, seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins((HeadlessContactsPlugin, SimulationPlugin::new(config).with_seed(seed)));
    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
