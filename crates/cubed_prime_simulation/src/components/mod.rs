//! ECS Components общие для нескольких доменов
//!
//! Организация по доменам:
//! - actor: здоровье и полоска здоровья (Health, HealthBar)
//! - movement: команды перемещения (MovementCommand, MovementSpeed)
//! - world: теги мира (Train, BulletSolid) и 2D helpers
//!
//! Доменные компоненты (Player, Enemy, Bullet, ExplosiveBarrel) живут в своих модулях.

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
