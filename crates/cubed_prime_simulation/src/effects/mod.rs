//! Presentation outputs: визуальные эффекты и звуки
//!
//! Симуляция ничего не рисует и не играет: только сообщает хосту
//! что и где должно появиться.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EffectKind {
    /// Искры от пули, остановленной стеной
    WallImpact,
    /// Эффект смерти врага
    EnemyDeath,
    /// Взрыв бочки
    Explosion,
}

/// Event: хост должен проиграть эффект
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec2,
    /// Поворот вокруг Z (радианы)
    pub rotation: f32,
}

/// Event: проиграть звук по имени клипа
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SoundCue {
    pub clip: &'static str,
}

pub const DASH_SOUND: &str = "DashSound";

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EffectRequest>().add_event::<SoundCue>();
    }
}
