//! Hit-stop: короткое замедление времени после dash-удара
//!
//! Фазы (в real time, не зависят от самого замедления):
//! Idle → Holding (duration) → Recovering (lerp slow_factor → 1 за recovery_time) → Idle
//!
//! Time scale применяется к `Time<Virtual>` (Update) и к шагу `Time<Fixed>`,
//! чтобы физика оставалась той же частоты в real time, но с меньшим шагом.

use bevy::prelude::*;

use crate::config::{GameConfig, HitStopConfig};

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum HitStopPhase {
    #[default]
    Idle,
    Holding {
        /// Оставшееся время удержания (real seconds)
        remaining: f32,
    },
    Recovering {
        elapsed: f32,
    },
}

#[derive(Resource, Debug, Clone)]
pub struct HitStop {
    pub phase: HitStopPhase,
    pub slow_factor: f32,
    pub duration: f32,
    pub recovery_time: f32,
    scale: f32,
    /// Старт в этом кадре: real delta кадра не списываем
    just_started: bool,
}

impl Default for HitStop {
    fn default() -> Self {
        Self::from_config(&HitStopConfig::default())
    }
}

impl HitStop {
    pub fn from_config(config: &HitStopConfig) -> Self {
        Self {
            phase: HitStopPhase::Idle,
            slow_factor: config.slow_factor,
            duration: config.duration,
            recovery_time: config.recovery_time,
            scale: 1.0,
            just_started: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, HitStopPhase::Idle)
    }

    pub fn time_scale(&self) -> f32 {
        self.scale
    }

    /// Запустить slow motion. Уже идущий hit-stop не перезапускается.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }

        self.phase = HitStopPhase::Holding {
            remaining: self.duration,
        };
        self.scale = self.slow_factor;
        self.just_started = true;
        true
    }

    /// Продвинуть на real delta
    pub fn advance(&mut self, real_delta: f32) {
        if std::mem::take(&mut self.just_started) {
            return;
        }

        match self.phase {
            HitStopPhase::Idle => {}
            HitStopPhase::Holding { remaining } => {
                let remaining = remaining - real_delta;
                if remaining > 0.0 {
                    self.phase = HitStopPhase::Holding { remaining };
                } else if self.recovery_time > 0.0 {
                    self.phase = HitStopPhase::Recovering { elapsed: 0.0 };
                } else {
                    self.finish();
                }
            }
            HitStopPhase::Recovering { elapsed } => {
                let elapsed = elapsed + real_delta;
                if elapsed < self.recovery_time {
                    let t = elapsed / self.recovery_time;
                    self.scale = self.slow_factor + (1.0 - self.slow_factor) * t;
                    self.phase = HitStopPhase::Recovering { elapsed };
                } else {
                    self.finish();
                }
            }
        }
    }

    fn finish(&mut self) {
        self.phase = HitStopPhase::Idle;
        self.scale = 1.0;
    }
}

/// Система: продвинуть hit-stop и применить time scale (Update)
pub fn drive_hit_stop(
    mut hit_stop: ResMut<HitStop>,
    real_time: Res<Time<Real>>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut fixed_time: ResMut<Time<Fixed>>,
    config: Res<GameConfig>,
) {
    hit_stop.advance(real_time.delta_secs());

    let scale = hit_stop.time_scale();
    if (virtual_time.relative_speed() - scale).abs() > f32::EPSILON {
        virtual_time.set_relative_speed(scale);
        fixed_time.set_timestep_seconds(config.base_fixed_step() * f64::from(scale));
    }
}
