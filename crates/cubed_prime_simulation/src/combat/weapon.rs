//! Blaster игрока: стрельба пулями, пока зажат fire
//!
//! Пуля получает movement игрока в момент выстрела (set_player_velocity).

use bevy::prelude::*;

use crate::config::{GameConfig, WeaponConfig};
use crate::player::{Player, PlayerInput, PlayerMotor};

use super::bullet::spawn_bullet;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Blaster {
    /// Секунды между выстрелами
    pub fire_interval: f32,
    /// Осталось до следующего выстрела (<= 0 = готов)
    pub cooldown_timer: f32,
}

impl Blaster {
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            fire_interval: config.fire_interval,
            cooldown_timer: 0.0,
        }
    }

    /// Тик cooldown + попытка выстрела. Возвращает true если выстрел произошёл.
    pub fn tick(&mut self, fire_held: bool, delta: f32) -> bool {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= delta;
        }

        if fire_held && self.cooldown_timer <= 0.0 {
            self.cooldown_timer = self.fire_interval;
            return true;
        }

        false
    }
}

/// Event: игрок выстрелил
#[derive(Event, Debug, Clone, Copy)]
pub struct BlasterFired {
    pub shooter: Entity,
    pub bullet: Entity,
}

/// Система: стрельба игрока (Update)
pub fn fire_player_blaster(
    mut commands: Commands,
    mut shooters: Query<(Entity, &mut Blaster, &PlayerInput, &Transform, Option<&PlayerMotor>), With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time<Virtual>>,
    mut fired_events: EventWriter<BlasterFired>,
) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs();

    for (shooter, mut blaster, input, transform, motor) in shooters.iter_mut() {
        if !blaster.tick(input.fire_held, delta) {
            continue;
        }

        // Базовый вариант без motor: наследуем сырой ввод
        let inherited = motor.map_or(input.move_axis.clamp_length_max(1.0), |m| m.movement);
        let bullet = spawn_bullet(&mut commands, &config.bullet, *transform, inherited, now);

        fired_events.write(BlasterFired { shooter, bullet });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_immediately_then_waits() {
        let mut blaster = Blaster::from_config(&WeaponConfig { fire_interval: 0.15 });

        assert!(blaster.tick(true, 0.016));
        assert!(!blaster.tick(true, 0.1));
        assert!(blaster.tick(true, 0.1));
    }

    #[test]
    fn test_no_fire_when_not_held() {
        let mut blaster = Blaster::from_config(&WeaponConfig::default());
        assert!(!blaster.tick(false, 1.0));

        // cooldown не копится в минус бесконечно: выстрел сразу после нажатия
        assert!(blaster.tick(true, 0.0));
    }
}
