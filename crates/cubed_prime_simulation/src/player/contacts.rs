//! Контакт игрока с врагами: урон игроку или dash-удар по врагу
//!
//! - Trigger (обычный враг): без dash игрок получает урон, в dash враг получает dash_strike_damage
//! - Solid (bouncy враг): то же, плюс dash-удар лечит игрока
//! - Dash-удар запускает hit-stop, если он ещё не идёт

use bevy::prelude::*;

use crate::combat::{damage_enemy, DamageDealt, DamageSource, Dead};
use crate::config::GameConfig;
use crate::contacts::{ContactKind, ContactStarted};
use crate::effects::{SoundCue, DASH_SOUND};
use crate::enemy::Enemy;
use crate::components::{Health, HealthBar};

use super::hit_stop::HitStop;
use super::movement::PlayerMotor;
use super::stats::PlayerStats;
use super::Player;

/// Что произошло при контакте игрока с врагом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContactOutcome {
    /// Игрок получает урон
    PlayerHurt,
    /// Dash-удар по врагу (heal: лечить ли игрока)
    DashStrike { heal: bool },
}

/// Решение по контакту (логика без ECS)
pub fn enemy_contact_outcome(is_dashing: bool, kind: ContactKind) -> EnemyContactOutcome {
    match (is_dashing, kind) {
        (false, _) => EnemyContactOutcome::PlayerHurt,
        (true, ContactKind::Trigger) => EnemyContactOutcome::DashStrike { heal: false },
        (true, ContactKind::Solid) => EnemyContactOutcome::DashStrike { heal: true },
    }
}

/// Система: обработка ContactStarted игрок ↔ враг (FixedUpdate)
#[allow(clippy::too_many_arguments)]
pub fn resolve_player_enemy_contacts(
    mut contacts: EventReader<ContactStarted>,
    players: Query<Option<&PlayerMotor>, With<Player>>,
    mut enemies: Query<(&Enemy, &mut Health, &mut HealthBar), Without<Dead>>,
    mut stats: ResMut<PlayerStats>,
    mut hit_stop: ResMut<HitStop>,
    config: Res<GameConfig>,
    mut damage_events: EventWriter<DamageDealt>,
    mut sounds: EventWriter<SoundCue>,
) {
    for contact in contacts.read() {
        let Ok(motor) = players.get(contact.entity) else {
            continue;
        };
        let Ok((enemy, mut health, mut bar)) = enemies.get_mut(contact.other) else {
            continue;
        };

        let is_dashing = motor.is_some_and(|m| m.is_dashing);

        match enemy_contact_outcome(is_dashing, contact.kind) {
            EnemyContactOutcome::PlayerHurt => {
                stats.take_damage(enemy.damage);
                crate::log(&format!(
                    "Player {:?} hurt by enemy {:?} (HP: {})",
                    contact.entity, contact.other, stats.health
                ));
            }
            EnemyContactOutcome::DashStrike { heal } => {
                let dealt = damage_enemy(&mut health, &mut bar, config.player.dash_strike_damage);
                damage_events.write(DamageDealt {
                    attacker: Some(contact.entity),
                    target: contact.other,
                    damage: dealt,
                    source: DamageSource::DashStrike,
                });

                if heal {
                    stats.heal(config.player.dash_heal);
                }

                if hit_stop.start() {
                    sounds.write(SoundCue { clip: DASH_SOUND });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_outcomes() {
        assert_eq!(
            enemy_contact_outcome(false, ContactKind::Trigger),
            EnemyContactOutcome::PlayerHurt
        );
        assert_eq!(
            enemy_contact_outcome(false, ContactKind::Solid),
            EnemyContactOutcome::PlayerHurt
        );
        assert_eq!(
            enemy_contact_outcome(true, ContactKind::Trigger),
            EnemyContactOutcome::DashStrike { heal: false }
        );
        assert_eq!(
            enemy_contact_outcome(true, ContactKind::Solid),
            EnemyContactOutcome::DashStrike { heal: true }
        );
    }
}
