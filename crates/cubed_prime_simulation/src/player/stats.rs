//! PlayerStats: singleton аккумулятор игрока (здоровье, очки, счётчики врагов)

use bevy::prelude::*;

use crate::logger;

/// Глобальное состояние игрока
///
/// Инварианты:
/// - 0 ≤ health ≤ max_health
/// - current_enemies_count не уходит ниже нуля
/// - смерть фиксируется один раз (is_player_dead), дальнейший урон игнорируется
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub health: u32,
    pub max_health: u32,
    pub points: u64,
    pub total_enemies_killed: u32,
    pub current_enemies_count: u32,
    pub is_player_dead: bool,
    /// Entity игрока (None пока не заспавнен или после смерти)
    pub player: Option<Entity>,
    /// Смерть произошла, но PlayerDied ещё не отправлен
    death_pending: bool,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(5)
    }
}

impl PlayerStats {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            points: 0,
            total_enemies_killed: 0,
            current_enemies_count: 0,
            is_player_dead: false,
            player: None,
            death_pending: false,
        }
    }

    /// Нанести урон игроку. Возвращает true если этот удар убил игрока.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_player_dead {
            return false;
        }

        self.health = self.health.saturating_sub(amount);

        if self.health == 0 {
            self.is_player_dead = true;
            self.death_pending = true;
            logger::log_info(&format!("Player died with {} points", self.points));
            return true;
        }

        false
    }

    pub fn heal(&mut self, amount: u32) {
        if self.is_player_dead {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn add_points(&mut self, amount: u32) {
        self.points += u64::from(amount);
    }

    /// Учесть убитого врага: kills +1, живых −1
    pub fn register_kill(&mut self) {
        self.total_enemies_killed += 1;
        self.current_enemies_count = self.current_enemies_count.saturating_sub(1);
    }

    pub fn player_ref(&self) -> Option<Entity> {
        self.player
    }

    /// Забрать флаг "смерть ещё не обработана" (true ровно один раз)
    pub fn take_death_notice(&mut self) -> bool {
        std::mem::take(&mut self.death_pending)
    }

    /// Новый игрок: полное здоровье, жив
    pub fn revive(&mut self, player: Entity) {
        self.health = self.max_health;
        self.is_player_dead = false;
        self.death_pending = false;
        self.player = Some(player);
    }
}

/// Event: игрок умер
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDied {
    pub player: Option<Entity>,
    pub points: u64,
}

/// Система: деспавн игрока после смерти (onDeath)
pub fn handle_player_death(
    mut commands: Commands,
    mut stats: ResMut<PlayerStats>,
    mut died_events: EventWriter<PlayerDied>,
) {
    if !stats.take_death_notice() {
        return;
    }

    let player = stats.player.take();
    died_events.write(PlayerDied {
        player,
        points: stats.points,
    });

    if let Some(entity) = player {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }
}
