//! Здоровье акторов: Health, HealthBar

use bevy::prelude::*;

/// Здоровье (враги и прочие разрушаемые сущности)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Доля здоровья 0.0..=1.0 (для fill полоски)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Полоска здоровья над врагом (UI image fill amount)
///
/// Обновляется при каждом уроне; клиент только рисует `fill`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthBar {
    pub fill: f32,
}

impl Default for HealthBar {
    fn default() -> Self {
        Self { fill: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(10_000); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_fraction() {
        let mut health = Health::new(100);
        health.take_damage(50);
        assert_eq!(health.fraction(), 0.5);

        assert_eq!(Health::new(0).fraction(), 0.0);
    }
}
