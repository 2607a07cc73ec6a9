//! Теги мира и 2D helpers для Transform
//!
//! Теги заменяют строковые CompareTag проверки: маркер-компонент на entity.

use bevy::prelude::*;

/// Поезд: любой враг, задетый поездом, умирает
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Train;

/// Поверхность, которая останавливает пули (стены, ящики)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BulletSolid;

/// Позиция entity в плоскости XY
pub fn planar_position(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

/// Угол поворота вокруг Z (радианы)
pub fn planar_rotation(transform: &Transform) -> f32 {
    transform.rotation.to_euler(EulerRot::ZYX).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_planar_helpers() {
        let transform = Transform::from_xyz(3.0, -2.0, 5.0).with_rotation(Quat::from_rotation_z(FRAC_PI_2));

        assert_eq!(planar_position(&transform), Vec2::new(3.0, -2.0));
        assert!((planar_rotation(&transform) - FRAC_PI_2).abs() < 1e-5);
    }
}
