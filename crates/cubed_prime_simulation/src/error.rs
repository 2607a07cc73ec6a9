//! Ошибки gameplay слоя (config + setup)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameplayError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Значение вне допустимого диапазона (аналог inspector [Range])
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Mobile схема ввода без привязанных виртуальных джойстиков
    #[error("mobile input scheme requires both virtual joysticks (move + aim) to be linked to the player")]
    JoysticksNotLinked,
}

/// Проверка `min <= value <= max` для tuning полей
pub fn ensure_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), GameplayError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GameplayError::OutOfRange { field, value, min, max })
    }
}
