use game_core::{ConfigError, EnemyCatalog, GameConfig};

/// Everything a runtime needs from the content layer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameContent {
    pub config: GameConfig,
    pub enemies: EnemyCatalog,
}

impl GameContent {
    pub fn new(config: GameConfig, enemies: EnemyCatalog) -> Self {
        Self { config, enemies }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }
}
