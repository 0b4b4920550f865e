use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and keeps the parsed value cached.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Falls back to `TConfig::default()` when nothing is stored.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|e| format!("Config lock poisoned: {}", e))?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        match self.config_content_provider.get_config_content()? {
            Some(config_data) => {
                let config: TConfig = self.config_serializer.deserialize(&config_data)?;
                config
                    .validate()
                    .map_err(|e| format!("Config validation error: {}", e))?;

                *current = Some(config.clone());
                Ok(config)
            }
            None => Ok(TConfig::default()),
        }
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|e| format!("Config lock poisoned: {}", e))?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[derive(Default)]
    struct MemoryProvider {
        content: Mutex<Option<String>>,
    }

    impl MemoryProvider {
        fn with_content(content: &str) -> Self {
            Self {
                content: Mutex::new(Some(content.to_string())),
            }
        }
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_missing_content_gives_default() {
        let manager: ConfigManager<_, ArenaConfig> =
            ConfigManager::new(MemoryProvider::default(), YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap(), ArenaConfig::default());
    }

    #[test]
    fn test_loads_yaml() {
        let yaml = "field_width: 30\nfield_height: 12\nplayers: 2\n";
        let manager: ConfigManager<_, ArenaConfig> =
            ConfigManager::new(MemoryProvider::with_content(yaml), YamlConfigSerializer::new());
        let config = manager.get_config().unwrap();
        assert_eq!(config.field_width, 30);
        assert_eq!(config.field_height, 12);
        assert_eq!(config.players, 2);
        assert_eq!(config.snake_length, ArenaConfig::default().snake_length);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let yaml = "field_width: 1\n";
        let manager: ConfigManager<_, ArenaConfig> =
            ConfigManager::new(MemoryProvider::with_content(yaml), YamlConfigSerializer::new());
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"), "{}", err);
    }

    #[test]
    fn test_set_config_rejects_invalid_and_stores_valid() {
        let manager: ConfigManager<_, ArenaConfig> =
            ConfigManager::new(MemoryProvider::default(), YamlConfigSerializer::new());

        let invalid = ArenaConfig {
            players: 0,
            ..ArenaConfig::default()
        };
        assert!(manager.set_config(&invalid).is_err());

        let valid = ArenaConfig {
            players: 3,
            ..ArenaConfig::default()
        };
        manager.set_config(&valid).unwrap();
        assert_eq!(manager.get_config().unwrap(), valid);
    }
}
