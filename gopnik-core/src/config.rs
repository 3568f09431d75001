use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::advice::StrategyId;

/// Environment variable that overrides the stored generative API key.
pub const API_KEY_ENV: &str = "GOPNIK_LLM_API_KEY";

/// Credentials for the generative strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    pub api_key: String,
    pub model: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default strategy id, e.g. "rules" or "generative".
    pub default_strategy: Option<String>,

    /// Example TOML:
    /// [generative]
    /// api_key = "..."
    /// model = "gpt-4o-mini"
    pub generative: Option<GenerativeConfig>,
}

impl Config {
    /// Return the default strategy as a strongly-typed StrategyId. The
    /// rule-based strategy needs no credentials, so an unset default
    /// resolves to it rather than erroring.
    pub fn default_strategy_id(&self) -> Result<StrategyId> {
        match self.default_strategy.as_ref() {
            None => Ok(StrategyId::Rules),
            Some(s) => StrategyId::try_from(s.as_str()),
        }
    }

    /// Store default strategy as string.
    pub fn set_default_strategy(&mut self, id: StrategyId) {
        self.default_strategy = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "gopnik", "gopnik-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the generative API key, keeping any stored model name.
    pub fn upsert_generative_api_key(&mut self, api_key: String) {
        match self.generative.as_mut() {
            Some(generative) => generative.api_key = api_key,
            None => self.generative = Some(GenerativeConfig { api_key, model: None }),
        }
    }

    pub fn set_generative_model(&mut self, model: String) {
        if let Some(generative) = self.generative.as_mut() {
            generative.model = Some(model);
        } else {
            self.generative =
                Some(GenerativeConfig { api_key: String::new(), model: Some(model) });
        }
    }

    /// Returns the generative API key, if present and non-empty.
    pub fn generative_api_key(&self) -> Option<&str> {
        self.generative
            .as_ref()
            .map(|g| g.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn generative_model(&self) -> Option<&str> {
        self.generative.as_ref().and_then(|g| g.model.as_deref())
    }

    pub fn is_generative_configured(&self) -> bool {
        self.generative_api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::StrategyId;

    #[test]
    fn default_strategy_falls_back_to_rules() {
        let cfg = Config::default();
        let id = cfg.default_strategy_id().expect("fallback must resolve");

        assert_eq!(id, StrategyId::Rules);
    }

    #[test]
    fn default_strategy_rejects_unknown_names() {
        let cfg = Config { default_strategy: Some("psychic".to_string()), generative: None };
        let err = cfg.default_strategy_id().unwrap_err();

        assert!(err.to_string().contains("Unknown advice strategy"));
    }

    #[test]
    fn set_api_key_and_default_strategy() {
        let mut cfg = Config::default();

        cfg.upsert_generative_api_key("LLM_KEY".into());
        cfg.set_default_strategy(StrategyId::Generative);

        let default = cfg.default_strategy_id().expect("default strategy must exist");
        assert_eq!(default, StrategyId::Generative);

        assert_eq!(cfg.generative_api_key(), Some("LLM_KEY"));
        assert!(cfg.is_generative_configured());
    }

    #[test]
    fn upsert_api_key_keeps_stored_model() {
        let mut cfg = Config::default();

        cfg.set_generative_model("gpt-4o".into());
        cfg.upsert_generative_api_key("LLM_KEY".into());

        assert_eq!(cfg.generative_api_key(), Some("LLM_KEY"));
        assert_eq!(cfg.generative_model(), Some("gpt-4o"));
    }

    #[test]
    fn empty_api_key_counts_as_unconfigured() {
        let mut cfg = Config::default();
        cfg.set_generative_model("gpt-4o".into());

        assert_eq!(cfg.generative_api_key(), None);
        assert!(!cfg.is_generative_configured());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.upsert_generative_api_key("LLM_KEY".into());
        cfg.set_default_strategy(StrategyId::Generative);

        let text = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&text).expect("config must parse back");

        assert_eq!(parsed.default_strategy, Some("generative".to_string()));
        assert_eq!(parsed.generative_api_key(), Some("LLM_KEY"));
    }
}
