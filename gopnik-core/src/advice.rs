use std::{convert::TryFrom, fmt::Debug};

use async_trait::async_trait;

use crate::{
    Config,
    advice::{generative::GenerativeAdvice, rules::RuleBasedAdvice},
    error::ResolutionFailure,
    model::{AdviceResult, WeatherSnapshot},
};

pub mod generative;
pub mod rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyId {
    Rules,
    Generative,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::Rules => "rules",
            StrategyId::Generative => "generative",
        }
    }

    pub const fn all() -> &'static [StrategyId] {
        &[StrategyId::Rules, StrategyId::Generative]
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StrategyId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "rules" => Ok(StrategyId::Rules),
            "generative" => Ok(StrategyId::Generative),
            _ => Err(anyhow::anyhow!(
                "Unknown advice strategy '{value}'. Supported strategies: rules, generative."
            )),
        }
    }
}

/// A pluggable mapping from a weather snapshot to a recommendation.
///
/// The rule-based implementation is deterministic and never fails; the
/// generative one talks to a model endpoint and can fail like any other
/// upstream call.
#[async_trait]
pub trait AdviceStrategy: Send + Sync + Debug {
    async fn advise(&self, snapshot: &WeatherSnapshot)
    -> Result<AdviceResult, ResolutionFailure>;
}

/// Construct a strategy from config and explicit StrategyId.
pub fn strategy_from_config(
    id: StrategyId,
    config: &Config,
) -> anyhow::Result<Box<dyn AdviceStrategy>> {
    let boxed: Box<dyn AdviceStrategy> = match id {
        StrategyId::Rules => Box::new(RuleBasedAdvice),
        StrategyId::Generative => {
            let api_key = config.generative_api_key().ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for the generative strategy.\n\
                     Hint: set {} or run `gopnik configure` and enter your API key.",
                    crate::config::API_KEY_ENV,
                )
            })?;

            let model = config
                .generative_model()
                .unwrap_or(generative::DEFAULT_MODEL)
                .to_string();

            Box::new(GenerativeAdvice::new(api_key.to_owned(), model)?)
        }
    };

    Ok(boxed)
}

/// Construct the configured default strategy; falls back to the rule-based
/// one when nothing is configured.
pub fn default_strategy_from_config(config: &Config) -> anyhow::Result<Box<dyn AdviceStrategy>> {
    let id = config.default_strategy_id()?;
    strategy_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn strategy_id_as_str_roundtrip() {
        for id in StrategyId::all() {
            let s = id.as_str();
            let parsed = StrategyId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_strategy_error() {
        let err = StrategyId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown advice strategy"));
    }

    #[test]
    fn generative_strategy_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = strategy_from_config(StrategyId::Generative, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn default_strategy_is_rules_when_unconfigured() {
        let cfg = Config::default();
        let id = cfg.default_strategy_id().expect("default must resolve");
        assert_eq!(id, StrategyId::Rules);

        let strategy = default_strategy_from_config(&cfg);
        assert!(strategy.is_ok());
    }

    #[test]
    fn generative_strategy_works_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_generative_api_key("KEY".to_string());
        cfg.set_default_strategy(StrategyId::Generative);

        let strategy = default_strategy_from_config(&cfg);
        assert!(strategy.is_ok());
    }
}
