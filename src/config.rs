use std::env;
use std::str::FromStr;

use anyhow::Result;

use crate::embedding::ModelParams;

/// Default number of neighbours printed for a query.
pub const DEFAULT_TOP_N: usize = 4;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every value has a default
/// matching the reference run, and CLI flags override what is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelParams,
    /// Neighbours to show per query
    pub top_n: usize,
    /// Epochs used when inferring a vector for text outside the corpus
    pub infer_epochs: usize,
    /// Use the English stop-word list (DOCSIM_STOP_WORDS=false disables it)
    pub stop_words: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelParams::default(),
            top_n: DEFAULT_TOP_N,
            infer_epochs: 50,
            stop_words: true,
        }
    }
}

impl Config {
    /// Load configuration from `DOCSIM_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an
    /// error naming the variable.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let model = ModelParams {
            vector_size: var_or("DOCSIM_VECTOR_SIZE", defaults.model.vector_size)?,
            window: var_or("DOCSIM_WINDOW", defaults.model.window)?,
            min_count: var_or("DOCSIM_MIN_COUNT", defaults.model.min_count)?,
            sample: var_or("DOCSIM_SAMPLE", defaults.model.sample)?,
            negative: var_or("DOCSIM_NEGATIVE", defaults.model.negative)?,
            alpha: var_or("DOCSIM_ALPHA", defaults.model.alpha)?,
            min_alpha: var_or("DOCSIM_MIN_ALPHA", defaults.model.min_alpha)?,
            passes: var_or("DOCSIM_PASSES", defaults.model.passes)?,
            mode: var_or("DOCSIM_MODE", defaults.model.mode)?,
            seed: var_or("DOCSIM_SEED", defaults.model.seed)?,
        };

        let config = Self {
            model,
            top_n: var_or("DOCSIM_TOP_N", defaults.top_n)?,
            infer_epochs: var_or("DOCSIM_INFER_EPOCHS", defaults.infer_epochs)?,
            stop_words: var_or("DOCSIM_STOP_WORDS", defaults.stop_words)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the model cannot train with.
    pub fn validate(&self) -> Result<()> {
        if self.model.vector_size == 0 {
            anyhow::bail!("DOCSIM_VECTOR_SIZE must be at least 1");
        }
        if self.model.passes == 0 {
            anyhow::bail!("DOCSIM_PASSES must be at least 1");
        }
        if self.model.sample < 0.0 {
            anyhow::bail!("DOCSIM_SAMPLE must not be negative");
        }
        if !(self.model.alpha > 0.0 && self.model.min_alpha >= 0.0) {
            anyhow::bail!("DOCSIM_ALPHA must be positive and DOCSIM_MIN_ALPHA non-negative");
        }
        Ok(())
    }
}

fn var_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {name}: {raw:?} ({e})")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = Config::default();
        assert_eq!(config.model.vector_size, 100);
        assert_eq!(config.model.window, 10);
        assert_eq!(config.model.negative, 5);
        assert_eq!(config.model.passes, 20);
        assert_eq!(config.top_n, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_passes() {
        let mut config = Config::default();
        config.model.passes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_var_or_unset_uses_default() {
        let value: usize = var_or("DOCSIM_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
