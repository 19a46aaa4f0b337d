// Hyperparameters for the paragraph-vector model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How document vectors are trained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    /// Distributed memory: the mean of the doc vector and the context words
    /// predicts the centre word.
    Dm,
    /// Distributed bag of words: the doc vector alone predicts each word.
    Dbow,
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dm" => Ok(Self::Dm),
            "dbow" => Ok(Self::Dbow),
            other => Err(format!("unknown training mode '{other}' (expected dm or dbow)")),
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dm => f.write_str("dm"),
            Self::Dbow => f.write_str("dbow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Dimensionality of word and document vectors
    pub vector_size: usize,
    /// Maximum distance between the centre word and a context word (DM only)
    pub window: usize,
    /// Words seen fewer times than this are dropped from the vocabulary
    pub min_count: u32,
    /// Down-sampling threshold for frequent words; 0 disables it
    pub sample: f64,
    /// Noise words drawn per positive example
    pub negative: usize,
    /// Learning rate of the first pass
    pub alpha: f32,
    /// Learning rate of the last pass
    pub min_alpha: f32,
    /// Passes the learning-rate schedule is spread over
    pub passes: usize,
    pub mode: TrainingMode,
    /// Seed for vector initialization, sampling, and shuffling
    pub seed: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            vector_size: 100,
            window: 10,
            min_count: 1,
            sample: 1e-4,
            negative: 5,
            alpha: 0.025,
            min_alpha: 0.0001,
            passes: 20,
            mode: TrainingMode::Dm,
            seed: 1,
        }
    }
}

impl ModelParams {
    /// Learning rate for a 0-based pass number. Decays linearly from `alpha`
    /// to `min_alpha` over `passes`, then stays at `min_alpha`.
    pub fn alpha_for_pass(&self, pass: usize) -> f32 {
        if self.passes <= 1 {
            return self.alpha;
        }
        let progress = (pass as f32 / (self.passes - 1) as f32).min(1.0);
        self.alpha - (self.alpha - self.min_alpha) * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_schedule_endpoints() {
        let params = ModelParams::default();
        assert!((params.alpha_for_pass(0) - 0.025).abs() < 1e-7);
        assert!((params.alpha_for_pass(19) - 0.0001).abs() < 1e-7);
        assert!((params.alpha_for_pass(50) - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn test_alpha_schedule_monotonic() {
        let params = ModelParams::default();
        for pass in 1..params.passes {
            assert!(params.alpha_for_pass(pass) < params.alpha_for_pass(pass - 1));
        }
    }

    #[test]
    fn test_single_pass_uses_alpha() {
        let params = ModelParams {
            passes: 1,
            ..ModelParams::default()
        };
        assert_eq!(params.alpha_for_pass(0), params.alpha);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("DBOW".parse::<TrainingMode>().unwrap(), TrainingMode::Dbow);
        assert_eq!("dm".parse::<TrainingMode>().unwrap(), TrainingMode::Dm);
        assert!("skipgram".parse::<TrainingMode>().is_err());
    }
}
