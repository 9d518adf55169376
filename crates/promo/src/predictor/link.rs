use serde::{Deserialize, Serialize};

/// Maps a model's raw score to a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    /// The score is the rate.
    #[default]
    Identity,

    /// The score is a log-odds; the rate is `1 / (1 + e^-score)`.
    Logistic,

    /// The score is a log-rate; the rate is `e^score`.
    Log,
}

impl Link {
    #[must_use]
    pub fn apply(self, score: f64) -> f64 {
        match self {
            Self::Identity => score,
            Self::Logistic => 1.0 / (1.0 + (-score).exp()),
            Self::Log => score.exp(),
        }
    }
}
