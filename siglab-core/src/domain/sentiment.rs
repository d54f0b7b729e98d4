//! News sentiment — the coarse label consumed by the signal builder.

use serde::{Deserialize, Serialize};

/// Overall sentiment direction from the news analysis provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// +1 bullish, -1 bearish, 0 neutral.
    pub fn sign(&self) -> f64 {
        match self {
            SentimentLabel::Bullish => 1.0,
            SentimentLabel::Bearish => -1.0,
            SentimentLabel::Neutral => 0.0,
        }
    }
}

/// Coarse news sentiment with a confidence in [0, 1].
///
/// Produced by an external provider. The core never requires one: when the
/// provider is unavailable, callers substitute `neutral_default()` and the
/// pipeline proceeds on technicals alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub overall: SentimentLabel,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl NewsSentiment {
    /// Low-confidence neutral stand-in used when no sentiment provider is
    /// reachable (or when scanning many symbols without per-symbol news).
    pub fn neutral_default() -> Self {
        Self {
            overall: SentimentLabel::Neutral,
            confidence: 0.4,
            reasons: vec!["No news analysis available".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_default_is_low_confidence() {
        let sentiment = NewsSentiment::neutral_default();
        assert_eq!(sentiment.overall, SentimentLabel::Neutral);
        assert!(sentiment.confidence < 0.6);
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&SentimentLabel::Bullish).unwrap(),
            "\"bullish\""
        );
    }

    #[test]
    fn label_signs() {
        assert_eq!(SentimentLabel::Bullish.sign(), 1.0);
        assert_eq!(SentimentLabel::Bearish.sign(), -1.0);
        assert_eq!(SentimentLabel::Neutral.sign(), 0.0);
    }
}
