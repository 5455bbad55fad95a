//! Review types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OpineError;

/// Sentiment label attached to every review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = OpineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(OpineError::InvalidSentiment(other.to_string())),
        }
    }
}

/// A persisted review
///
/// The sentiment is computed once when the review is created and never
/// re-computed, so later changes to the classifier rules do not touch
/// stored rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}
