//! Review intake service

use crate::storage::Database;
use anyhow::Result;
use chrono::Utc;
use opine_core::{Review, Sentiment, SentimentClassifier};
use std::sync::Arc;
use tracing::info;

pub struct ReviewService {
    db: Arc<Database>,
    classifier: SentimentClassifier,
}

impl ReviewService {
    pub fn new(db: Arc<Database>, classifier: SentimentClassifier) -> Self {
        Self { db, classifier }
    }

    /// Classify the text, persist it, and return the stored record
    pub async fn create_review(&self, text: &str) -> Result<Review> {
        let sentiment = self.classifier.classify(text);
        let created_at = Utc::now();

        info!("Creating review: sentiment={}", sentiment);

        let id = self.db.insert_review(text, sentiment, created_at).await?;

        Ok(Review {
            id,
            text: text.to_string(),
            sentiment,
            created_at,
        })
    }

    pub async fn list_reviews(&self, sentiment: Option<Sentiment>) -> Result<Vec<Review>> {
        self.db.list_reviews(sentiment).await
    }
}
