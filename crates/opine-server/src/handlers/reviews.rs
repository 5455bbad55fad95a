//! Review handlers

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use opine_core::{Review, Sentiment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    sentiment: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<CreateReviewRequest>,
) -> Result<Json<Review>, StatusCode> {
    match state.reviews.create_review(&req_body.text).await {
        Ok(review) => Ok(Json(review)),
        Err(e) => {
            tracing::error!("Failed to create review: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<Vec<Review>>, StatusCode> {
    // An absent or empty parameter means "no filter"; anything else must be
    // one of the three labels
    let filter = match query.sentiment.as_deref() {
        None | Some("") => None,
        Some(s) => match s.parse::<Sentiment>() {
            Ok(sentiment) => Some(sentiment),
            Err(e) => {
                tracing::debug!("Rejecting list request: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
    };

    match state.reviews.list_reviews(filter).await {
        Ok(reviews) => Ok(Json(reviews)),
        Err(e) => {
            tracing::error!("Failed to list reviews: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
