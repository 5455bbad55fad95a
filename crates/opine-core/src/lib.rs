//! Opine Core Library
//!
//! Domain types and the keyword sentiment classifier for the Opine review
//! service.

pub mod classifier;
pub mod error;
pub mod types;

pub use classifier::{ClassifierRule, SentimentClassifier};
pub use error::{OpineError, Result};
pub use types::*;
