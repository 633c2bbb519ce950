use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::ProductView;
use crate::error::{AppError, AppResult};

/// Shown when the queried product is unknown to the catalog
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations available.";

/// A requested count as submitted by a client, either a JSON number or a form-style string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CountInput {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Anything else (bools, arrays, objects); always rejected
    Other(serde_json::Value),
}

impl CountInput {
    /// Validates the input as a strictly positive whole number
    pub fn to_top_n(&self) -> AppResult<NonZeroUsize> {
        let value = match self {
            CountInput::Integer(n) => *n,
            CountInput::Float(f) if f.is_finite() && f.abs() >= i64::MAX as f64 => {
                let reason = if *f < 0.0 { "positive" } else { "within range" };
                return Err(AppError::InvalidInput(format!(
                    "Number of recommendations must be {}, got {}",
                    reason, f
                )));
            }
            CountInput::Float(f) => {
                return Err(AppError::InvalidInput(format!(
                    "Number of recommendations must be a whole number, got {}",
                    f
                )))
            }
            CountInput::Other(v) => {
                return Err(AppError::InvalidInput(format!(
                    "Number of recommendations must be a number, got {}",
                    v
                )))
            }
            CountInput::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                AppError::InvalidInput(format!(
                    "Number of recommendations must be a number, got {:?}",
                    s
                ))
            })?,
        };

        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Number of recommendations must be positive, got {}",
                    value
                ))
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Exact product name to find neighbours for; missing reads as empty
    #[serde(default)]
    pub prod: String,
    pub nbr: Option<CountInput>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ProductView>,
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn found(recommendations: Vec<ProductView>) -> Self {
        Self {
            recommendations,
            message: None,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            recommendations: Vec::new(),
            message: Some(NO_RECOMMENDATIONS_MESSAGE.to_string()),
        }
    }
}
