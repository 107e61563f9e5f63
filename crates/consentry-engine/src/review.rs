//! Review service interface.
//!
//! The review service is an external collaborator; the engine only speaks to
//! it through [`ReviewService`]. [`MemoryReviewService`] is an in-process
//! implementation for hosts and tests.

use crate::selector::Selector;
use async_trait::async_trait;
use chrono::Utc;
use consentry_common::review::{
    ReviewFilter, ReviewId, ReviewItem, ReviewStatus, ReviewSubmission,
};
use consentry_common::{ButtonType, Signature, SignatureKind};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Rating given to a freshly promoted signature.
const PROMOTED_RATING: u8 = 3;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(ReviewId),
    #[error("Review service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Store a capture for review. Submitting the same record twice returns
    /// the original id.
    async fn submit(&self, submission: ReviewSubmission) -> Result<ReviewId, ReviewError>;

    async fn list(&self, filter: &ReviewFilter) -> Result<Vec<ReviewItem>, ReviewError>;

    async fn update_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<ReviewItem, ReviewError>;
}

#[derive(Debug, Default)]
struct State {
    items: Vec<ReviewItem>,
    by_content: HashMap<String, ReviewId>,
    promotions: Vec<Signature>,
    next_id: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryReviewService {
    state: Arc<Mutex<State>>,
}

impl MemoryReviewService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signatures derived from approved reviews, waiting for the next catalog
    /// release.
    pub async fn pending_promotions(&self) -> Vec<Signature> {
        self.state.lock().await.promotions.clone()
    }
}

#[async_trait]
impl ReviewService for MemoryReviewService {
    async fn submit(&self, submission: ReviewSubmission) -> Result<ReviewId, ReviewError> {
        let mut state = self.state.lock().await;
        let key = submission.record.content_key();
        if let Some(id) = state.by_content.get(&key) {
            return Ok(id.clone());
        }

        state.next_id += 1;
        let id = format!("rev-{:06}", state.next_id);
        state.items.push(ReviewItem {
            id: id.clone(),
            record: submission.record,
            button_type: submission.button_type,
            status: ReviewStatus::Pending,
            submitted_at: Utc::now(),
            updated_at: None,
        });
        state.by_content.insert(key, id.clone());
        Ok(id)
    }

    async fn list(&self, filter: &ReviewFilter) -> Result<Vec<ReviewItem>, ReviewError> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<ReviewItem, ReviewError> {
        let mut state = self.state.lock().await;
        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;

        let newly_approved = status == ReviewStatus::Approved && item.status != status;
        item.status = status;
        item.updated_at = Some(Utc::now());
        let item = item.clone();

        if newly_approved {
            let signature = promote_signature(&item);
            if !state
                .promotions
                .iter()
                .any(|s| s.selector == signature.selector)
            {
                info!(selector = %signature.selector, "review approved, signature promoted");
                state.promotions.push(signature);
            }
        }
        Ok(item)
    }
}

/// Derive a signature from an approved review.
///
/// Class patterns and the structure hint come from the last compound of the
/// captured selector.
pub fn promote_signature(item: &ReviewItem) -> Signature {
    let selector = item.record.selector.clone();
    let last = Selector::parse(&selector)
        .ok()
        .and_then(|s| s.alternatives().first().cloned())
        .and_then(|c| c.compounds.last().cloned())
        .unwrap_or_default();

    Signature {
        selector,
        kind: SignatureKind::Button,
        rating: PROMOTED_RATING,
        necessary: item.button_type == ButtonType::Reject,
        class_patterns: last.classes,
        structure_hint: last.tag.unwrap_or_default(),
        uses: 0,
    }
}
