use crate::protocol::{ButtonType, CaptureRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ReviewId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A capture handed to the review service, tagged with the control it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub record: CaptureRecord,
    pub button_type: ButtonType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: ReviewId,
    pub record: CaptureRecord,
    pub button_type: ButtonType,
    pub status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ReviewItem {
    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }
}

/// Filter for listing reviews. Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl ReviewFilter {
    pub fn matches(&self, item: &ReviewItem) -> bool {
        self.status.is_none_or(|s| s == item.status)
            && self
                .domain
                .as_deref()
                .is_none_or(|d| d.eq_ignore_ascii_case(&item.record.domain))
            && self.approved.is_none_or(|a| a == item.is_approved())
    }
}
