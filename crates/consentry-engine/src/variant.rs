//! Dialog variant detection and the dark-pattern score.
//!
//! The score is a fixed, auditable sum of weighted style comparisons between
//! the accept and reject controls. Weights and threshold come from
//! [`DarkPatternWeights`]; any change to them is a versioned change.

use crate::classifier::control_label;
use crate::config::DarkPatternWeights;
use crate::dom::DocumentNode;
use crate::lexicon::{Lexicon, identifier_tokens, normalize_text};
use crate::style;
use consentry_common::Variant;
use serde::Serialize;
use tracing::debug;

const PADDING_TOLERANCE_PX: f32 = 0.5;
const FONT_WEIGHT_DELTA: u16 = 300;

/// Outcome of the pairwise style comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DarkPatternScore {
    pub total: f32,
    pub threshold: f32,
    /// Names of the comparisons that contributed.
    pub reasons: Vec<&'static str>,
    pub weights_version: String,
}

impl DarkPatternScore {
    pub fn is_dark_pattern(&self) -> bool {
        self.total >= self.threshold
    }

    fn add(&mut self, reason: &'static str, weight: f32) {
        self.total += weight;
        self.reasons.push(reason);
    }
}

pub fn detect_variant<N: DocumentNode>(
    _container: &N,
    accept: Option<&N>,
    reject: Option<&N>,
    lexicon: &Lexicon,
    weights: &DarkPatternWeights,
) -> Variant {
    let Some(reject) = reject else {
        return Variant::NoChoice;
    };
    if !is_real_reject(reject, lexicon) {
        return Variant::Unknown;
    }
    let Some(accept) = accept else {
        return Variant::Unknown;
    };

    let score = score_dark_pattern(accept, reject, weights);
    debug!(total = score.total, reasons = ?score.reasons, "dark-pattern score");
    if score.is_dark_pattern() {
        Variant::DarkPattern
    } else {
        Variant::Standard
    }
}

/// A reject control whose label or identifiers carry reject vocabulary.
/// Settings-style controls and structural-only guesses do not qualify.
pub fn is_real_reject<N: DocumentNode>(reject: &N, lexicon: &Lexicon) -> bool {
    let label = normalize_text(&control_label(reject));
    let tokens = identifier_tokens(reject);
    lexicon.find_reject_text(&label).is_some() || lexicon.find_reject_identifier(&tokens).is_some()
}

pub fn score_dark_pattern<N: DocumentNode>(
    accept: &N,
    reject: &N,
    weights: &DarkPatternWeights,
) -> DarkPatternScore {
    let mut score = DarkPatternScore {
        total: 0.0,
        threshold: weights.threshold,
        reasons: Vec::new(),
        weights_version: weights.version.clone(),
    };

    let larger_font = matches!(
        (style::font_size(accept), style::font_size(reject)),
        (Some(a), Some(r)) if a - r > weights.font_size_delta_px
    );
    let bolder = style::font_weight(accept) >= style::font_weight(reject).saturating_add(FONT_WEIGHT_DELTA);
    if larger_font || bolder {
        score.add("font_size", weights.font_size);
    }

    let low = f64::from(weights.low_contrast_ratio);
    if style::text_contrast(reject) < low && style::text_contrast(accept) >= low {
        score.add("contrast", weights.contrast);
    }

    if style::has_filled_background(accept) && !style::has_filled_background(reject) {
        score.add("filled_background", weights.filled_background);
    }

    let (pa, pr) = (style::padding(accept), style::padding(reject));
    if pa.iter().zip(pr.iter()).any(|(a, r)| (a - r).abs() > PADDING_TOLERANCE_PX) {
        score.add("padding", weights.padding);
    }

    if accept_leads(accept, reject) {
        score.add("position", weights.position);
    }

    score
}

/// Accept sits left of reject and the two do not share a parent.
fn accept_leads<N: DocumentNode>(accept: &N, reject: &N) -> bool {
    let (Some(a), Some(r)) = (accept.bounding_rect(), reject.bounding_rect()) else {
        return false;
    };
    let shared_parent = match (accept.parent(), reject.parent()) {
        (Some(pa), Some(pr)) => pa.is_same_node(&pr),
        _ => false,
    };
    a.x < r.x && !shared_parent
}
