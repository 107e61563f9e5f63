use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsentryConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub dark_pattern: DarkPatternWeights,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Below this confidence the signature catalog is consulted.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Keyword-scan candidates with more text than this are skipped.
    #[serde(default = "default_max_scan_text_chars")]
    pub max_scan_text_chars: usize,
    /// Opt-in: descend from the first keyword-scan hit to its innermost
    /// qualifying container. Off, the first hit in document order wins.
    #[serde(default)]
    pub narrow_scan_matches: bool,
    /// Optional lexicon override file (YAML or JSON).
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            max_scan_text_chars: default_max_scan_text_chars(),
            narrow_scan_matches: false,
            lexicon_path: None,
        }
    }
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_max_scan_text_chars() -> usize {
    5000
}

/// Weights of the dark-pattern score. Changing any value is a versioned change:
/// bump `version` alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarkPatternWeights {
    #[serde(default = "default_weights_version")]
    pub version: String,
    #[serde(default = "default_one")]
    pub font_size: f32,
    #[serde(default = "default_one")]
    pub contrast: f32,
    #[serde(default = "default_one")]
    pub filled_background: f32,
    #[serde(default = "default_half")]
    pub padding: f32,
    #[serde(default = "default_half")]
    pub position: f32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_font_size_delta_px")]
    pub font_size_delta_px: f32,
    #[serde(default = "default_low_contrast_ratio")]
    pub low_contrast_ratio: f32,
}

impl Default for DarkPatternWeights {
    fn default() -> Self {
        Self {
            version: default_weights_version(),
            font_size: default_one(),
            contrast: default_one(),
            filled_background: default_one(),
            padding: default_half(),
            position: default_half(),
            threshold: default_threshold(),
            font_size_delta_px: default_font_size_delta_px(),
            low_contrast_ratio: default_low_contrast_ratio(),
        }
    }
}

fn default_weights_version() -> String {
    "v1".to_string()
}

fn default_one() -> f32 {
    1.0
}

fn default_half() -> f32 {
    0.5
}

fn default_threshold() -> f32 {
    1.5
}

fn default_font_size_delta_px() -> f32 {
    2.0
}

fn default_low_contrast_ratio() -> f32 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    #[serde(default = "default_email_placeholder")]
    pub email_placeholder: String,
    #[serde(default = "default_phone_placeholder")]
    pub phone_placeholder: String,
    /// Larger inputs go straight to the fallback path.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Length of the fallback output, in characters.
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            email_placeholder: default_email_placeholder(),
            phone_placeholder: default_phone_placeholder(),
            max_input_bytes: default_max_input_bytes(),
            fallback_chars: default_fallback_chars(),
        }
    }
}

fn default_email_placeholder() -> String {
    "[EMAIL]".to_string()
}

fn default_phone_placeholder() -> String {
    "[PHONE]".to_string()
}

fn default_max_input_bytes() -> usize {
    512 * 1024
}

fn default_fallback_chars() -> usize {
    2000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}
