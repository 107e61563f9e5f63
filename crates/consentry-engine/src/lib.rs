//! Consent dialog detection engine.
//!
//! Locates cookie/privacy consent dialogs in a read-only document tree,
//! classifies their accept / reject / settings controls, labels jurisdiction
//! and visual variant, falls back to a generic signature catalog, and
//! produces sanitized capture records for human review.

pub mod capture;
pub mod classifier;
pub mod config;
pub mod dom;
pub mod engine;
pub mod lexicon;
pub mod locator;
pub mod model;
pub mod region;
pub mod review;
pub mod selector;
pub mod session;
pub mod signature;
pub(crate) mod style;
pub mod variant;
pub mod visibility;

pub use capture::{Sanitizer, build_capture_record};
pub use classifier::{ButtonClassification, ConsentToggle, classify_buttons, find_consent_toggles};
pub use config::{ConfigLoader, ConsentryConfig};
pub use dom::{DocumentNode, DomSnapshot, SnapshotNode};
pub use engine::{Engine, EngineError, Evaluation, MatchSource};
pub use lexicon::Lexicon;
pub use locator::{find_container, locate_dialog};
pub use model::{Candidate, DialogMatch, DialogSummary};
pub use region::detect_jurisdiction;
pub use review::{MemoryReviewService, ReviewError, ReviewService, promote_signature};
pub use session::{SeenDialogs, dialog_fingerprint};
pub use signature::{CatalogError, CatalogLoader, SignatureCatalog, match_signature};
pub use variant::{DarkPatternScore, detect_variant, score_dark_pattern};
pub use visibility::is_visible;
