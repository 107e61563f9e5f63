//! Signature catalog and fallback matcher.
//!
//! The catalog is strictly generic: per-domain entries fail validation at
//! load time and the catalog is refused.

pub mod catalog;
pub mod loader;
pub mod matcher;

pub use catalog::{ButtonTypeHints, CatalogError, RegionDetection, SignatureCatalog};
pub use loader::CatalogLoader;
pub use matcher::{MatchKind, SignatureMatch, match_signature};
