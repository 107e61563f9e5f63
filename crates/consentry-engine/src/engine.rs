//! One evaluation cycle: heuristic pipeline, signature fallback, dedupe.

use crate::capture::Sanitizer;
use crate::config::{ConfigError, ConfigLoader, ConsentryConfig};
use crate::dom::DocumentNode;
use crate::lexicon::Lexicon;
use crate::locator::{context_text, locate_dialog};
use crate::model::DialogMatch;
use crate::region::detect_jurisdiction;
use crate::session::{SeenDialogs, dialog_fingerprint};
use crate::signature::{CatalogError, CatalogLoader, SignatureCatalog, SignatureMatch, match_signature};
use crate::variant::detect_variant;
use consentry_common::CaptureRecord;
use thiserror::Error;
use tracing::{debug, info};

const MAX_RATING: f32 = 5.0;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Where a match came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSource {
    Heuristic,
    Signature { selector: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation<N> {
    Matched(DialogMatch<N>, MatchSource),
    /// The located dialog was already handled during this page lifetime.
    AlreadyHandled,
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    lexicon: Lexicon,
    config: ConsentryConfig,
    catalog: Option<SignatureCatalog>,
}

impl Engine {
    pub fn new(lexicon: Lexicon, config: ConsentryConfig) -> Self {
        Self {
            lexicon,
            config,
            catalog: None,
        }
    }

    /// Build an engine from configuration, loading the lexicon override and
    /// the signature catalog it names.
    pub async fn from_config(config: ConsentryConfig) -> Result<Self, EngineError> {
        let lexicon = match &config.detection.lexicon_path {
            Some(path) => ConfigLoader::load_lexicon(path).await?,
            None => Lexicon::builtin(),
        };
        let catalog = CatalogLoader::load_configured(&config.catalog).await?;
        let engine = Self::new(lexicon, config);
        Ok(match catalog {
            Some(catalog) => engine.with_catalog(catalog),
            None => engine,
        })
    }

    /// Attach a validated catalog; its generic tables extend the lexicon.
    pub fn with_catalog(mut self, catalog: SignatureCatalog) -> Self {
        self.lexicon = self.lexicon.with_catalog(&catalog);
        self.catalog = Some(catalog);
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ConsentryConfig {
        &self.config
    }

    pub fn catalog(&self) -> Option<&SignatureCatalog> {
        self.catalog.as_ref()
    }

    /// Run one evaluation cycle over `root`.
    pub fn evaluate<N: DocumentNode>(&self, root: &N, seen: &mut SeenDialogs) -> Evaluation<N> {
        let heuristic = locate_dialog(root, &self.lexicon, &self.config);
        let confident = heuristic
            .as_ref()
            .is_some_and(|m| m.confidence >= self.config.detection.min_confidence);

        let (dialog, source) = if confident {
            match heuristic {
                Some(m) => (m, MatchSource::Heuristic),
                None => return Evaluation::NotFound,
            }
        } else if let Some(fallback) = self.signature_fallback(root, heuristic.as_ref()) {
            fallback
        } else if let Some(m) = heuristic {
            (m, MatchSource::Heuristic)
        } else {
            return Evaluation::NotFound;
        };

        if !seen.insert(dialog_fingerprint(&dialog.container)) {
            debug!("dialog already handled");
            return Evaluation::AlreadyHandled;
        }
        Evaluation::Matched(dialog, source)
    }

    fn signature_fallback<N: DocumentNode>(
        &self,
        root: &N,
        heuristic: Option<&DialogMatch<N>>,
    ) -> Option<(DialogMatch<N>, MatchSource)> {
        let catalog = self.catalog.as_ref()?;
        let SignatureMatch {
            signature, node, ..
        } = match_signature(root, catalog)?;

        let container = match heuristic {
            Some(m) => m.container.clone(),
            None => node
                .ancestors()
                .into_iter()
                .find(|a| self.lexicon.has_dialog_keyword(&context_text(a)))
                .or_else(|| node.parent())
                .unwrap_or_else(|| node.clone()),
        };

        // The signature fills one slot; the other keeps the heuristic pick
        // unless it is the same node.
        let other = |pick: Option<&N>| pick.filter(|n| !n.is_same_node(&node)).cloned();
        let (accept, reject) = if signature.necessary {
            (
                other(heuristic.and_then(|m| m.accept_button.as_ref())),
                Some(node.clone()),
            )
        } else {
            (
                Some(node.clone()),
                other(heuristic.and_then(|m| m.reject_button.as_ref())),
            )
        };

        let jurisdiction = detect_jurisdiction(&container, &self.lexicon);
        let variant = detect_variant(
            &container,
            accept.as_ref(),
            reject.as_ref(),
            &self.lexicon,
            &self.config.dark_pattern,
        );
        info!(selector = %signature.selector, rating = signature.rating, "signature fallback matched");

        Some((
            DialogMatch {
                container,
                accept_button: accept,
                reject_button: reject,
                jurisdiction,
                variant,
                confidence: f32::from(signature.rating) / MAX_RATING,
            },
            MatchSource::Signature {
                selector: signature.selector.clone(),
            },
        ))
    }

    /// Count a successful application of a catalog signature.
    pub fn record_signature_use(
        &mut self,
        signature_id: &str,
        request_id: &str,
    ) -> Result<u64, CatalogError> {
        match self.catalog.as_mut() {
            Some(catalog) => catalog.record_use(signature_id, request_id),
            None => Err(CatalogError::UnknownSignature(signature_id.to_string())),
        }
    }

    /// Capture record for a settled match, sanitized with the configured rules.
    pub fn capture<N: DocumentNode>(
        &self,
        dialog: &DialogMatch<N>,
        page_url: &str,
        raw_html: &str,
    ) -> CaptureRecord {
        Sanitizer::new(self.config.sanitizer.clone()).capture(dialog, page_url, raw_html)
    }
}
