use anyhow::Context;
use consentry_engine::config::{ConfigLoader, ConsentryConfig};
use consentry_engine::{
    CatalogLoader, DomSnapshot, Engine, Evaluation, MatchSource, Sanitizer, SeenDialogs,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ScanOptions {
    pub snapshot: PathBuf,
    pub catalog: Option<PathBuf>,
    pub url: Option<String>,
    pub html: Option<PathBuf>,
}

pub async fn load_config(path: Option<&Path>) -> anyhow::Result<ConsentryConfig> {
    let config = match path {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConfigLoader::load_default().await?,
    };
    Ok(config)
}

pub async fn scan(mut config: ConsentryConfig, options: ScanOptions) -> anyhow::Result<Value> {
    if options.catalog.is_some() {
        config.catalog.path = options.catalog;
    }
    let engine = Engine::from_config(config).await?;

    let content = tokio::fs::read_to_string(&options.snapshot)
        .await
        .with_context(|| format!("reading snapshot {}", options.snapshot.display()))?;
    let snapshot = DomSnapshot::from_json(&content)?;

    let raw_html = match &options.html {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading markup {}", path.display()))?,
        None => String::new(),
    };

    let mut seen = SeenDialogs::new();
    let output = match engine.evaluate(&snapshot.root(), &mut seen) {
        Evaluation::Matched(dialog, source) => {
            let source = match source {
                MatchSource::Heuristic => json!({ "kind": "heuristic" }),
                MatchSource::Signature { selector } => {
                    json!({ "kind": "signature", "selector": selector })
                }
            };
            let capture = options
                .url
                .as_deref()
                .map(|url| engine.capture(&dialog, url, &raw_html));
            info!(
                variant = dialog.variant.as_str(),
                jurisdiction = dialog.jurisdiction.as_str(),
                "scan complete"
            );
            json!({
                "status": "matched",
                "source": source,
                "dialog": dialog.summary(),
                "capture": capture,
            })
        }
        Evaluation::AlreadyHandled => json!({ "status": "already_handled" }),
        Evaluation::NotFound => json!({ "status": "not_found" }),
    };
    Ok(output)
}

pub async fn validate_catalog(path: &Path) -> anyhow::Result<Value> {
    let catalog = CatalogLoader::load_from(path)
        .await
        .with_context(|| format!("catalog {} rejected", path.display()))?;
    Ok(json!({
        "valid": true,
        "version": catalog.version,
        "signatures": catalog.len(),
        "dialogSelectors": catalog.dialog_selectors.len(),
    }))
}

pub async fn sanitize(config: ConsentryConfig, path: &Path) -> anyhow::Result<Value> {
    let html = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading markup {}", path.display()))?;
    let sanitized = Sanitizer::new(config.sanitizer).sanitize(&html);
    Ok(json!({ "sanitizedHtml": sanitized }))
}
