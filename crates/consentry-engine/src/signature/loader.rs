use super::catalog::{CatalogError, SignatureCatalog};
use crate::config::CatalogConfig;
use std::path::Path;
use tracing::{info, warn};

pub struct CatalogLoader;

impl CatalogLoader {
    /// Read and validate a catalog file. A catalog that fails validation is
    /// refused as a whole.
    pub async fn load_from(path: &Path) -> Result<SignatureCatalog, CatalogError> {
        let content = tokio::fs::read_to_string(path).await?;
        match SignatureCatalog::from_json_str(&content) {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    version = %catalog.version,
                    signatures = catalog.len(),
                    "signature catalog loaded"
                );
                Ok(catalog)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "signature catalog rejected");
                Err(e)
            }
        }
    }

    /// Load the catalog named in configuration, if any.
    pub async fn load_configured(
        config: &CatalogConfig,
    ) -> Result<Option<SignatureCatalog>, CatalogError> {
        match &config.path {
            Some(path) => Self::load_from(path).await.map(Some),
            None => Ok(None),
        }
    }
}
