use consentry_engine::config::{ConfigError, ConfigLoader, ConsentryConfig};
use std::path::PathBuf;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_values() {
    let config = ConsentryConfig::default();
    assert_eq!(config.detection.min_confidence, 0.5);
    assert!(!config.detection.narrow_scan_matches);
    assert_eq!(config.dark_pattern.threshold, 1.5);
    assert_eq!(config.dark_pattern.font_size, 1.0);
    assert_eq!(config.dark_pattern.padding, 0.5);
    assert_eq!(config.dark_pattern.version, "v1");
    assert_eq!(config.sanitizer.email_placeholder, "[EMAIL]");
    assert_eq!(config.sanitizer.phone_placeholder, "[PHONE]");
    assert!(config.catalog.path.is_none());
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
detection:
  min_confidence: 0.7
dark_pattern:
  version: "v2"
  threshold: 2.0
sanitizer:
  fallback_chars: 500
catalog:
  path: /etc/consentry/catalog.json
"#
    )
    .unwrap();

    let config = ConfigLoader::load_from(file.path())
        .await
        .expect("Failed to load config from file");

    assert_eq!(config.detection.min_confidence, 0.7);
    assert_eq!(config.detection.max_scan_text_chars, 5000);
    assert_eq!(config.dark_pattern.version, "v2");
    assert_eq!(config.dark_pattern.threshold, 2.0);
    assert_eq!(config.dark_pattern.contrast, 1.0);
    assert_eq!(config.sanitizer.fallback_chars, 500);
    assert_eq!(config.sanitizer.email_placeholder, "[EMAIL]");
    assert_eq!(
        config.catalog.path.as_deref(),
        Some(std::path::Path::new("/etc/consentry/catalog.json"))
    );
}

#[tokio::test]
async fn test_empty_file_gives_defaults() {
    let file = NamedTempFile::new().unwrap();
    let config = ConfigLoader::load_from(file.path()).await.unwrap();
    assert_eq!(config.detection.min_confidence, 0.5);
}

#[tokio::test]
async fn test_load_from_nonexistent_file() {
    let result =
        ConfigLoader::load_from(std::path::Path::new("/nonexistent/path/consentry.yaml")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_invalid_yaml_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "detection: [not, a, map").unwrap();
    assert!(ConfigLoader::load_from(file.path()).await.is_err());
}

#[tokio::test]
async fn test_errors_name_the_offending_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "detection:\n  min_confidence: high").unwrap();
    let err = ConfigLoader::load_from(file.path()).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), file.path());
    assert!(err.to_string().contains(&file.path().display().to_string()));

    let missing = PathBuf::from("/nonexistent/consentry/lexicon.yaml");
    let err = ConfigLoader::load_lexicon(&missing).await.unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/consentry/lexicon.yaml"));
}

#[tokio::test]
async fn test_blank_lexicon_file_is_builtin() {
    let file = NamedTempFile::new().unwrap();
    let lexicon = ConfigLoader::load_lexicon(file.path()).await.unwrap();
    assert_eq!(lexicon, consentry_engine::Lexicon::builtin());
}

#[test]
fn test_search_paths_order() {
    let paths = ConfigLoader::search_paths(Some(PathBuf::from("/home/alice")));
    assert_eq!(
        paths,
        vec![
            PathBuf::from("./consentry.yaml"),
            PathBuf::from("/home/alice/.consentry/config.yaml"),
        ]
    );
    assert_eq!(ConfigLoader::search_paths(None).len(), 1);
}

#[tokio::test]
async fn test_lexicon_override_keeps_builtin_tables() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
dialog_ids:
  - my-consent
languages:
  - code: xx
    accept: ["yep"]
    reject: ["nah"]
"#
    )
    .unwrap();

    let lexicon = ConfigLoader::load_lexicon(file.path()).await.unwrap();
    assert_eq!(lexicon.dialog_ids, vec!["my-consent".to_string()]);
    assert_eq!(lexicon.languages.len(), 1);
    assert_eq!(lexicon.find_accept_text("yep"), Some("yep"));
    assert!(lexicon.has_dialog_keyword("we use cookies"));
}
