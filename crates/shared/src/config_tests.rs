use super::*;
use rstest::rstest;

const CLEARED: [(&str, Option<&str>); 7] = [
    ("DYNAMO_TABLE", None),
    ("BUCKET", None),
    ("POSTAGRAM__RECORD_STORE__TABLE", None),
    ("POSTAGRAM__RECORD_STORE__BACKEND", None),
    ("POSTAGRAM__RECORD_STORE__DATABASE_URL", None),
    ("POSTAGRAM__STORAGE__BUCKET", None),
    ("RUN_MODE", None),
];

fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let mut all: Vec<(&str, Option<&str>)> = CLEARED.to_vec();
    all.retain(|(k, _)| !vars.iter().any(|(v, _)| v == k));
    all.extend_from_slice(vars);
    temp_env::with_vars(all, f)
}

fn sample() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        record_store: RecordStoreConfig {
            table: "posts".to_string(),
            backend: RecordStoreBackend::Memory,
            database_url: None,
            max_connections: 10,
        },
        storage: ObjectStorageConfig {
            bucket: "postagram-images".to_string(),
            provider: ObjectStorageProvider::S3,
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            root: None,
            upload_ttl_secs: 900,
            download_ttl_secs: 3600,
        },
        labels: LabelConfig::default(),
    }
}

#[test]
fn test_load_from_legacy_variables() {
    let config = with_env(
        &[
            ("DYNAMO_TABLE", Some("posts")),
            ("BUCKET", Some("postagram-images")),
            (
                "POSTAGRAM__RECORD_STORE__DATABASE_URL",
                Some("postgres://localhost/postagram"),
            ),
        ],
        AppConfig::load,
    )
    .expect("config should load");

    assert_eq!(config.record_store.table, "posts");
    assert_eq!(config.record_store.backend, RecordStoreBackend::Postgres);
    assert_eq!(config.storage.bucket, "postagram-images");
    assert_eq!(config.storage.download_ttl_secs, 3600);
    assert_eq!(config.storage.upload_ttl_secs, 900);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.labels.max_labels, 5);
}

#[test]
fn test_load_from_prefixed_variables() {
    let config = with_env(
        &[
            ("POSTAGRAM__RECORD_STORE__TABLE", Some("social_posts")),
            ("POSTAGRAM__RECORD_STORE__BACKEND", Some("memory")),
            ("POSTAGRAM__STORAGE__BUCKET", Some("images")),
        ],
        AppConfig::load,
    )
    .expect("config should load");

    assert_eq!(config.record_store.table, "social_posts");
    assert_eq!(config.record_store.backend, RecordStoreBackend::Memory);
    assert_eq!(config.storage.bucket, "images");
}

#[test]
fn test_missing_table_is_fatal() {
    let result = with_env(
        &[
            ("BUCKET", Some("postagram-images")),
            ("POSTAGRAM__RECORD_STORE__BACKEND", Some("memory")),
        ],
        AppConfig::load,
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_bucket_is_fatal() {
    let result = with_env(
        &[
            ("DYNAMO_TABLE", Some("posts")),
            ("POSTAGRAM__RECORD_STORE__BACKEND", Some("memory")),
        ],
        AppConfig::load,
    );
    assert!(result.is_err());
}

#[test]
fn test_postgres_backend_requires_url() {
    let mut config = sample();
    config.record_store.backend = RecordStoreBackend::Postgres;
    assert!(config.validate().is_err());

    config.record_store.database_url = Some("postgres://localhost/postagram".to_string());
    assert!(config.validate().is_ok());
}

#[rstest]
#[case("posts", true)]
#[case("_posts_2024", true)]
#[case("", false)]
#[case("2posts", false)]
#[case("posts; DROP TABLE users", false)]
#[case("my-posts", false)]
fn test_table_name_validation(#[case] table: &str, #[case] valid: bool) {
    let mut config = sample();
    config.record_store.table = table.to_string();
    assert_eq!(config.validate().is_ok(), valid);
}

#[test]
fn test_empty_bucket_rejected() {
    let mut config = sample();
    config.storage.bucket = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_local_provider_requires_root() {
    let mut config = sample();
    config.storage.provider = ObjectStorageProvider::Local;
    assert!(config.validate().is_err());

    config.storage.root = Some("./storage".to_string());
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(0.0, true)]
#[case(0.75, true)]
#[case(1.0, true)]
#[case(1.5, false)]
#[case(-0.1, false)]
fn test_min_confidence_range(#[case] min_confidence: f32, #[case] valid: bool) {
    let mut config = sample();
    config.labels.min_confidence = min_confidence;
    assert_eq!(config.validate().is_ok(), valid);
}

#[test]
fn test_label_defaults() {
    let labels = LabelConfig::default();
    assert_eq!(labels.max_labels, 5);
    assert!((labels.min_confidence - 0.75).abs() < f32::EPSILON);
    assert!(labels.region.is_none());
}
