use http::request::Parts;
use http::{Method, Request};
use offcache::{Strategy, StrategySelector, WriteMode};
use offcache_configuration::{ConfigError, ConfigRoute, ConfigRoutes, PathConfig, WriteConfig};
use offcache_core::{CacheName, PartitionNames};
use pretty_assertions::assert_eq;

const ROUTES: &str = r#"
cache_names:
  static: app-static-v1
  dynamic: app-dynamic-v1
write: Offload
default: NetworkOnly
routes:
  - path: { prefix: "/assets/" }
    strategy: StaticOnly
  - method: GET
    path: { regex: "\\.(css|js|png)$" }
    strategy: CacheFirst
  - method: get
    path: { prefix: "/api/" }
    strategy: network-first
  - method: GET
    path: { exact: "/" }
    strategy: cache_first
"#;

fn parts(method: Method, uri: &str) -> Parts {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .unwrap()
        .into_parts()
        .0
}

#[test]
fn test_routes_deserialize() {
    let config: ConfigRoutes = serde_saphyr::from_str(ROUTES).expect("failed to deserialize");

    assert_eq!(
        config.cache_names,
        PartitionNames::new("app-static-v1", "app-dynamic-v1")
    );
    assert_eq!(config.write, WriteConfig::Offload);
    assert_eq!(config.default, Strategy::NetworkOnly);
    assert_eq!(config.routes.len(), 4);
    assert_eq!(
        config.routes[0],
        ConfigRoute {
            method: None,
            path: Some(PathConfig::Prefix("/assets/".to_string())),
            strategy: Strategy::StaticOnly,
        }
    );
    assert_eq!(config.routes[2].strategy, Strategy::NetworkFirst);
    assert_eq!(config.routes[3].strategy, Strategy::CacheFirst);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config: ConfigRoutes = serde_saphyr::from_str("routes: []").expect("failed to deserialize");

    assert_eq!(config, ConfigRoutes::default());
    assert!(matches!(config.write_mode(), WriteMode::Inline));

    let selector = config.into_selector().expect("valid selector");
    assert_eq!(
        selector.select(&parts(Method::GET, "/app.css")),
        Strategy::NetworkOnly
    );
}

#[test]
fn test_selector_first_match_wins() {
    let config: ConfigRoutes = serde_saphyr::from_str(ROUTES).unwrap();
    let selector = config.into_selector().expect("valid selector");

    let cases = [
        (Method::GET, "/assets/app.1234.js", Strategy::StaticOnly),
        (Method::GET, "/app.css", Strategy::CacheFirst),
        (Method::GET, "/api/data", Strategy::NetworkFirst),
        (Method::GET, "/api/logo.png", Strategy::CacheFirst),
        (Method::GET, "/", Strategy::CacheFirst),
        (Method::POST, "/api/data", Strategy::NetworkOnly),
        (Method::GET, "/about", Strategy::NetworkOnly),
    ];
    for (method, uri, expected) in cases {
        assert_eq!(
            selector.select(&parts(method.clone(), uri)),
            expected,
            "{method} {uri}"
        );
    }
}

#[test]
fn test_write_mode_conversion() {
    assert!(matches!(
        WriteConfig::Offload.into_write_mode(),
        WriteMode::Offload(_)
    ));
    assert!(matches!(
        WriteConfig::Inline.into_write_mode(),
        WriteMode::Inline
    ));
}

#[test]
fn test_partition_names() {
    let config: ConfigRoutes = serde_saphyr::from_str(ROUTES).unwrap();
    let names = config.into_partition_names().expect("distinct names");

    assert_eq!(names.resolve(CacheName::Static), "app-static-v1");
    assert_eq!(names.resolve(CacheName::Dynamic), "app-dynamic-v1");
}

#[test]
fn test_duplicate_partition_names_rejected() {
    let yaml = r#"
cache_names:
  static: app-cache
  dynamic: app-cache
"#;
    let config: ConfigRoutes = serde_saphyr::from_str(yaml).unwrap();

    let err = config.into_partition_names().unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCacheName(name) if name == "app-cache"));
}

#[test]
fn test_invalid_regex_rejected() {
    let yaml = r#"
routes:
  - path: { regex: "(unclosed" }
    strategy: CacheFirst
"#;
    let config: ConfigRoutes = serde_saphyr::from_str(yaml).unwrap();

    let err = config.into_selector().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRegex { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn test_invalid_method_rejected() {
    let yaml = r#"
routes:
  - method: FETCH
    strategy: NetworkFirst
"#;
    let config: ConfigRoutes = serde_saphyr::from_str(yaml).unwrap();

    let err = config.into_selector().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMethod(method) if method == "FETCH"));
}

#[test]
fn test_relative_path_rejected() {
    let yaml = r#"
routes:
  - path: { prefix: "api/" }
    strategy: NetworkFirst
"#;
    let config: ConfigRoutes = serde_saphyr::from_str(yaml).unwrap();

    let err = config.into_selector().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPath(path) if path == "api/"));
}

#[test]
fn test_unknown_strategy_fails_to_parse() {
    let yaml = r#"
routes:
  - path: { prefix: "/" }
    strategy: StaleWhileRevalidate
"#;
    let result: Result<ConfigRoutes, _> = serde_saphyr::from_str(yaml);
    assert!(result.is_err());
}
