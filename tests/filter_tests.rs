use std::fs;
use tempfile::TempDir;
use treedump::collect::{collect, CollectConfig};
use treedump::filter::{FilterConfig, PathPattern};
use treedump::FilterError;

#[test]
fn test_pattern_keeps_source_text() {
    let pattern = PathPattern::parse("**/docs/*/*.md").unwrap();
    assert_eq!(pattern.as_str(), "**/docs/*/*.md");
    assert_eq!(pattern.to_string(), "**/docs/*/*.md");
    assert!(pattern.matches("docs/api/index.md"));
    assert!(pattern.matches("site/docs/api/index.md"));
    assert!(!pattern.matches("docs/index.md"));
}

#[test]
fn test_pattern_matches_literal() {
    let pattern = PathPattern::parse("src/lib.rs").unwrap();
    assert!(pattern.matches("src/lib.rs"));
    assert!(!pattern.matches("src/main.rs"));
    assert!(!pattern.matches("src"));
    assert!(!pattern.matches("src/lib.rs/extra"));
}

#[test]
fn test_pattern_matches_single_wildcard() {
    let pattern = PathPattern::parse("crates/*/Cargo.toml").unwrap();
    assert!(pattern.matches("crates/core/Cargo.toml"));
    assert!(pattern.matches("crates/cli/Cargo.toml"));
    assert!(!pattern.matches("crates/Cargo.toml"));
    assert!(!pattern.matches("crates/a/b/Cargo.toml"));
}

#[test]
fn test_pattern_matches_double_wildcard() {
    let pattern = PathPattern::parse("**/Cargo.lock").unwrap();
    assert!(pattern.matches("Cargo.lock"));
    assert!(pattern.matches("crates/core/Cargo.lock"));
    assert!(!pattern.matches("Cargo.toml"));
}

#[test]
fn test_pattern_matches_segment_glob() {
    let pattern = PathPattern::parse("**/*.log").unwrap();
    assert!(pattern.matches("build.log"));
    assert!(pattern.matches("logs/2024/app.log"));
    assert!(!pattern.matches("logs/app.log.gz"));
}

#[test]
fn test_ignore_patterns_reject() {
    let config = FilterConfig::builder()
        .ignore("target/**")
        .ignore("**/*.bak")
        .build()
        .unwrap();

    assert!(!config.accepts("target/release/app"));
    assert!(!config.accepts("notes/old.bak"));
    assert!(config.accepts("src/main.rs"));
    assert!(config.accepts("targets.txt"));
}

#[test]
fn test_only_patterns_restrict() {
    let config = FilterConfig::builder()
        .only("src/**")
        .only("Cargo.toml")
        .build()
        .unwrap();

    assert!(config.accepts("src/deep/mod.rs"));
    assert!(config.accepts("Cargo.toml"));
    assert!(!config.accepts("README.md"));
}

#[test]
fn test_ignore_wins_over_only() {
    let config = FilterConfig::builder()
        .only("src/**")
        .ignore("src/generated/**")
        .build()
        .unwrap();

    assert!(config.accepts("src/lib.rs"));
    assert!(!config.accepts("src/generated/bindings.rs"));
    assert!(!config.accepts("docs/index.md"));
}

#[test]
fn test_empty_filter_accepts_everything() {
    let config = FilterConfig::new();
    assert!(config.is_empty());
    assert!(config.accepts("any/path/at/all"));
}

#[test]
fn test_only_filter_during_collection() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub mod a;\n").unwrap();
    fs::write(dir.path().join("README.md"), "# readme\n").unwrap();

    let config = CollectConfig {
        filter: FilterConfig::builder().only("**/*.rs").build().unwrap(),
        ..Default::default()
    };
    let files = collect(dir.path(), &config).unwrap();
    let paths: Vec<&str> = files.relative_paths().collect();
    assert_eq!(paths, vec!["src/lib.rs"]);
}

#[test]
fn test_malformed_pattern_names_the_pattern() {
    let err = FilterConfig::builder()
        .ignore("target/**")
        .ignore("logs/{a,b")
        .build()
        .unwrap_err();
    assert!(matches!(err, FilterError::InvalidPattern { .. }));
    assert!(err.to_string().contains("logs/{a,b"));
}

#[test]
fn test_deeply_nested_any_depth_pattern() {
    let config = FilterConfig::builder()
        .only("**/**/**/**/**/**/**/**/**/**/z")
        .build()
        .unwrap();
    let deep: Vec<&str> = vec!["a"; 30];
    assert!(!config.accepts(&deep.join("/")));
    assert!(config.accepts(&format!("{}/z", deep.join("/"))));
    assert!(config.accepts("z"));
}
