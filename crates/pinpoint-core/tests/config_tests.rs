//! Integration tests for loading and validating options.

use std::io::Write;

use pinpoint_core::{Error, OptionsConfig, SelectorType};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = OptionsConfig::load(file.path()).expect("load");
    assert_eq!(config, OptionsConfig::default());
}

#[test]
fn test_full_config() {
    let file = write_config(
        r#"
selector_types = ["Attributes", "id", "NthChild", "ID"]
attributes_to_ignore = ["style"]
exclude_regex = "^tmp-"
"#,
    );
    let options = OptionsConfig::load(file.path())
        .expect("load")
        .into_options()
        .expect("valid");
    assert_eq!(
        options.selector_types,
        vec![
            SelectorType::Attributes,
            SelectorType::Id,
            SelectorType::NthChild
        ]
    );
    assert_eq!(options.attributes_to_ignore, vec!["style"]);
    let exclude = options.exclude.expect("pattern");
    assert!(exclude.is_match("tmp-1"));
    assert!(!exclude.is_match("x-tmp-1"));
}

#[test]
fn test_unknown_family_is_rejected() {
    let config = OptionsConfig::from_toml_str(r#"selector_types = ["ID", "XPath"]"#).expect("toml");
    let err = config.into_options().expect_err("unknown family");
    assert!(matches!(err, Error::UnknownSelectorType(ref name) if name == "XPath"));
    assert!(err.to_string().contains("XPath"));
}

#[test]
fn test_invalid_regex_is_rejected() {
    let config = OptionsConfig::from_toml_str(r#"exclude_regex = "(unclosed""#).expect("toml");
    let err = config.into_options().expect_err("bad pattern");
    assert!(matches!(err, Error::InvalidExclude { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = OptionsConfig::from_toml_str("selectorTypes = []").expect_err("unknown key");
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = OptionsConfig::load(&path).expect_err("missing file");
    assert!(matches!(err, Error::Io { path: ref p, .. } if *p == path));
}

#[test]
fn test_default_path_is_under_config_dir() {
    if let Some(path) = OptionsConfig::default_path() {
        assert!(path.ends_with(".config/pinpoint/config.toml"));
    }
}
