//! Loading real files from disk.

use std::io::Write;

use kvcfg::{ConfigError, ConfigStore, ParseOptions};
use tempfile::NamedTempFile;

fn create_test_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
#[allow(clippy::approx_constant)]
fn test_demo_config() {
    let file = create_test_config_file("# demo\nfoo = 10\nbar=hello world\npi=3.14 # approx\n");
    let config = ConfigStore::open(file.path());

    assert_eq!(config.get_int("foo"), (true, 10));
    assert_eq!(config.get_string("bar"), (true, "hello world".to_string()));
    assert_eq!(config.get_double("pi"), (true, 3.14));
    assert_eq!(
        config.get_string_optional("notExisting"),
        (false, String::new())
    );
    assert_eq!(
        config.get_string_or("notExisting", "fallback"),
        (false, "fallback".to_string())
    );
    assert!(!config.has_errors());
    assert_eq!(config.source(), file.path().display().to_string());
}

#[test]
fn test_format_rules() {
    let content = "\
# comment line
key1 = value1
key2=value2   # inline comment stripped
  leading-ws-key = value with internal = signs
\t# indented comment

no delimiter on this line
 = no key
ke#y = comment in key
empty =
only_comment = # nothing
dup = first
dup = second
";
    let file = create_test_config_file(content);
    let config = ConfigStore::open(file.path());
    let map = config.get_map();

    assert_eq!(map.len(), 4);
    assert_eq!(map["key1"], "value1");
    assert_eq!(map["key2"], "value2");
    assert_eq!(map["leading-ws-key"], "value with internal = signs");
    assert_eq!(map["dup"], "first");
    assert!(!config.has_errors());
    assert!(matches!(
        config.issues(),
        [ConfigError::DuplicateKey { line: 13, .. }]
    ));
}

#[test]
fn test_reparse_is_idempotent() {
    let file = create_test_config_file("a = 1\nnot an entry\nb = two # c\n");
    let first = ConfigStore::open(file.path());
    let second = ConfigStore::open(file.path());
    assert_eq!(first.get_map(), second.get_map());
    assert_eq!(first.len(), 2);
}

#[test]
fn test_custom_delimiter_and_comment() {
    let file = create_test_config_file(
        "; ini style\nhost: example.org ; primary\nport: 8080\ncolor: #ff0000\nkey = ignored\n",
    );
    let options = ParseOptions::default()
        .with_delimiter(':')
        .with_comment(';')
        .with_verbose(true);
    let config = ConfigStore::open_with(file.path(), options);

    assert_eq!(config.options(), &options);
    assert_eq!(config.get_string("host"), (true, "example.org".to_string()));
    assert_eq!(config.get_uint("port"), (true, 8080));
    assert_eq!(config.get_string("color"), (true, "#ff0000".to_string()));
    assert!(!config.contains_key("key"));
    assert!(!config.has_errors());
}

#[test]
fn test_nonexistent_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing.cfg");
    let config = ConfigStore::open_with(&path, ParseOptions::default().with_verbose(true));

    assert!(config.is_empty());
    assert!(config.has_errors());
    assert!(matches!(config.issues(), [ConfigError::Open { .. }]));
    assert_eq!(config.get_string_or("anything", "fb"), (false, "fb".to_string()));
}

#[test]
fn test_required_failures_flag_errors() {
    let file = create_test_config_file("n = 42\ns = abc\nbig = 99999999999\n");

    let config = ConfigStore::open(file.path());
    assert_eq!(config.get_int("s"), (false, -1));
    assert!(config.has_errors());

    let config = ConfigStore::open(file.path());
    assert_eq!(config.get_int("big"), (false, -1));
    assert_eq!(config.get_long("big"), (true, 99_999_999_999));
    assert!(config.has_errors());

    let config = ConfigStore::open(file.path());
    assert_eq!(config.get_float("missing"), (false, 0.0));
    assert!(config.has_errors());
    assert!(config.issues().is_empty());
}

#[test]
fn test_optional_failures_do_not_flag() {
    let file = create_test_config_file("s = abc\n");
    let config = ConfigStore::open(file.path());

    assert_eq!(config.get_int_optional("s"), (false, -1));
    assert_eq!(config.get_uint_optional("s"), (false, 0));
    assert_eq!(config.get_long_or("s", 7), (false, 7));
    assert_eq!(config.get_double_or("missing", 1.25), (false, 1.25));
    assert!(!config.has_errors());
}
