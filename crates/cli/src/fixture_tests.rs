// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

fn fixture_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, content) in files {
        let path = dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    dir
}

#[rstest]
#[case("/foo/bar", "foo_bar.json")]
#[case("foo/bar", "foo_bar.json")]
#[case("///foo/bar", "foo_bar.json")]
#[case("/account", "account.json")]
#[case("/linode/instances/123/disks", "linode_instances_123_disks.json")]
#[case("/regions/", "regions_.json")]
#[case("/", ".json")]
#[case("/linode/instances?page=2", "linode_instances?page=2.json")]
fn test_fixture_name(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(fixture_name(url), expected);
}

#[test]
fn test_path_for_uses_method_directory() {
    let loader = FixtureLoader::new("/fixtures");

    assert_eq!(
        loader.path_for(Method::Get, "/foo/bar"),
        PathBuf::from("/fixtures/GET/foo_bar.json")
    );
    assert_eq!(
        loader.path_for(Method::Post, "linode/instances"),
        PathBuf::from("/fixtures/POST/linode_instances.json")
    );
}

#[test]
fn test_resolve_reads_get_fixture() {
    let dir = fixture_tree(&[("GET/foo_bar.json", r#"{"id": 1, "label": "foo"}"#)]);
    let loader = FixtureLoader::new(dir.path());

    let body = loader.resolve("/foo/bar").unwrap();

    assert_eq!(body, json!({"id": 1, "label": "foo"}));
}

#[test]
fn test_resolve_accepts_arrays() {
    let dir = fixture_tree(&[("GET/regions.json", r#"[{"id": "us-east"}]"#)]);
    let loader = FixtureLoader::new(dir.path());

    assert_eq!(loader.resolve("regions").unwrap(), json!([{"id": "us-east"}]));
}

#[test]
fn test_resolve_ignores_leading_separators() {
    let dir = fixture_tree(&[("GET/account.json", r#"{"email": "a@example.org"}"#)]);
    let loader = FixtureLoader::new(dir.path());

    let plain = loader.resolve("account").unwrap();
    let slashed = loader.resolve("///account").unwrap();

    assert_eq!(plain, slashed);
}

#[test]
fn test_resolve_is_repeatable() {
    let dir = fixture_tree(&[("GET/linode_types.json", r#"{"data": [1, 2, 3]}"#)]);
    let loader = FixtureLoader::new(dir.path());

    let first = loader.resolve("/linode/types").unwrap();
    let second = loader.resolve("/linode/types").unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_resolve_for_other_method() {
    let dir = fixture_tree(&[("POST/linode_instances.json", r#"{"id": 7}"#)]);
    let loader = FixtureLoader::new(dir.path());

    assert_eq!(
        loader.resolve_for(Method::Post, "/linode/instances").unwrap(),
        json!({"id": 7})
    );
    assert!(matches!(
        loader.resolve("/linode/instances"),
        Err(FixtureError::NotFound { .. })
    ));
}

#[test]
fn test_missing_fixture_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FixtureLoader::new(dir.path());

    let err = loader.resolve("/does/not/exist").unwrap_err();

    let expected = dir.path().join("GET").join("does_not_exist.json");
    assert!(matches!(err, FixtureError::NotFound { .. }));
    assert_eq!(err.path(), expected.as_path());
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let dir = fixture_tree(&[("GET/broken.json", r#"{"id": "#)]);
    let loader = FixtureLoader::new(dir.path());

    let err = loader.resolve("/broken").unwrap_err();

    match err {
        FixtureError::Parse { path, .. } => assert!(path.ends_with("GET/broken.json")),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_directory_in_place_of_fixture_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("GET").join("nested.json")).unwrap();
    let loader = FixtureLoader::new(dir.path());

    let err = loader.resolve("/nested").unwrap_err();

    assert!(matches!(err, FixtureError::Read { .. }));
}

#[test]
fn test_default_root() {
    assert_eq!(FixtureLoader::default().root(), Path::new(DEFAULT_FIXTURE_ROOT));
}

proptest! {
    #[test]
    fn prop_leading_separators_do_not_matter(
        url in "[a-z0-9_]{1,8}(/[a-z0-9_]{1,8}){0,4}",
        slashes in 0usize..5,
    ) {
        let prefixed = format!("{}{}", "/".repeat(slashes), url);
        prop_assert_eq!(fixture_name(&prefixed), fixture_name(&url));
    }

    #[test]
    fn prop_fixture_name_has_no_separators(url in "/{0,3}[a-z/]{0,20}") {
        let name = fixture_name(&url);
        prop_assert!(!name.contains('/'));
        prop_assert!(name.ends_with(".json"));
    }
}
