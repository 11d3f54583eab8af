#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{event, root, some_struct, FileHandle, Timestamp};
use expect_core::deep_equal::{compare, DiffEntry, Options};
use expect_core::errors::ExErrorKind;
use std::collections::{BTreeMap, HashMap};

#[test]
fn test_nil_slices_are_not_empty() {
    let options = Options::new().nil_slices_are_empty(false);

    let diff = compare(&Vec::<i32>::new(), &None::<Vec<i32>>, &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "[]", "<nil slice>")]);

    let diff = compare(&None::<Vec<i32>>, &vec![1], &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "<nil slice>", "[1]")]);

    // Both nil is still equal.
    assert!(compare(&None::<Vec<i32>>, &None::<Vec<i32>>, &options)
        .unwrap()
        .is_empty());
}

#[test]
fn test_nil_maps_are_not_empty() {
    let options = Options::new().nil_maps_are_empty(false);

    let diff = compare(
        &HashMap::<String, i32>::new(),
        &None::<HashMap<String, i32>>,
        &options,
    )
    .unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "map[]", "<nil map>")]);
}

#[test]
fn test_exclude_unexported_fields() {
    let want = some_struct("a", 1);
    let got = some_struct("b", 2);

    let diff = compare(&want, &got, &Options::default()).unwrap();
    assert_eq!(diff.len(), 2);

    let options = Options::new().exclude_unexported_fields(true);
    let diff = compare(&want, &got, &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new(".a", "a", "b")]);
}

#[test]
fn test_exclude_types_skips_fields_of_exact_type() {
    let options = Options::new().exclude_type::<Timestamp>();
    assert!(compare(&event("deploy", 1), &event("deploy", 2), &options)
        .unwrap()
        .is_empty());

    // Other fields are still compared.
    let diff = compare(&event("deploy", 1), &event("rollback", 2), &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new(".name", "deploy", "rollback")]);

    // The unexported i32 field of SomeStruct.
    let options = Options::new().exclude_type::<i32>();
    let diff = compare(&some_struct("a", 1), &some_struct("a", 2), &options).unwrap();
    assert!(diff.is_empty());

    // Only struct fields are skipped, not top-level values.
    let diff = compare(&1i32, &2i32, &options).unwrap();
    assert_eq!(diff.len(), 1);
}

#[test]
fn test_exclude_field_paths() {
    let options = Options::new()
        .exclude_field_path(".slice_field[*].nested_field")
        .exclude_field_path(".map_field[spam]");

    let first = root("b", "eggs");
    let second = root("c", "spam and eggs");

    assert!(compare(&first, &second, &options).unwrap().is_empty());

    let diff = compare(&first, &second, &Options::default()).unwrap();
    let paths: Vec<_> = diff.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec![".slice_field[0].nested_field", ".map_field[spam]"]);
}

#[test]
fn test_excluded_index_and_key_literals() {
    let options = Options::new().exclude_field_path("[1]");
    assert!(compare(&vec![1, 2, 3], &vec![1, 9, 3], &options)
        .unwrap()
        .is_empty());

    // An excluded index may also be missing entirely.
    assert!(compare(&vec![1, 2], &vec![1], &options).unwrap().is_empty());

    let want: BTreeMap<&str, i32> = [("1", 1), ("2", 2)].into_iter().collect();
    let got: BTreeMap<&str, i32> = [("1", 5), ("2", 2)].into_iter().collect();
    let options = Options::new().exclude_field_path("[1]");
    assert!(compare(&want, &got, &options).unwrap().is_empty());

    // The wildcard matches indices only.
    let options = Options::new().exclude_field_path("[*]");
    assert_eq!(compare(&want, &got, &options).unwrap().len(), 1);
}

#[test]
fn test_float_precision() {
    let options = Options::new().float_precision(2);
    assert!(compare(&1.001, &1.004, &options).unwrap().is_empty());

    let diff = compare(&1.001, &1.009, &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "1.00", "1.01")]);

    let options = Options::new().float_precision(0);
    let diff = compare(&1.4, &2.0, &options).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "1", "2")]);
}

#[test]
fn test_malformed_field_path_fails_before_traversal() {
    for pattern in ["", "name", ".items[", ".items[]", "..name"] {
        let options = Options::new().exclude_field_path(pattern);
        let err = compare(&1, &1, &options).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidFieldPath, "pattern {:?}", pattern);
        assert_eq!(err.code(), "ERR_INVALID_FIELD_PATH");
    }
}

#[test]
fn test_opaque_values_fail_loudly() {
    let err = compare(&FileHandle(1), &FileHandle(1), &Options::default()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnsupportedKind);
    assert_eq!(err.path(), Some(""));
    assert_eq!(err.type_name(), Some("FileHandle"));

    let err = compare(&vec![FileHandle(1)], &vec![FileHandle(2)], &Options::default())
        .unwrap_err();
    assert_eq!(err.code(), "ERR_UNSUPPORTED_KIND");
    assert_eq!(err.path(), Some("[0]"));

    // Absent on one side is reported before the kind is looked at.
    let diff = compare(&Some(FileHandle(1)), &None::<FileHandle>, &Options::default()).unwrap();
    assert_eq!(diff.entries(), [DiffEntry::new("", "<FileHandle>", "<nil>")]);
}

#[test]
fn test_options_from_toml() {
    let options = Options::from_toml_str(
        r#"
        float_precision = 2
        nil_slices_are_empty = false
        excluded_field_paths = [".slice_field[*].nested_field", ".map_field[spam]"]
        "#,
    )
    .unwrap();

    assert_eq!(options.float_precision, 2);
    assert!(!options.nil_slices_are_empty);
    assert!(options.nil_maps_are_empty);
    assert!(compare(&root("b", "x"), &root("c", "y"), &options)
        .unwrap()
        .is_empty());
}

#[test]
fn test_options_from_invalid_toml() {
    let err = Options::from_toml_str("float_precision = \"ten\"").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(err.op(), Some("parse_options"));
}
