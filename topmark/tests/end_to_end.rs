//! End-to-end scenarios driven through [`topmark::run_batch`], exercising the
//! full eleven-step pipeline (resolve through write) against real files on
//! disk rather than a single step in isolation.

use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;
use topmark::registry::ProcessorRegistry;
use topmark_domain::{builtins, FileTypeRegistry, MutableConfig, Operation, Outcome};

fn registries() -> (FileTypeRegistry, ProcessorRegistry) {
    let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
    let processors = ProcessorRegistry::from_file_types(&file_types);
    (file_types, processors)
}

#[test]
fn python_insertion_at_top_matches_expected_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.py");
    fs::write(&path, "print('hi')\n").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string(), "project".to_string(), "license".to_string()];
    mutable.field_values = HashMap::from([
        ("file".to_string(), "x.py".to_string()),
        ("project".to_string(), "TopMark".to_string()),
        ("license".to_string(), "MIT".to_string()),
    ]);
    let config = mutable.freeze().unwrap();

    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Changed), 1);
    let expected = "# topmark:header:start\n\
                    #\n\
                    #   file    : x.py\n\
                    #   project : TopMark\n\
                    #   license : MIT\n\
                    #\n\
                    # topmark:header:end\n\
                    \n\
                    print('hi')\n";
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn python_with_shebang_places_header_after_encoding_pragma() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.py");
    fs::write(&path, "#!/usr/bin/env python3\n# coding: utf-8\nprint(1)\n").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "x.py".to_string())]);
    let config = mutable.freeze().unwrap();

    topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    let lines: Vec<&str> = fs::read_to_string(&path).unwrap().lines().collect();
    assert_eq!(lines[0], "#!/usr/bin/env python3");
    assert_eq!(lines[1], "# coding: utf-8");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "# topmark:header:start");
}

#[test]
fn xml_prolog_only_refuses_insertion_when_reflow_disallowed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.xml");
    fs::write(&path, "<?xml version=\"1.0\"?><root/>").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "x.xml".to_string())]);
    let config = mutable.freeze().unwrap();

    let original = fs::read_to_string(&path).unwrap();
    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Skipped), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn xml_prolog_only_inserts_when_reflow_allowed_and_strip_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.xml");
    let original = "<?xml version=\"1.0\"?><root/>";
    fs::write(&path, original).unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "x.xml".to_string())]);
    mutable.policy.allow_reflow = Some(true);
    let config = mutable.freeze().unwrap();

    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);
    assert_eq!(result.count_by_outcome(Outcome::Changed), 1);
    assert!(fs::read_to_string(&path).unwrap().contains("topmark:header:start"));

    let mut strip_mutable = MutableConfig::builder();
    strip_mutable.apply_changes = Some(true);
    strip_mutable.operation = Operation::Strip;
    let strip_config = strip_mutable.freeze().unwrap();
    topmark::run_batch(&[path.clone()], &strip_config, &file_types, &processors);

    let stripped = fs::read_to_string(&path).unwrap();
    assert!(!stripped.contains("topmark:header:start"));
    assert_eq!(stripped.replace(char::is_whitespace, ""), original.replace(char::is_whitespace, ""));
}

#[test]
fn xml_prolog_with_no_root_element_is_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.xml");
    fs::write(&path, "<?xml version=\"1.0\"?>\n<!DOCTYPE root>\n").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "x.xml".to_string())]);
    mutable.policy.allow_reflow = Some(true);
    let config = mutable.freeze().unwrap();

    let original = fs::read_to_string(&path).unwrap();
    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Skipped), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn markdown_double_insert_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("README.md");
    fs::write(&path, "# Title\n\nBody\n").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "README.md".to_string())]);
    let config = mutable.freeze().unwrap();

    topmark::run_batch(&[path.clone()], &config, &file_types, &processors);
    let once = fs::read_to_string(&path).unwrap();
    assert!(once.contains("<!--"));

    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);
    let twice = fs::read_to_string(&path).unwrap();

    assert_eq!(once, twice);
    assert_eq!(result.count_by_outcome(Outcome::AlreadyCompliant), 1);
}

#[test]
fn strip_preserves_leading_shebang() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.py");
    fs::write(
        &path,
        "#!/usr/bin/env python3\n\
         # topmark:header:start\n\
         #\n\
         #   file : x.py\n\
         #\n\
         # topmark:header:end\n\
         \n\
         print(1)\n",
    )
    .unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.operation = Operation::Strip;
    let config = mutable.freeze().unwrap();

    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Changed), 1);
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "#!/usr/bin/env python3");
    assert!(!contents.contains("topmark:header:start"));
    assert!(contents.trim_end().ends_with("print(1)"));
}

#[test]
fn crlf_header_replacement_keeps_crlf_endings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.py");
    let body = "# topmark:header:start\r\n#\r\n#   file : old.py\r\n#\r\n# topmark:header:end\r\n\r\nprint(1)\r\n";
    fs::write(&path, body).unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "x.py".to_string())]);
    let config = mutable.freeze().unwrap();

    let result = topmark::run_batch(&[path.clone()], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Changed), 1);
    let updated = fs::read_to_string(&path).unwrap();
    assert!(updated.contains("file : x.py\r\n"));
    assert!(!updated.replace("\r\n", "").contains(['\r', '\n']), "a bare CR or LF survived outside CRLF pairs");
    assert!(updated.ends_with("\r\n"));
}

#[test]
fn batch_run_isolates_per_file_failures() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.py");
    let missing = dir.path().join("missing.py");
    fs::write(&good, "print(1)\n").unwrap();

    let (file_types, processors) = registries();
    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(true);
    mutable.header_fields = vec!["file".to_string()];
    mutable.field_values = HashMap::from([("file".to_string(), "good.py".to_string())]);
    let config = mutable.freeze().unwrap();

    let result = topmark::run_batch(&[good.clone(), missing], &config, &file_types, &processors);

    assert_eq!(result.count_by_outcome(Outcome::Changed), 1);
    assert_eq!(result.count_by_outcome(Outcome::Failed), 1);
    assert!(fs::read_to_string(&good).unwrap().starts_with('#'));
}
