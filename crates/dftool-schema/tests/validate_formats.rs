//! Integration test: validate the sample data format documents in `formats/`
//! against the bundled meta-schema, and check the failure classes on
//! malformed and non-conforming input.

use std::path::PathBuf;

use dftool_schema::{
    DataFormatBody, DataFormatDocument, DataFormatValidator, INVALID_JSON_PREFIX,
};
use proptest::prelude::*;
use serde_json::Value;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn read_format(name: &str) -> String {
    let path = repo_root().join("formats").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Every sample document (payload files excluded) must pass.
#[test]
fn test_all_sample_formats_validate() {
    let mut validator = DataFormatValidator::new().expect("bundled schemas load");
    let mut entries: Vec<PathBuf> = std::fs::read_dir(repo_root().join("formats"))
        .expect("formats/ exists")
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.extension().is_some_and(|e| e == "json")
                && !p.to_string_lossy().contains("payload")
        })
        .collect();
    entries.sort();
    assert!(entries.len() >= 4, "expected sample formats, found {entries:?}");

    let mut failed = Vec::new();
    for path in &entries {
        let text = std::fs::read_to_string(path).unwrap();
        if !validator.validate(&text) {
            failed.push(format!(
                "{}: {:?}",
                path.display(),
                validator.messages().as_slice()
            ));
        }
    }
    assert!(failed.is_empty(), "sample formats failed:\n{}", failed.join("\n"));
}

#[test]
fn test_each_variant_decodes() {
    let cases = [
        ("cuda-simple-json.json", "jsonschema"),
        ("cef-reference.json", "reference"),
        ("delimited-example.json", "delimitedschema"),
        ("unstructured-example.json", "unstructured"),
    ];
    for (file, kind) in cases {
        let value: Value = serde_json::from_str(&read_format(file)).unwrap();
        let doc = DataFormatDocument::from_value(&value).unwrap();
        assert_eq!(doc.body.kind(), kind, "{file}");
        assert_eq!(doc.dataformatversion.as_deref(), Some("1.0.0"));
    }
}

#[test]
fn test_two_variants_rejected() {
    let mut doc: Value = serde_json::from_str(&read_format("cuda-simple-json.json")).unwrap();
    doc["unstructured"] = serde_json::json!({ "encoding": "UTF-8" });
    let mut validator = DataFormatValidator::new().unwrap();
    assert!(!validator.validate(&doc.to_string()));
}

#[test]
fn test_extra_top_level_key_rejected() {
    let mut doc: Value = serde_json::from_str(&read_format("cef-reference.json")).unwrap();
    doc["extra"] = serde_json::json!(true);
    let mut validator = DataFormatValidator::new().unwrap();
    assert!(!validator.validate(&doc.to_string()));
    assert!(!validator.messages().is_empty());
}

#[test]
fn test_bad_self_version_rejected() {
    let mut doc: Value = serde_json::from_str(&read_format("unstructured-example.json")).unwrap();
    doc["self"]["version"] = serde_json::json!("1.0");
    let mut validator = DataFormatValidator::new().unwrap();
    assert!(!validator.validate(&doc.to_string()));
}

#[test]
fn test_unknown_field_type_rejected() {
    let mut doc: Value = serde_json::from_str(&read_format("delimited-example.json")).unwrap();
    doc["delimitedschema"]["fields"][0]["fieldtype"] = serde_json::json!("varchar");
    let mut validator = DataFormatValidator::new().unwrap();
    assert!(!validator.validate(&doc.to_string()));
}

#[test]
fn test_removing_jsonschema_classifies_like_never_having_it() {
    let original: Value = serde_json::from_str(&read_format("cuda-simple-json.json")).unwrap();
    let mut validator = DataFormatValidator::new().unwrap();
    assert!(validator.validate(&original.to_string()));

    let mut mutated = original.clone();
    mutated.as_object_mut().unwrap().remove("jsonschema");
    let after_mutation = validator.check(&mutated.to_string());

    let mut fresh = DataFormatValidator::new().unwrap();
    let never_had_it = fresh.check(&mutated.to_string());

    assert!(!after_mutation.valid);
    assert_eq!(after_mutation, never_had_it);
}

#[test]
fn test_jsonschema_body_is_kept_verbatim() {
    let value: Value = serde_json::from_str(&read_format("cuda-simple-json.json")).unwrap();
    let doc = DataFormatDocument::from_value(&value).unwrap();
    let DataFormatBody::JsonSchema(schema) = doc.body else {
        panic!("expected jsonschema body");
    };
    assert_eq!(schema, value["jsonschema"]);
}

proptest! {
    #[test]
    fn malformed_json_always_fails_with_prefix(prefix in "[a-z ]{0,8}", body in "[a-z0-9:,]{0,16}") {
        // An unbalanced opening brace can never parse.
        let text = format!("{prefix}{{{body}");
        let mut validator = DataFormatValidator::new().unwrap();
        prop_assert!(!validator.validate(&text));
        prop_assert_eq!(validator.messages().len(), 1);
        prop_assert!(validator.messages().as_slice()[0].starts_with(INVALID_JSON_PREFIX));
    }
}
