//! # JSON Schema Engine
//!
//! The narrow seam between the validators and a JSON Schema implementation:
//! compile a schema once, then run instances through it and get back a
//! pass/fail flag plus every constraint violation.
//!
//! ## Draft-04 Engine
//!
//! [`Draft4Engine`] is backed by the `jsonschema` crate and configured so
//! that schemas are read with draft-04 semantics only:
//!
//! - The draft is pinned to draft-04 whatever `$schema` a document declares.
//! - `propertyNames`, `contains` and `const` (introduced by later drafts)
//!   are removed from every schema position before compiling.
//! - All violations are collected, not only the first. A failed `oneOf` or
//!   `anyOf` is reported through the violations of its branches, so a
//!   document that matches no variant says what is wrong with it.
//! - Unknown `format` names never fail a document.
//! - External `$ref`s resolve only to the bundled draft-04 meta-schema.
//!   Anything else fails compilation; nothing is fetched over the network.

use std::collections::HashMap;
use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Retrieve, Uri, ValidationError, ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaError;
use crate::metaschema::{MetaSchemaRepository, DRAFT_04_URI};

/// Keywords from later drafts that are not honored under draft-04.
pub const LATER_DRAFT_KEYWORDS: &[&str] = &["propertyNames", "contains", "const"];

/// Message used for each property rejected by `additionalProperties`.
pub const ADDITIONAL_PROPERTIES_MESSAGE: &str = "should NOT have additional properties";

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the keyword in the schema.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The offending property name, for `additionalProperties` violations.
    pub additional_property: Option<String>,
}

impl Violation {
    /// The message shown to users: the description, followed by
    /// `" - <property>"` when the violation names an additional property.
    pub fn display_message(&self) -> String {
        match &self.additional_property {
            Some(name) => format!("{} - {}", self.message, name),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.display_message())
        } else {
            write!(f, "{}: {}", self.instance_path, self.display_message())
        }
    }
}

/// Result of running one instance through a compiled schema.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub valid: bool,
    /// Every violation, in the order the engine reported them.
    pub violations: Vec<Violation>,
}

/// A schema ready to validate instances.
pub trait CompiledSchema {
    /// Validate `instance`, collecting all violations.
    fn run(&self, instance: &Value) -> Result<Outcome, SchemaError>;
}

/// A JSON Schema implementation.
pub trait SchemaEngine {
    /// The compiled form of a schema.
    type Compiled: CompiledSchema;

    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EngineBuild`] if the schema is not a valid
    /// schema for this engine or references something it cannot resolve.
    fn compile(&self, schema: &Value) -> Result<Self::Compiled, SchemaError>;
}

/// Resolves external references to the bundled draft-04 meta-schema only.
struct BundledDraftRetriever {
    draft04: Value,
}

impl Retrieve for BundledDraftRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let requested = uri.as_str().trim_end_matches('#');
        if requested == DRAFT_04_URI.trim_end_matches('#') {
            return Ok(self.draft04.clone());
        }
        Err(format!("unresolvable reference '{requested}'").into())
    }
}

/// Draft-04 engine backed by the `jsonschema` crate.
#[derive(Debug, Clone)]
pub struct Draft4Engine {
    draft04: Value,
}

impl Draft4Engine {
    /// Create an engine using the repository's bundled draft-04 meta-schema.
    pub fn new(repository: &MetaSchemaRepository) -> Self {
        Self {
            draft04: repository.draft04_metaschema().clone(),
        }
    }

    fn options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft4);
        opts.should_validate_formats(true);
        opts.should_ignore_unknown_formats(true);
        opts.with_retriever(BundledDraftRetriever {
            draft04: self.draft04.clone(),
        });
        opts
    }
}

impl SchemaEngine for Draft4Engine {
    type Compiled = Draft4Schema;

    fn compile(&self, schema: &Value) -> Result<Draft4Schema, SchemaError> {
        self.compile_stripped(&strip_later_draft_keywords(schema))
    }
}

impl Draft4Engine {
    fn compile_stripped(&self, schema: &Value) -> Result<Draft4Schema, SchemaError> {
        let validator = self
            .options()
            .build(schema)
            .map_err(|e| SchemaError::EngineBuild {
                reason: e.to_string(),
            })?;

        let mut combinators = Vec::new();
        collect_combinators(schema, "", &mut combinators);

        let mut branches = HashMap::new();
        for (path, alternatives) in combinators {
            let compiled: Result<Vec<_>, _> = alternatives
                .iter()
                .map(|branch| self.compile_stripped(&with_root_definitions(branch, schema)))
                .collect();
            match compiled {
                Ok(compiled) => {
                    branches.insert(path, compiled);
                }
                // The combinator is still enforced; only its detail is lost.
                Err(e) => tracing::debug!(%path, error = %e, "branch not compiled on its own"),
            }
        }
        Ok(Draft4Schema {
            validator,
            branches,
        })
    }
}

/// A schema compiled by [`Draft4Engine`].
pub struct Draft4Schema {
    validator: Validator,
    /// Separately compiled alternatives of each `oneOf`/`anyOf`, keyed by
    /// the schema path of the keyword.
    branches: HashMap<String, Vec<Draft4Schema>>,
}

impl fmt::Debug for Draft4Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft4Schema")
            .field("combinators", &self.branches.len())
            .finish_non_exhaustive()
    }
}

impl CompiledSchema for Draft4Schema {
    fn run(&self, instance: &Value) -> Result<Outcome, SchemaError> {
        let mut valid = true;
        let mut violations = Vec::new();
        for error in self.validator.iter_errors(instance) {
            valid = false;
            self.expand(error, instance, &mut violations)?;
        }
        Ok(Outcome { valid, violations })
    }
}

impl Draft4Schema {
    /// Append the violations for `error`. A failed combinator is replaced
    /// by the violations of each of its branches.
    fn expand(
        &self,
        error: ValidationError<'_>,
        instance: &Value,
        out: &mut Vec<Violation>,
    ) -> Result<(), SchemaError> {
        let combinator = matches!(
            error.kind,
            ValidationErrorKind::OneOfNotValid { .. } | ValidationErrorKind::AnyOf { .. }
        );
        let schema_path = error.schema_path.to_string();
        if let Some(branches) = self.branches.get(&schema_path).filter(|_| combinator) {
            let instance_path = error.instance_path.to_string();
            let target = instance
                .pointer(&instance_path)
                .ok_or_else(|| SchemaError::EngineRun {
                    reason: format!("no instance value at '{instance_path}'"),
                })?;
            let before = out.len();
            for (index, branch) in branches.iter().enumerate() {
                let outcome = branch.run(target)?;
                out.extend(outcome.violations.into_iter().map(|v| Violation {
                    instance_path: format!("{instance_path}{}", v.instance_path),
                    schema_path: format!("{schema_path}/{index}{}", v.schema_path),
                    ..v
                }));
            }
            if out.len() > before {
                return Ok(());
            }
        }
        out.extend(violations_from(error));
        Ok(())
    }
}

/// Find every `oneOf`/`anyOf` reachable without following `$ref`, with the
/// schema path the engine reports for it.
fn collect_combinators<'a>(
    schema: &'a Value,
    path: &str,
    out: &mut Vec<(String, &'a [Value])>,
) {
    let Value::Object(map) = schema else {
        return;
    };
    for (keyword, value) in map {
        let here = format!("{path}/{}", escape_pointer(keyword));
        match (keyword.as_str(), value) {
            ("oneOf" | "anyOf", Value::Array(alternatives)) => {
                out.push((here, alternatives.as_slice()));
            }
            ("allOf", Value::Array(children)) => {
                for (index, child) in children.iter().enumerate() {
                    collect_combinators(child, &format!("{here}/{index}"), out);
                }
            }
            ("properties" | "patternProperties", Value::Object(children)) => {
                for (name, child) in children {
                    collect_combinators(child, &format!("{here}/{}", escape_pointer(name)), out);
                }
            }
            ("items", Value::Array(children)) => {
                for (index, child) in children.iter().enumerate() {
                    collect_combinators(child, &format!("{here}/{index}"), out);
                }
            }
            ("items" | "additionalItems" | "additionalProperties" | "not", child) => {
                collect_combinators(child, &here, out);
            }
            _ => {}
        }
    }
}

/// A branch compiled on its own still needs the root `definitions` for
/// its local `$ref`s.
fn with_root_definitions(branch: &Value, root: &Value) -> Value {
    let mut branch = branch.clone();
    if let (Value::Object(map), Some(definitions)) = (&mut branch, root.get("definitions")) {
        map.entry("definitions")
            .or_insert_with(|| definitions.clone());
    }
    branch
}

fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// `additionalProperties` failures name every rejected property at once;
/// they are split into one violation per property.
fn violations_from(error: ValidationError<'_>) -> Vec<Violation> {
    let instance_path = error.instance_path.to_string();
    let schema_path = error.schema_path.to_string();
    match &error.kind {
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|name| Violation {
                instance_path: instance_path.clone(),
                schema_path: schema_path.clone(),
                message: ADDITIONAL_PROPERTIES_MESSAGE.to_string(),
                additional_property: Some(name.clone()),
            })
            .collect(),
        _ => vec![Violation {
            instance_path,
            schema_path,
            message: error.to_string(),
            additional_property: None,
        }],
    }
}

/// Return a copy of `schema` with [`LATER_DRAFT_KEYWORDS`] removed from
/// every subschema. Property names that happen to match a keyword are kept.
pub fn strip_later_draft_keywords(schema: &Value) -> Value {
    let mut schema = schema.clone();
    strip_in_place(&mut schema);
    schema
}

fn strip_in_place(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };
    for keyword in LATER_DRAFT_KEYWORDS {
        map.remove(*keyword);
    }
    for (keyword, value) in map.iter_mut() {
        match keyword.as_str() {
            // Maps of name -> subschema. Array-valued dependencies are
            // property lists and are skipped by strip_in_place itself.
            "properties" | "patternProperties" | "definitions" | "dependencies" => {
                if let Value::Object(children) = value {
                    children.values_mut().for_each(strip_in_place);
                }
            }
            "allOf" | "anyOf" | "oneOf" => {
                if let Value::Array(children) = value {
                    children.iter_mut().for_each(strip_in_place);
                }
            }
            "items" => match value {
                Value::Array(children) => children.iter_mut().for_each(strip_in_place),
                other => strip_in_place(other),
            },
            "additionalItems" | "additionalProperties" | "not" => strip_in_place(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> Draft4Engine {
        Draft4Engine::new(&MetaSchemaRepository::new().unwrap())
    }

    #[test]
    fn strips_keywords_at_every_depth() {
        let schema = json!({
            "const": 1,
            "properties": {
                "a": { "contains": { "type": "string" }, "type": "array" },
                "b": { "items": [ { "propertyNames": { "maxLength": 2 } } ] }
            },
            "anyOf": [ { "const": "x" } ],
            "not": { "const": 3 },
            "additionalProperties": { "propertyNames": {} }
        });
        let stripped = strip_later_draft_keywords(&schema);
        assert!(stripped.get("const").is_none());
        assert!(stripped["properties"]["a"].get("contains").is_none());
        assert_eq!(stripped["properties"]["a"]["type"], "array");
        assert!(stripped["properties"]["b"]["items"][0].get("propertyNames").is_none());
        assert!(stripped["anyOf"][0].get("const").is_none());
        assert!(stripped["not"].get("const").is_none());
        assert!(stripped["additionalProperties"].get("propertyNames").is_none());
    }

    #[test]
    fn keeps_properties_named_like_keywords() {
        let schema = json!({
            "properties": {
                "const": { "type": "string" },
                "contains": { "type": "integer" }
            },
            "required": ["const"]
        });
        let stripped = strip_later_draft_keywords(&schema);
        assert_eq!(stripped["properties"]["const"]["type"], "string");
        assert_eq!(stripped["properties"]["contains"]["type"], "integer");
    }

    #[test]
    fn dependency_property_lists_survive() {
        let schema = json!({ "dependencies": { "a": ["b"], "c": { "const": 1 } } });
        let stripped = strip_later_draft_keywords(&schema);
        assert_eq!(stripped["dependencies"]["a"], json!(["b"]));
        assert!(stripped["dependencies"]["c"].get("const").is_none());
    }

    #[test]
    fn const_is_not_enforced() {
        let compiled = engine()
            .compile(&json!({ "type": "string", "const": "only" }))
            .unwrap();
        assert!(compiled.run(&json!("anything")).unwrap().valid);
        assert!(!compiled.run(&json!(5)).unwrap().valid);
    }

    #[test]
    fn unknown_formats_are_ignored() {
        let compiled = engine()
            .compile(&json!({ "type": "string", "format": "no-such-format" }))
            .unwrap();
        assert!(compiled.run(&json!("whatever")).unwrap().valid);
    }

    #[test]
    fn collects_all_violations() {
        let compiled = engine()
            .compile(&json!({
                "type": "object",
                "properties": { "a": { "type": "string" }, "b": { "type": "integer" } },
                "required": ["c"]
            }))
            .unwrap();
        let outcome = compiled.run(&json!({ "a": 1, "b": "x" })).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.violations.len(), 3);
    }

    #[test]
    fn additional_properties_split_per_property() {
        let compiled = engine()
            .compile(&json!({
                "type": "object",
                "properties": { "a": {} },
                "additionalProperties": false
            }))
            .unwrap();
        let outcome = compiled.run(&json!({ "a": 1, "x": 1, "y": 2 })).unwrap();
        let mut names: Vec<_> = outcome
            .violations
            .iter()
            .filter_map(|v| v.additional_property.clone())
            .collect();
        names.sort();
        assert_eq!(names, vec!["x", "y"]);
        assert!(outcome
            .violations
            .iter()
            .all(|v| v.message == ADDITIONAL_PROPERTIES_MESSAGE));
    }

    #[test]
    fn unresolvable_remote_ref_fails_compile() {
        let err = engine()
            .compile(&json!({ "$ref": "http://example.invalid/other.json" }))
            .unwrap_err();
        assert!(err.is_engine_error(), "got: {err}");
    }

    #[test]
    fn invalid_schema_fails_compile() {
        let err = engine().compile(&json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, SchemaError::EngineBuild { .. }));
    }

    fn metaschema_engine() -> (Draft4Engine, Value) {
        let repo = MetaSchemaRepository::new().unwrap();
        (Draft4Engine::new(&repo), repo.current_metaschema().clone())
    }

    fn cuda_document() -> Value {
        json!({
            "self": { "name": "CUDA", "version": "1.0.0", "description": "d" },
            "dataformatversion": "1.0.0",
            "jsonschema": { "$schema": "http://json-schema.org/draft-04/schema#", "type": "object" }
        })
    }

    #[test]
    fn one_of_failure_reports_branch_violations() {
        let (engine, metaschema) = metaschema_engine();
        let mut doc = cuda_document();
        doc.as_object_mut().unwrap().remove("dataformatversion");
        let outcome = engine.compile(&metaschema).unwrap().run(&doc).unwrap();
        assert!(!outcome.valid);
        assert!(outcome
            .violations
            .iter()
            .all(|v| !v.message.contains("'oneOf'")));
        assert!(outcome.violations.iter().any(|v| v.instance_path.is_empty()
            && v.message.contains("dataformatversion")
            && v.message.contains("required")));
        assert!(outcome
            .violations
            .iter()
            .all(|v| v.schema_path.starts_with("/oneOf/")));
    }

    #[test]
    fn branch_violations_keep_instance_paths() {
        let (engine, metaschema) = metaschema_engine();
        let mut doc = cuda_document();
        doc["self"]["bogus"] = json!(1);
        let outcome = engine.compile(&metaschema).unwrap().run(&doc).unwrap();
        let bogus: Vec<_> = outcome
            .violations
            .iter()
            .filter(|v| v.additional_property.as_deref() == Some("bogus"))
            .collect();
        assert_eq!(bogus.len(), 4, "one per variant: {:?}", outcome.violations);
        assert!(bogus.iter().all(|v| v.instance_path == "/self"));
        assert_eq!(
            bogus[0].to_string(),
            "/self: should NOT have additional properties - bogus"
        );
    }

    #[test]
    fn nested_one_of_is_expanded() {
        let compiled = engine()
            .compile(&json!({
                "properties": {
                    "a": { "oneOf": [ { "type": "string" }, { "type": "integer" } ] }
                }
            }))
            .unwrap();
        let outcome = compiled.run(&json!({ "a": true })).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.violations.len(), 2);
        assert!(outcome.violations.iter().all(|v| v.instance_path == "/a"));
        assert_eq!(outcome.violations[0].schema_path, "/properties/a/oneOf/0/type");
    }

    #[test]
    fn matching_one_of_is_valid() {
        let (engine, metaschema) = metaschema_engine();
        let outcome = engine
            .compile(&metaschema)
            .unwrap()
            .run(&cuda_document())
            .unwrap();
        assert!(outcome.valid, "{:?}", outcome.violations);
    }

    #[test]
    fn combinators_found_at_literal_paths() {
        let schema = json!({
            "oneOf": [ {} ],
            "properties": { "a/b": { "anyOf": [ {}, {} ] } },
            "definitions": { "d": { "oneOf": [ {} ] } }
        });
        let mut found = Vec::new();
        collect_combinators(&schema, "", &mut found);
        let mut paths: Vec<_> = found
            .iter()
            .map(|(p, alts)| (p.as_str(), alts.len()))
            .collect();
        paths.sort();
        assert_eq!(paths, vec![("/oneOf", 1), ("/properties/a~1b/anyOf", 2)]);
    }

    #[test]
    fn display_message_appends_property() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/additionalProperties".to_string(),
            message: ADDITIONAL_PROPERTIES_MESSAGE.to_string(),
            additional_property: Some("extra".to_string()),
        };
        assert_eq!(
            v.display_message(),
            "should NOT have additional properties - extra"
        );
        assert_eq!(
            v.to_string(),
            "(root): should NOT have additional properties - extra"
        );
    }
}
