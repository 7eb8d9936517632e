//! Golden tests: expressions described in JSON with their expected behaviour.
//!
//! Each case in `tests/golden/cases.json` either fails to compile with a named
//! error, or compiles and is checked for functionality. Functional cases list
//! `[input, output]` pairs (`null` for no match); non-functional cases list
//! inputs on which evaluation must report a runtime ambiguity.
//!
//! Run: cargo test -p hoarec-fst --test golden

use std::path::PathBuf;

use hoarec_fst::{CompileError, Re, SymbolRange, check_functional, compile, evaluate_str};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    expr: Value,
    #[serde(default)]
    compile_error: Option<String>,
    #[serde(default)]
    functional: Option<bool>,
    #[serde(default)]
    evaluations: Vec<(String, Option<String>)>,
    #[serde(default)]
    ambiguous_inputs: Vec<String>,
}

fn load_cases() -> Vec<Case> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/cases.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key]
        .as_str()
        .unwrap_or_else(|| panic!("expected string field {key:?} in {value}"))
}

fn single_char(value: &Value) -> char {
    let text = value
        .as_str()
        .unwrap_or_else(|| panic!("expected a one-character string, got {value}"));
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => panic!("expected a one-character string, got {text:?}"),
    }
}

fn pair(value: &Value) -> (&Value, &Value) {
    match value.as_array().map(Vec::as_slice) {
        Some([a, b]) => (a, b),
        _ => panic!("expected a two-element array, got {value}"),
    }
}

/// Decode the JSON expression notation used by the fixtures.
fn parse_expr(value: &Value) -> Re {
    let Some(object) = value.as_object() else {
        panic!("expression must be an object, got {value}");
    };
    if object.contains_key("lit") {
        return Re::literal(str_field(value, "lit"), str_field(value, "out"));
    }
    if let Some(output) = object.get("eps") {
        return Re::epsilon(output.as_str().unwrap_or_default());
    }
    if let Some(bounds) = object.get("range") {
        let (from, to) = pair(bounds);
        return Re::Range {
            range: SymbolRange::new(single_char(from).into(), single_char(to).into()),
            output: str_field(value, "out").to_string(),
        };
    }
    if let Some(branches) = object.get("union") {
        let (lhs, rhs) = pair(branches);
        return Re::union(parse_expr(lhs), parse_expr(rhs));
    }
    if let Some(parts) = object.get("concat") {
        let (lhs, rhs) = pair(parts);
        return Re::concat(parse_expr(lhs), parse_expr(rhs));
    }
    if let Some(inner) = object.get("star") {
        return Re::kleene(parse_expr(inner));
    }
    if let Some(product) = object.get("output") {
        let (inner, output) = pair(product);
        return Re::output(parse_expr(inner), output.as_str().unwrap_or_default());
    }
    if let Some(name) = object.get("var") {
        return Re::var(name.as_str().unwrap_or_default());
    }
    panic!("unknown expression {value}");
}

fn error_kind(err: &CompileError) -> &'static str {
    match err {
        CompileError::AmbiguousEpsilonOutput { .. } => "AmbiguousEpsilonOutput",
        CompileError::AmbiguousKleeneEpsilon { .. } => "AmbiguousKleeneEpsilon",
        CompileError::UnsupportedVariable { .. } => "UnsupportedVariable",
        CompileError::InvalidRange { .. } => "InvalidRange",
    }
}

#[test]
fn golden_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty(), "golden file has no cases");

    for case in &cases {
        let re = parse_expr(&case.expr);
        let compiled = compile(&re);

        if let Some(expected) = &case.compile_error {
            let err = compiled.expect_err(&case.name);
            assert_eq!(error_kind(&err), expected, "case {:?}", case.name);
            continue;
        }
        let mealy = compiled.unwrap_or_else(|e| panic!("case {:?}: {e}", case.name));

        let functional = check_functional(&mealy).is_ok();
        if let Some(expected) = case.functional {
            assert_eq!(functional, expected, "functional: case {:?}", case.name);
        }

        for (input, expected) in &case.evaluations {
            let actual = evaluate_str(&mealy, input)
                .unwrap_or_else(|e| panic!("case {:?}, input {input:?}: {e}", case.name));
            assert_eq!(
                actual.as_deref(),
                expected.as_deref(),
                "case {:?}, input {input:?}",
                case.name
            );
        }

        for input in &case.ambiguous_inputs {
            assert!(
                evaluate_str(&mealy, input).is_err(),
                "case {:?}: expected runtime ambiguity on {input:?}",
                case.name
            );
        }
    }
}

#[cfg(feature = "normalize")]
#[test]
fn golden_cases_survive_normalisation() {
    for case in load_cases() {
        if case.compile_error.is_some() || case.functional != Some(true) {
            continue;
        }
        let re = hoarec_fst::normalize(parse_expr(&case.expr));
        let mealy = compile(&re).unwrap_or_else(|e| panic!("case {:?}: {e}", case.name));
        for (input, expected) in &case.evaluations {
            let actual = evaluate_str(&mealy, input).unwrap();
            assert_eq!(
                actual.as_deref(),
                expected.as_deref(),
                "normalized case {:?} ({re}), input {input:?}",
                case.name
            );
        }
    }
}
