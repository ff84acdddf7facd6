//! JSON adapter coverage.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::map;
use crate::document::Document;
use crate::error::BlendError;
use crate::format::{FormatAdapter, JsonAdapter};

#[rstest]
#[case(r#"{"key": "value", "number": 42}"#, map(&[("key", Document::from("value")), ("number", Document::from(42))]))]
#[case("[]", Document::Sequence(vec![]))]
#[case("null", Document::null())]
#[case("1.5", Document::from(1.5))]
#[case(r#""string""#, Document::from("string"))]
fn json_documents_load(#[case] text: &str, #[case] expected: Document) -> Result<()> {
    let doc = JsonAdapter.load("config.json", text)?;
    ensure!(doc == expected, "expected {expected:?}, got {doc:?}");
    Ok(())
}

#[rstest]
#[case("invalid json {")]
#[case(r#"{"unclosed": "#)]
#[case("")]
fn json_errors_carry_a_position(#[case] text: &str) {
    let err = JsonAdapter.load("broken.json", text).expect_err("malformed JSON");
    let BlendError::Parse { position, .. } = &err else {
        panic!("expected parse error, got {err:?}");
    };
    assert!(position.is_some(), "expected a position in {err}");
}

#[test]
fn json_dump_uses_four_space_indentation() -> Result<()> {
    let doc = map(&[("nested", map(&[("key", Document::from("value"))]))]);
    let rendered = JsonAdapter.dump(&doc)?;
    ensure!(
        rendered == "{\n    \"nested\": {\n        \"key\": \"value\"\n    }\n}\n",
        "unexpected rendering:\n{rendered}"
    );
    Ok(())
}

#[test]
fn json_dump_preserves_key_order() -> Result<()> {
    let doc = map(&[("zeta", Document::from(1)), ("alpha", Document::from(2))]);
    let rendered = JsonAdapter.dump(&doc)?;
    let zeta = rendered.find("zeta");
    let alpha = rendered.find("alpha");
    ensure!(zeta < alpha, "keys were reordered:\n{rendered}");
    Ok(())
}

#[test]
fn json_dump_names_non_finite_floats() -> Result<()> {
    let doc = map(&[
        ("up", Document::from(f64::INFINITY)),
        ("down", Document::from(f64::NEG_INFINITY)),
        ("undefined", Document::from(vec![Document::from(f64::NAN)])),
        ("finite", Document::from(0.25)),
    ]);
    let reloaded = JsonAdapter.load("dumped.json", &JsonAdapter.dump(&doc)?)?;
    let expected = map(&[
        ("up", Document::from(".inf")),
        ("down", Document::from("-.inf")),
        ("undefined", Document::from(vec![Document::from(".nan")])),
        ("finite", Document::from(0.25)),
    ]);
    ensure!(reloaded == expected, "got {reloaded:?}");
    Ok(())
}

#[test]
fn yaml_infinity_reaches_json_by_name() -> Result<()> {
    let loaded = crate::format::YamlAdapter.load("limits.yaml", "max: .inf\n")?;
    let rendered = JsonAdapter.dump(&loaded)?;
    ensure!(rendered.contains("\"max\": \".inf\""), "unexpected rendering:\n{rendered}");
    Ok(())
}
