//! TOML adapter coverage.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::map;
use crate::document::Document;
use crate::error::BlendError;
use crate::format::{FormatAdapter, TomlAdapter};

#[rstest]
fn toml_tables_load_in_order() -> Result<()> {
    let doc = TomlAdapter.load("config.toml", "key = \"value\"\n[nested]\ndata = [1, 2, 3]\n")?;
    let expected = map(&[
        ("key", Document::from("value")),
        (
            "nested",
            map(&[(
                "data",
                Document::from(vec![Document::from(1), Document::from(2), Document::from(3)]),
            )]),
        ),
    ]);
    ensure!(doc == expected, "unexpected document: {doc:?}");
    Ok(())
}

#[test]
fn empty_toml_is_an_empty_mapping() -> Result<()> {
    ensure!(TomlAdapter.load("config.toml", "")? == Document::empty_mapping());
    Ok(())
}

#[rstest]
#[case("invalid toml [unclosed")]
#[case("= value")]
fn toml_errors_point_at_the_failure(#[case] text: &str) {
    let err = TomlAdapter.load("broken.toml", text).expect_err("malformed TOML");
    assert!(matches!(err, BlendError::Parse { .. }), "got {err:?}");
    assert!(err.to_string().contains("line 1"), "got: {err}");
}

#[test]
fn toml_dump_drops_nulls_and_round_trips_the_rest() -> Result<()> {
    let doc = map(&[
        ("integer", Document::from(42)),
        ("float", Document::from(3.25)),
        ("missing", Document::null()),
        ("nested", map(&[("value", Document::from(100))])),
    ]);
    let rendered = TomlAdapter.dump(&doc)?;
    let reloaded = TomlAdapter.load("dumped.toml", &rendered)?;
    let expected = map(&[
        ("integer", Document::from(42)),
        ("float", Document::from(3.25)),
        ("nested", map(&[("value", Document::from(100))])),
    ]);
    ensure!(reloaded == expected, "unexpected reload {reloaded:?} from\n{rendered}");
    Ok(())
}

#[rstest]
#[case(Document::from("scalar"), map(&[("value", Document::from("scalar"))]))]
#[case(
    Document::Sequence(vec![Document::from(1)]),
    map(&[("value", Document::from(vec![Document::from(1)]))])
)]
#[case(Document::null(), Document::empty_mapping())]
fn toml_dump_wraps_non_mapping_roots(#[case] doc: Document, #[case] expected: Document) -> Result<()> {
    let rendered = TomlAdapter.dump(&doc)?;
    let reloaded = TomlAdapter.load("dumped.toml", &rendered)?;
    ensure!(reloaded == expected, "unexpected reload {reloaded:?} from\n{rendered}");
    Ok(())
}
