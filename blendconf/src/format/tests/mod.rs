//! Adapter coverage shared helpers and per-format submodules.

use rstest::rstest;

use super::{AdapterRegistry, EnvOptions, FormatAdapter, FormatTag};
use crate::document::Document;
use crate::error::BlendError;

mod json_tests;
mod toml_tests;

pub(super) fn map(entries: &[(&str, Document)]) -> Document {
    entries.iter().cloned().collect()
}

#[rstest]
#[case("yaml", FormatTag::Yaml)]
#[case("YML", FormatTag::Yaml)]
#[case(".Env", FormatTag::Env)]
#[case("json", FormatTag::Json)]
#[case("TOML", FormatTag::Toml)]
fn tags_parse_case_insensitively(#[case] name: &str, #[case] expected: FormatTag) {
    assert_eq!(FormatTag::parse(name).expect("known tag"), expected);
}

#[rstest]
#[case("config.JSON", FormatTag::Json)]
#[case("config.yml", FormatTag::Yaml)]
#[case("nested/dir/app.Toml", FormatTag::Toml)]
#[case("prod.env", FormatTag::Env)]
#[case(".ENV", FormatTag::Env)]
fn tags_infer_from_extensions(#[case] path: &str, #[case] expected: FormatTag) {
    let tag = FormatTag::from_path(camino::Utf8Path::new(path)).expect("known extension");
    assert_eq!(tag, expected);
}

#[rstest]
#[case("config.txt")]
#[case("config.xml")]
#[case("config.ini")]
#[case("config")]
fn unknown_extensions_are_unsupported(#[case] path: &str) {
    let err = FormatTag::from_path(camino::Utf8Path::new(path)).expect_err("unsupported");
    assert!(matches!(err, BlendError::UnsupportedFormat { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("unsupported file format"), "got: {err}");
}

#[test]
fn registry_resolves_every_builtin_tag() {
    let registry = AdapterRegistry::new();
    for tag in [FormatTag::Yaml, FormatTag::Env, FormatTag::Json, FormatTag::Toml] {
        let adapter = registry.adapter(tag).expect("registered adapter");
        assert_eq!(adapter.tag(), tag);
    }
}

#[test]
fn empty_registry_reports_unsupported_formats() {
    let registry = AdapterRegistry::empty();
    let err = registry.adapter(FormatTag::Yaml).err().expect("missing adapter");
    assert!(matches!(err, BlendError::UnsupportedFormat { format } if format == "yaml"));
}

struct ShoutingYaml;

impl FormatAdapter for ShoutingYaml {
    fn tag(&self) -> FormatTag {
        FormatTag::Yaml
    }

    fn load(&self, _source_id: &str, text: &str) -> crate::BlendResult<Document> {
        Ok(Document::from(text.to_uppercase()))
    }

    fn dump(&self, document: &Document) -> crate::BlendResult<String> {
        Ok(format!("{document:?}"))
    }
}

#[test]
fn registering_replaces_the_adapter_for_a_tag() {
    let mut registry = AdapterRegistry::with_env_options(EnvOptions::default());
    registry.register(Box::new(ShoutingYaml));
    let loaded = registry
        .adapter(FormatTag::Yaml)
        .and_then(|adapter| adapter.load("inline", "quiet"))
        .expect("custom adapter");
    assert_eq!(loaded, Document::from("QUIET"));
}
