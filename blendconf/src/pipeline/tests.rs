//! Tests for the load, merge and write pipeline.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use test_helpers::SourceDir;

use super::*;
use crate::document::Document;

#[fixture]
fn layered() -> SourceDir {
    let dir = SourceDir::new().expect("scratch directory");
    dir.write("base.yaml", "db:\n  host: a\n  port: 5432\nhosts:\n  - one\n")
        .expect("write base");
    dir.write("override.env", "DB_PORT=6000\nHOSTS=two,three\n")
        .expect("write override");
    dir
}

fn sources(dir: &SourceDir) -> Result<Vec<Source>> {
    Ok(vec![
        Source::infer(dir.join("base.yaml"))?,
        Source::infer(dir.join("override.env"))?,
    ])
}

fn reload(dir: &SourceDir, name: &str, format: FormatTag) -> Result<Document> {
    let text = dir.read(name)?;
    Ok(AdapterRegistry::new().adapter(format)?.load(name, &text)?)
}

#[rstest]
fn merges_yaml_and_env_into_a_file(layered: SourceDir) -> Result<()> {
    let output = layered.join("merged.json");
    let request = PipelineRequest::new(
        sources(&layered)?,
        MergeStrategy::DeepMerge,
        OutputTarget::File(output.clone()),
    );
    let mut stdout = Vec::new();
    let summary = run(&request, &AdapterRegistry::new(), &mut stdout)?;

    ensure!(summary.sources == 2, "unexpected summary: {summary:?}");
    ensure!(summary.output_format == FormatTag::Json, "format inferred from path");
    let merged = reload(&layered, "merged.json", FormatTag::Json)?;
    let expected: Document = [
        (
            "db",
            [("host", Document::from("a")), ("port", Document::from("6000"))]
                .into_iter()
                .collect(),
        ),
        (
            "hosts",
            ["two", "three"].into_iter().map(Document::from).collect(),
        ),
    ]
    .into_iter()
    .collect();
    ensure!(merged == expected, "unexpected merge: {merged:?}");
    let message = String::from_utf8(stdout)?;
    ensure!(
        message == format!("Merged 2 source(s) into {output}\n"),
        "unexpected confirmation: {message:?}"
    );
    Ok(())
}

#[rstest]
fn stdout_receives_only_the_document(layered: SourceDir) -> Result<()> {
    let request = PipelineRequest::new(
        sources(&layered)?,
        MergeStrategy::DeepMerge,
        OutputTarget::Stdout,
    )
    .with_output_format(FormatTag::Json);
    let mut stdout = Vec::new();
    let summary = run(&request, &AdapterRegistry::new(), &mut stdout)?;

    let text = String::from_utf8(stdout)?;
    ensure!(!text.contains("Merged"), "confirmation leaked: {text}");
    ensure!(summary.bytes_written == text.len(), "byte count mismatch");
    let parsed = AdapterRegistry::new()
        .adapter(FormatTag::Json)?
        .load("stdout", &text)?;
    ensure!(
        parsed.pointer(&["db", "port"]) == Some(&Document::from("6000")),
        "unexpected output: {text}"
    );
    Ok(())
}

#[rstest]
fn strategy_is_applied_end_to_end(layered: SourceDir) -> Result<()> {
    let request = PipelineRequest::new(
        sources(&layered)?,
        MergeStrategy::AppendSequences,
        OutputTarget::File(layered.join("merged.yaml")),
    );
    run(&request, &AdapterRegistry::new(), &mut Vec::new())?;

    let merged = reload(&layered, "merged.yaml", FormatTag::Yaml)?;
    let expected: Document = ["one", "two", "three"]
        .into_iter()
        .map(Document::from)
        .collect();
    ensure!(
        merged.get("hosts") == Some(&expected),
        "sequences should append: {merged:?}"
    );
    ensure!(
        merged.pointer(&["db", "host"]) == Some(&Document::from("a")),
        "mappings still merge deeply"
    );
    Ok(())
}

#[rstest]
fn override_keeps_only_the_last_source(layered: SourceDir) -> Result<()> {
    let request = PipelineRequest::new(
        sources(&layered)?,
        MergeStrategy::Override,
        OutputTarget::File(layered.join("merged.toml")),
    );
    run(&request, &AdapterRegistry::new(), &mut Vec::new())?;

    let merged = reload(&layered, "merged.toml", FormatTag::Toml)?;
    ensure!(merged.pointer(&["db", "host"]).is_none(), "base should be gone");
    Ok(())
}

#[test]
fn stdout_without_format_is_rejected() -> Result<()> {
    let dir = SourceDir::new()?;
    let request = PipelineRequest::new(
        vec![Source::infer(dir.write("a.yaml", "a: 1\n")?)?],
        MergeStrategy::DeepMerge,
        OutputTarget::Stdout,
    );
    let mut stdout = Vec::new();
    let err = run(&request, &AdapterRegistry::new(), &mut stdout)
        .err()
        .context("expected missing format")?;
    ensure!(matches!(err, BlendError::MissingOutputFormat), "got {err:?}");
    ensure!(stdout.is_empty(), "nothing should be written");
    Ok(())
}

#[test]
fn missing_source_names_the_path() -> Result<()> {
    let dir = SourceDir::new()?;
    let present = dir.write("a.yaml", "a: 1\n")?;
    let absent = dir.join("absent.yaml");
    let output = dir.join("out.yaml");
    let request = PipelineRequest::new(
        vec![Source::infer(present)?, Source::infer(absent.clone())?],
        MergeStrategy::DeepMerge,
        OutputTarget::File(output.clone()),
    );
    let err = run(&request, &AdapterRegistry::new(), &mut Vec::new())
        .err()
        .context("expected missing file")?;
    ensure!(
        matches!(&err, BlendError::MissingFile { path, .. } if *path == absent),
        "got {err:?}"
    );
    ensure!(err.to_string().contains("absent.yaml"), "message: {err}");
    ensure!(!output.exists(), "no partial output should be written");
    Ok(())
}

#[test]
fn undecodable_source_is_a_parse_error() -> Result<()> {
    let dir = SourceDir::new()?;
    let garbled = dir.write("latin1.yaml", b"name: caf\xe9\n".as_slice())?;
    let err = load_sources(&[Source::infer(garbled)?], &AdapterRegistry::new())
        .err()
        .context("expected decoding failure")?;
    ensure!(matches!(err, BlendError::Parse { .. }), "got {err:?}");
    ensure!(
        err.source_id().is_some_and(|id| id.ends_with("latin1.yaml")),
        "message: {err}"
    );
    ensure!(err.to_string().contains("UTF-8"), "message: {err}");
    Ok(())
}

#[rstest]
#[case("a: null\n")]
#[case("a: ~\n")]
#[case("a:\n")]
fn yaml_null_overrides_earlier_values(#[case] top: &str) -> Result<()> {
    let dir = SourceDir::new()?;
    let loaded = load_sources(
        &[
            Source::infer(dir.write("base.yaml", "a: 1\nb: 2\n")?)?,
            Source::infer(dir.write("top.yaml", top)?)?,
        ],
        &AdapterRegistry::new(),
    )?;
    let merged = merge(&loaded, MergeStrategy::DeepMerge)?;
    ensure!(merged.get("a") == Some(&Document::null()), "got {merged:?}");
    ensure!(merged.get("b") == Some(&Document::from(2)), "got {merged:?}");
    Ok(())
}

#[test]
fn parse_failure_aborts_before_writing() -> Result<()> {
    let dir = SourceDir::new()?;
    let good = dir.write("good.json", "{\"a\": 1}")?;
    let bad = dir.write("bad.json", "{\"a\": ")?;
    let output = dir.join("out.json");
    let request = PipelineRequest::new(
        vec![Source::infer(good)?, Source::infer(bad)?],
        MergeStrategy::DeepMerge,
        OutputTarget::File(output.clone()),
    );
    let err = run(&request, &AdapterRegistry::new(), &mut Vec::new())
        .err()
        .context("expected parse error")?;
    ensure!(
        err.source_id().is_some_and(|id| id.ends_with("bad.json")),
        "error should name the source: {err}"
    );
    ensure!(!output.exists(), "no partial output should be written");
    Ok(())
}

#[rstest]
#[case("out.txt")]
#[case("out")]
fn unsupported_output_extension_is_rejected(#[case] name: &str) -> Result<()> {
    let dir = SourceDir::new()?;
    let request = PipelineRequest::new(
        vec![Source::infer(dir.write("a.yaml", "a: 1\n")?)?],
        MergeStrategy::DeepMerge,
        OutputTarget::File(dir.join(name)),
    );
    let err = run(&request, &AdapterRegistry::new(), &mut Vec::new())
        .err()
        .context("expected unsupported format")?;
    ensure!(
        matches!(err, BlendError::UnsupportedFormat { .. }),
        "got {err:?}"
    );
    Ok(())
}

#[test]
fn explicit_output_format_beats_the_extension() -> Result<()> {
    let dir = SourceDir::new()?;
    let request = PipelineRequest::new(
        vec![Source::infer(dir.write("a.yaml", "a: 1\nb: two\n")?)?],
        MergeStrategy::DeepMerge,
        OutputTarget::File(dir.join("merged.txt")),
    )
    .with_output_format(FormatTag::Env);
    run(&request, &AdapterRegistry::new(), &mut Vec::new())?;
    let text = dir.read("merged.txt")?;
    ensure!(text == "A=1\nB=two\n", "unexpected ENV output: {text:?}");
    Ok(())
}

#[test]
fn missing_parent_directory_is_a_write_error() -> Result<()> {
    let dir = SourceDir::new()?;
    let request = PipelineRequest::new(
        vec![Source::infer(dir.write("a.yaml", "a: 1\n")?)?],
        MergeStrategy::DeepMerge,
        OutputTarget::File(dir.join("nested/out.yaml")),
    );
    let err = run(&request, &AdapterRegistry::new(), &mut Vec::new())
        .err()
        .context("expected write error")?;
    ensure!(matches!(err, BlendError::Write { .. }), "got {err:?}");
    Ok(())
}

#[test]
fn empty_source_list_is_rejected() -> Result<()> {
    let request = PipelineRequest::new(Vec::new(), MergeStrategy::DeepMerge, OutputTarget::Stdout)
        .with_output_format(FormatTag::Yaml);
    let err = run(&request, &AdapterRegistry::new(), &mut Vec::new())
        .err()
        .context("expected empty input")?;
    ensure!(matches!(err, BlendError::EmptyInput), "got {err:?}");
    Ok(())
}
