//! Builds documents from the `saphyr-parser` event stream.
//!
//! Working on events keeps the scalar style visible, so `null` and `"null"`
//! or `.inf` and `'.inf'` resolve differently, and mapping keys keep their
//! source text.

use std::collections::HashMap;

use saphyr_parser::{Event, Parser, ScalarStyle, ScanError, Span, StrInput, Tag};

use super::resolve;
use crate::document::{Document, Mapping, Scalar};

/// Deepest nesting accepted before composing gives up.
const MAX_DEPTH: usize = 256;

/// Upper bound on nodes produced, counting every alias expansion.
const MAX_NODES: usize = 1_000_000;

/// A composition failure located in the source text.
#[derive(Debug)]
pub(super) struct ComposeError {
    pub(super) line: usize,
    pub(super) column: usize,
    pub(super) reason: String,
}

impl ComposeError {
    fn at(span: Span, reason: impl Into<String>) -> Self {
        Self {
            line: span.start.line(),
            column: span.start.col() + 1,
            reason: reason.into(),
        }
    }
}

impl From<ScanError> for ComposeError {
    fn from(err: ScanError) -> Self {
        Self {
            line: err.marker().line(),
            column: err.marker().col() + 1,
            reason: err.info().to_owned(),
        }
    }
}

/// Compose the single document held by `text`; an empty stream is null.
pub(super) fn compose(text: &str) -> Result<Document, ComposeError> {
    Composer::new(text).stream()
}

struct Composer<'input> {
    parser: Parser<'input, StrInput<'input>>,
    anchors: HashMap<usize, (Document, usize)>,
    remaining: usize,
    last: Span,
}

impl<'input> Composer<'input> {
    fn new(text: &'input str) -> Self {
        Self {
            parser: Parser::new_from_str(text),
            anchors: HashMap::new(),
            remaining: MAX_NODES,
            last: Span::default(),
        }
    }

    fn advance(&mut self) -> Result<(Event<'input>, Span), ComposeError> {
        let (event, span) = self
            .parser
            .next_event()
            .ok_or_else(|| ComposeError::at(self.last, "unexpected end of YAML stream"))??;
        self.last = span;
        Ok((event, span))
    }

    fn stream(mut self) -> Result<Document, ComposeError> {
        let mut root = None;
        loop {
            let (event, span) = self.advance()?;
            match event {
                Event::StreamEnd => return Ok(root.unwrap_or_else(Document::null)),
                Event::DocumentStart(_) if root.is_some() => {
                    return Err(ComposeError::at(
                        span,
                        "multiple YAML documents in one source are not supported",
                    ));
                }
                Event::DocumentStart(_) => root = Some(self.body()?),
                Event::StreamStart | Event::DocumentEnd | Event::Nothing => {}
                _ => return Err(ComposeError::at(span, "unexpected YAML event")),
            }
        }
    }

    fn body(&mut self) -> Result<Document, ComposeError> {
        let (event, span) = self.advance()?;
        if matches!(event, Event::DocumentEnd) {
            return Ok(Document::null());
        }
        self.node(event, span, 0)
    }

    fn node(
        &mut self,
        event: Event<'input>,
        span: Span,
        depth: usize,
    ) -> Result<Document, ComposeError> {
        if depth > MAX_DEPTH {
            return Err(ComposeError::at(span, format!("nesting exceeds {MAX_DEPTH} levels")));
        }
        let budget = self.remaining;
        self.spend(1, span)?;
        let (anchor, document) = match event {
            Event::Scalar(text, style, anchor, tag) => {
                let value = scalar(&text, style, tag.as_deref())
                    .map_err(|reason| ComposeError::at(span, reason))?;
                (anchor, Document::Scalar(value))
            }
            Event::SequenceStart(anchor, _) => (anchor, self.sequence(depth)?),
            Event::MappingStart(anchor, _) => (anchor, self.mapping(depth)?),
            Event::Alias(id) => return self.alias(id, span),
            _ => return Err(ComposeError::at(span, "unexpected YAML event")),
        };
        if anchor != 0 {
            let weight = budget - self.remaining;
            self.anchors.insert(anchor, (document.clone(), weight));
        }
        Ok(document)
    }

    fn sequence(&mut self, depth: usize) -> Result<Document, ComposeError> {
        let mut items = Vec::new();
        loop {
            let (event, span) = self.advance()?;
            if matches!(event, Event::SequenceEnd) {
                return Ok(Document::Sequence(items));
            }
            items.push(self.node(event, span, depth + 1)?);
        }
    }

    fn mapping(&mut self, depth: usize) -> Result<Document, ComposeError> {
        let mut entries = Mapping::new();
        loop {
            let (event, span) = self.advance()?;
            if matches!(event, Event::MappingEnd) {
                return Ok(Document::Mapping(entries));
            }
            let key = self.key(event, span)?;
            if entries.contains_key(&key) {
                return Err(ComposeError::at(span, format!("duplicate mapping key `{key}`")));
            }
            let (value_event, value_span) = self.advance()?;
            let value = self.node(value_event, value_span, depth + 1)?;
            entries.insert(key, value);
        }
    }

    /// Keys keep their source text; `0x10` stays `0x10`.
    fn key(&mut self, event: Event<'input>, span: Span) -> Result<String, ComposeError> {
        match event {
            Event::Scalar(text, style, anchor, tag) => {
                if anchor != 0 {
                    let value = scalar(&text, style, tag.as_deref())
                        .map_err(|reason| ComposeError::at(span, reason))?;
                    self.anchors.insert(anchor, (Document::Scalar(value), 1));
                }
                Ok(text.into_owned())
            }
            Event::Alias(id) => match self.anchors.get(&id) {
                Some((Document::Scalar(value), _)) => Ok(value.to_string()),
                Some(_) => Err(ComposeError::at(span, "mapping keys must be scalars")),
                None => Err(ComposeError::at(span, "alias refers to an unknown anchor")),
            },
            Event::SequenceStart(..) | Event::MappingStart(..) => {
                Err(ComposeError::at(span, "mapping keys must be scalars"))
            }
            _ => Err(ComposeError::at(span, "unexpected YAML event")),
        }
    }

    fn alias(&mut self, id: usize, span: Span) -> Result<Document, ComposeError> {
        let (document, weight) = self
            .anchors
            .get(&id)
            .ok_or_else(|| ComposeError::at(span, "alias refers to an unknown anchor"))?;
        if *weight > self.remaining {
            return Err(ComposeError::at(
                span,
                format!("aliases expand beyond {MAX_NODES} nodes"),
            ));
        }
        self.remaining -= *weight;
        Ok(document.clone())
    }

    fn spend(&mut self, nodes: usize, span: Span) -> Result<(), ComposeError> {
        self.remaining = self.remaining.checked_sub(nodes).ok_or_else(|| {
            ComposeError::at(span, format!("document expands beyond {MAX_NODES} nodes"))
        })?;
        Ok(())
    }
}

/// Core schema tags win; other tags resolve by style like untagged scalars.
fn scalar(text: &str, style: ScalarStyle, tag: Option<&Tag>) -> Result<Scalar, String> {
    match tag {
        Some(core) if core.is_yaml_core_schema() => resolve::tagged(&core.suffix, text, style),
        Some(local) if local.handle == "!" && local.suffix.is_empty() => {
            Ok(Scalar::String(text.to_owned()))
        }
        _ => resolve::untagged(text, style),
    }
}
