use folio::emitter::StreamSink;
use folio::fonts::{FontCatalog, FontConfig};
use folio::resource::DocumentResources;
use folio::style::PageSize;
use folio::{Document, DocumentRenderer, FixedAdvanceMeasurer, FolioError, RenderOptions};
use lopdf::Object;
use lopdf::content::{Content, Operation};
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// The output of one render: the raw stream, its decoded operators and the
/// registry the resources went into.
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub operations: Vec<Operation>,
    pub registry: DocumentResources,
}

impl Rendered {
    pub fn operators(&self) -> Vec<&str> {
        self.operations.iter().map(|o| o.operator.as_str()).collect()
    }

    /// Operations with the given operator, in stream order.
    pub fn find(&self, operator: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|o| o.operator == operator)
            .collect()
    }

    pub fn count(&self, operator: &str) -> usize {
        self.find(operator).len()
    }
}

pub fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("operand {other:?} is not a number"),
    }
}

pub fn numbers(operation: &Operation) -> Vec<f32> {
    operation.operands.iter().map(number).collect()
}

pub fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-3, "{actual:?} vs {expected:?}");
    }
}

/// Options for a small 200x100 page.
pub fn small_page() -> RenderOptions {
    RenderOptions {
        page_size: PageSize::Custom {
            width: 200.0,
            height: 100.0,
        },
        ..Default::default()
    }
}

/// A catalog that never scans the system, so output is the same everywhere.
pub fn isolated_catalog() -> FontCatalog {
    FontCatalog::new(FontConfig::isolated())
}

pub fn render_json(json: &str) -> Result<Rendered, FolioError> {
    render_with(json, &isolated_catalog(), small_page(), Path::new("."))
}

pub fn render_with(
    json: &str,
    catalog: &FontCatalog,
    options: RenderOptions,
    base: &Path,
) -> Result<Rendered, FolioError> {
    let document = Document::from_json(json)?;
    let rules = document.rule_set()?;
    let measurer = FixedAdvanceMeasurer::default();
    let mut registry = DocumentResources::new(base);

    let mut renderer = DocumentRenderer::new(&rules, catalog, &measurer).with_options(options);
    let sink = renderer.render(&document.root, StreamSink::new(Vec::new()), &mut registry)?;
    let bytes = sink.into_inner();
    let operations = Content::decode(&bytes)
        .map_err(|e| FolioError::Config(format!("emitted stream does not decode: {e}")))?
        .operations;
    Ok(Rendered {
        bytes,
        operations,
        registry,
    })
}
