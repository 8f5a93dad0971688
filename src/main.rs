use folio::emitter::StreamSink;
use folio::fonts::FontCatalog;
use folio::resource::DocumentResources;
use folio::{Document, DocumentRenderer, FixedAdvanceMeasurer, FolioConfig, FolioError};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Renders a JSON component document and writes its content stream to stdout.
fn main() -> Result<(), FolioError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Renders a JSON component document into a content stream.");
        eprintln!();
        eprintln!("Usage: {} <path/to/document.json> [path/to/config.json]", args[0]);
        eprintln!();
        eprintln!("Set RUST_LOG=debug to see font resolution and resource registration.");
        std::process::exit(1);
    }

    let document_path = Path::new(&args[1]);
    let config = match args.get(2) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            FolioConfig::from_file(path)?
        }
        None => FolioConfig::default(),
    };

    log::info!("Loading document from {}", document_path.display());
    let document = Document::from_json(&fs::read_to_string(document_path)?)?;
    let rules = document.rule_set()?;

    // Image keys in the document are relative to the document itself.
    let base = document_path.parent().unwrap_or(Path::new("."));
    let mut registry = DocumentResources::new(base);
    let catalog = FontCatalog::new(config.fonts.clone());
    let measurer = FixedAdvanceMeasurer::default();

    let stdout = io::stdout().lock();
    let mut renderer =
        DocumentRenderer::new(&rules, &catalog, &measurer).with_options(config.render);
    let sink = renderer.render(&document.root, StreamSink::new(stdout), &mut registry)?;
    sink.into_inner().flush()?;

    for entry in registry.iter() {
        log::info!("/{} -> {:?}", entry.name, entry.resource.payload);
    }
    Ok(())
}
