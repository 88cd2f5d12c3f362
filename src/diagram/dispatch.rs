//! Decode, pick a diagram kind, render.

use std::panic::{self, AssertUnwindSafe};

use super::{ApiError, DiagramKind, OutputFormat, Renderer, decode};
use crate::log;

/// A successfully rendered diagram, ready for framing.
#[derive(Debug)]
pub struct Rendered {
    pub kind: DiagramKind,
    pub format: OutputFormat,
    pub body: Vec<u8>,
}

/// Routes decoded sources to a renderer.
pub struct Dispatcher {
    renderer: Box<dyn Renderer>,
    /// Maximum decompressed source size in bytes.
    max_source: usize,
}

impl Dispatcher {
    pub fn new(renderer: Box<dyn Renderer>, max_source: usize) -> Self {
        Self {
            renderer,
            max_source,
        }
    }

    /// Render with a kind fixed by the route. The source is never sniffed.
    pub fn render_explicit(
        &self,
        kind: DiagramKind,
        format: OutputFormat,
        encoded: &str,
    ) -> Result<Rendered, ApiError> {
        let source = decode(encoded, self.max_source)?;
        self.render(kind, format, &source)
    }

    /// Render with the kind inferred from the source's leading keyword.
    pub fn render_sniffed(&self, format: OutputFormat, encoded: &str) -> Result<Rendered, ApiError> {
        let source = decode(encoded, self.max_source)?;
        let kind = DiagramKind::sniff(&source).ok_or(ApiError::UnrecognizedSource)?;
        self.render(kind, format, &source)
    }

    fn render(
        &self,
        kind: DiagramKind,
        format: OutputFormat,
        source: &str,
    ) -> Result<Rendered, ApiError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.renderer.render(kind, format, source)
        }));

        match result {
            Ok(rendered) => Ok(Rendered {
                kind,
                format,
                body: rendered?,
            }),
            Err(_) => {
                log!("render"; "{kind} renderer panicked");
                Err(ApiError::Internal)
            }
        }
    }
}
