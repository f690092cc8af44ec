//! Render facade: parser, registry and slide-specific overrides in one value.

use std::io::{BufRead, BufReader, Read};
use std::sync::LazyLock;

use crate::blockquote::QuoteRenderer;
use crate::error::RenderError;
use crate::extension::Extensions;
use crate::parser::Parser;
use crate::registry::{AttributeProvider, NodeRenderer, RendererRegistry};
use crate::table::TableAttributeProvider;

/// Separator used to join lines read from a stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LineSeparator {
    /// `\r\n` on Windows, `\n` elsewhere.
    #[default]
    Platform,
    Lf,
    Crlf,
}

impl LineSeparator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform if cfg!(windows) => "\r\n",
            Self::Platform | Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Markdown to HTML renderer for slides.
///
/// Built with the default extensions, the quote/author blockquote renderer
/// and Bootstrap table styling. Construction is the only mutable phase; a
/// built renderer is shared freely between threads.
///
/// # Example
///
/// ```
/// use podium_renderer::MarkdownRenderer;
///
/// let renderer = MarkdownRenderer::new();
/// let html = renderer.render_markdown("> Stay hungry~Steve").unwrap();
/// assert!(html.contains("<figcaption class=\"blockquote-footer\">Steve</figcaption>"));
/// ```
pub struct MarkdownRenderer {
    parser: Parser,
    registry: RendererRegistry,
    line_separator: LineSeparator,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_extensions(Extensions::default())
    }

    /// Renderer whose parser and registry share `extensions`.
    #[must_use]
    pub fn with_extensions(extensions: Extensions) -> Self {
        let registry = RendererRegistry::new(&extensions)
            .with_renderer(QuoteRenderer)
            .with_attribute_provider(TableAttributeProvider);
        Self {
            parser: Parser::new(extensions),
            registry,
            line_separator: LineSeparator::default(),
        }
    }

    /// Set the separator used by [`render_reader`](Self::render_reader).
    #[must_use]
    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.line_separator = line_separator;
        self
    }

    /// Register an additional renderer override.
    #[must_use]
    pub fn with_renderer<R: NodeRenderer + 'static>(mut self, renderer: R) -> Self {
        self.registry = self.registry.with_renderer(renderer);
        self
    }

    /// Register an additional attribute provider.
    #[must_use]
    pub fn with_attribute_provider<P: AttributeProvider + 'static>(mut self, provider: P) -> Self {
        self.registry = self.registry.with_attribute_provider(provider);
        self
    }

    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    #[must_use]
    pub fn line_separator(&self) -> LineSeparator {
        self.line_separator
    }

    /// Render markdown text to an HTML fragment.
    pub fn render_markdown(&self, markdown: &str) -> Result<String, RenderError> {
        let doc = self.parser.parse(markdown);
        let html = self.registry.render(&doc)?;
        tracing::debug!(
            input_bytes = markdown.len(),
            output_bytes = html.len(),
            "Rendered markdown"
        );
        Ok(html)
    }

    /// Read all lines from `reader`, join them with the line separator and
    /// render the result.
    ///
    /// The trailing newline of the source is not kept.
    pub fn render_reader(&self, reader: impl Read) -> Result<String, RenderError> {
        let lines = BufReader::new(reader)
            .lines()
            .collect::<Result<Vec<_>, _>>()?;
        self.render_markdown(&lines.join(self.line_separator.as_str()))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

/// Render markdown text with the process-wide renderer.
pub fn render_markdown(markdown: &str) -> Result<String, RenderError> {
    SHARED.render_markdown(markdown)
}

/// Render markdown read from a stream with the process-wide renderer.
pub fn render_markdown_from_reader(reader: impl Read) -> Result<String, RenderError> {
    SHARED.render_reader(reader)
}
