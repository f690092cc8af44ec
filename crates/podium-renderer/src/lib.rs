//! Markdown to HTML rendering for slides.
//!
//! Markdown is parsed into an arena [`Document`] and rendered by a
//! [`RendererRegistry`] that dispatches on node type. The slide renderer
//! replaces blockquotes with a quote/author figure ([`QuoteRenderer`]) and
//! styles tables through an [`AttributeProvider`] ([`TableAttributeProvider`]).
//!
//! # Example
//!
//! ```
//! let html = podium_renderer::render_markdown("# header").unwrap();
//! assert_eq!(html, "<h1>header</h1>\n");
//! ```
//!
//! Custom renderers plug in per node type:
//!
//! ```
//! use podium_renderer::{
//!     MarkdownRenderer, NodeRef, NodeRenderer, NodeType, RenderContext, RenderError,
//! };
//!
//! struct PlainRule;
//!
//! impl NodeRenderer for PlainRule {
//!     fn node_types(&self) -> &'static [NodeType] {
//!         &[NodeType::ThematicBreak]
//!     }
//!
//!     fn render(&self, _node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
//!         ctx.writer().line();
//!         ctx.writer().raw("<hr>\n");
//!         Ok(())
//!     }
//! }
//!
//! let renderer = MarkdownRenderer::new().with_renderer(PlainRule);
//! assert_eq!(renderer.render_markdown("---").unwrap(), "<hr>\n");
//! ```

mod ast;
mod blockquote;
mod commonmark;
mod error;
mod extension;
mod image_attributes;
mod markdown;
mod parser;
mod registry;
mod table;
mod task_list;
mod writer;

pub use ast::{Alignment, Document, NodeId, NodeKind, NodeRef, NodeType};
pub use blockquote::QuoteRenderer;
pub use error::RenderError;
pub use extension::{Extension, Extensions};
pub use markdown::{LineSeparator, MarkdownRenderer, render_markdown, render_markdown_from_reader};
pub use parser::Parser;
pub use registry::{AttributeProvider, NodeRenderer, RenderContext, RendererRegistry};
pub use table::TableAttributeProvider;
pub use writer::{Attributes, HtmlWriter, encode_url, escape_html};
