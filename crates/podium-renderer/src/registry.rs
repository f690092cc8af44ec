//! Node renderer registry and tree traversal.
//!
//! Rendering is dispatched by [`NodeType`]. Each type resolves to one
//! [`NodeRenderer`]: an override registered with
//! [`RendererRegistry::with_renderer`] wins over the built-in default.
//!
//! Attribute decoration is a separate concern. Every tag opened through
//! [`RenderContext::open_tag`] or [`RenderContext::void_tag`] first passes
//! through all registered [`AttributeProvider`]s, whichever renderer emits it.

use std::collections::HashMap;

use crate::ast::{Document, NodeRef, NodeType};
use crate::commonmark::CoreRenderer;
use crate::error::RenderError;
use crate::extension::Extensions;
use crate::writer::{Attributes, HtmlWriter};

/// Renders the node types it declares.
pub trait NodeRenderer: Send + Sync {
    /// Node types this renderer handles.
    fn node_types(&self) -> &'static [NodeType];

    /// Render `node` (and, usually, its children) into the context.
    fn render(&self, node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;
}

/// Adds or overwrites attributes on a tag about to be written.
pub trait AttributeProvider: Send + Sync {
    /// `node` is the node being rendered, `tag` the element name.
    fn set_attributes(&self, node: NodeRef<'_>, tag: &str, attrs: &mut Attributes);
}

/// Immutable renderer lookup table plus attribute providers.
///
/// Built once and shared; rendering never mutates it.
pub struct RendererRegistry {
    renderers: Vec<Box<dyn NodeRenderer>>,
    defaults: HashMap<NodeType, usize>,
    overrides: HashMap<NodeType, usize>,
    providers: Vec<Box<dyn AttributeProvider>>,
}

impl RendererRegistry {
    /// Registry with the built-in renderers and everything the extensions
    /// contribute.
    #[must_use]
    pub fn new(extensions: &Extensions) -> Self {
        let mut registry = Self {
            renderers: Vec::new(),
            defaults: HashMap::new(),
            overrides: HashMap::new(),
            providers: extensions.attribute_providers().collect(),
        };
        registry.register_default(Box::new(CoreRenderer));
        for renderer in extensions.node_renderers() {
            registry.register_default(renderer);
        }
        registry
    }

    /// Register an override for the renderer's node types.
    ///
    /// Overrides are consulted before defaults. A later override for the
    /// same type replaces an earlier one.
    #[must_use]
    pub fn with_renderer<R: NodeRenderer + 'static>(mut self, renderer: R) -> Self {
        let index = self.push(Box::new(renderer));
        for &node_type in self.renderers[index].node_types() {
            self.overrides.insert(node_type, index);
        }
        self
    }

    /// Register an attribute provider. Providers run in registration order.
    #[must_use]
    pub fn with_attribute_provider<P: AttributeProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Render a whole document to an HTML fragment.
    pub fn render(&self, doc: &Document) -> Result<String, RenderError> {
        let mut ctx = RenderContext {
            registry: self,
            writer: HtmlWriter::new(),
        };
        ctx.render(doc.root())?;
        Ok(ctx.writer.into_string())
    }

    fn register_default(&mut self, renderer: Box<dyn NodeRenderer>) {
        let index = self.push(renderer);
        for &node_type in self.renderers[index].node_types() {
            self.defaults.insert(node_type, index);
        }
    }

    fn push(&mut self, renderer: Box<dyn NodeRenderer>) -> usize {
        self.renderers.push(renderer);
        self.renderers.len() - 1
    }

    fn renderer_for(&self, node_type: NodeType) -> Option<&dyn NodeRenderer> {
        self.overrides
            .get(&node_type)
            .or_else(|| self.defaults.get(&node_type))
            .map(|&index| self.renderers[index].as_ref())
    }
}

/// Per-call rendering state: the output buffer and the registry in use.
pub struct RenderContext<'r> {
    registry: &'r RendererRegistry,
    writer: HtmlWriter,
}

impl RenderContext<'_> {
    /// Output buffer.
    pub fn writer(&mut self) -> &mut HtmlWriter {
        &mut self.writer
    }

    /// Render a node with the renderer registered for its type.
    ///
    /// Types with no renderer render their children only.
    pub fn render(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let registry = self.registry;
        match registry.renderer_for(node.node_type()) {
            Some(renderer) => renderer.render(node, self),
            None => self.render_children(node),
        }
    }

    pub fn render_children(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        for child in node.children() {
            self.render(child)?;
        }
        Ok(())
    }

    /// Run all attribute providers over `attrs` for `tag` on `node`.
    #[must_use]
    pub fn extend_attributes(
        &self,
        node: NodeRef<'_>,
        tag: &str,
        mut attrs: Attributes,
    ) -> Attributes {
        for provider in &self.registry.providers {
            provider.set_attributes(node, tag, &mut attrs);
        }
        attrs
    }

    /// Write an opening tag after attribute providers have run.
    pub fn open_tag(&mut self, node: NodeRef<'_>, tag: &str, attrs: Attributes) {
        let attrs = self.extend_attributes(node, tag, attrs);
        self.writer.tag(tag, &attrs);
    }

    /// Write a void element after attribute providers have run.
    pub fn void_tag(&mut self, node: NodeRef<'_>, tag: &str, attrs: Attributes) {
        let attrs = self.extend_attributes(node, tag, attrs);
        self.writer.void_tag(tag, &attrs);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::NodeKind;
    use crate::parser::Parser;

    fn render_with(registry: &RendererRegistry, markdown: &str) -> String {
        let doc = Parser::default().parse(markdown);
        registry.render(&doc).unwrap()
    }

    struct ShoutingHeadings;

    impl NodeRenderer for ShoutingHeadings {
        fn node_types(&self) -> &'static [NodeType] {
            &[NodeType::Heading]
        }

        fn render(
            &self,
            node: NodeRef<'_>,
            ctx: &mut RenderContext<'_>,
        ) -> Result<(), RenderError> {
            let text = node.plain_text().to_uppercase();
            ctx.writer().raw("<h1>");
            ctx.writer().text(&text);
            ctx.writer().raw("</h1>\n");
            Ok(())
        }
    }

    struct ClassOnParagraphs;

    impl AttributeProvider for ClassOnParagraphs {
        fn set_attributes(&self, node: NodeRef<'_>, tag: &str, attrs: &mut Attributes) {
            if tag == "p" && matches!(node.kind(), NodeKind::Paragraph) {
                attrs.insert("class", "lead");
            }
        }
    }

    #[test]
    fn test_default_renderers() {
        let registry = RendererRegistry::new(&Extensions::default());
        assert_eq!(render_with(&registry, "# header"), "<h1>header</h1>\n");
    }

    #[test]
    fn test_override_wins_over_default() {
        let registry =
            RendererRegistry::new(&Extensions::default()).with_renderer(ShoutingHeadings);
        assert_eq!(
            render_with(&registry, "# header\n\ntext"),
            "<h1>HEADER</h1>\n<p>text</p>\n"
        );
    }

    #[test]
    fn test_attribute_provider_applies_to_default_renderer() {
        let registry = RendererRegistry::new(&Extensions::default())
            .with_attribute_provider(ClassOnParagraphs);
        assert_eq!(
            render_with(&registry, "text"),
            "<p class=\"lead\">text</p>\n"
        );
    }

    #[test]
    fn test_missing_renderer_renders_children() {
        // Without the table extension's renderer, table nodes fall back to
        // their contents.
        let registry = RendererRegistry::new(&Extensions::none());
        let doc = Parser::default().parse("| A |\n|---|\n| 1 |");
        assert_eq!(registry.render(&doc).unwrap(), "A1");
    }

    #[test]
    fn test_empty_document() {
        let registry = RendererRegistry::new(&Extensions::default());
        assert_eq!(render_with(&registry, ""), "");
    }
}
