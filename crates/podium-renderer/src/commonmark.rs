//! Built-in CommonMark node renderers.

use crate::ast::{NodeKind, NodeRef, NodeType};
use crate::error::RenderError;
use crate::registry::{NodeRenderer, RenderContext};
use crate::writer::{Attributes, encode_url};

/// Default HTML mapping for every core node type.
pub(crate) struct CoreRenderer;

impl NodeRenderer for CoreRenderer {
    fn node_types(&self) -> &'static [NodeType] {
        &[
            NodeType::Document,
            NodeType::Heading,
            NodeType::Paragraph,
            NodeType::List,
            NodeType::ListItem,
            NodeType::BlockQuote,
            NodeType::ThematicBreak,
            NodeType::CodeBlock,
            NodeType::HtmlBlock,
            NodeType::Text,
            NodeType::SoftBreak,
            NodeType::HardBreak,
            NodeType::Emphasis,
            NodeType::Strong,
            NodeType::Code,
            NodeType::HtmlInline,
            NodeType::Link,
            NodeType::Image,
        ]
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        match node.kind() {
            NodeKind::Heading { level } => {
                let tag = format!("h{level}");
                block(ctx, node, &tag, Attributes::new(), false)?;
            }
            // Items of tight lists carry their text directly, so every
            // paragraph gets a `<p>`.
            NodeKind::Paragraph => block(ctx, node, "p", Attributes::new(), false)?,
            NodeKind::List { start, .. } => {
                let (tag, attrs) = match start {
                    None => ("ul", Attributes::new()),
                    Some(1) => ("ol", Attributes::new()),
                    Some(n) => ("ol", Attributes::new().with("start", n.to_string())),
                };
                block(ctx, node, tag, attrs, true)?;
            }
            NodeKind::ListItem => {
                ctx.open_tag(node, "li", Attributes::new());
                ctx.render_children(node)?;
                ctx.writer().close_tag("li");
                ctx.writer().line();
            }
            NodeKind::BlockQuote => block(ctx, node, "blockquote", Attributes::new(), true)?,
            NodeKind::ThematicBreak => {
                ctx.writer().line();
                ctx.void_tag(node, "hr", Attributes::new());
                ctx.writer().line();
            }
            NodeKind::CodeBlock { info, literal } => {
                let mut attrs = Attributes::new();
                if let Some(language) = info.as_deref().and_then(|i| i.split_whitespace().next()) {
                    attrs.insert("class", format!("language-{language}"));
                }
                ctx.writer().line();
                ctx.open_tag(node, "pre", Attributes::new());
                ctx.open_tag(node, "code", attrs);
                ctx.writer().text(literal);
                ctx.writer().close_tag("code");
                ctx.writer().close_tag("pre");
                ctx.writer().line();
            }
            NodeKind::HtmlBlock { literal } => {
                ctx.writer().line();
                ctx.writer().raw(literal.trim_end_matches('\n'));
                ctx.writer().line();
            }
            NodeKind::Text(text) => ctx.writer().text(text),
            NodeKind::SoftBreak => ctx.writer().raw("\n"),
            NodeKind::HardBreak => {
                ctx.void_tag(node, "br", Attributes::new());
                ctx.writer().line();
            }
            NodeKind::Emphasis => inline(ctx, node, "em", Attributes::new())?,
            NodeKind::Strong => inline(ctx, node, "strong", Attributes::new())?,
            NodeKind::Code(code) => {
                ctx.open_tag(node, "code", Attributes::new());
                ctx.writer().text(code);
                ctx.writer().close_tag("code");
            }
            NodeKind::HtmlInline(html) => ctx.writer().raw(html),
            NodeKind::Link { destination, title } => {
                let mut attrs = Attributes::new().with("href", encode_url(destination));
                if !title.is_empty() {
                    attrs.insert("title", title.as_str());
                }
                inline(ctx, node, "a", attrs)?;
            }
            NodeKind::Image {
                destination, title, ..
            } => {
                let mut attrs = Attributes::new()
                    .with("src", encode_url(destination))
                    .with("alt", node.plain_text());
                if !title.is_empty() {
                    attrs.insert("title", title.as_str());
                }
                ctx.void_tag(node, "img", attrs);
            }
            _ => ctx.render_children(node)?,
        }
        Ok(())
    }
}

/// Block element: `line`, open tag, children, close tag, `line`.
///
/// `inner_lines` also breaks after the opening and before the closing tag,
/// for containers of other blocks.
pub(crate) fn block(
    ctx: &mut RenderContext<'_>,
    node: NodeRef<'_>,
    tag: &str,
    attrs: Attributes,
    inner_lines: bool,
) -> Result<(), RenderError> {
    ctx.writer().line();
    ctx.open_tag(node, tag, attrs);
    if inner_lines {
        ctx.writer().line();
    }
    ctx.render_children(node)?;
    if inner_lines {
        ctx.writer().line();
    }
    ctx.writer().close_tag(tag);
    ctx.writer().line();
    Ok(())
}

fn inline(
    ctx: &mut RenderContext<'_>,
    node: NodeRef<'_>,
    tag: &str,
    attrs: Attributes,
) -> Result<(), RenderError> {
    ctx.open_tag(node, tag, attrs);
    ctx.render_children(node)?;
    ctx.writer().close_tag(tag);
    Ok(())
}
