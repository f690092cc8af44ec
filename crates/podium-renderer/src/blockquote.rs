//! Blockquotes as quote figures with an optional author.
//!
//! `> Some quote~Author Name` renders as
//!
//! ```html
//! <figure class="text-end mb-5 mt-5">
//! <blockquote class="blockquote">Some quote</blockquote>
//! <figcaption class="blockquote-footer">Author Name</figcaption>
//! </figure>
//! ```
//!
//! Only the plain text directly inside the first block of the quote is used.
//! Quotes spanning several paragraphs are not supported: later paragraphs are
//! ignored.

use crate::ast::{NodeKind, NodeRef, NodeType};
use crate::error::RenderError;
use crate::registry::{NodeRenderer, RenderContext};
use crate::writer::Attributes;

const AUTHOR_SEPARATOR: char = '~';

/// Blockquote override producing a `figure` with quote and caption.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuoteRenderer;

impl NodeRenderer for QuoteRenderer {
    fn node_types(&self) -> &'static [NodeType] {
        &[NodeType::BlockQuote]
    }

    fn render(&self, node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let content = collect_content(node);
        let (quote, author) = split_quote(&content)?;

        ctx.writer().line();
        ctx.open_tag(
            node,
            "figure",
            Attributes::new().with("class", "text-end mb-5 mt-5"),
        );
        ctx.writer().line();
        ctx.open_tag(
            node,
            "blockquote",
            Attributes::new().with("class", "blockquote"),
        );
        ctx.writer().text(quote);
        ctx.writer().close_tag("blockquote");
        ctx.writer().line();
        if let Some(author) = author {
            ctx.open_tag(
                node,
                "figcaption",
                Attributes::new().with("class", "blockquote-footer"),
            );
            ctx.writer().text(author);
            ctx.writer().close_tag("figcaption");
            ctx.writer().line();
        }
        ctx.writer().close_tag("figure");
        ctx.writer().line();
        Ok(())
    }
}

/// Concatenate the `Text` children of the quote's first block.
///
/// A space goes before every fragment except the first and the one that ends
/// the block, which is where soft line breaks sit in `a\n> b\n> ~c`.
fn collect_content(quote: NodeRef<'_>) -> String {
    let mut content = String::new();
    let Some(first) = quote.first_child() else {
        return content;
    };
    for child in first.children() {
        if let NodeKind::Text(text) = child.kind() {
            if !content.is_empty() && !child.is_last_child() {
                content.push(' ');
            }
            content.push_str(text);
        }
    }
    content
}

/// Split into quote and optional author.
///
/// Trailing empty parts are dropped, so `quote~` is a quote without author.
fn split_quote(content: &str) -> Result<(&str, Option<&str>), RenderError> {
    let mut parts: Vec<&str> = content.split(AUTHOR_SEPARATOR).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }

    match parts.as_slice() {
        [] => Ok(("", None)),
        [quote] => Ok((*quote, None)),
        [quote, author] => Ok((*quote, Some(*author))),
        _ => {
            tracing::warn!(fragments = parts.len(), "Malformed blockquote attribution");
            Err(RenderError::MalformedQuote {
                fragments: parts.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extension::Extensions;
    use crate::parser::Parser;
    use crate::registry::RendererRegistry;

    fn render(markdown: &str) -> Result<String, RenderError> {
        let registry = RendererRegistry::new(&Extensions::default()).with_renderer(QuoteRenderer);
        registry.render(&Parser::default().parse(markdown))
    }

    #[test]
    fn test_quote_without_caption() {
        assert_eq!(
            render(">I am a quote").unwrap(),
            "<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\">I am a quote</blockquote>\n\
</figure>\n"
        );
    }

    #[test]
    fn test_quote_with_caption() {
        assert_eq!(
            render(">I am a quote~author").unwrap(),
            "<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\">I am a quote</blockquote>\n\
<figcaption class=\"blockquote-footer\">author</figcaption>\n\
</figure>\n"
        );
    }

    #[test]
    fn test_quote_with_line_breaks() {
        assert_eq!(
            render(">I am a quote\n> test\n> ~author").unwrap(),
            "<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\">I am a quote test</blockquote>\n\
<figcaption class=\"blockquote-footer\">author</figcaption>\n\
</figure>\n"
        );
    }

    #[test]
    fn test_quote_text_is_escaped() {
        let html = render(">a < b~\"me\"").unwrap();
        assert!(html.contains("<blockquote class=\"blockquote\">a &lt; b</blockquote>"));
        assert!(html.contains("<figcaption class=\"blockquote-footer\">&quot;me&quot;</figcaption>"));
    }

    #[test]
    fn test_trailing_separator_drops_caption() {
        let html = render(">quote~").unwrap();
        assert!(!html.contains("figcaption"));
        assert!(html.contains(">quote</blockquote>"));
    }

    #[test]
    fn test_too_many_separators_fails() {
        let err = render(">a~b~c").unwrap_err();
        assert!(matches!(err, RenderError::MalformedQuote { fragments: 3 }));
        assert!(err.to_string().starts_with(
            "Blockquote content must be in the format: \"quote~author\" or \"quote\""
        ));
    }

    #[test]
    fn test_empty_quote() {
        assert_eq!(
            render(">").unwrap(),
            "<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\"></blockquote>\n\
</figure>\n"
        );
    }

    #[test]
    fn test_multi_paragraph_quote_uses_first_block() {
        assert_eq!(
            render(">a\n>\n>b~c~d").unwrap(),
            "<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\">a</blockquote>\n\
</figure>\n"
        );
    }

    #[test]
    fn test_surrounding_blocks_keep_layout() {
        assert_eq!(
            render("# Title\n\n>q~a\n\ntext").unwrap(),
            "<h1>Title</h1>\n\
<figure class=\"text-end mb-5 mt-5\">\n\
<blockquote class=\"blockquote\">q</blockquote>\n\
<figcaption class=\"blockquote-footer\">a</figcaption>\n\
</figure>\n\
<p>text</p>\n"
        );
    }

    #[test]
    fn test_split_quote() {
        assert_eq!(split_quote("q~a").unwrap(), ("q", Some("a")));
        assert_eq!(split_quote("q").unwrap(), ("q", None));
        assert_eq!(split_quote("~a").unwrap(), ("", Some("a")));
        assert_eq!(split_quote("q~~").unwrap(), ("q", None));
        assert_eq!(split_quote("").unwrap(), ("", None));
        assert!(split_quote("a~~b").is_err());
    }
}
