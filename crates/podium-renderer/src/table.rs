//! Table rendering and table styling attributes.

use crate::ast::{Alignment, NodeKind, NodeRef, NodeType};
use crate::commonmark::block;
use crate::error::RenderError;
use crate::registry::{AttributeProvider, NodeRenderer, RenderContext};
use crate::writer::Attributes;

/// Renders table nodes as `<table>`, `<thead>`, `<tbody>`, `<tr>` and cells.
pub(crate) struct TableRenderer;

impl NodeRenderer for TableRenderer {
    fn node_types(&self) -> &'static [NodeType] {
        &[
            NodeType::Table,
            NodeType::TableHead,
            NodeType::TableBody,
            NodeType::TableRow,
            NodeType::TableCell,
        ]
    }

    fn render(&self, node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        match node.kind() {
            NodeKind::Table => block(ctx, node, "table", Attributes::new(), false),
            NodeKind::TableHead => block(ctx, node, "thead", Attributes::new(), false),
            NodeKind::TableBody => block(ctx, node, "tbody", Attributes::new(), false),
            NodeKind::TableRow => block(ctx, node, "tr", Attributes::new(), false),
            NodeKind::TableCell { alignment, header } => {
                let tag = if *header { "th" } else { "td" };
                let mut attrs = Attributes::new();
                if let Some(align) = alignment.as_attr() {
                    attrs.insert("align", align);
                }
                block(ctx, node, tag, attrs, false)
            }
            _ => ctx.render_children(node),
        }
    }
}

/// Styles tables with Bootstrap classes.
///
/// - `table`: `table table-responsive align-middle`
/// - `tbody`: `table-group-divider`
/// - `th` inside the table head: `scope="col"` plus a text alignment class
///   that replaces any existing class.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableAttributeProvider;

impl AttributeProvider for TableAttributeProvider {
    fn set_attributes(&self, node: NodeRef<'_>, tag: &str, attrs: &mut Attributes) {
        match node.kind() {
            NodeKind::Table => attrs.insert("class", "table table-responsive align-middle"),
            NodeKind::TableBody => attrs.insert("class", "table-group-divider"),
            NodeKind::TableCell { alignment, .. } if tag == "th" && in_table_head(node) => {
                attrs.insert("scope", "col");
                let class = match alignment {
                    Alignment::Center => "text-center",
                    Alignment::Right => "text-end",
                    Alignment::Left | Alignment::None => "text-start",
                };
                attrs.insert("class", class);
            }
            _ => {}
        }
    }
}

/// Cell -> row -> head.
fn in_table_head(cell: NodeRef<'_>) -> bool {
    cell.parent()
        .and_then(NodeRef::parent)
        .is_some_and(|grandparent| matches!(grandparent.kind(), NodeKind::TableHead))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extension::Extensions;
    use crate::parser::Parser;
    use crate::registry::RendererRegistry;

    fn render(markdown: &str, styled: bool) -> String {
        let mut registry = RendererRegistry::new(&Extensions::default());
        if styled {
            registry = registry.with_attribute_provider(TableAttributeProvider);
        }
        registry.render(&Parser::default().parse(markdown)).unwrap()
    }

    #[test]
    fn test_plain_table() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |", false);
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n<th>A</th>\n<th>B</th>\n</tr>\n</thead>\n\
<tbody>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_styled_table() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |", true);
        assert_eq!(
            html,
            "<table class=\"table table-responsive align-middle\">\n<thead>\n<tr>\n\
<th scope=\"col\" class=\"text-start\">A</th>\n\
<th scope=\"col\" class=\"text-start\">B</th>\n</tr>\n</thead>\n\
<tbody class=\"table-group-divider\">\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_header_alignment_classes() {
        let html = render(
            "| L | C | R | N |\n|:--|:-:|--:|---|\n| 1 | 2 | 3 | 4 |",
            true,
        );
        assert!(html.contains("<th align=\"left\" scope=\"col\" class=\"text-start\">L</th>"));
        assert!(html.contains("<th align=\"center\" scope=\"col\" class=\"text-center\">C</th>"));
        assert!(html.contains("<th align=\"right\" scope=\"col\" class=\"text-end\">R</th>"));
        assert!(html.contains("<th scope=\"col\" class=\"text-start\">N</th>"));
        // Body cells keep their alignment but get no header styling.
        assert!(html.contains("<td align=\"center\">2</td>"));
        assert!(html.contains("<td align=\"right\">3</td>"));
    }

    #[test]
    fn test_header_only_table() {
        let html = render("| A |\n|---|", true);
        assert_eq!(
            html,
            "<table class=\"table table-responsive align-middle\">\n<thead>\n<tr>\n\
<th scope=\"col\" class=\"text-start\">A</th>\n</tr>\n</thead>\n</table>\n"
        );
    }

    #[test]
    fn test_inline_content_in_cells() {
        let html = render("| **A** |\n|---|\n| `x` |", false);
        assert!(html.contains("<th><strong>A</strong></th>"));
        assert!(html.contains("<td><code>x</code></td>"));
    }

    struct RedCells;

    impl AttributeProvider for RedCells {
        fn set_attributes(&self, _node: NodeRef<'_>, tag: &str, attrs: &mut Attributes) {
            if tag == "th" {
                attrs.insert("class", "red");
            }
        }
    }

    #[test]
    fn test_header_class_overwrites_existing() {
        let registry = RendererRegistry::new(&Extensions::default())
            .with_attribute_provider(RedCells)
            .with_attribute_provider(TableAttributeProvider);
        let html = registry
            .render(&Parser::default().parse("| A |\n|--:|"))
            .unwrap();
        assert!(html.contains("<th align=\"right\" class=\"text-end\" scope=\"col\">A</th>"));
    }
}
