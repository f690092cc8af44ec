use crate::ast::{NodeKind, NodeRef, NodeType};
use crate::error::RenderError;
use crate::registry::{NodeRenderer, RenderContext};
use crate::writer::Attributes;

/// Renders a task-list marker as a disabled checkbox.
pub(crate) struct TaskListMarkerRenderer;

impl NodeRenderer for TaskListMarkerRenderer {
    fn node_types(&self) -> &'static [NodeType] {
        &[NodeType::TaskListMarker]
    }

    fn render(&self, node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let mut attrs = Attributes::new()
            .with("type", "checkbox")
            .with("disabled", "");
        if matches!(node.kind(), NodeKind::TaskListMarker { checked: true }) {
            attrs.insert("checked", "");
        }
        ctx.open_tag(node, "input", attrs);
        ctx.writer().raw(" ");
        Ok(())
    }
}
