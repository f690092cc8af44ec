//! Markdown syntax tree.
//!
//! The tree is stored in an arena owned by [`Document`]. Nodes reference their
//! children and their parent by [`NodeId`], so walking up the ancestry (e.g.
//! from a table cell to its table head) never needs shared ownership.
//!
//! A [`Document`] is immutable once [`Parser::parse`](crate::Parser::parse)
//! returns it. Renderers only ever see [`NodeRef`] cursors.

/// Index of a node inside its [`Document`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Column alignment taken from a table separator row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// No colon in the separator row.
    #[default]
    None,
    /// `:---`
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

impl Alignment {
    /// Value for the HTML `align` attribute, if any.
    #[must_use]
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    List {
        /// Start number for ordered lists, `None` for bullet lists.
        start: Option<u64>,
        /// Tight lists render their items without `<p>` wrappers.
        tight: bool,
    },
    ListItem,
    BlockQuote,
    ThematicBreak,
    CodeBlock {
        /// Fence info string (`rust ignore`), `None` for indented blocks.
        info: Option<String>,
        literal: String,
    },
    HtmlBlock {
        literal: String,
    },
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell {
        alignment: Alignment,
        header: bool,
    },
    TaskListMarker {
        checked: bool,
    },
    Text(String),
    SoftBreak,
    HardBreak,
    Emphasis,
    Strong,
    Code(String),
    HtmlInline(String),
    Link {
        destination: String,
        title: String,
    },
    Image {
        destination: String,
        title: String,
        /// Attributes from a trailing `{width=.. height=..}` block.
        attributes: Vec<(String, String)>,
    },
}

/// Payload-free discriminant of [`NodeKind`], used as the renderer dispatch key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Heading,
    Paragraph,
    List,
    ListItem,
    BlockQuote,
    ThematicBreak,
    CodeBlock,
    HtmlBlock,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,
    TaskListMarker,
    Text,
    SoftBreak,
    HardBreak,
    Emphasis,
    Strong,
    Code,
    HtmlInline,
    Link,
    Image,
}

impl NodeKind {
    /// Dispatch key for this node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Heading { .. } => NodeType::Heading,
            Self::Paragraph => NodeType::Paragraph,
            Self::List { .. } => NodeType::List,
            Self::ListItem => NodeType::ListItem,
            Self::BlockQuote => NodeType::BlockQuote,
            Self::ThematicBreak => NodeType::ThematicBreak,
            Self::CodeBlock { .. } => NodeType::CodeBlock,
            Self::HtmlBlock { .. } => NodeType::HtmlBlock,
            Self::Table => NodeType::Table,
            Self::TableHead => NodeType::TableHead,
            Self::TableBody => NodeType::TableBody,
            Self::TableRow => NodeType::TableRow,
            Self::TableCell { .. } => NodeType::TableCell,
            Self::TaskListMarker { .. } => NodeType::TaskListMarker,
            Self::Text(_) => NodeType::Text,
            Self::SoftBreak => NodeType::SoftBreak,
            Self::HardBreak => NodeType::HardBreak,
            Self::Emphasis => NodeType::Emphasis,
            Self::Strong => NodeType::Strong,
            Self::Code(_) => NodeType::Code,
            Self::HtmlInline(_) => NodeType::HtmlInline,
            Self::Link { .. } => NodeType::Link,
            Self::Image { .. } => NodeType::Image,
        }
    }
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Parsed markdown document, owning every node of the tree.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The `Document` root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.get(Self::ROOT)
    }

    /// Cursor for a node id.
    ///
    /// Ids are only meaningful for the document that produced them.
    #[must_use]
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    pub(crate) fn root_id(&self) -> NodeId {
        Self::ROOT
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(parent, kind);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Insert a new node as the first child of `parent`.
    pub(crate) fn prepend(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(parent, kind);
        self.nodes[parent.0].children.insert(0, id);
        id
    }

    /// Unlink a node from its parent. The node stays in the arena but is
    /// no longer reachable from the root.
    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub(crate) fn last_child_id(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    pub(crate) fn child_ids(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn alloc(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }
}

/// Read-only cursor into a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> &'a NodeKind {
        &self.node().kind
    }

    #[must_use]
    pub fn node_type(self) -> NodeType {
        self.kind().node_type()
    }

    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.doc.get(id))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let doc = self.doc;
        self.node().children.iter().map(move |&id| doc.get(id))
    }

    #[must_use]
    pub fn first_child(self) -> Option<NodeRef<'a>> {
        self.node().children.first().map(|&id| self.doc.get(id))
    }

    #[must_use]
    pub fn next_sibling(self) -> Option<NodeRef<'a>> {
        let siblings = &self.doc.nodes[self.node().parent?.0].children;
        let position = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(position + 1).map(|&id| self.doc.get(id))
    }

    /// True when this node has no following sibling. The root counts as last.
    #[must_use]
    pub fn is_last_child(self) -> bool {
        self.next_sibling().is_none()
    }

    /// Literal content of text, code and raw HTML nodes.
    #[must_use]
    pub fn literal(self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) | NodeKind::Code(text) | NodeKind::HtmlInline(text) => {
                Some(text)
            }
            NodeKind::CodeBlock { literal, .. } | NodeKind::HtmlBlock { literal } => Some(literal),
            _ => None,
        }
    }

    /// Plain text of this subtree, as used for image `alt` attributes.
    ///
    /// Line breaks become `\n`; markup is dropped.
    #[must_use]
    pub fn plain_text(self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(self, out: &mut String) {
        match self.kind() {
            NodeKind::Text(text) | NodeKind::Code(text) => out.push_str(text),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.collect_plain_text(out);
                }
            }
        }
    }

    fn node(self) -> &'a Node {
        &self.doc.nodes[self.id.0]
    }
}
