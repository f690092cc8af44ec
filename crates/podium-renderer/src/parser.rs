//! Markdown text to [`Document`] conversion.
//!
//! `pulldown-cmark` does the CommonMark and extension grammar work; this
//! module folds its event stream into the arena tree:
//!
//! - adjacent text events are merged into one `Text` node
//! - table heads get an explicit row, and body rows a `TableBody` container
//! - task-list markers become the first child of their list item
//! - image attribute blocks are lifted out of the following text

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Tag, TagEnd};

use crate::ast::{Alignment, Document, NodeId, NodeKind};
use crate::extension::{Extension, Extensions};
use crate::image_attributes::parse_attribute_block;

/// Markdown parser configured with a fixed extension set.
#[derive(Clone, Debug)]
pub struct Parser {
    extensions: Extensions,
}

impl Parser {
    #[must_use]
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Parse markdown text into a document.
    ///
    /// Never fails: unrecognized syntax degrades to text.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> Document {
        let events = pulldown_cmark::Parser::new_ext(markdown, self.extensions.parser_options());
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.event(event);
        }
        let mut doc = builder.finish();
        if self.extensions.contains(Extension::ImageAttributes) {
            lift_image_attributes(&mut doc);
        }
        doc
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Extensions::default())
    }
}

/// Builds the arena tree from parser events.
struct TreeBuilder {
    doc: Document,
    /// Open containers, innermost last.
    stack: Vec<NodeId>,
    /// Column alignments of the table being built.
    alignments: Vec<Alignment>,
}

impl TreeBuilder {
    fn new() -> Self {
        let doc = Document::new();
        let root = doc.root_id();
        Self {
            doc,
            stack: vec![root],
            alignments: Vec::new(),
        }
    }

    fn finish(self) -> Document {
        self.doc
    }

    fn current(&self) -> NodeId {
        // The root is never popped.
        self.stack[self.stack.len() - 1]
    }

    fn event(&mut self, event: pulldown_cmark::Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.leaf(NodeKind::Code(code.into_string())),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.leaf(NodeKind::HtmlInline(html.into_string())),
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.leaf(NodeKind::HardBreak),
            Event::Rule => self.leaf(NodeKind::ThematicBreak),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled
            }
        }
    }

    fn open(&mut self, kind: NodeKind) {
        let parent = self.current();
        let id = self.doc.append(parent, kind);
        self.stack.push(id);
    }

    fn leaf(&mut self, kind: NodeKind) {
        let parent = self.current();
        self.doc.append(parent, kind);
    }

    fn close(&mut self) -> Option<NodeId> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(NodeKind::Paragraph),
            Tag::Heading { level, .. } => self.open(NodeKind::Heading {
                level: heading_level_to_num(level),
            }),
            Tag::BlockQuote(_) => self.open(NodeKind::BlockQuote),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => Some(info.into_string()),
                    CodeBlockKind::Indented => None,
                };
                self.open(NodeKind::CodeBlock {
                    info,
                    literal: String::new(),
                });
            }
            Tag::HtmlBlock => self.open(NodeKind::HtmlBlock {
                literal: String::new(),
            }),
            Tag::List(start) => self.open(NodeKind::List { start, tight: true }),
            Tag::Item => self.open(NodeKind::ListItem),
            Tag::Table(alignments) => {
                self.alignments = alignments.into_iter().map(Alignment::from).collect();
                self.open(NodeKind::Table);
            }
            Tag::TableHead => {
                self.open(NodeKind::TableHead);
                self.open(NodeKind::TableRow);
            }
            Tag::TableRow => {
                if matches!(self.doc.get(self.current()).kind(), NodeKind::Table) {
                    self.open(NodeKind::TableBody);
                }
                self.open(NodeKind::TableRow);
            }
            Tag::TableCell => {
                let row = self.current();
                let index = self.doc.child_ids(row).len();
                let header = self
                    .doc
                    .get(row)
                    .parent()
                    .is_some_and(|p| matches!(p.kind(), NodeKind::TableHead));
                let alignment = self.alignments.get(index).copied().unwrap_or_default();
                self.open(NodeKind::TableCell { alignment, header });
            }
            Tag::Emphasis => self.open(NodeKind::Emphasis),
            Tag::Strong => self.open(NodeKind::Strong),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let destination = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.into_string()
                };
                self.open(NodeKind::Link {
                    destination,
                    title: title.into_string(),
                });
            }
            Tag::Image {
                dest_url, title, ..
            } => self.open(NodeKind::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
                attributes: Vec::new(),
            }),
            Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => {
                // Not enabled. Re-enter the current container so the
                // matching end tag keeps the stack balanced.
                let current = self.current();
                self.stack.push(current);
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::TableHead => {
                self.close(); // row
                self.close(); // head
            }
            TagEnd::Table => {
                if matches!(self.doc.get(self.current()).kind(), NodeKind::TableBody) {
                    self.close();
                }
                self.close();
                self.alignments.clear();
            }
            TagEnd::List(_) => {
                if let Some(list) = self.close() {
                    self.mark_tightness(list);
                }
            }
            TagEnd::CodeBlock => {
                // Code block content always ends with a newline, even at end
                // of input.
                let current = self.current();
                if let NodeKind::CodeBlock { literal, .. } = self.doc.kind_mut(current)
                    && !literal.is_empty()
                    && !literal.ends_with('\n')
                {
                    literal.push('\n');
                }
                self.close();
            }
            _ => {
                self.close();
            }
        }
    }

    /// A list is loose when any item holds a paragraph; the event stream
    /// only emits paragraphs inside items of loose lists.
    fn mark_tightness(&mut self, list: NodeId) {
        let loose = self.doc.get(list).children().any(|item| {
            item.children()
                .any(|child| matches!(child.kind(), NodeKind::Paragraph))
        });
        if let NodeKind::List { tight, .. } = self.doc.kind_mut(list) {
            *tight = !loose;
        }
    }

    fn text(&mut self, text: &str) {
        let current = self.current();
        if let NodeKind::CodeBlock { literal, .. } = self.doc.kind_mut(current) {
            literal.push_str(text);
            return;
        }
        if let Some(last) = self.doc.last_child_id(current)
            && let NodeKind::Text(existing) = self.doc.kind_mut(last)
        {
            existing.push_str(text);
            return;
        }
        self.doc.append(current, NodeKind::Text(text.to_owned()));
    }

    fn html(&mut self, html: &str) {
        let current = self.current();
        if let NodeKind::HtmlBlock { literal } = self.doc.kind_mut(current) {
            literal.push_str(html);
        } else {
            self.doc
                .append(current, NodeKind::HtmlInline(html.to_owned()));
        }
    }

    /// Attach the checkbox to the enclosing list item, ahead of its content.
    fn task_list_marker(&mut self, checked: bool) {
        let item = self
            .stack
            .iter()
            .rev()
            .copied()
            .find(|&id| matches!(self.doc.get(id).kind(), NodeKind::ListItem));
        match item {
            Some(item) => {
                self.doc.prepend(item, NodeKind::TaskListMarker { checked });
            }
            None => self.leaf(NodeKind::TaskListMarker { checked }),
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Move `{width=.. height=..}` blocks that directly follow an image into
/// the image node.
fn lift_image_attributes(doc: &mut Document) {
    let mut candidates = Vec::new();
    collect_image_candidates(doc, doc.root_id(), &mut candidates);

    for (image, text) in candidates {
        let NodeKind::Text(literal) = doc.get(text).kind() else {
            continue;
        };
        let Some((attrs, consumed)) = parse_attribute_block(literal) else {
            continue;
        };
        let rest = literal[consumed..].to_owned();

        if let NodeKind::Image { attributes, .. } = doc.kind_mut(image) {
            *attributes = attrs;
        }
        if rest.is_empty() {
            doc.detach(text);
        } else if let NodeKind::Text(literal) = doc.kind_mut(text) {
            *literal = rest;
        }
    }
}

fn collect_image_candidates(doc: &Document, parent: NodeId, out: &mut Vec<(NodeId, NodeId)>) {
    let children = doc.child_ids(parent);
    for (i, &child) in children.iter().enumerate() {
        let node = doc.get(child);
        if matches!(node.kind(), NodeKind::Image { .. })
            && let Some(&next) = children.get(i + 1)
            && matches!(doc.get(next).kind(), NodeKind::Text(t) if t.starts_with('{'))
        {
            out.push((child, next));
        }
        collect_image_candidates(doc, child, out);
    }
}
