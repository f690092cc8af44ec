//! Grammar extensions shared by the parser and the renderer registry.
//!
//! Parser and registry must be built from the same [`Extensions`] value:
//! a table parsed without the table renderer installed would fall back to
//! rendering bare cell contents.

use pulldown_cmark::Options;

use crate::image_attributes::ImageAttributeProvider;
use crate::registry::{AttributeProvider, NodeRenderer};
use crate::table::TableRenderer;
use crate::task_list::TaskListMarkerRenderer;

/// A single grammar extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
    /// GFM pipe tables with an alignment row.
    Tables,
    /// `- [ ]` / `- [x]` list items.
    TaskListItems,
    /// `![alt](src){width=.. height=..}`.
    ImageAttributes,
}

impl Extension {
    fn parser_options(self) -> Options {
        match self {
            Self::Tables => Options::ENABLE_TABLES,
            Self::TaskListItems => Options::ENABLE_TASKLISTS,
            // Handled as a tree post-pass, no parser flag involved.
            Self::ImageAttributes => Options::empty(),
        }
    }

    fn node_renderers(self) -> Vec<Box<dyn NodeRenderer>> {
        match self {
            Self::Tables => vec![Box::new(TableRenderer)],
            Self::TaskListItems => vec![Box::new(TaskListMarkerRenderer)],
            Self::ImageAttributes => Vec::new(),
        }
    }

    fn attribute_providers(self) -> Vec<Box<dyn AttributeProvider>> {
        match self {
            Self::ImageAttributes => vec![Box::new(ImageAttributeProvider)],
            Self::Tables | Self::TaskListItems => Vec::new(),
        }
    }
}

/// Ordered, immutable set of active extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    /// Build from an explicit list. Duplicates are dropped, order is kept.
    #[must_use]
    pub fn new(extensions: impl IntoIterator<Item = Extension>) -> Self {
        let mut list = Vec::new();
        for extension in extensions {
            if !list.contains(&extension) {
                list.push(extension);
            }
        }
        Self(list)
    }

    /// No extensions: plain CommonMark.
    #[must_use]
    pub fn none() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn contains(&self, extension: Extension) -> bool {
        self.0.contains(&extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = Extension> + '_ {
        self.0.iter().copied()
    }

    /// Parser options for the active extensions.
    ///
    /// Strikethrough is never enabled: `~` must stay literal text for the
    /// blockquote attribution convention.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        self.iter()
            .fold(Options::empty(), |options, ext| options | ext.parser_options())
    }

    pub(crate) fn node_renderers(&self) -> impl Iterator<Item = Box<dyn NodeRenderer>> + '_ {
        self.iter().flat_map(Extension::node_renderers)
    }

    pub(crate) fn attribute_providers(
        &self,
    ) -> impl Iterator<Item = Box<dyn AttributeProvider>> + '_ {
        self.iter().flat_map(Extension::attribute_providers)
    }
}

impl Default for Extensions {
    /// Tables, task-list items and image attributes, in that order.
    fn default() -> Self {
        Self::new([
            Extension::Tables,
            Extension::TaskListItems,
            Extension::ImageAttributes,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let extensions = Extensions::default();
        assert_eq!(
            extensions.iter().collect::<Vec<_>>(),
            vec![
                Extension::Tables,
                Extension::TaskListItems,
                Extension::ImageAttributes
            ]
        );
    }

    #[test]
    fn test_parser_options() {
        let options = Extensions::default().parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(!options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(!options.contains(Options::ENABLE_GFM));
    }

    #[test]
    fn test_parser_options_none() {
        assert_eq!(Extensions::none().parser_options(), Options::empty());
    }

    #[test]
    fn test_duplicates_dropped() {
        let extensions = Extensions::new([Extension::Tables, Extension::Tables]);
        assert_eq!(extensions.iter().count(), 1);
        assert!(extensions.contains(Extension::Tables));
        assert!(!extensions.contains(Extension::ImageAttributes));
    }

    #[test]
    fn test_contributions() {
        let extensions = Extensions::default();
        assert_eq!(extensions.node_renderers().count(), 2);
        assert_eq!(extensions.attribute_providers().count(), 1);
    }
}
