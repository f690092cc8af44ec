//! Image attribute blocks: `![alt](src){width=640 height=480}`.

use crate::ast::{NodeKind, NodeRef};
use crate::registry::AttributeProvider;
use crate::writer::Attributes;

/// Attribute keys accepted inside `{...}`.
const SUPPORTED: [&str; 2] = ["width", "height"];

/// Parse a leading `{key=value ...}` block.
///
/// Returns the attributes and the byte length of the block. Returns `None`
/// if the text does not start with a well-formed block containing only
/// supported keys, in which case the text stays literal.
pub(crate) fn parse_attribute_block(text: &str) -> Option<(Vec<(String, String)>, usize)> {
    let inner = text.strip_prefix('{')?;
    let close = inner.find('}')?;

    let mut attrs: Vec<(String, String)> = Vec::new();
    for part in inner[..close].split_whitespace() {
        let (key, value) = part.split_once('=')?;
        let value = value.trim_matches('"');
        if !SUPPORTED.contains(&key) || value.is_empty() {
            return None;
        }
        match attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => value.clone_into(existing),
            None => attrs.push((key.to_owned(), value.to_owned())),
        }
    }

    if attrs.is_empty() {
        return None;
    }
    Some((attrs, close + 2))
}

/// Adds parsed image attributes to the `img` tag.
pub(crate) struct ImageAttributeProvider;

impl AttributeProvider for ImageAttributeProvider {
    fn set_attributes(&self, node: NodeRef<'_>, tag: &str, attrs: &mut Attributes) {
        if tag != "img" {
            return;
        }
        if let NodeKind::Image { attributes, .. } = node.kind() {
            for (key, value) in attributes {
                attrs.insert(key.as_str(), value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(attrs: &[(String, String)]) -> Vec<(&str, &str)> {
        attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_parse_width_and_height() {
        let (attrs, len) = parse_attribute_block("{width=640 height=480}").unwrap();
        assert_eq!(pairs(&attrs), vec![("width", "640"), ("height", "480")]);
        assert_eq!(len, "{width=640 height=480}".len());
    }

    #[test]
    fn test_parse_leaves_trailing_text() {
        let text = "{width=10} caption";
        let (_, len) = parse_attribute_block(text).unwrap();
        assert_eq!(&text[len..], " caption");
    }

    #[test]
    fn test_parse_quoted_value() {
        let (attrs, _) = parse_attribute_block(r#"{height="50%"}"#).unwrap();
        assert_eq!(pairs(&attrs), vec![("height", "50%")]);
    }

    #[test]
    fn test_parse_repeated_key_keeps_last() {
        let (attrs, _) = parse_attribute_block("{width=1 width=2}").unwrap();
        assert_eq!(pairs(&attrs), vec![("width", "2")]);
    }

    #[test]
    fn test_parse_rejects_unsupported_key() {
        assert!(parse_attribute_block("{width=1 style=red}").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_attribute_block("{width}").is_none());
        assert!(parse_attribute_block("{width=}").is_none());
        assert!(parse_attribute_block("{}").is_none());
        assert!(parse_attribute_block("{width=1").is_none());
        assert!(parse_attribute_block(" {width=1}").is_none());
    }
}
