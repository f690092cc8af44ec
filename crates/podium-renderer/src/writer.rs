//! HTML output buffer with the block-per-line layout.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Ordered HTML attribute list.
///
/// Re-inserting an existing key replaces its value in place, so attribute
/// order in the output follows first insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// HTML output buffer.
///
/// Block renderers call [`line`](Self::line) before an opening tag and after
/// a closing tag; inline content is written without separators.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    buffer: String,
}

impl HtmlWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
        }
    }

    /// Write pre-rendered markup verbatim.
    pub fn raw(&mut self, html: &str) {
        self.buffer.push_str(html);
    }

    /// Write escaped text.
    pub fn text(&mut self, text: &str) {
        self.buffer.push_str(&escape_html(text));
    }

    /// Write an opening tag.
    pub fn tag(&mut self, name: &str, attrs: &Attributes) {
        self.open(name, attrs);
        self.buffer.push('>');
    }

    /// Write a void element such as `<img ... />`.
    pub fn void_tag(&mut self, name: &str, attrs: &Attributes) {
        self.open(name, attrs);
        self.buffer.push_str(" />");
    }

    /// Write a closing tag.
    pub fn close_tag(&mut self, name: &str) {
        write!(self.buffer, "</{name}>").unwrap();
    }

    /// Start a new line unless the output is empty or already ends with one.
    pub fn line(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    fn open(&mut self, name: &str, attrs: &Attributes) {
        write!(self.buffer, "<{name}").unwrap();
        for (key, value) in attrs.iter() {
            write!(self.buffer, r#" {key}="{}""#, escape_html(value)).unwrap();
        }
    }
}

/// Escape `&`, `<`, `>` and `"` for text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Characters left verbatim in link and image destinations.
const URL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// Percent-encode characters that are not allowed verbatim in a URL.
///
/// Reserved and unreserved characters pass through, as do existing `%XX`
/// escapes. A `%` not starting an escape becomes `%25`.
#[must_use]
pub fn encode_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(pos) = rest.find('%') {
        result.extend(utf8_percent_encode(&rest[..pos], URL_ENCODE_SET));
        let escape = rest.as_bytes().get(pos + 1..pos + 3);
        if escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            result.push_str(&rest[pos..pos + 3]);
            rest = &rest[pos + 3..];
        } else {
            result.push_str("%25");
            rest = &rest[pos + 1..];
        }
    }
    result.extend(utf8_percent_encode(rest, URL_ENCODE_SET));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn test_encode_url_passthrough() {
        assert_eq!(
            encode_url("https://www.example.com/a?b=c&d=e#f"),
            "https://www.example.com/a?b=c&d=e#f"
        );
    }

    #[test]
    fn test_encode_url_space_and_unicode() {
        assert_eq!(encode_url("/my image.png"), "/my%20image.png");
        assert_eq!(encode_url("/ä"), "/%C3%A4");
    }

    #[test]
    fn test_encode_url_keeps_existing_escapes() {
        assert_eq!(encode_url("/a%20b"), "/a%20b");
        assert_eq!(encode_url("/100%"), "/100%25");
        assert_eq!(encode_url("/%zz"), "/%25zz");
    }

    #[test]
    fn test_attributes_overwrite_keeps_position() {
        let mut attrs = Attributes::new().with("align", "center").with("class", "a");
        attrs.insert("align", "right");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("align", "right"), ("class", "a")]);
        assert_eq!(attrs.get("class"), Some("a"));
        assert_eq!(attrs.get("scope"), None);
    }

    #[test]
    fn test_tag_with_attributes() {
        let mut writer = HtmlWriter::new();
        let attrs: Attributes = [("scope", "col"), ("class", "x\"y")].into_iter().collect();
        writer.tag("th", &attrs);
        writer.text("a < b");
        writer.close_tag("th");
        assert_eq!(
            writer.as_str(),
            r#"<th scope="col" class="x&quot;y">a &lt; b</th>"#
        );
    }

    #[test]
    fn test_void_tag() {
        let mut writer = HtmlWriter::new();
        writer.void_tag("hr", &Attributes::new());
        assert_eq!(writer.into_string(), "<hr />");
    }

    #[test]
    fn test_line_is_idempotent() {
        let mut writer = HtmlWriter::new();
        writer.line();
        assert_eq!(writer.as_str(), "");
        writer.raw("<p>");
        writer.line();
        writer.line();
        assert_eq!(writer.as_str(), "<p>\n");
    }
}
