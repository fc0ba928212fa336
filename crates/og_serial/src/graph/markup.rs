use core::fmt;
use core::str::FromStr;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// An error returned when markup text cannot be parsed, or a tree cannot be
/// written as text that parses back to the same tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarkupError {
    #[error("malformed markup: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("`{0}` is not a valid element or attribute name")]
    InvalidName(String),
    #[error("namespace prefix `{0}` is not declared")]
    UnboundPrefix(String),
    #[error("attribute `{name}` appears twice on `{element}`")]
    DuplicateAttribute { element: String, name: String },
    #[error("comment `{0}` contains `--` or ends with `-`")]
    InvalidComment(String),
    #[error("character {0:?} cannot appear in markup")]
    InvalidChar(char),
}

// -----------------------------------------------------------------------------
// Tree

/// A name/value attribute. Names are qualified (`prefix:local`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
    Comment(String),
}

/// A markup element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(MarkupNode::Element(child));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(MarkupNode::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterates over child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            MarkupNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text of direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                MarkupNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let mut element = Element::new(qualified(node, tag.namespace(), tag.name()));

        let inherited = node.parent_element();
        for ns in node.namespaces() {
            if ns.name() == Some("xml") {
                continue;
            }
            let declared_above = inherited.is_some_and(|p| {
                p.namespaces()
                    .any(|o| o.name() == ns.name() && o.uri() == ns.uri())
            });
            if declared_above {
                continue;
            }
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => String::from("xmlns"),
            };
            element.attributes.push(Attribute {
                name,
                value: ns.uri().into(),
            });
        }

        for attr in node.attributes() {
            element.attributes.push(Attribute {
                name: qualified(node, attr.namespace(), attr.name()),
                value: attr.value().into(),
            });
        }

        for child in node.children() {
            if child.is_element() {
                element.children.push(MarkupNode::Element(Element::from_node(child)));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    element.children.push(MarkupNode::Text(text.into()));
                }
            } else if child.is_comment() {
                if let Some(text) = child.text() {
                    element.children.push(MarkupNode::Comment(text.into()));
                }
            }
        }

        element
    }

    /// Checks the subtree against the prefixes declared by its ancestors.
    fn check(&self, inherited: &[&str]) -> Result<(), MarkupError> {
        let mut scope = inherited.to_vec();
        scope.extend(
            self.attributes
                .iter()
                .filter_map(|a| a.name.strip_prefix("xmlns:")),
        );

        check_name(&self.name, &scope)?;
        for (index, attr) in self.attributes.iter().enumerate() {
            if let Some(prefix) = attr.name.strip_prefix("xmlns:") {
                if !is_ncname(prefix) {
                    return Err(MarkupError::InvalidName(attr.name.clone()));
                }
            } else if attr.name != "xmlns" {
                check_name(&attr.name, &scope)?;
            }
            check_chars(&attr.value)?;
            if self.attributes[..index].iter().any(|a| a.name == attr.name) {
                return Err(MarkupError::DuplicateAttribute {
                    element: self.name.clone(),
                    name: attr.name.clone(),
                });
            }
        }

        for child in &self.children {
            match child {
                MarkupNode::Element(e) => e.check(&scope)?,
                MarkupNode::Text(t) => check_chars(t)?,
                MarkupNode::Comment(c) => {
                    if c.contains("--") || c.ends_with('-') {
                        return Err(MarkupError::InvalidComment(c.clone()));
                    }
                    check_chars(c)?;
                }
            }
        }
        Ok(())
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attributes {
            write!(f, " {}=\"", attr.name)?;
            escape(f, &attr.value, true)?;
            f.write_str("\"")?;
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            match child {
                MarkupNode::Element(e) => e.write(f)?,
                MarkupNode::Text(t) => escape(f, t, false)?,
                MarkupNode::Comment(c) => write!(f, "<!--{c}-->")?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

fn qualified(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.into(),
    }
}

/// Checks a qualified name; its prefix, if any, must be in `scope`.
fn check_name(name: &str, scope: &[&str]) -> Result<(), MarkupError> {
    let invalid = || MarkupError::InvalidName(name.into());
    let (prefix, local) = match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    };
    if !is_ncname(local) || prefix.is_some_and(|p| !is_ncname(p)) {
        return Err(invalid());
    }
    match prefix {
        Some(prefix) if prefix != "xml" && !scope.contains(&prefix) => {
            Err(MarkupError::UnboundPrefix(prefix.into()))
        }
        _ => Ok(()),
    }
}

fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

fn check_chars(text: &str) -> Result<(), MarkupError> {
    let forbidden = |c: char| {
        (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
    };
    match text.chars().find(|&c| forbidden(c)) {
        Some(c) => Err(MarkupError::InvalidChar(c)),
        None => Ok(()),
    }
}

/// Escapes `text` so that the parser reads back exactly `text`.
///
/// Whitespace other than spaces is normalized inside attribute values, and a
/// bare carriage return is normalized everywhere, so those are written as
/// character references.
fn escape(f: &mut fmt::Formatter<'_>, text: &str, attribute: bool) -> fmt::Result {
    let mut last = 0;
    for (i, c) in text.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' if !attribute => "&gt;",
            '"' if attribute => "&quot;",
            '\n' if attribute => "&#10;",
            '\t' if attribute => "&#9;",
            '\r' => "&#13;",
            _ => continue,
        };
        f.write_str(&text[last..i])?;
        f.write_str(entity)?;
        last = i + c.len_utf8();
    }
    f.write_str(&text[last..])
}

// -----------------------------------------------------------------------------
// Markup

/// A structured markup document.
///
/// The textual form produced by [`Display`](fmt::Display) uses
/// double-quoted attributes and `<a/>` for empty elements, so such text
/// survives a parse/render round trip unchanged.
///
/// # Examples
///
/// ```
/// use og_serial::Markup;
///
/// let text = r#"<order id="7"><item sku="a1">two &amp; three</item><note/></order>"#;
/// let doc: Markup = text.parse().unwrap();
///
/// assert_eq!(doc.root().attribute("id"), Some("7"));
/// assert_eq!(doc.to_string(), text);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markup {
    root: Element,
}

impl Markup {
    #[inline]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parses a document. Content outside the root element is discarded.
    pub fn parse(text: &str) -> Result<Self, MarkupError> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self {
            root: Element::from_node(doc.root_element()),
        })
    }

    /// Checks that the textual form of this tree parses back to the same tree.
    ///
    /// Names must be valid and their prefixes declared, attributes unique per
    /// element, comments free of `--`, and no text may hold characters that
    /// markup cannot carry.
    ///
    /// # Examples
    ///
    /// ```
    /// use og_serial::{Element, Markup, MarkupError, MarkupNode};
    ///
    /// let mut doc = Markup::new(Element::new("note"));
    /// assert!(doc.validate().is_ok());
    ///
    /// doc.root_mut().children.push(MarkupNode::Comment("a--b".into()));
    /// assert!(matches!(doc.validate(), Err(MarkupError::InvalidComment(_))));
    /// ```
    pub fn validate(&self) -> Result<(), MarkupError> {
        self.root.check(&[])
    }

    #[inline]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write(f)
    }
}

impl FromStr for Markup {
    type Err = MarkupError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Element> for Markup {
    #[inline]
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Element, Markup, MarkupError, MarkupNode};

    #[test]
    fn render_built_tree() {
        let doc = Markup::new(
            Element::new("a")
                .with_attribute("q", "say \"hi\"")
                .with_child(Element::new("b"))
                .with_text("1 < 2"),
        );
        assert_eq!(doc.to_string(), r#"<a q="say &quot;hi&quot;"><b/>1 &lt; 2</a>"#);
    }

    #[test]
    fn round_trip_with_comments_and_namespaces() {
        let text = concat!(
            r#"<x:doc xmlns:x="urn:x" version="2">"#,
            "<!-- head --><x:item x:k=\"v\">text</x:item>",
            "</x:doc>"
        );
        let doc: Markup = text.parse().unwrap();
        assert_eq!(doc.root().name, "x:doc");
        assert!(matches!(doc.root().children[0], MarkupNode::Comment(_)));
        assert_eq!(doc.to_string(), text);
    }

    #[test]
    fn whitespace_in_attributes_survives() {
        let text = r#"<a x="1&#10;2&#9;3&#13;4"/>"#;
        let doc: Markup = text.parse().unwrap();
        assert_eq!(doc.root().attribute("x"), Some("1\n2\t3\r4"));
        assert_eq!(doc.to_string(), text);
    }

    #[test]
    fn carriage_return_in_text_survives() {
        let doc = Markup::new(Element::new("a").with_text("x\r\ny\rz"));
        let text = doc.to_string();
        assert_eq!(text, "<a>x&#13;\ny&#13;z</a>");
        assert_eq!(text.parse::<Markup>().unwrap(), doc);
    }

    #[test]
    fn validation() {
        let ok = Markup::new(
            Element::new("x:doc")
                .with_attribute("xmlns:x", "urn:x")
                .with_attribute("xml:lang", "en")
                .with_child(Element::new("x:item").with_attribute("x:k", "v")),
        );
        assert!(ok.validate().is_ok());

        let mut comment = Markup::new(Element::new("a"));
        comment.root_mut().children.push(MarkupNode::Comment("x--y".into()));
        assert!(matches!(comment.validate(), Err(MarkupError::InvalidComment(_))));

        let name = Markup::new(Element::new("1a"));
        assert!(matches!(name.validate(), Err(MarkupError::InvalidName(_))));

        let unbound = Markup::new(Element::new("a").with_child(Element::new("y:b")));
        assert!(matches!(unbound.validate(), Err(MarkupError::UnboundPrefix(p)) if p == "y"));

        let twice = Markup::new(Element::new("a").with_attribute("k", "1").with_attribute("k", "2"));
        assert!(matches!(twice.validate(), Err(MarkupError::DuplicateAttribute { .. })));

        let control = Markup::new(Element::new("a").with_text("bell\u{7}"));
        assert!(matches!(control.validate(), Err(MarkupError::InvalidChar('\u{7}'))));
    }

    #[test]
    fn rejects_garbage() {
        assert!("<open>".parse::<Markup>().is_err());
    }

    #[test]
    fn element_helpers() {
        let doc: Markup = "<r><a/>x<b/>y</r>".parse().unwrap();
        assert_eq!(doc.root().elements().count(), 2);
        assert_eq!(doc.root().text(), "xy");
    }
}
