//! Markdown syntax tree with per-node side data.
//!
//! The shape follows mdast, the same tree markdown-rs produces, but every
//! node also owns a [`Data`] bag so transforms can leave rendering hints for
//! the serializer. Node kinds the workspace has no use for are kept as
//! [`Other`] so no content is lost on conversion.

use crate::data::Data;

/// Document root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    /// Block children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// Block quote (`> ...`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blockquote {
    /// Block children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// Paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Inline children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// ATX or setext heading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heading {
    /// Inline children.
    pub children: Vec<Node>,
    /// Rank, 1 to 6.
    pub depth: u8,
    /// Rendering hints.
    pub data: Data,
}

/// Ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    /// List items.
    pub children: Vec<Node>,
    /// Whether the list is ordered.
    pub ordered: bool,
    /// Start number of an ordered list.
    pub start: Option<u32>,
    /// Whether items are separated by blank lines (loose list).
    pub spread: bool,
    /// Rendering hints.
    pub data: Data,
}

/// List item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    /// Block children.
    pub children: Vec<Node>,
    /// Whether the item contains blank lines between its children.
    pub spread: bool,
    /// GFM task state.
    pub checked: Option<bool>,
    /// Rendering hints.
    pub data: Data,
}

/// Fenced or indented code block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Code {
    /// Code content.
    pub value: String,
    /// Info string language.
    pub lang: Option<String>,
    /// Info string remainder.
    pub meta: Option<String>,
    /// Rendering hints.
    pub data: Data,
}

/// Raw HTML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Html {
    /// Raw markup.
    pub value: String,
    /// Rendering hints.
    pub data: Data,
}

/// Thematic break (`***`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThematicBreak {
    /// Rendering hints.
    pub data: Data,
}

/// Text run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    /// Literal text.
    pub value: String,
    /// Rendering hints.
    pub data: Data,
}

/// Strong importance (`**...**`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strong {
    /// Inline children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// Emphasis (`*...*`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emphasis {
    /// Inline children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// GFM strikethrough (`~~...~~`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    /// Inline children.
    pub children: Vec<Node>,
    /// Rendering hints.
    pub data: Data,
}

/// Code span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineCode {
    /// Code content.
    pub value: String,
    /// Rendering hints.
    pub data: Data,
}

/// Hard line break.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Break {
    /// Rendering hints.
    pub data: Data,
}

/// Hyperlink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    /// Inline children.
    pub children: Vec<Node>,
    /// Destination.
    pub url: String,
    /// Advisory title.
    pub title: Option<String>,
    /// Rendering hints.
    pub data: Data,
}

/// Image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    /// Source.
    pub url: String,
    /// Alternative text.
    pub alt: String,
    /// Advisory title.
    pub title: Option<String>,
    /// Rendering hints.
    pub data: Data,
}

/// Any node kind without a dedicated variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Other {
    /// mdast type name of the original node.
    pub kind: String,
    /// Converted children, if the original node had any.
    pub children: Vec<Node>,
    /// Literal value, for leaf nodes that carry one.
    pub value: Option<String>,
    /// Rendering hints.
    pub data: Data,
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document root.
    Root(Root),
    /// Block quote.
    Blockquote(Blockquote),
    /// Paragraph.
    Paragraph(Paragraph),
    /// Heading.
    Heading(Heading),
    /// List.
    List(List),
    /// List item.
    ListItem(ListItem),
    /// Code block.
    Code(Code),
    /// Raw HTML.
    Html(Html),
    /// Thematic break.
    ThematicBreak(ThematicBreak),
    /// Text run.
    Text(Text),
    /// Strong importance.
    Strong(Strong),
    /// Emphasis.
    Emphasis(Emphasis),
    /// Strikethrough.
    Delete(Delete),
    /// Code span.
    InlineCode(InlineCode),
    /// Hard line break.
    Break(Break),
    /// Hyperlink.
    Link(Link),
    /// Image.
    Image(Image),
    /// Unmodelled node kind.
    Other(Other),
}

impl Node {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            data: Data::default(),
        })
    }

    /// Creates a paragraph with the given inline children and data.
    pub fn paragraph(children: Vec<Node>, data: Data) -> Self {
        Node::Paragraph(Paragraph { children, data })
    }

    /// mdast type name of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Blockquote(_) => "blockquote",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Code(_) => "code",
            Node::Html(_) => "html",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::Text(_) => "text",
            Node::Strong(_) => "strong",
            Node::Emphasis(_) => "emphasis",
            Node::Delete(_) => "delete",
            Node::InlineCode(_) => "inlineCode",
            Node::Break(_) => "break",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::Other(other) => &other.kind,
        }
    }

    /// Child list of a parent node.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Other(n) => Some(&n.children),
            Node::Code(_)
            | Node::Html(_)
            | Node::ThematicBreak(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break(_)
            | Node::Image(_) => None,
        }
    }

    /// Mutable child list of a parent node.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Other(n) => Some(&mut n.children),
            Node::Code(_)
            | Node::Html(_)
            | Node::ThematicBreak(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break(_)
            | Node::Image(_) => None,
        }
    }

    /// Side-data bag of this node.
    pub fn data(&self) -> &Data {
        match self {
            Node::Root(n) => &n.data,
            Node::Blockquote(n) => &n.data,
            Node::Paragraph(n) => &n.data,
            Node::Heading(n) => &n.data,
            Node::List(n) => &n.data,
            Node::ListItem(n) => &n.data,
            Node::Code(n) => &n.data,
            Node::Html(n) => &n.data,
            Node::ThematicBreak(n) => &n.data,
            Node::Text(n) => &n.data,
            Node::Strong(n) => &n.data,
            Node::Emphasis(n) => &n.data,
            Node::Delete(n) => &n.data,
            Node::InlineCode(n) => &n.data,
            Node::Break(n) => &n.data,
            Node::Link(n) => &n.data,
            Node::Image(n) => &n.data,
            Node::Other(n) => &n.data,
        }
    }

    /// Mutable side-data bag of this node.
    pub fn data_mut(&mut self) -> &mut Data {
        match self {
            Node::Root(n) => &mut n.data,
            Node::Blockquote(n) => &mut n.data,
            Node::Paragraph(n) => &mut n.data,
            Node::Heading(n) => &mut n.data,
            Node::List(n) => &mut n.data,
            Node::ListItem(n) => &mut n.data,
            Node::Code(n) => &mut n.data,
            Node::Html(n) => &mut n.data,
            Node::ThematicBreak(n) => &mut n.data,
            Node::Text(n) => &mut n.data,
            Node::Strong(n) => &mut n.data,
            Node::Emphasis(n) => &mut n.data,
            Node::Delete(n) => &mut n.data,
            Node::InlineCode(n) => &mut n.data,
            Node::Break(n) => &mut n.data,
            Node::Link(n) => &mut n.data,
            Node::Image(n) => &mut n.data,
            Node::Other(n) => &mut n.data,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn to_text(&self) -> String {
        let mut buffer = String::new();
        collect_text(self, &mut buffer);
        buffer
    }
}

fn collect_text(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(Text { value, .. })
        | Node::InlineCode(InlineCode { value, .. })
        | Node::Code(Code { value, .. }) => buffer.push_str(value),
        Node::Image(img) => buffer.push_str(&img.alt),
        Node::Other(Other {
            value: Some(value), ..
        }) => buffer.push_str(value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    collect_text(child, buffer);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_text_collects_nested_inline_content() {
        let node = Node::paragraph(
            vec![
                Node::text("a "),
                Node::Strong(Strong {
                    children: vec![Node::text("b")],
                    data: Data::new(),
                }),
                Node::InlineCode(InlineCode {
                    value: " c".into(),
                    data: Data::new(),
                }),
            ],
            Data::new(),
        );
        assert_eq!(node.to_text(), "a b c");
    }

    #[test]
    fn leaves_have_no_children() {
        let mut text = Node::text("x");
        assert!(text.children().is_none());
        assert!(text.children_mut().is_none());
        assert_eq!(text.kind(), "text");
    }

    #[test]
    fn other_keeps_original_kind_name() {
        let node = Node::Other(Other {
            kind: "tableCell".into(),
            ..Default::default()
        });
        assert_eq!(node.kind(), "tableCell");
    }
}
