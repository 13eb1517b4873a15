//! Markdown parsing utilities and extension hooks.

use crate::data::Data;
use crate::mdast::{
    Blockquote, Break, Code, Delete, Emphasis, Heading, Html, Image, InlineCode, Link, List,
    ListItem, Node, Other, Paragraph, Root, Strong, ThematicBreak,
};
use crate::{QuotemarkError, SourceLocation};
use markdown::mdast;
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl ParseOptions {
    /// Markdown-friendly defaults.
    pub const fn markdown() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
            code_indented: true,
            raw_html: false,
            math: false,
        }
    }

    /// Plain CommonMark, no extensions.
    pub const fn commonmark() -> Self {
        Self {
            gfm: false,
            frontmatter: false,
            code_indented: true,
            raw_html: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Trait for preprocessing raw markdown text before parsing.
pub trait TextTransform {
    /// Transform the input markdown text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Trait for mutating the parsed tree after parsing.
pub trait AstTransform {
    /// Mutate the parsed tree in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node),
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Configurable parsing pipeline with optional transforms.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    text_transforms: Vec<Box<dyn TextTransform>>,
    ast_transforms: Vec<Box<dyn AstTransform>>,
}

impl ParserPipeline {
    /// Create a new pipeline from core parse options.
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            options: options.to_markdown(),
            text_transforms: Vec::new(),
            ast_transforms: Vec::new(),
        }
    }

    /// Add a text preprocessor transform.
    pub fn add_text_transform<T: TextTransform + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Add an AST transform.
    pub fn add_ast_transform<T: AstTransform + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Parse markdown into a tree using the configured pipeline.
    pub fn parse(&self, input: &str) -> Result<Node, QuotemarkError> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }

        let mut root = parse_tree_with_options(&current, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }

        Ok(root)
    }
}

/// Parse markdown into a tree using core options.
pub fn parse_tree(input: &str, options: &ParseOptions) -> Result<Node, QuotemarkError> {
    parse_tree_with_options(input, &options.to_markdown())
}

/// Parse markdown into a tree using markdown-rs `ParseOptions`.
pub fn parse_tree_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, QuotemarkError> {
    let mdast = markdown::to_mdast(input, options).map_err(|err| {
        QuotemarkError::MarkdownAdapter {
            message: err.to_string(),
            location: message_location(&err),
        }
    })?;
    Ok(from_mdast(mdast))
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

/// Converts a markdown-rs tree into the crate tree.
///
/// Adjacent text siblings are merged: markdown-rs may split a run of
/// literal text around unmatched brackets, and transforms expect a line of
/// text to live in one node.
pub fn from_mdast(node: mdast::Node) -> Node {
    match node {
        mdast::Node::Root(n) => Node::Root(Root {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::Blockquote(n) => Node::Blockquote(Blockquote {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::Paragraph(n) => Node::Paragraph(Paragraph {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::Heading(n) => Node::Heading(Heading {
            children: convert_children(n.children),
            depth: n.depth,
            data: Data::new(),
        }),
        mdast::Node::List(n) => Node::List(List {
            children: convert_children(n.children),
            ordered: n.ordered,
            start: n.start,
            spread: n.spread,
            data: Data::new(),
        }),
        mdast::Node::ListItem(n) => Node::ListItem(ListItem {
            children: convert_children(n.children),
            spread: n.spread,
            checked: n.checked,
            data: Data::new(),
        }),
        mdast::Node::Code(n) => Node::Code(Code {
            value: n.value,
            lang: n.lang,
            meta: n.meta,
            data: Data::new(),
        }),
        mdast::Node::Html(n) => Node::Html(Html {
            value: n.value,
            data: Data::new(),
        }),
        mdast::Node::ThematicBreak(_) => Node::ThematicBreak(ThematicBreak::default()),
        mdast::Node::Text(n) => Node::text(n.value),
        mdast::Node::Strong(n) => Node::Strong(Strong {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::Emphasis(n) => Node::Emphasis(Emphasis {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::Delete(n) => Node::Delete(Delete {
            children: convert_children(n.children),
            data: Data::new(),
        }),
        mdast::Node::InlineCode(n) => Node::InlineCode(InlineCode {
            value: n.value,
            data: Data::new(),
        }),
        mdast::Node::Break(_) => Node::Break(Break::default()),
        mdast::Node::Link(n) => Node::Link(Link {
            children: convert_children(n.children),
            url: n.url,
            title: n.title,
            data: Data::new(),
        }),
        mdast::Node::Image(n) => Node::Image(Image {
            url: n.url,
            alt: n.alt,
            title: n.title,
            data: Data::new(),
        }),
        other => convert_other(other),
    }
}

fn convert_other(node: mdast::Node) -> Node {
    let kind = match &node {
        mdast::Node::Table(_) => "table",
        mdast::Node::TableRow(_) => "tableRow",
        mdast::Node::TableCell(_) => "tableCell",
        mdast::Node::FootnoteDefinition(_) => "footnoteDefinition",
        mdast::Node::FootnoteReference(_) => "footnoteReference",
        mdast::Node::LinkReference(_) => "linkReference",
        mdast::Node::ImageReference(_) => "imageReference",
        mdast::Node::Definition(_) => "definition",
        mdast::Node::Yaml(_) => "yaml",
        mdast::Node::Toml(_) => "toml",
        mdast::Node::Math(_) => "math",
        mdast::Node::InlineMath(_) => "inlineMath",
        _ => "unknown",
    };
    log::trace!("Keeping markdown node without dedicated variant: {}", kind);

    match node.children() {
        Some(children) => Node::Other(Other {
            kind: kind.to_string(),
            children: convert_children(children.clone()),
            value: None,
            data: Data::new(),
        }),
        None => Node::Other(Other {
            kind: kind.to_string(),
            children: Vec::new(),
            value: Some(node.to_string()),
            data: Data::new(),
        }),
    }
}

fn convert_children(children: Vec<mdast::Node>) -> Vec<Node> {
    let mut converted: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        let node = from_mdast(child);
        if let (Some(Node::Text(previous)), Node::Text(next)) = (converted.last_mut(), &node) {
            previous.value.push_str(&next.value);
            continue;
        }
        converted.push(node);
    }
    converted
}
