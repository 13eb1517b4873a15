#![deny(missing_docs)]
//! quotemark core: markdown syntax tree, parse adapter, walker and HTML serializer.

/// Side-data bags carrying rendering hints.
pub mod data;
/// Core error types.
pub mod error;
/// HTML serialization of the tree.
pub mod html;
/// Syntax tree node types.
pub mod mdast;
/// Markdown parsing utilities and extension hooks.
pub mod parse;
/// Pre-order tree walking.
pub mod visit;

pub use data::{CLASS_NAME_KEY, Data, ELEMENT_NAME_KEY, PROPERTIES_KEY};
pub use error::{QuotemarkError, SourceLocation};
pub use html::{HtmlOptions, to_html};
pub use mdast::Node;
pub use parse::{
    AstTransform, ParseOptions, ParserPipeline, TextTransform, from_mdast, parse_tree,
    parse_tree_with_options,
};
pub use visit::{visit, visit_mut};
