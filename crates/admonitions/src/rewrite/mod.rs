//! Blockquote rewriters, one per title syntax.
//!
//! Both variants implement [`Rewriter`] and are selected once per pass from
//! [`Config::legacy_title`]. A rewriter only looks at the node it is given;
//! walking the tree is the caller's job.

mod bracketed;
mod legacy;

pub use bracketed::BracketedRewriter;
pub use legacy::LegacyRewriter;

use crate::config::Config;
use quotemark_core::{Data, Node};

/// Result of visiting one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The node was an admonition and has been rewritten.
    Matched,
    /// The node was left exactly as found.
    Skipped,
}

/// Rewrites a single node if it is an admonition blockquote.
pub trait Rewriter: Send + Sync {
    /// Visits `node`, mutating it in place on a match.
    fn visit(&self, node: &mut Node) -> Outcome;
}

/// Builds the rewriter selected by `config.legacy_title`.
pub fn rewriter_for(config: Config) -> Box<dyn Rewriter> {
    if config.legacy_title {
        Box::new(LegacyRewriter::new(config))
    } else {
        Box::new(BracketedRewriter::new(config))
    }
}

/// Block data: `base` plus the block classes (and element override, if
/// any), through the block data map.
fn block_data(
    config: &Config,
    base: Data,
    checked_title: &str,
    element_name: Option<&str>,
) -> Data {
    let mut hints = Data::with_class_name(config.class_name_maps.block.resolve(checked_title));
    if let Some(name) = element_name {
        hints.set_element_name(name);
    }
    config.data_maps.block.apply(base.merge(hints))
}

/// Title data: `base` plus the title classes, through the title data map.
fn title_data(config: &Config, base: Data, checked_title: &str) -> Data {
    let classes = Data::with_class_name(config.class_name_maps.title.resolve(checked_title));
    config.data_maps.title.apply(base.merge(classes))
}
