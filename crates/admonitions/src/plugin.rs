//! Tree transform entry point.

use crate::config::{Config, ConfigOverrides};
use crate::rewrite::{Outcome, Rewriter, rewriter_for};
use quotemark_core::{
    AstTransform, HtmlOptions, Node, ParseOptions, QuotemarkError, parse_tree, to_html,
    visit_mut,
};
use std::fmt;

/// Rewrites every admonition blockquote of a tree.
///
/// The rewriter variant is fixed at construction from
/// [`Config::legacy_title`].
pub struct Admonitions {
    rewriter: Box<dyn Rewriter>,
}

impl Admonitions {
    /// Creates the transform from a complete configuration.
    pub fn new(config: Config) -> Self {
        log::debug!(
            "Building {} admonition transform",
            if config.legacy_title { "legacy" } else { "bracketed" }
        );
        Self {
            rewriter: rewriter_for(config),
        }
    }

    /// Creates the transform from partial overrides, see [`Config::resolve`].
    pub fn from_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = ConfigOverrides>,
    {
        Self::new(Config::resolve(overrides))
    }

    /// Rewrites the admonitions under `root` and returns how many matched.
    pub fn run(&self, root: &mut Node) -> usize {
        let mut matched = 0;
        visit_mut(root, &mut |node: &mut Node| {
            if self.rewriter.visit(node) == Outcome::Matched {
                matched += 1;
            }
        });
        log::debug!("Rewrote {} admonition(s)", matched);
        matched
    }
}

impl Default for Admonitions {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Admonitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admonitions").finish_non_exhaustive()
    }
}

impl AstTransform for Admonitions {
    fn transform(&self, root: &mut Node) {
        self.run(root);
    }
}

/// Parses `input` with the default options, rewrites its admonitions and
/// serializes the result to HTML.
pub fn render_markdown(input: &str, admonitions: &Admonitions) -> Result<String, QuotemarkError> {
    let mut root = parse_tree(input, &ParseOptions::default())?;
    admonitions.run(&mut root);
    Ok(to_html(&root, &HtmlOptions::default()))
}
