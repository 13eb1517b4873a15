//! Rewriter for GitHub alert titles such as `[!NOTE]`.

use super::{Outcome, Rewriter, block_data, title_data};
use crate::config::Config;
use crate::policy::{TitleText, trim_gfm_trailing_whitespace};
use quotemark_core::{Data, Node};

/// Element the rewritten blockquote renders as.
const BLOCK_ELEMENT: &str = "div";

/// Matches a blockquote whose first paragraph starts with a `[!TITLE]` line.
///
/// On a match the marker line is removed from the body, a title paragraph is
/// prepended to the blockquote, and the blockquote is marked to render as a
/// `div` carrying the block classes.
#[derive(Debug, Clone)]
pub struct BracketedRewriter {
    config: Config,
}

impl BracketedRewriter {
    /// Creates the rewriter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Rewriter for BracketedRewriter {
    fn visit(&self, node: &mut Node) -> Outcome {
        let Node::Blockquote(blockquote) = node else {
            return Outcome::Skipped;
        };
        let Some(Node::Paragraph(paragraph)) = blockquote.children.first_mut() else {
            return Outcome::Skipped;
        };
        let has_sibling_inlines = paragraph.children.len() > 1;
        let Some(Node::Text(text)) = paragraph.children.first_mut() else {
            return Outcome::Skipped;
        };

        let (line, body) = match text.value.split_once('\n') {
            Some((line, body)) => (line, Some(body)),
            // The marker has to own its line; inline content after it means
            // this text is not a title line.
            None if has_sibling_inlines => return Outcome::Skipped,
            // A lone marker paragraph: the parser only produces this when a
            // block follows in the same blockquote.
            None => (text.value.as_str(), None),
        };
        let title = if self.config.title_keep_trailing_whitespaces {
            line
        } else {
            trim_gfm_trailing_whitespace(line)
        };
        if !self.config.title_filter.accepts(title) {
            log::trace!("Blockquote title {:?} rejected by filter", title);
            return Outcome::Skipped;
        }
        let TitleText {
            display_title,
            checked_title,
        } = self.config.title_text_map.apply(title);

        match body.map(str::to_string) {
            Some(body) => text.value = body,
            None => {
                paragraph.children.remove(0);
            }
        }

        let title_paragraph = Node::paragraph(
            vec![Node::text(display_title)],
            title_data(&self.config, Data::new(), &checked_title),
        );
        blockquote.children.insert(0, title_paragraph);

        let existing = std::mem::take(&mut blockquote.data);
        blockquote.data = block_data(
            &self.config,
            existing,
            &checked_title,
            Some(BLOCK_ELEMENT),
        );

        log::debug!("Rewrote [!{}] blockquote admonition", checked_title);
        Outcome::Matched
    }
}
