//! Rewriter for legacy GitHub titles such as `**Note**`.

use super::{Outcome, Rewriter, block_data, title_data};
use crate::config::Config;
use crate::policy::{TitleText, split_gfm_leading_whitespace};
use quotemark_core::{Data, Node};

/// Matches a blockquote whose first paragraph starts with a bold title.
///
/// The blockquote keeps its element; it and the `strong` title get class
/// names. With `title_lift` the title moves into its own paragraph, and with
/// `title_unwrap` that paragraph holds plain text instead of the `strong`.
#[derive(Debug, Clone)]
pub struct LegacyRewriter {
    config: Config,
}

impl LegacyRewriter {
    /// Creates the rewriter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Rewriter for LegacyRewriter {
    fn visit(&self, node: &mut Node) -> Outcome {
        let Node::Blockquote(blockquote) = node else {
            return Outcome::Skipped;
        };
        let Some(Node::Paragraph(paragraph)) = blockquote.children.first_mut() else {
            return Outcome::Skipped;
        };
        let Some(Node::Strong(strong)) = paragraph.children.first_mut() else {
            return Outcome::Skipped;
        };
        let [Node::Text(text)] = strong.children.as_mut_slice() else {
            return Outcome::Skipped;
        };

        let TitleText {
            display_title,
            checked_title,
        } = self.config.title_text_map.apply(&text.value);
        if !self.config.title_filter.accepts(&checked_title) {
            log::trace!("Blockquote title {:?} rejected by filter", checked_title);
            return Outcome::Skipped;
        }

        text.value = display_title.clone();
        let existing = std::mem::take(&mut strong.data);
        strong.data = title_data(&self.config, existing, &checked_title);
        let existing = std::mem::take(&mut blockquote.data);
        blockquote.data = block_data(&self.config, existing, &checked_title, None);

        if self.config.title_lift {
            let lifted = paragraph.children.remove(0);

            if let Some(Node::Text(body)) = paragraph.children.first_mut() {
                let (whitespaces, rest) = split_gfm_leading_whitespace(&body.value);
                body.value = self.config.title_lift_whitespaces.apply(whitespaces) + rest;
            }

            let title_paragraph = if self.config.title_unwrap {
                Node::paragraph(
                    vec![Node::text(display_title)],
                    title_data(&self.config, Data::new(), &checked_title),
                )
            } else {
                Node::paragraph(vec![lifted], Data::new())
            };
            blockquote.children.insert(0, title_paragraph);
        }

        log::debug!("Rewrote **{}** blockquote admonition", checked_title);
        Outcome::Matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;
    use crate::policy::{ClassNameMap, DataMap, TitleFilter, TitleTextMap, WhitespaceMap};
    use quotemark_core::mdast::{Blockquote, Emphasis, Paragraph, Strong};

    fn strong(title: &str) -> Node {
        Node::Strong(Strong {
            children: vec![Node::text(title)],
            data: Data::new(),
        })
    }

    /// `> **title**` followed by `body` on the next line.
    fn note(title: &str, body: &str) -> Node {
        Node::Blockquote(Blockquote {
            children: vec![Node::paragraph(
                vec![strong(title), Node::text(body)],
                Data::new(),
            )],
            data: Data::new(),
        })
    }

    fn rewriter(overrides: ConfigOverrides) -> LegacyRewriter {
        LegacyRewriter::new(Config::resolve([
            ConfigOverrides::new().legacy_title(true),
            overrides,
        ]))
    }

    fn blockquote(node: &Node) -> &Blockquote {
        match node {
            Node::Blockquote(quote) => quote,
            other => panic!("expected blockquote, got {:?}", other),
        }
    }

    fn paragraph(node: &Node) -> &Paragraph {
        match node {
            Node::Paragraph(para) => para,
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn classes_strong_title_in_place() {
        let mut node = note("Note", "\ntest");
        assert_eq!(
            rewriter(ConfigOverrides::new()).visit(&mut node),
            Outcome::Matched
        );

        let quote = blockquote(&node);
        assert_eq!(quote.data.class_name().as_deref(), Some("admonition"));
        assert_eq!(quote.data.element_name(), None);
        assert_eq!(quote.children.len(), 1);

        let para = paragraph(&quote.children[0]);
        let Node::Strong(title) = &para.children[0] else {
            panic!("expected strong title");
        };
        assert_eq!(title.children, vec![Node::text("Note")]);
        assert_eq!(title.data.class_name().as_deref(), Some("admonition-title"));
        assert_eq!(para.children[1], Node::text("\ntest"));
    }

    #[test]
    fn emphasis_title_is_skipped() {
        let original = Node::Blockquote(Blockquote {
            children: vec![Node::paragraph(
                vec![
                    Node::Emphasis(Emphasis {
                        children: vec![Node::text("Note")],
                        data: Data::new(),
                    }),
                    Node::text("\ntest"),
                ],
                Data::new(),
            )],
            data: Data::new(),
        });
        let mut node = original.clone();
        assert_eq!(
            rewriter(ConfigOverrides::new()).visit(&mut node),
            Outcome::Skipped
        );
        assert_eq!(node, original);
    }

    #[test]
    fn strong_with_several_children_is_skipped() {
        let original = Node::Blockquote(Blockquote {
            children: vec![Node::paragraph(
                vec![Node::Strong(Strong {
                    children: vec![
                        Node::text("No"),
                        Node::Emphasis(Emphasis {
                            children: vec![Node::text("te")],
                            data: Data::new(),
                        }),
                    ],
                    data: Data::new(),
                })],
                Data::new(),
            )],
            data: Data::new(),
        });
        let mut node = original.clone();
        assert_eq!(
            rewriter(ConfigOverrides::new()).visit(&mut node),
            Outcome::Skipped
        );
        assert_eq!(node, original);
    }

    #[test]
    fn unknown_titles_are_skipped() {
        let original = note("Tip", "\ntest");
        let mut node = original.clone();
        assert_eq!(
            rewriter(ConfigOverrides::new()).visit(&mut node),
            Outcome::Skipped
        );
        assert_eq!(node, original);
    }

    #[test]
    fn lift_moves_strong_into_own_paragraph() {
        let mut node = note("Note", " \t\ntest");
        assert_eq!(
            rewriter(ConfigOverrides::new().title_lift(true)).visit(&mut node),
            Outcome::Matched
        );

        let quote = blockquote(&node);
        assert_eq!(quote.children.len(), 2);
        let title = paragraph(&quote.children[0]);
        assert_eq!(title.children.len(), 1);
        assert!(title.data.is_empty());
        let Node::Strong(strong) = &title.children[0] else {
            panic!("expected lifted strong");
        };
        assert_eq!(strong.data.class_name().as_deref(), Some("admonition-title"));
        assert_eq!(
            paragraph(&quote.children[1]).children,
            vec![Node::text("test")]
        );
    }

    #[test]
    fn lift_whitespace_rewrite_is_configurable() {
        let overrides = ConfigOverrides::new()
            .title_lift(true)
            .title_lift_whitespaces(WhitespaceMap::new(|_| "a".to_string()));
        let mut node = note("Note", "\ntest");
        assert_eq!(rewriter(overrides).visit(&mut node), Outcome::Matched);
        let quote = blockquote(&node);
        assert_eq!(
            paragraph(&quote.children[1]).children,
            vec![Node::text("atest")]
        );
    }

    #[test]
    fn unwrap_replaces_strong_with_classed_paragraph() {
        let overrides = ConfigOverrides::new().title_lift(true).title_unwrap(true);
        let mut node = note("Note", "\ntest");
        assert_eq!(rewriter(overrides).visit(&mut node), Outcome::Matched);

        let quote = blockquote(&node);
        let title = paragraph(&quote.children[0]);
        assert_eq!(title.children, vec![Node::text("Note")]);
        assert_eq!(title.data.class_name().as_deref(), Some("admonition-title"));
        assert_eq!(
            paragraph(&quote.children[1]).children,
            vec![Node::text("test")]
        );
    }

    #[test]
    fn unwrap_without_lift_does_nothing_extra() {
        let mut node = note("Note", "\ntest");
        assert_eq!(
            rewriter(ConfigOverrides::new().title_unwrap(true)).visit(&mut node),
            Outcome::Matched
        );
        assert_eq!(blockquote(&node).children.len(), 1);
    }

    #[test]
    fn lift_of_title_only_paragraph_leaves_it_empty() {
        let mut node = Node::Blockquote(Blockquote {
            children: vec![Node::paragraph(vec![strong("Warning")], Data::new())],
            data: Data::new(),
        });
        assert_eq!(
            rewriter(ConfigOverrides::new().title_lift(true)).visit(&mut node),
            Outcome::Matched
        );
        let quote = blockquote(&node);
        assert_eq!(quote.children.len(), 2);
        assert!(paragraph(&quote.children[1]).children.is_empty());
    }

    #[test]
    fn filter_and_classes_see_checked_title() {
        let overrides = ConfigOverrides::new()
            .title_filter(TitleFilter::names(["Note"]))
            .title_text_map(TitleTextMap::new(|title: &str| {
                let (checked, display) = title.split_once(':').unwrap_or((title, title));
                TitleText {
                    display_title: display.to_string(),
                    checked_title: checked.to_string(),
                }
            }))
            .class_name_maps(
                ClassNameMap::computed(|title: &str| format!("ad-{}", title.to_lowercase())),
                "ad-title",
            );
        let mut node = note("Note:OKOK", "\ntest");
        assert_eq!(rewriter(overrides).visit(&mut node), Outcome::Matched);

        let quote = blockquote(&node);
        assert_eq!(quote.data.class_name().as_deref(), Some("ad-note"));
        let para = paragraph(&quote.children[0]);
        let Node::Strong(title) = &para.children[0] else {
            panic!("expected strong title");
        };
        assert_eq!(title.children, vec![Node::text("OKOK")]);
    }

    #[test]
    fn block_data_map_can_render_as_div() {
        let overrides = ConfigOverrides::new().data_maps(
            DataMap::new(|mut data| {
                data.set_element_name("div");
                data
            }),
            DataMap::identity(),
        );
        let mut node = note("Note", "\ntest");
        assert_eq!(rewriter(overrides).visit(&mut node), Outcome::Matched);
        assert_eq!(blockquote(&node).data.element_name(), Some("div"));
    }

    #[test]
    fn rewritten_blockquote_does_not_match_again() {
        let rewriter = rewriter(ConfigOverrides::new().title_lift(true).title_unwrap(true));
        let mut node = note("Note", "\ntest");
        assert_eq!(rewriter.visit(&mut node), Outcome::Matched);
        let once = node.clone();
        assert_eq!(rewriter.visit(&mut node), Outcome::Skipped);
        assert_eq!(node, once);
    }
}
