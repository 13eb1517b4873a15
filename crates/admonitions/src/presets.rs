//! Presets mapping MkDocs admonition conventions onto blockquotes.
//!
//! A marker names one or more space-separated types and an optional quoted
//! display title, for example `[!note danger "Don't try this at home"]` or,
//! for types outside the built-in list, `[!admonition: guess "Title"]`. The
//! block gets the `admonition` class followed by the types, matching the
//! markup of the MkDocs admonition extension.

use crate::config::ConfigOverrides;
use crate::policy::{ClassNameMap, DataMap, TitleFilter, TitleText, TitleTextMap, strip_marker_brackets};
use serde::{Deserialize, Serialize};

/// Type keywords MkDocs styles out of the box.
pub const MKDOCS_TYPES: [&str; 9] = [
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
];

const CUSTOM_TYPE_PREFIX: &str = "admonition: ";

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// MkDocs admonitions.
    Mkdocs,
}

impl Preset {
    /// Overrides implementing the preset for the selected title syntax.
    pub fn overrides(self, legacy_title: bool) -> ConfigOverrides {
        match (self, legacy_title) {
            (Preset::Mkdocs, false) => mkdocs(),
            (Preset::Mkdocs, true) => mkdocs_legacy(),
        }
    }
}

/// MkDocs preset for `[!note "Title"]` markers.
pub fn mkdocs() -> ConfigOverrides {
    ConfigOverrides::new()
        .class_name_maps(mkdocs_block_classes(), "admonition-title")
        .title_filter(TitleFilter::predicate(|title| {
            title.ends_with(']')
                && title
                    .strip_prefix("[!")
                    .is_some_and(is_mkdocs_type_declaration)
        }))
        .title_text_map(TitleTextMap::new(|title: &str| {
            split_mkdocs_title(strip_marker_brackets(title))
        }))
}

/// MkDocs preset for `**note "Title"**` markers.
///
/// Lifts and unwraps the title and renders the block as a `div`, so the
/// output has the same shape as the bracketed preset.
pub fn mkdocs_legacy() -> ConfigOverrides {
    ConfigOverrides::new()
        .legacy_title(true)
        .class_name_maps(mkdocs_block_classes(), "admonition-title")
        .title_filter(TitleFilter::predicate(is_mkdocs_type_declaration))
        .title_text_map(TitleTextMap::new(split_mkdocs_title))
        .title_lift(true)
        .title_unwrap(true)
        .data_maps(
            DataMap::new(|mut data| {
                data.set_element_name("div");
                data
            }),
            DataMap::identity(),
        )
}

fn is_mkdocs_type_declaration(title: &str) -> bool {
    title.starts_with(CUSTOM_TYPE_PREFIX) || MKDOCS_TYPES.iter().any(|t| title.starts_with(t))
}

fn mkdocs_block_classes() -> ClassNameMap {
    ClassNameMap::computed(|title: &str| {
        let types = title.strip_prefix(CUSTOM_TYPE_PREFIX).unwrap_or(title);
        std::iter::once("admonition")
            .chain(types.split_whitespace())
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

/// Splits `types "Display title"` at the first ` "`.
///
/// Without a quoted title the first type is displayed, capitalized.
fn split_mkdocs_title(title: &str) -> TitleText {
    match title.find(" \"") {
        Some(i) => {
            let quoted = &title[i + 2..];
            TitleText {
                display_title: quoted.strip_suffix('"').unwrap_or(quoted).to_string(),
                checked_title: title[..i].to_string(),
            }
        }
        None => TitleText {
            display_title: default_display_title(title),
            checked_title: title.to_string(),
        },
    }
}

fn default_display_title(types: &str) -> String {
    let types = types.strip_prefix(CUSTOM_TYPE_PREFIX).unwrap_or(types);
    let first = types.split_whitespace().next().unwrap_or_default();
    let mut chars = first.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn splits_quoted_display_title() {
        assert_eq!(
            split_mkdocs_title("note danger \"Don't try this at home\""),
            TitleText {
                display_title: "Don't try this at home".to_string(),
                checked_title: "note danger".to_string(),
            }
        );
    }

    #[test]
    fn capitalizes_type_without_quoted_title() {
        assert_eq!(
            split_mkdocs_title("tip"),
            TitleText {
                display_title: "Tip".to_string(),
                checked_title: "tip".to_string(),
            }
        );
        assert_eq!(split_mkdocs_title("admonition: guess").display_title, "Guess");
    }

    #[test]
    fn bracketed_filter_requires_known_type_or_custom_prefix() {
        let config = Config::resolve([mkdocs()]);
        assert!(config.title_filter.accepts("[!note danger \"x\"]"));
        assert!(config.title_filter.accepts("[!admonition: guess \"x\"]"));
        assert!(!config.title_filter.accepts("[!NOTE]"));
        assert!(!config.title_filter.accepts("[!note"));
        assert!(!config.title_filter.accepts("note"));
    }

    #[test]
    fn custom_type_prefix_is_not_a_class() {
        let config = Config::resolve([mkdocs()]);
        assert_eq!(
            config.class_name_maps.block.resolve("admonition: guess"),
            "admonition guess"
        );
    }

    #[test]
    fn legacy_preset_selects_legacy_rewriter() {
        let config = Config::resolve([mkdocs_legacy()]);
        assert!(config.legacy_title);
        assert!(config.title_lift);
        assert!(config.title_unwrap);
        assert!(config.title_filter.accepts("note danger"));
        let data = config.data_maps.block.apply(quotemark_core::Data::new());
        assert_eq!(data.element_name(), Some("div"));
    }
}
