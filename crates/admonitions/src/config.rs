//! Admonition configuration: defaults, partial overrides and JSON options.

use crate::policy::{ClassNameMap, DataMap, TitleFilter, TitleTextMap, WhitespaceMap};
use crate::presets::Preset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Class name maps for the block and title elements.
#[derive(Debug, Clone)]
pub struct ClassNameMaps {
    /// Classes of the admonition block.
    pub block: ClassNameMap,
    /// Classes of the title element.
    pub title: ClassNameMap,
}

/// Data maps for the block and title elements.
#[derive(Debug, Clone)]
pub struct DataMaps {
    /// Applied to the block data bag before it is committed.
    pub block: DataMap,
    /// Applied to the title data bag before it is committed.
    pub title: DataMap,
}

impl Default for DataMaps {
    fn default() -> Self {
        Self {
            block: DataMap::identity(),
            title: DataMap::identity(),
        }
    }
}

/// Complete configuration of one admonition pass.
///
/// `title_lift`, `title_lift_whitespaces` and `title_unwrap` only apply to
/// legacy `**Note**` titles.
#[derive(Debug, Clone)]
pub struct Config {
    /// Class names of the block and title elements.
    pub class_name_maps: ClassNameMaps,
    /// Which titles are admonitions.
    pub title_filter: TitleFilter,
    /// Display/checked split of a matched title.
    pub title_text_map: TitleTextMap,
    /// Final rewrite of the data bags.
    pub data_maps: DataMaps,
    /// Keep whitespace trailing a bracketed title instead of trimming it.
    pub title_keep_trailing_whitespaces: bool,
    /// Match `**Note**` titles instead of `[!NOTE]` titles.
    pub legacy_title: bool,
    /// Move the legacy title into its own paragraph.
    pub title_lift: bool,
    /// Rewrites the whitespace left in front of the body after a lift.
    pub title_lift_whitespaces: WhitespaceMap,
    /// Replace the lifted `strong` wrapper with plain text.
    pub title_unwrap: bool,
}

impl Config {
    /// Defaults for `[!NOTE]` titles.
    pub fn default_current() -> Self {
        Self {
            class_name_maps: ClassNameMaps {
                block: ClassNameMap::from("admonition"),
                title: ClassNameMap::from("admonition-title"),
            },
            title_filter: TitleFilter::names([
                "[!NOTE]",
                "[!TIP]",
                "[!IMPORTANT]",
                "[!WARNING]",
                "[!CAUTION]",
            ]),
            title_text_map: TitleTextMap::strip_brackets(),
            data_maps: DataMaps::default(),
            title_keep_trailing_whitespaces: false,
            legacy_title: false,
            title_lift: false,
            title_lift_whitespaces: WhitespaceMap::remove(),
            title_unwrap: false,
        }
    }

    /// Defaults for `**Note**` titles.
    pub fn default_legacy() -> Self {
        Self {
            title_filter: TitleFilter::names(["Note", "Warning"]),
            title_text_map: TitleTextMap::identity(),
            legacy_title: true,
            ..Self::default_current()
        }
    }

    /// Builds a configuration from partial overrides.
    ///
    /// The last override that sets `legacy_title` picks the default the
    /// overrides are applied to. Overrides are applied in order, later ones
    /// winning per top-level key.
    pub fn resolve<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = ConfigOverrides>,
    {
        let overrides: Vec<ConfigOverrides> = overrides.into_iter().collect();
        let legacy_title = overrides
            .iter()
            .rev()
            .find_map(|o| o.legacy_title)
            .unwrap_or(false);

        let mut config = if legacy_title {
            Self::default_legacy()
        } else {
            Self::default_current()
        };
        for o in overrides {
            config.apply(o);
        }
        config
    }

    /// Shallow-merges `overrides` into this configuration.
    ///
    /// Grouped keys (`class_name_maps`, `data_maps`) are replaced wholesale.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            class_name_maps,
            title_filter,
            title_text_map,
            data_maps,
            title_keep_trailing_whitespaces,
            legacy_title,
            title_lift,
            title_lift_whitespaces,
            title_unwrap,
        } = overrides;

        if let Some(v) = class_name_maps {
            self.class_name_maps = v;
        }
        if let Some(v) = title_filter {
            self.title_filter = v;
        }
        if let Some(v) = title_text_map {
            self.title_text_map = v;
        }
        if let Some(v) = data_maps {
            self.data_maps = v;
        }
        if let Some(v) = title_keep_trailing_whitespaces {
            self.title_keep_trailing_whitespaces = v;
        }
        if let Some(v) = legacy_title {
            self.legacy_title = v;
        }
        if let Some(v) = title_lift {
            self.title_lift = v;
        }
        if let Some(v) = title_lift_whitespaces {
            self.title_lift_whitespaces = v;
        }
        if let Some(v) = title_unwrap {
            self.title_unwrap = v;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_current()
    }
}

/// Partial configuration; unset keys keep the value they are merged over.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// See [`Config::class_name_maps`].
    pub class_name_maps: Option<ClassNameMaps>,
    /// See [`Config::title_filter`].
    pub title_filter: Option<TitleFilter>,
    /// See [`Config::title_text_map`].
    pub title_text_map: Option<TitleTextMap>,
    /// See [`Config::data_maps`].
    pub data_maps: Option<DataMaps>,
    /// See [`Config::title_keep_trailing_whitespaces`].
    pub title_keep_trailing_whitespaces: Option<bool>,
    /// See [`Config::legacy_title`].
    pub legacy_title: Option<bool>,
    /// See [`Config::title_lift`].
    pub title_lift: Option<bool>,
    /// See [`Config::title_lift_whitespaces`].
    pub title_lift_whitespaces: Option<WhitespaceMap>,
    /// See [`Config::title_unwrap`].
    pub title_unwrap: Option<bool>,
}

impl ConfigOverrides {
    /// Empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets block and title class name maps.
    pub fn class_name_maps(
        mut self,
        block: impl Into<ClassNameMap>,
        title: impl Into<ClassNameMap>,
    ) -> Self {
        self.class_name_maps = Some(ClassNameMaps {
            block: block.into(),
            title: title.into(),
        });
        self
    }

    /// Sets the title filter.
    pub fn title_filter(mut self, filter: TitleFilter) -> Self {
        self.title_filter = Some(filter);
        self
    }

    /// Sets the title text map.
    pub fn title_text_map(mut self, map: TitleTextMap) -> Self {
        self.title_text_map = Some(map);
        self
    }

    /// Sets block and title data maps.
    pub fn data_maps(mut self, block: DataMap, title: DataMap) -> Self {
        self.data_maps = Some(DataMaps { block, title });
        self
    }

    /// Keeps or trims whitespace trailing a bracketed title.
    pub fn title_keep_trailing_whitespaces(mut self, keep: bool) -> Self {
        self.title_keep_trailing_whitespaces = Some(keep);
        self
    }

    /// Selects the legacy `**Note**` rewriter.
    pub fn legacy_title(mut self, legacy: bool) -> Self {
        self.legacy_title = Some(legacy);
        self
    }

    /// Enables or disables title lift.
    pub fn title_lift(mut self, lift: bool) -> Self {
        self.title_lift = Some(lift);
        self
    }

    /// Sets the whitespace rewrite used after a title lift.
    pub fn title_lift_whitespaces(mut self, map: WhitespaceMap) -> Self {
        self.title_lift_whitespaces = Some(map);
        self
    }

    /// Enables or disables title unwrap.
    pub fn title_unwrap(mut self, unwrap: bool) -> Self {
        self.title_unwrap = Some(unwrap);
        self
    }
}

/// Errors raised while loading [`AdmonitionOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options document is not valid JSON or has the wrong shape.
    #[error("Invalid admonition options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Class names given as a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticClassNames {
    /// A single class string.
    One(String),
    /// A list of class names.
    Many(Vec<String>),
}

impl From<StaticClassNames> for ClassNameMap {
    fn from(value: StaticClassNames) -> Self {
        match value {
            StaticClassNames::One(s) => ClassNameMap::Literal(s),
            StaticClassNames::Many(list) => ClassNameMap::LiteralList(list),
        }
    }
}

/// Static class names for the block and title elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticClassNameMaps {
    /// Classes of the admonition block.
    pub block: StaticClassNames,
    /// Classes of the title element.
    pub title: StaticClassNames,
}

/// Serializable subset of the configuration, for options read from files.
///
/// Callbacks cannot be expressed here; use [`ConfigOverrides`] for those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdmonitionOptions {
    /// Preset applied before the other keys.
    #[serde(default)]
    pub preset: Option<Preset>,
    /// See [`Config::legacy_title`].
    #[serde(default)]
    pub legacy_title: Option<bool>,
    /// See [`Config::class_name_maps`].
    #[serde(default)]
    pub class_name_maps: Option<StaticClassNameMaps>,
    /// Accepted titles, matched exactly.
    #[serde(default)]
    pub title_filter: Option<Vec<String>>,
    /// See [`Config::title_keep_trailing_whitespaces`].
    #[serde(default)]
    pub title_keep_trailing_whitespaces: Option<bool>,
    /// See [`Config::title_lift`].
    #[serde(default)]
    pub title_lift: Option<bool>,
    /// See [`Config::title_unwrap`].
    #[serde(default)]
    pub title_unwrap: Option<bool>,
}

impl AdmonitionOptions {
    /// Parses options from a JSON document.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Converts the options into overrides: the preset first, then the
    /// explicitly set keys.
    pub fn into_overrides(self) -> Vec<ConfigOverrides> {
        let mut overrides = Vec::with_capacity(2);
        let legacy_title = self.legacy_title.unwrap_or(false);
        if let Some(preset) = self.preset {
            overrides.push(preset.overrides(legacy_title));
        }

        overrides.push(ConfigOverrides {
            class_name_maps: self.class_name_maps.map(|maps| ClassNameMaps {
                block: maps.block.into(),
                title: maps.title.into(),
            }),
            title_filter: self.title_filter.map(TitleFilter::Names),
            title_keep_trailing_whitespaces: self.title_keep_trailing_whitespaces,
            legacy_title: self.legacy_title,
            title_lift: self.title_lift,
            title_unwrap: self.title_unwrap,
            ..ConfigOverrides::default()
        });
        overrides
    }

    /// Resolves the options into a complete configuration.
    pub fn into_config(self) -> Config {
        Config::resolve(self.into_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_defaults() {
        let config = Config::default();
        assert!(!config.legacy_title);
        assert!(config.title_filter.accepts("[!NOTE]"));
        assert!(config.title_filter.accepts("[!CAUTION]"));
        assert!(!config.title_filter.accepts("NOTE"));
        assert_eq!(
            config.title_text_map.apply("[!NOTE]").display_title,
            "NOTE"
        );
        assert_eq!(config.class_name_maps.block.resolve("NOTE"), "admonition");
        assert_eq!(
            config.class_name_maps.title.resolve("NOTE"),
            "admonition-title"
        );
    }

    #[test]
    fn legacy_default_is_picked_by_overrides() {
        let config = Config::resolve([ConfigOverrides::new().legacy_title(true)]);
        assert!(config.legacy_title);
        assert!(config.title_filter.accepts("Note"));
        assert!(!config.title_filter.accepts("[!NOTE]"));
        assert_eq!(config.title_text_map.apply("Note").display_title, "Note");
        assert!(!config.title_lift);
        assert!(!config.title_unwrap);
    }

    #[test]
    fn later_overrides_win() {
        let config = Config::resolve([
            ConfigOverrides::new().title_lift(true).legacy_title(true),
            ConfigOverrides::new().title_lift(false),
        ]);
        assert!(config.legacy_title);
        assert!(!config.title_lift);
    }

    #[test]
    fn last_legacy_flag_selects_the_default() {
        let config = Config::resolve([
            ConfigOverrides::new().legacy_title(true),
            ConfigOverrides::new().legacy_title(false),
        ]);
        assert!(!config.legacy_title);
        assert!(config.title_filter.accepts("[!NOTE]"));
    }

    #[test]
    fn class_name_maps_are_replaced_wholesale() {
        let config = Config::resolve([ConfigOverrides::new().class_name_maps("ad", vec!["t1", "t2"])]);
        assert_eq!(config.class_name_maps.block.resolve("NOTE"), "ad");
        assert_eq!(config.class_name_maps.title.resolve("NOTE"), "t1 t2");
    }

    #[test]
    fn options_from_json() {
        let options = AdmonitionOptions::from_json(
            r#"{
                "legacyTitle": true,
                "classNameMaps": { "block": "ad", "title": ["ad-title1", "ad-title2"] },
                "titleFilter": ["Tips"],
                "titleLift": true
            }"#,
        )
        .unwrap();
        let config = options.into_config();
        assert!(config.legacy_title);
        assert!(config.title_lift);
        assert!(!config.title_unwrap);
        assert!(config.title_filter.accepts("Tips"));
        assert!(!config.title_filter.accepts("Note"));
        assert_eq!(
            config.class_name_maps.title.resolve("Tips"),
            "ad-title1 ad-title2"
        );
    }

    #[test]
    fn options_reject_unknown_keys() {
        let err = AdmonitionOptions::from_json(r#"{ "titleLfit": true }"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid admonition options"));
    }

    #[test]
    fn preset_is_applied_before_explicit_keys() {
        let options =
            AdmonitionOptions::from_json(r#"{ "preset": "mkdocs", "titleFilter": ["[!x]"] }"#)
                .unwrap();
        let config = options.into_config();
        assert!(config.title_filter.accepts("[!x]"));
        assert!(!config.title_filter.accepts("[!note]"));
        assert_eq!(
            config.class_name_maps.block.resolve("note danger"),
            "admonition note danger"
        );
    }
}
