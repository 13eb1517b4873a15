//! Title acceptance and naming policies shared by both rewriters.
//!
//! Every policy accepts either a static value or a callback. Callbacks are
//! stored as `Arc<dyn Fn .. + Send + Sync>` so a configuration clones cheaply
//! and can be shared between threads.

use quotemark_core::Data;
use std::fmt;
use std::sync::Arc;

/// Class names produced by a [`ClassNameMap`] callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassNames {
    /// A single, possibly space-separated, class string.
    One(String),
    /// An ordered list of class names.
    Many(Vec<String>),
}

impl ClassNames {
    /// Joins the class names with single spaces.
    pub fn join(self) -> String {
        match self {
            ClassNames::One(class_name) => class_name,
            ClassNames::Many(class_names) => class_names.join(" "),
        }
    }
}

impl From<String> for ClassNames {
    fn from(value: String) -> Self {
        ClassNames::One(value)
    }
}

impl From<&str> for ClassNames {
    fn from(value: &str) -> Self {
        ClassNames::One(value.to_string())
    }
}

impl From<Vec<String>> for ClassNames {
    fn from(value: Vec<String>) -> Self {
        ClassNames::Many(value)
    }
}

impl From<Vec<&str>> for ClassNames {
    fn from(value: Vec<&str>) -> Self {
        ClassNames::Many(value.into_iter().map(str::to_string).collect())
    }
}

/// Computes the class names of an element from its checked title.
#[derive(Clone)]
pub enum ClassNameMap {
    /// Fixed class string.
    Literal(String),
    /// Fixed class list.
    LiteralList(Vec<String>),
    /// Class names computed from the checked title.
    Computed(Arc<dyn Fn(&str) -> ClassNames + Send + Sync>),
}

impl ClassNameMap {
    /// Wraps a callback.
    pub fn computed<F, C>(f: F) -> Self
    where
        F: Fn(&str) -> C + Send + Sync + 'static,
        C: Into<ClassNames>,
    {
        ClassNameMap::Computed(Arc::new(move |title: &str| -> ClassNames { f(title).into() }))
    }

    /// Resolves the space-joined class string for `title`.
    pub fn resolve(&self, title: &str) -> String {
        match self {
            ClassNameMap::Literal(class_name) => class_name.clone(),
            ClassNameMap::LiteralList(class_names) => class_names.join(" "),
            ClassNameMap::Computed(f) => f(title).join(),
        }
    }
}

impl From<&str> for ClassNameMap {
    fn from(value: &str) -> Self {
        ClassNameMap::Literal(value.to_string())
    }
}

impl From<String> for ClassNameMap {
    fn from(value: String) -> Self {
        ClassNameMap::Literal(value)
    }
}

impl From<Vec<&str>> for ClassNameMap {
    fn from(value: Vec<&str>) -> Self {
        ClassNameMap::LiteralList(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ClassNameMap {
    fn from(value: Vec<String>) -> Self {
        ClassNameMap::LiteralList(value)
    }
}

impl fmt::Debug for ClassNameMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassNameMap::Literal(class_name) => f.debug_tuple("Literal").field(class_name).finish(),
            ClassNameMap::LiteralList(class_names) => {
                f.debug_tuple("LiteralList").field(class_names).finish()
            }
            ClassNameMap::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Decides whether a candidate title turns a blockquote into an admonition.
#[derive(Clone)]
pub enum TitleFilter {
    /// Exact, case-sensitive membership.
    Names(Vec<String>),
    /// Arbitrary predicate.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl TitleFilter {
    /// Builds a membership filter.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TitleFilter::Names(names.into_iter().map(Into::into).collect())
    }

    /// Wraps a predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        TitleFilter::Predicate(Arc::new(f))
    }

    /// Returns true when `title` is accepted.
    pub fn accepts(&self, title: &str) -> bool {
        match self {
            TitleFilter::Names(names) => names.iter().any(|name| name == title),
            TitleFilter::Predicate(f) => f(title),
        }
    }
}

impl fmt::Debug for TitleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleFilter::Names(names) => f.debug_tuple("Names").field(names).finish(),
            TitleFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// The two faces of a matched title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleText {
    /// Text written into the rendered title.
    pub display_title: String,
    /// Text passed to the class name maps (and, for legacy titles, the filter).
    pub checked_title: String,
}

impl TitleText {
    /// Uses the same text for display and checks.
    pub fn same(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            display_title: title.clone(),
            checked_title: title,
        }
    }
}

/// Splits a raw title candidate into display and checked titles.
#[derive(Clone)]
pub struct TitleTextMap(Arc<dyn Fn(&str) -> TitleText + Send + Sync>);

impl TitleTextMap {
    /// Wraps a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> TitleText + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Display and checked title both equal the raw title.
    pub fn identity() -> Self {
        Self::new(|title: &str| TitleText::same(title))
    }

    /// Strips the `[!` prefix and `]` suffix of a bracketed marker.
    ///
    /// Titles lacking either delimiter are passed through unchanged.
    pub fn strip_brackets() -> Self {
        Self::new(|title: &str| TitleText::same(strip_marker_brackets(title)))
    }

    /// Applies the map.
    pub fn apply(&self, title: &str) -> TitleText {
        (self.0)(title)
    }
}

impl fmt::Debug for TitleTextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TitleTextMap(..)")
    }
}

/// Returns the text between `[!` and `]`, or `title` itself when it is not
/// wrapped that way.
pub fn strip_marker_brackets(title: &str) -> &str {
    title
        .strip_prefix("[!")
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(title)
}

/// Last-step rewrite of a node's data bag.
#[derive(Clone)]
pub struct DataMap(Arc<dyn Fn(Data) -> Data + Send + Sync>);

impl DataMap {
    /// Wraps a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Data) -> Data + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Returns the bag unchanged.
    pub fn identity() -> Self {
        Self::new(|data| data)
    }

    /// Applies the map.
    pub fn apply(&self, data: Data) -> Data {
        (self.0)(data)
    }
}

impl fmt::Debug for DataMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataMap(..)")
    }
}

/// Rewrites the whitespace run left in front of the body after a title lift.
#[derive(Clone)]
pub struct WhitespaceMap(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl WhitespaceMap {
    /// Wraps a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Deletes the whitespace.
    pub fn remove() -> Self {
        Self::new(|_| String::new())
    }

    /// Applies the map.
    pub fn apply(&self, whitespaces: &str) -> String {
        (self.0)(whitespaces)
    }
}

impl fmt::Debug for WhitespaceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WhitespaceMap(..)")
    }
}

/// GFM whitespace allowed after a title on its line (no line feed).
fn is_gfm_inline_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{b}' | '\u{c}' | '\r')
}

/// GFM whitespace including the line feed.
fn is_gfm_whitespace(c: char) -> bool {
    c == '\n' || is_gfm_inline_whitespace(c)
}

/// Trims trailing space, tab, vertical tab, form feed and carriage return.
pub fn trim_gfm_trailing_whitespace(title: &str) -> &str {
    title.trim_end_matches(is_gfm_inline_whitespace)
}

/// Splits `text` into its leading GFM whitespace run and the rest.
pub fn split_gfm_leading_whitespace(text: &str) -> (&str, &str) {
    let rest = text.trim_start_matches(is_gfm_whitespace);
    text.split_at(text.len() - rest.len())
}
