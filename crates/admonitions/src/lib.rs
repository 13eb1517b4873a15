#![deny(missing_docs)]
//! quotemark: turns GitHub-style blockquote admonitions into titled blocks.
//!
//! ```text
//! > [!NOTE]                 <div class="admonition">
//! > Read this.       =>       <p class="admonition-title">NOTE</p>
//!                             <p>Read this.</p>
//!                           </div>
//! ```
//!
//! Legacy `> **Note**` titles are handled by a second rewriter selected with
//! [`ConfigOverrides::legacy_title`].

/// Configuration, overrides and serializable options.
pub mod config;
/// Transform entry point.
pub mod plugin;
/// Title filters, text maps, class name maps and data maps.
pub mod policy;
/// MkDocs presets.
pub mod presets;
/// Per-node blockquote rewriters.
pub mod rewrite;

pub use config::{AdmonitionOptions, Config, ConfigError, ConfigOverrides};
pub use plugin::{Admonitions, render_markdown};
pub use policy::{ClassNameMap, ClassNames, DataMap, TitleFilter, TitleText, TitleTextMap, WhitespaceMap};
pub use presets::{Preset, mkdocs, mkdocs_legacy};
pub use rewrite::{BracketedRewriter, LegacyRewriter, Outcome, Rewriter};
