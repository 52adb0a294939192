//! Match highlighting and terminal styling for spada.
//!
//! Search results carry byte ranges into record text. This crate turns those ranges into
//! `<mark>`-wrapped HTML or ANSI-styled terminal text, cuts previews around the first match,
//! and provides the styling helpers and TOML syntax highlighting used by the CLI.

#![warn(missing_docs)]

mod mark;
mod preview;
mod style;
mod syntax;

pub use mark::{escape_html, mark_html, mark_terminal};
pub use preview::{ELLIPSIS, PREVIEW_AFTER, PREVIEW_BEFORE, Preview, preview};
pub use style::{colors, dim, header, rgb, subheader, success, swatch, warning};
pub use syntax::Highlighter;
