//! Literal find-and-replace rendering of style templates.
//!
//! A template is rendered by applying a [`SubstitutionList`] to its text and
//! writing the result to an output file. Lists are parsed from a small
//! line-oriented format, see [`parse_substitutions`].
//!
//! # Example
//!
//! ```
//! use themegen_renderer::parse_substitutions;
//!
//! let rules = parse_substitutions("$PRIMARY := #ff0000 // accent\n$BG := #000000").unwrap();
//! let mut text = "color: $PRIMARY; background: $BG;".to_owned();
//! rules.apply(&mut text);
//!
//! assert_eq!(text, "color: #ff0000; background: #000000;");
//! ```

mod parser;
mod render;
mod rules;

pub use parser::{ParseError, parse_substitutions};
pub use render::{
    RenderError, RenderJob, RenderReport, Rendered, load_substitutions, render, render_to_string,
};
pub use rules::{ApplyStats, Rule, SubstitutionList};
