//! Engine-facing interfaces for link-grammar conformance testing.
//!
//! This crate describes the narrow surface a parsing engine exposes to the
//! linkage oracle: mutable parse options, dictionaries that turn a sentence
//! into a lazy sequence of linkages, and the renderings of a single linkage.
//!
//! ## Core Types
//!
//! - [`ParseOptions`] - Named scalar options, settable by name
//! - [`Dictionary`] - Language-tagged producer of linkage sequences
//! - [`Linkage`] - One candidate analysis with diagram, tree and word spans
//! - [`LinkDiagram`] - Fixed-width ASCII rendering of labelled links
//! - [`EqCostOrder`] - Deterministic order for equal-cost linkages
//!
//! ## Example
//!
//! ```
//! use lg_linkage::{OptionValue, ParseOptions};
//!
//! let mut options = ParseOptions::default();
//! options.set("spell_guess", OptionValue::Int(0)).unwrap();
//! assert_eq!(options.spell_guess, 0);
//! ```

mod dictionary;
mod display;
mod linkage;
mod options;
mod order;

// Parse options
pub use options::{OptionError, OptionKind, OptionValue, ParseOptions};

// Linkages and dictionaries
pub use dictionary::{Dictionary, EngineError};
pub use linkage::{Linkage, LinkageMetrics, LinkageWord, LEFT_WALL, RIGHT_WALL};

// Rendering
pub use display::{DiagramError, DiagramLink, LinkDiagram};

// Candidate ordering
pub use order::EqCostOrder;
