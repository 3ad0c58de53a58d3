//! Recorded-linkage dictionary for link-grammar conformance testing.
//!
//! A [`ReplayDictionary`] answers `parse` requests from a corpus of linkages
//! recorded from a real engine, applying the parse options that affect which
//! linkages an engine would hand back (spelling guesses, null counts and the
//! linkage limit). It lets the conformance oracle run without a native parser.
//!
//! ## Corpus layout
//!
//! One RON file per language at `{data_dir}/{lang}/linkages.ron`:
//!
//! ```ron
//! (
//!     lang: "en",
//!     spell_guess: true,
//!     sentences: [
//!         (
//!             text: "this is a test",
//!             linkages: [
//!                 (
//!                     words: ["LEFT-WALL", "this", "is", "a", "test"],
//!                     links: [(0, 1, "Wd"), (1, 2, "Ss"), (2, 4, "Os"), (3, 4, "Ds")],
//!                     constituents: "(S (NP this) (VP is (NP a test)))",
//!                 ),
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! ## Modules
//!
//! - [`corpus`] - Serialized corpus format
//! - [`dictionary`] - The replaying `Dictionary` implementation
//! - [`spans`] - Word to sentence offset alignment
//! - [`errors`] - Corpus loading errors

pub mod corpus;
pub mod dictionary;
pub mod errors;
pub mod spans;

pub use corpus::{Corpus, RecordedLinkage, RecordedSentence};
pub use dictionary::{Linkages, ReplayDictionary, ReplayLinkage};
pub use errors::CorpusError;
pub use spans::{align_words, explicit_spans};
