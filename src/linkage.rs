use std::ops::Range;

/// Word text the engine uses for the left sentence boundary.
pub const LEFT_WALL: &str = "LEFT-WALL";
/// Word text the engine uses for the right sentence boundary.
pub const RIGHT_WALL: &str = "RIGHT-WALL";

/// A word of a linkage with its position in the original sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageWord {
    pub text: String,
    /// Character offsets into the sentence.
    pub chars: Range<usize>,
    /// Byte offsets into the sentence.
    pub bytes: Range<usize>,
}

impl LinkageWord {
    pub fn new(text: impl Into<String>, chars: Range<usize>, bytes: Range<usize>) -> Self {
        Self {
            text: text.into(),
            chars,
            bytes,
        }
    }
}

/// Cost record of a linkage. Linkages with equal metrics are interchangeable
/// as far as the engine's ranking goes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LinkageMetrics {
    pub unused_word_cost: i32,
    pub disjunct_cost: f64,
    pub link_cost: i32,
}

/// One candidate analysis of a sentence.
pub trait Linkage {
    fn words(&self) -> &[LinkageWord];

    /// The fixed-width link diagram, including its leading and trailing blank lines.
    fn diagram(&self) -> String;

    /// The constituent tree, newline-terminated.
    fn constituent_tree(&self) -> String;

    fn metrics(&self) -> LinkageMetrics;
}
