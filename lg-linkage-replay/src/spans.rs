//! Word to sentence offset alignment.

use lg_linkage::{LinkageWord, LEFT_WALL, RIGHT_WALL};
use std::iter;
use unicode_segmentation::UnicodeSegmentation;

/// Place recorded words on the sentence text.
///
/// Walls are zero-width: `LEFT-WALL` at the start, `RIGHT-WALL` at the end.
/// Every other word takes the next non-whitespace word-boundary segment of
/// the sentence, whatever its recorded spelling (spelling guesses and
/// subscripted words keep the span of the text they stand for).
pub fn align_words(sentence: &str, words: &[String]) -> Result<Vec<LinkageWord>, String> {
    let char_len = sentence.chars().count();
    let mut segments = sentence
        .split_word_bound_indices()
        .filter(|(_, segment)| !segment.trim().is_empty());

    words
        .iter()
        .map(|word| match word.as_str() {
            LEFT_WALL => Ok(LinkageWord::new(word.as_str(), 0..0, 0..0)),
            RIGHT_WALL => Ok(LinkageWord::new(
                word.as_str(),
                char_len..char_len,
                sentence.len()..sentence.len(),
            )),
            _ => {
                let (offset, segment) = segments
                    .next()
                    .ok_or_else(|| format!("no sentence text left for word `{}`", word))?;
                let start = sentence[..offset].chars().count();
                Ok(LinkageWord::new(
                    word.as_str(),
                    start..start + segment.chars().count(),
                    offset..offset + segment.len(),
                ))
            }
        })
        .collect()
}

/// Build words from explicit character spans, deriving the byte spans.
pub fn explicit_spans(
    sentence: &str,
    words: &[String],
    spans: &[(usize, usize)],
) -> Result<Vec<LinkageWord>, String> {
    if words.len() != spans.len() {
        return Err(format!(
            "{} words but {} spans recorded",
            words.len(),
            spans.len()
        ));
    }

    // byte offset of every char boundary, end of sentence included
    let boundaries: Vec<usize> = sentence
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(iter::once(sentence.len()))
        .collect();

    words
        .iter()
        .zip(spans)
        .map(|(word, &(start, end))| {
            match (boundaries.get(start), boundaries.get(end)) {
                (Some(&byte_start), Some(&byte_end)) if start <= end => Ok(LinkageWord::new(
                    word.as_str(),
                    start..end,
                    byte_start..byte_end,
                )),
                _ => Err(format!(
                    "span ({}, {}) of word `{}` is outside the sentence",
                    start, end, word
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn spans(aligned: &[LinkageWord]) -> Vec<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        aligned
            .iter()
            .map(|w| (w.chars.clone(), w.bytes.clone()))
            .collect()
    }

    #[test]
    fn test_align_ascii() {
        let aligned = align_words(
            "this is a test",
            &words(&["LEFT-WALL", "this", "is", "a", "test", "RIGHT-WALL"]),
        )
        .unwrap();
        assert_eq!(
            spans(&aligned),
            vec![
                (0..0, 0..0),
                (0..4, 0..4),
                (5..7, 5..7),
                (8..9, 8..9),
                (10..14, 10..14),
                (14..14, 14..14),
            ]
        );
    }

    #[test]
    fn test_align_multibyte() {
        let aligned = align_words(
            "café au lait",
            &words(&["LEFT-WALL", "café", "au", "lait"]),
        )
        .unwrap();
        assert_eq!(
            spans(&aligned),
            vec![(0..0, 0..0), (0..4, 0..5), (5..7, 6..8), (8..12, 9..13)]
        );
    }

    #[test]
    fn test_align_keeps_guess_spelling() {
        let aligned = align_words("thiss is", &words(&["LEFT-WALL", "this[~]", "is"])).unwrap();
        assert_eq!(aligned[1].text, "this[~]");
        assert_eq!(aligned[1].chars, 0..5);
    }

    #[test]
    fn test_align_runs_out_of_text() {
        let err = align_words("one", &words(&["one", "two"])).unwrap_err();
        assert_eq!(err, "no sentence text left for word `two`");
    }

    #[test]
    fn test_explicit_spans() {
        let aligned = explicit_spans(
            "don't café",
            &words(&["do", "n't", "café"]),
            &[(0, 2), (2, 5), (6, 10)],
        )
        .unwrap();
        assert_eq!(
            spans(&aligned),
            vec![(0..2, 0..2), (2..5, 2..5), (6..10, 6..11)]
        );
    }

    #[test]
    fn test_explicit_spans_out_of_range() {
        assert!(explicit_spans("ab", &words(&["ab"]), &[(0, 3)]).is_err());
        assert!(explicit_spans("ab", &words(&["ab"]), &[(2, 1)]).is_err());
        assert!(explicit_spans("ab", &words(&["a", "b"]), &[(0, 1)]).is_err());
    }
}
