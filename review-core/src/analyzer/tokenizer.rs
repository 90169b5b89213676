//! Streaming English Tokenizer Module
//!
//! The default [`WordTokenizer`] capability. It takes cleaned review text
//! (letters, digits, whitespace and `. ! ?` only) and splits it into word
//! and punctuation tokens, following the treebank conventions English
//! taggers are trained on:
//!
//! ```ignore
//! "Great product! Loved it."  ->  ["Great", "product", "!", "Loved", "it", "."]
//! "Rated 4.5... really?"      ->  ["Rated", "4.5", "...", "really", "?"]
//! ```
//!
//! ## Rules
//!
//! - Whitespace separates chunks: any Unicode whitespace plus the ASCII
//!   separators `0x1C..=0x1F` the cleaner keeps.
//! - `!` and `?` are always tokens of their own, one per character.
//! - A run of periods at the start or end of a chunk is split off as a
//!   single token (`"."`, `"..."`); periods inside a word stay (`"4.5"`).
//! - Case is preserved.
//!
//! ## Zero Allocation
//!
//! [`EnglishTokenizer::tokenize_with`] emits `&str` slices of the input via a
//! callback. The [`WordTokenizer`] impl collects them into owned tokens.

use memchr::memchr2_iter;
use review_types::{PipelineError, Token, WordTokenizer};

use crate::analyzer::cleaner::is_kept_whitespace;

/// Rule-based English word tokenizer.
#[derive(Debug, Default, Copy, Clone)]
pub struct EnglishTokenizer;

impl EnglishTokenizer {
    /// Creates a tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes cleaned input and emits each token left to right.
    #[inline]
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize_with<'n, F>(&self, cleaned: &'n str, mut emit: F)
    where
        F: FnMut(&'n str),
    {
        for chunk in cleaned.split(is_kept_whitespace).filter(|c| !c.is_empty()) {
            split_chunk(chunk, &mut emit);
        }
    }
}

impl WordTokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError> {
        let mut tokens = Vec::new();
        self.tokenize_with(text, |t| tokens.push(t.to_owned()));
        Ok(tokens)
    }
}

/// Splits one whitespace-free chunk on `!`/`?`, then peels edge periods.
#[inline]
fn split_chunk<'n, F>(chunk: &'n str, emit: &mut F)
where
    F: FnMut(&'n str),
{
    let bytes = chunk.as_bytes();
    let mut start = 0usize;

    for i in memchr2_iter(b'!', b'?', bytes) {
        if start < i {
            peel_periods(&chunk[start..i], emit);
        }
        emit(&chunk[i..i + 1]);
        start = i + 1;
    }

    if start < bytes.len() {
        peel_periods(&chunk[start..], emit);
    }
}

#[inline]
fn peel_periods<'n, F>(piece: &'n str, emit: &mut F)
where
    F: FnMut(&'n str),
{
    let bytes = piece.as_bytes();
    let lead = bytes.iter().take_while(|&&b| b == b'.').count();
    if lead == bytes.len() {
        emit(piece);
        return;
    }
    let trail = bytes.iter().rev().take_while(|&&b| b == b'.').count();
    let core_end = bytes.len() - trail;

    if lead > 0 {
        emit(&piece[..lead]);
    }
    emit(&piece[lead..core_end]);
    if trail > 0 {
        emit(&piece[core_end..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<&str> {
        let mut out = Vec::new();
        EnglishTokenizer::new().tokenize_with(input, |t| out.push(t));
        out
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hello"), ["hello"]);
    }

    #[test]
    fn words_and_terminators() {
        assert_eq!(
            collect("Great product! Loved it."),
            ["Great", "product", "!", "Loved", "it", "."]
        );
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("   \t\n").is_empty());
    }

    #[test]
    fn case_preserved() {
        assert_eq!(collect("The THE the"), ["The", "THE", "the"]);
    }

    #[test]
    fn repeated_bangs_are_separate() {
        assert_eq!(collect("wow!!!"), ["wow", "!", "!", "!"]);
        assert_eq!(collect("what?!"), ["what", "?", "!"]);
    }

    #[test]
    fn ellipsis_is_one_token() {
        assert_eq!(collect("well... ok"), ["well", "...", "ok"]);
        assert_eq!(collect("..."), ["..."]);
    }

    #[test]
    fn interior_period_kept() {
        assert_eq!(collect("rated 4.5 stars"), ["rated", "4.5", "stars"]);
    }

    #[test]
    fn leading_period_split() {
        assert_eq!(collect(".net"), [".", "net"]);
    }

    #[test]
    fn periods_around_bang() {
        assert_eq!(collect("a.!b."), ["a", ".", "!", "b", "."]);
    }

    #[test]
    fn irregular_whitespace() {
        assert_eq!(collect("  a \t b\n\nc  "), ["a", "b", "c"]);
    }

    #[test]
    fn ascii_separators_split_chunks() {
        assert_eq!(collect("a\u{1c}b\u{1f}\u{1d}c."), ["a", "b", "c", "."]);
        assert!(collect("\u{1e}").is_empty());
    }

    #[test]
    fn unicode_words() {
        assert_eq!(collect("café crème!"), ["café", "crème", "!"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world. again!");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        EnglishTokenizer::new().tokenize_with(&input, |t| {
            let ptr = t.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn trait_impl_matches_streaming() {
        let text = "Fast shipping. Works great!";
        let owned = EnglishTokenizer::new().tokenize(text).unwrap();
        assert_eq!(owned, collect(text));
    }

    #[test]
    fn deterministic() {
        let t = EnglishTokenizer::new();
        let text = "Same input, same output... always!";
        assert_eq!(t.tokenize(text).unwrap(), t.tokenize(text).unwrap());
    }
}
