//! Sentence Segmenter Module
//!
//! Splits cleaned review text into sentences on the terminal punctuation
//! characters `.`, `!` and `?`. It runs on the output of the
//! [`TextCleaner`](super::cleaner::TextCleaner), before stop-word removal,
//! so sentence counts are independent of word filtering.
//!
//! ## Rules
//!
//! - A terminator closes the current sentence and is included in it.
//! - Every emitted sentence is trimmed of surrounding whitespace, using the
//!   cleaner's definition ([`is_kept_whitespace`]).
//! - A terminator always closes a sentence, even one that is only the
//!   terminator itself (`"!!"` yields `["!", "!"]`).
//! - Text after the last terminator becomes a final sentence only if it has
//!   non-whitespace content.
//!
//! ```
//! use review_core::analyzer::sentence::SentenceSegmenter;
//!
//! let segmenter = SentenceSegmenter::new();
//! let sentences: Vec<&str> = segmenter.split("Great product! Loved it.").collect();
//! assert_eq!(sentences, ["Great product!", "Loved it."]);
//! ```
//!
//! ## How It Works
//!
//! The scanner is a two-state machine. In `InSentence { start }` the bytes
//! from `start` onward form the running buffer; `memchr3` finds the next
//! terminator, the span up to and including it is emitted and the buffer
//! restarts right after it. When no terminator remains, the trimmed tail is
//! emitted once and the machine moves to `Exhausted`. Terminators are ASCII,
//! so every split lands on a UTF-8 boundary.

use memchr::memchr3;

use crate::analyzer::cleaner::is_kept_whitespace;

/// Returns true for the three sentence terminators.
#[inline(always)]
pub const fn is_terminator(b: u8) -> bool {
    matches!(b, b'.' | b'!' | b'?')
}

/// Stateless sentence splitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    /// Creates a segmenter.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns an iterator over the sentences of `text`, left to right.
    ///
    /// Each call starts a fresh scan, so the sequence is restartable.
    #[inline]
    pub fn split<'t>(&self, text: &'t str) -> Sentences<'t> {
        Sentences {
            text,
            state: ScanState::InSentence { start: 0 },
        }
    }

    /// Counts sentences without collecting them.
    #[inline]
    pub fn count(&self, text: &str) -> usize {
        self.split(text).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating the sentence that begins at `start`.
    InSentence { start: usize },
    /// Tail emitted (or empty); nothing left.
    Exhausted,
}

/// Iterator over the sentences of one text.
#[derive(Debug, Clone)]
pub struct Sentences<'t> {
    text: &'t str,
    state: ScanState,
}

impl<'t> Iterator for Sentences<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        loop {
            let ScanState::InSentence { start } = self.state else {
                return None;
            };

            let rest = &self.text.as_bytes()[start..];
            match memchr3(b'.', b'!', b'?', rest) {
                Some(offset) => {
                    let end = start + offset + 1;
                    self.state = ScanState::InSentence { start: end };
                    return Some(self.text[start..end].trim_matches(is_kept_whitespace));
                }
                None => {
                    self.state = ScanState::Exhausted;
                    let tail = self.text[start..].trim_matches(is_kept_whitespace);
                    if tail.is_empty() {
                        continue;
                    }
                    return Some(tail);
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}
