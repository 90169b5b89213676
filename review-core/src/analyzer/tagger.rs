//! Lexicon-driven part-of-speech tagger.
//!
//! The default [`PosTagger`] capability. It assigns Penn Treebank labels
//! without a statistical model, in this order:
//!
//! 1. Lexicon lookup on the lowercase token (user entries override the
//!    built-in closed-class and review vocabulary).
//! 2. Punctuation: `.`, `!`, `?` tag as `.`; a run of periods tags as `:`.
//! 3. Numbers tag as `CD`.
//! 4. Capitalized tokens not following a terminator, and all-caps
//!    abbreviations, tag as `NNP`.
//! 5. Suffix rules (`-ly` → `RB`, `-ing` → `VBG`, `-ed` → `VBD`,
//!    adjective endings → `JJ`, plural `-s` → `NNS`).
//! 6. Everything else is `NN`.
//!
//! Any other model can be plugged into the pipeline through the trait.

use std::fs;
use std::io;
use std::path::Path;

use review_types::{PipelineError, PosTagger, TaggedToken, Token};
use rustc_hash::FxHashMap;

use crate::analyzer::sentence::is_terminator;

#[rustfmt::skip]
const BUILTIN_LEXICON: &[(&str, &str)] = &[
    // determiners, pronouns, function words
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("these", "DT"),
    ("those", "DT"), ("every", "DT"), ("each", "DT"), ("all", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("another", "DT"),
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("itself", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"), ("its", "PRP$"),
    ("our", "PRP$"), ("their", "PRP$"),
    ("in", "IN"), ("on", "IN"), ("at", "IN"), ("of", "IN"), ("for", "IN"), ("with", "IN"),
    ("from", "IN"), ("by", "IN"), ("about", "IN"), ("into", "IN"), ("over", "IN"),
    ("after", "IN"), ("before", "IN"), ("under", "IN"), ("between", "IN"),
    ("through", "IN"), ("during", "IN"), ("without", "IN"), ("because", "IN"),
    ("if", "IN"), ("than", "IN"), ("while", "IN"), ("since", "IN"), ("though", "IN"),
    ("although", "IN"), ("unless", "IN"),
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"), ("yet", "CC"),
    ("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("should", "MD"),
    ("may", "MD"), ("might", "MD"), ("must", "MD"), ("shall", "MD"),
    ("to", "TO"), ("there", "EX"),
    ("which", "WDT"), ("who", "WP"), ("what", "WP"), ("whom", "WP"),
    ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    ("not", "RB"), ("t", "RB"),
    ("is", "VBZ"), ("has", "VBZ"), ("does", "VBZ"), ("are", "VBP"), ("am", "VBP"),
    ("have", "VBP"), ("do", "VBP"), ("was", "VBD"), ("were", "VBD"), ("had", "VBD"),
    ("did", "VBD"), ("be", "VB"), ("been", "VBN"), ("being", "VBG"),
    // adjectives common in reviews
    ("good", "JJ"), ("great", "JJ"), ("excellent", "JJ"), ("amazing", "JJ"),
    ("awesome", "JJ"), ("bad", "JJ"), ("terrible", "JJ"), ("horrible", "JJ"),
    ("awful", "JJ"), ("nice", "JJ"), ("perfect", "JJ"), ("poor", "JJ"), ("happy", "JJ"),
    ("easy", "JJ"), ("hard", "JJ"), ("cheap", "JJ"), ("expensive", "JJ"), ("fast", "JJ"),
    ("slow", "JJ"), ("new", "JJ"), ("old", "JJ"), ("small", "JJ"), ("big", "JJ"),
    ("large", "JJ"), ("little", "JJ"), ("quick", "JJ"), ("long", "JJ"), ("short", "JJ"),
    ("fine", "JJ"), ("solid", "JJ"), ("sturdy", "JJ"), ("comfortable", "JJ"),
    ("beautiful", "JJ"), ("pleased", "JJ"), ("satisfied", "JJ"), ("disappointed", "JJ"),
    ("broken", "JJ"), ("overall", "JJ"), ("worth", "JJ"), ("whole", "JJ"),
    ("first", "JJ"), ("last", "JJ"), ("other", "JJ"), ("same", "JJ"), ("only", "JJ"),
    ("better", "JJR"), ("worse", "JJR"), ("cheaper", "JJR"), ("faster", "JJR"),
    ("best", "JJS"), ("worst", "JJS"),
    // adverbs
    ("really", "RB"), ("very", "RB"), ("well", "RB"), ("also", "RB"), ("even", "RB"),
    ("still", "RB"), ("never", "RB"), ("always", "RB"), ("again", "RB"), ("quite", "RB"),
    ("pretty", "RB"), ("too", "RB"), ("just", "RB"), ("so", "RB"), ("back", "RB"),
    ("ever", "RB"), ("already", "RB"), ("almost", "RB"), ("soon", "RB"), ("once", "RB"),
    ("now", "RB"), ("here", "RB"), ("far", "RB"), ("much", "RB"),
    // verbs
    ("love", "VBP"), ("like", "IN"), ("recommend", "VBP"), ("buy", "VB"), ("return", "VB"),
    ("work", "VB"), ("use", "VB"), ("get", "VB"), ("make", "VB"), ("need", "VBP"),
    ("want", "VBP"), ("think", "VBP"), ("know", "VBP"), ("go", "VB"), ("try", "VB"),
    ("order", "NN"), ("loved", "VBD"), ("liked", "VBD"), ("bought", "VBD"), ("got", "VBD"),
    ("made", "VBN"), ("used", "VBN"), ("came", "VBD"), ("went", "VBD"), ("broke", "VBD"),
    ("works", "VBZ"), ("loves", "VBZ"), ("looks", "VBZ"), ("feels", "VBZ"), ("fits", "VBZ"),
    ("says", "VBZ"), ("gets", "VBZ"), ("makes", "VBZ"), ("seems", "VBZ"),
    // interjections
    ("wow", "UH"), ("ok", "UH"), ("okay", "UH"), ("yes", "UH"), ("thanks", "UH"),
    ("please", "UH"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ic"];

/// Rule-based Penn Treebank tagger with an overridable lexicon.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: FxHashMap<String, String>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    /// Creates a tagger with the built-in lexicon.
    pub fn new() -> Self {
        let lexicon = BUILTIN_LEXICON
            .iter()
            .map(|&(word, tag)| (word.to_owned(), tag.to_owned()))
            .collect();
        Self { lexicon }
    }

    /// Adds or overrides lexicon entries. Words are matched lowercase.
    pub fn with_entries<W, T>(mut self, entries: impl IntoIterator<Item = (W, T)>) -> Self
    where
        W: AsRef<str>,
        T: Into<String>,
    {
        for (word, tag) in entries {
            self.lexicon.insert(word.as_ref().to_lowercase(), tag.into());
        }
        self
    }

    /// Loads `word<TAB>TAG` lines from a file (any whitespace separates the
    /// two fields). Blank lines and `#` comments are skipped.
    pub fn with_lexicon_file(self, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let resource_err = |source| PipelineError::Resource {
            path: path.to_path_buf(),
            source,
        };

        let contents = fs::read_to_string(path).map_err(resource_err)?;
        let mut entries = Vec::new();

        for (n, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(word), Some(tag), None) => entries.push((word, tag.to_owned())),
                _ => {
                    return Err(resource_err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("line {}: expected `word<TAB>TAG`", n + 1),
                    )))
                }
            }
        }

        Ok(self.with_entries(entries))
    }

    /// Number of lexicon entries.
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    /// Tags one token given the token before it, if any.
    pub fn tag_token(&self, token: &str, prev: Option<&str>) -> &str {
        let lower = token.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return tag;
        }

        let bytes = token.as_bytes();
        if !bytes.is_empty() && bytes.iter().all(|&b| is_terminator(b)) {
            return if bytes.iter().all(|&b| b == b'.') && bytes.len() > 1 {
                ":"
            } else {
                "."
            };
        }

        if is_number(token) {
            return "CD";
        }

        if is_proper(token, prev) {
            return "NNP";
        }

        suffix_tag(&lower)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, PipelineError> {
        let mut prev: Option<&str> = None;
        let tagged = tokens
            .iter()
            .map(|token| {
                let tag = self.tag_token(token, prev);
                prev = Some(token.as_str());
                TaggedToken::new(token.as_str(), tag)
            })
            .collect();
        Ok(tagged)
    }
}

#[inline]
fn is_number(token: &str) -> bool {
    let mut digits = false;
    for c in token.chars() {
        if c.is_numeric() {
            digits = true;
        } else if c != '.' {
            return false;
        }
    }
    digits
}

#[inline]
fn is_proper(token: &str, prev: Option<&str>) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }

    let rest: Vec<char> = chars.collect();
    let all_caps = !rest.is_empty() && rest.iter().all(|c| c.is_uppercase() || c.is_numeric());
    if all_caps {
        return true;
    }

    let sentence_start = match prev {
        None => true,
        Some(p) => p.bytes().last().is_some_and(is_terminator),
    };
    !sentence_start
}

fn suffix_tag(lower: &str) -> &'static str {
    let len = lower.chars().count();
    if len <= 3 {
        return "NN";
    }
    if lower.ends_with("ly") {
        return "RB";
    }
    if lower.ends_with("ing") {
        return "VBG";
    }
    if lower.ends_with("ed") {
        return "VBD";
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "JJ";
    }
    if lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return "NNS";
    }
    "NN"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tags(words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words.iter().map(|w| w.to_string()).collect();
        LexiconTagger::new()
            .tag(&tokens)
            .unwrap()
            .into_iter()
            .map(|t| t.category)
            .collect()
    }

    #[test]
    fn one_tag_per_token_in_order() {
        let tokens: Vec<Token> = ["Great", "product", "!", "Loved", "."]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let tagged = LexiconTagger::new().tag(&tokens).unwrap();
        assert_eq!(tagged.len(), tokens.len());
        for (t, tok) in tagged.iter().zip(&tokens) {
            assert_eq!(&t.token, tok);
        }
    }

    #[test]
    fn empty_input() {
        assert!(tags(&[]).is_empty());
    }

    #[test]
    fn lexicon_words() {
        assert_eq!(tags(&["great", "really", "loved"]), ["JJ", "RB", "VBD"]);
    }

    #[test]
    fn lexicon_is_case_insensitive() {
        assert_eq!(tags(&["Great"]), ["JJ"]);
    }

    #[test]
    fn punctuation() {
        assert_eq!(tags(&[".", "!", "?", "..."]), [".", ".", ".", ":"]);
    }

    #[test]
    fn numbers() {
        assert_eq!(tags(&["5", "4.5", "100"]), ["CD", "CD", "CD"]);
    }

    #[test]
    fn proper_nouns() {
        assert_eq!(tags(&["bought", "Samsung"]), ["VBD", "NNP"]);
        assert_eq!(tags(&["USB"]), ["NNP"]);
    }

    #[test]
    fn capital_after_terminator_is_not_proper() {
        assert_eq!(tags(&["!", "Battery"]), [".", "NN"]);
        assert_eq!(tags(&["Battery"]), ["NN"]);
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(
            tags(&["quickly", "charging", "arrived", "useful", "batteries", "phone", "glass"]),
            ["RB", "VBG", "VBD", "JJ", "NNS", "NN", "NN"]
        );
    }

    #[test]
    fn short_words_default_to_noun() {
        assert_eq!(tags(&["cat", "ed"]), ["NN", "NN"]);
    }

    #[test]
    fn user_entries_override() {
        let tagger = LexiconTagger::new().with_entries([("Great", "NN"), ("zoom", "VB")]);
        assert_eq!(tagger.tag_token("great", None), "NN");
        assert_eq!(tagger.tag_token("zoom", None), "VB");
    }

    #[test]
    fn lexicon_file_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        fs::write(&path, "# overrides\nphone\tNNX\n\nkindle  NNP\n").unwrap();

        let tagger = LexiconTagger::new().with_lexicon_file(&path).unwrap();

        assert_eq!(tagger.tag_token("phone", None), "NNX");
        assert_eq!(tagger.tag_token("Kindle", None), "NNP");
    }

    #[test]
    fn malformed_lexicon_line_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        fs::write(&path, "phone NN extra\n").unwrap();

        let err = LexiconTagger::new().with_lexicon_file(&path).unwrap_err();

        assert!(matches!(err, PipelineError::Resource { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn missing_lexicon_file() {
        let err = LexiconTagger::new()
            .with_lexicon_file("/definitely/not/here/lexicon.tsv")
            .unwrap_err();
        assert!(matches!(err, PipelineError::Resource { .. }));
    }
}
