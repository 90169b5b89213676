//! Character-class text cleaner.
//!
//! First stage of the review pipeline. Every character that is not a letter,
//! a digit, whitespace or one of the sentence terminators `.`, `!`, `?` is
//! replaced with a single ASCII space. Nothing is ever deleted, so the
//! cleaned text has exactly as many characters as the input and sentence or
//! token positions keep their meaning.
//!
//! "Letter or digit" is Rust's [`char::is_alphanumeric`], which also holds for
//! combining marks carrying the Alphabetic property, such as Devanagari vowel
//! signs: `"का"` stays `"का"`. Whitespace is [`char::is_whitespace`] plus the
//! ASCII separators `0x1C..=0x1F`; later stages split and trim on the same
//! set through [`is_kept_whitespace`].
//!
//! ```
//! use review_core::analyzer::cleaner::TextCleaner;
//!
//! let cleaner = TextCleaner::new();
//! assert_eq!(cleaner.clean("Great, product :-)"), "Great  product    ");
//! ```

const fn build_ascii_table() -> [bool; 128] {
    let mut table = [false; 128];
    let mut b = 0u8;
    while b < 128 {
        table[b as usize] = b.is_ascii_alphanumeric()
            || matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C | 0x1C..=0x1F)
            || matches!(b, b'.' | b'!' | b'?');
        b += 1;
    }
    table
}

/// `true` for ASCII bytes that survive cleaning unchanged.
static KEEP_ASCII: [bool; 128] = build_ascii_table();

/// Returns true if `c` is kept as-is by the cleaner.
#[inline(always)]
pub fn is_kept(c: char) -> bool {
    if c.is_ascii() {
        KEEP_ASCII[c as usize]
    } else {
        c.is_alphanumeric() || is_kept_whitespace(c)
    }
}

/// Returns true if `c` counts as whitespace for cleaning, segmenting and
/// tokenizing.
#[inline(always)]
pub fn is_kept_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Replaces every non-kept character with a space.
///
/// Stateless; one instance can be shared across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCleaner;

impl TextCleaner {
    /// Creates a cleaner.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Cleans text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    #[inline]
    pub fn clean_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let bytes = input.as_bytes();
        let mut i = 0usize;

        while i < bytes.len() {
            let b = bytes[i];
            if b < 128 {
                let start = i;
                while i < bytes.len() && bytes[i] < 128 {
                    i += 1;
                }
                for &b in &bytes[start..i] {
                    out.push(if KEEP_ASCII[b as usize] { b as char } else { ' ' });
                }
                continue;
            }

            // Non-ASCII: `i` sits on a char boundary because ASCII runs end on one.
            let rest = &input[i..];
            let Some(ch) = rest.chars().next() else {
                break;
            };
            i += ch.len_utf8();
            out.push(if is_kept(ch) { ch } else { ' ' });
        }
    }

    /// Cleans text and returns a new String.
    #[inline]
    pub fn clean(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.clean_into(input, &mut out);
        out
    }
}
