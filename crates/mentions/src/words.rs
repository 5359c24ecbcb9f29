use crate::mention::{
    DYNAMIC_MENTIONS, DynamicMention, MENTION_SCHEME, MENTION_SENTINEL, SERIALIZED_STEM,
};

const DATA_SEPARATOR: &str = "?data=";

/// One element of a lossless partition produced by [`scan_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Word<'a> {
    /// A plain-text run, reproduced verbatim.
    Text(&'a str),
    /// A full `cody://serialized.v<digits>?data=..._` token.
    Serialized(&'a str),
    /// A dynamic mention trigger literal.
    Dynamic(&'a str, &'static DynamicMention),
}

impl<'a> Word<'a> {
    pub(crate) fn as_str(self) -> &'a str {
        match self {
            Word::Text(s) | Word::Serialized(s) | Word::Dynamic(s, _) => s,
        }
    }
}

/// Splits text into plain-text runs and mention words. Concatenating the
/// result reconstructs the input exactly.
///
/// An occurrence of the `cody://` scheme is the left boundary of a candidate
/// word; it does not appear in ordinary prose, so no preceding whitespace is
/// required (and a `\` in front of a token does not escape it). The right
/// boundary is the sentinel for serialized tokens and the end of the literal
/// for triggers, so trailing punctuation, apostrophes, and backticks stay in
/// the surrounding plain text.
pub fn split_to_words(input: &str) -> Vec<&str> {
    scan_words(input).into_iter().map(Word::as_str).collect()
}

pub(crate) fn scan_words(input: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut segment_start = 0;
    let mut scan = 0;

    while let Some(found) = input[scan..].find(MENTION_SCHEME) {
        let start = scan + found;
        let Some(word) = match_word(&input[start..]) else {
            scan = start + MENTION_SCHEME.len();
            continue;
        };
        if start > segment_start {
            words.push(Word::Text(&input[segment_start..start]));
        }
        words.push(word);
        segment_start = start + word.as_str().len();
        scan = segment_start;
    }

    if segment_start < input.len() {
        words.push(Word::Text(&input[segment_start..]));
    }
    words
}

fn match_word(rest: &str) -> Option<Word<'_>> {
    if let Some(len) = match_serialized(rest) {
        return Some(Word::Serialized(&rest[..len]));
    }
    DYNAMIC_MENTIONS
        .iter()
        .find(|entry| rest.starts_with(entry.trigger))
        .map(|entry| Word::Dynamic(&rest[..entry.trigger.len()], entry))
}

/// Greedy match of the serialized-token grammar at the start of `rest`:
/// stem, version digits, `?data=`, a base64 run, and the sentinel.
fn match_serialized(rest: &str) -> Option<usize> {
    let tail = rest.strip_prefix(SERIALIZED_STEM)?;
    let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let tail = tail[digits..].strip_prefix(DATA_SEPARATOR)?;
    let data = tail.bytes().take_while(|byte| is_base64(*byte)).count();
    if !tail[data..].starts_with(MENTION_SENTINEL) {
        return None;
    }
    Some(SERIALIZED_STEM.len() + digits + DATA_SEPARATOR.len() + data + MENTION_SENTINEL.len_utf8())
}

fn is_base64(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'=')
}
