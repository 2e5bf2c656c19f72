//! Render state for the word list, derived from the target words and what
//! has been typed so far. Hosts map the statuses to colours.

use crate::session::TypedWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    Correct,
    Incorrect,
    Current,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Matched,
    Mismatched,
    Untyped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView<'a> {
    pub text: &'a str,
    pub status: WordStatus,
    /// Per-character marks, only filled in for the current word
    pub chars: Vec<(char, CharStatus)>,
}

/// Marks each character of `target` against the same position in `input`.
/// Characters typed beyond the end of the target are not shown.
pub fn char_statuses(target: &str, input: &str) -> Vec<(char, CharStatus)> {
    let mut typed = input.chars();
    target
        .chars()
        .map(|expected| {
            let status = match typed.next() {
                Some(c) if c == expected => CharStatus::Matched,
                Some(_) => CharStatus::Mismatched,
                None => CharStatus::Untyped,
            };
            (expected, status)
        })
        .collect()
}

pub fn word_views<'a>(
    target_words: &'a [String],
    typed_words: &[TypedWord],
    current_input: &str,
) -> Vec<WordView<'a>> {
    let current = typed_words.len();
    target_words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let (status, chars) = match typed_words.get(idx) {
                Some(done) if done.correct => (WordStatus::Correct, vec![]),
                Some(_) => (WordStatus::Incorrect, vec![]),
                None if idx == current => {
                    (WordStatus::Current, char_statuses(word, current_input))
                }
                None => (WordStatus::Pending, vec![]),
            };
            WordView {
                text: word.as_str(),
                status,
                chars,
            }
        })
        .collect()
}
