use crate::Word;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// The two word sets a game draws from: guesses the solver may type but
/// that are never the secret, and the universe of valid secrets.
///
/// Loaded once per process and immutable afterwards; the live candidate
/// pool lives on [`crate::Solver`] so concurrent games can share one
/// `Dictionary` read-only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Dictionary {
    accepted_guesses: Vec<Word>,
    possible_answers: Vec<Word>,
    /// Lazily memoized optimal opening guess, shared by every game played
    /// against this dictionary. See [`crate::Solver`].
    #[serde(skip)]
    pub(crate) opener: OnceCell<Word>,
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("could not read dictionary")]
    Io(#[from] std::io::Error),
    #[error("malformed dictionary")]
    Parse(#[from] serde_json::Error),
    #[error("dictionary has no possible answers")]
    NoAnswers,
}

impl Dictionary {
    /// Parses a dictionary from its JSON form:
    ///
    /// ```json
    /// { "acceptedGuesses": ["aahed", ...], "possibleAnswers": ["cigar", ...] }
    /// ```
    ///
    /// Every entry must be exactly [`crate::WORD_LEN`] lowercase letters;
    /// a malformed entry fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let dictionary: Dictionary = serde_json::from_str(json)?;
        if dictionary.possible_answers.is_empty() {
            return Err(DictionaryError::NoAnswers);
        }
        Ok(dictionary)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The dictionary compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_json(include_str!("../dictionary.json"))
            .expect("bundled dictionary is well-formed")
    }

    pub fn accepted_guesses(&self) -> &[Word] {
        &self.accepted_guesses
    }

    pub fn possible_answers(&self) -> &[Word] {
        &self.possible_answers
    }

    /// Every word the solver may legally play right now: the accepted
    /// guesses followed by the still-possible answers. Remaining answers
    /// shrink as the game goes on, so this is recomputed from `remaining`
    /// on every call rather than cached.
    pub fn valid_guesses<'a>(
        &'a self,
        remaining: &'a [Word],
    ) -> impl Iterator<Item = Word> + 'a {
        self.accepted_guesses
            .iter()
            .chain(remaining.iter())
            .copied()
    }
}
