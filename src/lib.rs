use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod dictionary;
pub mod feedback;
pub mod game;
pub mod solver;

pub use dictionary::{Dictionary, DictionaryError};
pub use feedback::{FeedbackSource, Interactive, Simulated};
pub use game::{Game, GameError, GameResult, Outcome};
pub use solver::Solver;

/// Number of letters in every word.
pub const WORD_LEN: usize = 5;

/// Number of guesses a game allows by default.
pub const MAX_ATTEMPTS: usize = 6;

const ALPHABET: usize = (b'z' - b'a' + 1) as usize;

/// A word of exactly [`WORD_LEN`] ASCII lowercase letters.
///
/// Equality and hashing are by exact letter sequence, so words can key maps
/// and sets directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Word([u8; WORD_LEN]);

impl Word {
    pub fn bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("invalid word length '{0}'")]
    Length(String),
    #[error("invalid character in word '{0}'")]
    Alphabet(String),
}

impl TryFrom<&str> for Word {
    type Error = WordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let bytes: [u8; WORD_LEN] = value
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::Length(value.to_string()))?;
        if !bytes.iter().all(|b| b.is_ascii_lowercase()) {
            return Err(WordError::Alphabet(value.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction guarantees ASCII lowercase.
        f.write_str(std::str::from_utf8(&self.0).expect("words are ASCII"))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self)
    }
}

/// The color a guessed letter receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Correctness {
    /// Green
    Correct,
    /// Yellow
    Misplaced,
    /// Gray
    Wrong,
}

/// One color per guess position.
pub type Feedback = [Correctness; WORD_LEN];

/// The pattern a winning guess receives.
pub const ALL_CORRECT: Feedback = [Correctness::Correct; WORD_LEN];

/// Number of distinct feedback patterns.
pub const MAX_PATTERN_ENUM: usize = 3 * 3 * 3 * 3 * 3;

impl Correctness {
    /// Computes the feedback for `guess` played against `answer`.
    ///
    /// A repeated letter in the guess is marked `Misplaced` only as many
    /// times as the answer has unaccounted-for copies of it; `Correct`
    /// positions claim their copy first, and remaining copies are handed
    /// out left to right.
    pub fn compute(answer: Word, guess: Word) -> Feedback {
        let mut c = [Correctness::Wrong; WORD_LEN];
        // Array indexed by lowercase ascii letters
        let mut misplaced = [0u8; ALPHABET];

        // Find all correct letters
        for ((&answer, &guess), c) in answer.bytes().iter().zip(guess.bytes()).zip(c.iter_mut()) {
            if answer == guess {
                *c = Correctness::Correct
            } else {
                // If the letter does not match, count it as misplaced
                misplaced[(answer - b'a') as usize] += 1;
            }
        }
        // Check all of the non matching letters if they are misplaced
        for (&guess, c) in guess.bytes().iter().zip(c.iter_mut()) {
            // If the letter was guessed wrong and the same letter was counted as misplaced
            if *c == Correctness::Wrong && misplaced[(guess - b'a') as usize] > 0 {
                *c = Correctness::Misplaced;
                misplaced[(guess - b'a') as usize] -= 1;
            }
        }

        c
    }

    /// Maps a feedback pattern to a dense index in `0..MAX_PATTERN_ENUM`.
    pub fn pack(mask: &Feedback) -> u8 {
        mask.iter().fold(0, |acc, c| {
            acc * 3
                + match c {
                    Correctness::Correct => 0,
                    Correctness::Misplaced => 1,
                    Correctness::Wrong => 2,
                }
        })
    }
}

/// A guess together with the feedback it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    pub word: Word,
    pub mask: Feedback,
}

impl Guess {
    /// Checks whether `candidate` could have produced this observation.
    /// This is equivalent to
    ///     Correctness::compute(candidate, self.word) == self.mask
    /// decided per position from letter counts without computing the full
    /// mask for the tested word.
    pub fn matches(&self, candidate: Word) -> bool {
        // Letter counts in the candidate, in the guess, and among guess
        // positions marked Correct or Misplaced.
        let mut candidate_count = [0u8; ALPHABET];
        let mut guess_count = [0u8; ALPHABET];
        let mut marked_count = [0u8; ALPHABET];
        for ((&c, &g), mask) in candidate
            .bytes()
            .iter()
            .zip(self.word.bytes())
            .zip(self.mask.iter())
        {
            candidate_count[(c - b'a') as usize] += 1;
            guess_count[(g - b'a') as usize] += 1;
            if *mask != Correctness::Wrong {
                marked_count[(g - b'a') as usize] += 1;
            }
        }

        for ((&c, &g), mask) in candidate
            .bytes()
            .iter()
            .zip(self.word.bytes())
            .zip(self.mask.iter())
        {
            let matched = c == g;
            let g = (g - b'a') as usize;
            match mask {
                Correctness::Correct => {
                    if !matched {
                        return false;
                    }
                }
                Correctness::Misplaced => {
                    // The candidate must hold this letter elsewhere, with
                    // enough copies to cover every Correct/Misplaced mark.
                    if matched || candidate_count[g] < marked_count[g] {
                        return false;
                    }
                }
                Correctness::Wrong => {
                    // A candidate with as many copies as the guess used
                    // would have forced another non-gray mark.
                    if matched || candidate_count[g] >= guess_count[g] {
                        return false;
                    }
                }
            }
        }

        true
    }
}

#[cfg(test)]
macro_rules! word {
    ($w:expr) => {
        $crate::Word::try_from($w).unwrap()
    };
}

#[cfg(test)]
macro_rules! mask {
    (C) => {$crate::Correctness::Correct};
    (M) => {$crate::Correctness::Misplaced};
    (W) => {$crate::Correctness::Wrong};
    ($($c:tt)+) => {[
        $(mask!($c)),+
    ]}
}

#[cfg(test)]
pub(crate) use {mask, word};

#[cfg(test)]
mod tests {
    mod word {
        use crate::{Word, WordError};

        #[test]
        fn parses() {
            let w: Word = "crane".try_into().unwrap();
            assert_eq!(w.to_string(), "crane");
        }

        #[test]
        fn rejects_wrong_length() {
            assert_eq!(
                Word::try_from("cran"),
                Err(WordError::Length("cran".to_string()))
            );
            assert_eq!(
                Word::try_from("cranes"),
                Err(WordError::Length("cranes".to_string()))
            );
        }

        #[test]
        fn rejects_non_lowercase() {
            assert_eq!(
                Word::try_from("crAne"),
                Err(WordError::Alphabet("crAne".to_string()))
            );
            assert_eq!(
                Word::try_from("cran3"),
                Err(WordError::Alphabet("cran3".to_string()))
            );
            // multi-byte input must not slip past as five characters
            assert!(Word::try_from("cräne").is_err());
        }
    }

    mod compute {
        use crate::{mask, word, Correctness};

        macro_rules! check_compute {
            ($answer:literal + $guess:literal => [$($mask:tt)+]) => {
                assert_eq!(
                    Correctness::compute(word!($answer), word!($guess)),
                    mask![$($mask )+],
                    "guess {} against {}",
                    $guess,
                    $answer,
                );
            };
        }

        #[test]
        fn all_green() {
            check_compute!("abcde" + "abcde" => [C C C C C]);
        }

        #[test]
        fn all_gray() {
            check_compute!("abcde" + "fghij" => [W W W W W]);
        }

        #[test]
        fn all_yellow() {
            check_compute!("abcde" + "eabcd" => [M M M M M]);
        }

        #[test]
        fn repeat_green() {
            check_compute!("aabbb" + "aaccc" => [C C W W W]);
        }

        #[test]
        fn repeat_yellow() {
            check_compute!("aabbb" + "ccaac" => [W W M M W]);
        }

        #[test]
        fn repeat_some_green() {
            check_compute!("aabbb" + "caacc" => [W C M W W]);
        }

        #[test]
        fn only_leftmost_duplicates_go_yellow() {
            // one copy in the answer, many in the guess
            check_compute!("bbbba" + "axxxx" => [M W W W W]);
            check_compute!("bbcba" + "aaxxx" => [M W W W W]);
        }

        #[test]
        fn shuffled_letters() {
            check_compute!("adbce" + "abcde" => [C M M M C]);
        }

        #[test]
        fn speed_against_erase() {
            check_compute!("erase" + "speed" => [M W M M W]);
        }

        #[test]
        fn sassy_against_class() {
            check_compute!("class" + "sassy" => [M M W C W]);
        }

        #[test]
        fn self_compute_is_all_green() {
            for w in ["augur", "sassy", "zzzzz", "abcde"] {
                assert_eq!(
                    Correctness::compute(word!(w), word!(w)),
                    crate::ALL_CORRECT,
                    "{} against itself",
                    w,
                );
            }
        }

        #[test]
        fn marks_never_exceed_answer_count() {
            // Correct+Misplaced marks for a letter are bounded by the
            // letter's count in the answer.
            for (answer, guess) in [
                ("class", "sassy"),
                ("erase", "speed"),
                ("azzaz", "aaabb"),
                ("baccc", "aaddd"),
                ("aabbb", "ccaac"),
            ] {
                let (answer, guess) = (word!(answer), word!(guess));
                let mask = Correctness::compute(answer, guess);
                for letter in b'a'..=b'z' {
                    let marks = guess
                        .bytes()
                        .iter()
                        .zip(mask.iter())
                        .filter(|&(&g, m)| g == letter && *m != Correctness::Wrong)
                        .count();
                    let available = answer.bytes().iter().filter(|&&a| a == letter).count();
                    assert!(
                        marks <= available,
                        "{} marks for '{}' but only {} in {}",
                        marks,
                        letter as char,
                        available,
                        answer,
                    );
                }
            }
        }

        #[test]
        fn dremann_from_chat() {
            check_compute!("azzaz" + "aaabb" => [C M W W W]);
        }

        #[test]
        fn itsapoque_from_chat() {
            check_compute!("baccc" + "aaddd" => [W C W W W]);
        }

        #[test]
        fn ricoello_from_chat() {
            check_compute!("abcde" + "aacde" => [C W C C C]);
        }
    }

    mod guess_matcher {
        use crate::{mask, word, Guess};

        macro_rules! check {
            ($prev:literal + [$($mask:tt)+] allows $next:literal) => {
                assert!(Guess {
                    word: word!($prev),
                    mask: mask![$($mask )+]
                }
                .matches(word!($next)));
                assert_eq!(
                    $crate::Correctness::compute(word!($next), word!($prev)),
                    mask![$($mask )+]
                );
            };
            ($prev:literal + [$($mask:tt)+] disallows $next:literal) => {
                assert!(!Guess {
                    word: word!($prev),
                    mask: mask![$($mask )+]
                }
                .matches(word!($next)));
                assert_ne!(
                    $crate::Correctness::compute(word!($next), word!($prev)),
                    mask![$($mask )+]
                );
            }
        }

        #[test]
        fn basic() {
            check!("abcde" + [C C C C C] allows "abcde");
            check!("abcdf" + [C C C C C] disallows "abcde");
            check!("abcde" + [W W W W W] allows "fghij");
            check!("abcde" + [M M M M M] allows "eabcd");
            check!("abcde" + [W W W W W] disallows "bcdea");
        }

        #[test]
        fn duplicates() {
            check!("baaaa" + [W C M W W] allows "aaccc");
            check!("baaaa" + [W C M W W] disallows "caacc");
            check!("aaabb" + [C M W W W] disallows "accaa");
            check!("tares" + [W M M W W] disallows "brink");
        }

        #[test]
        fn gray_bounds_letter_count() {
            // A gray mark caps the candidate's copies of that letter below
            // the number the guess used.
            check!("sassy" + [M M W C W] allows "class");
            check!("sassy" + [M M W C W] disallows "slosh");
            check!("speed" + [M W M M W] allows "erase");
        }

        #[test]
        fn yellow_requires_enough_copies() {
            check!("aaaab" + [C C C W M] allows "aaabc");
            check!("aaabc" + [C C C M W] allows "aaaab");
        }
    }
}
