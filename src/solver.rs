use crate::{Correctness, Dictionary, Feedback, GameError, Guess, Word, MAX_PATTERN_ENUM};
use rand::seq::SliceRandom;
use rand::Rng;

/// The decision core of a single game: the live candidate pool plus the
/// entropy search that picks each guess.
///
/// `remaining` starts as the dictionary's full answer set and only ever
/// shrinks; it is mutated once per turn by [`Solver::apply_feedback`] and
/// owned exclusively by this game. The RNG is injected so small-pool
/// tie-breaking is deterministic under a seeded generator.
pub struct Solver<'a, R> {
    dictionary: &'a Dictionary,
    remaining: Vec<Word>,
    rng: R,
}

impl<'a, R: Rng> Solver<'a, R> {
    pub fn new(dictionary: &'a Dictionary, rng: R) -> Self {
        Self {
            dictionary,
            remaining: dictionary.possible_answers().to_vec(),
            rng,
        }
    }

    /// The answers still consistent with every observation so far.
    pub fn remaining(&self) -> &[Word] {
        &self.remaining
    }

    /// Drops every candidate inconsistent with `feedback` for `guess`.
    ///
    /// An emptied pool means the observations contradict the dictionary
    /// (mistyped feedback, or a secret outside the answer set); that is
    /// surfaced as an error on every path, never papered over with a stale
    /// pool.
    pub fn apply_feedback(&mut self, guess: Word, feedback: Feedback) -> Result<(), GameError> {
        let observation = Guess {
            word: guess,
            mask: feedback,
        };
        self.remaining.retain(|&candidate| observation.matches(candidate));
        if self.remaining.is_empty() {
            return Err(GameError::Contradiction);
        }
        Ok(())
    }

    /// Picks the guess for the given 1-based attempt number.
    ///
    /// With one or two candidates left, guessing one directly is at least
    /// as good as narrowing further, so a uniformly random candidate is
    /// returned. The first attempt short-circuits to the memoized opening
    /// guess; every later attempt runs the full entropy search.
    pub fn select_guess(&mut self, attempt: usize) -> Result<Word, GameError> {
        match self.remaining.as_slice() {
            [] => Err(GameError::Contradiction),
            pool @ ([_] | [_, _]) => Ok(*pool
                .choose(&mut self.rng)
                .expect("pool is non-empty")),
            _ if attempt == 1 => Ok(self.opening_guess()),
            _ => Ok(most_informative_guess(self.dictionary, &self.remaining)),
        }
    }

    /// The entropy-maximizing first guess for this dictionary.
    ///
    /// The search is answer-independent on the first attempt and by far
    /// the most expensive of the game, so its result is computed once per
    /// dictionary and reused by every subsequent game.
    fn opening_guess(&self) -> Word {
        *self.dictionary.opener.get_or_init(|| {
            most_informative_guess(self.dictionary, self.dictionary.possible_answers())
        })
    }
}

/// Runs the entropy search: scores every valid guess by the Shannon
/// entropy of the feedback-pattern distribution it induces over `pool` and
/// returns the highest scorer. Ties keep the earliest guess in the fixed
/// accepted-then-remaining order.
fn most_informative_guess(dictionary: &Dictionary, pool: &[Word]) -> Word {
    debug_assert!(!pool.is_empty());
    let n = pool.len() as f64;

    let mut best: Option<(Word, f64)> = None;
    for guess in dictionary.valid_guesses(pool) {
        // Tally how often each feedback pattern would be observed if the
        // secret were drawn uniformly from the pool. Each guess-candidate
        // pair produces exactly one pattern, so a dense array of counts
        // indexed by the packed pattern does the grouping.
        let mut pattern_counts = [0usize; MAX_PATTERN_ENUM];
        for &answer in pool {
            let mask = Correctness::compute(answer, guess);
            pattern_counts[usize::from(Correctness::pack(&mask))] += 1;
        }

        let entropy = -pattern_counts
            .iter()
            .filter(|&&count| count != 0)
            .map(|&count| {
                let p = count as f64 / n;
                p * p.ln()
            })
            .sum::<f64>();

        // Strict comparison keeps the first guess encountered on ties.
        if best.map_or(true, |(_, high)| entropy > high) {
            best = Some((guess, entropy));
        }
    }

    best.expect("valid guesses contains the non-empty pool").0
}
