use crate::{Dictionary, FeedbackSource, Solver, Word, ALL_CORRECT, MAX_ATTEMPTS};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Filtering removed every candidate: the observed feedback cannot
    /// have come from any word in the answer set. Distinct from losing,
    /// which is merely running out of attempts.
    #[error("no remaining possible answers")]
    Contradiction,
    #[error("could not obtain feedback")]
    Feedback(#[from] std::io::Error),
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    /// Attempts ran out; `remaining` is how many candidates were still in
    /// the pool, for diagnostics.
    Lost { remaining: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Every guess made, in order.
    pub guesses: Vec<Word>,
    pub outcome: Outcome,
}

impl GameResult {
    pub fn won(&self) -> bool {
        self.outcome == Outcome::Won
    }
}

/// One game of Wordle: repeatedly pick the most informative guess, hand
/// it to the feedback source, and narrow the candidate pool until the
/// feedback comes back all green or the attempts run out.
pub struct Game<'a, F, R> {
    solver: Solver<'a, R>,
    feedback: F,
    max_attempts: usize,
}

impl<'a, F: FeedbackSource, R: Rng> Game<'a, F, R> {
    pub fn new(dictionary: &'a Dictionary, feedback: F, rng: R) -> Self {
        Self {
            solver: Solver::new(dictionary, rng),
            feedback,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Plays the game to completion.
    ///
    /// A contradiction (the pool filtering down to nothing) aborts the
    /// game with an error rather than reporting a loss: the feedback
    /// received cannot all have been truthful.
    pub fn play(mut self) -> Result<GameResult, GameError> {
        let mut guesses = Vec::new();

        for attempt in 1..=self.max_attempts {
            let guess = self.solver.select_guess(attempt)?;
            guesses.push(guess);

            let feedback = self.feedback.resolve(guess, attempt)?;
            if feedback == ALL_CORRECT {
                return Ok(GameResult {
                    guesses,
                    outcome: Outcome::Won,
                });
            }

            self.solver.apply_feedback(guess, feedback)?;
        }

        Ok(GameResult {
            outcome: Outcome::Lost {
                remaining: self.solver.remaining().len(),
            },
            guesses,
        })
    }
}
