use crate::{Correctness, Feedback, GameError, Word, WORD_LEN};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Where per-guess feedback comes from: a human relaying colors from a
/// real game, or a simulation that knows the secret.
pub trait FeedbackSource {
    /// Produces the feedback for `guess` on the given 1-based attempt.
    /// May block (a human is typing); must not be called again for the
    /// same attempt.
    fn resolve(&mut self, guess: Word, attempt: usize) -> Result<Feedback, GameError>;
}

/// Prompts a human for feedback as a line of [`WORD_LEN`] digits, one per
/// letter: `0` gray, `1` yellow, `2` green.
///
/// Malformed lines (wrong length, other characters) are re-prompted
/// without consuming an attempt. End of input is an error: a dead reader
/// can never produce feedback.
pub struct Interactive<R, W> {
    reader: R,
    writer: W,
}

impl Interactive<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn prompt(&mut self, guess: Word, attempt: usize) -> io::Result<()> {
        writeln!(
            self.writer,
            "guess {}: {}\nenter feedback [0=gray, 1=yellow, 2=green]:",
            attempt, guess,
        )?;
        self.writer.flush()
    }
}

impl<R: BufRead, W: Write> FeedbackSource for Interactive<R, W> {
    fn resolve(&mut self, guess: Word, attempt: usize) -> Result<Feedback, GameError> {
        self.prompt(guess, attempt)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(GameError::Feedback(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before feedback was entered",
                )));
            }
            let entered = line.trim();

            if entered.len() != WORD_LEN {
                writeln!(
                    self.writer,
                    "expected {} digits, got {}. please try again:",
                    WORD_LEN,
                    entered.len(),
                )?;
                self.writer.flush()?;
                continue;
            }

            let mut feedback = [Correctness::Wrong; WORD_LEN];
            let mut valid = true;
            for (c, slot) in entered.bytes().zip(feedback.iter_mut()) {
                *slot = match c {
                    b'0' => Correctness::Wrong,
                    b'1' => Correctness::Misplaced,
                    b'2' => Correctness::Correct,
                    _ => {
                        valid = false;
                        break;
                    }
                };
            }
            if !valid {
                writeln!(
                    self.writer,
                    "digits must be 0, 1, or 2 (for example 01210). please try again:",
                )?;
                self.writer.flush()?;
                continue;
            }

            return Ok(feedback);
        }
    }
}

/// Plays against a known secret; used for self-play and simulation.
pub struct Simulated {
    answer: Word,
}

impl Simulated {
    pub fn new(answer: Word) -> Self {
        Self { answer }
    }
}

impl FeedbackSource for Simulated {
    fn resolve(&mut self, guess: Word, _attempt: usize) -> Result<Feedback, GameError> {
        Ok(Correctness::compute(self.answer, guess))
    }
}
