use anyhow::{bail, Context, Result};
use augur::{
    Correctness, Dictionary, Feedback, Game, GameResult, Interactive, Outcome, Simulated, Word,
    MAX_ATTEMPTS,
};
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(version, about = "An entropy-maximizing Wordle solver", long_about = None)]
struct Args {
    /// Dictionary JSON file with accepted guesses and possible answers.
    ///
    /// Falls back to the bundled dictionary.
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Play a single game against this secret instead of prompting for
    /// feedback.
    #[arg(long, conflicts_with = "simulate")]
    answer: Option<Word>,

    /// Self-play every possible answer and print the score distribution.
    #[arg(long)]
    simulate: bool,

    /// The number of games to run.
    ///
    /// If not passed, all answers are played.
    #[arg(short, long, requires = "simulate")]
    games: Option<usize>,

    /// Maximum number of guesses per game.
    #[arg(long, default_value_t = MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Seed for the tie-breaking RNG, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let dictionary = match &args.dictionary {
        Some(path) => Dictionary::load(path)
            .with_context(|| format!("load dictionary from {}", path.display()))?,
        None => Dictionary::bundled(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if args.simulate {
        simulate(&dictionary, args.games, args.max_attempts, rng)
    } else if let Some(answer) = args.answer {
        play_against(&dictionary, answer, args.max_attempts, rng)
    } else {
        let game = Game::new(&dictionary, Interactive::stdio(), rng)
            .with_max_attempts(args.max_attempts);
        let result = game.play()?;
        report(&result, args.max_attempts);
        Ok(())
    }
}

fn play_against(
    dictionary: &Dictionary,
    answer: Word,
    max_attempts: usize,
    rng: StdRng,
) -> Result<()> {
    if !dictionary.possible_answers().contains(&answer) {
        bail!("answer '{}' is not in the dictionary's possible answers", answer);
    }

    let result = Game::new(dictionary, Simulated::new(answer), rng)
        .with_max_attempts(max_attempts)
        .play()
        .with_context(|| format!("self-play against '{}'", answer))?;

    for (i, &guess) in result.guesses.iter().enumerate() {
        println!(
            "guess {}: {} {}",
            i + 1,
            guess,
            digits(&Correctness::compute(answer, guess)),
        );
    }
    report(&result, max_attempts);
    Ok(())
}

fn simulate(
    dictionary: &Dictionary,
    games: Option<usize>,
    max_attempts: usize,
    rng: StdRng,
) -> Result<()> {
    let mut scores = Vec::new();
    let mut failed = 0usize;
    for &answer in dictionary
        .possible_answers()
        .iter()
        .take(games.unwrap_or(usize::MAX))
    {
        let result = Game::new(dictionary, Simulated::new(answer), rng.clone())
            .with_max_attempts(max_attempts)
            .play()
            .with_context(|| format!("self-play against '{}'", answer))?;
        if result.won() {
            scores.push(result.guesses.len());
        } else {
            failed += 1;
            eprintln!("failed to guess '{}'", answer);
        }
    }

    let histogram = scores.iter().copied().counts();
    for score in histogram.keys().sorted() {
        let count = histogram[score];
        let frac = count as f64 / scores.len() as f64;
        let w1 = (30.0 * frac).round() as usize;
        let w2 = 30 - w1;
        eprintln!(
            "{:>2}: {}{} ({})",
            score,
            "#".repeat(w1),
            " ".repeat(w2),
            count
        );
    }
    eprintln!(
        "average score: {:.4} over {} games ({} failed)",
        scores.iter().sum::<usize>() as f64 / scores.len() as f64,
        scores.len(),
        failed,
    );
    Ok(())
}

fn report(result: &GameResult, max_attempts: usize) {
    match result.outcome {
        Outcome::Won => println!(
            "Completed the wordle, {}/{} guesses used.",
            result.guesses.len(),
            max_attempts,
        ),
        Outcome::Lost { remaining } => println!(
            "Failed to complete the wordle, {} possible answers remaining.",
            remaining,
        ),
    }
}

/// Renders feedback in the same digit notation the interactive prompt
/// accepts: 0 gray, 1 yellow, 2 green.
fn digits(feedback: &Feedback) -> String {
    feedback
        .iter()
        .map(|c| match c {
            Correctness::Correct => '2',
            Correctness::Misplaced => '1',
            Correctness::Wrong => '0',
        })
        .collect()
}
