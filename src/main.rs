//! Word Link - terminal front end.
//!
//! Lays out puzzles, checks words and plays Word Link phases, including the
//! hand-off to a mini-game when hearts run out.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use word_link::{
    Corpus, FileStorage, GameConfig, GuessOutcome, HintOutcome, HttpDictionary, PuzzleError,
    PuzzleSession, ResumeTarget, ResumptionGateway, ReturnTicket, SessionEvent, SessionSettings,
    Url, WordBank, WordValidator, place, render,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = GameConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Layout { words } => run_layout(&words),
        Command::Check { word } => run_check(&config, &word).await,
        Command::Play {
            category,
            count,
            words,
            seed,
        } => run_play(&config, category, count, words, seed).await,
        Command::Interlude { url, bonus_hearts } => run_interlude(&config, &url, bonus_hearts),
        Command::Resume { url, seed } => run_resume(&config, &url, seed).await,
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,word_link=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Print a crossword layout
#[instrument]
fn run_layout(words: &[String]) -> Result<()> {
    let placed = place(words)?;
    println!("{}", render(&placed));
    println!();
    for word in &placed {
        println!(
            "{:<12} {:>10} at ({}, {})",
            word.word(),
            word.direction(),
            word.origin().0,
            word.origin().1
        );
    }
    Ok(())
}

/// Run one word through the validation pipeline
#[instrument(skip(config))]
async fn run_check(config: &GameConfig, word: &str) -> Result<()> {
    let validator = build_validator(config)?;
    let verdict = if validator.is_valid(word).await {
        "a real word"
    } else {
        "not a word"
    };
    println!("{}: {}", word, verdict);
    Ok(())
}

/// Start a fresh Word Link phase
#[instrument(skip(config))]
async fn run_play(
    config: &GameConfig,
    category: String,
    count: usize,
    words: Option<Vec<String>>,
    seed: Option<u64>,
) -> Result<()> {
    let words = match words {
        Some(words) => words,
        None => {
            let bank = WordBank::builtin()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            bank.choose(&category, count, &mut rng)
        }
    };

    let session = PuzzleSession::new(words, session_settings(config, seed))?;
    play_word_link(config, session).await
}

/// Play the mini-game side of a hand-off
#[instrument(skip(config))]
fn run_interlude(config: &GameConfig, url: &str, bonus_hearts: u32) -> Result<()> {
    let url = Url::parse(url).context("Invalid interlude URL")?;
    let home = Url::parse(config.handoff().home_url()).context("Invalid home URL")?;
    let ticket = ReturnTicket::from_url(&url);
    if ticket.return_to().is_none() {
        warn!("Interlude URL does not say which phase to return to");
    }
    println!("{}", ticket.return_url(bonus_hearts, &home));
    Ok(())
}

/// Resume from a mini-game return URL
#[instrument(skip(config))]
async fn run_resume(config: &GameConfig, url: &str, seed: Option<u64>) -> Result<()> {
    let url = Url::parse(url).context("Invalid return URL")?;
    let mut gateway = open_gateway(config)?;
    let snapshot = gateway.resume(&url);

    match *snapshot.resume_target() {
        ResumeTarget::WordLink => {
            let session = match PuzzleSession::resume(&snapshot, session_settings(config, seed)) {
                Ok(session) => session,
                Err(PuzzleError::EmptyWordList) => {
                    warn!("No stored word list, drawing fresh words");
                    let bank = WordBank::builtin()?;
                    let mut rng = StdRng::from_entropy();
                    let words = bank.choose("animals", 4, &mut rng);
                    let snapshot = snapshot.with_words(words, 0);
                    PuzzleSession::resume(&snapshot, session_settings(config, seed))?
                }
                Err(e) => return Err(e.into()),
            };
            play_word_link(config, session).await
        }
        ResumeTarget::MadLib => {
            println!(
                "Back to Mad Libs with {} hearts and {} points.",
                snapshot.total_hearts(),
                snapshot.score()
            );
            Ok(())
        }
    }
}

fn session_settings(config: &GameConfig, seed: Option<u64>) -> SessionSettings {
    let settings = config.session().clone();
    match seed {
        Some(seed) => settings.with_seed(seed),
        None => settings,
    }
}

fn build_validator(config: &GameConfig) -> Result<WordValidator> {
    let bank = WordBank::builtin()?;
    let lookup = HttpDictionary::from_settings(config.dictionary())?;
    Ok(WordValidator::new(Corpus::from_bank(&bank), Arc::new(lookup)))
}

fn open_gateway(config: &GameConfig) -> Result<ResumptionGateway<FileStorage>> {
    let storage = FileStorage::open(config.handoff().storage_dir())?;
    Ok(ResumptionGateway::from_settings(
        storage,
        config.handoff(),
        config.session(),
    )?)
}

/// Terminal loop for one Word Link phase.
///
/// Type a word to guess it, `?` for a hint, `!` to reshuffle, `q` to quit.
#[instrument(skip_all)]
async fn play_word_link(config: &GameConfig, mut session: PuzzleSession) -> Result<()> {
    let validator = build_validator(config)?;
    let mut gateway = open_gateway(config)?;

    let placed = place(session.words())?;
    println!("{}\n", render(&placed));
    println!("Type a word to guess, ? for a hint, ! to reshuffle, q to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if report_events(&mut session, &mut gateway) {
            return Ok(());
        }
        print_status(&session);

        let Some(line) = lines.next_line().await? else {
            info!("Input closed");
            return Ok(());
        };

        match line.trim() {
            "q" => return Ok(()),
            "?" => match session.request_hint()? {
                HintOutcome::Revealed { position, letter } => {
                    println!("Letter {} is '{}'.", position + 1, letter)
                }
                HintOutcome::NoHintsLeft => println!("No hints left for this word."),
                HintOutcome::AllRevealed => println!("Every letter is already showing."),
            },
            "!" => session.refresh()?,
            guess => match session.submit_guess(guess, &validator).await {
                Ok(GuessOutcome::Correct { points, .. }) => println!("Correct! +{}", points),
                Ok(GuessOutcome::BonusWord { points }) => {
                    println!("That's a real word, but not this one. +{}", points)
                }
                Ok(GuessOutcome::Wrong { hearts_left }) => {
                    println!("Not a word. {} hearts left.", hearts_left)
                }
                Ok(GuessOutcome::OutOfHearts) => println!("Not a word."),
                Err(e @ PuzzleError::GuessLengthMismatch { .. }) => println!("{}", e),
                Err(e) => return Err(e.into()),
            },
        }
    }
}

/// Handles queued events. Returns `true` once the phase has ended.
fn report_events(
    session: &mut PuzzleSession,
    gateway: &mut ResumptionGateway<FileStorage>,
) -> bool {
    let mut finished = false;
    for event in session.take_events() {
        match event {
            SessionEvent::PhaseComplete { score } => {
                println!("All words solved! Final score: {}", score);
                finished = true;
            }
            SessionEvent::HeartsExhausted { .. } => {
                let hand_off = gateway.suspend_session(session);
                println!("Out of hearts! Earn more at:\n{}", hand_off.url());
                finished = true;
            }
            _ => {}
        }
    }
    finished
}

fn print_status(session: &PuzzleSession) {
    let Some(tiles) = session.tiles() else {
        return;
    };
    let boxes: String = tiles
        .slots()
        .iter()
        .map(|slot| slot.unwrap_or('_'))
        .collect();
    let pool: String = tiles.pool().iter().collect();
    println!(
        "\n[{}]  tiles: {}  hearts: {}  score: {}  hints: {}",
        boxes,
        pool,
        session.hearts(),
        session.score(),
        session.hints_remaining()
    );
}
