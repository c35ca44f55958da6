//! Command-line interface for word_link.

use clap::{Parser, Subcommand};

/// Word Link - crossword puzzles for young spellers
#[derive(Parser, Debug)]
#[command(name = "word_link")]
#[command(about = "Crossword layout, word checking and Word Link play in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(short, long, default_value = "word_link.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out words on a crossword grid and print it
    Layout {
        /// Words to place, in placement order
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Check whether a word is real
    Check {
        /// Word to check
        word: String,
    },

    /// Play a Word Link phase
    Play {
        /// Word bank category to draw from
        #[arg(long, default_value = "animals")]
        category: String,

        /// Number of words to play
        #[arg(long, default_value = "4")]
        count: usize,

        /// Play these words instead of drawing from the bank
        #[arg(long, value_delimiter = ',')]
        words: Option<Vec<String>>,

        /// Seed for word choice, shuffles and hints
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Act as the mini-game: print the URL that returns control to the game
    Interlude {
        /// URL the mini-game was opened with
        #[arg(long)]
        url: String,

        /// Hearts earned in the mini-game
        #[arg(long, default_value = "1")]
        bonus_hearts: u32,
    },

    /// Resume play from a mini-game return URL
    Resume {
        /// URL the mini-game returned to
        #[arg(long)]
        url: String,

        /// Seed for shuffles and hints
        #[arg(long)]
        seed: Option<u64>,
    },
}
