use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::CliError;

/// Process arguments for the `runway` binary.
#[derive(Debug, Parser)]
#[command(name = "runway", version, about = "Interactive flight reservation desk")]
pub struct CliArgs {
    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Directory holding default.toml, <RUN_MODE>.toml and local.toml
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Read commands from a file instead of an interactive prompt
    #[arg(long)]
    pub script: Option<PathBuf>,
}

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReplCommand {
    /// Register a passenger and print the new user ID
    Register {
        age: u32,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Show details of one flight
    Search { flight: String },
    /// List every flight with its remaining seats
    Flights,
    /// Book seats on a flight for a registered user
    Book {
        flight: String,
        user: String,
        seats: u32,
    },
    /// Cancel a ticket and return its seats
    Cancel { flight: String, ticket: String },
    /// Show the summary of a ticket (defaults to the last one booked)
    Show { ticket: Option<String> },
    /// Save the last booked ticket's summary to a text file
    Save {
        /// Append to the file instead of overwriting it
        #[arg(long)]
        append: bool,
        path: Option<PathBuf>,
    },
    /// List a user's active tickets
    #[command(alias = "mytickets")]
    MyTickets { user: String },
    /// Show every booking change made this session
    History,
    /// Leave the program
    #[command(alias = "exit")]
    Quit,
}

/// Splits a command line on whitespace, keeping double-quoted runs together.
pub fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(CliError::Usage("Unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
