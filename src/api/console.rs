//! Line-oriented console glue: classify prompt input, ask the user to pick a
//! candidate, and render a short summary of a finished record.
use std::io::{BufRead, Write};

use tracing::warn;

use crate::core::select::{Chooser, format_candidate_line};
use crate::types::{CanonicalRecord, RawCandidate};

pub const EXIT_TOKENS: [&str; 3] = ["выход", "exit", "quit"];

const SUMMARY_ACTORS: usize = 3;
const SUMMARY_DESCRIPTION_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Exit,
    Blank,
    Query(String),
}

pub fn parse_command(line: &str) -> ConsoleCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleCommand::Blank;
    }
    let lowered = trimmed.to_lowercase();
    if EXIT_TOKENS.contains(&lowered.as_str()) {
        ConsoleCommand::Exit
    } else {
        ConsoleCommand::Query(trimmed.to_string())
    }
}

/// Read one line; `None` at end of input or on a read error.
pub fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Prints the numbered candidate list and reads the reply from `input`.
pub struct ConsoleChooser<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> ConsoleChooser<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Chooser for ConsoleChooser<'_, R, W> {
    fn choose(&mut self, candidates: &[RawCandidate]) -> Option<String> {
        let mut listing = format!("\nFound {} titles:\n", candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            listing.push_str(&format_candidate_line(i + 1, candidate));
            listing.push('\n');
        }
        listing.push_str("\nPick a number (0 to cancel): ");
        // An unseen list cannot be chosen from; treat it as a cancel.
        if let Err(e) = self
            .output
            .write_all(listing.as_bytes())
            .and_then(|()| self.output.flush())
        {
            warn!("Cannot show candidates: {}", e);
            return None;
        }
        read_line(&mut *self.input)
    }
}

pub fn render_summary(record: &CanonicalRecord) -> String {
    let actors: Vec<&str> = record
        .actors
        .iter()
        .take(SUMMARY_ACTORS)
        .map(String::as_str)
        .collect();

    let mut description: String = record
        .description
        .chars()
        .take(SUMMARY_DESCRIPTION_CHARS)
        .collect();
    if record.description.chars().count() > SUMMARY_DESCRIPTION_CHARS {
        description.push_str("...");
    }

    [
        format!("Title:       {}", record.name),
        format!("Original:    {}", record.original_name),
        format!("Year:        {}", record.year),
        format!("Rating:      {}", record.rating),
        format!("Genres:      {}", record.genres.join(", ")),
        format!("Countries:   {}", record.countries.join(", ")),
        format!("Directors:   {}", record.directors.join(", ")),
        format!("Actors:      {}", actors.join(", ")),
        format!("Runtime:     {} min", record.runtime_minutes),
        format!("Age rating:  {}+", record.age_rating),
        format!("Description: {}", description),
    ]
    .join("\n")
}
