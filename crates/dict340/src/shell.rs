use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use lexicon_db::{Dictionary, LoadMode};
use lexicon_types::{Entry, PartOfSpeech, to_lower, trim};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::options::{ParsedQuery, RejectedOption, Rejection, ordinal, parse_query_line};

pub const QUIT: &str = "!q";
pub const HELP: &str = "!help";

/// How query results are written.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Framed, human-readable listing with prompts.
    #[default]
    Text,
    /// One JSON object per query, no prompts.
    Json,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("input closed while waiting for a dictionary path (last tried {})", .0.display())]
    NoDictionary(PathBuf),
}

#[derive(Serialize)]
struct QueryOutcome<'a> {
    keyword: &'a str,
    part_of_speech: Option<PartOfSpeech>,
    distinct: bool,
    reverse: bool,
    entries: &'a [Entry],
    rejected: &'a [RejectedOption],
}

/// Open the dictionary at `path`, asking for a new path on `input` after
/// every failed attempt.
///
/// Returns the dictionary together with the path that finally worked.
pub fn load_with_retry<R: BufRead, W: Write>(
    mut path: PathBuf,
    mode: LoadMode,
    input: &mut R,
    output: &mut W,
) -> Result<(Dictionary, PathBuf), ShellError> {
    writeln!(output, "! Opening data file... {}", path.display())?;
    loop {
        match Dictionary::load_with_mode(&path, mode) {
            Ok(dict) => {
                writeln!(output, "! Loading data...")?;
                writeln!(output, "! Loading completed...")?;
                writeln!(output, "! Closing data file... {}", path.display())?;
                writeln!(output)?;
                return Ok((dict, path));
            }
            Err(err) => {
                warn!(error = %err, "could not open dictionary");
                writeln!(output, "<!>ERROR<!> ===> File could not be opened.")?;
                writeln!(output, "<!>ERROR<!> ===> Provided file path: {}", path.display())?;
                write!(output, "<!>Enter the CORRECT data file path: ")?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Err(ShellError::NoDictionary(path));
                }
                path = PathBuf::from(trim(&line));
            }
        }
    }
}

/// Interactive search loop over a loaded dictionary.
pub struct Shell<'a, R, W> {
    dict: &'a Dictionary,
    input: R,
    output: W,
    format: OutputFormat,
    turn: usize,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(dict: &'a Dictionary, input: R, output: W) -> Self {
        Self {
            dict,
            input,
            output,
            format: OutputFormat::Text,
            turn: 1,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Startup summary with keyword and definition counts.
    pub fn print_banner(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(self.output, "====== DICTIONARY 340 ======")?;
        writeln!(self.output, "------ Keywords: {}", self.dict.keyword_count())?;
        writeln!(self.output, "------ Definitions: {}", self.dict.definition_count())?;
        Ok(())
    }

    /// Serve search requests until `!q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.output)?;
        }
        let mut line = String::new();
        loop {
            if self.format == OutputFormat::Text {
                write!(self.output, "Search [{}]: ", self.turn)?;
                self.output.flush()?;
            }
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("input closed after {} turns", self.turn - 1);
                break;
            }

            let request = to_lower(trim(&line));
            if request == QUIT {
                if self.format == OutputFormat::Text {
                    writeln!(self.output)?;
                    writeln!(self.output, "-----THANK YOU-----")?;
                }
                break;
            }
            if request.is_empty() || request == HELP {
                self.print_help()?;
            } else if let Some(parsed) = parse_query_line(&request) {
                self.search(&parsed)?;
            }
            self.turn += 1;
        }
        self.output.flush()
    }

    /// Number of the next search prompt.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn search(&mut self, parsed: &ParsedQuery) -> io::Result<()> {
        let entries = self.dict.query(&parsed.keyword, &parsed.filters());
        match self.format {
            OutputFormat::Text => {
                for rejected in &parsed.rejected {
                    self.print_rejection(rejected)?;
                }
                self.print_entries(&entries)
            }
            OutputFormat::Json => {
                let filters = parsed.filters();
                let outcome = QueryOutcome {
                    keyword: &parsed.keyword,
                    part_of_speech: parsed.part_of_speech,
                    distinct: filters.distinct,
                    reverse: filters.reverse,
                    entries: &entries,
                    rejected: &parsed.rejected,
                };
                serde_json::to_writer(&mut self.output, &outcome)?;
                writeln!(self.output)
            }
        }
    }

    fn print_help(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(self.output, "     |")?;
        writeln!(self.output, "      PARAMETER HOW-TO, please enter:")?;
        writeln!(
            self.output,
            "      1. A search key -then 2. An optional part of speech -then"
        )?;
        writeln!(
            self.output,
            "      3. An optional 'distinct' -then 4. An optional 'reverse'"
        )?;
        writeln!(self.output, "     |")
    }

    fn print_rejection(&mut self, rejected: &RejectedOption) -> io::Result<()> {
        let nth = ordinal(rejected.position);
        let token = &rejected.token;
        writeln!(self.output, "     |")?;
        match rejected.reason {
            Rejection::DuplicatePartOfSpeech => {
                writeln!(
                    self.output,
                    "      <The entered {nth} parameter '{token}' is NOT 'distinct' or 'reverse'.>"
                )?;
            }
            Rejection::Unrecognized => {
                writeln!(
                    self.output,
                    "      <The entered {nth} parameter '{token}' is NOT a part of speech.>"
                )?;
                writeln!(
                    self.output,
                    "      <The entered {nth} parameter '{token}' is NOT 'distinct'.>"
                )?;
                writeln!(
                    self.output,
                    "      <The entered {nth} parameter '{token}' is NOT 'reverse'.>"
                )?;
                writeln!(
                    self.output,
                    "      <The entered {nth} parameter '{token}' was disregarded.>"
                )?;
                writeln!(
                    self.output,
                    "      <The {nth} parameter should be a part of speech or 'distinct' or 'reverse'.>"
                )?;
            }
        }
        writeln!(self.output, "     |")
    }

    fn print_entries(&mut self, entries: &[Entry]) -> io::Result<()> {
        if entries.is_empty() {
            writeln!(self.output, "   |")?;
            writeln!(
                self.output,
                "      <NOT FOUND> To be considered for next release. Thank you."
            )?;
            return writeln!(self.output, "    |");
        }
        writeln!(self.output, "    |")?;
        for entry in entries {
            writeln!(self.output, "      {entry}")?;
        }
        writeln!(self.output, "     |")
    }
}
