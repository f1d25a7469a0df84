use lexicon_db::QueryFilters;
use lexicon_types::{Command, PartOfSpeech, split_spaces, to_lower, trim};
use serde::Serialize;
use thiserror::Error;

/// A search line split into keyword, filters and rejected tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedQuery {
    pub keyword: String,
    pub part_of_speech: Option<PartOfSpeech>,
    pub commands: Vec<Command>,
    pub rejected: Vec<RejectedOption>,
}

impl ParsedQuery {
    pub fn filters(&self) -> QueryFilters {
        QueryFilters::from_parts(self.part_of_speech, self.commands.iter().copied())
    }
}

/// Trailing token that was ignored, with its 1-based position on the line.
///
/// The keyword is position 1, so the first option is position 2.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RejectedOption {
    pub position: usize,
    pub token: String,
    pub reason: Rejection,
}

impl std::fmt::Display for RejectedOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} parameter '{}': {}",
            ordinal(self.position),
            self.token,
            self.reason
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("a part of speech was already given")]
    DuplicatePartOfSpeech,
    #[error("not a part of speech, 'distinct' or 'reverse'")]
    Unrecognized,
}

/// Split a search line into keyword and classified options.
///
/// The line is trimmed and lower-cased first. Returns `None` for a blank line.
pub fn parse_query_line(line: &str) -> Option<ParsedQuery> {
    let line = to_lower(trim(line));
    let mut tokens = split_spaces(&line);
    let keyword = tokens.next()?.to_string();

    let mut parsed = ParsedQuery {
        keyword,
        part_of_speech: None,
        commands: Vec::new(),
        rejected: Vec::new(),
    };

    for (idx, token) in tokens.enumerate() {
        let position = idx + 2;
        if let Ok(pos) = token.parse::<PartOfSpeech>() {
            if parsed.part_of_speech.is_none() {
                parsed.part_of_speech = Some(pos);
            } else {
                parsed.rejected.push(RejectedOption {
                    position,
                    token: token.to_string(),
                    reason: Rejection::DuplicatePartOfSpeech,
                });
            }
        } else if let Ok(command) = token.parse::<Command>() {
            parsed.commands.push(command);
        } else {
            parsed.rejected.push(RejectedOption {
                position,
                token: token.to_string(),
                reason: Rejection::Unrecognized,
            });
        }
    }

    Some(parsed)
}

/// English ordinal for a positive number: `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, m) if m != 11 => "st",
        (2, m) if m != 12 => "nd",
        (3, m) if m != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
