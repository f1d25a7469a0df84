//! Shared types for dict340 dictionaries.
//!
//! A dictionary file is a flat list of lines of the form
//! `keyword|pos-=>>definition|pos-=>>definition`. This crate holds the pieces
//! every layer agrees on: the [`Entry`] record handed back by queries, the
//! closed [`PartOfSpeech`] and [`Command`] vocabularies accepted after a
//! search keyword, and the keyword normalization helpers ([`trim`],
//! [`to_lower`], [`capitalize`]).
//!
//! ```rust
//! use lexicon_types::{PartOfSpeech, capitalize, trim};
//!
//! assert_eq!(capitalize("dog"), "Dog");
//! assert_eq!(capitalize("csc340"), "CSC340");
//! assert_eq!(trim("\t noun \r"), "noun");
//! assert_eq!(PartOfSpeech::from_token("verb"), Some(PartOfSpeech::Verb));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Separates the keyword and each sense on a dictionary line.
pub const FIELD_SEPARATOR: char = '|';

/// Separates part of speech from definition inside a sense segment.
pub const DEFINITION_ARROW: &str = "-=>>";

/// Keyword prefix that is always rendered fully upper-cased.
pub const ACRONYM_PREFIX: &str = "csc";

const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0B', '\x0C'];

/// One dictionary sense: canonical keyword, part of speech and definition.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Entry {
    pub key: String,
    pub part_of_speech: String,
    pub definition: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] : {}",
            self.key, self.part_of_speech, self.definition
        )
    }
}

/// Part-of-speech filter accepted after a search keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Conjunction,
    Adverb,
    Interjection,
    Preposition,
    Pronoun,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 8] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Adverb,
        PartOfSpeech::Interjection,
        PartOfSpeech::Preposition,
        PartOfSpeech::Pronoun,
    ];

    /// Match an already lower-cased token against the vocabulary.
    ///
    /// Matching is exact: `"Noun"` is not a part of speech.
    pub fn from_token(token: &str) -> Option<Self> {
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str() == token)
    }

    /// The spelling used both in dictionary files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Pronoun => "pronoun",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfSpeech::from_token(s).ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Post-filter command accepted after a search keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Drop repeated `(definition, part of speech)` pairs.
    Distinct,
    /// Invert result order before the final sort.
    Reverse,
}

impl Command {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "distinct" => Some(Command::Distinct),
            "reverse" => Some(Command::Reverse),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Distinct => "distinct",
            Command::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_token(s).ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Token outside the part-of-speech or command vocabulary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token '{}'", self.0)
    }
}

impl std::error::Error for UnknownToken {}

/// Strip leading/trailing ASCII whitespace (space, `\t`, `\n`, `\r`, `\v`, `\f`).
pub fn trim(text: &str) -> &str {
    text.trim_matches(&WHITESPACE[..])
}

/// ASCII lower-casing; other characters pass through.
pub fn to_lower(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Canonical keyword casing.
///
/// Keywords starting with [`ACRONYM_PREFIX`] (any casing) are upper-cased in
/// full, everything else only gets its first character upper-cased.
pub fn capitalize(text: &str) -> String {
    let is_acronym = text
        .get(..ACRONYM_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ACRONYM_PREFIX));
    if is_acronym {
        text.to_ascii_uppercase()
    } else {
        capitalize_first(text)
    }
}

/// Form a keyword takes as a dictionary key: trimmed, then [`capitalize`]d.
///
/// Applied identically to keywords read from a file and to lookups, so the
/// keyword exactly as written in the file always finds its senses. Case-folding
/// user input is left to the caller.
pub fn canonical_keyword(text: &str) -> String {
    capitalize(trim(text))
}

/// Whitespace as understood by [`trim`] and by search-line tokenizing.
pub fn is_space(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// Split on runs of [`is_space`] characters, dropping empty pieces.
pub fn split_spaces(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_space).filter(|piece| !piece.is_empty())
}

/// Upper-case the first character when it is ASCII, leave the rest alone.
pub fn capitalize_first(text: &str) -> String {
    let mut out = text.to_string();
    if let Some(first) = out.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_ascii_whitespace_only() {
        assert_eq!(trim("  run \t"), "run");
        assert_eq!(trim("\x0B\x0Cdog\r\n"), "dog");
        assert_eq!(trim(" \t\r\n "), "");
        assert_eq!(trim(""), "");
        assert_eq!(trim("\u{00A0}dog"), "\u{00A0}dog");
    }

    #[test]
    fn capitalizes_keywords() {
        assert_eq!(capitalize("dog"), "Dog");
        assert_eq!(capitalize("Dog"), "Dog");
        assert_eq!(capitalize("dOG"), "DOG");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
    }

    #[test]
    fn acronym_prefix_upper_cases_everything() {
        assert_eq!(capitalize("csco"), "CSCO");
        assert_eq!(capitalize("csc210"), "CSC210");
        assert_eq!(capitalize("CsC340"), "CSC340");
        assert_eq!(capitalize("cs"), "Cs");
        assert_eq!(capitalize("cat"), "Cat");
    }

    #[test]
    fn non_ascii_first_character_is_left_alone() {
        assert_eq!(capitalize("éclair"), "éclair");
        assert_eq!(capitalize_first("ñu"), "ñu");
    }

    #[test]
    fn capitalize_first_ignores_acronym_rule() {
        assert_eq!(capitalize_first("csc is a course"), "Csc is a course");
        assert_eq!(capitalize_first("to run"), "To run");
    }

    #[test]
    fn canonical_keyword_keeps_inner_case() {
        assert_eq!(canonical_keyword(" run "), "Run");
        assert_eq!(canonical_keyword(" RUN "), "RUN");
        assert_eq!(canonical_keyword("iPhone"), "IPhone");
        assert_eq!(canonical_keyword("Csc340"), "CSC340");
        assert_eq!(canonical_keyword(""), "");
    }

    #[test]
    fn splits_on_trim_whitespace() {
        let pieces: Vec<_> = split_spaces("run\x0Bnoun \t\x0Cdistinct  ").collect();
        assert_eq!(pieces, vec!["run", "noun", "distinct"]);
        assert_eq!(split_spaces(" \x0B ").count(), 0);
    }

    #[test]
    fn lowercases_ascii() {
        assert_eq!(to_lower("RUN Noun"), "run noun");
    }

    #[test]
    fn vocabularies_parse_exact_tokens() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(pos.as_str().parse::<PartOfSpeech>(), Ok(pos));
        }
        assert_eq!(PartOfSpeech::from_token("Noun"), None);
        assert_eq!(PartOfSpeech::from_token("preposistion"), None);
        assert_eq!(Command::from_token("distinct"), Some(Command::Distinct));
        assert_eq!(Command::from_token("reverse"), Some(Command::Reverse));
        assert!("sideways".parse::<Command>().is_err());
    }

    #[test]
    fn entry_display_matches_listing_layout() {
        let entry = Entry {
            key: "Run".into(),
            part_of_speech: "verb".into(),
            definition: "to move fast".into(),
        };
        assert_eq!(entry.to_string(), "Run [verb] : to move fast");
    }
}
