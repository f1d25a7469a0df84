//! Keyword lookup and the filter pipeline applied to its results.
//!
//! Stages always run in the same order regardless of how the user typed
//! them: part-of-speech filter, `distinct`, `reverse`, then a stable sort by
//! part of speech.

use std::collections::HashSet;

use lexicon_types::{Command, Entry, PartOfSpeech, capitalize_first, trim};
use tracing::debug;

use crate::Dictionary;

/// Filters and commands applied to a keyword lookup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QueryFilters {
    pub part_of_speech: Option<PartOfSpeech>,
    pub distinct: bool,
    pub reverse: bool,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_part_of_speech(mut self, pos: PartOfSpeech) -> Self {
        self.part_of_speech = Some(pos);
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        match command {
            Command::Distinct => self.distinct = true,
            Command::Reverse => self.reverse = true,
        }
        self
    }

    /// Build filters from an optional part of speech and any number of commands.
    pub fn from_parts(
        part_of_speech: Option<PartOfSpeech>,
        commands: impl IntoIterator<Item = Command>,
    ) -> Self {
        let base = Self {
            part_of_speech,
            ..Self::default()
        };
        commands
            .into_iter()
            .fold(base, |filters, command| filters.with_command(command))
    }
}

/// Look up `keyword` in `dict` and apply `filters`.
///
/// An unknown keyword yields an empty list.
pub fn query(dict: &Dictionary, keyword: &str, filters: &QueryFilters) -> Vec<Entry> {
    let mut entries = dict.entries(keyword);
    let found = entries.len();

    if let Some(pos) = filters.part_of_speech {
        entries = filter_by_part_of_speech(entries, pos.as_str());
    }
    if filters.distinct {
        entries = distinct_entries(entries);
    }
    if filters.reverse {
        entries = reverse_entries(entries);
    }
    sort_by_part_of_speech(&mut entries);

    debug!(keyword, found, returned = entries.len(), ?filters, "query");
    entries
}

/// Keep entries whose part of speech equals `pos` exactly.
pub fn filter_by_part_of_speech(entries: Vec<Entry>, pos: &str) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| entry.part_of_speech == pos)
        .collect()
}

/// Keep the first entry per `(definition, part of speech)` pair.
///
/// Definitions have their first character upper-cased before comparison and
/// are returned that way.
pub fn distinct_entries(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|mut entry| {
            entry.definition = capitalize_first(&entry.definition);
            entry
        })
        .filter(|entry| {
            let key = format!(
                "{}_{}",
                trim(&entry.definition),
                trim(&entry.part_of_speech)
            );
            seen.insert(key)
        })
        .collect()
}

pub fn reverse_entries(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.reverse();
    entries
}

/// Stable ascending sort on the part-of-speech string.
pub fn sort_by_part_of_speech(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.part_of_speech.cmp(&b.part_of_speech));
}
