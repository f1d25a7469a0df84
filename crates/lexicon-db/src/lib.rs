//! Load pipe-delimited dictionary files into an immutable in-memory index.
//!
//! Each line of a dictionary file looks like
//!
//! ```text
//! Run|verb -=>> to move fast|noun -=>> a sprint
//! ```
//!
//! The first `|` field is the keyword, every following field is a
//! `part of speech -=>> definition` segment. Parsing is best-effort: segments
//! without the arrow are skipped, blank lines are tolerated, invalid UTF-8 is
//! decoded lossily. A single pass builds three views:
//!
//! - the [`Dictionary`] multimap from canonical keyword to [`Sense`]s, in file
//!   order;
//! - the set of unique trimmed *whole lines* ([`Dictionary::unique_keys`]);
//! - the flat list of every definition seen ([`Dictionary::definitions`]).
//!
//! The last two only feed the startup summary counts.
//!
//! # Example
//! ```
//! use lexicon_db::{Dictionary, QueryFilters};
//! use lexicon_types::PartOfSpeech;
//!
//! let dict = Dictionary::parse_str("Run|verb-=>>to move fast|noun-=>>a sprint\n");
//! let all = dict.query("run", &QueryFilters::new());
//! assert_eq!(all.len(), 2);
//! assert_eq!(all[0].part_of_speech, "noun");
//!
//! let adjectives = QueryFilters::new().with_part_of_speech(PartOfSpeech::Adjective);
//! assert!(dict.query("run", &adjectives).is_empty());
//! ```
//!
//! For a runnable demo, see `cargo run -p lexicon-db --example stats -- <file>`.

pub mod query;

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use lexicon_types::{
    DEFINITION_ARROW, Entry, FIELD_SEPARATOR, canonical_keyword, trim,
};
use memmap2::Mmap;
use thiserror::Error;
use tracing::{debug, info};

pub use query::{
    QueryFilters, distinct_entries, filter_by_part_of_speech, query, reverse_entries,
    sort_by_part_of_speech,
};

/// Strategy for reading the dictionary file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Read the file into an owned buffer.
    #[default]
    Owned,
    /// Memory-map the file for the duration of the parse.
    Mmap,
}

/// Failure to obtain the bytes of a dictionary file.
///
/// Both variants are recoverable: callers are expected to ask for another path.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dictionary file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("could not open dictionary file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path } | LoadError::Open { path, .. } => path,
        }
    }

    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Open {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Part of speech and definition recorded under a keyword.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Sense {
    pub part_of_speech: String,
    pub definition: String,
}

/// Read-only dictionary built once from a file.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    senses: BTreeMap<String, Vec<Sense>>,
    unique_keys: HashSet<String>,
    definitions: Vec<String>,
}

impl Dictionary {
    /// Load a dictionary file into an owned buffer and parse it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with_mode(path, LoadMode::Owned)
    }

    /// Load a dictionary file choosing between mmap and owned buffers.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let start = Instant::now();
        let buffer = load_file(path, mode)?;
        let text = String::from_utf8_lossy(buffer.as_slice());
        let dict = Self::parse_str(&text);
        info!(
            path = %path.display(),
            ?mode,
            elapsed_ms = start.elapsed().as_millis() as u64,
            keywords = dict.keyword_count(),
            definitions = dict.definition_count(),
            headwords = dict.headword_count(),
            "dictionary loaded"
        );
        Ok(dict)
    }

    /// Parse dictionary text that is already in memory.
    pub fn parse_str(text: &str) -> Self {
        let mut dict = Self::default();
        for (lineno, line) in text.lines().enumerate() {
            dict.ingest_line(lineno + 1, line);
        }
        dict
    }

    fn ingest_line(&mut self, lineno: usize, line: &str) {
        self.unique_keys.insert(trim(line).to_string());

        let mut fields = line.split(FIELD_SEPARATOR);
        let head = fields.next().unwrap_or_default();
        // An arrow inside the keyword field still counts as a definition,
        // but never becomes a sense.
        if let Some((_, stray)) = head.split_once(DEFINITION_ARROW) {
            self.definitions.push(trim(stray).to_string());
        }
        let keyword = canonical_keyword(head);

        for segment in fields {
            let Some((pos, definition)) = segment.split_once(DEFINITION_ARROW) else {
                if !trim(segment).is_empty() {
                    debug!(line = lineno, segment, "skipping segment without definition arrow");
                }
                continue;
            };
            let definition = trim(definition).to_string();
            self.definitions.push(definition.clone());
            self.senses
                .entry(keyword.clone())
                .or_default()
                .push(Sense {
                    part_of_speech: trim(pos).to_string(),
                    definition,
                });
        }
    }

    /// Number of distinct trimmed lines in the source file.
    pub fn keyword_count(&self) -> usize {
        self.unique_keys.len()
    }

    /// Number of definitions in the source file, duplicates included.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Number of canonical keywords that carry at least one sense.
    pub fn headword_count(&self) -> usize {
        self.senses.len()
    }

    /// Distinct trimmed whole lines, as used for the keyword summary.
    pub fn unique_keys(&self) -> &HashSet<String> {
        &self.unique_keys
    }

    /// Every definition in file order.
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Senses stored under a keyword, or an empty slice.
    pub fn senses(&self, keyword: &str) -> &[Sense] {
        self.senses
            .get(&canonical_keyword(keyword))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, keyword: &str) -> bool {
        !self.senses(keyword).is_empty()
    }

    /// All entries for a keyword in file order, unfiltered.
    pub fn entries(&self, keyword: &str) -> Vec<Entry> {
        let key = canonical_keyword(keyword);
        self.senses
            .get(&key)
            .map(|senses| {
                senses
                    .iter()
                    .map(|sense| Entry {
                        key: key.clone(),
                        part_of_speech: sense.part_of_speech.clone(),
                        definition: sense.definition.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up a keyword and run it through the filter pipeline.
    pub fn query(&self, keyword: &str, filters: &QueryFilters) -> Vec<Entry> {
        query::query(self, keyword, filters)
    }

    /// Canonical keywords in sorted order with their senses.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Sense])> + '_ {
        self.senses
            .iter()
            .map(|(key, senses)| (key.as_str(), senses.as_slice()))
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, LoadError> {
    let mut file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| LoadError::from_io(path, e))?
        .len();
    match mode {
        // Zero-length maps are rejected on some platforms.
        LoadMode::Mmap if len > 0 => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .map_err(|e| LoadError::from_io(path, e)),
        _ => {
            let mut buf = Vec::with_capacity(len as usize);
            file.read_to_end(&mut buf)
                .map_err(|e| LoadError::from_io(path, e))?;
            Ok(Buffer::Owned(buf))
        }
    }
}
