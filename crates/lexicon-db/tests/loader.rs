use std::io::Write;

use lexicon_db::{Dictionary, LoadError, LoadMode, QueryFilters};
use lexicon_types::{Command, PartOfSpeech};
use tempfile::NamedTempFile;

const DATA: &str = "\
Run|verb -=>> to move fast | noun -=>> a sprint
CSC340|noun -=>> a programming course in C++
Book|noun-=>>a written work|verb-=>>to reserve ahead|noun-=>>a written work
";

fn write_fixture(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

#[test]
fn loads_with_both_modes() {
    let file = write_fixture(DATA.as_bytes());
    for mode in [LoadMode::Owned, LoadMode::Mmap] {
        let dict = Dictionary::load_with_mode(file.path(), mode).expect("load fixture");
        assert_eq!(dict.keyword_count(), 3, "{mode:?}");
        assert_eq!(dict.definition_count(), 6, "{mode:?}");
        assert_eq!(dict.headword_count(), 3, "{mode:?}");
    }
}

#[test]
fn round_trips_every_written_sense() {
    let file = write_fixture(DATA.as_bytes());
    let dict = Dictionary::load(file.path()).expect("load fixture");

    let run = dict.query("run", &QueryFilters::new());
    assert!(run
        .iter()
        .any(|e| e.part_of_speech == "verb" && e.definition == "to move fast"));
    assert!(run
        .iter()
        .any(|e| e.part_of_speech == "noun" && e.definition == "a sprint"));

    let course = dict.query("csc340", &QueryFilters::new());
    assert_eq!(course.len(), 1);
    assert_eq!(course[0].key, "CSC340");
    assert_eq!(course[0].definition, "a programming course in C++");
}

#[test]
fn filters_and_commands_compose() {
    let file = write_fixture(DATA.as_bytes());
    let dict = Dictionary::load(file.path()).expect("load fixture");

    let nouns = QueryFilters::new().with_part_of_speech(PartOfSpeech::Noun);
    assert_eq!(dict.query("book", &nouns).len(), 2);
    let distinct_nouns = nouns.with_command(Command::Distinct);
    let entries = dict.query("book", &distinct_nouns);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].definition, "A written work");
}

#[test]
fn empty_file_loads_with_mmap() {
    let file = write_fixture(b"");
    let dict = Dictionary::load_with_mode(file.path(), LoadMode::Mmap).expect("load empty");
    assert_eq!(dict.keyword_count(), 0);
    assert_eq!(dict.definition_count(), 0);
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let file = write_fixture(b"Caf\xe9|noun-=>>a coffee shop\nDog|noun-=>>a pet\n");
    let dict = Dictionary::load(file.path()).expect("load fixture");
    assert_eq!(dict.senses("dog").len(), 1);
    assert_eq!(dict.headword_count(), 2);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.txt");
    let err = Dictionary::load(&path).expect_err("missing file");
    assert!(err.is_not_found());
    assert_eq!(err.path(), path.as_path());
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn directory_is_an_open_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Dictionary::load(dir.path()).expect_err("directory is not a dictionary");
    assert!(!err.is_not_found());
}
