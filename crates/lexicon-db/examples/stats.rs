use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lexicon_db::{Dictionary, LoadMode, QueryFilters};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p lexicon-db --example stats -- <dictionary-file>")?;

    let dict = Dictionary::load_with_mode(&path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", path.display()))?;

    let mut sense_count = 0usize;
    let mut busiest: Option<(&str, usize)> = None;
    for (key, senses) in dict.iter() {
        sense_count += senses.len();
        if busiest.is_none_or(|(_, n)| senses.len() > n) {
            busiest = Some((key, senses.len()));
        }
    }

    println!("Dictionary: {}", path.display());
    println!("Unique lines : {}", dict.keyword_count());
    println!("Definitions  : {}", dict.definition_count());
    println!("Headwords    : {}", dict.headword_count());
    println!("Senses       : {}", sense_count);
    if let Some((key, n)) = busiest {
        let distinct = dict
            .query(key, &QueryFilters {
                distinct: true,
                ..QueryFilters::default()
            })
            .len();
        println!("Most senses  : {key} ({n}, {distinct} distinct)");
    }

    Ok(())
}
