use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lexicon_db::LoadMode;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use dict340::{OutputFormat, Shell, load_with_retry};

const DEFAULT_DATA_FILE: &str = "Data.CS.SFSU.txt";

#[derive(Parser, Debug)]
#[command(name = "dict340", version)]
#[command(about = "Interactive dictionary lookup over a pipe-delimited data file")]
struct Config {
    /// Dictionary data file; asked for again interactively if it cannot be opened.
    #[arg(env = "DICT340_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// How the data file is read.
    #[arg(long, env = "DICT340_LOAD_MODE", value_enum, default_value_t = ReadMode::Owned)]
    load_mode: ReadMode,

    /// Result layout written to stdout.
    #[arg(long, env = "DICT340_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReadMode {
    Owned,
    Mmap,
}

impl From<ReadMode> for LoadMode {
    fn from(mode: ReadMode) -> Self {
        match mode {
            ReadMode::Owned => LoadMode::Owned,
            ReadMode::Mmap => LoadMode::Mmap,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::parse();
    info!(
        "using data file {} (mode: {:?}, output: {:?})",
        config.data_file.display(),
        config.load_mode,
        config.output
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    // Startup chatter would corrupt a JSON stream, so it goes to stderr there.
    let mut chatter: Box<dyn Write> = match config.output {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    };
    let (dict, path) = load_with_retry(
        config.data_file,
        config.load_mode.into(),
        &mut input,
        &mut chatter,
    )
    .context("no dictionary loaded")?;
    drop(chatter);
    info!("serving queries from {}", path.display());

    let stdout = io::stdout();
    let mut shell = Shell::new(&dict, input, stdout.lock()).with_format(config.output);
    shell.print_banner().context("write banner")?;
    shell.run().context("interactive session")?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
