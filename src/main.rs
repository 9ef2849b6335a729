use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use lottery_rust::engines::core::parallel;
use lottery_rust::modules::pick::format_selection;
use lottery_rust::{
    parse_target, read_player_picks_file, BitSelection, EngineError, MatchEngine, PickCodec,
    Report, Selection, Settings, SortedSelection,
};

#[derive(Parser)]
#[command(name = "lottery")]
#[command(version)]
#[command(about = "Match winning lottery picks against player picks")]
#[command(
    long_about = "Loads player picks (one selection per line) and then reads winning picks from stdin, printing the number of winners for every match level.\n\nThe lottery is configured through NUMBER_OF_PICKS, MIN_MATCHES, MIN_LOTTERY_PICK, MAX_LOTTERY_PICK, PLAYER_NUMBERS_FILE_PATH and WORKER_THREADS."
)]
struct Cli {
    /// Player picks file (defaults to PLAYER_NUMBERS_FILE_PATH)
    file: Option<PathBuf>,

    /// Number of worker threads (defaults to WORKER_THREADS or the host parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Selection representation used for matching
    #[arg(short, long, default_value = "bitset")]
    strategy: Strategy,

    /// Report format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// 128-bit masks scored with popcount
    Bitset,
    /// Sorted numbers scored with a merge
    Sorted,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("lottery_rust=debug,lottery=debug,info")
    } else {
        EnvFilter::new("lottery_rust=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let mut settings = Settings::load();
    if let Some(threads) = cli.threads {
        settings.worker_threads = parallel::resolve_num_threads(Some(threads));
    }
    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| settings.player_numbers_path.clone());

    println!("Hungarian Lottery system. Press CTRL+C to exit");

    match cli.strategy {
        Strategy::Bitset => run::<BitSelection>(&settings, &path, cli.format),
        Strategy::Sorted => run::<SortedSelection>(&settings, &path, cli.format),
    }
}

fn run<S: Selection>(settings: &Settings, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let codec = PickCodec::new(settings.lottery);
    let pool = read_player_picks_file::<S, _>(&codec, path, settings.worker_threads)
        .with_context(|| format!("Error processing player numbers from {}", path.display()))?
        .selections;

    let engine = MatchEngine::new(settings.lottery).with_threads(settings.worker_threads);
    log::info!(
        "Matching against {} player picks on {} workers",
        pool.len(),
        engine.num_threads()
    );

    let mut stdout = io::stdout();
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Error reading lottery picks")?;

        let target: S = match parse_target(&codec, &line) {
            Ok(target) => target,
            Err(err @ EngineError::TargetParseFailure(_)) => {
                println!("{}", err);
                prompt(&mut stdout)?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        log::debug!("Matching target {}", format_selection(&target, codec.config()));
        let start = Instant::now();
        let tally = engine.match_picks(&target, &pool);
        let report = Report::new(&tally, start.elapsed());

        match format {
            OutputFormat::Text => print!("\n{}", report),
            OutputFormat::Json => println!("{}", report.to_json()?),
        }

        prompt(&mut stdout)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nEnter lottery picks")?;
    out.flush()
}
