//! Command-line entry point for pseudoword generation.
//!
//! `ENV=production` preloads every available language plugin (the
//! built-in English model plus every bundle directory under
//! `--data-dir`); any other value preloads only `orthographic_english`.
//! One JSON object per reference sequence goes to stdout:
//! `{"word": ..., "matches": [...]}`, or `{"word": ..., "error": ...}`
//! when that single reference failed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};

use pseudolex_core::engine::Engine;
use pseudolex_core::ratio::Ratio;
use pseudolex_core::{registry, Constraints};
use pseudolex_english::ORTHOGRAPHIC_ENGLISH;

/// Generate pseudowords for one or more reference sequences.
#[derive(Debug, Parser)]
#[command(name = "pseudolex", version, about)]
struct Args {
    /// Reference sequence(s) to generate pseudowords for.
    #[arg(long = "reference-sequence", required = true, num_args = 1..)]
    reference_sequences: Vec<String>,

    /// Language plugin to use.
    #[arg(long, default_value = ORTHOGRAPHIC_ENGLISH)]
    language_plugin: String,

    /// Desired number of pseudowords per reference sequence.
    #[arg(long, default_value_t = 10)]
    ncandidates: usize,

    /// Wall-clock search budget per reference sequence, in seconds.
    #[arg(long, default_value_t = 25)]
    max_search_time: u64,

    /// Require candidates to match the reference letter length.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    match_length: bool,

    /// Minimum segment overlap ratio, as an exact fraction (e.g. 2/3).
    #[arg(long, default_value = "2/3", value_parser = parse_ratio)]
    min_overlap: Ratio,

    /// Directory of additional language bundles (one subdirectory per
    /// plugin identifier). Loaded only in production mode.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn parse_ratio(s: &str) -> Result<Ratio, String> {
    s.parse()
}

/// Load every bundle subdirectory as a plugin named after the directory.
fn load_bundles(data_dir: &std::path::Path) {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read data dir {}: {}", data_dir.display(), err);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let id = match path.file_name().and_then(|n| n.to_str()) {
            Some(id) => id.to_string(),
            None => continue,
        };
        match registry::load_from_dir(&id, &path) {
            Ok(_) => info!("loaded language plugin {id}"),
            Err(err) => warn!("skipping bundle {id}: {err}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let environment = std::env::var("ENV").unwrap_or_else(|_| "development".to_string());
    if environment == "production" {
        info!("production mode: loading all available language plugins");
        pseudolex_english::register();
        if let Some(data_dir) = &args.data_dir {
            load_bundles(data_dir);
        }
    } else {
        info!("development mode: loading only {}", ORTHOGRAPHIC_ENGLISH);
        pseudolex_english::register();
    }
    info!(
        "loaded language plugins: {:?}",
        registry::loaded_languages()
    );

    let engine = Engine::for_language(&args.language_plugin)
        .with_context(|| format!("language plugin {} not found", args.language_plugin))?;

    if args.ncandidates == 0 {
        bail!("--ncandidates must be positive");
    }
    let constraints = Constraints {
        ncandidates: args.ncandidates,
        time_budget: Duration::from_secs(args.max_search_time),
        match_length: args.match_length,
        min_overlap: args.min_overlap,
    };

    let references: Vec<&str> = args.reference_sequences.iter().map(|s| s.as_str()).collect();
    let mut failures = 0usize;
    for result in engine.generate_classic(&references, &constraints) {
        let line = match result.outcome {
            Ok(outcome) => serde_json::json!({
                "word": result.reference,
                "matches": outcome.matches(),
            }),
            Err(err) => {
                failures += 1;
                serde_json::json!({
                    "word": result.reference,
                    "error": err.to_string(),
                })
            }
        };
        println!("{}", line);
    }

    if failures > 0 {
        warn!("{failures} reference sequence(s) failed");
    }
    Ok(())
}
