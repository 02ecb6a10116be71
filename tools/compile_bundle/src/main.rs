//! Compile a language bundle from raw text inputs.
//!
//! Input:
//!  - a word list, one spelling per line
//!  - a segment inventory, one segment per line (optionally
//!    `segment<TAB>weight` to seed weights)
//!
//! Output directory:
//!  - `lexicon.fst`  compiled word set
//!  - `stats.bin`    segment weights and transition counts (bincode),
//!                   derived by segmenting every word with the inventory
//!
//! The result is loadable with `LanguageModel::from_bundle_dir`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use pseudolex_core::segmenter::segment;
use pseudolex_core::utils;
use pseudolex_core::{LanguageModel, Lexicon, SegmentStats};

#[derive(Debug, Parser)]
#[command(name = "compile_bundle", about)]
struct Args {
    /// Word list file, one spelling per line.
    #[arg(long)]
    wordlist: PathBuf,

    /// Segment inventory file, one segment (or segment<TAB>weight) per line.
    #[arg(long)]
    segments: PathBuf,

    /// Output bundle directory (created if missing).
    #[arg(long)]
    out: PathBuf,

    /// Identifier recorded in diagnostics.
    #[arg(long, default_value = "bundle")]
    id: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let inventory_text = std::fs::read_to_string(&args.segments)
        .with_context(|| format!("read segment inventory {}", args.segments.display()))?;
    let mut seed = SegmentStats::new();
    for line in inventory_text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (seg, weight) = match line.split_once('\t') {
            Some((seg, w)) => (
                seg.trim(),
                w.trim()
                    .parse::<u32>()
                    .with_context(|| format!("bad weight in line {:?}", line))?,
            ),
            None => (line, 1),
        };
        seed.add_segment(seg, weight);
    }
    if seed.is_empty() {
        bail!("segment inventory {} is empty", args.segments.display());
    }

    let skeleton = LanguageModel::new(args.id.clone(), Lexicon::new(), seed.clone());

    let wordlist_text = std::fs::read_to_string(&args.wordlist)
        .with_context(|| format!("read word list {}", args.wordlist.display()))?;
    let mut lexicon = Lexicon::new();
    let mut stats = seed;
    let mut total = 0usize;
    let mut skipped = 0usize;
    for line in wordlist_text.lines() {
        let word = utils::normalize(line);
        if word.is_empty() {
            continue;
        }
        total += 1;
        lexicon.insert(&word);
        match segment(&word, &skeleton) {
            Ok(seg) => {
                let parts = seg.segments();
                for part in parts {
                    stats.add_segment(part, 1);
                }
                for pair in parts.windows(2) {
                    stats.add_transition(&pair[0], &pair[1], 1);
                }
            }
            Err(_) => {
                // word uses characters the inventory cannot cover; it
                // still enters the lexicon for the realness filter
                skipped += 1;
            }
        }
    }
    if total == 0 {
        bail!("word list {} is empty", args.wordlist.display());
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create bundle dir {}", args.out.display()))?;
    let fst_bytes = lexicon
        .compile_fst()
        .map_err(|e| anyhow::anyhow!("compile lexicon fst: {}", e))?;
    std::fs::write(args.out.join("lexicon.fst"), fst_bytes).context("write lexicon.fst")?;
    stats
        .save(args.out.join("stats.bin"))
        .map_err(|e| anyhow::anyhow!("write stats.bin: {}", e))?;

    println!(
        "compiled bundle {}: {} words ({} unsegmentable), output in {}",
        args.id,
        total,
        skipped,
        args.out.display()
    );
    Ok(())
}
