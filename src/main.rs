//! Verse matching command-line tool.
//!
//! Matches recognized Arabic recitation transcripts against a verse
//! corpus loaded from a JSON document.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;

mod corpus;
mod matcher;
mod models;
mod normalize;
mod output;
mod score;

use corpus::Corpus;
use matcher::Matcher;
use models::{MatchParams, TranscriptMatch, VerseRef};
use output::{
    print_batch_summary, print_result, write_batch_csv_file, write_batch_json_file,
    write_json_file,
};

#[derive(Parser)]
#[command(name = "ayah-match")]
#[command(about = "Verse identification for recognized Arabic recitation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for batch results
#[derive(Clone, Copy, Debug, ValueEnum)]
enum BatchFormat {
    /// JSON array of per-transcript results
    Json,
    /// Flat CSV table
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a single transcript against the corpus
    ///
    /// All parameters default to MatchParams::default(). Override any
    /// parameter explicitly to customize behavior.
    Match {
        /// Path to the corpus JSON document
        #[arg(long)]
        corpus: PathBuf,

        /// Transcript text (raw or normalized Arabic)
        text: String,

        /// Weight of the sequence similarity signal [default: 0.6]
        #[arg(long)]
        weight_sequence: Option<f32>,

        /// Weight of the word-overlap similarity signal [default: 0.4]
        #[arg(long)]
        weight_overlap: Option<f32>,

        /// Minimum combined score for acceptance [default: 0.6]
        #[arg(long)]
        threshold: Option<f32>,

        /// Cap on the candidate list carried in the result
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Disable the leading-basmala scoring fallback
        #[arg(long)]
        no_basmala_fallback: bool,

        /// Print the top N ranked candidates
        #[arg(long)]
        show_candidates: Option<usize>,

        /// Write the full result as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Suppress diagnostics on stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Match a file of transcripts (one per line)
    Batch {
        /// Path to the corpus JSON document
        #[arg(long)]
        corpus: PathBuf,

        /// Input file, one transcript per line; blank lines are skipped
        #[arg(long)]
        input: PathBuf,

        /// Output file path
        #[arg(long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: BatchFormat,

        /// Weight of the sequence similarity signal [default: 0.6]
        #[arg(long)]
        weight_sequence: Option<f32>,

        /// Weight of the word-overlap similarity signal [default: 0.4]
        #[arg(long)]
        weight_overlap: Option<f32>,

        /// Minimum combined score for acceptance [default: 0.6]
        #[arg(long)]
        threshold: Option<f32>,

        /// Cap on the candidate list carried in each result [default: 5]
        #[arg(long, default_value = "5")]
        max_candidates: usize,

        /// Disable the leading-basmala scoring fallback
        #[arg(long)]
        no_basmala_fallback: bool,

        /// Suppress the progress bar and summary
        #[arg(long)]
        quiet: bool,
    },

    /// Search verses containing a phrase
    Search {
        /// Path to the corpus JSON document
        #[arg(long)]
        corpus: PathBuf,

        /// Phrase to search for
        query: String,

        /// Maximum number of hits
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Show corpus statistics, a surah, or a verse with context
    Info {
        /// Path to the corpus JSON document
        #[arg(long)]
        corpus: PathBuf,

        /// Surah number
        #[arg(long)]
        surah: Option<u32>,

        /// Ayah number (requires --surah)
        #[arg(long, requires = "surah")]
        ayah: Option<u32>,

        /// Context verses around the ayah
        #[arg(long, default_value = "2")]
        context: usize,
    },

    /// Benchmark matching performance against a loaded corpus
    Benchmark {
        /// Path to the corpus JSON document
        #[arg(long)]
        corpus: PathBuf,

        /// Number of match iterations per query shape
        #[arg(long, default_value = "100")]
        iterations: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            corpus,
            text,
            weight_sequence,
            weight_overlap,
            threshold,
            max_candidates,
            no_basmala_fallback,
            show_candidates,
            output,
            quiet,
        } => {
            let params = build_params(
                weight_sequence,
                weight_overlap,
                threshold,
                max_candidates,
                no_basmala_fallback,
            );

            if !quiet {
                eprintln!("Loading corpus from {}...", corpus.display());
            }
            let corpus = Corpus::load_json(&corpus)?;
            if !quiet {
                eprintln!("  {} verses loaded", corpus.len());
            }

            let matcher = Matcher::new(&corpus, params)?;
            let result = matcher.best_match(&text);

            print_result(&result, &corpus, show_candidates);

            if let Some(path) = output {
                write_json_file(&result, &path)?;
                if !quiet {
                    eprintln!("\nOutput: {}", path.display());
                }
            }
        }

        Commands::Batch {
            corpus,
            input,
            output,
            format,
            weight_sequence,
            weight_overlap,
            threshold,
            max_candidates,
            no_basmala_fallback,
            quiet,
        } => {
            let params = build_params(
                weight_sequence,
                weight_overlap,
                threshold,
                Some(max_candidates),
                no_basmala_fallback,
            );

            if !quiet {
                eprintln!("Loading corpus from {}...", corpus.display());
            }
            let corpus = Corpus::load_json(&corpus)?;
            let matcher = Matcher::new(&corpus, params)?;

            let content = std::fs::read_to_string(&input)?;
            let transcripts: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            let progress = if quiet {
                None
            } else {
                let pb = ProgressBar::new(transcripts.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                        )
                        .unwrap()
                        .progress_chars("#>-"),
                );
                Some(pb)
            };

            let matches: Vec<TranscriptMatch> = transcripts
                .par_iter()
                .map(|transcript| {
                    let result = matcher.best_match(transcript);
                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }
                    TranscriptMatch {
                        transcript: transcript.to_string(),
                        result,
                    }
                })
                .collect();

            if let Some(pb) = progress {
                pb.finish_with_message("Done");
            }

            match format {
                BatchFormat::Json => write_batch_json_file(&matches, &output)?,
                BatchFormat::Csv => write_batch_csv_file(&matches, &output)?,
            }

            if !quiet {
                print_batch_summary(&matches);
                eprintln!("\nOutput: {}", output.display());
            }
        }

        Commands::Search {
            corpus,
            query,
            limit,
        } => {
            let corpus = Corpus::load_json(&corpus)?;
            let matcher = Matcher::new(&corpus, MatchParams::default())?;

            let hits = matcher.search(&query, limit);
            if hits.is_empty() {
                println!("No verses contain \"{}\"", query);
            } else {
                for hit in hits {
                    if let Some(verse) = corpus.verse(hit.reference) {
                        println!(
                            "{:>7}  {:.4}  {}\n         {}",
                            hit.reference.to_string(),
                            hit.score,
                            verse.arabic_raw,
                            verse.translation
                        );
                    }
                }
            }
        }

        Commands::Info {
            corpus,
            surah,
            ayah,
            context,
        } => {
            let corpus = Corpus::load_json(&corpus)?;

            match (surah, ayah) {
                (Some(surah), Some(ayah)) => {
                    let reference = VerseRef::new(surah, ayah);
                    match corpus.context(reference, context) {
                        Some(ctx) => {
                            for verse in ctx.before {
                                println!("  {}  {}", verse.reference, verse.arabic_raw);
                            }
                            println!("> {}  {}", ctx.verse.reference, ctx.verse.arabic_raw);
                            println!("         {}", ctx.verse.translation);
                            for verse in ctx.after {
                                println!("  {}  {}", verse.reference, verse.arabic_raw);
                            }
                        }
                        None => println!("Verse {} not found", reference),
                    }
                }
                (Some(surah), None) => {
                    let verses: Vec<_> = corpus
                        .verses()
                        .iter()
                        .filter(|v| v.reference.surah == surah)
                        .collect();
                    if verses.is_empty() {
                        println!("Surah {} not found", surah);
                    } else {
                        println!("=== Surah {} ({}) ===", surah, verses[0].surah_name);
                        for verse in verses {
                            println!("{:>7}  {}", verse.reference.to_string(), verse.arabic_raw);
                        }
                    }
                }
                _ => {
                    let stats = corpus.stats();
                    println!("=== Corpus Statistics ===");
                    println!("Surahs: {}", stats.surah_count);
                    println!("Verses: {}", stats.verse_count);
                    println!("Words: {}", stats.total_words);
                }
            }
        }

        Commands::Benchmark { corpus, iterations } => {
            let corpus = Corpus::load_json(&corpus)?;
            run_benchmark(&corpus, iterations);
        }
    }

    Ok(())
}

/// Overlay user-specified values onto the library defaults.
fn build_params(
    weight_sequence: Option<f32>,
    weight_overlap: Option<f32>,
    threshold: Option<f32>,
    max_candidates: Option<usize>,
    no_basmala_fallback: bool,
) -> MatchParams {
    let defaults = MatchParams::default();
    MatchParams {
        weight_sequence: weight_sequence.unwrap_or(defaults.weight_sequence),
        weight_overlap: weight_overlap.unwrap_or(defaults.weight_overlap),
        acceptance_threshold: threshold.unwrap_or(defaults.acceptance_threshold),
        max_candidates: max_candidates.or(defaults.max_candidates),
        basmala_fallback: !no_basmala_fallback,
    }
}

/// Time full-corpus scans for representative query shapes.
fn run_benchmark(corpus: &Corpus, iterations: usize) {
    use std::time::Instant;

    let matcher = match Matcher::new(corpus, MatchParams::default()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Benchmark setup failed: {}", e);
            return;
        }
    };

    let full_verse = corpus
        .verses()
        .first()
        .map(|v| v.arabic_normalized.clone())
        .unwrap_or_default();
    let fragment = full_verse
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");

    let queries = [
        ("exact verse", full_verse.as_str()),
        ("two-word fragment", fragment.as_str()),
        ("no match", "كلمات لا تشبه اي ايه"),
    ];

    println!("=== Match Benchmark ===");
    println!("Corpus: {} verses", corpus.len());
    println!("Iterations: {}", iterations);

    for (label, query) in queries {
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = matcher.best_match(query);
        }
        let elapsed = start.elapsed();
        let per_match = elapsed.as_secs_f64() / iterations as f64;

        println!("\n{}:", label);
        println!("  Total time: {:.3}s", elapsed.as_secs_f64());
        println!("  Per match: {:.3}ms", per_match * 1000.0);
        println!("  Matches/sec: {:.0}", 1.0 / per_match);
    }
}
