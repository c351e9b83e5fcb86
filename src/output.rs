//! Output formatting for match results (console, JSON, CSV).

use crate::corpus::Corpus;
use crate::models::{MatchResult, TranscriptMatch};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a match result as JSON.
pub fn write_json<W: Write>(result: &MatchResult, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a match result as JSON to a file.
pub fn write_json_file(result: &MatchResult, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(result, &mut file)
}

/// Write batch results as JSON.
pub fn write_batch_json<W: Write>(
    matches: &[TranscriptMatch],
    writer: &mut W,
) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(matches)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write batch results as JSON to a file.
pub fn write_batch_json_file(
    matches: &[TranscriptMatch],
    path: &Path,
) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_batch_json(matches, &mut file)
}

/// Write batch results as CSV.
///
/// Free-text columns are quoted; an unaccepted transcript gets empty
/// surah/ayah columns rather than a sentinel value.
pub fn write_batch_csv<W: Write>(
    matches: &[TranscriptMatch],
    writer: &mut W,
) -> Result<(), OutputError> {
    writeln!(writer, "surah,ayah,confidence,accepted,transcript,matched_text")?;

    for entry in matches {
        let (surah, ayah) = match entry.result.verse_ref {
            Some(r) => (r.surah.to_string(), r.ayah.to_string()),
            None => (String::new(), String::new()),
        };
        writeln!(
            writer,
            "{},{},{:.4},{},{},{}",
            surah,
            ayah,
            entry.result.confidence,
            entry.result.verse_ref.is_some(),
            csv_quote(&entry.transcript),
            csv_quote(&entry.result.matched_text),
        )?;
    }

    Ok(())
}

/// Write batch results as CSV to a file.
pub fn write_batch_csv_file(
    matches: &[TranscriptMatch],
    path: &Path,
) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_batch_csv(matches, &mut file)
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Format a match result as a human-readable block, resolving verse
/// details against the corpus.
pub fn format_result(result: &MatchResult, corpus: &Corpus) -> String {
    match result.verse_ref.and_then(|r| corpus.verse(r)) {
        Some(verse) => format!(
            "✓ {} {} ({:.1}%)\n  Arabic: {}\n  Translation: {}",
            verse.surah_name,
            verse.reference,
            result.confidence * 100.0,
            verse.arabic_raw,
            verse.translation,
        ),
        None => format!(
            "✗ No confident match (best score {:.1}%)",
            result.confidence * 100.0
        ),
    }
}

/// Print a match result, with an optional tail of ranked candidates.
pub fn print_result(result: &MatchResult, corpus: &Corpus, show_candidates: Option<usize>) {
    println!("{}", format_result(result, corpus));

    if let Some(limit) = show_candidates {
        println!("\n=== Candidates ===");
        for candidate in result.candidates.iter().take(limit) {
            let name = corpus
                .verse(candidate.reference)
                .map(|v| v.surah_name.as_str())
                .unwrap_or("-");
            println!(
                "  {:>7}  {:.4}  {}",
                candidate.reference.to_string(),
                candidate.score,
                name
            );
        }
        if result.candidates.len() > limit {
            println!("  ... and {} more", result.candidates.len() - limit);
        }
    }
}

/// Print a batch summary to stdout.
pub fn print_batch_summary(matches: &[TranscriptMatch]) {
    let accepted = matches
        .iter()
        .filter(|m| m.result.verse_ref.is_some())
        .count();
    let avg_confidence = if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.result.confidence).sum::<f32>() / matches.len() as f32
    };

    println!("\n=== Batch Summary ===");
    println!("Transcripts: {}", matches.len());
    println!("Matched: {}", accepted);
    println!("Unmatched: {}", matches.len() - accepted);
    println!("Average confidence: {:.1}%", avg_confidence * 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, VerseRef};

    fn sample_matches() -> Vec<TranscriptMatch> {
        vec![
            TranscriptMatch {
                transcript: "الحمد لله".to_string(),
                result: MatchResult {
                    verse_ref: Some(VerseRef::new(1, 2)),
                    confidence: 0.91,
                    matched_text: "الحمد لله رب العالمين".to_string(),
                    candidates: vec![Candidate {
                        reference: VerseRef::new(1, 2),
                        score: 0.91,
                    }],
                },
            },
            TranscriptMatch {
                transcript: "غير معروف, حقا".to_string(),
                result: MatchResult {
                    verse_ref: None,
                    confidence: 0.21,
                    matched_text: String::new(),
                    candidates: vec![Candidate {
                        reference: VerseRef::new(1, 1),
                        score: 0.21,
                    }],
                },
            },
        ]
    }

    #[test]
    fn test_batch_csv_shape() {
        let mut buf = Vec::new();
        write_batch_csv(&sample_matches(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("surah,ayah,confidence"));
        assert!(lines[1].starts_with("1,2,0.9100,true"));
        // Unmatched rows keep empty reference columns and quote the
        // comma-bearing transcript.
        assert!(lines[2].starts_with(",,0.2100,false"));
        assert!(lines[2].contains("\"غير معروف, حقا\""));
    }

    #[test]
    fn test_batch_json_round_trip() {
        let matches = sample_matches();
        let mut buf = Vec::new();
        write_batch_json(&matches, &mut buf).unwrap();

        let parsed: Vec<TranscriptMatch> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].result.verse_ref, Some(VerseRef::new(1, 2)));
        assert_eq!(parsed[1].result.verse_ref, None);
    }

    #[test]
    fn test_csv_quote_escapes() {
        assert_eq!(csv_quote("a\"b"), "\"a\"\"b\"");
    }
}
