//! Ayah Match: verse identification for recognized Arabic recitation.
//!
//! Takes a noisy, possibly partial transcript of recited Arabic (as
//! produced by a speech-recognition collaborator), normalizes it, and
//! finds the best-matching verse in a loaded corpus with a calibrated
//! confidence value. No-match is a normal outcome carried in the result,
//! never an error.
//!
//! # Example
//!
//! ```
//! use ayah_match::prelude::*;
//!
//! let json = r#"{
//!     "surahs": [{
//!         "number": 1,
//!         "name": "Al-Fatihah",
//!         "verses": [{
//!             "number": 1,
//!             "arabic": "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
//!             "translation": "In the name of Allah, the Entirely Merciful, the Especially Merciful."
//!         }]
//!     }]
//! }"#;
//!
//! let corpus = Corpus::from_reader(json.as_bytes()).unwrap();
//! let matcher = Matcher::new(&corpus, MatchParams::default()).unwrap();
//!
//! // Diacritic-free recognition output still matches.
//! let result = matcher.best_match("بسم الله الرحمن الرحيم");
//! assert_eq!(result.verse_ref, Some(VerseRef::new(1, 1)));
//! assert!(result.confidence >= 0.95);
//! ```
//!
//! # Loading a corpus file
//!
//! ```no_run
//! use ayah_match::prelude::*;
//! use std::path::Path;
//!
//! let corpus = Corpus::load_json(Path::new("data/quran_complete.json")).unwrap();
//! let matcher = Matcher::new(&corpus, MatchParams::default()).unwrap();
//!
//! let result = matcher.best_match("الرحمن الرحيم");
//! match result.verse_ref {
//!     Some(reference) => println!("{} ({:.1}%)", reference, result.confidence * 100.0),
//!     None => println!("no confident match"),
//! }
//! ```

pub mod corpus;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod output;
pub mod score;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::corpus::{Corpus, CorpusError, VerseContext};
    pub use crate::matcher::{match_transcript, Matcher};
    pub use crate::models::{
        Candidate, ConfigError, CorpusStats, MatchParams, MatchResult, TranscriptMatch, Verse,
        VerseRef,
    };
    pub use crate::normalize::{normalize, strip_basmala};
    pub use crate::output::{
        format_result, print_batch_summary, print_result, write_batch_csv, write_batch_csv_file,
        write_batch_json, write_batch_json_file, write_json, write_json_file, OutputError,
    };
    pub use crate::score::{
        sequence_ratio, word_overlap, BlendedScorer, Scorer, SequenceScorer, WordOverlapScorer,
    };
}

// Re-export commonly used types at the crate root
pub use corpus::Corpus;
pub use matcher::{match_transcript, Matcher};
pub use models::{MatchParams, MatchResult, VerseRef};
