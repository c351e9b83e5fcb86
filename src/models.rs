//! Data structures for the verse matching engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identity of a verse within the corpus.
///
/// Ordered by surah number, then ayah number. This is the corpus order
/// used for deterministic tie-breaking when scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    pub surah: u32,
    pub ayah: u32,
}

impl VerseRef {
    pub fn new(surah: u32, ayah: u32) -> Self {
        VerseRef { surah, ayah }
    }
}

impl std::fmt::Display for VerseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

/// A single verse record, immutable once loaded.
///
/// `arabic_normalized` is derived from `arabic_raw` at load time so the
/// matcher never re-normalizes corpus text per query.
#[derive(Debug, Clone, Serialize)]
pub struct Verse {
    pub reference: VerseRef,
    pub surah_name: String,
    pub arabic_raw: String,
    pub arabic_normalized: String,
    pub translation: String,
    pub juz: Option<u32>,
    pub page: Option<u32>,
}

impl Verse {
    /// Number of words in the normalized text.
    pub fn word_count(&self) -> usize {
        self.arabic_normalized.split_whitespace().count()
    }
}

/// One scored verse in a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub reference: VerseRef,
    pub score: f32,
}

/// Outcome of matching one transcript against the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Accepted verse, or `None` when the top score fell below the
    /// acceptance threshold. No-match is a normal value, not an error.
    pub verse_ref: Option<VerseRef>,
    /// Top candidate's combined score, regardless of acceptance.
    /// 0.0 when the corpus is empty.
    pub confidence: f32,
    /// Raw Arabic of the accepted verse; empty when nothing was accepted.
    pub matched_text: String,
    /// Full ranking, descending by score, ties in corpus order.
    /// Empty only when the corpus itself is empty.
    pub candidates: Vec<Candidate>,
}

impl MatchResult {
    /// Result for a match attempt against an empty corpus.
    pub fn empty() -> Self {
        MatchResult {
            verse_ref: None,
            confidence: 0.0,
            matched_text: String::new(),
            candidates: Vec::new(),
        }
    }
}

/// A matched transcript in a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMatch {
    pub transcript: String,
    pub result: MatchResult,
}

/// Invalid matcher configuration, reported at construction time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("similarity weights must be finite and non-negative (sequence={0}, overlap={1})")]
    InvalidWeights(f32, f32),
    #[error("similarity weights must not both be zero")]
    ZeroWeights,
    #[error("acceptance threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),
}

/// Matching parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchParams {
    /// Weight of the character-sequence similarity signal.
    pub weight_sequence: f32,
    /// Weight of the word-overlap similarity signal.
    pub weight_overlap: f32,
    /// Minimum combined score for the top candidate to be accepted.
    pub acceptance_threshold: f32,
    /// Cap on the returned candidate list; `None` keeps the full ranking.
    pub max_candidates: Option<usize>,
    /// Retry scoring with a leading basmala stripped from both sides.
    /// Corpus texts prefix each surah's first verse with the basmala,
    /// which otherwise drags down scores for recitations that skip it.
    pub basmala_fallback: bool,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            weight_sequence: 0.6,
            weight_overlap: 0.4,
            acceptance_threshold: 0.6,
            max_candidates: None,
            basmala_fallback: true,
        }
    }
}

impl MatchParams {
    /// Reject invalid configurations outright rather than clamping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ws = self.weight_sequence;
        let wo = self.weight_overlap;
        if !ws.is_finite() || !wo.is_finite() || ws < 0.0 || wo < 0.0 {
            return Err(ConfigError::InvalidWeights(ws, wo));
        }
        if ws == 0.0 && wo == 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        let t = self.acceptance_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::InvalidThreshold(t));
        }
        Ok(())
    }
}

/// Corpus statistics for the `info` command.
#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub surah_count: usize,
    pub verse_count: usize,
    pub total_words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(MatchParams::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let params = MatchParams {
            weight_sequence: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidWeights(_, _))
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let params = MatchParams {
            weight_overlap: f32::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_both_weights_zero_rejected() {
        let params = MatchParams {
            weight_sequence: 0.0,
            weight_overlap: 0.0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::ZeroWeights)));
    }

    #[test]
    fn test_single_zero_weight_allowed() {
        let params = MatchParams {
            weight_sequence: 0.0,
            weight_overlap: 1.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let params = MatchParams {
            acceptance_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_verse_ref_ordering() {
        let a = VerseRef::new(1, 7);
        let b = VerseRef::new(2, 1);
        let c = VerseRef::new(2, 2);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(format!("{}", c), "2:2");
    }
}
