//! Similarity scoring strategies.
//!
//! Scoring is the HOT PATH: every query is scored against every verse in
//! the corpus. Both inputs are expected to be normalized already
//! (see [`crate::normalize`]); scorers do no normalization of their own.
//!
//! The [`Scorer`] trait keeps the strategies swappable so sequence-based
//! and overlap-based scoring can be tuned and tested independently.

use std::collections::HashSet;

use crate::models::MatchParams;

/// A similarity strategy over normalized text.
///
/// Implementations must be pure and return a value in [0, 1].
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str, candidate: &str) -> f32;
}

/// Character-sequence similarity: `2M / T` where `M` is the length of the
/// longest common subsequence and `T` the total length of both strings.
///
/// This is the Gestalt ratio difflib popularized, derived from edit
/// distance without substitutions. It tolerates the insertions and
/// deletions typical of speech-recognition noise and rewards queries
/// that are contiguous fragments of a verse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceScorer;

impl Scorer for SequenceScorer {
    fn score(&self, query: &str, candidate: &str) -> f32 {
        sequence_ratio(query, candidate)
    }
}

/// Word-overlap similarity: the mean of (shared words / query words) and
/// (shared words / candidate words).
///
/// A three-word fragment of a long verse keeps a strong query-side
/// containment even though its sequence ratio is middling, which is what
/// rescues short partial recitations.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordOverlapScorer;

impl Scorer for WordOverlapScorer {
    fn score(&self, query: &str, candidate: &str) -> f32 {
        word_overlap(query, candidate)
    }
}

/// The weighted blend of sequence and word-overlap similarity the matcher
/// uses by default. Normalized by the weight sum, so 1.0 is the maximum
/// achievable score for any valid weighting.
#[derive(Debug, Clone, Copy)]
pub struct BlendedScorer {
    weight_sequence: f32,
    weight_overlap: f32,
}

impl BlendedScorer {
    /// Build from validated parameters. Callers are expected to have run
    /// `MatchParams::validate` first; the weight sum is non-zero then.
    pub fn from_params(params: &MatchParams) -> Self {
        BlendedScorer {
            weight_sequence: params.weight_sequence,
            weight_overlap: params.weight_overlap,
        }
    }
}

impl Scorer for BlendedScorer {
    fn score(&self, query: &str, candidate: &str) -> f32 {
        let total = self.weight_sequence + self.weight_overlap;
        let mut sum = 0.0;
        // Skip a zero-weighted signal entirely; it cannot contribute.
        if self.weight_sequence > 0.0 {
            sum += self.weight_sequence * sequence_ratio(query, candidate);
        }
        if self.weight_overlap > 0.0 {
            sum += self.weight_overlap * word_overlap(query, candidate);
        }
        sum / total
    }
}

/// Gestalt sequence ratio over characters, in [0, 1].
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();
    let matches = lcs_length(&chars_a, &chars_b);

    2.0 * matches as f32 / (chars_a.len() + chars_b.len()) as f32
}

/// Longest common subsequence length via a two-row DP over a flat buffer.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let m = b.len();
    let mut prev = vec![0u32; m + 1];
    let mut curr = vec![0u32; m + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m] as usize
}

/// Word-overlap similarity in [0, 1]; 0.0 when either side has no words.
pub fn word_overlap(a: &str, b: &str) -> f32 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let shared = words_a.intersection(&words_b).count() as f32;
    let from_a = shared / words_a.len() as f32;
    let from_b = shared / words_b.len() as f32;

    (from_a + from_b) / 2.0
}
