//! Verse matching against a loaded corpus.
//!
//! This module coordinates the full matching pipeline for one transcript:
//! normalize, score every verse in parallel, rank, apply the acceptance
//! threshold. Matching is a pure function of (query, corpus, params);
//! repeated calls are independent and reentrant.

use rayon::prelude::*;
use std::cmp::Ordering;

use crate::corpus::Corpus;
use crate::models::{Candidate, ConfigError, MatchParams, MatchResult, Verse};
use crate::normalize::{normalize, strip_basmala};
use crate::score::{BlendedScorer, Scorer};

/// A configured matcher holding a read-only corpus handle.
///
/// Construction validates the parameters; an invalid configuration is an
/// error here, never a silent scoring anomaly later.
pub struct Matcher<'a> {
    corpus: &'a Corpus,
    params: MatchParams,
    scorer: Box<dyn Scorer>,
}

impl<'a> Matcher<'a> {
    /// Matcher with the default blended scorer built from `params`.
    pub fn new(corpus: &'a Corpus, params: MatchParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let scorer: Box<dyn Scorer> = Box::new(BlendedScorer::from_params(&params));
        Ok(Matcher {
            corpus,
            params,
            scorer,
        })
    }

    /// Matcher with a caller-supplied scoring strategy.
    pub fn with_scorer(
        corpus: &'a Corpus,
        params: MatchParams,
        scorer: Box<dyn Scorer>,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Matcher {
            corpus,
            params,
            scorer,
        })
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    pub fn corpus(&self) -> &Corpus {
        self.corpus
    }

    /// Find the best-matching verse for a recognized transcript.
    ///
    /// The transcript may be raw or already normalized; normalization is
    /// idempotent so double application is safe. Never fails: an empty
    /// query scores 0 against every verse and an empty corpus produces an
    /// empty result.
    pub fn best_match(&self, transcript: &str) -> MatchResult {
        if self.corpus.is_empty() {
            return MatchResult::empty();
        }

        let query = normalize(transcript);

        let mut candidates: Vec<Candidate> = self
            .corpus
            .verses()
            .par_iter()
            .map(|verse| Candidate {
                reference: verse.reference,
                score: self.score_verse(&query, verse),
            })
            .collect();

        rank(&mut candidates);

        let top = candidates[0];
        let accepted =
            !query.is_empty() && top.score >= self.params.acceptance_threshold;

        if let Some(cap) = self.params.max_candidates {
            candidates.truncate(cap);
        }

        let matched_text = if accepted {
            self.corpus
                .verse(top.reference)
                .map(|v| v.arabic_raw.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        MatchResult {
            verse_ref: accepted.then_some(top.reference),
            confidence: top.score,
            matched_text,
            candidates,
        }
    }

    /// Verses whose normalized text contains the query, ranked by score.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<Candidate> = self
            .corpus
            .verses()
            .iter()
            .filter(|verse| verse.arabic_normalized.contains(&query))
            .map(|verse| Candidate {
                reference: verse.reference,
                score: self.scorer.score(&query, &verse.arabic_normalized),
            })
            .collect();

        rank(&mut hits);
        hits.truncate(limit);
        hits
    }

    /// Combined score for one verse, with the basmala fallback applied
    /// when enabled and meaningful on both sides.
    fn score_verse(&self, query: &str, verse: &Verse) -> f32 {
        let plain = self.scorer.score(query, &verse.arabic_normalized);

        if !self.params.basmala_fallback {
            return plain;
        }

        let stripped_query = strip_basmala(query);
        let stripped_verse = strip_basmala(&verse.arabic_normalized);
        let any_stripped = stripped_query.len() != query.len()
            || stripped_verse.len() != verse.arabic_normalized.len();

        if !any_stripped || stripped_query.is_empty() || stripped_verse.is_empty() {
            return plain;
        }

        plain.max(self.scorer.score(stripped_query, stripped_verse))
    }
}

/// Match one transcript with a one-shot matcher.
///
/// Convenience wrapper for callers that do not keep a `Matcher` around;
/// configuration errors surface before any scoring happens.
pub fn match_transcript(
    transcript: &str,
    corpus: &Corpus,
    params: &MatchParams,
) -> Result<MatchResult, ConfigError> {
    Ok(Matcher::new(corpus, params.clone())?.best_match(transcript))
}

/// Sort descending by score, ties broken by corpus order. Scores are
/// finite (scorers return values in [0, 1]), so the comparison is total.
fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.reference.cmp(&b.reference))
    });
}
