//! Corpus loading and validation.
//!
//! The matching core consumes a verse-keyed JSON document of the shape
//! the host application downloads (surahs, each with numbered verses
//! carrying Arabic text and a translation). Loading validates eagerly and
//! fails fast: a malformed record is an error, never a silently skipped
//! verse, so corpus gaps cannot masquerade as "no match" later.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::models::{CorpusStats, Verse, VerseRef};
use crate::normalize::normalize;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("verse {surah}:{ayah}: surah and ayah numbers must be positive")]
    InvalidReference { surah: u32, ayah: u32 },
    #[error("verse {0}: Arabic text is empty after normalization")]
    EmptyArabic(VerseRef),
    #[error("duplicate verse reference {0}")]
    DuplicateReference(VerseRef),
}

/// Raw document shape. Extra fields (download metadata, revelation place,
/// verse keys) are ignored; only the matching-relevant ones are read.
#[derive(Debug, Deserialize)]
struct QuranDocument {
    surahs: Vec<SurahRecord>,
}

#[derive(Debug, Deserialize)]
struct SurahRecord {
    number: u32,
    #[serde(default)]
    name: String,
    verses: Vec<VerseRecord>,
}

#[derive(Debug, Deserialize)]
struct VerseRecord {
    number: u32,
    arabic: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    juz: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
}

/// The read-only verse collection a matching session runs against.
///
/// Verses are held in corpus order (surah, then ayah) with their
/// normalized text cached, so a matcher scan is a flat read-only pass.
#[derive(Debug, Clone)]
pub struct Corpus {
    verses: Vec<Verse>,
}

impl Corpus {
    /// Load and validate a corpus from a JSON file.
    pub fn load_json(path: &Path) -> Result<Corpus, CorpusError> {
        let file = File::open(path)?;
        Corpus::from_reader(BufReader::new(file))
    }

    /// Load and validate a corpus from any reader of the JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Corpus, CorpusError> {
        let document: QuranDocument = serde_json::from_reader(reader)?;

        let mut verses = Vec::new();
        for surah in &document.surahs {
            for verse in &surah.verses {
                verses.push(build_verse(surah, verse)?);
            }
        }

        Corpus::from_verses(verses)
    }

    /// Build a corpus from already-constructed verse records.
    ///
    /// Sorts into corpus order and rejects duplicates and verses whose
    /// normalized text is empty.
    pub fn from_verses(mut verses: Vec<Verse>) -> Result<Corpus, CorpusError> {
        verses.sort_by_key(|v| v.reference);

        for pair in verses.windows(2) {
            if pair[0].reference == pair[1].reference {
                return Err(CorpusError::DuplicateReference(pair[0].reference));
            }
        }
        for verse in &verses {
            if verse.arabic_normalized.is_empty() {
                return Err(CorpusError::EmptyArabic(verse.reference));
            }
        }

        Ok(Corpus { verses })
    }

    /// All verses in corpus order.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Look up a verse by reference.
    pub fn verse(&self, reference: VerseRef) -> Option<&Verse> {
        self.verses
            .binary_search_by_key(&reference, |v| v.reference)
            .ok()
            .map(|idx| &self.verses[idx])
    }

    /// A verse with up to `context_size` neighbors from the same surah
    /// on either side.
    pub fn context(&self, reference: VerseRef, context_size: usize) -> Option<VerseContext<'_>> {
        let idx = self
            .verses
            .binary_search_by_key(&reference, |v| v.reference)
            .ok()?;

        let mut start = idx;
        while start > 0
            && idx - start < context_size
            && self.verses[start - 1].reference.surah == reference.surah
        {
            start -= 1;
        }

        let mut end = idx + 1;
        while end < self.verses.len()
            && end - idx <= context_size
            && self.verses[end].reference.surah == reference.surah
        {
            end += 1;
        }

        Some(VerseContext {
            before: &self.verses[start..idx],
            verse: &self.verses[idx],
            after: &self.verses[idx + 1..end],
        })
    }

    pub fn stats(&self) -> CorpusStats {
        let mut surahs: Vec<u32> = self.verses.iter().map(|v| v.reference.surah).collect();
        surahs.dedup();

        CorpusStats {
            surah_count: surahs.len(),
            verse_count: self.verses.len(),
            total_words: self.verses.iter().map(|v| v.word_count()).sum(),
        }
    }
}

/// A verse and its same-surah neighbors, borrowed from the corpus.
#[derive(Debug)]
pub struct VerseContext<'a> {
    pub before: &'a [Verse],
    pub verse: &'a Verse,
    pub after: &'a [Verse],
}

fn build_verse(surah: &SurahRecord, record: &VerseRecord) -> Result<Verse, CorpusError> {
    if surah.number == 0 || record.number == 0 {
        return Err(CorpusError::InvalidReference {
            surah: surah.number,
            ayah: record.number,
        });
    }

    let reference = VerseRef::new(surah.number, record.number);
    let arabic_normalized = normalize(&record.arabic);
    if arabic_normalized.is_empty() {
        return Err(CorpusError::EmptyArabic(reference));
    }

    Ok(Verse {
        reference,
        surah_name: surah.name.clone(),
        arabic_raw: record.arabic.clone(),
        arabic_normalized,
        translation: record.translation.clone(),
        // The download format writes 0 for missing juz/page metadata.
        juz: nonzero(record.juz),
        page: nonzero(record.page),
    })
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v != 0)
}
