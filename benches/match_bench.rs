//! Criterion benchmarks for normalization, scoring, and corpus scans.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ayah_match::corpus::Corpus;
use ayah_match::matcher::Matcher;
use ayah_match::models::{MatchParams, Verse, VerseRef};
use ayah_match::normalize::normalize;
use ayah_match::score::{sequence_ratio, word_overlap};

/// Deterministic pseudo-random generator so benches are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

const LETTERS: &[char] = &[
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ع',
    'غ', 'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي',
];

fn random_word(rng: &mut Lcg) -> String {
    let len = 2 + (rng.next() % 6) as usize;
    (0..len)
        .map(|_| LETTERS[(rng.next() as usize) % LETTERS.len()])
        .collect()
}

fn random_text(rng: &mut Lcg, words: usize) -> String {
    (0..words)
        .map(|_| random_word(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synthetic corpus of `size` verses with 4-14 words each.
fn synthetic_corpus(size: usize) -> Corpus {
    let mut rng = Lcg(42);
    let verses: Vec<Verse> = (0..size)
        .map(|i| {
            let words = 4 + (rng.next() % 11) as usize;
            let text = random_text(&mut rng, words);
            Verse {
                reference: VerseRef::new((i / 20 + 1) as u32, (i % 20 + 1) as u32),
                surah_name: String::new(),
                arabic_raw: text.clone(),
                arabic_normalized: normalize(&text),
                translation: String::new(),
                juz: None,
                page: None,
            }
        })
        .collect();
    Corpus::from_verses(verses).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let short = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
    let long = "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ \
                إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ";

    group.bench_function("short_verse", |b| b.iter(|| normalize(black_box(short))));
    group.bench_function("long_verse", |b| b.iter(|| normalize(black_box(long))));
    // Already-normalized text: the idempotent fast path in practice.
    let normalized = normalize(long);
    group.bench_function("pre_normalized", |b| {
        b.iter(|| normalize(black_box(&normalized)))
    });

    group.finish();
}

fn bench_scorers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorers");

    let sizes = [5, 15, 40];
    let mut rng = Lcg(7);

    for size in sizes {
        let a = random_text(&mut rng, size);
        let b_same = a.clone();
        let b_other = random_text(&mut rng, size);

        group.bench_with_input(BenchmarkId::new("sequence_identical", size), &size, |b, _| {
            b.iter(|| sequence_ratio(black_box(&a), black_box(&b_same)))
        });
        group.bench_with_input(BenchmarkId::new("sequence_unrelated", size), &size, |b, _| {
            b.iter(|| sequence_ratio(black_box(&a), black_box(&b_other)))
        });
        group.bench_with_input(BenchmarkId::new("word_overlap", size), &size, |b, _| {
            b.iter(|| word_overlap(black_box(&a), black_box(&b_other)))
        });
    }

    group.finish();
}

fn bench_corpus_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_scan");
    group.sample_size(20);

    // 6000 approximates the full corpus (6236 verses).
    for size in [100, 1000, 6000] {
        let corpus = synthetic_corpus(size);
        let matcher = Matcher::new(&corpus, MatchParams::default()).unwrap();

        let exact = corpus.verses()[size / 2].arabic_normalized.clone();
        let fragment = exact
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ");

        group.bench_with_input(BenchmarkId::new("exact_verse", size), &size, |b, _| {
            b.iter(|| matcher.best_match(black_box(&exact)))
        });
        group.bench_with_input(BenchmarkId::new("fragment", size), &size, |b, _| {
            b.iter(|| matcher.best_match(black_box(&fragment)))
        });
        group.bench_with_input(BenchmarkId::new("no_match", size), &size, |b, _| {
            b.iter(|| matcher.best_match(black_box("كلمات لا تشبه اي ايه في المصحف")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_scorers, bench_corpus_scan);
criterion_main!(benches);
