//! Arabic text normalization.
//!
//! Maps recognized speech and corpus text to a shared canonical form so
//! that orthographic variation (diacritics, letter shapes, punctuation)
//! does not defeat matching. `normalize` is pure and idempotent: applying
//! it to already-normalized text is a no-op.

/// The basmala formula in normalized form.
///
/// Corpus editions prefix each surah's first verse with it; recitations
/// often skip it. See [`strip_basmala`].
pub const BASMALA: &str = "بسم الله الرحمن الرحيم";

/// Spoken renderings of the muqatta'at (disconnected letters).
///
/// Speech recognition transcribes the recited letter names
/// ("alif lam mim"), while corpus text carries the compact ligature
/// ("الم"). Matched against whole words only, longest phrase first, so
/// letter names embedded in ordinary words are left alone.
const SPOKEN_FORMS: &[(&[&str], &str)] = &[
    (&["كاف", "ها", "يا", "عين", "صاد"], "كهيعص"),
    (&["الف", "لام", "ميم"], "الم"),
    (&["الف", "لام", "راء"], "الر"),
    (&["ياسين"], "يس"),
    (&["طاها"], "طه"),
    (&["حاميم"], "حم"),
    (&["صاد"], "ص"),
    (&["قاف"], "ق"),
    (&["نون"], "ن"),
];

/// Normalize an Arabic string to its canonical comparison form.
///
/// - strips tashkil, Quranic annotation marks and the tatweel
/// - folds alef, yeh, heh and waw letter variants to one codepoint each
/// - drops punctuation, digits and invisible direction marks
/// - collapses whitespace runs to single spaces and trims
/// - rewrites spoken muqatta'at forms to their corpus rendering
///
/// Never fails: empty or non-Arabic input comes back empty or reduced,
/// and matching against it simply yields no acceptable candidate.
pub fn normalize(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(folded) = fold_char(c) {
            current.push(folded);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    join_with_spoken_forms(&words)
}

/// Fold a single character; `None` drops it entirely.
fn fold_char(c: char) -> Option<char> {
    match c {
        // Tashkil, superscript alef, tatweel, Quranic annotation signs.
        '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}' => None,
        '\u{06D6}'..='\u{06ED}' => None,
        '\u{08D3}'..='\u{08FF}' => None,
        // Invisible formatting characters left behind by transcripts.
        '\u{FEFF}' | '\u{200E}' | '\u{200F}' | '\u{200D}' | '\u{200C}' => None,
        // Letter-variant folding.
        'آ' | 'أ' | 'إ' | 'ٱ' => Some('ا'),
        'ى' | 'ئ' => Some('ي'),
        'ة' => Some('ه'),
        'ؤ' => Some('و'),
        // Arabic punctuation.
        '،' | '؛' | '؟' | '۔' | '٪' | '٭' | '«' | '»' => None,
        // Arabic-Indic and extended digits.
        '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}' => None,
        // Latin noise: drop punctuation and digits, keep letters lowercased.
        c if c.is_ascii_digit() || c.is_ascii_punctuation() => None,
        c if c.is_ascii_uppercase() => Some(c.to_ascii_lowercase()),
        c => Some(c),
    }
}

/// Join folded words, rewriting spoken muqatta'at sequences in place.
fn join_with_spoken_forms(words: &[String]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;

    'outer: while i < words.len() {
        for (phrase, short) in SPOKEN_FORMS {
            if phrase.len() <= words.len() - i
                && phrase
                    .iter()
                    .zip(&words[i..i + phrase.len()])
                    .all(|(p, w)| *p == w.as_str())
            {
                out.push(short);
                i += phrase.len();
                continue 'outer;
            }
        }
        out.push(words[i].as_str());
        i += 1;
    }

    out.join(" ")
}

/// Strip a leading basmala from normalized text.
///
/// Returns the remainder (trimmed), or the input unchanged when it does
/// not start with the formula. Stripping the whole string yields `""`,
/// which callers must treat as "nothing left to compare".
pub fn strip_basmala(normalized: &str) -> &str {
    match normalized.strip_prefix(BASMALA) {
        Some("") => "",
        // Word boundary required: the formula must not bleed into a
        // longer final word.
        Some(rest) if rest.starts_with(' ') => rest.trim_start_matches(' '),
        _ => normalized,
    }
}
