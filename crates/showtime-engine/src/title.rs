//! Movie title normalization and fuzzy matching.
//!
//! Theater chains spell the same title differently: full-width vs half-width
//! letters, with or without a subtitle separator, hiragana vs katakana. Both
//! sides of a comparison are folded to a canonical form and then compared by
//! substring containment in either direction, so `"ズートピア2"` matches
//! `"ズートピア２ (字幕)"` and an abbreviated query matches the full title.

/// Offset between a full-width Latin letter/digit and its ASCII counterpart.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Offset between a hiragana code point and the matching katakana.
const HIRAGANA_TO_KATAKANA: u32 = 0x60;

/// Characters dropped during normalization (whitespace is dropped separately).
const STRIPPED: &[char] = &[
    '・', '-', '/', ':', '：', '〜', '～', '「', '」', '『', '』', '【', '】', '（', '）', '(',
    ')', '!', '！', '?', '？', '、', ',', '。', '.',
];

/// Fold a title into its canonical comparison form.
///
/// Steps, in order:
/// 1. lower-case
/// 2. full-width `Ａ-Ｚ ａ-ｚ ０-９` to ASCII
/// 3. drop whitespace and separator/bracket punctuation
/// 4. hiragana to katakana
///
/// The result is idempotent: normalizing a normalized title is a no-op.
///
/// # Examples
///
/// ```
/// use showtime_engine::normalize_title;
///
/// assert_eq!(normalize_title("Ｍｏｖｉｅ：Ａ"), "moviea");
/// assert_eq!(normalize_title("すずめの戸締まり"), normalize_title("スズメノ戸締マリ"));
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(fold_fullwidth)
        .filter(|c| !c.is_whitespace() && !STRIPPED.contains(c))
        .map(fold_hiragana)
        .collect()
}

fn fold_fullwidth(c: char) -> char {
    match c {
        'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '０'..='９' => {
            char::from_u32(c as u32 - FULLWIDTH_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

fn fold_hiragana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + HIRAGANA_TO_KATAKANA).unwrap_or(c),
        _ => c,
    }
}

/// Fuzzy title comparison.
///
/// Returns `true` when either normalized title contains the other. This is
/// intentionally permissive: a short query can match several distinct movies
/// and callers treat every match as a candidate.
///
/// An empty (or all-punctuation) title normalizes to `""`, which every title
/// contains.
pub fn match_title(query: &str, movie_title: &str) -> bool {
    let query = normalize_title(query);
    let movie = normalize_title(movie_title);

    movie.contains(&query) || query.contains(&movie)
}
