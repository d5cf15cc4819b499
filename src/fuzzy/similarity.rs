// File: src/fuzzy/similarity.rs
//! String similarity for lenient quiz answers and duplicate detection.

/// Lowercases, keeps letters and digits (Arabizi uses 3, 5, 7, 9 as letters),
/// folds long vowels `ee`/`oo` and collapses doubled letters.
pub fn normalize_arabizi(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let folded = kept.replace("ee", "i").replace("oo", "u");

    let mut out = String::with_capacity(folded.len());
    let mut last = None;
    for c in folded.chars() {
        if Some(c) != last {
            out.push(c);
        }
        last = Some(c);
    }
    out
}

/// Classic edit distance over chars (insert, delete, substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// 1.0 for identical, 0.0 for nothing in common.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Compares normalised forms against `threshold`.
pub fn is_close_enough(answer: &str, expected: &str, threshold: f64) -> bool {
    let a = normalize_arabizi(answer);
    let e = normalize_arabizi(expected);
    if a.is_empty() || e.is_empty() {
        return false;
    }
    a == e || similarity(&a, &e) >= threshold
}
