use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Levenshtein edit distance using the two-row O(min(m,n)) space algorithm.
///
/// Operates on Unicode scalar values, so `"é"` and `"e"` are one edit apart
/// rather than two.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Keep the shorter string in the inner loop to minimise allocation.
    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for j in 1..=n {
        curr[0] = j;
        for i in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[i] = (prev[i] + 1).min(curr[i - 1] + 1).min(prev[i - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

/// Folds text for fuzzy comparison: lower-case, accents removed, punctuation
/// removed, outer whitespace trimmed. Inner whitespace is kept as-is.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Edit-distance similarity of two texts after [`normalize`], in `[0.0, 1.0]`.
///
/// Two texts that are both empty after normalization are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&a, &b);
    (max_len - distance) as f64 / max_len as f64
}

/// Concatenates every run of decimal digits in `text`, in order.
///
/// `"INV-2024/00123"` becomes `"202400123"`; text without digits yields `""`.
pub fn extract_digit_run(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
