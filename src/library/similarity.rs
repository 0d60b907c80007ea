//! Sequence similarity for fuzzy name matching
//!
//! Implements the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common substring, recurse on the unmatched pieces to its left and right,
//! and score `2 * matched / (len(a) + len(b))`. Among equally long common
//! substrings the one starting earliest in `a` (then in `b`) is taken, which
//! keeps the score deterministic.
//!
//! That choice also makes the ratio order-dependent: `ratio(a, b)` and
//! `ratio(b, a)` can differ. Resolution always passes the library key as `a`
//! and the requested label as `b`.

use std::collections::HashMap;

/// Similarity of two strings in `0.0..=1.0`; `1.0` when both are empty.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Total length of the matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &positions, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }
    matched
}

/// Longest common substring of `a[a_lo..a_hi]` and `b[b_lo..b_hi]`, as
/// `(start in a, start in b, length)`.
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        for &j in positions.get(c).map(Vec::as_slice).unwrap_or_default() {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }
            let size = if j > 0 {
                run_ending_at.get(&(j - 1)).copied().unwrap_or(0) + 1
            } else {
                1
            };
            next.insert(j, size);
            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }
        run_ending_at = next;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(ratio("cover-page", "cover-page"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // Reference values from the gestalt pattern matching algorithm
        assert!(close(ratio("exec-summary", "executive-summary"), 0.8276));
        assert!(close(ratio("coverpage", "cover-page"), 0.9474));
        assert!(close(ratio("apendix", "appendix"), 0.9333));
        assert!(close(ratio("market", "market-analysis"), 0.5714));
        assert!(close(ratio("summary", "executive-summary"), 0.5833));
        assert!(close(ratio("nonexistent-section", "executive-summary"), 0.3333));
    }

    #[test]
    fn test_exact_boundary_value() {
        // 3 matched characters out of 10 in total
        assert_eq!(ratio("abcde", "abcxy"), 0.6);
        assert_eq!(ratio("abcde", "abxyz"), 0.4);
    }

    #[test]
    fn test_argument_order_matters() {
        assert!(close(ratio("a-baab", "ababbbab"), 10.0 / 14.0));
        assert!(close(ratio("ababbbab", "a-baab"), 4.0 / 14.0));
        assert!(close(ratio("cover-page", "nonexistent-section"), 4.0 / 29.0));
        assert!(close(ratio("nonexistent-section", "cover-page"), 6.0 / 29.0));
    }

    #[test]
    fn test_non_ascii_characters() {
        assert!(close(ratio("résumé", "resume"), 2.0 * 4.0 / 12.0));
    }
}
