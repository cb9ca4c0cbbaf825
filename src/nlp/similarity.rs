//! Approximate string similarity
//!
//! Scores are on a 0-100 scale. Extractor thresholds are expressed on that
//! scale, so any implementation can be swapped in behind [`Similarity`].

/// Capability: how alike two strings are, 0 (unrelated) to 100 (identical)
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Partial ratio: best indel ratio of the shorter string against every
/// equal-length window of the longer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Similarity for PartialRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
        if shorter.is_empty() {
            return 0.0;
        }

        let mut best = 0.0_f64;
        for window in longer.windows(shorter.len()) {
            let score = indel_ratio(shorter, window);
            if score > best {
                best = score;
                if best >= 100.0 {
                    break;
                }
            }
        }
        best
    }
}

/// `2 * LCS / (|a| + |b|)`, scaled to 0-100
pub fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = longest_common_subsequence(a, b);
    (2 * lcs) as f64 / total as f64 * 100.0
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
