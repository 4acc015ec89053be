//! Character bigram Jaccard similarity.

use std::collections::HashSet;

use super::normalize_text;

/// Similarity in `[0, 1]` between two texts.
///
/// Both inputs are normalized first. Equal normalized strings score 1.0
/// (including two empty strings), one empty side scores 0.0, and otherwise
/// the score is the Jaccard index over the sets of overlapping two-character
/// windows. Two distinct strings too short to have any bigram score 1.0.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    similarity_of_normalized(&normalize_text(a), &normalize_text(b))
}

/// [`calculate_similarity`] for inputs already passed through
/// [`normalize_text`].
pub fn similarity_of_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let grams_a = bigrams(a);
    let grams_b = bigrams(b);
    if grams_a.is_empty() && grams_b.is_empty() {
        return 1.0;
    }

    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.len() + grams_b.len() - intersection;
    intersection as f64 / union as f64
}

fn bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
