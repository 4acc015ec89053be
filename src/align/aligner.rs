//! Three-tier greedy paragraph alignment.

use serde::{Deserialize, Serialize};

use crate::model::Paragraph;
use crate::text::{normalize_text, section_key, similarity_of_normalized};

/// Minimum similarity (exclusive) for a similarity-tier match.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// How a pair was formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Both paragraphs carry the same normalized section number
    Number,
    /// Best similarity above the threshold
    Similarity,
    /// One side is unmatched
    None,
}

/// One aligned unit: zero-or-one paragraph from each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMatch {
    /// Paragraph from the left (original) document
    pub left: Option<Paragraph>,

    /// Paragraph from the right (revised) document
    pub right: Option<Paragraph>,

    /// Similarity of the two texts; 0 when a side is missing
    pub similarity: f64,

    /// Tier that produced the pair
    pub match_type: MatchType,
}

impl ParagraphMatch {
    /// Page used to order pairs: the larger page index of the present sides.
    pub fn sort_page(&self) -> u32 {
        let left = self.left.as_ref().map_or(0, |p| p.page_idx);
        let right = self.right.as_ref().map_or(0, |p| p.page_idx);
        left.max(right)
    }

    /// Left text or the empty string.
    pub fn left_text(&self) -> &str {
        self.left.as_ref().map_or("", |p| p.text.as_str())
    }

    /// Right text or the empty string.
    pub fn right_text(&self) -> &str {
        self.right.as_ref().map_or("", |p| p.text.as_str())
    }
}

/// Greedy paragraph aligner.
///
/// Tier 1 pairs paragraphs by section number (first fit in scan order),
/// tier 2 pairs the remaining ones by best similarity strictly above the
/// threshold (earliest candidate wins ties), and tier 3 emits everything
/// left over as one-sided pairs. No tier revisits a matched paragraph.
/// Results are stably sorted by [`ParagraphMatch::sort_page`].
///
/// This is not an optimal sequence alignment: duplicated numbers or texts on
/// one side can take a match away from the true counterpart.
#[derive(Debug, Clone)]
pub struct ParagraphAligner {
    threshold: f64,
}

impl ParagraphAligner {
    /// Create an aligner with the default threshold.
    pub fn new() -> Self {
        Self {
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The configured similarity threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Align two paragraph sequences.
    pub fn align(&self, left: &[Paragraph], right: &[Paragraph]) -> Vec<ParagraphMatch> {
        let mut left_matched = vec![false; left.len()];
        let mut right_matched = vec![false; right.len()];
        let mut pairs = Vec::with_capacity(left.len().max(right.len()));

        let left_norm: Vec<String> = left.iter().map(|p| normalize_text(&p.text)).collect();
        let right_norm: Vec<String> = right.iter().map(|p| normalize_text(&p.text)).collect();

        // Tier 1: section numbers
        let right_keys: Vec<Option<String>> = right.iter().map(|p| section_key(&p.text)).collect();
        for (i, para) in left.iter().enumerate() {
            let Some(key) = section_key(&para.text) else {
                continue;
            };
            let found = (0..right.len())
                .find(|&j| !right_matched[j] && right_keys[j].as_deref() == Some(key.as_str()));
            if let Some(j) = found {
                left_matched[i] = true;
                right_matched[j] = true;
                pairs.push(ParagraphMatch {
                    left: Some(para.clone()),
                    right: Some(right[j].clone()),
                    similarity: similarity_of_normalized(&left_norm[i], &right_norm[j]),
                    match_type: MatchType::Number,
                });
            }
        }
        let number_matches = pairs.len();

        // Tier 2: best similarity
        for (i, para) in left.iter().enumerate() {
            if left_matched[i] {
                continue;
            }
            let mut best: Option<usize> = None;
            let mut best_score = self.threshold;
            for j in 0..right.len() {
                if right_matched[j] {
                    continue;
                }
                let score = similarity_of_normalized(&left_norm[i], &right_norm[j]);
                if score > best_score {
                    best_score = score;
                    best = Some(j);
                }
            }
            if let Some(j) = best {
                left_matched[i] = true;
                right_matched[j] = true;
                pairs.push(ParagraphMatch {
                    left: Some(para.clone()),
                    right: Some(right[j].clone()),
                    similarity: best_score,
                    match_type: MatchType::Similarity,
                });
            }
        }
        let similarity_matches = pairs.len() - number_matches;

        // Tier 3: leftovers
        for (para, _) in left.iter().zip(&left_matched).filter(|(_, m)| !**m) {
            pairs.push(ParagraphMatch {
                left: Some(para.clone()),
                right: None,
                similarity: 0.0,
                match_type: MatchType::None,
            });
        }
        for (para, _) in right.iter().zip(&right_matched).filter(|(_, m)| !**m) {
            pairs.push(ParagraphMatch {
                left: None,
                right: Some(para.clone()),
                similarity: 0.0,
                match_type: MatchType::None,
            });
        }

        log::debug!(
            "Aligned {} x {} paragraphs: {} by number, {} by similarity, {} unmatched",
            left.len(),
            right.len(),
            number_matches,
            similarity_matches,
            pairs.len() - number_matches - similarity_matches
        );

        // sort_by_key is stable, so tier order survives within a page
        pairs.sort_by_key(ParagraphMatch::sort_page);
        pairs
    }
}

impl Default for ParagraphAligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Align two paragraph sequences with the default threshold.
pub fn align_paragraphs(left: &[Paragraph], right: &[Paragraph]) -> Vec<ParagraphMatch> {
    ParagraphAligner::new().align(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str, page: u32) -> Paragraph {
        Paragraph::new(text, page)
    }

    #[test]
    fn test_number_tier_first_fit() {
        let left = vec![p("1. 甲方应于30日内付款。", 0)];
        let right = vec![p("2. 其他", 0), p("1. 甲方应于60日内付款。", 0)];

        let pairs = align_paragraphs(&left, &right);
        assert_eq!(pairs[0].match_type, MatchType::Number);
        assert_eq!(pairs[0].right_text(), "1. 甲方应于60日内付款。");
        assert!(pairs[0].similarity < 1.0);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].match_type, MatchType::None);
        assert_eq!(pairs[1].right_text(), "2. 其他");
    }

    #[test]
    fn test_number_tier_matches_chinese_and_arabic() {
        let left = vec![p("第三条 违约责任", 0)];
        let right = vec![p("3. 违约责任", 0)];
        let pairs = align_paragraphs(&left, &right);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].match_type, MatchType::Number);
    }

    #[test]
    fn test_duplicate_numbers_take_first_unmatched() {
        let left = vec![p("1. a", 0), p("1. b", 0)];
        let right = vec![p("1. b", 0), p("1. a", 0)];
        let pairs = align_paragraphs(&left, &right);
        // First-fit pairs positionally, not by content
        assert_eq!(pairs[0].left_text(), "1. a");
        assert_eq!(pairs[0].right_text(), "1. b");
        assert_eq!(pairs[1].left_text(), "1. b");
        assert_eq!(pairs[1].right_text(), "1. a");
    }

    #[test]
    fn test_similarity_tier_picks_best() {
        let left = vec![p("甲方应当按照合同约定的时间支付全部款项给乙方", 0)];
        let right = vec![
            p("完全无关的一段文字内容", 0),
            p("甲方应当按照合同约定的时间支付全部款项给乙方。", 0),
        ];
        let pairs = align_paragraphs(&left, &right);
        assert_eq!(pairs[0].match_type, MatchType::Similarity);
        assert!(pairs[0].similarity > SIMILARITY_THRESHOLD);
        assert!(pairs[0].similarity < 1.0);
        assert_eq!(pairs[0].right_text(), right[1].text);
    }

    #[test]
    fn test_similarity_tie_prefers_lowest_index() {
        let left = vec![p("abcd", 0)];
        // Both score 0.5 against the left paragraph
        let right = vec![p("abce", 3), p("abcf", 5)];
        let pairs = ParagraphAligner::new().with_threshold(0.4).align(&left, &right);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].match_type, MatchType::Similarity);
        assert_eq!(pairs[0].right.as_ref().map(|r| r.page_idx), Some(3));
        assert_eq!(pairs[0].right_text(), "abce");
        assert_eq!(pairs[1].match_type, MatchType::None);
        assert_eq!(pairs[1].right_text(), "abcf");
    }

    #[test]
    fn test_score_equal_to_threshold_does_not_match() {
        let left = vec![p("abcd", 0)];
        let right = vec![p("abce", 0)];
        let pairs = ParagraphAligner::new().with_threshold(0.5).align(&left, &right);

        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|pair| pair.match_type == MatchType::None));
        assert!(pairs[0].right.is_none());
        assert!(pairs[1].left.is_none());
    }

    #[test]
    fn test_below_threshold_becomes_leftovers() {
        let left = vec![p("完全不同的内容甲", 0)];
        let right = vec![p("另外一个段落乙丙", 0)];
        let pairs = align_paragraphs(&left, &right);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|pair| pair.match_type == MatchType::None));
        assert!(pairs.iter().all(|pair| pair.similarity == 0.0));
        assert!(pairs[0].right.is_none());
        assert!(pairs[1].left.is_none());
    }

    #[test]
    fn test_custom_threshold() {
        let left = vec![p("abcd", 0)];
        let right = vec![p("abce", 0)];
        // {ab, bc, cd} vs {ab, bc, ce}: 2/4
        let strict = align_paragraphs(&left, &right);
        assert_eq!(strict.len(), 2);

        let loose = ParagraphAligner::new().with_threshold(0.4).align(&left, &right);
        assert_eq!(loose.len(), 1);
        assert_eq!(loose[0].similarity, 0.5);
    }

    #[test]
    fn test_stable_sort_by_max_page() {
        let left = vec![p("1. 一", 2), p("独有的左侧段落内容", 0)];
        let right = vec![p("1. 一", 0), p("独有的右侧新增内容", 1)];
        let pairs = align_paragraphs(&left, &right);

        let pages: Vec<u32> = pairs.iter().map(ParagraphMatch::sort_page).collect();
        assert_eq!(pages, vec![0, 1, 2]);
        assert_eq!(pairs[0].left_text(), "独有的左侧段落内容");
        assert_eq!(pairs[2].match_type, MatchType::Number);
        // The real page of each side is kept
        assert_eq!(pairs[2].right.as_ref().map(|r| r.page_idx), Some(0));
    }

    #[test]
    fn test_every_paragraph_appears_once() {
        let left = vec![p("1. a", 0), p("x y z", 0), p("2. b", 1)];
        let right = vec![p("2. b", 0), p("new", 1)];
        let pairs = align_paragraphs(&left, &right);

        let lefts = pairs.iter().filter(|x| x.left.is_some()).count();
        let rights = pairs.iter().filter(|x| x.right.is_some()).count();
        assert_eq!(lefts, left.len());
        assert_eq!(rights, right.len());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(align_paragraphs(&[], &[]).is_empty());
        let pairs = align_paragraphs(&[p("a", 0)], &[]);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].right.is_none());
    }
}
