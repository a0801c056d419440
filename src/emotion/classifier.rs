// Keyword-scoring emotion classifier
//
// Bag-of-keywords: plain substring counts, no word boundaries, case-sensitive.
// Short triggers match inside longer words (困 inside 困惑); that over-matching
// is kept on purpose.

use std::collections::BTreeMap;

use serde::Serialize;

use super::lexicon::keywords;
use super::EmotionCategory;

/// Per-category keyword hit counts for one piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationScore {
    counts: BTreeMap<EmotionCategory, usize>,
}

impl ClassificationScore {
    /// Hit count for a category (zero when nothing matched)
    pub fn get(&self, category: EmotionCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Category with the strictly greatest score
    ///
    /// Scans in declaration order and only replaces the current best on a
    /// strictly greater score, so the earliest category wins a tie. Returns
    /// None when every score is zero.
    pub fn dominant(&self) -> Option<EmotionCategory> {
        let mut best = None;
        let mut max_score = 0;

        for category in EmotionCategory::ALL {
            let score = self.get(category);
            if score > max_score {
                max_score = score;
                best = Some(category);
            }
        }

        best
    }

    /// Non-zero entries in declaration order
    pub fn nonzero(&self) -> Vec<(EmotionCategory, usize)> {
        EmotionCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, score)| *score > 0)
            .collect()
    }
}

/// Score text against every category's triggers
pub fn score(text: &str) -> ClassificationScore {
    let mut counts = BTreeMap::new();

    for category in EmotionCategory::ALL {
        let hits: usize = keywords(category)
            .iter()
            .map(|keyword| text.matches(keyword).count())
            .sum();
        counts.insert(category, hits);
    }

    ClassificationScore { counts }
}

/// Dominant emotion of the text, or None when there is no signal
pub fn classify(text: &str) -> Option<EmotionCategory> {
    if text.is_empty() {
        return None;
    }

    let scores = score(text);
    let dominant = scores.dominant();

    tracing::debug!(
        total = scores.total(),
        dominant = ?dominant,
        "Classified text"
    );

    dominant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_signal() {
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_no_keyword_has_no_signal() {
        assert_eq!(classify("今天吃了午饭"), None);
        assert_eq!(classify("hello world"), None);
    }

    #[test]
    fn test_happy_scenario() {
        let text = "我今天很开心，太好了";
        let scores = score(text);

        // 开心, 好 (inside 太好了), 太好了
        assert_eq!(scores.get(EmotionCategory::Happy), 3);
        assert_eq!(scores.total(), 3);
        assert_eq!(classify(text), Some(EmotionCategory::Happy));
    }

    #[test]
    fn test_single_trigger_per_category() {
        let cases = [
            ("哈哈", EmotionCategory::Happy),
            ("流泪", EmotionCategory::Sad),
            ("恼火", EmotionCategory::Angry),
            ("忐忑", EmotionCategory::Anxious),
            ("淡定", EmotionCategory::Calm),
            ("想念", EmotionCategory::Love),
            ("迷茫", EmotionCategory::Confused),
            ("澎湃", EmotionCategory::Excited),
            ("瞌睡", EmotionCategory::Tired),
            ("铭记", EmotionCategory::Grateful),
        ];

        for (text, expected) in cases {
            assert_eq!(score(text).total(), 1, "{} should hit exactly once", text);
            assert_eq!(classify(text), Some(expected), "text: {}", text);
        }
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        // 爱 is a trigger for both happy and love
        let scores = score("爱");
        assert_eq!(scores.get(EmotionCategory::Happy), 1);
        assert_eq!(scores.get(EmotionCategory::Love), 1);
        assert_eq!(classify("爱"), Some(EmotionCategory::Happy));

        // sad (伤心) is declared before anxious (担心)
        assert_eq!(classify("伤心又担心"), Some(EmotionCategory::Sad));
    }

    #[test]
    fn test_substring_over_matching_is_preserved() {
        // 困 (tired) also matches inside 困惑 (confused); confused is earlier
        let scores = score("困惑");
        assert_eq!(scores.get(EmotionCategory::Confused), 1);
        assert_eq!(scores.get(EmotionCategory::Tired), 1);
        assert_eq!(classify("困惑"), Some(EmotionCategory::Confused));
    }

    #[test]
    fn test_counts_repeated_occurrences() {
        let scores = score("累累累");
        assert_eq!(scores.get(EmotionCategory::Tired), 3);

        // non-overlapping scan: 哈哈哈 holds one 哈哈
        assert_eq!(score("哈哈哈").get(EmotionCategory::Happy), 1);
    }

    #[test]
    fn test_higher_score_beats_declaration_order() {
        assert_eq!(classify("有点开心但是累累累"), Some(EmotionCategory::Tired));
    }

    #[test]
    fn test_is_case_sensitive() {
        // the lexicon is Chinese; Latin text never scores
        assert_eq!(score("HAPPY happy").total(), 0);
    }
}
