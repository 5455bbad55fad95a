//! Keyword sentiment classifier

use crate::types::Sentiment;

/// A single classification rule: the label to assign and the keywords that
/// trigger it. Keywords are matched as substrings of the lower-cased input,
/// so they should be lowercase themselves.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub label: Sentiment,
    pub keywords: Vec<String>,
}

impl ClassifierRule {
    pub fn new(label: Sentiment, keywords: &[&str]) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Substring classifier over an ordered rule list
///
/// Rules are evaluated in order and the first rule with any matching keyword
/// wins; text matching no rule is `neutral`. Any input yields a label,
/// including the empty string.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    rules: Vec<ClassifierRule>,
}

impl SentimentClassifier {
    pub fn new(rules: Vec<ClassifierRule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        let text = text.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| text.contains(kw.as_str())) {
                return rule.label;
            }
        }
        Sentiment::Neutral
    }
}

impl Default for SentimentClassifier {
    /// The stock rule set. Positive keywords are checked before negative
    /// ones, so text containing both classifies as positive.
    fn default() -> Self {
        Self::new(vec![
            ClassifierRule::new(
                Sentiment::Positive,
                &["хорош", "люблю", "отлично", "супер", "прекрасно"],
            ),
            ClassifierRule::new(
                Sentiment::Negative,
                &["плохо", "ненавиж", "ужас", "баг", "тормозит"],
            ),
        ])
    }
}
