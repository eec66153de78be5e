//! Attendance policy strength scoring.

use super::patterns::{
    ABSENCE_LIMIT, ATTENDANCE_GRADE_WEIGHT, ATTENDANCE_IN_GRADING, ATTENDANCE_POLICY_SECTION,
    OUTCOME_IMPACT,
};
use super::text::split_sentences;
use crate::config::{AttendancePhrases, TaggingConfig};

const GRADE_WEIGHT_BONUS: f64 = 0.6;
const STRONG_BONUS: f64 = 0.4;
const MODERATE_BONUS: f64 = 0.2;
const WEAK_BONUS: f64 = 0.1;
const ABSENCE_LIMIT_BONUS: f64 = 0.4;
const OUTCOME_IMPACT_BONUS: f64 = 0.3;
const EXTRA_PHRASE_BONUS: f64 = 0.15;

/// Scores how strongly a syllabus enforces attendance, in `[0, 1]`.
///
/// Bonuses are additive and only clamped at the end, so one sentence can
/// contribute more than 1.0 on its own.
#[derive(Debug, Clone)]
pub struct AttendancePolicyScorer {
    keywords: Vec<String>,
    phrases: AttendancePhrases,
}

impl AttendancePolicyScorer {
    /// Creates a scorer from the tagging configuration.
    #[must_use]
    pub fn new(config: &TaggingConfig) -> Self {
        Self {
            keywords: config
                .attendance
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            phrases: config.attendance_phrases.clone(),
        }
    }

    /// Scores the attendance policy of a syllabus.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let signals = self.gather_signals(text);
        if signals.is_empty() {
            return 0.0;
        }

        let mut strength = 0.0;
        if ATTENDANCE_GRADE_WEIGHT.is_match(text) {
            strength += GRADE_WEIGHT_BONUS;
        }

        for signal in &signals {
            strength += self.sentence_strength(&signal.to_lowercase());
        }

        let lower = text.to_lowercase();
        let extras = self
            .phrases
            .extra
            .iter()
            .filter(|phrase| lower.contains(phrase.as_str()))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let extra_points = extras as f64 * EXTRA_PHRASE_BONUS;

        (strength + extra_points).clamp(0.0, 1.0)
    }

    /// Collects the grading excerpt, the policy section and every sentence
    /// that mentions an attendance keyword.
    fn gather_signals<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut signals = Vec::new();

        if let Some(m) = ATTENDANCE_IN_GRADING.find(text) {
            signals.push(m.as_str());
        }
        if let Some(m) = ATTENDANCE_POLICY_SECTION.find(text) {
            signals.push(m.as_str());
        }
        for sentence in split_sentences(text) {
            let lower = sentence.to_lowercase();
            if self.keywords.iter().any(|kw| lower.contains(kw.as_str())) {
                signals.push(sentence);
            }
        }

        signals
    }

    /// Strength contributed by a single lowercased signal.
    fn sentence_strength(&self, sentence: &str) -> f64 {
        let contains_any = |list: &[String]| list.iter().any(|p| sentence.contains(p.as_str()));

        let mut strength = if contains_any(&self.phrases.strong) {
            STRONG_BONUS
        } else if contains_any(&self.phrases.moderate) {
            MODERATE_BONUS
        } else if contains_any(&self.phrases.weak) {
            WEAK_BONUS
        } else {
            0.0
        };

        if ABSENCE_LIMIT.is_match(sentence) {
            strength += ABSENCE_LIMIT_BONUS;
        }
        if OUTCOME_IMPACT.is_match(sentence) {
            strength += OUTCOME_IMPACT_BONUS;
        }
        strength
    }
}
