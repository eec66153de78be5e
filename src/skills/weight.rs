//! Skill importance weighting.

use crate::models::{MIN_SKILL_WEIGHT, WeightedSkill};

/// Bonus when the skill appears in the job title.
const TITLE_BONUS: f64 = 0.5;

/// Bonus per description occurrence beyond the first.
const REPEAT_BONUS: f64 = 0.1;

/// Cap on the repeat bonus.
const MAX_REPEAT_BONUS: f64 = 0.3;

/// Bonus when the skill appears in the first line of the description.
const LEAD_BONUS: f64 = 0.2;

/// Weights skills by where and how often they appear in a job posting.
///
/// Returns skills sorted by descending weight; ties keep input order.
#[must_use]
pub fn weight_skills<S: AsRef<str>>(
    skills: &[S],
    job_title: &str,
    job_description: &str,
) -> Vec<WeightedSkill> {
    let title = job_title.to_lowercase();
    let description = job_description.to_lowercase();
    let lead = description.split('\n').next().unwrap_or_default();

    let mut weighted: Vec<WeightedSkill> = skills
        .iter()
        .map(|skill| {
            let name = skill.as_ref().to_lowercase();
            let mut weight = MIN_SKILL_WEIGHT;
            if name.is_empty() {
                return WeightedSkill::new(name, weight);
            }

            if title.contains(&name) {
                weight += TITLE_BONUS;
            }

            let occurrences = description.matches(name.as_str()).count();
            if occurrences > 1 {
                #[allow(clippy::cast_precision_loss)]
                let extra = (occurrences - 1) as f64 * REPEAT_BONUS;
                weight += extra.min(MAX_REPEAT_BONUS);
            }

            if lead.contains(&name) {
                weight += LEAD_BONUS;
            }

            WeightedSkill::new(name, weight)
        })
        .collect();

    weighted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    weighted
}
