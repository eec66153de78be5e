//! Tag CLI command.

use crate::models::TagResult;
use crate::tagging::SyllabusTagger;
use crate::{Error, Result};
use std::fmt::Write;

/// Tag command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagCommand {
    json: bool,
    reasoning: bool,
}

impl TagCommand {
    /// Creates a tag command with plain-text output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            json: false,
            reasoning: false,
        }
    }

    /// Emits JSON instead of text.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Emits the full reasoning payload instead of the tag decisions.
    #[must_use]
    pub const fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.reasoning = reasoning;
        self
    }

    /// Tags a syllabus and formats the result.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn run(&self, tagger: &SyllabusTagger, text: &str) -> Result<String> {
        if self.reasoning {
            return to_json(&tagger.get_tag_reasoning(text));
        }

        let tags = tagger.generate_tags(text);
        if self.json {
            return to_json(&tags);
        }

        let tagged: Vec<&str> = tags.tagged().iter().map(|c| c.as_str()).collect();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Tags: {}",
            if tagged.is_empty() {
                "(none)".to_string()
            } else {
                tagged.join(", ")
            }
        );
        for result in tags.iter() {
            out.push_str(&format_line(result));
        }
        Ok(out)
    }
}

fn format_line(result: &TagResult) -> String {
    let mut line = format!(
        "  {:<20} {}",
        result.category.as_str(),
        if result.is_tagged { "yes" } else { "no" }
    );
    if let Some(count) = result.keyword_count {
        let _ = write!(line, "  keywords={count}");
    }
    if let Some(grade) = result.grade_percentage {
        let _ = write!(line, "  grade={grade:.1}%");
    }
    if let Some(strength) = result.attendance_strength {
        let _ = write!(line, "  strength={strength:.2}");
    }
    line.push('\n');
    line
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_tags".to_string(),
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYLLABUS: &str = "Midterm Exam 30%, Final Project 25%, Homework 20%";

    #[test]
    fn test_text_output() {
        let out = TagCommand::new()
            .run(&SyllabusTagger::with_defaults(), SYLLABUS)
            .unwrap();
        assert!(out.starts_with("Tags: "));
        assert!(out.contains("exam_heavy"));
        assert!(out.contains("grade=30.0%"));
    }

    #[test]
    fn test_blank_text_has_no_tags() {
        let out = TagCommand::new()
            .run(&SyllabusTagger::with_defaults(), "  ")
            .unwrap();
        assert!(out.starts_with("Tags: (none)\n"));
    }

    #[test]
    fn test_json_output() {
        let out = TagCommand::new()
            .with_json(true)
            .run(&SyllabusTagger::with_defaults(), SYLLABUS)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["exam_heavy"]["is_tagged"], true);
        assert_eq!(value["exam_heavy"]["db_id"], 1);
    }

    #[test]
    fn test_reasoning_output() {
        let out = TagCommand::new()
            .with_reasoning(true)
            .run(&SyllabusTagger::with_defaults(), SYLLABUS)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["exam_heavy"]["grade_threshold"], 30.0);
        assert_eq!(value["attendance_required"]["keyword_threshold"], 3);
    }
}
