//! Catalog records: university courses and MOOCs.

use serde::{Deserialize, Serialize};

/// Which dataset a record or result comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// University catalog courses.
    Courses,
    /// Online courses.
    Moocs,
}

impl DatasetKind {
    /// Every dataset, courses first.
    pub const ALL: [Self; 2] = [Self::Courses, Self::Moocs];

    /// Returns the dataset name used for index files and metric labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Moocs => "moocs",
        }
    }

    /// Number of records embedded per index batch.
    #[must_use]
    pub const fn index_batch_size(&self) -> usize {
        match self {
            Self::Courses => 500,
            Self::Moocs => 250,
        }
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "courses" | "course" | "catalog" => Ok(Self::Courses),
            "moocs" | "mooc" => Ok(Self::Moocs),
            other => Err(crate::Error::InvalidInput(format!("unknown dataset: {other}"))),
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Academic level inferred from a course number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseLevel {
    /// Course number starts with a digit below 6.
    Undergraduate,
    /// Course number starts with 6 or higher.
    Graduate,
    /// No parseable course number (always the case for MOOCs).
    #[default]
    Unknown,
}

impl CourseLevel {
    /// Infers the level from the first digit of a course number.
    #[must_use]
    pub fn from_course_number(number: &str) -> Self {
        match number.chars().next().and_then(|c| c.to_digit(10)) {
            Some(digit) if digit >= 6 => Self::Graduate,
            Some(_) => Self::Undergraduate,
            None => Self::Unknown,
        }
    }

    /// Returns the level as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undergraduate => "Undergraduate",
            Self::Graduate => "Graduate",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A university catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Full course identifier, e.g. `CS 1331`.
    pub course_id: String,
    /// Subject prefix, e.g. `CS`.
    pub subject: String,
    /// Course number, e.g. `1331`.
    pub number: String,
    /// Course title.
    pub name: String,
    /// Catalog description.
    pub description: String,
}

impl CourseRecord {
    /// Creates a course record, splitting the identifier into subject and number.
    #[must_use]
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let course_id = course_id.into().trim().to_string();
        let mut parts = course_id.split_whitespace();
        let subject = parts.next().unwrap_or_default().to_string();
        let number = parts.next().unwrap_or_default().to_string();
        Self {
            course_id,
            subject,
            number,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An online course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoocRecord {
    /// Course name, which doubles as its key.
    pub name: String,
    /// Course summary.
    pub about: String,
    /// Course URL.
    pub link: String,
}

impl MoocRecord {
    /// Creates a MOOC record.
    #[must_use]
    pub fn new(name: impl Into<String>, about: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            link: link.into(),
        }
    }
}

/// Common view over searchable catalog records.
///
/// Search, indexing and filtering are generic over this trait so that the
/// same scoring code handles both datasets.
pub trait CatalogEntry {
    /// Dataset this record type belongs to.
    const KIND: DatasetKind;

    /// Unique key used for fusion and index ids.
    fn key(&self) -> &str;

    /// Title field (course name or MOOC name).
    fn title(&self) -> &str;

    /// Body text field (description or about).
    fn body(&self) -> &str;

    /// Subject prefix for catalog courses.
    fn subject_prefix(&self) -> Option<&str> {
        None
    }

    /// Academic level.
    fn level(&self) -> CourseLevel {
        CourseLevel::Unknown
    }

    /// Link for online courses.
    fn link(&self) -> Option<&str> {
        None
    }
}

impl CatalogEntry for CourseRecord {
    const KIND: DatasetKind = DatasetKind::Courses;

    fn key(&self) -> &str {
        &self.course_id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn subject_prefix(&self) -> Option<&str> {
        (!self.subject.is_empty()).then_some(self.subject.as_str())
    }

    fn level(&self) -> CourseLevel {
        CourseLevel::from_course_number(&self.number)
    }
}

impl CatalogEntry for MoocRecord {
    const KIND: DatasetKind = DatasetKind::Moocs;

    fn key(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &str {
        &self.about
    }

    fn link(&self) -> Option<&str> {
        (!self.link.is_empty()).then_some(self.link.as_str())
    }
}
