//! Course catalog and MOOC datasets.

mod cache;
mod loader;

pub use cache::CatalogCache;
pub use loader::{LoadReport, load_courses, load_moocs, read_courses, read_moocs};

use crate::Result;
use crate::config::DataConfig;
use crate::models::{CourseRecord, MoocRecord};

/// Both searchable datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Catalog courses.
    pub courses: Vec<CourseRecord>,
    /// Online courses.
    pub moocs: Vec<MoocRecord>,
}

impl Catalog {
    /// Creates a catalog from already-loaded records.
    #[must_use]
    pub const fn new(courses: Vec<CourseRecord>, moocs: Vec<MoocRecord>) -> Self {
        Self { courses, moocs }
    }

    /// Loads the datasets named in the data configuration.
    ///
    /// A dataset with no configured path, or whose file does not exist, is
    /// left empty with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn load(config: &DataConfig) -> Result<(Self, Vec<LoadReport>)> {
        let mut catalog = Self::default();
        let mut reports = Vec::new();

        match config.courses_csv.as_deref() {
            Some(path) if path.exists() => {
                let (courses, report) = load_courses(path)?;
                catalog.courses = courses;
                reports.push(report);
            },
            Some(path) => {
                tracing::warn!(path = %path.display(), "Course catalog file does not exist");
            },
            None => tracing::debug!("No course catalog configured"),
        }

        match config.moocs_csv.as_deref() {
            Some(path) if path.exists() => {
                let (moocs, report) = load_moocs(path)?;
                catalog.moocs = moocs;
                reports.push(report);
            },
            Some(path) => {
                tracing::warn!(path = %path.display(), "MOOC file does not exist");
            },
            None => tracing::debug!("No MOOC list configured"),
        }

        tracing::info!(
            courses = catalog.courses.len(),
            moocs = catalog.moocs.len(),
            "Loaded catalog"
        );
        Ok((catalog, reports))
    }

    /// Returns true if both datasets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.moocs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_config() {
        let dir = TempDir::new().unwrap();
        let courses = dir.path().join("courses.csv");
        fs::write(
            &courses,
            "Course ID;Course Name;Description\nCS 1301;Intro;Python\n",
        )
        .unwrap();

        let config = DataConfig {
            courses_csv: Some(courses),
            moocs_csv: Some(dir.path().join("missing.csv")),
            ..DataConfig::default()
        };
        let (catalog, reports) = Catalog::load(&config).unwrap();

        assert_eq!(catalog.courses.len(), 1);
        assert!(catalog.moocs.is_empty());
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn test_load_unconfigured_is_empty() {
        let (catalog, reports) = Catalog::load(&DataConfig::default()).unwrap();
        assert!(catalog.is_empty());
        assert!(reports.is_empty());
    }
}
