//! Job title to academic major relevance.

/// Majors for known job titles, checked in order.
const JOB_MAJORS: &[(&str, &[&str])] = &[
    (
        "IT",
        &[
            "Computer Science",
            "Computational science and engineering",
            "Electrical and Computer Engineering",
            "Mathematics",
        ],
    ),
    (
        "Software Engineer",
        &[
            "Computer Science",
            "Computational science and engineering",
            "Electrical and Computer Engineering",
            "Mathematics",
        ],
    ),
    (
        "Data Scientist",
        &[
            "Computer Science",
            "Mathematics",
            "Economics",
            "Physics",
            "Computational science and engineering",
        ],
    ),
    (
        "Cybersecurity Analyst",
        &[
            "Computer Science",
            "Electrical and Computer Engineering",
            "Public Policy",
        ],
    ),
    (
        "Business Analyst",
        &[
            "Business Administration",
            "Information Systems Management",
            "Mathematics",
            "Economics",
        ],
    ),
    (
        "Project Manager",
        &[
            "Business Administration",
            "Industrial Engineering",
            "Systems Engineering",
        ],
    ),
    (
        "Machine Learning Engineer",
        &[
            "Computer Science",
            "Mathematics",
            "Electrical and Computer Engineering",
            "Computational science and engineering",
        ],
    ),
    (
        "Web Developer",
        &[
            "Computer Science",
            "Human-Computer Interaction",
            "Digital Media",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "Computer Science",
            "Information Technology",
            "Systems Engineering",
        ],
    ),
    (
        "Database Administrator",
        &[
            "Computer Science",
            "Information Systems",
            "Information Technology",
        ],
    ),
    (
        "Network Engineer",
        &[
            "Computer Science",
            "Electrical and Computer Engineering",
            "Information Technology",
        ],
    ),
    (
        "Cloud Architect",
        &[
            "Computer Science",
            "Information Technology",
            "Systems Engineering",
        ],
    ),
    (
        "Product Manager",
        &[
            "Business Administration",
            "Computer Science",
            "Industrial Design",
        ],
    ),
    (
        "UX/UI Designer",
        &[
            "Human-Computer Interaction",
            "Digital Media",
            "Psychology",
            "Industrial Design",
        ],
    ),
    (
        "Biomedical Engineer",
        &[
            "Biomedical Engineering",
            "Electrical and Computer Engineering",
            "Mechanical Engineering",
        ],
    ),
    (
        "Financial Analyst",
        &[
            "Finance",
            "Economics",
            "Mathematics",
            "Business Administration",
        ],
    ),
    (
        "Marketing Analyst",
        &["Marketing", "Business Administration", "Analytics"],
    ),
    (
        "Civil Engineer",
        &["Civil Engineering", "Environmental Engineering"],
    ),
    (
        "Mechanical Engineer",
        &["Mechanical Engineering", "Aerospace Engineering"],
    ),
    (
        "Electrical Engineer",
        &["Electrical and Computer Engineering", "Physics"],
    ),
];

/// Majors used when no job title entry matches.
const DEFAULT_MAJORS: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Business Administration",
    "Information Technology",
];

/// Subject prefix to major.
const PREFIX_MAJORS: &[(&str, &str)] = &[
    ("CS", "Computer Science"),
    ("CSE", "Computational science and engineering"),
    ("ECE", "Electrical and Computer Engineering"),
    ("MATH", "Mathematics"),
    ("ECON", "Economics"),
    ("PHYS", "Physics"),
    ("PUBP", "Public Policy"),
    ("MGT", "Business Administration"),
    ("ISYE", "Industrial Engineering"),
    ("SYE", "Systems Engineering"),
    ("HCI", "Human-Computer Interaction"),
    ("DM", "Digital Media"),
    ("IT", "Information Technology"),
    ("IS", "Information Systems"),
    ("BMED", "Biomedical Engineering"),
    ("ME", "Mechanical Engineering"),
    ("FIN", "Finance"),
    ("MKTG", "Marketing"),
    ("CE", "Civil Engineering"),
    ("ENVE", "Environmental Engineering"),
    ("AE", "Aerospace Engineering"),
    ("CX", "Computational Science"),
    ("CYBR", "Cybersecurity"),
    ("ID", "Industrial Design"),
    ("PSYC", "Psychology"),
    ("ACCT", "Accounting"),
    ("CP", "City Planning"),
];

/// Maps job titles to majors and course prefixes to majors.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorMapper;

impl MajorMapper {
    /// Majors relevant to a job title.
    ///
    /// Tries an exact (case-insensitive) title match first, then a partial
    /// match in either direction, then falls back to a broad default set.
    #[must_use]
    pub fn relevant_majors(job_title: &str) -> Vec<String> {
        let title = job_title.trim().to_lowercase();
        let to_owned = |majors: &[&str]| majors.iter().map(|m| (*m).to_string()).collect();

        if let Some((_, majors)) = JOB_MAJORS
            .iter()
            .find(|(job, _)| job.to_lowercase() == title)
        {
            return to_owned(majors);
        }

        if !title.is_empty()
            && let Some((_, majors)) = JOB_MAJORS.iter().find(|(job, _)| {
                let job = job.to_lowercase();
                title.contains(&job) || job.contains(&title)
            })
        {
            return to_owned(majors);
        }

        to_owned(DEFAULT_MAJORS)
    }

    /// Major offering courses with the given subject prefix.
    #[must_use]
    pub fn major_for_prefix(prefix: &str) -> Option<&'static str> {
        PREFIX_MAJORS
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, major)| *major)
    }

    /// Returns true if a course prefix belongs to one of the majors.
    #[must_use]
    pub fn is_relevant_prefix(prefix: &str, majors: &[String]) -> bool {
        Self::major_for_prefix(prefix).is_some_and(|major| majors.iter().any(|m| m == major))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_exact_match() {
        let majors = MajorMapper::relevant_majors("data scientist");
        assert_eq!(majors[0], "Computer Science");
        assert!(majors.contains(&"Physics".to_string()));
    }

    #[test]
    fn test_partial_match() {
        let majors = MajorMapper::relevant_majors("Senior Civil Engineer");
        assert_eq!(majors, vec!["Civil Engineering", "Environmental Engineering"]);
    }

    #[test]
    fn test_default_majors() {
        let majors = MajorMapper::relevant_majors("Chef");
        assert_eq!(majors.len(), DEFAULT_MAJORS.len());
        assert!(majors.contains(&"Information Technology".to_string()));
    }

    #[test_case("CS" => Some("Computer Science"))]
    #[test_case("ISYE" => Some("Industrial Engineering"))]
    #[test_case("HIST" => None)]
    fn test_major_for_prefix(prefix: &str) -> Option<&'static str> {
        MajorMapper::major_for_prefix(prefix)
    }

    #[test]
    fn test_is_relevant_prefix() {
        let majors = MajorMapper::relevant_majors("Data Scientist");
        assert!(MajorMapper::is_relevant_prefix("MATH", &majors));
        assert!(!MajorMapper::is_relevant_prefix("MGT", &majors));
        assert!(!MajorMapper::is_relevant_prefix("HIST", &majors));
    }
}
