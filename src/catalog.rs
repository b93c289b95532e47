//! Job catalog — the static list of postings loaded from JSON at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;

/// A single job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub location: String,
    pub url: String,
    pub description: String,
    /// One-line summary for carousel bubbles. Older catalogs omit it.
    #[serde(default)]
    pub short_description: String,
}

impl JobPosting {
    /// Short description, falling back to the full description when empty.
    pub fn summary(&self) -> &str {
        if self.short_description.trim().is_empty() {
            &self.description
        } else {
            &self.short_description
        }
    }
}

/// Read-only, position-indexed list of job postings.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }

    /// Load the catalog from a JSON array on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let jobs: Vec<JobPosting> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), count = jobs.len(), "Job catalog loaded");
        Ok(Self { jobs })
    }

    pub fn get(&self, index: usize) -> Option<&JobPosting> {
        self.jobs.get(index)
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use super::*;

    /// Three postings used across the crate's tests.
    pub(crate) fn sample_catalog() -> JobCatalog {
        JobCatalog::new(vec![
            JobPosting {
                title: "Backend Engineer".into(),
                location: "Tokyo".into(),
                url: "https://jobs.example.com/backend".into(),
                description: "Build and run our order pipeline.".into(),
                short_description: "Rust services".into(),
            },
            JobPosting {
                title: "Data Analyst".into(),
                location: "Osaka".into(),
                url: "https://jobs.example.com/data".into(),
                description: "Turn sales data into weekly reports.".into(),
                short_description: String::new(),
            },
            JobPosting {
                title: "Support Lead".into(),
                location: "Remote".into(),
                url: "https://jobs.example.com/support".into(),
                description: "Run the customer support rota.".into(),
                short_description: "People & tooling".into(),
            },
        ])
    }

    #[test]
    fn load_reads_camel_case_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Chef", "location": "Kyoto", "url": "https://x/chef",
                  "description": "Cook things.", "shortDescription": "Kitchen"}},
                {{"title": "Driver", "location": "Nagoya", "url": "https://x/driver",
                  "description": "Drive things."}}
            ]"#
        )
        .unwrap();

        let catalog = JobCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().short_description, "Kitchen");
        assert_eq!(catalog.get(1).unwrap().short_description, "");
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = JobCatalog::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "not an array"}}"#).unwrap();
        let err = JobCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn summary_falls_back_to_description() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get(0).unwrap().summary(), "Rust services");
        assert_eq!(
            catalog.get(1).unwrap().summary(),
            "Turn sales data into weekly reports."
        );
    }
}
