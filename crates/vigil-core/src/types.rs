use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// A pull request queued for review.
///
/// Matches the JSON emitted by `gh pr list --json number,title,author,url`.
/// Records are an ordered, read-only input; they are never mutated.
///
/// # Examples
///
/// ```
/// use vigil_core::PullRequestRecord;
///
/// let json = r#"{"number":7,"title":"Fix bug","author":{"login":"alice"},"url":"http://x/7"}"#;
/// let pr: PullRequestRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(pr.number, 7);
/// assert_eq!(pr.author.login, "alice");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRecord {
    /// PR number, unique within the repository.
    pub number: u64,
    /// PR title.
    pub title: String,
    /// PR author.
    pub author: Author,
    /// Web URL of the PR.
    pub url: String,
}

/// The author of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// GitHub login name.
    pub login: String,
}

impl PullRequestRecord {
    /// Load an ordered list of records from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::FileNotFound`] if `path` does not exist,
    /// [`VigilError::Io`] if it cannot be read, or
    /// [`VigilError::Serialization`] if the content is not a valid record array.
    pub fn load_all(path: &Path) -> Result<Vec<Self>, VigilError> {
        if !path.exists() {
            return Err(VigilError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let records: Vec<Self> = serde_json::from_str(&content)?;
        Ok(records)
    }
}

/// The review produced for a single pull request.
///
/// Created once per successfully reviewed PR and immutable afterwards; held
/// in memory only for the duration of a run.
///
/// # Examples
///
/// ```
/// use vigil_core::ReviewResult;
///
/// let result = ReviewResult {
///     pr_number: 7,
///     pr_title: "Fix bug".into(),
///     pr_author: "alice".into(),
///     pr_url: "http://x/7".into(),
///     review: "LGTM".into(),
/// };
/// assert_eq!(result.pr_number, 7);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// Number of the reviewed PR.
    pub pr_number: u64,
    /// Title of the reviewed PR.
    pub pr_title: String,
    /// Login of the PR author.
    pub pr_author: String,
    /// Web URL of the PR.
    pub pr_url: String,
    /// Model-generated review text, embedded in the report verbatim.
    pub review: String,
}
