use std::process::Command;

use vigil_core::VigilError;

/// Source of unified diff text for a pull request.
///
/// The production implementation shells out to the GitHub CLI; tests
/// substitute a stub.
pub trait DiffSource {
    /// Return the unified diff for `pr_number`.
    ///
    /// An empty string means the PR has no textual diff; it is not an error.
    fn fetch(&self, pr_number: u64) -> Result<String, VigilError>;
}

/// Fetches PR diffs by invoking `gh pr diff <number>`.
///
/// The invocation is synchronous and blocks until the CLI exits. Output is
/// returned untruncated; the caller applies any size cutoff.
///
/// # Examples
///
/// ```
/// use vigil_review::diff::DiffFetcher;
///
/// let fetcher = DiffFetcher::new();
/// ```
pub struct DiffFetcher {
    command: String,
}

impl DiffFetcher {
    /// Create a fetcher using the `gh` executable from `PATH`.
    pub fn new() -> Self {
        Self {
            command: "gh".into(),
        }
    }

    /// Create a fetcher invoking a different executable. Used by tests.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for DiffFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffSource for DiffFetcher {
    fn fetch(&self, pr_number: u64) -> Result<String, VigilError> {
        let output = Command::new(&self.command)
            .args(["pr", "diff", &pr_number.to_string()])
            .output()
            .map_err(|e| {
                VigilError::Fetch(format!(
                    "failed to run {} pr diff {pr_number}: {e}",
                    self.command
                ))
            })?;

        // A non-zero exit is a real failure, not an empty diff.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VigilError::Fetch(format!(
                "{} pr diff {pr_number} failed ({}): {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
