use vigil_core::{PullRequestRecord, ReviewConfig, ReviewResult, VigilError};

use crate::diff::DiffSource;
use crate::llm::Inference;
use crate::prompt;

/// Review orchestrator driving the per-PR pipeline: fetch the diff, build
/// the prompt, invoke the model, assemble the result.
///
/// Generic over its two external seams so tests can substitute stubs for
/// the GitHub CLI and the inference endpoint.
pub struct ReviewPipeline<F, M> {
    diffs: F,
    llm: M,
    config: ReviewConfig,
}

impl<F: DiffSource, M: Inference> ReviewPipeline<F, M> {
    /// Create a pipeline from a diff source, an inference backend, and the
    /// review configuration.
    pub fn new(diffs: F, llm: M, config: ReviewConfig) -> Self {
        Self { diffs, llm, config }
    }

    /// Review a single pull request.
    ///
    /// Prints a progress line, fetches the diff, builds the prompt with the
    /// configured diff cutoff, and invokes the model.
    ///
    /// # Errors
    ///
    /// Fetch and inference errors propagate unchanged; the per-item boundary
    /// in [`ReviewPipeline::review_all`] is responsible for isolating them.
    pub async fn review(&self, pr: &PullRequestRecord) -> Result<ReviewResult, VigilError> {
        println!("Reviewing PR #{}: {}", pr.number, pr.title);

        let diff = self.diffs.fetch(pr.number)?;
        let prompt = prompt::build_review_prompt(pr, &diff, self.config.max_diff_chars);
        let review = self.llm.complete(&prompt).await?;

        Ok(ReviewResult {
            pr_number: pr.number,
            pr_title: pr.title.clone(),
            pr_author: pr.author.login.clone(),
            pr_url: pr.url.clone(),
            review,
        })
    }

    /// Review every record in input order, skipping any that fail.
    ///
    /// A failed PR is logged to the console and omitted from the returned
    /// list; the surviving results keep the input order. One PR is in
    /// flight at a time.
    pub async fn review_all(&self, prs: &[PullRequestRecord]) -> Vec<ReviewResult> {
        let mut results = Vec::with_capacity(prs.len());
        for pr in prs {
            match self.review(pr).await {
                Ok(result) => results.push(result),
                Err(e) => println!("Error reviewing PR #{}: {e}", pr.number),
            }
        }
        results
    }
}
