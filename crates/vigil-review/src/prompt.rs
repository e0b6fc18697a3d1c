use vigil_core::PullRequestRecord;

const REVIEW_INSTRUCTIONS: &str = "\
Provide a comprehensive review covering:

1. **Summary**: Brief overview of what this PR does
2. **Code Quality**: Identify inconsistencies, anti-patterns, or quality issues
3. **Security**: Flag any security vulnerabilities or concerns
4. **Testing**: Assess test coverage and testing best practices
5. **Better Approaches**: Challenge the implementation and suggest alternatives based on the actual code
6. **Impact Analysis**: Detail what changes and their potential impact
7. **Recommendation**: Should this be merged, needs review, or needs changes?

Be specific and reference actual code when making recommendations. \
Do not invent features or suggest unrelated improvements.";

/// Build the review prompt for one pull request.
///
/// Interpolates the PR title, author, and URL together with the diff,
/// truncated to at most `max_diff_chars` characters, into the fixed
/// instructional template.
///
/// # Examples
///
/// ```
/// use vigil_core::{Author, PullRequestRecord};
/// use vigil_review::prompt::build_review_prompt;
///
/// let pr = PullRequestRecord {
///     number: 7,
///     title: "Fix bug".into(),
///     author: Author { login: "alice".into() },
///     url: "http://x/7".into(),
/// };
/// let prompt = build_review_prompt(&pr, "+added line", 15_000);
/// assert!(prompt.contains("Title: Fix bug"));
/// assert!(prompt.contains("+added line"));
/// ```
pub fn build_review_prompt(pr: &PullRequestRecord, diff: &str, max_diff_chars: usize) -> String {
    let diff = truncate_chars(diff, max_diff_chars);
    format!(
        "You are an experienced software architect and developer with 20+ years of experience.\n\
         \n\
         Review this pull request:\n\
         - Title: {title}\n\
         - Author: {author}\n\
         - URL: {url}\n\
         \n\
         Code changes:\n\
         ```\n\
         {diff}\n\
         ```\n\
         \n\
         {instructions}",
        title = pr.title,
        author = pr.author.login,
        url = pr.url,
        diff = diff,
        instructions = REVIEW_INSTRUCTIONS,
    )
}

/// Cut `s` to at most `max_chars` characters.
///
/// Counts characters, not bytes, so a multibyte scalar is never split.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::truncate_chars;
///
/// assert_eq!(truncate_chars("hello", 3), "hel");
/// assert_eq!(truncate_chars("hello", 10), "hello");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
