use chrono::{DateTime, Utc};

use vigil_core::ReviewResult;

/// Render the final markdown report.
///
/// Pure transformation: a header with the generation timestamp and total
/// count, a horizontal rule, then one section per result in the given
/// order. Review text is embedded verbatim, never re-escaped.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vigil_review::report::render_report;
///
/// let when = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
/// let report = render_report(&[], when);
/// assert!(report.contains("**Generated:** 2025-03-01 12:00:00 UTC"));
/// assert!(report.contains("**Total PRs Reviewed:** 0"));
/// ```
pub fn render_report(results: &[ReviewResult], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("# Pull Request Review Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("**Total PRs Reviewed:** {}\n\n", results.len()));
    out.push_str("---\n\n");

    for result in results {
        out.push_str(&format!(
            "## PR #{}: {}\n\n",
            result.pr_number, result.pr_title
        ));
        out.push_str(&format!("**Author:** {}\n\n", result.pr_author));
        out.push_str(&format!("**URL:** {}\n\n", result.pr_url));
        out.push_str(&result.review);
        out.push_str("\n\n---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_result(number: u64, title: &str, review: &str) -> ReviewResult {
        ReviewResult {
            pr_number: number,
            pr_title: title.into(),
            pr_author: "alice".into(),
            pr_url: format!("http://x/{number}"),
            review: review.into(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 5).unwrap()
    }

    #[test]
    fn report_has_one_section_per_result_in_order() {
        let results = vec![
            make_result(5, "e", "r5"),
            make_result(2, "b", "r2"),
            make_result(9, "i", "r9"),
        ];
        let report = render_report(&results, fixed_time());

        assert_eq!(report.matches("## PR #").count(), 3);
        let p5 = report.find("## PR #5").unwrap();
        let p2 = report.find("## PR #2").unwrap();
        let p9 = report.find("## PR #9").unwrap();
        assert!(p5 < p2 && p2 < p9);
    }

    #[test]
    fn report_header_counts_results() {
        let results = vec![make_result(1, "a", "r")];
        let report = render_report(&results, fixed_time());
        assert!(report.starts_with("# Pull Request Review Report\n\n"));
        assert!(report.contains("**Generated:** 2025-03-01 09:30:05 UTC"));
        assert!(report.contains("**Total PRs Reviewed:** 1"));
    }

    #[test]
    fn section_layout_matches_expected_lines() {
        let results = vec![make_result(7, "Fix bug", "LGTM")];
        let report = render_report(&results, fixed_time());
        assert!(report.contains("## PR #7: Fix bug\n\n"));
        assert!(report.contains("**Author:** alice\n\n"));
        assert!(report.contains("**URL:** http://x/7\n\n"));
        assert!(report.contains("LGTM\n\n---\n\n"));
    }

    #[test]
    fn review_text_is_verbatim() {
        let raw = "### Summary\n\n* `<unescaped>` & **bold**\n";
        let results = vec![make_result(1, "a", raw)];
        let report = render_report(&results, fixed_time());
        assert!(report.contains(raw));
    }

    #[test]
    fn rendering_is_deterministic() {
        let results = vec![make_result(1, "a", "r1"), make_result(2, "b", "r2")];
        let first = render_report(&results, fixed_time());
        let second = render_report(&results, fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_results_render_header_only() {
        let report = render_report(&[], fixed_time());
        assert!(report.contains("**Total PRs Reviewed:** 0"));
        assert!(!report.contains("## PR #"));
        assert!(report.ends_with("---\n\n"));
    }
}
