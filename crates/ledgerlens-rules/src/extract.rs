//! Direct and proximity pattern extraction.
//!
//! Patterns are tried in configured order and the first match wins. Ordering
//! encodes a most-specific-to-most-generic fallback policy, not an exhaustive
//! search.

use regex::Regex;

/// Default snippet radius (bytes) around a proximity match.
pub const PROXIMITY_WINDOW: usize = 100;

/// Value normalization applied after a capture. Data-driven: the registry
/// names one of these per rule instead of carrying code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Collapse whitespace runs to single spaces.
    Name,
    /// Trim and flatten newlines.
    Date,
    /// Strip currency symbols and separators down to a plain numeric string.
    Amount,
}

impl PostProcess {
    /// Normalize a cleaned capture. `None` means the value is unusable and the
    /// field stays at the sentinel.
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            PostProcess::Name => {
                let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
                (!collapsed.is_empty()).then_some(collapsed)
            }
            PostProcess::Date => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            PostProcess::Amount => {
                let stripped: String = value
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                stripped.parse::<f64>().is_ok().then_some(stripped)
            }
        }
    }
}

/// Trim a capture and collapse internal newlines to spaces.
fn clean(value: &str) -> String {
    value.trim().replace('\n', " ")
}

/// Return the first capture among `patterns` that matches `text`, cleaned and
/// post-processed. Each pattern carries exactly one capturing group.
///
/// The first *matching* pattern decides the outcome: if its capture fails
/// post-processing the field is a miss, later patterns are not consulted.
pub fn extract_direct(text: &str, patterns: &[Regex], post: Option<PostProcess>) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let raw = caps.get(1)?.as_str();
            let value = clean(raw);
            return match post {
                Some(p) => p.apply(&value),
                None => Some(value),
            };
        }
    }
    None
}

/// Find a value whose surrounding text mentions one of `keywords`.
///
/// Scans every match of `value_pattern` in document order and inspects a
/// `window`-byte snippet on either side of the match. The first value with
/// *any* keyword in its snippet wins, even if a later occurrence sits closer
/// to a keyword. A one-pass nearest-context heuristic, kept as-is.
pub fn extract_by_proximity(
    text: &str,
    keywords: &[&str],
    value_pattern: &Regex,
    window: usize,
) -> Option<String> {
    let keywords_lower: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    for m in value_pattern.find_iter(text) {
        let start = floor_char_boundary(text, m.start().saturating_sub(window));
        let end = floor_char_boundary(text, (m.end() + window).min(text.len()));
        let snippet = text[start..end].to_lowercase();

        if keywords_lower.iter().any(|k| snippet.contains(k.as_str())) {
            return Some(clean(m.as_str()));
        }
    }
    None
}

/// Largest char boundary at or below `idx`.
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    #[test]
    fn test_direct_first_pattern_wins() {
        let patterns = [re(r"Name\s*:\s*(\w+)"), re(r"Dear\s+(\w+)")];
        // Both patterns match; the earlier one must decide.
        let text = "Dear ALICE, your statement. Name: BOB";
        let value = extract_direct(text, &patterns, None);
        assert_eq!(value.as_deref(), Some("BOB"));
    }

    #[test]
    fn test_direct_falls_through_to_later_pattern() {
        let patterns = [re(r"Name\s*:\s*(\w+)"), re(r"Dear\s+(\w+)")];
        let value = extract_direct("Dear ALICE, welcome", &patterns, None);
        assert_eq!(value.as_deref(), Some("ALICE"));
    }

    #[test]
    fn test_direct_no_match() {
        let patterns = [re(r"Name\s*:\s*(\w+)")];
        assert_eq!(extract_direct("nothing here", &patterns, None), None);
    }

    #[test]
    fn test_capture_newlines_collapsed() {
        let patterns = [re(r"Holder\s+([A-Z\n ]+),")];
        let value = extract_direct("Holder JOHN\nDOE,", &patterns, None);
        assert_eq!(value.as_deref(), Some("JOHN DOE"));
    }

    #[test]
    fn test_amount_postprocess() {
        assert_eq!(PostProcess::Amount.apply("1,234.56").as_deref(), Some("1234.56"));
        assert_eq!(PostProcess::Amount.apply("₹ 99.00").as_deref(), Some("99.00"));
        assert_eq!(PostProcess::Amount.apply("no digits"), None);
        // A stray dot survives stripping and breaks the parse; that is a miss.
        assert_eq!(PostProcess::Amount.apply("1.234.56"), None);
    }

    #[test]
    fn test_name_postprocess_collapses_runs() {
        assert_eq!(
            PostProcess::Name.apply("JOHN   Q   DOE ").as_deref(),
            Some("JOHN Q DOE")
        );
    }

    #[test]
    fn test_proximity_keyword_required() {
        let money = re(r"(?i)([\d,]+\.\d{2})");
        // Keep the first amount well outside the keyword's window.
        let filler = "x".repeat(2 * PROXIMITY_WINDOW);
        let text = format!("Opening balance 500.00 {filler} Total amount due 1,200.00 this cycle.");
        let value = extract_by_proximity(&text, &["total amount due"], &money, PROXIMITY_WINDOW);
        assert_eq!(value.as_deref(), Some("1,200.00"));
    }

    #[test]
    fn test_proximity_no_value_matches() {
        // Keywords present, but no value pattern hit anywhere.
        let money = re(r"([\d,]+\.\d{2})");
        let text = "Total amount due is listed elsewhere.";
        assert_eq!(
            extract_by_proximity(text, &["total amount due"], &money, PROXIMITY_WINDOW),
            None
        );
    }

    #[test]
    fn test_proximity_first_match_with_any_keyword_wins() {
        // Documented policy: the first value occurrence with any keyword in its
        // window is returned, even though the second occurrence sits directly
        // beside the stronger keyword.
        let money = re(r"([\d,]+\.\d{2})");
        let text = "Due date reminder: 100.00 charged. Total amount due 999.99.";
        let value = extract_by_proximity(
            text,
            &["total amount due", "due date"],
            &money,
            PROXIMITY_WINDOW,
        );
        assert_eq!(value.as_deref(), Some("100.00"));
    }

    #[test]
    fn test_proximity_window_clips_to_bounds() {
        let money = re(r"([\d,]+\.\d{2})");
        let text = "12.34";
        // Match at document start with window larger than the document.
        assert_eq!(extract_by_proximity(text, &["12"], &money, 500).as_deref(), Some("12.34"));
    }

    #[test]
    fn test_proximity_window_multibyte_safe() {
        let money = re(r"([\d,]+\.\d{2})");
        // Rupee signs straddle the window edges; slicing must not split them.
        let text = "total amount due ₹ 1,234.56 ₹₹₹₹";
        let value = extract_by_proximity(text, &["₹"], &money, 2);
        assert_eq!(value.as_deref(), Some("1,234.56"));
    }
}
