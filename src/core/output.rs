//! Compact output rendering helpers for CLI surfaces.
//!
//! Inheritance runs can fail on many documents at once; summaries stay
//! bounded and single-line no matter how noisy the underlying I/O errors are.

/// Collapse a failure reason onto one whitespace-normalized line, truncated
/// with an ellipsis past `max_chars`.
pub fn compact_reason(reason: &str, max_chars: usize) -> String {
    let mut line = String::new();
    let mut over = false;
    for word in reason.split_whitespace() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
        if line.chars().count() > max_chars {
            over = true;
            break;
        }
    }
    if over {
        let truncated: String = line.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        line
    }
}

/// Render up to `max_items` failure reasons on one line, noting the overflow.
pub fn preview_failures(reasons: &[String], max_items: usize, max_chars: usize) -> String {
    if reasons.is_empty() {
        return String::new();
    }
    let shown = reasons
        .iter()
        .take(max_items)
        .map(|r| compact_reason(r, max_chars))
        .collect::<Vec<_>>()
        .join("; ");
    if reasons.len() > max_items {
        format!("{} (+{} more)", shown, reasons.len() - max_items)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_is_collapsed_and_bounded() {
        let input = "read  error:\n  permission\tdenied";
        assert_eq!(compact_reason(input, 80), "read error: permission denied");
        assert_eq!(compact_reason(input, 10), "read error...");
    }

    #[test]
    fn short_reason_gets_no_ellipsis() {
        assert_eq!(compact_reason("unreadable", 80), "unreadable");
    }

    #[test]
    fn failure_preview_caps_item_count() {
        let reasons: Vec<String> = (0..5).map(|i| format!("doc{}.md: unreadable", i)).collect();
        let rendered = preview_failures(&reasons, 3, 40);
        assert!(rendered.ends_with("(+2 more)"), "got: {}", rendered);
        assert!(rendered.contains("doc0.md"), "got: {}", rendered);
    }
}
