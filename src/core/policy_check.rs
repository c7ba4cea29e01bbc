//! Inheritance-declaration check for consumer policy documents.
//!
//! A consuming repo's CLAUDE.md signals that it extends the handbook by
//! carrying `Inherits: @handbook/guardrails` on its first line. Declarations
//! placed elsewhere in the document still validate, with a warning — the
//! legacy placement has no announced removal date, so both paths stay.

use regex::Regex;
use std::sync::OnceLock;

/// Package scope the declaration must reference.
pub const SCOPE: &str = "@handbook/guardrails";

/// The exact marker expected on the first non-empty line.
pub const MARKER: &str = "Inherits: @handbook/guardrails";

/// Outcome of inspecting one consumer document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCheck {
    pub valid: bool,
    pub warning: bool,
    pub message: String,
}

fn marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The strict check matches the marker verbatim: `Inherits:@handbook/...`
    // without the space is only legacy-placement valid, never strict-valid.
    RE.get_or_init(|| Regex::new(&regex::escape(MARKER)).expect("valid marker pattern"))
}

/// Inspect a consumer document's raw text for the inheritance declaration.
///
/// Pure text inspection: line-splitting and substring search, no markdown
/// parsing.
pub fn validate_policy(text: &str) -> PolicyCheck {
    let first_line = text.trim().lines().next().unwrap_or("");

    if marker_pattern().is_match(first_line) {
        return PolicyCheck {
            valid: true,
            warning: false,
            message: "policy inheritance correctly declared on first line".to_string(),
        };
    }

    // Legacy placement: the declaration (or even just the scope) anywhere in
    // the document still counts, but should move to the first line.
    if text.contains("Inherits:") || text.contains(SCOPE) {
        return PolicyCheck {
            valid: true,
            warning: true,
            message: "policy inheritance found but should be on the first line of CLAUDE.md"
                .to_string(),
        };
    }

    PolicyCheck {
        valid: false,
        warning: false,
        message: format!("no policy inheritance found; add \"{}\" as the first line", MARKER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_declaration_is_strictly_valid() {
        let check = validate_policy("Inherits: @handbook/guardrails\n\n# Project rules\n");
        assert!(check.valid);
        assert!(!check.warning);
    }

    #[test]
    fn leading_blank_lines_do_not_break_strict_placement() {
        let check = validate_policy("\n\nInherits: @handbook/guardrails\nbody");
        assert!(check.valid);
        assert!(!check.warning);
    }

    #[test]
    fn marker_without_space_is_not_strictly_valid() {
        let check = validate_policy("Inherits:@handbook/guardrails\nbody\n");
        assert!(check.valid);
        assert!(check.warning, "non-verbatim marker must take the legacy path");
    }

    #[test]
    fn declaration_elsewhere_validates_with_warning() {
        let check = validate_policy("# Project rules\n\nInherits: @handbook/guardrails\n");
        assert!(check.valid);
        assert!(check.warning);
    }

    #[test]
    fn scope_mention_alone_counts_as_legacy_placement() {
        let check = validate_policy("# Rules\nExtends @handbook/guardrails conventions.\n");
        assert!(check.valid);
        assert!(check.warning);
    }

    #[test]
    fn missing_declaration_is_invalid_with_corrective_message() {
        let check = validate_policy("# Project rules\n\nNo mention here.\n");
        assert!(!check.valid);
        assert!(!check.warning);
        assert!(check.message.contains(MARKER));
    }
}
