//! Locating a named section inside extracted specification text.
//!
//! The boundary is a greedy "next heading wins" heuristic: a section runs
//! from the first occurrence of its name up to the next `DIVISION` or
//! `SECTION` token, matched case-insensitively and without word boundaries.
//! Any such token ends the section, including "Section" in running prose or
//! "subsection", so a section can be truncated early. Document structure
//! (numbering, nesting, page breaks) is not interpreted.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

use crate::model::SectionExtract;

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)DIVISION|SECTION").unwrap());

/// Find `section_name` in `full_text` and return the span up to the next heading marker.
///
/// Only the first occurrence of the name is used. A name that does not occur
/// yields the "not found" sentinel rather than an error.
pub fn locate_section(full_text: &str, section_name: &str) -> SectionExtract {
    let Some(anchor) = name_pattern(section_name) else {
        return SectionExtract::not_found(section_name);
    };

    let Some(start) = anchor.find(full_text) else {
        debug!(section = section_name, "section not found");
        return SectionExtract::not_found(section_name);
    };

    let end = HEADING_MARKER
        .find_at(full_text, start.end())
        .map(|m| m.start())
        .unwrap_or(full_text.len());

    debug!(
        section = section_name,
        start = start.start(),
        end,
        "located section"
    );

    SectionExtract {
        section_name: section_name.to_string(),
        text: full_text[start.start()..end].to_string(),
        found: true,
    }
}

/// Case-insensitive literal match where each whitespace run may be any whitespace.
fn name_pattern(section_name: &str) -> Option<Regex> {
    let words: Vec<String> = section_name.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = words.join(r"\s+");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = "PROJECT MANUAL\n\
        DIVISION 03 - CONCRETE\n\
        Cast-in-place concrete, 4000 psi.\n\
        DIVISION 09 - FINISHES\n\
        Gypsum board 5/8 in thick. Paint two coats.\n\
        DIVISION 10 - SPECIALTIES\n\
        Toilet accessories.\n";

    #[test]
    fn test_section_ends_at_next_division() {
        let result = locate_section(SPEC, "Division 09 - Finishes");
        assert!(result.found);
        assert_eq!(
            result.text,
            "DIVISION 09 - FINISHES\nGypsum board 5/8 in thick. Paint two coats.\n"
        );
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let result = locate_section(SPEC, "division 10 - specialties");
        assert_eq!(result.text, "DIVISION 10 - SPECIALTIES\nToilet accessories.\n");
    }

    #[test]
    fn test_whitespace_in_name_is_tolerant() {
        let text = "SECTION 09 91 23\nPAINTING\nSECTION 09 96 00";
        let result = locate_section(text, "section  09\t91 23");
        assert_eq!(result.text, "SECTION 09 91 23\nPAINTING\n");
    }

    #[test]
    fn test_name_spanning_line_break_matches() {
        let text = "Division 09 –\nFinishes\nTile work.\nDIVISION 10";
        let result = locate_section(text, "Division 09 – Finishes");
        assert!(result.found);
        assert_eq!(result.text, "Division 09 –\nFinishes\nTile work.\n");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Finishes overview\nDIVISION 09\nFinishes detail\n";
        let result = locate_section(text, "finishes");
        assert_eq!(result.text, "Finishes overview\n");
    }

    #[test]
    fn test_prose_marker_truncates_section() {
        let text = "Painting\nApply per the referenced section of the manual.\nPrimer.";
        let result = locate_section(text, "Painting");
        assert_eq!(result.text, "Painting\nApply per the referenced ");
    }

    #[test]
    fn test_marker_inside_name_is_not_a_boundary() {
        let text = "SECTION 05 12 00\nStructural steel.\nSECTION 05 50 00\n";
        let result = locate_section(text, "SECTION 05 12 00");
        assert_eq!(result.text, "SECTION 05 12 00\nStructural steel.\n");
    }

    #[test]
    fn test_missing_section_reports_sentinel() {
        let result = locate_section(SPEC, "Division 26 - Electrical");
        assert!(!result.found);
        assert_eq!(
            result.text,
            "Section 'Division 26 - Electrical' not found in the document."
        );
        assert_eq!(result.section_name, "Division 26 - Electrical");
    }

    #[test]
    fn test_blank_name_is_never_found() {
        let text = "Concrete 4 in slab.\nDIVISION 09\nPaint.";
        for name in ["", "   ", "\t\n"] {
            let result = locate_section(text, name);
            assert!(!result.found, "{name:?} located a section");
            assert!(result.text.ends_with("not found in the document."));
        }
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let text = "Item (a) [steel] 1.5 in\nDIVISION 06";
        let result = locate_section(text, "(a) [steel]");
        assert_eq!(result.text, "(a) [steel] 1.5 in\n");
        assert!(!locate_section(text, "a.b").found);
    }
}
