pub mod vocab;

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::model::{MiningResult, QuantityMention, SectionExtract};
use vocab::{MATERIALS, UNITS};

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    let units = UNITS
        .iter()
        .map(|unit| {
            unit.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s*")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(\d+(?:\.\d+)?)\s*({units})")).unwrap()
});

static MATERIAL: LazyLock<Regex> = LazyLock::new(|| {
    let words = MATERIALS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({words})\b")).unwrap()
});

/// Mine quantities and materials from free text.
pub fn mine(text: &str) -> MiningResult {
    let result = MiningResult {
        quantities: find_quantities(text),
        materials: find_materials(text).collect(),
    };
    debug!(
        quantities = result.quantities.len(),
        materials = result.materials.len(),
        "mined text"
    );
    result
}

/// Mine a located section. A section that was not found mines to nothing,
/// so names that are themselves materials do not leak from the sentinel.
pub fn mine_located(section: &SectionExtract) -> MiningResult {
    if section.found {
        mine(&section.text)
    } else {
        MiningResult::default()
    }
}

/// Every non-overlapping number+unit mention, in scan order, as written.
pub fn find_quantities(text: &str) -> Vec<QuantityMention> {
    QUANTITY
        .captures_iter(text)
        .map(|caps| QuantityMention {
            value: caps[1].to_string(),
            unit: caps[2].to_string(),
        })
        .collect()
}

/// Material keyword mentions, lower-cased, in scan order (duplicates included).
pub fn find_materials(text: &str) -> impl Iterator<Item = String> + '_ {
    MATERIAL
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displayed(text: &str) -> Vec<String> {
        mine(text).quantities.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_quantities_in_order_with_duplicates() {
        let q = displayed("Provide 12 ft joists at 16 in centers; 12 ft max span.");
        assert_eq!(q, vec!["12 ft", "16 in", "12 ft"]);
    }

    #[test]
    fn test_unit_casing_preserved() {
        let q = displayed("Wall height 10FT, slab 150 MM, trim 2.5 Inch");
        assert_eq!(q, vec!["10 FT", "150 MM", "2.5 Inch"]);
    }

    #[test]
    fn test_square_feet_variants() {
        let q = displayed("Area: 1200 sq ft, 300 sqft and 45.5 SQ  FT");
        assert_eq!(q, vec!["1200 sq ft", "300 sqft", "45.5 SQ  FT"]);
    }

    #[test]
    fn test_longer_units_win_over_prefixes() {
        let q = displayed("6 inch pipe, 25 mm conduit, 3 yards fill, 2 yd topsoil, 4 cm gap");
        assert_eq!(q, vec!["6 inch", "25 mm", "3 yards", "2 yd", "4 cm"]);
    }

    #[test]
    fn test_unit_is_not_word_bounded() {
        // "miles" starts with "m"
        assert_eq!(displayed("5 miles"), vec!["5 m"]);
    }

    #[test]
    fn test_no_quantities() {
        assert!(mine("Submit shop drawings for approval.").quantities.is_empty());
    }

    #[test]
    fn test_materials_case_folded_and_deduplicated() {
        let result = mine("Concrete footing, concrete slab, STEEL beams.");
        let materials: Vec<&str> = result.materials.iter().map(|s| s.as_str()).collect();
        assert_eq!(materials.len(), 2);
        assert!(result.materials.contains("concrete"));
        assert!(result.materials.contains("steel"));
    }

    #[test]
    fn test_materials_are_whole_words() {
        let result = mine("Painting, tiles and woodwork; paint and PVC pipe.");
        assert!(result.materials.contains("paint"));
        assert!(result.materials.contains("pvc"));
        assert!(!result.materials.contains("tile"));
        assert!(!result.materials.contains("wood"));
        assert_eq!(result.materials.len(), 2);
    }

    #[test]
    fn test_find_materials_keeps_duplicates() {
        let found: Vec<String> = find_materials("Glass, glass, GLASS").collect();
        assert_eq!(found, vec!["glass", "glass", "glass"]);
    }

    #[test]
    fn test_missing_section_mines_nothing() {
        let sentinel = SectionExtract::not_found("Steel");
        assert!(sentinel.text.contains("Steel"));
        assert_eq!(mine_located(&sentinel), MiningResult::default());
    }
}
