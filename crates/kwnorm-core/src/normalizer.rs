//! Canonical normalizer — converts a raw keyword to its canonical key
//!
//! Two keywords are near-duplicates exactly when their canonical keys are
//! equal. The key is lowercase, free of the stripped punctuation marks, and
//! consists of singularized tokens in sorted order.
//!
//! # Pipeline
//!
//! `lowercase → strip punctuation → hyphens to spaces → collapse whitespace
//! → split → join compounds → reduce suffixes → sort → join`
//!
//! # Guarantees
//!
//! - **Total**: never fails; non-text input yields the empty key
//! - **Deterministic**: same input always produces same output
//! - **Order-insensitive**: word order in the input does not affect the key

use crate::suffix::reduce_token;
use crate::table::Cell;

/// Characters deleted outright (not replaced by a space)
pub const STRIPPED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

// ── Public API ─────────────────────────────────────────────

/// Normalize a raw keyword to its canonical key
///
/// # Example
/// ```
/// use kwnorm_core::normalizer::normalize_keyword;
///
/// assert_eq!(normalize_keyword("Rote Autos!"), "auto rot");
/// assert_eq!(normalize_keyword("autos rote"), "auto rot");
/// ```
pub fn normalize_keyword(keyword: &str) -> String {
    // ── Step 1: Lowercase ──────────────────────────────
    let lowered = keyword.to_lowercase();

    // ── Steps 2-3: Punctuation and hyphens ─────────────
    let cleaned = strip_punctuation(&lowered);

    // ── Step 4: Collapse whitespace ────────────────────
    let collapsed = collapse_whitespace(&cleaned);

    // ── Steps 5-7: Tokens ──────────────────────────────
    let mut tokens: Vec<String> = collapsed
        .split(' ')
        .map(join_compound)
        .map(|token| reduce_token(&token).to_string())
        .collect();

    // ── Steps 8-9: Sort and join ───────────────────────
    tokens.sort();
    tokens.join(" ")
}

/// Normalize an optional keyword; absent input yields the empty key
pub fn normalize_opt(keyword: Option<&str>) -> String {
    keyword.map(normalize_keyword).unwrap_or_default()
}

/// Normalize a table cell; only text cells carry keywords
pub fn normalize_cell(cell: &Cell) -> String {
    normalize_opt(cell.as_text())
}

// ── Pipeline stages ────────────────────────────────────────

/// Delete the stripped punctuation set and turn hyphens into spaces
pub fn strip_punctuation(input: &str) -> String {
    input
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .map(|c| if c == '-' { ' ' } else { c })
        .collect()
}

/// Collapse whitespace runs to one space and trim both ends
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Join a compound written with spaces (`"auto flotte"` → `"autoflotte"`).
///
/// After splitting on single spaces a token never contains one, so this is
/// the identity today. It stays a separate stage so that tokenization can
/// change without silently altering the keys.
pub fn join_compound(token: &str) -> String {
    token.chars().filter(|&c| c != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Stages ─────────────────────────────────────────

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("a.b,c!d?e:f;g"), "abcdefg");
        assert_eq!(strip_punctuation("auto-flotte"), "auto flotte");
        // Only the fixed set is removed
        assert_eq!(strip_punctuation("a/b&c'd"), "a/b&c'd");
    }

    #[test]
    fn test_punctuation_is_deleted_not_spaced() {
        assert_eq!(normalize_keyword("auto.flotte"), "autoflott");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  rote   autos  "), "rote autos");
        assert_eq!(collapse_whitespace("rote\t\nautos"), "rote autos");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_any_unicode_whitespace_separates_tokens() {
        // Tabs, newlines and no-break spaces all count as separators
        assert_eq!(normalize_keyword("rote\tautos"), "auto rot");
        assert_eq!(normalize_keyword("rote\u{a0}autos"), "auto rot");
        assert_eq!(normalize_keyword("\u{a0}hotels \n\tberlin\u{a0}"), "berlin hotel");
        assert_eq!(collapse_whitespace("rote\u{a0}\u{a0}autos"), "rote autos");
    }

    #[test]
    fn test_join_compound() {
        assert_eq!(join_compound("autoflotte"), "autoflotte");
        assert_eq!(join_compound("auto flotte"), "autoflotte");
    }

    // ── Pipeline ───────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_keyword(""), "");
        assert_eq!(normalize_keyword("   "), "");
        assert_eq!(normalize_keyword("?!.,"), "");
        assert_eq!(normalize_keyword("---"), "");
    }

    #[test]
    fn test_non_text_input() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_cell(&Cell::Int(42)), "");
        assert_eq!(normalize_cell(&Cell::Float(2.5)), "");
        assert_eq!(normalize_cell(&Cell::Bool(true)), "");
        assert_eq!(normalize_cell(&Cell::Empty), "");
        assert_eq!(normalize_cell(&Cell::Other("2024-05-01".into())), "");
        assert_eq!(normalize_cell(&Cell::Text("Autos".into())), "auto");
    }

    #[test]
    fn test_case_and_punctuation() {
        assert_eq!(normalize_keyword("Auto-Flotte!"), "auto flott");
        assert_eq!(normalize_keyword("AUTO FLOTTE"), "auto flott");
        assert_eq!(normalize_keyword("auto flotte"), "auto flott");
        // Written as one word it stays one token
        assert_eq!(normalize_keyword("autoflotte"), "autoflott");
    }

    #[test]
    fn test_word_order_invariance() {
        assert_eq!(normalize_keyword("rote autos"), "auto rot");
        assert_eq!(normalize_keyword("autos rote"), "auto rot");
        assert_eq!(
            normalize_keyword("Versicherung Auto"),
            normalize_keyword("Auto Versicherung")
        );
    }

    #[test]
    fn test_singular_plural_merge() {
        assert_eq!(normalize_keyword("Autoversicherung"), "autoversicherung");
        assert_eq!(normalize_keyword("autoversicherungen"), "autoversicherung");
        assert_eq!(normalize_keyword("Hotels Berlin"), "berlin hotel");
        assert_eq!(normalize_keyword("hotel berlin"), "berlin hotel");
    }

    #[test]
    fn test_suffix_priority() {
        // Only the first matching rule fires per token
        assert_eq!(normalize_keyword("Versicherungen"), "versicherung");
        assert_eq!(normalize_keyword("Häuser"), "häus");
        // No rule ends in `rn`
        assert_eq!(normalize_keyword("Häusern"), "häusern");
    }

    #[test]
    fn test_short_token_protection() {
        assert_eq!(normalize_keyword("oben"), "oben");
        assert_eq!(normalize_keyword("der bus"), "bus der");
        assert_eq!(normalize_keyword("die autos"), "auto die");
    }

    #[test]
    fn test_sort_is_by_code_point() {
        // 'ä' (U+00E4) sorts after every ASCII letter
        assert_eq!(normalize_keyword("äpfel zug"), "zug äpfel");
        assert_eq!(normalize_keyword("b a c"), "a b c");
    }

    #[test]
    fn test_other_characters_survive() {
        assert_eq!(normalize_keyword("B&B Hotel"), "b&b hotel");
        assert_eq!(normalize_keyword("iphone 15"), "15 iphon");
    }

    #[test]
    fn test_output_invariants() {
        let inputs = [
            "  Günstige   Auto-Versicherungen, online!  ",
            "Kinder; Spielzeug: Tage?",
            "HOTELS in  Berlin",
        ];
        for input in inputs {
            let key = normalize_keyword(input);
            assert_eq!(key, key.to_lowercase(), "not lowercase: {}", key);
            assert!(!key.contains(&STRIPPED_PUNCTUATION[..]), "punctuation in {}", key);
            assert!(!key.contains('-'), "hyphen in {}", key);
            assert!(!key.contains("  "), "double space in {}", key);
            assert_eq!(key, key.trim());
            let tokens: Vec<&str> = key.split(' ').collect();
            let mut sorted = tokens.clone();
            sorted.sort();
            assert_eq!(tokens, sorted, "tokens not sorted in {}", key);
        }
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "Auto-Flotte!",
            "rote autos",
            "Autoversicherungen",
            "Hotels Berlin",
            "Günstige Kinder Tage",
            "oben",
            "",
        ];
        for input in inputs {
            let once = normalize_keyword(input);
            let twice = normalize_keyword(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_stacked_suffixes_shorten_again_on_reapplication() {
        // Each pass applies one rule, so stacked endings peel off one at a time
        let once = normalize_keyword("häuser");
        assert_eq!(once, "häus");
        assert_eq!(normalize_keyword(&once), "häu");
    }

    #[test]
    fn test_determinism_100_iterations() {
        let input = "Günstige Auto-Versicherungen: Vergleich!";
        let first = normalize_keyword(input);
        for i in 0..100 {
            assert_eq!(
                first,
                normalize_keyword(input),
                "Non-determinism at iteration {}",
                i
            );
        }
    }
}
