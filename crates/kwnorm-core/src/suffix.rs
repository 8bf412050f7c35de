//! Singular/plural suffix table
//!
//! A heuristic reducer, not a stemmer. Each token gets at most one rule: the
//! table is scanned in order and the first rule whose suffix ends the token
//! decides the outcome, whether or not its stem survives the length guard.

/// Stems must be longer than this many characters to replace the token.
pub const MIN_STEM_CHARS: usize = 2;

/// Which inflection a rule targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixKind {
    /// `versicherungen` -> `versicherung`
    En,
    /// `kinder` -> `kind`
    Er,
    /// `tage` -> `tag`
    E,
    /// `hotels` -> `hotel`
    S,
}

/// One entry of the decision list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub kind: SuffixKind,
    pub suffix: &'static str,
}

/// Ordered decision list, scanned top to bottom.
pub const SUFFIX_RULES: [SuffixRule; 4] = [
    SuffixRule {
        kind: SuffixKind::En,
        suffix: "en",
    },
    SuffixRule {
        kind: SuffixKind::Er,
        suffix: "er",
    },
    SuffixRule {
        kind: SuffixKind::E,
        suffix: "e",
    },
    SuffixRule {
        kind: SuffixKind::S,
        suffix: "s",
    },
];

impl SuffixRule {
    /// True if `token` ends with this rule's suffix
    pub fn matches(&self, token: &str) -> bool {
        token.ends_with(self.suffix)
    }

    /// Strip the suffix, returning the stem only if it is long enough.
    ///
    /// Length is counted in characters so umlauts weigh the same as ASCII.
    pub fn apply<'a>(&self, token: &'a str) -> Option<&'a str> {
        let stem = token.strip_suffix(self.suffix)?;
        (stem.chars().count() > MIN_STEM_CHARS).then_some(stem)
    }
}

/// First rule in [`SUFFIX_RULES`] whose suffix ends `token`
pub fn matching_rule(token: &str) -> Option<&'static SuffixRule> {
    SUFFIX_RULES.iter().find(|rule| rule.matches(token))
}

/// Reduce one token to its singular form.
///
/// If the first matching rule yields a stem that is too short, the token is
/// returned unchanged. Later rules are never consulted.
pub fn reduce_token(token: &str) -> &str {
    match matching_rule(token) {
        Some(rule) => rule.apply(token).unwrap_or(token),
        None => token,
    }
}
