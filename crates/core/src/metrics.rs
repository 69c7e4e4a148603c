//! Tag extraction and marker scanning over completion text.
//!
//! The model is asked to annotate its output with fixed comment prefixes.
//! Nothing here fails on a missing tag: absent values fall back to the
//! placeholder the caller supplies.

use std::sync::LazyLock;

use regex::Regex;

/// Comment-tag vocabulary for one entry point.
pub struct TagSet {
    gas: Regex,
    security: Regex,
    performance: Regex,
}

impl TagSet {
    /// Build a vocabulary from the literal comment prefixes, e.g. `// GAS:`.
    ///
    /// Each tag captures the rest of its line after a single space.
    fn from_prefixes(gas: &str, security: &str, performance: &str) -> Self {
        let compile = |prefix: &str| {
            Regex::new(&format!("{} (.+)", regex::escape(prefix))).expect("valid regex")
        };
        Self {
            gas: compile(gas),
            security: compile(security),
            performance: compile(performance),
        }
    }

    /// First gas tag, if any.
    pub fn gas<'t>(&self, text: &'t str) -> Option<&'t str> {
        first_capture(&self.gas, text)
    }

    /// Every security tag, in order of appearance.
    pub fn security(&self, text: &str) -> Vec<String> {
        self.security
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// First performance tag, if any.
    pub fn performance<'t>(&self, text: &'t str) -> Option<&'t str> {
        first_capture(&self.performance, text)
    }

    /// Whether the text carries a gas tag at all.
    pub fn has_gas(&self, text: &str) -> bool {
        self.gas(text).is_some()
    }
}

/// Tags used by `POST /api/v1/optimize`.
pub static OPTIMIZE_TAGS: LazyLock<TagSet> =
    LazyLock::new(|| TagSet::from_prefixes("// GAS:", "// SECURITY:", "// PERFORMANCE:"));

/// Tags used by the legacy optimize route.
pub static LEGACY_TAGS: LazyLock<TagSet> =
    LazyLock::new(|| TagSet::from_prefixes("// Gas savings:", "// Security:", "// Performance:"));

static MODULE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmodule\b").expect("valid regex"));
static FUN_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfun\b").expect("valid regex"));

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end())
        .filter(|s| !s.is_empty())
}

/// Whether the text looks like Move source: both a `module` and a `fun` token.
pub fn looks_like_move_module(text: &str) -> bool {
    MODULE_TOKEN_RE.is_match(text) && FUN_TOKEN_RE.is_match(text)
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Marker substring and the advisory it raises.
pub type WarningRule = (&'static str, &'static str);

pub const OPTIMIZE_WARNING_RULES: &[WarningRule] = &[
    ("UNSAFE", "Contains unsafe operations"),
    ("WARNING", "Contains compiler warnings"),
];

pub const LEGACY_WARNING_RULES: &[WarningRule] = &[
    ("unsafe", "Contains unsafe operations"),
    ("TODO", "Contains unresolved TODO items"),
];

/// Advisories whose marker appears anywhere in the text.
///
/// Returns `None` rather than an empty list so the field can be omitted.
pub fn scan_warnings(text: &str, rules: &[WarningRule]) -> Option<Vec<String>> {
    let warnings: Vec<String> = rules
        .iter()
        .filter(|(marker, _)| text.contains(marker))
        .map(|(_, advisory)| advisory.to_string())
        .collect();

    (!warnings.is_empty()).then_some(warnings)
}
