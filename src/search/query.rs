//! Query parsing and field-matching predicates.
//!
//! A [`Query`] is built once per search from the raw input string. Each
//! predicate returns the normalized terms that matched a field, in query
//! order, or `None` when nothing did. Terms are not deduplicated here: a term
//! that matches several fields is reported once per field, and the ranker
//! decides how much repetition is worth.

use super::hit::HitKind;
use super::normalize::{
    normalize, strip_all_modifiers, strip_leading_modifier, strip_namespace_colons,
};
use regex::{Regex, RegexBuilder};

/// Marker wrapped around highlighted text.
pub const HIGHLIGHT_OPEN: &str = "<mark>";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// A parsed search query.
#[derive(Debug, Clone)]
pub struct Query {
    original: String,
    /// Whitespace-separated terms as typed, modifiers kept.
    terms: Vec<String>,
    /// Case-folded `terms`, aligned by position.
    normalized_terms: Vec<String>,
    /// Case-insensitive alternation over all highlightable terms.
    highlighter: Option<Regex>,
}

impl Query {
    /// Parse a raw query string.
    ///
    /// Tokens that are empty once a leading scope modifier is removed (a lone
    /// `#`, `.` or `:`) are dropped.
    pub fn parse(input: &str) -> Self {
        let terms: Vec<String> = input
            .split_whitespace()
            .filter(|word| !strip_leading_modifier(word).is_empty())
            .map(str::to_string)
            .collect();
        let normalized_terms: Vec<String> = terms.iter().map(|t| normalize(t)).collect();
        let highlighter = build_highlighter(&normalized_terms);

        Self {
            original: input.to_string(),
            terms,
            normalized_terms,
            highlighter,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn normalized_terms(&self) -> &[String] {
        &self.normalized_terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply `matcher(normalized_field, normalized_term)` to every term.
    fn run_matcher<F>(&self, field: Option<&str>, matcher: F) -> Option<Vec<String>>
    where
        F: Fn(&str, &str) -> bool,
    {
        let field = field.filter(|f| !f.is_empty())?;
        let value = normalize(field);

        let matched: Vec<String> = self
            .normalized_terms
            .iter()
            .filter(|term| matcher(&value, term))
            .cloned()
            .collect();

        (!matched.is_empty()).then_some(matched)
    }

    /// Substring match for names, argument names and documentation.
    ///
    /// Terms scoped with `#` or `.` only select methods and never match here.
    pub fn matches_plain_field(&self, field: Option<&str>) -> Option<Vec<String>> {
        self.run_matcher(field, |value, term| {
            !term.starts_with(['#', '.']) && value.contains(term)
        })
    }

    /// Namespace-segment match against a fully qualified name.
    ///
    /// Only terms containing `:` participate; see [`matches_segment`].
    pub fn matches_namespace(&self, full_name: Option<&str>) -> Option<Vec<String>> {
        self.run_matcher(full_name, matches_segment)
    }

    /// Scope-aware match against a method, constructor or macro name.
    ///
    /// - `#name` / `Type#name` select instance methods only.
    /// - `.name` / `Type.name` select class methods, constructors and macros.
    /// - The optional `Type` part must occur in the owner's full name.
    /// - Unscoped terms try a namespace-segment match, then plain containment.
    pub fn matches_method_name(
        &self,
        name: &str,
        kind: HitKind,
        owner_full_name: &str,
    ) -> Option<Vec<String>> {
        let owner = normalize(owner_full_name);
        self.run_matcher(Some(name), |value, term| {
            method_term_matches(value, term, kind, &owner)
        })
    }

    /// Wrap every case-insensitive occurrence of a query term in `<mark>` tags.
    ///
    /// Returns an empty string for a missing field.
    pub fn highlight(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };
        match &self.highlighter {
            Some(re) => re
                .replace_all(text, format!("{HIGHLIGHT_OPEN}$1{HIGHLIGHT_CLOSE}").as_str())
                .into_owned(),
            None => text.to_string(),
        }
    }
}

/// True when the bare form of `term` starts a namespace segment of `value`.
///
/// The bare form drops leading and trailing `:` runs, so `Foo::Bar`, `::Bar`
/// and `Bar:` all work. A match must begin at index 0 or right after a `:`,
/// which keeps `bar:` from matching inside `foobar`.
pub(crate) fn matches_segment(value: &str, term: &str) -> bool {
    if !term.contains(':') {
        return false;
    }
    let bare = strip_namespace_colons(term);
    if bare.is_empty() {
        return false;
    }
    value
        .find(bare)
        .is_some_and(|i| i == 0 || value[..i].ends_with(':'))
}

fn method_term_matches(value: &str, term: &str, kind: HitKind, owner: &str) -> bool {
    let separator = if let Some(i) = term.find('#') {
        if kind != HitKind::InstanceMethod {
            return false;
        }
        Some(i)
    } else if let Some(i) = term.find('.') {
        if !kind.is_class_scoped() {
            return false;
        }
        Some(i)
    } else {
        if !term.starts_with(':') && matches_segment(value, term) {
            return true;
        }
        None
    };

    let method_name = match separator {
        Some(i) => {
            let scope = &term[..i];
            if !scope.is_empty() && !owner.contains(scope) {
                return false;
            }
            &term[i + 1..]
        }
        None => term,
    };

    value.contains(method_name)
}

fn build_highlighter(normalized_terms: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = normalized_terms
        .iter()
        .map(|term| strip_all_modifiers(term))
        .filter(|term| !term.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return None;
    }

    RegexBuilder::new(&format!("({})", alternatives.join("|")))
        .case_insensitive(true)
        .build()
        .inspect_err(|e| tracing::warn!("Highlighting disabled for this query: {}", e))
        .ok()
}
