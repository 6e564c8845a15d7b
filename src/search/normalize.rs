//! Query term normalization.

/// Leading characters that restrict a term's scope: `#` instance methods,
/// `.` class-level members, `:` namespaces.
pub const SCOPE_MODIFIERS: [char; 3] = ['#', '.', ':'];

/// Case-fold a term or field value for comparison.
pub fn normalize(term: &str) -> String {
    term.to_lowercase()
}

/// Remove a single leading scope modifier, if present.
pub fn strip_leading_modifier(term: &str) -> &str {
    term.strip_prefix(SCOPE_MODIFIERS).unwrap_or(term)
}

/// Remove every leading scope modifier, as used for highlighting.
pub(crate) fn strip_all_modifiers(term: &str) -> &str {
    term.trim_start_matches(SCOPE_MODIFIERS)
}

/// Remove leading and trailing `:` runs, leaving the bare namespace segment text.
pub(crate) fn strip_namespace_colons(term: &str) -> &str {
    term.trim_matches(':')
}
