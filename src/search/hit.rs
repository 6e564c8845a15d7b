//! Raw search hits produced by the catalog walk.

use ahash::AHashSet;
use serde::Serialize;
use std::fmt;

/// Kind of catalog entity a hit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Type,
    InstanceMethod,
    ClassMethod,
    Constructor,
    Macro,
    Constant,
}

impl HitKind {
    /// Method kinds in the order a type's members are searched.
    pub const METHOD_KINDS: [Self; 4] = [
        Self::InstanceMethod,
        Self::ClassMethod,
        Self::Constructor,
        Self::Macro,
    ];

    /// Scope prefix shown before a member name: `#` for instance methods,
    /// `.` for class-level members, none otherwise.
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::InstanceMethod => Some("#"),
            Self::ClassMethod | Self::Macro | Self::Constructor => Some("."),
            Self::Type | Self::Constant => None,
        }
    }

    /// Whether a `.`-scoped term may select this kind.
    pub const fn is_class_scoped(self) -> bool {
        matches!(self, Self::ClassMethod | Self::Macro | Self::Constructor)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::InstanceMethod => "instance_method",
            Self::ClassMethod => "class_method",
            Self::Constructor => "constructor",
            Self::Macro => "macro",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of an entity a query term matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedField {
    Name,
    Doc,
    Args,
    /// The owning type's fully qualified name (member hits only).
    Type,
}

/// One matched catalog entity with match bookkeeping and display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub kind: HitKind,
    /// Fields in the order they matched. Repeats count as extra evidence.
    pub matched_fields: Vec<MatchedField>,
    /// Normalized terms in the order they matched, repeats included.
    pub matched_terms: Vec<String>,
    /// Anchor id of the entity within its page.
    pub id: String,
    /// Display name: last namespace segment for types, member name otherwise.
    pub name: String,
    /// Type full name, or `Owner#member` for members.
    pub full_name: String,
    /// Stored link relative to the documentation root, anchor included for members.
    pub href: String,
    pub summary: Option<String>,
    pub args_string: Option<String>,
    /// Full name of the owning type; `None` for type hits.
    pub owner: Option<String>,
    /// Declaration kind of a type hit (class, struct, module, ...).
    pub type_kind: Option<String>,
    /// Value of a constant hit.
    pub value: Option<String>,
}

impl Hit {
    pub fn has_field(&self, field: MatchedField) -> bool {
        self.matched_fields.contains(&field)
    }

    /// True when documentation is the only field that matched.
    pub fn matched_only_doc(&self) -> bool {
        self.matched_fields.len() == 1 && self.has_field(MatchedField::Doc)
    }

    /// Number of distinct normalized terms this hit matched.
    pub fn distinct_term_count(&self) -> usize {
        self.matched_terms
            .iter()
            .map(String::as_str)
            .collect::<AHashSet<_>>()
            .len()
    }

    /// Label used to compare name-match positions: kind prefix plus name,
    /// or the full name for types.
    pub(crate) fn ranking_label(&self) -> String {
        let base = if self.kind == HitKind::Type {
            &self.full_name
        } else {
            &self.name
        };
        format!("{}{}", self.kind.prefix().unwrap_or(""), base).to_lowercase()
    }
}

/// Accumulates predicate results for one entity before a hit is emitted.
#[derive(Debug, Default)]
pub(crate) struct MatchAccumulator {
    fields: Vec<MatchedField>,
    terms: Vec<String>,
}

impl MatchAccumulator {
    /// Record a predicate result; a `None` leaves the accumulator untouched.
    pub(crate) fn record(&mut self, field: MatchedField, terms: Option<Vec<String>>) {
        if let Some(terms) = terms {
            self.fields.push(field);
            self.terms.extend(terms);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<MatchedField>, Vec<String>) {
        (self.fields, self.terms)
    }
}
