//! Catalog traversal that applies query predicates to every entity.

use super::hit::{Hit, HitKind, MatchAccumulator, MatchedField};
use super::query::Query;
use crate::catalog::{ConstantEntry, MethodEntry, TypeEntry};

/// A catalog entity together with the context needed to match it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Entity<'a> {
    Type(&'a TypeEntry),
    Method {
        entry: &'a MethodEntry,
        kind: HitKind,
        owner: &'a TypeEntry,
    },
    Constant {
        entry: &'a ConstantEntry,
        owner: &'a TypeEntry,
    },
}

impl<'a> Entity<'a> {
    /// Run this entity's predicates, producing at most one hit.
    pub(crate) fn evaluate(self, query: &Query) -> Option<Hit> {
        match self {
            Self::Type(ty) => evaluate_type(ty, query),
            Self::Method { entry, kind, owner } => evaluate_method(entry, kind, owner, query),
            Self::Constant { entry, owner } => evaluate_constant(entry, owner, query),
        }
    }

    /// Members searched beneath this entity, in authored order.
    ///
    /// Only types have members: methods by kind, then constants, then nested types.
    pub(crate) fn children(self) -> Box<dyn Iterator<Item = Entity<'a>> + 'a> {
        match self {
            Self::Type(ty) => Box::new(
                HitKind::METHOD_KINDS
                    .into_iter()
                    .flat_map(move |kind| {
                        methods_of(ty, kind).iter().map(move |entry| Entity::Method {
                            entry,
                            kind,
                            owner: ty,
                        })
                    })
                    .chain(
                        ty.constants
                            .iter()
                            .map(move |entry| Entity::Constant { entry, owner: ty }),
                    )
                    .chain(ty.types.iter().map(Entity::Type)),
            ),
            Self::Method { .. } | Self::Constant { .. } => Box::new(std::iter::empty()),
        }
    }
}

fn methods_of(ty: &TypeEntry, kind: HitKind) -> &[MethodEntry] {
    match kind {
        HitKind::InstanceMethod => &ty.instance_methods,
        HitKind::ClassMethod => &ty.class_methods,
        HitKind::Constructor => &ty.constructors,
        HitKind::Macro => &ty.macros,
        HitKind::Type | HitKind::Constant => &[],
    }
}

/// Collects hits over a whole catalog tree.
#[derive(Debug, Default)]
pub(crate) struct HitCollector {
    hits: Vec<Hit>,
    visited: usize,
}

impl HitCollector {
    /// Visit an entity and everything beneath it.
    ///
    /// A type's members are searched whether or not the type itself matched.
    pub(crate) fn recurse(&mut self, entity: Entity<'_>, query: &Query) {
        self.visited += 1;
        if let Some(hit) = entity.evaluate(query) {
            self.hits.push(hit);
        }
        for child in entity.children() {
            self.recurse(child, query);
        }
    }

    pub(crate) fn finish(self) -> Vec<Hit> {
        tracing::trace!(
            "Visited {} entities, collected {} hits",
            self.visited,
            self.hits.len()
        );
        self.hits
    }
}

/// Walk the tree under `root` and return every matching entity, unranked.
pub fn collect_hits(root: &TypeEntry, query: &Query) -> Vec<Hit> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut collector = HitCollector::default();
    collector.recurse(Entity::Type(root), query);
    collector.finish()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn evaluate_type(ty: &TypeEntry, query: &Query) -> Option<Hit> {
    let name = ty.display_name();

    let mut acc = MatchAccumulator::default();
    acc.record(MatchedField::Name, query.matches_plain_field(Some(name)));
    acc.record(
        MatchedField::Name,
        query.matches_namespace(Some(&ty.full_name)),
    );
    acc.record(MatchedField::Doc, query.matches_plain_field(ty.doc.as_deref()));

    if acc.is_empty() {
        return None;
    }
    let (matched_fields, matched_terms) = acc.into_parts();

    Some(Hit {
        kind: HitKind::Type,
        matched_fields,
        matched_terms,
        id: ty.html_id.clone(),
        name: name.to_string(),
        full_name: ty.full_name.clone(),
        href: ty.path.clone(),
        summary: ty.summary.clone(),
        args_string: None,
        owner: None,
        type_kind: non_empty(&ty.kind),
        value: None,
    })
}

fn evaluate_method(
    entry: &MethodEntry,
    kind: HitKind,
    owner: &TypeEntry,
    query: &Query,
) -> Option<Hit> {
    let mut acc = MatchAccumulator::default();
    acc.record(
        MatchedField::Name,
        query.matches_method_name(&entry.name, kind, &owner.full_name),
    );
    for arg in &entry.args {
        acc.record(
            MatchedField::Args,
            query.matches_plain_field(Some(&arg.external_name)),
        );
    }
    // Members are matched against the owner's documentation, not their own.
    acc.record(
        MatchedField::Doc,
        query.matches_plain_field(owner.doc.as_deref()),
    );

    if acc.is_empty() {
        return None;
    }
    acc.record(
        MatchedField::Type,
        query.matches_plain_field(Some(&owner.full_name)),
    );
    let (matched_fields, matched_terms) = acc.into_parts();

    Some(Hit {
        kind,
        matched_fields,
        matched_terms,
        id: entry.html_id.clone(),
        name: entry.name.clone(),
        full_name: format!("{}#{}", owner.full_name, entry.name),
        href: format!("{}#{}", owner.path, entry.html_id),
        summary: entry.summary.clone(),
        args_string: entry.args_string.clone(),
        owner: Some(owner.full_name.clone()),
        type_kind: None,
        value: None,
    })
}

fn evaluate_constant(entry: &ConstantEntry, owner: &TypeEntry, query: &Query) -> Option<Hit> {
    let mut acc = MatchAccumulator::default();
    acc.record(MatchedField::Name, query.matches_plain_field(Some(&entry.name)));
    acc.record(
        MatchedField::Doc,
        query.matches_plain_field(entry.doc.as_deref()),
    );

    if acc.is_empty() {
        return None;
    }
    acc.record(
        MatchedField::Type,
        query.matches_plain_field(Some(&owner.full_name)),
    );
    let (matched_fields, matched_terms) = acc.into_parts();

    Some(Hit {
        kind: HitKind::Constant,
        matched_fields,
        matched_terms,
        id: entry.id.clone(),
        name: entry.name.clone(),
        full_name: format!("{}#{}", owner.full_name, entry.name),
        href: format!("{}#{}", owner.path, entry.id),
        summary: entry.summary.clone(),
        args_string: None,
        owner: Some(owner.full_name.clone()),
        type_kind: None,
        value: entry.value.clone(),
    })
}
