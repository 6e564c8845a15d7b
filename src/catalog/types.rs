//! Serde model of a documentation catalog.
//!
//! The catalog is a tree rooted at the program type. Types own their methods
//! (split by kind), constants and nested types. Collections keep the order in
//! which the documentation generator emitted them.

use serde::{Deserialize, Deserializer, Serialize};

/// Namespace delimiter used in fully qualified names.
pub const NAMESPACE_DELIMITER: &str = "::";

/// Treats an explicit `null` the same as a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A complete documentation catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "nullable")]
    pub repository_name: String,
    /// Root of the entity tree (the top-level namespace).
    pub program: TypeEntry,
}

/// A documented type or namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub html_id: String,
    /// Location of the type's page, relative to the documentation root.
    #[serde(default, deserialize_with = "nullable")]
    pub path: String,
    /// Declaration kind as reported by the generator (class, struct, module, ...).
    #[serde(default, deserialize_with = "nullable")]
    pub kind: String,
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub instance_methods: Vec<MethodEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub class_methods: Vec<MethodEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub constructors: Vec<MethodEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub macros: Vec<MethodEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub constants: Vec<ConstantEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub types: Vec<TypeEntry>,
}

impl TypeEntry {
    /// The last segment of the fully qualified name.
    ///
    /// A delimiter at position 0 is not treated as a separator, so `::Foo`
    /// stays `::Foo`.
    pub fn display_name(&self) -> &str {
        match self.full_name.rfind(NAMESPACE_DELIMITER) {
            Some(i) if i > 0 => &self.full_name[i + NAMESPACE_DELIMITER.len()..],
            _ => &self.full_name,
        }
    }

    /// Iterate over this type and all nested types, depth first in authored order.
    pub fn walk_types(&self) -> Box<dyn Iterator<Item = &TypeEntry> + '_> {
        Box::new(std::iter::once(self).chain(self.types.iter().flat_map(TypeEntry::walk_types)))
    }

    fn method_count(&self) -> usize {
        self.instance_methods.len()
            + self.class_methods.len()
            + self.constructors.len()
            + self.macros.len()
    }
}

/// A documented method, constructor or macro.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub html_id: String,
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub args: Vec<Argument>,
    /// Pre-rendered argument list, e.g. `(key : K, value : V)`.
    #[serde(default)]
    pub args_string: Option<String>,
}

/// A single method argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Name used at call sites; this is the field queries match against.
    #[serde(default, deserialize_with = "nullable")]
    pub external_name: String,
    #[serde(default)]
    pub restriction: Option<String>,
}

/// A documented constant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstantEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Entity counts for a loaded catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub types: usize,
    pub methods: usize,
    pub constants: usize,
}

impl Catalog {
    /// Count the entities reachable from the program root.
    pub fn stats(&self) -> CatalogStats {
        self.program
            .walk_types()
            .fold(CatalogStats::default(), |mut stats, ty| {
                stats.types += 1;
                stats.methods += ty.method_count();
                stats.constants += ty.constants.len();
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn named(full_name: &str) -> TypeEntry {
        TypeEntry {
            full_name: full_name.to_string(),
            ..TypeEntry::default()
        }
    }

    #[rstest]
    #[case("Array", "Array")]
    #[case("HTTP::Server", "Server")]
    #[case("A::B::C", "C")]
    #[case("::Foo", "::Foo")]
    #[case("Top Level Namespace", "Top Level Namespace")]
    fn display_name_is_last_segment(#[case] full_name: &str, #[case] expected: &str) {
        check!(named(full_name).display_name() == expected);
    }

    #[test]
    fn deserializes_nulls_and_missing_collections() {
        let json = r#"{
            "program": {
                "full_name": "Top Level Namespace",
                "path": "toplevel.html",
                "instance_methods": null,
                "types": [
                    {
                        "full_name": "Foo",
                        "kind": "class",
                        "doc": null,
                        "class_methods": [
                            {"name": "new", "args": [{"name": "x", "external_name": "x"}]}
                        ],
                        "constants": [{"id": "BAR", "name": "BAR", "value": "1"}]
                    }
                ],
                "unknown_key": 42
            }
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        check!(catalog.program.instance_methods.is_empty());
        check!(catalog.program.types.len() == 1);

        let foo = &catalog.program.types[0];
        check!(foo.doc.is_none());
        check!(foo.class_methods[0].args[0].external_name == "x");
        check!(foo.class_methods[0].args_string.is_none());
        check!(foo.constants[0].value.as_deref() == Some("1"));
    }

    #[test]
    fn stats_count_the_whole_tree() {
        let mut root = named("Top Level Namespace");
        let mut outer = named("Outer");
        outer.instance_methods.push(MethodEntry {
            name: "each".into(),
            ..MethodEntry::default()
        });
        outer.macros.push(MethodEntry {
            name: "record".into(),
            ..MethodEntry::default()
        });
        let mut inner = named("Outer::Inner");
        inner.constants.push(ConstantEntry {
            name: "MAX".into(),
            ..ConstantEntry::default()
        });
        outer.types.push(inner);
        root.types.push(outer);

        let catalog = Catalog {
            repository_name: String::new(),
            program: root,
        };

        check!(
            catalog.stats()
                == CatalogStats {
                    types: 3,
                    methods: 2,
                    constants: 1
                }
        );
    }
}
