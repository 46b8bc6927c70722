//! GraphQL introspection model.
//!
//! Only the parts of `__schema` that column derivation needs are modelled:
//! each named type with its kind and its fields' type references. Everything
//! else in the response (descriptions, arguments, directives) is ignored.

use std::{fmt, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Introspection query sent to the endpoint.
///
/// Type references are expanded seven `ofType` levels deep, enough for
/// `[[T!]!]!`-style signatures.
pub const INTROSPECTION_QUERY: &str = r#"
query IntrospectionQuery {
  __schema {
    types {
      kind
      name
      fields(includeDeprecated: true) {
        name
        type {
          ...TypeRef
        }
      }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// The `__TypeKind` of a type or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Returns true for the LIST and NON_NULL modifiers.
    pub fn is_wrapper(&self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }

    /// Returns true for kinds that map onto a single column.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }

    /// Get the introspection spelling, e.g. `INPUT_OBJECT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type as it appears in a field signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A reference to a named type.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// Wrap a reference in NON_NULL.
    pub fn non_null(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::NonNull, inner)
    }

    /// Wrap a reference in LIST.
    pub fn list(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::List, inner)
    }

    fn wrap(kind: TypeKind, inner: TypeRef) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The introspected definition of one named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    /// Declared fields, in introspection order. Empty for scalars and enums,
    /// which report `fields: null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<Field>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, kind: TypeKind, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            kind,
            fields,
        }
    }

    /// Returns true for GraphQL's own `__Schema`, `__Type`, ... types.
    pub fn is_introspection_type(&self) -> bool {
        self.name.starts_with("__")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Field>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Field>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct SchemaData {
    #[serde(rename = "__schema")]
    schema: Option<RawSchema>,
}

#[derive(Deserialize)]
struct RawSchema {
    types: Vec<TypeDefinition>,
}

/// The flat set of named types from an introspection response.
///
/// Types are kept in response order; lookups are by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
}

impl Schema {
    /// Build a schema from type definitions. Later duplicates replace earlier
    /// ones in place.
    pub fn from_types(types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        Self {
            types: types
                .into_iter()
                .map(|def| (def.name.clone(), def))
                .collect(),
        }
    }

    /// Parse an introspection response.
    ///
    /// Accepts either the full response (`{"data": {"__schema": ...}}`) or
    /// its `data` member alone.
    pub fn from_response(response: &Value) -> Result<Self> {
        let data = response.get("data").unwrap_or(response);
        let data = SchemaData::deserialize(data).map_err(Error::MalformedIntrospection)?;
        let raw = data.schema.ok_or(Error::MissingSchema)?;
        Ok(Self::from_types(raw.types))
    }

    /// Parse an introspection response from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(Error::MalformedIntrospection)?;
        Self::from_response(&value)
    }

    /// Read an introspection dump written by `siphon introspect`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Look up a type by name, failing with [`Error::TypeNotFound`].
    pub fn type_definition(&self, name: &str) -> Result<&TypeDefinition> {
        self.get(name).ok_or_else(|| Error::TypeNotFound {
            name: name.to_string(),
        })
    }

    /// Iterate over all types in response order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// Iterate over OBJECT types that are not part of GraphQL's own
    /// introspection system.
    pub fn object_types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types()
            .filter(|def| def.kind == TypeKind::Object && !def.is_introspection_type())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
