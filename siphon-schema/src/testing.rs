//! Schema fixtures for tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use serde_json::{Value, json};

use crate::{Field, Schema, TypeDefinition, TypeKind, TypeRef};

/// Builds a [`Schema`] from object type declarations.
///
/// Scalar and enum types referenced by fields are not added; column
/// derivation never looks them up.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: Vec<TypeDefinition>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an OBJECT type.
    pub fn object(mut self, name: &str, fields: impl FnOnce(TypeBuilder) -> TypeBuilder) -> Self {
        let builder = fields(TypeBuilder::default());
        self.types
            .push(TypeDefinition::new(name, TypeKind::Object, builder.fields));
        self
    }

    /// Declare a type of any kind with no fields.
    pub fn leaf_type(mut self, name: &str, kind: TypeKind) -> Self {
        self.types.push(TypeDefinition::new(name, kind, Vec::new()));
        self
    }

    pub fn build_types(self) -> Vec<TypeDefinition> {
        self.types
    }

    pub fn build(self) -> Schema {
        Schema::from_types(self.types)
    }
}

/// Field list of one object type.
#[derive(Debug, Default)]
pub struct TypeBuilder {
    fields: Vec<Field>,
}

impl TypeBuilder {
    pub fn scalar(self, name: &str, type_name: &str) -> Self {
        self.field(name, TypeRef::named(TypeKind::Scalar, type_name))
    }

    pub fn enumeration(self, name: &str, type_name: &str) -> Self {
        self.field(name, TypeRef::named(TypeKind::Enum, type_name))
    }

    pub fn object(self, name: &str, type_name: &str) -> Self {
        self.field(name, TypeRef::named(TypeKind::Object, type_name))
    }

    pub fn field(mut self, name: &str, ty: TypeRef) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }
}

fn non_null(kind: TypeKind, name: &str) -> TypeRef {
    TypeRef::non_null(TypeRef::named(kind, name))
}

fn non_null_list(kind: TypeKind, name: &str) -> TypeRef {
    TypeRef::non_null(TypeRef::list(non_null(kind, name)))
}

/// A schema shaped like the public countries GraphQL API.
pub fn countries_schema() -> Schema {
    use TypeKind::{Object, Scalar};

    SchemaBuilder::new()
        .object("Query", |t| {
            t.field("countries", non_null_list(Object, "Country"))
                .field("continents", non_null_list(Object, "Continent"))
        })
        .object("Country", |t| {
            t.field("code", non_null(Scalar, "ID"))
                .field("name", non_null(Scalar, "String"))
                .field("native", non_null(Scalar, "String"))
                .field("phone", non_null(Scalar, "String"))
                .scalar("capital", "String")
                .scalar("currency", "String")
                .field("continent", non_null(Object, "Continent"))
                .field("languages", non_null_list(Object, "Language"))
                .field("emoji", non_null(Scalar, "String"))
                .field("states", non_null_list(Object, "State"))
        })
        .object("Continent", |t| {
            t.field("code", non_null(Scalar, "ID"))
                .field("name", non_null(Scalar, "String"))
                .field("countries", non_null_list(Object, "Country"))
        })
        .object("Language", |t| {
            t.field("code", non_null(Scalar, "ID"))
                .field("name", non_null(Scalar, "String"))
                .field("native", non_null(Scalar, "String"))
                .field("rtl", non_null(Scalar, "Boolean"))
        })
        .object("State", |t| {
            t.scalar("code", "String")
                .field("name", non_null(Scalar, "String"))
                .field("country", non_null(Object, "Country"))
        })
        .leaf_type("ID", Scalar)
        .leaf_type("String", Scalar)
        .leaf_type("Boolean", Scalar)
        .build()
}

/// [`countries_schema`] as an introspection response document.
pub fn countries_introspection() -> Value {
    let schema = countries_schema();
    let types: Vec<&TypeDefinition> = schema.types().collect();
    json!({ "data": { "__schema": { "types": types } } })
}

/// One record of the countries API's `countries` query.
pub fn south_africa() -> Value {
    json!({
        "code": "ZA",
        "name": "South Africa",
        "native": "South Africa",
        "phone": "27",
        "capital": "Pretoria",
        "currency": "ZAR",
        "continent": { "code": "AF", "name": "Africa" },
        "languages": [
            { "code": "af", "name": "Afrikaans" },
            { "code": "en", "name": "English" }
        ],
        "emoji": "🇿🇦"
    })
}
